//! Tracing/logging setup shared by the stocktrack binaries.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::{LogFormat, TracingConfig};

/// Initialize process-wide observability with the service defaults
/// (JSON logs on stdout, `info` unless `RUST_LOG` says otherwise).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&TracingConfig::default());
}

/// Initialize with an explicit configuration.
pub fn init_with(config: &TracingConfig) {
    tracing::init(config);
}
