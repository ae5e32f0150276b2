//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line (services).
    Json,
    /// Human-readable lines (terminal tools).
    Pretty,
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    pub format: LogFormat,
    /// Send logs to stderr instead of stdout, keeping stdout for command output.
    pub stderr: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            format: LogFormat::Json,
            stderr: false,
        }
    }
}

impl TracingConfig {
    /// Defaults for command-line tools: quiet, readable, on stderr.
    pub fn cli() -> Self {
        Self {
            default_filter: "warn".to_string(),
            format: LogFormat::Pretty,
            stderr: true,
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // `try_init` fails once a global subscriber exists; that is the no-op case.
    let _ = match (config.format, config.stderr) {
        (LogFormat::Json, false) => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        (LogFormat::Json, true) => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_writer(std::io::stderr)
            .try_init(),
        (LogFormat::Pretty, false) => builder.try_init(),
        (LogFormat::Pretty, true) => builder.with_writer(std::io::stderr).try_init(),
    };
}
