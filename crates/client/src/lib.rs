//! Typed async client for the stocktrack REST service.
//!
//! [`ApiClient`] speaks the wire contract; [`fetch_snapshot`] pulls everything
//! the status engine needs in one round of concurrent requests.

pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod snapshot;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::ApiClient;
pub use snapshot::{Snapshot, fetch_snapshot};
