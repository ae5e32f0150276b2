use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STOCKTRACK_BIND_ADDR is not a socket address: {0}")]
    BindAddr(String),
    #[error("STOCKTRACK_SEED_DEMO must be true or false, got {0:?}")]
    SeedDemo(String),
}

/// Server settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub seed_demo: bool,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("STOCKTRACK_BIND_ADDR").ok(),
            std::env::var("STOCKTRACK_SEED_DEMO").ok(),
        )
    }

    fn from_vars(bind_addr: Option<String>, seed_demo: Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_addr.clone()))?;

        let seed_demo = match seed_demo.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(v) => return Err(ConfigError::SeedDemo(v.to_string())),
        };

        Ok(Self { bind_addr, seed_demo })
    }
}
