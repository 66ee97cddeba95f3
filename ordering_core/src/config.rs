//! Service configuration.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Environment variable naming the listen address.
pub const BIND_ADDR_ENV: &str = "ORDERING_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    /// Read configuration from the environment, falling back to the
    /// default listen address.
    pub fn from_env() -> Result<Self> {
        let raw = env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw
            .parse()
            .with_context(|| format!("invalid {BIND_ADDR_ENV}: {raw}"))?;
        Ok(Self { bind_addr })
    }
}
