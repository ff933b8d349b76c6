use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let raw = env::var("CPR_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let bind_addr = raw
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid CPR_BIND_ADDR {:?}: {}", raw, e)))?;
        Ok(Self { bind_addr })
    }
}
