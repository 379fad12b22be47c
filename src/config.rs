//! Host server configuration parsed from environment variables.
//!
//! Leptos build options (`site-root`, `output-name`, ...) come from
//! `[package.metadata.leptos]` or the `LEPTOS_*` variables cargo-leptos sets;
//! this module only covers what the host itself needs.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: listen port, default 3000
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPort` when `PORT` is set but is not a
    /// port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self { port: parse_port(std::env::var("PORT").ok().as_deref())? })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidPort(value.to_owned())),
    }
}
