//! Configuration types for the policy engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::Company;

fn default_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP server settings from `server.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    #[serde(default = "default_addr")]
    pub addr: String,
    /// Default log filter, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            log_level: default_log_level(),
        }
    }
}

/// The complete engine configuration loaded from a config directory.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    server: ServerConfig,
    companies: Vec<Company>,
}

impl PolicyConfig {
    /// Creates a new configuration; companies are kept sorted by id.
    pub fn new(server: ServerConfig, mut companies: Vec<Company>) -> Self {
        companies.sort_by(|a, b| a.id.cmp(&b.id));
        Self { server, companies }
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Returns the configured companies, sorted by id.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }
}
