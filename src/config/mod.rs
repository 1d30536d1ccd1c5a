//! Configuration loading for the HR Policy Engine.
//!
//! This module loads server settings and company tenants (attendance
//! window, payroll rates and leave policies) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hr_policy_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Loaded {} companies", config.companies().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PolicyConfig, ServerConfig};
