//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading server
//! settings and company tenants from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{PolicyError, PolicyResult};
use crate::models::Company;
use crate::policy::validate_amount;

use super::types::{PolicyConfig, ServerConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── server.yaml        # addr, log_level
/// └── companies/
///     └── acme.yaml      # one company per file
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_policy_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Binding to {}", loader.server().addr);
/// # Ok::<(), hr_policy_engine::error::PolicyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PolicyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with `ConfigNotFound` when `server.yaml` or the `companies`
    /// directory is missing or holds no company files, and with
    /// `ConfigParseError` on invalid YAML, duplicate company ids or a
    /// company with two policies for the same leave type.
    pub fn load<P: AsRef<Path>>(path: P) -> PolicyResult<Self> {
        let path = path.as_ref();

        let server = Self::load_yaml::<ServerConfig>(&path.join("server.yaml"))?;
        let companies = Self::load_companies(&path.join("companies"))?;

        Ok(Self {
            config: PolicyConfig::new(server, companies),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PolicyResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PolicyError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PolicyError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every company file from the companies directory.
    fn load_companies(companies_dir: &Path) -> PolicyResult<Vec<Company>> {
        let dir_str = companies_dir.display().to_string();

        let entries = fs::read_dir(companies_dir).map_err(|_| PolicyError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut companies: Vec<Company> = Vec::new();
        let mut seen = HashSet::new();

        for entry in entries {
            let entry = entry.map_err(|_| PolicyError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
            {
                continue;
            }

            let company = Self::load_yaml::<Company>(&path)?;
            Self::validate_company(&path, &company)?;
            if !seen.insert(company.id.clone()) {
                return Err(PolicyError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate company id '{}'", company.id),
                });
            }
            companies.push(company);
        }

        if companies.is_empty() {
            return Err(PolicyError::ConfigNotFound {
                path: format!("{} (no company files found)", dir_str),
            });
        }

        Ok(companies)
    }

    fn validate_company(path: &Path, company: &Company) -> PolicyResult<()> {
        let parse_error = |message: String| PolicyError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        if company.id.trim().is_empty() {
            return Err(parse_error("company id must not be empty".to_string()));
        }

        let payroll = &company.settings.payroll;
        for (field, rate) in [
            ("attendance_bonus_rate", payroll.attendance_bonus_rate),
            ("late_attendance_penalty_rate", payroll.late_attendance_penalty_rate),
        ] {
            validate_amount(field, rate).map_err(|err| parse_error(err.to_string()))?;
        }

        let mut leave_types = HashSet::new();
        for policy in &company.leave_policies {
            if !leave_types.insert(policy.leave_type) {
                return Err(parse_error(format!(
                    "duplicate leave policy for {} in company '{}'",
                    policy.leave_type, company.id
                )));
            }
        }
        Ok(())
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        self.config.server()
    }

    /// Returns all configured companies, sorted by id.
    pub fn companies(&self) -> &[Company] {
        self.config.companies()
    }

    /// Gets a company by id.
    pub fn company(&self, company_id: &str) -> PolicyResult<&Company> {
        self.companies()
            .iter()
            .find(|c| c.id == company_id)
            .ok_or_else(|| PolicyError::CompanyNotFound {
                company_id: company_id.to_string(),
            })
    }
}
