//! Environment-variable helpers for deployment-specific constants
//!
//! Every tool ships with hardcoded defaults (region, database, workspace id,
//! output bucket) that point at placeholder resources; these helpers let a
//! real deployment override them without editing source. The query text
//! itself is never configurable.

use std::env;

use crate::error::{Result, UsageError};

/// Read an environment variable, falling back to a hardcoded default.
pub fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            log::debug!("{} not set, using default {:?}", name, default);
            default.to_string()
        }
    }
}

/// Read a required environment variable, erroring out if it is missing.
pub fn require_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| {
        UsageError::configuration(format!("{} environment variable not set", name))
    })
}
