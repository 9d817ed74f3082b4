//! Application configuration structures
//!
//! Plain data carriers; loading and validation live in the infrastructure
//! layer.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_HORIZON_YEARS};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Preventive-maintenance scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Forward window, in years, covered by the initial occurrence batch
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { horizon_years: DEFAULT_HORIZON_YEARS }
    }
}

fn default_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}
