//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `AXLE_DB_PATH`: Database file path
//! - `AXLE_DB_POOL_SIZE`: Connection pool size
//! - `AXLE_SCHEDULER_HORIZON_YEARS`: Forward window for generated batches
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./axle.json` or `./axle.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)

use std::path::{Path, PathBuf};

use axle_domain::constants::DEFAULT_HORIZON_YEARS;
use axle_domain::{AxleError, Config, DatabaseConfig, Result, SchedulerConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `AxleError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `AxleError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("AXLE_DB_PATH")?;
    let db_pool_size = env_var("AXLE_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| AxleError::Config(format!("Invalid pool size: {}", e)))
    })?;

    let horizon_years = match std::env::var("AXLE_SCHEDULER_HORIZON_YEARS") {
        Ok(raw) => raw
            .parse::<u32>()
            .map_err(|e| AxleError::Config(format!("Invalid horizon years: {}", e)))?,
        Err(_) => DEFAULT_HORIZON_YEARS,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        scheduler: SchedulerConfig { horizon_years },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AxleError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AxleError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AxleError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AxleError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format detected by extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(contents)
            .map_err(|e| AxleError::Config(format!("Invalid JSON config: {}", e))),
        Some("toml") => toml::from_str(contents)
            .map_err(|e| AxleError::Config(format!("Invalid TOML config: {}", e))),
        other => Err(AxleError::Config(format!(
            "Unsupported config format: {}",
            other.unwrap_or("(none)")
        ))),
    }
}

/// Probe the standard config file locations, first hit wins
fn probe_config_paths() -> Option<PathBuf> {
    let candidates = [
        "config.json",
        "config.toml",
        "axle.json",
        "axle.toml",
        "../config.json",
        "../config.toml",
    ];

    candidates.iter().map(PathBuf::from).find(|p| p.exists())
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| AxleError::Config(format!("Missing environment variable: {name}")))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parses_json_config() {
        let json = r#"{
            "database": { "path": "/tmp/axle.db", "pool_size": 8 },
            "scheduler": { "horizon_years": 3 }
        }"#;

        let config = parse_config(json, Path::new("config.json")).unwrap();
        assert_eq!(config.database.path, "/tmp/axle.db");
        assert_eq!(config.database.pool_size, 8);
        assert_eq!(config.scheduler.horizon_years, 3);
    }

    #[test]
    fn parses_toml_config_with_defaults() {
        let toml = r#"
            [database]
            path = "/tmp/axle.db"
        "#;

        let config = parse_config(toml, Path::new("config.toml")).unwrap();
        assert_eq!(config.database.path, "/tmp/axle.db");
        assert_eq!(config.database.pool_size, 4);
        assert_eq!(config.scheduler.horizon_years, DEFAULT_HORIZON_YEARS);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = parse_config("{}", Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, AxleError::Config(_)));
    }

    #[test]
    fn loads_from_explicit_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("axle.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[database]\npath = \"/tmp/axle.db\"\npool_size = 2").unwrap();

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.database.pool_size, 2);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/axle.toml"))).unwrap_err();
        assert!(matches!(err, AxleError::Config(_)));
    }
}
