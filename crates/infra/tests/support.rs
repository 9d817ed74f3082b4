//! Shared helpers for infra integration tests

use std::sync::Arc;

use axle_infra::database::DbManager;
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the full schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("migrations should run");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}
