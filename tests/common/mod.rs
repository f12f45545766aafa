// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use cookie_cost::application::BatchService;
use cookie_cost::storage::PreferenceStore;
use tempfile::TempDir;

pub const EPS: f64 = 1e-9;

/// Helper to create a preference store in a temporary directory
pub fn test_store() -> Result<(PreferenceStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = PreferenceStore::new(temp_dir.path().join("prefs.json"));
    Ok((store, temp_dir))
}

/// Helper to assert two amounts are equal within floating-point tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

/// Test fixture: Standard batch setups
pub struct StandardBatch;

impl StandardBatch {
    /// Egg and butter at rounded unit costs
    pub fn egg_and_butter() -> Result<BatchService> {
        let mut service = BatchService::new(None);
        service.upsert("egg", 0.247, 4.0)?;
        service.upsert("butter", 0.761, 8.0)?;
        Ok(service)
    }

    /// Egg and butter priced from their bulk packages
    pub fn egg_and_butter_bulk() -> Result<BatchService> {
        let mut service = BatchService::new(None);
        service.add_bulk("egg", 22.24, 90.0, 4.0)?;
        service.add_bulk("butter", 12.18, 16.0, 8.0)?;
        Ok(service)
    }
}
