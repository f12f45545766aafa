mod common;

use anyhow::Result;
use common::test_store;
use cookie_cost::application::{BatchService, DeleteOutcome};
use cookie_cost::storage::{PreferenceStore, Preferences};
use std::fs;

#[test]
fn test_toggle_is_saved_immediately() -> Result<()> {
    let (store, _temp) = test_store()?;

    let mut service = BatchService::new(Some(store.clone()));
    assert!(service.preferences().ask_before_delete);

    service.set_ask_before_delete(false);
    assert!(!store.try_load()?.ask_before_delete);

    let reloaded = BatchService::new(Some(store));
    assert!(!reloaded.preferences().ask_before_delete);

    Ok(())
}

#[test]
fn test_saved_preference_controls_delete_prompt() -> Result<()> {
    let (store, _temp) = test_store()?;
    store.try_save(&Preferences {
        ask_before_delete: false,
    })?;

    let mut service = BatchService::new(Some(store));
    service.upsert("egg", 0.25, 4.0)?;

    let mut prompted = false;
    let outcome = service.delete("egg", || {
        prompted = true;
        false
    })?;

    assert!(!prompted);
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(service.ledger().is_empty());

    Ok(())
}

#[test]
fn test_shutdown_save_writes_file() -> Result<()> {
    let (store, _temp) = test_store()?;
    assert!(!store.path().exists());

    let service = BatchService::new(Some(store.clone()));
    service.save_preferences();

    let raw = fs::read_to_string(store.path())?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value["ask_before_delete"], serde_json::Value::Bool(true));

    Ok(())
}

#[test]
fn test_unreadable_file_reverts_to_default() -> Result<()> {
    let (store, _temp) = test_store()?;
    fs::write(store.path(), "ask_before_delete = false")?;

    let service = BatchService::new(Some(store));
    assert!(service.preferences().ask_before_delete);

    Ok(())
}

#[test]
fn test_write_failure_is_ignored() -> Result<()> {
    let (store, temp) = test_store()?;
    let broken = PreferenceStore::new(temp.path().join("missing").join("prefs.json"));

    let mut service = BatchService::new(Some(broken.clone()));
    service.set_ask_before_delete(false);
    service.save_preferences();

    assert!(!service.preferences().ask_before_delete);
    assert!(!broken.path().exists());
    assert!(!store.path().exists());

    Ok(())
}

#[test]
fn test_no_store_uses_defaults() {
    let mut service = BatchService::new(None);
    assert_eq!(service.preferences(), Preferences::default());
    service.set_ask_before_delete(false);
    assert!(!service.preferences().ask_before_delete);
}
