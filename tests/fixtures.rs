use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use tx_dashboard::fixtures::{BUILTIN, load_dashboard, load_fixture, validate_calls};
use tx_dashboard::models::datasets::traces::{CallKind, CallRecord};
use tx_dashboard::models::errors::FixtureError;
use tx_dashboard::trace::AddressBook;

// Per-test scratch file so parallel tests don't collide
fn scratch_file(name: &str, contents: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("tx-dashboard-{}", std::process::id()));
    fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn test_fixture_file_replaces_builtin() -> Result<()> {
    let mut data = BUILTIN.clone();
    data.transaction.block = 1;
    data.calls.truncate(1);
    let path = scratch_file("fixture.json", &serde_json::to_string_pretty(&data)?)?;

    let loaded = load_fixture(&path)?;
    assert_eq!(loaded, data);
    assert_eq!(loaded.calls.len(), 1);
    Ok(())
}

#[test]
fn test_missing_and_malformed_fixtures() -> Result<()> {
    let missing = load_fixture("/nonexistent/tx-dashboard/fixture.json");
    assert!(matches!(missing, Err(FixtureError::Read { .. })));

    let path = scratch_file("broken.json", "{ \"transaction\": ")?;
    assert!(matches!(load_fixture(&path), Err(FixtureError::Parse { .. })));
    Ok(())
}

#[test]
fn test_out_of_order_calls_are_rejected() {
    let calls = vec![
        CallRecord::new(0, CallKind::Call, "a", 0),
        CallRecord::new(2, CallKind::Call, "b", 1),
        CallRecord::new(1, CallKind::Call, "c", 1),
    ];
    assert!(matches!(
        validate_calls(&calls),
        Err(FixtureError::OutOfOrderCall { id: 1, previous_id: 2 })
    ));
    assert!(validate_calls(&calls[..2]).is_ok());
}

#[test]
fn test_trace_file_replaces_calls() -> Result<()> {
    let trace = r#"{
        "type": "CALL",
        "from": "0xfd29445e0716ae540dd85e2a5748641c070e5e77",
        "to": "0xce21b204cef753cd8888b842baa9fda20cda1954",
        "gas": "0x10",
        "gasUsed": "0x8",
        "input": "0x",
        "calls": [
            {
                "type": "STATICCALL",
                "from": "0xce21b204cef753cd8888b842baa9fda20cda1954",
                "to": "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640",
                "gas": "0x4",
                "gasUsed": "0x2",
                "input": "0xddca3f43"
            }
        ]
    }"#;
    let path = scratch_file("trace.json", trace)?;
    let path = path.to_string_lossy().to_string();

    let data = load_dashboard(None, Some(&path), &AddressBook::default())?;
    assert_eq!(data.transaction, BUILTIN.transaction);
    assert_eq!(data.calls.len(), 2);
    assert_eq!(data.calls[1].kind, CallKind::StaticCall);
    assert_eq!(data.calls[1].depth, 1);
    Ok(())
}

#[test]
fn test_builtin_calls_are_well_formed() {
    assert!(validate_calls(&BUILTIN.calls).is_ok());
    assert!(
        BUILTIN
            .calls
            .windows(2)
            .all(|pair| pair[1].depth <= pair[0].depth + 1)
    );
}
