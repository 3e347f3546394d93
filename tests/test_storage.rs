use _market_explorer_core::notes::{self, NoteValue};
use _market_explorer_core::storage::create_operator_from_uri;

#[tokio::test]
async fn test_memory_uri_round_trip() -> anyhow::Result<()> {
    let op = create_operator_from_uri("memory://")?;
    op.write("probe.json", b"{}".to_vec()).await?;
    assert!(op.exists("probe.json").await?);
    Ok(())
}

#[tokio::test]
async fn test_memory_operators_share_backing_store() -> anyhow::Result<()> {
    // The bindings construct a fresh operator per call; cached memory
    // operators must address the same store.
    let a = create_operator_from_uri("memory://")?;
    let b = create_operator_from_uri("memory://")?;
    a.write("shared.json", b"{}".to_vec()).await?;
    assert!(b.exists("shared.json").await?);
    Ok(())
}

#[tokio::test]
async fn test_file_uri_persists_under_root() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let uri = format!("file://{}", dir.path().display());

    let op = create_operator_from_uri(&uri)?;
    notes::ensure_notes_root(&op).await?;
    notes::upsert_note(
        &op,
        "team",
        "Acme",
        "FR",
        NoteValue::Legacy("hello".to_string()),
    )
    .await?;

    assert!(dir.path().join("notes").join("team.json").exists());

    let loaded = notes::load_notes(&op, "team").await?;
    assert_eq!(
        loaded.get("acme__fr"),
        Some(&NoteValue::Legacy("hello".to_string()))
    );

    Ok(())
}

#[test]
fn test_unsupported_scheme_is_rejected() {
    assert!(create_operator_from_uri("redis://localhost").is_err());
    assert!(create_operator_from_uri("not a uri").is_err());
}
