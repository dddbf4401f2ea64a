use super::*;

#[test]
fn config_defaults_when_missing_and_round_trips() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ConsoleStore::open(dir.path())?;
    let cfg = store.read_config()?;
    assert_eq!(cfg.base_url, None);
    assert_eq!(cfg.page_limit, crate::model::DEFAULT_PAGE_LIMIT);

    let cfg = ConsoleConfig {
        version: 1,
        base_url: Some("http://127.0.0.1:4000".to_string()),
        page_limit: 50,
    };
    store.write_config(&cfg)?;
    assert_eq!(store.read_config()?, cfg);
    Ok(())
}

#[test]
fn tokens_are_keyed_by_base_url() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ConsoleStore::open(dir.path())?;
    store.set_token("http://a/", "tok-a")?;
    store.set_token("http://b", "tok-b")?;

    let st = store.read_state()?;
    assert_eq!(st.tokens.get("http://a").map(String::as_str), Some("tok-a"));
    assert_eq!(st.tokens.get("http://b").map(String::as_str), Some("tok-b"));

    store.clear_token("http://a")?;
    assert!(!store.read_state()?.tokens.contains_key("http://a"));
    Ok(())
}

#[test]
fn pins_hydrate_and_flush_through_the_file_store() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ConsoleStore::open(dir.path())?;
    let mut kv = store.kv();

    let mut pins = PinnedBusinesses::hydrate(&kv);
    assert!(pins.ids().is_empty());
    assert!(pins.pin("b1", &mut kv)?);
    assert!(pins.pin("b2", &mut kv)?);
    assert!(!pins.pin("b1", &mut kv)?);
    assert_eq!(pins.ids(), &["b2".to_string(), "b1".to_string()]);

    let raw = std::fs::read_to_string(store.storage_path())?;
    assert!(raw.contains(PINNED_KEY));

    let again = PinnedBusinesses::hydrate(&store.kv());
    assert_eq!(again, pins);

    assert!(!pins.toggle("b2", &mut kv)?);
    assert_eq!(PinnedBusinesses::hydrate(&kv).ids(), &["b1".to_string()]);
    Ok(())
}

#[test]
fn notes_share_the_file_with_pins() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ConsoleStore::open(dir.path())?;
    let mut kv = store.kv();

    let mut pins = PinnedBusinesses::hydrate(&kv);
    let mut notes = SupportNotes::hydrate(&kv);
    pins.pin("b1", &mut kv)?;
    notes.set("b1", "  called owner, waiting on invoice ", &mut kv)?;

    let kv2 = store.kv();
    assert!(PinnedBusinesses::hydrate(&kv2).contains("b1"));
    assert_eq!(
        SupportNotes::hydrate(&kv2).get("b1"),
        Some("called owner, waiting on invoice")
    );

    notes.set("b1", "", &mut kv)?;
    assert!(SupportNotes::hydrate(&kv).is_empty());
    Ok(())
}

#[test]
fn malformed_values_hydrate_empty() -> Result<()> {
    let mut kv = MemoryKv::new();
    kv.set(PINNED_KEY, "{not json")?;
    kv.set(SUPPORT_NOTES_KEY, "[1,2]")?;
    assert!(PinnedBusinesses::hydrate(&kv).ids().is_empty());
    assert!(SupportNotes::hydrate(&kv).is_empty());
    Ok(())
}

#[test]
fn corrupt_storage_file_reads_as_empty() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ConsoleStore::open(dir.path())?;
    std::fs::write(store.storage_path(), b"garbage")?;
    let mut kv = store.kv();
    assert_eq!(kv.get(PINNED_KEY)?, None);
    kv.set(PINNED_KEY, "[\"b9\"]")?;
    assert_eq!(kv.get(PINNED_KEY)?.as_deref(), Some("[\"b9\"]"));
    Ok(())
}

/// Reads like an empty store and refuses every write.
struct ReadOnlyKv;

impl KeyValueStore for ReadOnlyKv {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        anyhow::bail!("storage is read-only: {key}")
    }
}

#[test]
fn failed_writes_leave_pins_and_notes_unchanged() {
    let mut kv = ReadOnlyKv;

    let mut pins = PinnedBusinesses::hydrate(&kv);
    assert!(pins.pin("b1", &mut kv).is_err());
    assert!(pins.ids().is_empty());
    assert!(!pins.contains("b1"));

    let mut notes = SupportNotes::hydrate(&kv);
    assert!(notes.set("b1", "called owner", &mut kv).is_err());
    assert_eq!(notes.get("b1"), None);
    assert!(notes.is_empty());
}
