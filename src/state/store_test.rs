use super::*;

fn temp_session_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("authdemo-store-{}", uuid::Uuid::new_v4().simple()))
        .join("session.json")
}

fn cleanup(path: &Path) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

// =============================================================
// MemoryStore
// =============================================================

#[test]
fn memory_store_starts_empty() {
    let store = MemoryStore::new();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
    assert!(store.snapshot().is_empty());
}

#[test]
fn memory_store_set_many_then_remove_many() {
    let store = MemoryStore::new();
    store
        .set_many(&[(ACCESS_TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "r"), (USER_KEY, "{}")])
        .unwrap();
    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("r"));
    assert_eq!(store.snapshot().len(), 3);

    store.remove_many(&SESSION_KEYS).unwrap();
    assert!(store.snapshot().is_empty());
}

#[test]
fn memory_store_remove_missing_keys_is_ok() {
    let store = MemoryStore::new();
    store.set_many(&[("other", "kept")]).unwrap();
    store.remove_many(&SESSION_KEYS).unwrap();
    assert_eq!(store.get("other").unwrap().as_deref(), Some("kept"));
}

// =============================================================
// FileStore
// =============================================================

#[test]
fn file_store_missing_file_reads_empty() {
    let path = temp_session_path();
    let store = FileStore::new(&path);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
    assert!(!path.exists());
}

#[test]
fn file_store_persists_across_instances() {
    let path = temp_session_path();
    FileStore::new(&path)
        .set_many(&[(ACCESS_TOKEN_KEY, "t1"), (USER_KEY, r#"{"id":1}"#)])
        .unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(reopened.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("t1"));
    assert_eq!(reopened.get(USER_KEY).unwrap().as_deref(), Some(r#"{"id":1}"#));
    cleanup(&path);
}

#[test]
fn file_store_remove_all_keys_deletes_file() {
    let path = temp_session_path();
    let store = FileStore::new(&path);
    store
        .set_many(&[(ACCESS_TOKEN_KEY, "a"), (REFRESH_TOKEN_KEY, "r"), (USER_KEY, "u")])
        .unwrap();
    assert!(path.exists());

    store.remove_many(&SESSION_KEYS).unwrap();
    assert!(!path.exists());
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
    cleanup(&path);
}

#[test]
fn file_store_remove_keeps_unrelated_entries() {
    let path = temp_session_path();
    let store = FileStore::new(&path);
    store.set_many(&[(ACCESS_TOKEN_KEY, "a"), ("theme", "dark")]).unwrap();

    store.remove_many(&SESSION_KEYS).unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
    cleanup(&path);
}

#[test]
fn file_store_corrupt_file_reads_empty_and_is_replaced() {
    let path = temp_session_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json at all").unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);

    store.set_many(&[(ACCESS_TOKEN_KEY, "fresh")]).unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
    cleanup(&path);
}

#[test]
fn file_store_leaves_no_temp_files() {
    let path = temp_session_path();
    let store = FileStore::new(&path);
    store.set_many(&[(ACCESS_TOKEN_KEY, "a")]).unwrap();
    store.set_many(&[(REFRESH_TOKEN_KEY, "r")]).unwrap();

    let names: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
    cleanup(&path);
}

#[test]
fn file_store_invalid_utf8_reads_empty_and_accepts_writes() {
    let path = temp_session_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, [0xff, 0xfe]).unwrap();

    let store = FileStore::new(&path);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);

    store.set_many(&[(ACCESS_TOKEN_KEY, "t1")]).unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("t1"));
    cleanup(&path);
}

#[test]
fn file_store_wrong_json_shape_reads_empty() {
    for contents in ["[]", r#"{"access_token":5}"#, "null", r#""just a string""#] {
        let path = temp_session_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None, "contents {contents:?}");

        store.remove_many(&SESSION_KEYS).unwrap();
        assert!(!path.exists(), "contents {contents:?}");
        cleanup(&path);
    }
}

#[cfg(unix)]
#[test]
fn file_store_session_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_session_path();
    let store = FileStore::new(&path);
    store.set_many(&[(ACCESS_TOKEN_KEY, "secret")]).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    cleanup(&path);
}
