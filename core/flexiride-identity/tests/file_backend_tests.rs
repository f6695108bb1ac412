use flexiride_identity::{FileKeyValueStore, IdentityError, IdentityStore, KeyValueStore};
use flexiride_types::{Role, Session};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn admin_session() -> Session {
    Session {
        id: "42".to_string(),
        email: "admin@x.com".to_string(),
        name: "Admin".to_string(),
        role: Role::Admin,
        token: Some("tok-42".to_string()),
    }
}

// ── FileKeyValueStore ─────────────────────────────────────────────

#[test]
fn missing_key_reads_as_none() {
    let dir = TempDir::new().unwrap();
    let kv = FileKeyValueStore::new(dir.path());
    assert_eq!(kv.get_item("user").unwrap(), None);
}

#[test]
fn set_creates_directory_lazily() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let kv = FileKeyValueStore::new(&nested);
    assert!(!nested.exists());

    kv.set_item("user", "value").unwrap();
    assert!(nested.join("user.json").exists());
    assert_eq!(kv.get_item("user").unwrap().as_deref(), Some("value"));
}

#[test]
fn set_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let kv = FileKeyValueStore::new(dir.path());
    kv.set_item("user", "value").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["user.json".to_string()]);
}

#[test]
fn remove_missing_key_is_ok() {
    let dir = TempDir::new().unwrap();
    let kv = FileKeyValueStore::new(dir.path().join("never-created"));
    kv.remove_item("user").unwrap();
}

#[test]
fn rejects_path_like_keys() {
    let dir = TempDir::new().unwrap();
    let kv = FileKeyValueStore::new(dir.path());
    assert!(matches!(
        kv.set_item("../escape", "x"),
        Err(IdentityError::InvalidKey(_))
    ));
    assert!(matches!(kv.get_item(""), Err(IdentityError::InvalidKey(_))));
}

// ── IdentityStore over files ──────────────────────────────────────

#[test]
fn session_survives_new_store_instance() {
    let dir = TempDir::new().unwrap();
    IdentityStore::at_dir(dir.path()).put(&admin_session());

    let reopened = IdentityStore::at_dir(dir.path());
    assert_eq!(reopened.get(), Some(admin_session()));
}

#[test]
fn clear_deletes_file() {
    let dir = TempDir::new().unwrap();
    let store = IdentityStore::at_dir(dir.path());
    store.put(&admin_session());
    store.clear();

    assert!(!dir.path().join("user.json").exists());
    assert_eq!(IdentityStore::at_dir(dir.path()).get(), None);
}

#[test]
fn truncated_file_reads_as_none() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("user.json"), r#"{"id":"42","email":"#).unwrap();
    assert_eq!(IdentityStore::at_dir(dir.path()).get(), None);
}

#[test]
fn unwritable_location_degrades_silently() {
    let dir = TempDir::new().unwrap();
    // A regular file where the store expects a directory.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let store = IdentityStore::at_dir(&blocker);
    store.put(&admin_session());
    assert_eq!(store.get(), None);
    store.clear();
}

#[test]
fn default_dir_ends_with_app_name() {
    if let Some(dir) = IdentityStore::default_dir() {
        assert!(dir.ends_with("flexiride"));
    }
}
