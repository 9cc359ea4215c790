use systemdb_core::db::migrations::latest_version;
use systemdb_core::db::{open_db, open_db_in_memory};
use systemdb_core::{
    CatalogStore, Item, SqliteStorage, StorageBackend, System, STORAGE_KEY,
};

#[test]
fn migrations_set_user_version_to_latest() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn open_is_idempotent_over_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite3");

    drop(open_db(&path).unwrap());
    drop(open_db(&path).unwrap());
}

#[test]
fn kv_set_get_remove_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let mut storage = SqliteStorage::new(&conn);

    assert_eq!(storage.get("missing").unwrap(), None);

    storage.set("slot", "first").unwrap();
    assert_eq!(storage.get("slot").unwrap().as_deref(), Some("first"));

    // Full-value rewrite on every set.
    storage.set("slot", "second").unwrap();
    assert_eq!(storage.get("slot").unwrap().as_deref(), Some("second"));

    storage.remove("slot").unwrap();
    assert_eq!(storage.get("slot").unwrap(), None);

    // Removing an absent key is not an error.
    storage.remove("slot").unwrap();
}

#[test]
fn catalog_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut store = CatalogStore::load(SqliteStorage::new(&conn)).unwrap();
        store
            .append(System::new(
                "Alpha",
                "G1",
                vec!["rich".to_string()],
                vec![Item::new("Iron", 10.0, 5.0)],
                vec![],
            ))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = CatalogStore::load(SqliteStorage::new(&conn)).unwrap();
    assert_eq!(store.systems().len(), 1);
    assert_eq!(store.systems()[0].name, "Alpha");
    assert_eq!(store.systems()[0].tags, vec!["rich".to_string()]);
}

#[test]
fn clear_deletes_the_durable_slot() {
    let conn = open_db_in_memory().unwrap();

    {
        let mut store = CatalogStore::load(SqliteStorage::new(&conn)).unwrap();
        store
            .append(System::new(
                "Alpha",
                "G1",
                vec![],
                vec![Item::new("Iron", 10.0, 5.0)],
                vec![],
            ))
            .unwrap();
        store.clear().unwrap();
    }

    let storage = SqliteStorage::new(&conn);
    assert_eq!(storage.get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn corrupt_slot_fails_load_fast() {
    let conn = open_db_in_memory().unwrap();
    {
        let mut storage = SqliteStorage::new(&conn);
        storage.set(STORAGE_KEY, "{{{ not a catalog").unwrap();
    }

    assert!(CatalogStore::load(SqliteStorage::new(&conn)).is_err());
}
