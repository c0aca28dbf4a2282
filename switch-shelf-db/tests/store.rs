use switch_shelf_db::{KvStore, MemoryStore, SchemaError, SqliteStore, StoreError};

/// Run the same behavioural checks against every store implementation.
fn exercise_store<S: KvStore>(store: &mut S) {
    assert!(!store.bucket_exists("b").unwrap());
    assert_eq!(store.get("b", b"k").unwrap(), None);
    assert_eq!(store.count("b").unwrap(), 0);

    assert!(matches!(
        store.put("b", b"k", b"v"),
        Err(StoreError::MissingBucket(_))
    ));

    store.create_bucket("b").unwrap();
    store.create_bucket("b").unwrap();
    assert!(store.bucket_exists("b").unwrap());

    store.put("b", b"k", b"v1").unwrap();
    store.put("b", b"k", b"v2").unwrap();
    assert_eq!(store.get("b", b"k").unwrap(), Some(b"v2".to_vec()));
    assert_eq!(store.count("b").unwrap(), 1);

    store
        .put_batch(
            "other",
            &[
                (b"a".as_slice(), b"1".as_slice()),
                (b"b".as_slice(), b"2".as_slice()),
            ],
        )
        .unwrap();
    assert!(store.bucket_exists("other").unwrap());
    assert_eq!(store.count("other").unwrap(), 2);
    assert_eq!(store.get("b", b"a").unwrap(), None);

    assert!(store.delete_bucket("b").unwrap());
    assert!(!store.delete_bucket("b").unwrap());
    assert!(!store.bucket_exists("b").unwrap());
    assert_eq!(store.get("b", b"k").unwrap(), None);
    assert_eq!(store.count("other").unwrap(), 2);
}

#[test]
fn memory_store_behaviour() {
    exercise_store(&mut MemoryStore::new());
}

#[test]
fn sqlite_store_behaviour() {
    exercise_store(&mut SqliteStore::open_memory().unwrap());
}

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("slm.db");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        store
            .put_batch("deep-scan", &[(b"key".as_slice(), b"value".as_slice())])
            .unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(
        store.get("deep-scan", b"key").unwrap(),
        Some(b"value".to_vec())
    );
}

#[test]
fn sqlite_delete_bucket_removes_entries() {
    let mut store = SqliteStore::open_memory().unwrap();
    store
        .put_batch("b", &[(b"k".as_slice(), b"v".as_slice())])
        .unwrap();
    store.delete_bucket("b").unwrap();
    let rows: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn sqlite_read_only_store_reads_but_never_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slm.db");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store
            .put_batch("deep-scan", &[(b"key".as_slice(), b"value".as_slice())])
            .unwrap();
    }

    let mut store = SqliteStore::open_read_only(&path).unwrap();
    assert_eq!(store.count("deep-scan").unwrap(), 1);
    assert_eq!(
        store.get("deep-scan", b"key").unwrap(),
        Some(b"value".to_vec())
    );
    assert!(store.put("deep-scan", b"other", b"v").is_err());
    assert!(store.delete_bucket("deep-scan").is_err());
}

#[test]
fn sqlite_read_only_open_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nested").join("slm.db");
    assert!(SqliteStore::open_read_only(&missing).is_err());
    assert!(!missing.parent().unwrap().exists());

    let foreign = dir.path().join("other.db");
    rusqlite::Connection::open(&foreign)
        .unwrap()
        .execute_batch("CREATE TABLE t (x INTEGER);")
        .unwrap();
    assert!(matches!(
        SqliteStore::open_read_only(&foreign),
        Err(StoreError::Schema(SchemaError::Missing))
    ));
    let store = SqliteStore::open(&foreign).unwrap();
    assert!(!store.bucket_exists("deep-scan").unwrap());
}
