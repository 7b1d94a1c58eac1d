use inventory_core::db::schema::{current_user_version, install_schema, SCHEMA_VERSION, TABLES};
use inventory_core::{
    Category, CategoryRepository, ConnectionProvider, DbError, RepoError, Repository, StoreConfig,
};
use rusqlite::Connection;

#[test]
fn install_schema_creates_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::for_path(dir.path().join("inventory.db"));

    install_schema(&provider).unwrap();

    let session = provider.connect().unwrap();
    assert_eq!(current_user_version(&session).unwrap(), SCHEMA_VERSION);
    for table in TABLES {
        assert_table_exists(&session, table);
    }
}

#[test]
fn installing_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::for_path(dir.path().join("inventory.db"));

    install_schema(&provider).unwrap();
    install_schema(&provider).unwrap();

    let session = provider.connect().unwrap();
    assert_eq!(current_user_version(&session).unwrap(), SCHEMA_VERSION);
}

#[test]
fn installing_over_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = install_schema(&ConnectionProvider::for_path(&path)).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn connect_reports_unavailable_store() {
    let dir = tempfile::tempdir().unwrap();
    let provider =
        ConnectionProvider::for_path(dir.path().join("missing").join("inventory.db"));

    let err = provider.connect().unwrap_err();
    assert!(matches!(err, DbError::Unavailable { .. }));
}

#[test]
fn connections_enable_foreign_keys_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::for_path(dir.path().join("inventory.db"));

    let session = provider.connect_or_create().unwrap();
    assert_eq!(foreign_keys_pragma(&session), 1);
    session.disconnect().unwrap();
}

#[test]
fn foreign_keys_can_be_disabled_by_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = StoreConfig::new(dir.path().join("inventory.db"));
    config.foreign_keys = false;
    let provider = ConnectionProvider::new(config);

    let session = provider.connect_or_create().unwrap();
    assert_eq!(foreign_keys_pragma(&session), 0);
}

#[test]
fn repository_surfaces_unavailable_store() {
    let dir = tempfile::tempdir().unwrap();
    let provider =
        ConnectionProvider::for_path(dir.path().join("missing").join("inventory.db"));
    let repo = CategoryRepository::new(provider);

    let err = repo.get_all().unwrap_err();
    assert!(matches!(err, RepoError::StoreUnavailable { .. }));
    assert!(err.to_string().starts_with("failed to list Category"));
}

#[test]
fn connect_does_not_create_missing_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventroy.db");
    let provider = ConnectionProvider::for_path(&path);

    let err = provider.connect().unwrap_err();
    assert!(matches!(err, DbError::Unavailable { .. }));
    assert!(!path.exists());

    let repo = CategoryRepository::new(provider);
    let err = repo.search("laptop").unwrap_err();
    assert!(matches!(err, RepoError::StoreUnavailable { .. }));
    assert!(!path.exists());
}

#[test]
fn connect_or_create_creates_empty_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");
    let provider = ConnectionProvider::for_path(&path);

    provider.connect_or_create().unwrap().disconnect().unwrap();
    assert!(path.exists());

    let session = provider.connect().unwrap();
    assert_eq!(current_user_version(&session).unwrap(), 0);
}

#[test]
fn sessions_register_fold_function() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::for_path(dir.path().join("inventory.db"));
    install_schema(&provider).unwrap();

    let session = provider.connect().unwrap();
    let folded: String = session
        .query_row("SELECT fold(?1);", ["EQUIPOS DE CÓMPUTO"], |row| row.get(0))
        .unwrap();
    assert_eq!(folded, "equipos de cómputo");

    let is_null: bool = session
        .query_row("SELECT fold(NULL) IS NULL;", [], |row| row.get(0))
        .unwrap();
    assert!(is_null);
}

#[test]
fn repository_without_schema_fails_with_statement_error() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ConnectionProvider::for_path(dir.path().join("empty.db"));
    provider.connect_or_create().unwrap().disconnect().unwrap();
    let repo = CategoryRepository::new(provider);

    let err = repo
        .create(&Category::new("Laptops", "Portable computers"))
        .unwrap_err();
    assert!(matches!(err, RepoError::StatementFailed { .. }));
    assert!(err.to_string().starts_with("failed to create Category: "));
}

fn foreign_keys_pragma(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
