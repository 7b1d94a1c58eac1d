//! Inventory schema installer.
//!
//! # Responsibility
//! - Create the five inventory tables in an empty database.
//! - Refuse to touch databases written by a newer schema.
//!
//! # Invariants
//! - Installation is all-or-nothing and mirrored to `PRAGMA user_version`.
//! - Repositories never install the schema themselves; a ready store is a
//!   precondition of every repository call.

use super::{ConnectionProvider, DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const INVENTORY_DDL: &str = include_str!("0001_inventory.sql");

/// Tables expected by the repositories.
pub const TABLES: [&str; 5] = ["categories", "providers", "computers", "movements", "users"];

/// Opens a connection through `provider` and installs the schema if missing.
///
/// Creates the database file when it does not exist yet.
pub fn install_schema(provider: &ConnectionProvider) -> DbResult<()> {
    let session = provider.connect_or_create()?;
    install_schema_on(&session)?;
    session.disconnect()?;
    Ok(())
}

/// Installs the schema on an already open connection.
///
/// Returns `Ok(())` without changes when the schema is already current.
pub fn install_schema_on(conn: &Connection) -> DbResult<()> {
    let current = current_user_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if current == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(INVENTORY_DDL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;

    info!("event=schema_install module=db status=ok version={SCHEMA_VERSION}");
    Ok(())
}

pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
