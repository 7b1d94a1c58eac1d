//! Per-operation connection handling for SQLite.
//!
//! # Responsibility
//! - Open a configured connection whenever a repository call starts.
//! - Release it when the call finishes, on success and failure alike.
//!
//! # Invariants
//! - `ConnectionProvider` holds configuration only, never a live handle, so it
//!   can be cloned and shared across threads.
//! - Every `DbSession` owns exactly one connection; dropping the session
//!   closes it.
//! - `connect` never creates a database file; only `connect_or_create` does.
//! - Every session registers the `fold(text)` SQL function used for
//!   case-insensitive search and ordering.

use super::{DbError, DbResult};
use crate::config::StoreConfig;
use log::{debug, error};
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Hands out fresh store connections built from one `StoreConfig`.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: StoreConfig,
}

impl ConnectionProvider {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Provider for a database file using default connection settings.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::new(path))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn database_path(&self) -> &Path {
        self.config.database_path.as_path()
    }

    /// Opens a connection to an existing store and applies the configured
    /// pragmas.
    ///
    /// # Errors
    /// - `DbError::Unavailable` when the file is missing or cannot be opened.
    /// - `DbError::Sqlite` when connection setup fails after opening.
    ///
    /// # Side effects
    /// - Emits `db_connect` logging events with duration and status.
    pub fn connect(&self) -> DbResult<DbSession> {
        self.open(OpenFlags::default().difference(OpenFlags::SQLITE_OPEN_CREATE))
    }

    /// Like `connect`, but creates an empty database file when none exists.
    pub fn connect_or_create(&self) -> DbResult<DbSession> {
        self.open(OpenFlags::default())
    }

    fn open(&self, flags: OpenFlags) -> DbResult<DbSession> {
        let started_at = Instant::now();
        let path = self.database_path();

        let conn = match Connection::open_with_flags(path, flags) {
            Ok(conn) => conn,
            Err(source) => {
                error!(
                    "event=db_connect module=db status=error duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    source
                );
                return Err(DbError::Unavailable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if let Err(err) = configure_connection(&conn, &self.config) {
            error!(
                "event=db_connect module=db status=error duration_ms={} error_code=db_configure_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        debug!(
            "event=db_connect module=db status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(DbSession { conn, started_at })
    }
}

/// One acquired connection, released by `disconnect` or by drop.
#[derive(Debug)]
pub struct DbSession {
    conn: Connection,
    started_at: Instant,
}

impl DbSession {
    /// Closes the connection and reports any error raised while closing.
    pub fn disconnect(self) -> Result<(), rusqlite::Error> {
        let held_ms = self.started_at.elapsed().as_millis();
        match self.conn.close() {
            Ok(()) => {
                debug!("event=db_disconnect module=db status=ok held_ms={held_ms}");
                Ok(())
            }
            // The handle comes back on failure; dropping it still frees it.
            Err((_conn, err)) => {
                error!(
                    "event=db_disconnect module=db status=error held_ms={held_ms} error={err}"
                );
                Err(err)
            }
        }
    }
}

impl Deref for DbSession {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

fn configure_connection(conn: &Connection, config: &StoreConfig) -> DbResult<()> {
    let foreign_keys = if config.foreign_keys { "ON" } else { "OFF" };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {foreign_keys};"))?;
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    conn.create_scalar_function(
        FOLD_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text = ctx.get::<Option<String>>(0)?;
            Ok(text.map(|value| fold_text(&value)))
        },
    )?;
    Ok(())
}

/// Name of the SQL function registered on every session.
pub const FOLD_FUNCTION: &str = "fold";

/// Unicode lowercase used as the case-insensitive search and sort key.
pub fn fold_text(text: &str) -> String {
    text.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::fold_text;

    #[test]
    fn fold_lowercases_accented_capitals() {
        assert_eq!(fold_text("CÓMPUTO"), "cómputo");
        assert_eq!(fold_text("Élite Ñandú"), "élite ñandú");
    }

    #[test]
    fn fold_keeps_punctuation_and_wildcards() {
        assert_eq!(fold_text("100% Spare_Parts"), "100% spare_parts");
    }
}
