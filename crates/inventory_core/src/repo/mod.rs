//! Repository layer: one SQLite-backed repository per inventory entity.
//!
//! # Responsibility
//! - Define the shared CRUD + search contract (`Repository`).
//! - Keep SQL, row mapping and connection scoping inside the crate.
//!
//! # Invariants
//! - Each call acquires its own connection and releases it on every exit path.
//! - Create is a single `INSERT ... RETURNING` statement; the returned row is
//!   what the store holds.
//! - Absence is `Ok(None)` / `Ok(false)`; store failures are `RepoError`.

use crate::db::ConnectionProvider;
use crate::model::{Record, RecordId};
use log::{debug, error};
use rusqlite::{Connection, Params, Row};
use std::time::Instant;

pub mod category_repo;
pub mod computer_repo;
pub mod error;
pub mod movement_repo;
pub mod provider_repo;
pub mod user_repo;

pub use error::{Action, Operation, RepoError, RepoResult};

/// CRUD + search contract shared by all entity repositories.
pub trait Repository {
    /// Stored record type.
    type Entity;
    /// Input accepted by `create`; equal to `Entity` except for accounts.
    type Draft: ?Sized;

    /// Inserts a new row and returns it as stored. Caller ids are ignored.
    fn create(&self, draft: &Self::Draft) -> RepoResult<Self::Entity>;
    /// Rewrites every mutable column of the row with `entity.id`.
    fn update(&self, entity: &Self::Entity) -> RepoResult<bool>;
    /// Hard-deletes the row with `id`.
    fn delete(&self, id: RecordId) -> RepoResult<bool>;
    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Self::Entity>>;
    /// Case-insensitive substring match on the entity's text fields.
    ///
    /// Matching and ordering go through the connection's `fold` function, so
    /// non-ASCII letters compare case-insensitively too.
    fn search(&self, query: &str) -> RepoResult<Vec<Self::Entity>>;
    fn get_all(&self) -> RepoResult<Vec<Self::Entity>>;
}

/// Runs `body` on a freshly acquired connection and releases it afterwards.
///
/// # Side effects
/// - Emits `repo_call` logging events with action, entity and duration.
pub(crate) fn with_connection<T, F>(
    provider: &ConnectionProvider,
    operation: Operation,
    body: F,
) -> RepoResult<T>
where
    F: FnOnce(&Connection) -> rusqlite::Result<T>,
{
    let started_at = Instant::now();
    let session = provider.connect().map_err(|source| {
        error!(
            "event=repo_call module=repo action={} entity={} status=error error_code=store_unavailable duration_ms={}",
            operation.action.as_str(),
            operation.entity,
            started_at.elapsed().as_millis()
        );
        RepoError::StoreUnavailable { operation, source }
    })?;

    let outcome = body(&session);
    let released = session.disconnect();

    let result = match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Err(source), _) | (Ok(_), Err(source)) => {
            Err(RepoError::StatementFailed { operation, source })
        }
    };

    match &result {
        Ok(_) => debug!(
            "event=repo_call module=repo action={} entity={} status=ok duration_ms={}",
            operation.action.as_str(),
            operation.entity,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=repo_call module=repo action={} entity={} status=error error_code=statement_failed duration_ms={} error={}",
            operation.action.as_str(),
            operation.entity,
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}

/// Runs an `INSERT ... RETURNING` body and enforces that a stored row came back.
pub(crate) fn insert_returning<T, F>(
    provider: &ConnectionProvider,
    operation: Operation,
    body: F,
) -> RepoResult<T>
where
    T: Record,
    F: FnOnce(&Connection) -> rusqlite::Result<Option<T>>,
{
    match with_connection(provider, operation, body)? {
        Some(created) if created.record_id() > 0 => Ok(created),
        _ => {
            error!(
                "event=repo_call module=repo action={} entity={} status=error error_code=creation_failed",
                operation.action.as_str(),
                operation.entity
            );
            Err(RepoError::CreationFailed { operation })
        }
    }
}

/// Collects every row of `sql` through `map`.
pub(crate) fn query_all<T, P>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>>
where
    P: Params,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map)?;
    rows.collect()
}

/// Current wall-clock time in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
