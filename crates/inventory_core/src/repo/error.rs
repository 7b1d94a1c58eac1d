//! Repository error taxonomy.
//!
//! # Invariants
//! - Every store failure keeps its native cause reachable via `source()`.
//! - "Row not found" is never an error; repositories return `None`/`false`.

use crate::db::DbError;
use crate::model::movement::MovementValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of repository call, used in error messages and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    Get,
    Search,
    List,
    Authenticate,
    UpdatePassword,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Get => "get",
            Self::Search => "search",
            Self::List => "list",
            Self::Authenticate => "authenticate",
            Self::UpdatePassword => "update_password",
        }
    }
}

/// One repository call: what was attempted on which entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub action: Action,
    pub entity: &'static str,
}

impl Operation {
    pub const fn new(action: Action, entity: &'static str) -> Self {
        Self { action, entity }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.action {
            Action::UpdatePassword => write!(f, "update password of {}", self.entity),
            Action::Get => write!(f, "get {}", self.entity),
            Action::List => write!(f, "list {}", self.entity),
            other => write!(f, "{} {}", other.as_str(), self.entity),
        }
    }
}

#[derive(Debug)]
pub enum RepoError {
    /// No connection could be established.
    StoreUnavailable {
        operation: Operation,
        source: DbError,
    },
    /// The store rejected or failed the statement.
    StatementFailed {
        operation: Operation,
        source: rusqlite::Error,
    },
    /// The insert completed without yielding a stored row.
    CreationFailed { operation: Operation },
    /// Input rejected before reaching the store.
    Validation(MovementValidationError),
}

impl RepoError {
    /// Operation that failed, when the failure came from a store call.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::StoreUnavailable { operation, .. }
            | Self::StatementFailed { operation, .. }
            | Self::CreationFailed { operation } => Some(*operation),
            Self::Validation(_) => None,
        }
    }

    /// True when the store refused the statement because of a constraint
    /// (foreign key, unique, check).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::StatementFailed {
                source: rusqlite::Error::SqliteFailure(err, _),
                ..
            } => err.code == rusqlite::ErrorCode::ConstraintViolation,
            _ => false,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreUnavailable { operation, source } => {
                write!(f, "failed to {operation}: store unavailable: {source}")
            }
            Self::StatementFailed { operation, source } => {
                write!(f, "failed to {operation}: {source}")
            }
            Self::CreationFailed { operation } => {
                write!(f, "failed to {operation}: insert returned no identifier")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreUnavailable { source, .. } => Some(source),
            Self::StatementFailed { source, .. } => Some(source),
            Self::CreationFailed { .. } => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<MovementValidationError> for RepoError {
    fn from(value: MovementValidationError) -> Self {
        Self::Validation(value)
    }
}
