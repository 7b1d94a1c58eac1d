//! User account records.
//!
//! # Invariants
//! - `UserAccount` never carries a credential or digest.
//! - Plaintext credentials only live in `NewUserAccount` until hashed.

use super::code::{AccountStatus, Decoded};
use super::{RecordId, UNSAVED_ID};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

pub type UserId = RecordId;

/// Stored user account as returned by every read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub status: Decoded<AccountStatus>,
}

impl UserAccount {
    pub fn is_persisted(&self) -> bool {
        self.id > UNSAVED_ID
    }

    pub fn is_active(&self) -> bool {
        self.status == Decoded::Known(AccountStatus::Active)
    }
}

/// Input for account creation, holding the plaintext credential.
#[derive(Clone)]
pub struct NewUserAccount {
    pub name: String,
    pub email: String,
    pub status: AccountStatus,
    pub password: String,
}

impl NewUserAccount {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            status: AccountStatus::Active,
            password: password.into(),
        }
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }
}

impl Debug for NewUserAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserAccount")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("status", &self.status)
            .field("password", &"<redacted>")
            .finish()
    }
}
