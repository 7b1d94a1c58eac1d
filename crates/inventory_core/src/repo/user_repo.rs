//! User account repository backed by the `users` table.
//!
//! # Responsibility
//! - Store accounts with a hashed credential.
//! - Authenticate by email + credential + active status in one lookup.
//!
//! # Invariants
//! - Plaintext credentials are hashed before any SQL and never persisted.
//! - No read path selects `password_hash`.
//! - `update` never touches the credential; `update_password` touches nothing
//!   else.
//! - Authentication failure is uniform: unknown email, wrong credential and
//!   inactive account all yield `None`.

use super::{
    insert_returning, query_all, with_connection, Action, Operation, Repository, RepoResult,
};
use crate::auth::{CredentialHasher, Sha256CredentialHasher};
use crate::db::ConnectionProvider;
use crate::model::code::{AccountStatus, CodedEnum, Decoded};
use crate::model::user::{NewUserAccount, UserAccount, UserId};
use crate::model::RecordId;
use log::info;
use rusqlite::{params, OptionalExtension, Row};

const ENTITY: &str = "UserAccount";

const USER_COLUMNS: &str = "id, name, email, status";

/// SQLite-backed user repository, generic over the credential hasher.
#[derive(Debug, Clone)]
pub struct UserRepository<H = Sha256CredentialHasher> {
    provider: ConnectionProvider,
    hasher: H,
}

impl UserRepository<Sha256CredentialHasher> {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self::with_hasher(provider, Sha256CredentialHasher)
    }
}

impl<H: CredentialHasher> UserRepository<H> {
    pub fn with_hasher(provider: ConnectionProvider, hasher: H) -> Self {
        Self { provider, hasher }
    }

    /// Returns the active account matching `email` and `credential`.
    ///
    /// # Contract
    /// - Compares the stored digest against `hasher.digest(credential)`.
    /// - Does not reveal which of the three conditions failed.
    pub fn authenticate(&self, email: &str, credential: &str) -> RepoResult<Option<UserAccount>> {
        let digest = self.hasher.digest(credential);
        let account = with_connection(
            &self.provider,
            Operation::new(Action::Authenticate, ENTITY),
            |conn| {
                conn.query_row(
                    &format!(
                        "SELECT {USER_COLUMNS}
                         FROM users
                         WHERE email = ?1
                           AND password_hash = ?2
                           AND status = ?3
                         ORDER BY id ASC
                         LIMIT 1;"
                    ),
                    params![email, digest, AccountStatus::Active.code()],
                    user_from_row,
                )
                .optional()
            },
        )?;

        match &account {
            Some(user) => info!("event=user_authenticate module=repo status=ok user_id={}", user.id),
            None => info!("event=user_authenticate module=repo status=rejected"),
        }
        Ok(account)
    }

    /// Replaces only the stored credential digest of account `id`.
    pub fn update_password(&self, id: UserId, new_credential: &str) -> RepoResult<bool> {
        let digest = self.hasher.digest(new_credential);
        with_connection(
            &self.provider,
            Operation::new(Action::UpdatePassword, ENTITY),
            |conn| {
                let changed = conn.execute(
                    "UPDATE users SET password_hash = ?1 WHERE id = ?2;",
                    params![digest, id],
                )?;
                Ok(changed > 0)
            },
        )
    }
}

impl<H: CredentialHasher> Repository for UserRepository<H> {
    type Entity = UserAccount;
    type Draft = NewUserAccount;

    fn create(&self, draft: &NewUserAccount) -> RepoResult<UserAccount> {
        let digest = self.hasher.digest(&draft.password);
        insert_returning(
            &self.provider,
            Operation::new(Action::Create, ENTITY),
            |conn| {
                conn.query_row(
                    &format!(
                        "INSERT INTO users (name, password_hash, email, status)
                         VALUES (?1, ?2, ?3, ?4)
                         RETURNING {USER_COLUMNS};"
                    ),
                    params![draft.name, digest, draft.email, draft.status.code()],
                    user_from_row,
                )
                .optional()
            },
        )
    }

    fn update(&self, entity: &UserAccount) -> RepoResult<bool> {
        with_connection(
            &self.provider,
            Operation::new(Action::Update, ENTITY),
            |conn| {
                let changed = conn.execute(
                    "UPDATE users
                     SET name = ?1, email = ?2, status = ?3
                     WHERE id = ?4;",
                    params![entity.name, entity.email, entity.status.code(), entity.id],
                )?;
                Ok(changed > 0)
            },
        )
    }

    fn delete(&self, id: RecordId) -> RepoResult<bool> {
        with_connection(
            &self.provider,
            Operation::new(Action::Delete, ENTITY),
            |conn| {
                let changed = conn.execute("DELETE FROM users WHERE id = ?1;", [id])?;
                Ok(changed > 0)
            },
        )
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<UserAccount>> {
        with_connection(&self.provider, Operation::new(Action::Get, ENTITY), |conn| {
            conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1;"),
                [id],
                user_from_row,
            )
            .optional()
        })
    }

    fn search(&self, query: &str) -> RepoResult<Vec<UserAccount>> {
        with_connection(
            &self.provider,
            Operation::new(Action::Search, ENTITY),
            |conn| {
                query_all(
                    conn,
                    &format!(
                        "SELECT {USER_COLUMNS}
                         FROM users
                         WHERE instr(fold(name), fold(?1)) > 0
                         ORDER BY fold(name) ASC, id ASC;"
                    ),
                    [query],
                    user_from_row,
                )
            },
        )
    }

    fn get_all(&self) -> RepoResult<Vec<UserAccount>> {
        with_connection(&self.provider, Operation::new(Action::List, ENTITY), |conn| {
            query_all(
                conn,
                &format!(
                    "SELECT {USER_COLUMNS}
                     FROM users
                     ORDER BY fold(name) ASC, id ASC;"
                ),
                [],
                user_from_row,
            )
        })
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserAccount> {
    Ok(UserAccount {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        status: Decoded::from_code(row.get("status")?),
    })
}
