//! Provider repository backed by the `providers` table.
//!
//! # Invariants
//! - Listing and search order by `name` (case-insensitive), then `id`.
//! - Deleting a provider still referenced by a computer is rejected by the
//!   store's foreign key.

use super::{
    insert_returning, query_all, with_connection, Action, Operation, Repository, RepoResult,
};
use crate::db::ConnectionProvider;
use crate::model::provider::Provider;
use crate::model::RecordId;
use rusqlite::{params, OptionalExtension, Row};

const ENTITY: &str = "Provider";

const PROVIDER_COLUMNS: &str = "id, name, phone, email, address";

/// SQLite-backed provider repository.
#[derive(Debug, Clone)]
pub struct ProviderRepository {
    provider: ConnectionProvider,
}

impl ProviderRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

impl Repository for ProviderRepository {
    type Entity = Provider;
    type Draft = Provider;

    fn create(&self, draft: &Provider) -> RepoResult<Provider> {
        insert_returning(
            &self.provider,
            Operation::new(Action::Create, ENTITY),
            |conn| {
                conn.query_row(
                    &format!(
                        "INSERT INTO providers (name, phone, email, address)
                         VALUES (?1, ?2, ?3, ?4)
                         RETURNING {PROVIDER_COLUMNS};"
                    ),
                    params![draft.name, draft.phone, draft.email, draft.address],
                    provider_from_row,
                )
                .optional()
            },
        )
    }

    fn update(&self, entity: &Provider) -> RepoResult<bool> {
        with_connection(
            &self.provider,
            Operation::new(Action::Update, ENTITY),
            |conn| {
                let changed = conn.execute(
                    "UPDATE providers
                     SET name = ?1, phone = ?2, email = ?3, address = ?4
                     WHERE id = ?5;",
                    params![
                        entity.name,
                        entity.phone,
                        entity.email,
                        entity.address,
                        entity.id
                    ],
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
                let changed = conn.execute("DELETE FROM providers WHERE id = ?1;", [id])?;
                Ok(changed > 0)
            },
        )
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Provider>> {
        with_connection(&self.provider, Operation::new(Action::Get, ENTITY), |conn| {
            conn.query_row(
                &format!("SELECT {PROVIDER_COLUMNS} FROM providers WHERE id = ?1;"),
                [id],
                provider_from_row,
            )
            .optional()
        })
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Provider>> {
        with_connection(
            &self.provider,
            Operation::new(Action::Search, ENTITY),
            |conn| {
                query_all(
                    conn,
                    &format!(
                        "SELECT {PROVIDER_COLUMNS}
                         FROM providers
                         WHERE instr(fold(name), fold(?1)) > 0
                         ORDER BY fold(name) ASC, id ASC;"
                    ),
                    [query],
                    provider_from_row,
                )
            },
        )
    }

    fn get_all(&self) -> RepoResult<Vec<Provider>> {
        with_connection(&self.provider, Operation::new(Action::List, ENTITY), |conn| {
            query_all(
                conn,
                &format!(
                    "SELECT {PROVIDER_COLUMNS}
                     FROM providers
                     ORDER BY fold(name) ASC, id ASC;"
                ),
                [],
                provider_from_row,
            )
        })
    }
}

fn provider_from_row(row: &Row<'_>) -> rusqlite::Result<Provider> {
    Ok(Provider {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
    })
}
