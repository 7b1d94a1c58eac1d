//! Computer repository backed by the `computers` table.
//!
//! # Responsibility
//! - Persist computer assets with their category and optional provider links.
//! - Stamp `purchased_at` at creation time.
//!
//! # Invariants
//! - `purchased_at` supplied by callers is discarded on create and never
//!   written by update.
//! - `provider_id = NULL` round-trips as `None`.
//! - Listing and search order by brand, then model (case-insensitive), then id.
//! - Search matches brand, model or serial number.

use super::{
    insert_returning, now_epoch_ms, query_all, with_connection, Action, Operation, Repository,
    RepoResult,
};
use crate::db::ConnectionProvider;
use crate::model::category::CategoryId;
use crate::model::code::Decoded;
use crate::model::computer::Computer;
use crate::model::RecordId;
use rusqlite::{params, OptionalExtension, Row};

const ENTITY: &str = "Computer";

const COMPUTER_COLUMNS: &str = "id,
    category_id,
    provider_id,
    brand,
    model,
    serial_number,
    purchased_at,
    price,
    status,
    notes";

const COMPUTER_ORDER: &str = "ORDER BY fold(brand) ASC, fold(model) ASC, id ASC";

/// SQLite-backed computer repository.
#[derive(Debug, Clone)]
pub struct ComputerRepository {
    provider: ConnectionProvider,
}

impl ComputerRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    /// Lists computers filed under one category, in the default order.
    pub fn list_by_category(&self, category_id: CategoryId) -> RepoResult<Vec<Computer>> {
        with_connection(&self.provider, Operation::new(Action::List, ENTITY), |conn| {
            query_all(
                conn,
                &format!(
                    "SELECT {COMPUTER_COLUMNS}
                     FROM computers
                     WHERE category_id = ?1
                     {COMPUTER_ORDER};"
                ),
                [category_id],
                computer_from_row,
            )
        })
    }
}

impl Repository for ComputerRepository {
    type Entity = Computer;
    type Draft = Computer;

    fn create(&self, draft: &Computer) -> RepoResult<Computer> {
        let purchased_at = now_epoch_ms();
        insert_returning(
            &self.provider,
            Operation::new(Action::Create, ENTITY),
            |conn| {
                conn.query_row(
                    &format!(
                        "INSERT INTO computers (
                            category_id,
                            provider_id,
                            brand,
                            model,
                            serial_number,
                            purchased_at,
                            price,
                            status,
                            notes
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                        RETURNING {COMPUTER_COLUMNS};"
                    ),
                    params![
                        draft.category_id,
                        draft.provider_id,
                        draft.brand,
                        draft.model,
                        draft.serial_number,
                        purchased_at,
                        draft.price,
                        draft.status.code(),
                        draft.notes,
                    ],
                    computer_from_row,
                )
                .optional()
            },
        )
    }

    fn update(&self, entity: &Computer) -> RepoResult<bool> {
        with_connection(
            &self.provider,
            Operation::new(Action::Update, ENTITY),
            |conn| {
                let changed = conn.execute(
                    "UPDATE computers
                     SET
                        category_id = ?1,
                        provider_id = ?2,
                        brand = ?3,
                        model = ?4,
                        serial_number = ?5,
                        price = ?6,
                        status = ?7,
                        notes = ?8
                     WHERE id = ?9;",
                    params![
                        entity.category_id,
                        entity.provider_id,
                        entity.brand,
                        entity.model,
                        entity.serial_number,
                        entity.price,
                        entity.status.code(),
                        entity.notes,
                        entity.id,
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
                let changed = conn.execute("DELETE FROM computers WHERE id = ?1;", [id])?;
                Ok(changed > 0)
            },
        )
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Computer>> {
        with_connection(&self.provider, Operation::new(Action::Get, ENTITY), |conn| {
            conn.query_row(
                &format!("SELECT {COMPUTER_COLUMNS} FROM computers WHERE id = ?1;"),
                [id],
                computer_from_row,
            )
            .optional()
        })
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Computer>> {
        with_connection(
            &self.provider,
            Operation::new(Action::Search, ENTITY),
            |conn| {
                query_all(
                    conn,
                    &format!(
                        "SELECT {COMPUTER_COLUMNS}
                         FROM computers
                         WHERE instr(fold(brand), fold(?1)) > 0
                            OR instr(fold(model), fold(?1)) > 0
                            OR instr(fold(serial_number), fold(?1)) > 0
                         {COMPUTER_ORDER};"
                    ),
                    [query],
                    computer_from_row,
                )
            },
        )
    }

    fn get_all(&self) -> RepoResult<Vec<Computer>> {
        with_connection(&self.provider, Operation::new(Action::List, ENTITY), |conn| {
            query_all(
                conn,
                &format!("SELECT {COMPUTER_COLUMNS} FROM computers {COMPUTER_ORDER};"),
                [],
                computer_from_row,
            )
        })
    }
}

fn computer_from_row(row: &Row<'_>) -> rusqlite::Result<Computer> {
    Ok(Computer {
        id: row.get("id")?,
        category_id: row.get("category_id")?,
        provider_id: row.get("provider_id")?,
        brand: row.get("brand")?,
        model: row.get("model")?,
        serial_number: row.get("serial_number")?,
        purchased_at: row.get("purchased_at")?,
        price: row.get("price")?,
        status: Decoded::from_code(row.get("status")?),
        notes: row.get("notes")?,
    })
}
