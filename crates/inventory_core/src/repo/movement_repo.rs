//! Inventory movement repository backed by the `movements` table.
//!
//! # Invariants
//! - Writes call `InventoryMovement::validate()` before any SQL.
//! - `moved_at` is stamped at creation and never written by update.
//! - Listing and search return most recent first (`moved_at DESC, id DESC`).
//! - Search matches `description` only.

use super::{
    insert_returning, now_epoch_ms, query_all, with_connection, Action, Operation, Repository,
    RepoResult,
};
use crate::db::ConnectionProvider;
use crate::model::code::Decoded;
use crate::model::computer::ComputerId;
use crate::model::movement::InventoryMovement;
use crate::model::RecordId;
use rusqlite::{params, OptionalExtension, Row};

const ENTITY: &str = "InventoryMovement";

const MOVEMENT_COLUMNS: &str = "id, computer_id, movement_type, quantity, moved_at, description";

const MOVEMENT_ORDER: &str = "ORDER BY moved_at DESC, id DESC";

/// SQLite-backed movement repository.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    provider: ConnectionProvider,
}

impl MovementRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    /// Movement history of one computer, most recent first.
    pub fn list_for_computer(&self, computer_id: ComputerId) -> RepoResult<Vec<InventoryMovement>> {
        with_connection(&self.provider, Operation::new(Action::List, ENTITY), |conn| {
            query_all(
                conn,
                &format!(
                    "SELECT {MOVEMENT_COLUMNS}
                     FROM movements
                     WHERE computer_id = ?1
                     {MOVEMENT_ORDER};"
                ),
                [computer_id],
                movement_from_row,
            )
        })
    }
}

impl Repository for MovementRepository {
    type Entity = InventoryMovement;
    type Draft = InventoryMovement;

    fn create(&self, draft: &InventoryMovement) -> RepoResult<InventoryMovement> {
        draft.validate()?;

        let moved_at = now_epoch_ms();
        insert_returning(
            &self.provider,
            Operation::new(Action::Create, ENTITY),
            |conn| {
                conn.query_row(
                    &format!(
                        "INSERT INTO movements (
                            computer_id,
                            movement_type,
                            quantity,
                            moved_at,
                            description
                        ) VALUES (?1, ?2, ?3, ?4, ?5)
                        RETURNING {MOVEMENT_COLUMNS};"
                    ),
                    params![
                        draft.computer_id,
                        draft.movement_type.code(),
                        draft.quantity,
                        moved_at,
                        draft.description,
                    ],
                    movement_from_row,
                )
                .optional()
            },
        )
    }

    fn update(&self, entity: &InventoryMovement) -> RepoResult<bool> {
        entity.validate()?;

        with_connection(
            &self.provider,
            Operation::new(Action::Update, ENTITY),
            |conn| {
                let changed = conn.execute(
                    "UPDATE movements
                     SET
                        computer_id = ?1,
                        movement_type = ?2,
                        quantity = ?3,
                        description = ?4
                     WHERE id = ?5;",
                    params![
                        entity.computer_id,
                        entity.movement_type.code(),
                        entity.quantity,
                        entity.description,
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
                let changed = conn.execute("DELETE FROM movements WHERE id = ?1;", [id])?;
                Ok(changed > 0)
            },
        )
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<InventoryMovement>> {
        with_connection(&self.provider, Operation::new(Action::Get, ENTITY), |conn| {
            conn.query_row(
                &format!("SELECT {MOVEMENT_COLUMNS} FROM movements WHERE id = ?1;"),
                [id],
                movement_from_row,
            )
            .optional()
        })
    }

    fn search(&self, query: &str) -> RepoResult<Vec<InventoryMovement>> {
        with_connection(
            &self.provider,
            Operation::new(Action::Search, ENTITY),
            |conn| {
                query_all(
                    conn,
                    &format!(
                        "SELECT {MOVEMENT_COLUMNS}
                         FROM movements
                         WHERE instr(fold(description), fold(?1)) > 0
                         {MOVEMENT_ORDER};"
                    ),
                    [query],
                    movement_from_row,
                )
            },
        )
    }

    fn get_all(&self) -> RepoResult<Vec<InventoryMovement>> {
        with_connection(&self.provider, Operation::new(Action::List, ENTITY), |conn| {
            query_all(
                conn,
                &format!("SELECT {MOVEMENT_COLUMNS} FROM movements {MOVEMENT_ORDER};"),
                [],
                movement_from_row,
            )
        })
    }
}

fn movement_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryMovement> {
    Ok(InventoryMovement {
        id: row.get("id")?,
        computer_id: row.get("computer_id")?,
        movement_type: Decoded::from_code(row.get("movement_type")?),
        quantity: row.get("quantity")?,
        moved_at: row.get("moved_at")?,
        description: row.get("description")?,
    })
}
