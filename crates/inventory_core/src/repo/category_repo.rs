//! Category repository backed by the `categories` table.
//!
//! # Invariants
//! - Listing and search order by `name` (case-insensitive), then `id`.
//! - Search matches `name` only.

use super::{
    insert_returning, query_all, with_connection, Action, Operation, Repository, RepoResult,
};
use crate::db::ConnectionProvider;
use crate::model::category::Category;
use crate::model::RecordId;
use rusqlite::{params, OptionalExtension, Row};

const ENTITY: &str = "Category";

const CATEGORY_COLUMNS: &str = "id, name, description";

/// SQLite-backed category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    provider: ConnectionProvider,
}

impl CategoryRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }
}

impl Repository for CategoryRepository {
    type Entity = Category;
    type Draft = Category;

    fn create(&self, draft: &Category) -> RepoResult<Category> {
        insert_returning(
            &self.provider,
            Operation::new(Action::Create, ENTITY),
            |conn| {
                conn.query_row(
                    &format!(
                        "INSERT INTO categories (name, description)
                         VALUES (?1, ?2)
                         RETURNING {CATEGORY_COLUMNS};"
                    ),
                    params![draft.name, draft.description],
                    category_from_row,
                )
                .optional()
            },
        )
    }

    fn update(&self, entity: &Category) -> RepoResult<bool> {
        with_connection(
            &self.provider,
            Operation::new(Action::Update, ENTITY),
            |conn| {
                let changed = conn.execute(
                    "UPDATE categories
                     SET name = ?1, description = ?2
                     WHERE id = ?3;",
                    params![entity.name, entity.description, entity.id],
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
                let changed = conn.execute("DELETE FROM categories WHERE id = ?1;", [id])?;
                Ok(changed > 0)
            },
        )
    }

    fn get_by_id(&self, id: RecordId) -> RepoResult<Option<Category>> {
        with_connection(&self.provider, Operation::new(Action::Get, ENTITY), |conn| {
            conn.query_row(
                &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?1;"),
                [id],
                category_from_row,
            )
            .optional()
        })
    }

    fn search(&self, query: &str) -> RepoResult<Vec<Category>> {
        with_connection(
            &self.provider,
            Operation::new(Action::Search, ENTITY),
            |conn| {
                query_all(
                    conn,
                    &format!(
                        "SELECT {CATEGORY_COLUMNS}
                         FROM categories
                         WHERE instr(fold(name), fold(?1)) > 0
                         ORDER BY fold(name) ASC, id ASC;"
                    ),
                    [query],
                    category_from_row,
                )
            },
        )
    }

    fn get_all(&self) -> RepoResult<Vec<Category>> {
        with_connection(&self.provider, Operation::new(Action::List, ENTITY), |conn| {
            query_all(
                conn,
                &format!(
                    "SELECT {CATEGORY_COLUMNS}
                     FROM categories
                     ORDER BY fold(name) ASC, id ASC;"
                ),
                [],
                category_from_row,
            )
        })
    }
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}
