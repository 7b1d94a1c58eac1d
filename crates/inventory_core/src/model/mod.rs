//! Inventory domain records.
//!
//! # Responsibility
//! - Define the five entity shapes exchanged with repositories.
//! - Keep coded status/type columns as closed enums.
//!
//! # Invariants
//! - `id == 0` means "not yet persisted"; stored rows always have `id > 0`.
//! - Identity and creation timestamps are assigned by the store side, never
//!   by callers.

pub mod category;
pub mod code;
pub mod computer;
pub mod movement;
pub mod provider;
pub mod user;

/// Store-generated row identifier.
pub type RecordId = i64;

/// Id value carried by records that were never persisted.
pub const UNSAVED_ID: RecordId = 0;

/// Anything that carries a store-generated identifier.
pub trait Record {
    fn record_id(&self) -> RecordId;
}

impl Record for category::Category {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Record for provider::Provider {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Record for computer::Computer {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Record for movement::InventoryMovement {
    fn record_id(&self) -> RecordId {
        self.id
    }
}

impl Record for user::UserAccount {
    fn record_id(&self) -> RecordId {
        self.id
    }
}
