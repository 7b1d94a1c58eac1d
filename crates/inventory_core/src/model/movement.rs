//! Stock movement record.
//!
//! # Invariants
//! - `quantity` is strictly positive.
//! - `moved_at` is stamped by the repository at creation and never rewritten.

use super::code::{Decoded, MovementType};
use super::computer::ComputerId;
use super::{RecordId, UNSAVED_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MovementId = RecordId;

/// Quantity used when the caller does not specify one.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Validation failures for `InventoryMovement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementValidationError {
    NonPositiveQuantity(i64),
}

impl Display for MovementValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveQuantity(quantity) => {
                write!(f, "movement quantity must be positive, got {quantity}")
            }
        }
    }
}

impl Error for MovementValidationError {}

/// Inbound, outbound or maintenance event for one computer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: MovementId,
    pub computer_id: ComputerId,
    pub movement_type: Decoded<MovementType>,
    pub quantity: i64,
    /// Unix epoch milliseconds. Ignored on create and update.
    pub moved_at: i64,
    pub description: String,
}

impl InventoryMovement {
    /// Creates an unsaved movement with quantity 1.
    pub fn new(
        computer_id: ComputerId,
        movement_type: MovementType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            computer_id,
            movement_type: Decoded::Known(movement_type),
            quantity: DEFAULT_QUANTITY,
            moved_at: 0,
            description: description.into(),
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id > UNSAVED_ID
    }

    pub fn moved_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.moved_at)
    }

    /// Checks field invariants before any write.
    pub fn validate(&self) -> Result<(), MovementValidationError> {
        if self.quantity <= 0 {
            return Err(MovementValidationError::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }
}
