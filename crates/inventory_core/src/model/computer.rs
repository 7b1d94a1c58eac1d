//! Computer asset record.
//!
//! # Invariants
//! - `category_id` always references a stored category.
//! - `provider_id == None` is a legal "no provider" state, not a sentinel.
//! - `purchased_at` is stamped by the repository at creation and never
//!   rewritten by updates.

use super::category::CategoryId;
use super::code::{ComputerStatus, Decoded};
use super::provider::ProviderId;
use super::{RecordId, UNSAVED_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ComputerId = RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Computer {
    pub id: ComputerId,
    pub category_id: CategoryId,
    pub provider_id: Option<ProviderId>,
    pub brand: String,
    pub model: String,
    /// Expected to be unique across all computers.
    pub serial_number: String,
    /// Unix epoch milliseconds. Ignored on create and update.
    pub purchased_at: i64,
    pub price: f64,
    pub status: Decoded<ComputerStatus>,
    pub notes: String,
}

impl Computer {
    /// Creates an unsaved computer with status `Available`.
    pub fn new(
        category_id: CategoryId,
        provider_id: Option<ProviderId>,
        brand: impl Into<String>,
        model: impl Into<String>,
        serial_number: impl Into<String>,
        price: f64,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            category_id,
            provider_id,
            brand: brand.into(),
            model: model.into(),
            serial_number: serial_number.into(),
            purchased_at: 0,
            price,
            status: Decoded::Known(ComputerStatus::Available),
            notes: notes.into(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > UNSAVED_ID
    }

    /// Purchase time as a UTC timestamp, if the stored value is in range.
    pub fn purchased_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.purchased_at)
    }
}
