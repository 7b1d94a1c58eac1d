//! Supplier record.

use super::{RecordId, UNSAVED_ID};
use serde::{Deserialize, Serialize};

pub type ProviderId = RecordId;

/// Company that supplied one or more computers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Provider {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > UNSAVED_ID
    }
}
