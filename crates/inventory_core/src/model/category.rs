//! Asset category record.

use super::{RecordId, UNSAVED_ID};
use serde::{Deserialize, Serialize};

pub type CategoryId = RecordId;

/// Grouping for computer assets (e.g. "Laptops").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > UNSAVED_ID
    }
}
