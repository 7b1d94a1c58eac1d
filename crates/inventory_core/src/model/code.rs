//! Integer-coded enumerations stored in status/type columns.
//!
//! # Responsibility
//! - Map closed domain enums to and from their stored integer codes.
//! - Keep unrecognized stored codes readable without inventing a variant.
//!
//! # Invariants
//! - Decoding never fails; unknown codes become `Decoded::Unrecognized`.
//! - An unrecognized code is written back unchanged on update.
//! - The `"Unknown"` label exists only in `display_label`.

use serde::{Deserialize, Serialize};

/// Label shown for stored codes that no variant recognizes.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A closed enum with a stable integer encoding.
pub trait CodedEnum: Copy + Sized + 'static {
    /// Every variant, in code order.
    const VARIANTS: &'static [Self];

    fn code(self) -> i64;

    fn label(self) -> &'static str;

    fn from_code(code: i64) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.code() == code)
    }
}

/// Result of decoding a stored code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoded<T> {
    Known(T),
    /// Raw value kept as-is for diagnostics and write-back.
    Unrecognized(i64),
}

impl<T: CodedEnum> Decoded<T> {
    pub fn from_code(code: i64) -> Self {
        match T::from_code(code) {
            Some(value) => Self::Known(value),
            None => Self::Unrecognized(code),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Known(value) => value.code(),
            Self::Unrecognized(code) => *code,
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unrecognized(_) => None,
        }
    }

    /// Human-readable label for list views.
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Known(value) => value.label(),
            Self::Unrecognized(_) => UNKNOWN_LABEL,
        }
    }
}

impl<T: CodedEnum> From<T> for Decoded<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

/// Availability of a computer asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputerStatus {
    Available,
    Depleted,
}

impl CodedEnum for ComputerStatus {
    const VARIANTS: &'static [Self] = &[Self::Available, Self::Depleted];

    fn code(self) -> i64 {
        match self {
            Self::Available => 1,
            Self::Depleted => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Depleted => "Depleted",
        }
    }
}

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Inbound,
    Outbound,
    Maintenance,
}

impl CodedEnum for MovementType {
    const VARIANTS: &'static [Self] = &[Self::Inbound, Self::Outbound, Self::Maintenance];

    fn code(self) -> i64 {
        match self {
            Self::Inbound => 1,
            Self::Outbound => 2,
            Self::Maintenance => 3,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Inbound => "Inbound",
            Self::Outbound => "Outbound",
            Self::Maintenance => "Maintenance",
        }
    }
}

/// Login eligibility of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl CodedEnum for AccountStatus {
    const VARIANTS: &'static [Self] = &[Self::Active, Self::Inactive];

    fn code(self) -> i64 {
        match self {
            Self::Active => 1,
            Self::Inactive => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountStatus, CodedEnum, ComputerStatus, Decoded, MovementType, UNKNOWN_LABEL};

    #[test]
    fn every_variant_decodes_from_its_own_code() {
        for variant in ComputerStatus::VARIANTS {
            assert_eq!(ComputerStatus::from_code(variant.code()), Some(*variant));
        }
        for variant in MovementType::VARIANTS {
            assert_eq!(MovementType::from_code(variant.code()), Some(*variant));
        }
        for variant in AccountStatus::VARIANTS {
            assert_eq!(AccountStatus::from_code(variant.code()), Some(*variant));
        }
    }

    #[test]
    fn unknown_code_is_kept_and_labelled_unknown() {
        let decoded = Decoded::<MovementType>::from_code(42);
        assert_eq!(decoded, Decoded::Unrecognized(42));
        assert_eq!(decoded.code(), 42);
        assert_eq!(decoded.known(), None);
        assert_eq!(decoded.display_label(), UNKNOWN_LABEL);
    }

    #[test]
    fn known_code_uses_variant_label() {
        let decoded = Decoded::<ComputerStatus>::from_code(2);
        assert_eq!(decoded, Decoded::Known(ComputerStatus::Depleted));
        assert_eq!(decoded.display_label(), "Depleted");
    }

    #[test]
    fn zero_is_not_a_valid_code() {
        assert_eq!(AccountStatus::from_code(0), None);
    }
}
