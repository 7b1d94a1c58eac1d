//! Persistence core for the computer inventory desktop app.
//! This crate owns entity shapes, store access and repository contracts.

pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use auth::{CredentialHasher, Sha256CredentialHasher};
pub use config::{AppConfig, ConfigError, StoreConfig};
pub use db::schema::install_schema;
pub use db::{ConnectionProvider, DbError, DbResult, DbSession};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::category::{Category, CategoryId};
pub use model::code::{AccountStatus, CodedEnum, ComputerStatus, Decoded, MovementType};
pub use model::computer::{Computer, ComputerId};
pub use model::movement::{InventoryMovement, MovementId, MovementValidationError};
pub use model::provider::{Provider, ProviderId};
pub use model::user::{NewUserAccount, UserAccount, UserId};
pub use model::{Record, RecordId, UNSAVED_ID};
pub use repo::category_repo::CategoryRepository;
pub use repo::computer_repo::ComputerRepository;
pub use repo::movement_repo::MovementRepository;
pub use repo::provider_repo::ProviderRepository;
pub use repo::user_repo::UserRepository;
pub use repo::{Action, Operation, RepoError, RepoResult, Repository};
pub use service::inventory_service::{ComputerDetails, InventoryService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
