//! Inventory use-case service.
//!
//! # Responsibility
//! - Bundle the five repositories over one `ConnectionProvider`.
//! - Offer the few multi-step reads the presentation layer needs.
//!
//! # Invariants
//! - Service APIs never bypass repository contracts.
//! - Each repository call still runs on its own connection; the service adds
//!   no transaction spanning several calls.

use crate::db::ConnectionProvider;
use crate::model::category::Category;
use crate::model::code::MovementType;
use crate::model::computer::{Computer, ComputerId};
use crate::model::movement::InventoryMovement;
use crate::model::provider::Provider;
use crate::model::user::{UserAccount, UserId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::computer_repo::ComputerRepository;
use crate::repo::movement_repo::MovementRepository;
use crate::repo::provider_repo::ProviderRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::{Repository, RepoResult};

/// A computer with its category and provider resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputerDetails {
    pub computer: Computer,
    /// `None` only if the category row vanished between reads.
    pub category: Option<Category>,
    /// `None` when the computer has no provider.
    pub provider: Option<Provider>,
}

/// Use-case facade over all inventory repositories.
#[derive(Debug, Clone)]
pub struct InventoryService {
    categories: CategoryRepository,
    providers: ProviderRepository,
    computers: ComputerRepository,
    movements: MovementRepository,
    users: UserRepository,
}

impl InventoryService {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self {
            categories: CategoryRepository::new(provider.clone()),
            providers: ProviderRepository::new(provider.clone()),
            computers: ComputerRepository::new(provider.clone()),
            movements: MovementRepository::new(provider.clone()),
            users: UserRepository::new(provider),
        }
    }

    pub fn categories(&self) -> &CategoryRepository {
        &self.categories
    }

    pub fn providers(&self) -> &ProviderRepository {
        &self.providers
    }

    pub fn computers(&self) -> &ComputerRepository {
        &self.computers
    }

    pub fn movements(&self) -> &MovementRepository {
        &self.movements
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Logs a stock movement for `computer_id`.
    ///
    /// # Contract
    /// - Rejects `quantity <= 0` before touching the store.
    /// - Returns the stored movement including its stamped time.
    pub fn record_movement(
        &self,
        computer_id: ComputerId,
        movement_type: MovementType,
        quantity: i64,
        description: impl Into<String>,
    ) -> RepoResult<InventoryMovement> {
        let movement =
            InventoryMovement::new(computer_id, movement_type, description).with_quantity(quantity);
        self.movements.create(&movement)
    }

    pub fn movements_for_computer(
        &self,
        computer_id: ComputerId,
    ) -> RepoResult<Vec<InventoryMovement>> {
        self.movements.list_for_computer(computer_id)
    }

    /// Loads a computer together with its category and provider.
    pub fn computer_details(&self, computer_id: ComputerId) -> RepoResult<Option<ComputerDetails>> {
        let Some(computer) = self.computers.get_by_id(computer_id)? else {
            return Ok(None);
        };

        let category = self.categories.get_by_id(computer.category_id)?;
        let provider = match computer.provider_id {
            Some(provider_id) => self.providers.get_by_id(provider_id)?,
            None => None,
        };

        Ok(Some(ComputerDetails {
            computer,
            category,
            provider,
        }))
    }

    /// Checks login credentials; see `UserRepository::authenticate`.
    pub fn login(&self, email: &str, credential: &str) -> RepoResult<Option<UserAccount>> {
        self.users.authenticate(email, credential)
    }

    pub fn change_password(&self, user_id: UserId, new_credential: &str) -> RepoResult<bool> {
        self.users.update_password(user_id, new_credential)
    }
}
