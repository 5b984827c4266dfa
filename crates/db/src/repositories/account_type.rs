//! Account type repository for the account classification reference table.
//!
//! Account types classify chart-of-accounts entries (Current Asset,
//! Accounts Payable, ...) and drive normal-balance and report placement.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::account_types;

/// Error types for account type operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountTypeError {
    /// Account type not found.
    #[error("Account type not found: {0}")]
    NotFound(i32),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating an account type.
#[derive(Debug, Clone)]
pub struct AccountTypeInput {
    /// Display name (unique).
    pub name: String,
    /// Account category: asset, liability, equity, revenue, expense.
    pub category: String,
    /// True when the normal balance of this type is a debit.
    pub is_debit_balance: bool,
    /// Financial statement this type reports under.
    pub report_type: String,
    /// Sort position in selection lists.
    pub display_order: i32,
}

/// Account type repository for CRUD operations.
#[derive(Debug)]
pub struct AccountTypeRepository {
    db: DatabaseConnection,
}

impl AccountTypeRepository {
    /// Creates a new account type repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account type by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<account_types::Model>, AccountTypeError> {
        let found = account_types::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    /// Lists all account types ordered by display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_all(&self) -> Result<Vec<account_types::Model>, AccountTypeError> {
        let all = account_types::Entity::find()
            .order_by_asc(account_types::Column::DisplayOrder)
            .order_by_asc(account_types::Column::Name)
            .all(&self.db)
            .await?;
        Ok(all)
    }

    /// Finds an account type by its unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_name(
        &self,
        name: &str,
    ) -> Result<Option<account_types::Model>, AccountTypeError> {
        let found = account_types::Entity::find()
            .filter(account_types::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    /// Lists account types in a category, ordered by display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<account_types::Model>, AccountTypeError> {
        let found = account_types::Entity::find()
            .filter(account_types::Column::Category.eq(category))
            .order_by_asc(account_types::Column::DisplayOrder)
            .all(&self.db)
            .await?;
        Ok(found)
    }

    /// Creates a new account type.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g. duplicate name).
    pub async fn add(
        &self,
        input: AccountTypeInput,
    ) -> Result<account_types::Model, AccountTypeError> {
        let active = account_types::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(input.name),
            category: Set(input.category),
            is_debit_balance: Set(input.is_debit_balance),
            report_type: Set(input.report_type),
            display_order: Set(input.display_order),
        };
        let created = active.insert(&self.db).await?;
        Ok(created)
    }

    /// Updates an existing account type.
    ///
    /// # Errors
    ///
    /// Returns an error if the account type does not exist or the
    /// update fails.
    pub async fn update(
        &self,
        id: i32,
        input: AccountTypeInput,
    ) -> Result<account_types::Model, AccountTypeError> {
        let existing = account_types::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountTypeError::NotFound(id))?;

        let mut active: account_types::ActiveModel = existing.into();
        active.name = Set(input.name);
        active.category = Set(input.category);
        active.is_debit_balance = Set(input.is_debit_balance);
        active.report_type = Set(input.report_type);
        active.display_order = Set(input.display_order);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an account type by id.
    ///
    /// Returns `false` (and performs nothing) when no row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete(&self, id: i32) -> Result<bool, AccountTypeError> {
        let result = account_types::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
#[path = "account_type_tests.rs"]
mod tests;
