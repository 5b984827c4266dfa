//! Reference-data lookups for the entry editor.
//!
//! The editor loads its account and tax-code caches once per session;
//! these queries are the source of those caches.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use tallybook_core::journal::{TaxCode, TaxKind};

use crate::entities::{accounts, tax_codes};

/// Error types for reference lookups.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// A stored tax kind is not a recognized value.
    #[error("Tax code '{code}' has unrecognized kind '{kind}'")]
    InvalidTaxKind {
        /// The tax code.
        code: String,
        /// The stored kind string.
        kind: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository for editor reference data.
#[derive(Debug)]
pub struct ReferenceRepository {
    db: DatabaseConnection,
}

impl ReferenceRepository {
    /// Creates a new reference repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active accounts for account selection, in code order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn active_accounts(&self) -> Result<Vec<accounts::Model>, ReferenceError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::IsActive.eq(true))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }

    /// Loads all active tax codes as domain tax codes, in code order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored kind value is
    /// not recognized.
    pub async fn tax_codes(&self) -> Result<Vec<TaxCode>, ReferenceError> {
        let models = tax_codes::Entity::find()
            .filter(tax_codes::Column::IsActive.eq(true))
            .order_by_asc(tax_codes::Column::Code)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|model| {
                let kind = TaxKind::parse(&model.kind).ok_or(ReferenceError::InvalidTaxKind {
                    code: model.code.clone(),
                    kind: model.kind.clone(),
                })?;
                Ok(TaxCode {
                    code: model.code,
                    description: model.description,
                    kind,
                    rate: model.rate,
                })
            })
            .collect()
    }
}
