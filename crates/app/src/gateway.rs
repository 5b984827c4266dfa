//! Persistence gateway traits and their database-backed implementation.
//!
//! The view models talk to these traits only. Every method returns an
//! `Outcome`: failures carry displayable messages and never panic
//! across the boundary.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use tallybook_core::dashboard::DashboardKpi;
use tallybook_core::journal::{JournalEntry, JournalEntryInput, TaxCode};
use tallybook_core::listing::{EntryFilter, ListingRow};
use tallybook_core::workflow::EntryStatus;
use tallybook_db::entities::journal_entries;
use tallybook_db::repositories::{
    DashboardRepository, JournalEntryError, JournalEntryRepository, ReferenceRepository,
};
use tallybook_shared::Outcome;

/// An account offered for selection in the entry grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOption {
    /// Account id.
    pub id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
}

impl AccountOption {
    /// Combo-box display text, "code - name".
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// The header facts a screen needs after a mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    /// Entry id.
    pub id: Uuid,
    /// Assigned entry number.
    pub entry_no: String,
    /// Lifecycle status after the call.
    pub status: EntryStatus,
    /// Whether the entry has been reversed.
    pub is_reversed: bool,
}

/// Gateway for journal entry operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JournalEntryGateway: Send + Sync {
    /// Loads the editor reference caches: selectable accounts and tax
    /// codes.
    async fn load_references(&self) -> Outcome<(Vec<AccountOption>, Vec<TaxCode>)>;

    /// Loads an entry with its lines for editing or viewing.
    async fn get_entry(&self, id: Uuid) -> Outcome<JournalEntry>;

    /// Creates a new Draft entry.
    async fn create_entry(&self, input: JournalEntryInput) -> Outcome<EntrySummary>;

    /// Updates a Draft entry.
    async fn update_entry(&self, id: Uuid, input: JournalEntryInput) -> Outcome<EntrySummary>;

    /// Posts a Draft entry.
    async fn post_entry(&self, id: Uuid, user: Uuid) -> Outcome<EntrySummary>;

    /// Reverses a Posted entry, returning the new Draft counter-entry.
    async fn reverse_entry(
        &self,
        id: Uuid,
        reversal_date: NaiveDate,
        description: Option<String>,
        user: Uuid,
    ) -> Outcome<EntrySummary>;

    /// Queries entries matching the listing filter.
    async fn list_entries(&self, filter: EntryFilter) -> Outcome<Vec<ListingRow>>;
}

/// Gateway for dashboard queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardGateway: Send + Sync {
    /// Computes the KPI snapshot as of the given date.
    async fn get_dashboard_kpis(&self, as_of: NaiveDate) -> Outcome<DashboardKpi>;
}

/// The database-backed gateway used by the running application.
#[derive(Debug)]
pub struct DbGateway {
    entries: JournalEntryRepository,
    references: ReferenceRepository,
    dashboard: DashboardRepository,
    base_currency: String,
}

impl DbGateway {
    /// Creates a gateway over a database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, base_currency: impl Into<String>) -> Self {
        Self {
            entries: JournalEntryRepository::new(db.clone()),
            references: ReferenceRepository::new(db.clone()),
            dashboard: DashboardRepository::new(db),
            base_currency: base_currency.into(),
        }
    }
}

#[async_trait]
impl JournalEntryGateway for DbGateway {
    async fn load_references(&self) -> Outcome<(Vec<AccountOption>, Vec<TaxCode>)> {
        let accounts = match self.references.active_accounts().await {
            Ok(models) => models
                .into_iter()
                .map(|account| AccountOption {
                    id: account.id,
                    code: account.code,
                    name: account.name,
                })
                .collect(),
            Err(err) => {
                tracing::error!(error = %err, "loading account reference cache failed");
                return Outcome::fail(err.to_string());
            }
        };
        match self.references.tax_codes().await {
            Ok(tax_codes) => Outcome::ok((accounts, tax_codes)),
            Err(err) => {
                tracing::error!(error = %err, "loading tax code reference cache failed");
                Outcome::fail(err.to_string())
            }
        }
    }

    async fn get_entry(&self, id: Uuid) -> Outcome<JournalEntry> {
        entry_outcome(self.entries.get_for_editor(id).await)
    }

    async fn create_entry(&self, input: JournalEntryInput) -> Outcome<EntrySummary> {
        summarized(self.entries.create(&input).await)
    }

    async fn update_entry(&self, id: Uuid, input: JournalEntryInput) -> Outcome<EntrySummary> {
        summarized(self.entries.update(id, &input).await)
    }

    async fn post_entry(&self, id: Uuid, user: Uuid) -> Outcome<EntrySummary> {
        summarized(self.entries.post(id, user).await)
    }

    async fn reverse_entry(
        &self,
        id: Uuid,
        reversal_date: NaiveDate,
        description: Option<String>,
        user: Uuid,
    ) -> Outcome<EntrySummary> {
        summarized(
            self.entries
                .reverse(id, reversal_date, description, user)
                .await,
        )
    }

    async fn list_entries(&self, filter: EntryFilter) -> Outcome<Vec<ListingRow>> {
        entry_outcome(self.entries.list(&filter).await)
    }
}

#[async_trait]
impl DashboardGateway for DbGateway {
    async fn get_dashboard_kpis(&self, as_of: NaiveDate) -> Outcome<DashboardKpi> {
        match self
            .dashboard
            .get_dashboard_kpis(as_of, &self.base_currency)
            .await
        {
            Ok(kpi) => Outcome::ok(kpi),
            Err(err) => {
                tracing::error!(error = %err, "dashboard snapshot failed");
                Outcome::fail(err.to_string())
            }
        }
    }
}

/// Maps a repository result into an outcome. Validation failures keep
/// their individual messages; everything else becomes one message.
fn entry_outcome<T>(result: Result<T, JournalEntryError>) -> Outcome<T> {
    match result {
        Ok(value) => Outcome::ok(value),
        Err(JournalEntryError::Validation(messages)) => Outcome::fail_all(messages),
        Err(err) => {
            tracing::error!(error = %err, "journal entry operation failed");
            Outcome::fail(err.to_string())
        }
    }
}

fn summarized(
    result: Result<journal_entries::Model, JournalEntryError>,
) -> Outcome<EntrySummary> {
    match entry_outcome(result) {
        Outcome::Success(model) => match EntryStatus::parse(&model.status) {
            Some(status) => Outcome::ok(EntrySummary {
                id: model.id,
                entry_no: model.entry_no,
                status,
                is_reversed: model.is_reversed,
            }),
            None => Outcome::fail(format!(
                "Stored status value '{}' is not recognized",
                model.status
            )),
        },
        Outcome::Failure(errors) => Outcome::Failure(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_option_display() {
        let option = AccountOption {
            id: Uuid::new_v4(),
            code: "1000".to_string(),
            name: "Cash at Bank".to_string(),
        };
        assert_eq!(option.display(), "1000 - Cash at Bank");
    }

    #[test]
    fn test_validation_errors_keep_individual_messages() {
        let result: Result<(), JournalEntryError> = Err(JournalEntryError::Validation(vec![
            "Entry must have at least one line".to_string(),
            "Entry is not balanced".to_string(),
        ]));
        let outcome = entry_outcome(result);
        assert_eq!(outcome.errors().len(), 2);
    }
}
