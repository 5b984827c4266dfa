//! View model for the journal entry listing screen.
//!
//! Holds the filter state and the last-loaded rows. Every mutating
//! call re-fetches the listing afterwards; action gating works off the
//! last-known status of each row.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use tallybook_core::listing::{EntryFilter, ListingRow};
use tallybook_shared::Outcome;

use crate::gateway::{EntrySummary, JournalEntryGateway};

/// Result of posting a batch of selected entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPostReport {
    /// How many entries were requested.
    pub requested: usize,
    /// How many posted successfully.
    pub posted: usize,
    /// Per-entry error summaries for the failures.
    pub errors: Vec<String>,
}

/// View model for the listing screen.
pub struct EntryListModel {
    gateway: Arc<dyn JournalEntryGateway>,
    filter: EntryFilter,
    rows: Vec<ListingRow>,
    today: NaiveDate,
}

impl EntryListModel {
    /// Creates the model with the default filter (last month through
    /// today).
    #[must_use]
    pub fn new(gateway: Arc<dyn JournalEntryGateway>, today: NaiveDate) -> Self {
        Self {
            gateway,
            filter: EntryFilter::default_as_of(today),
            rows: Vec::new(),
            today,
        }
    }

    /// The current filter.
    #[must_use]
    pub const fn filter(&self) -> &EntryFilter {
        &self.filter
    }

    /// The last-loaded rows.
    #[must_use]
    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    /// Re-runs the listing query with the current filter.
    ///
    /// On failure the previously loaded rows are kept so the grid does
    /// not blank out under an error dialog.
    pub async fn refresh(&mut self) -> Outcome<usize> {
        match self.gateway.list_entries(self.filter.clone()).await {
            Outcome::Success(rows) => {
                let count = rows.len();
                self.rows = rows;
                Outcome::ok(count)
            }
            Outcome::Failure(errors) => Outcome::Failure(errors),
        }
    }

    /// Applies a new filter and refreshes.
    pub async fn apply_filter(&mut self, filter: EntryFilter) -> Outcome<usize> {
        self.filter = filter;
        self.refresh().await
    }

    /// Resets the filter to its default state and refreshes.
    pub async fn clear_filters(&mut self) -> Outcome<usize> {
        self.filter = EntryFilter::default_as_of(self.today);
        self.refresh().await
    }

    /// Whether the row's entry can be opened for editing.
    #[must_use]
    pub fn can_edit_row(row: &ListingRow) -> bool {
        row.status.can_edit()
    }

    /// Whether the row's entry can be reversed.
    #[must_use]
    pub fn can_reverse_row(row: &ListingRow) -> bool {
        row.status.can_reverse(row.is_reversed)
    }

    /// Posts each selected entry in turn, then refreshes.
    ///
    /// Failures do not stop the batch; each one is reported against
    /// its entry number.
    pub async fn post_selected(&mut self, ids: &[Uuid], user: Uuid) -> BatchPostReport {
        let mut posted = 0;
        let mut errors = Vec::new();

        for id in ids {
            let label = self
                .rows
                .iter()
                .find(|row| row.id == *id)
                .map_or_else(|| id.to_string(), |row| row.entry_no.clone());

            match self.gateway.post_entry(*id, user).await {
                Outcome::Success(_) => posted += 1,
                Outcome::Failure(messages) => {
                    errors.push(format!("{label}: {}", messages.join(", ")));
                }
            }
        }

        if let Outcome::Failure(messages) = self.refresh().await {
            errors.push(format!("Refresh failed: {}", messages.join(", ")));
        }

        BatchPostReport {
            requested: ids.len(),
            posted,
            errors,
        }
    }

    /// Reverses a posted entry, then refreshes.
    pub async fn reverse_entry(
        &mut self,
        id: Uuid,
        reversal_date: NaiveDate,
        description: Option<String>,
        user: Uuid,
    ) -> Outcome<EntrySummary> {
        let outcome = self
            .gateway
            .reverse_entry(id, reversal_date, description, user)
            .await;
        if outcome.is_success() {
            let _ = self.refresh().await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockJournalEntryGateway;
    use rust_decimal_macros::dec;
    use tallybook_core::journal::JournalType;
    use tallybook_core::workflow::EntryStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    fn listing_row(n: u128, status: EntryStatus, is_reversed: bool) -> ListingRow {
        ListingRow {
            id: Uuid::from_u128(n),
            entry_no: format!("JE-202608-{n:04}"),
            entry_date: today(),
            description: "row".to_string(),
            journal_type: JournalType::General,
            total: dec!(100),
            status,
            is_reversed,
        }
    }

    fn summary(n: u128, status: EntryStatus) -> EntrySummary {
        EntrySummary {
            id: Uuid::from_u128(n),
            entry_no: format!("JE-202608-{n:04}"),
            status,
            is_reversed: false,
        }
    }

    #[tokio::test]
    async fn test_refresh_populates_rows() {
        let mut gateway = MockJournalEntryGateway::new();
        gateway.expect_list_entries().returning(|_| {
            Outcome::ok(vec![
                listing_row(1, EntryStatus::Draft, false),
                listing_row(2, EntryStatus::Posted, false),
            ])
        });

        let mut model = EntryListModel::new(Arc::new(gateway), today());
        assert_eq!(model.refresh().await.value(), Some(2));
        assert_eq!(model.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_rows() {
        let mut gateway = MockJournalEntryGateway::new();
        let mut calls = 0;
        gateway.expect_list_entries().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Outcome::ok(vec![listing_row(1, EntryStatus::Draft, false)])
            } else {
                Outcome::fail("database is locked")
            }
        });

        let mut model = EntryListModel::new(Arc::new(gateway), today());
        model.refresh().await;
        let outcome = model.refresh().await;
        assert!(!outcome.is_success());
        assert_eq!(model.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_filters_resets_to_default_range() {
        let mut gateway = MockJournalEntryGateway::new();
        gateway
            .expect_list_entries()
            .returning(|_| Outcome::ok(vec![]));

        let mut model = EntryListModel::new(Arc::new(gateway), today());
        let mut narrowed = EntryFilter::default_as_of(today());
        narrowed.entry_no = Some("JE-2026".to_string());
        model.apply_filter(narrowed).await;

        model.clear_filters().await;
        assert_eq!(model.filter(), &EntryFilter::default_as_of(today()));
    }

    #[test]
    fn test_row_action_gating() {
        let draft = listing_row(1, EntryStatus::Draft, false);
        let posted = listing_row(2, EntryStatus::Posted, false);
        let reversed = listing_row(3, EntryStatus::Posted, true);

        assert!(EntryListModel::can_edit_row(&draft));
        assert!(!EntryListModel::can_reverse_row(&draft));
        assert!(!EntryListModel::can_edit_row(&posted));
        assert!(EntryListModel::can_reverse_row(&posted));
        assert!(!EntryListModel::can_reverse_row(&reversed));
    }

    #[tokio::test]
    async fn test_batch_post_reports_per_entry_failures() {
        let mut gateway = MockJournalEntryGateway::new();
        gateway
            .expect_list_entries()
            .returning(|_| {
                Outcome::ok(vec![
                    listing_row(1, EntryStatus::Draft, false),
                    listing_row(2, EntryStatus::Draft, false),
                ])
            });
        gateway
            .expect_post_entry()
            .withf(|id, _| *id == Uuid::from_u128(1))
            .returning(|_, _| Outcome::ok(summary(1, EntryStatus::Posted)));
        gateway
            .expect_post_entry()
            .withf(|id, _| *id == Uuid::from_u128(2))
            .returning(|_, _| Outcome::fail("Only draft entries can be posted"));

        let mut model = EntryListModel::new(Arc::new(gateway), today());
        model.refresh().await;

        let report = model
            .post_selected(&[Uuid::from_u128(1), Uuid::from_u128(2)], Uuid::from_u128(9))
            .await;
        assert_eq!(report.requested, 2);
        assert_eq!(report.posted, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("JE-202608-0002:"));
    }

    #[tokio::test]
    async fn test_reverse_refreshes_on_success() {
        let mut gateway = MockJournalEntryGateway::new();
        gateway
            .expect_reverse_entry()
            .returning(|_, _, _, _| Outcome::ok(summary(3, EntryStatus::Draft)));
        // The refresh after the reversal is the second listing call.
        gateway
            .expect_list_entries()
            .times(2)
            .returning(|_| Outcome::ok(vec![listing_row(2, EntryStatus::Posted, true)]));

        let mut model = EntryListModel::new(Arc::new(gateway), today());
        model.refresh().await;

        let outcome = model
            .reverse_entry(Uuid::from_u128(2), today(), None, Uuid::from_u128(9))
            .await;
        assert!(outcome.is_success());
        assert!(model.rows()[0].is_reversed);
    }

    #[tokio::test]
    async fn test_batch_post_unknown_id_labelled_by_uuid() {
        let mut gateway = MockJournalEntryGateway::new();
        gateway
            .expect_list_entries()
            .returning(|_| Outcome::ok(vec![]));
        gateway
            .expect_post_entry()
            .returning(|_, _| Outcome::fail("Journal entry not found"));

        let mut model = EntryListModel::new(Arc::new(gateway), today());
        let ghost = Uuid::from_u128(255);
        let report = model.post_selected(&[ghost], Uuid::from_u128(9)).await;
        assert_eq!(report.posted, 0);
        assert!(report.errors[0].starts_with(&ghost.to_string()));
    }
}
