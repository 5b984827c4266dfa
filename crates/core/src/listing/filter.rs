//! Journal entry listing filters.
//!
//! The listing screen queries entries by date range, entry number and
//! description substrings, status, and journal type. Results are
//! unordered; sorting is delegated to the display grid.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::journal::types::JournalType;
use crate::workflow::EntryStatus;

/// Status filter: all entries, or a single status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No status restriction.
    #[default]
    All,
    /// Only entries with the given status.
    Only(EntryStatus),
}

impl StatusFilter {
    /// Returns true when the given status passes the filter.
    #[must_use]
    pub fn matches(&self, status: EntryStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == *wanted,
        }
    }
}

/// Journal type filter: all types, or a single type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JournalTypeFilter {
    /// No type restriction.
    #[default]
    All,
    /// Only entries of the given journal type.
    Only(JournalType),
}

impl JournalTypeFilter {
    /// Returns true when the given type passes the filter.
    #[must_use]
    pub fn matches(&self, journal_type: JournalType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => journal_type == *wanted,
        }
    }
}

/// Filter criteria for the listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    /// Start of the date range (inclusive).
    pub date_from: NaiveDate,
    /// End of the date range (inclusive).
    pub date_to: NaiveDate,
    /// Entry-number substring, case-insensitive.
    pub entry_no: Option<String>,
    /// Description substring, case-insensitive.
    pub description: Option<String>,
    /// Status restriction.
    pub status: StatusFilter,
    /// Journal type restriction.
    pub journal_type: JournalTypeFilter,
}

impl EntryFilter {
    /// The default filter for a given "today": the last month through
    /// today, no other restrictions. Matches the listing screen's
    /// cleared state.
    #[must_use]
    pub fn default_as_of(today: NaiveDate) -> Self {
        Self {
            date_from: today.checked_sub_months(Months::new(1)).unwrap_or(today),
            date_to: today,
            entry_no: None,
            description: None,
            status: StatusFilter::All,
            journal_type: JournalTypeFilter::All,
        }
    }
}

/// One row of the listing result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    /// Entry id (hidden column, used for actions).
    pub id: Uuid,
    /// Entry number.
    pub entry_no: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Journal type.
    pub journal_type: JournalType,
    /// Entry total (sum of debits).
    pub total: Decimal,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// True once the entry has been reversed.
    pub is_reversed: bool,
}

impl ListingRow {
    /// Display status: "Reversed" is a presentation of a posted entry
    /// that has been reversed; the underlying status stays Posted.
    #[must_use]
    pub const fn display_status(&self) -> &'static str {
        match (self.status, self.is_reversed) {
            (EntryStatus::Posted, true) => "Posted (Reversed)",
            (EntryStatus::Posted, false) => "Posted",
            (EntryStatus::Draft, _) => "Draft",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_last_month() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        let filter = EntryFilter::default_as_of(today);
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2026, 7, 29).unwrap());
        assert_eq!(filter.date_to, today);
        assert_eq!(filter.status, StatusFilter::All);
        assert_eq!(filter.journal_type, JournalTypeFilter::All);
    }

    #[test]
    fn test_status_filter_matching() {
        assert!(StatusFilter::All.matches(EntryStatus::Draft));
        assert!(StatusFilter::Only(EntryStatus::Posted).matches(EntryStatus::Posted));
        assert!(!StatusFilter::Only(EntryStatus::Posted).matches(EntryStatus::Draft));
    }

    #[test]
    fn test_journal_type_filter_matching() {
        assert!(JournalTypeFilter::All.matches(JournalType::Sales));
        assert!(JournalTypeFilter::Only(JournalType::General).matches(JournalType::General));
        assert!(!JournalTypeFilter::Only(JournalType::General).matches(JournalType::Sales));
    }

    #[test]
    fn test_display_status() {
        let mut row = ListingRow {
            id: Uuid::new_v4(),
            entry_no: "JE-202608-0001".to_string(),
            entry_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            description: String::new(),
            journal_type: JournalType::General,
            total: Decimal::ZERO,
            status: EntryStatus::Draft,
            is_reversed: false,
        };
        assert_eq!(row.display_status(), "Draft");
        row.status = EntryStatus::Posted;
        assert_eq!(row.display_status(), "Posted");
        row.is_reversed = true;
        assert_eq!(row.display_status(), "Posted (Reversed)");
    }
}
