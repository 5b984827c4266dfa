//! Journal entry repository: create, update, list, post, reverse.
//!
//! Entry balance is re-validated here before any create or update, so
//! a caller bypassing the editor cannot persist an unbalanced entry.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use uuid::Uuid;

use tallybook_core::journal::{
    validate_for_save, JournalEntry, JournalEntryInput, JournalLine, JournalType, SourceDocument,
};
use tallybook_core::listing::{EntryFilter, JournalTypeFilter, ListingRow, StatusFilter};
use tallybook_core::workflow::{build_reversing_entry, EntryStatus, WorkflowError};

use crate::entities::{journal_entries, journal_entry_lines};

/// Error types for journal entry operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalEntryError {
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(Uuid),

    /// Entry failed save validation.
    #[error("Entry validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Lifecycle rule violated.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A stored enum value could not be parsed.
    #[error("Stored {field} value '{value}' is not recognized")]
    InvalidStored {
        /// Column the value came from.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Journal entry repository.
#[derive(Debug)]
pub struct JournalEntryRepository {
    db: DatabaseConnection,
}

impl JournalEntryRepository {
    /// Creates a new journal entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new Draft entry, assigning the next entry number for
    /// the entry date's month.
    ///
    /// # Errors
    ///
    /// Returns an error when the input fails balance validation or a
    /// database operation fails.
    pub async fn create(
        &self,
        input: &JournalEntryInput,
    ) -> Result<journal_entries::Model, JournalEntryError> {
        check_input(input)?;
        let txn = self.db.begin().await?;
        let model = insert_entry(&txn, input).await?;
        txn.commit().await?;
        Ok(model)
    }

    /// Updates a Draft entry, replacing its lines.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry is missing or not a draft, when
    /// the input fails validation, or when a database operation fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: &JournalEntryInput,
    ) -> Result<journal_entries::Model, JournalEntryError> {
        check_input(input)?;
        let txn = self.db.begin().await?;

        let existing = journal_entries::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(JournalEntryError::NotFound(id))?;
        if !parse_status(&existing.status)?.can_edit() {
            return Err(WorkflowError::NotDraft.into());
        }

        let (source_type, source_id) = split_source(input.source.as_ref());
        let mut active: journal_entries::ActiveModel = existing.into();
        active.journal_type = Set(input.journal_type.as_str().to_string());
        active.entry_date = Set(input.entry_date);
        active.description = Set(input.description.clone());
        active.reference = Set(input.reference.clone());
        active.source_type = Set(source_type);
        active.source_id = Set(source_id);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;

        journal_entry_lines::Entity::delete_many()
            .filter(journal_entry_lines::Column::EntryId.eq(id))
            .exec(&txn)
            .await?;
        insert_lines(&txn, id, &input.lines).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Loads an entry with its lines for the editor.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry is missing, a stored value is
    /// corrupt, or the query fails.
    pub async fn get_for_editor(&self, id: Uuid) -> Result<JournalEntry, JournalEntryError> {
        load_entry(&self.db, id).await
    }

    /// Queries entries matching the listing filter.
    ///
    /// Each row carries the entry total (sum of line debits); rows with
    /// no lines total zero.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails or a stored value is
    /// corrupt.
    pub async fn list(&self, filter: &EntryFilter) -> Result<Vec<ListingRow>, JournalEntryError> {
        #[derive(Debug, FromQueryResult)]
        struct RawRow {
            id: Uuid,
            entry_no: String,
            entry_date: NaiveDate,
            description: Option<String>,
            journal_type: String,
            status: String,
            is_reversed: bool,
            total: Option<Decimal>,
        }

        let mut query = journal_entries::Entity::find()
            .select_only()
            .column(journal_entries::Column::Id)
            .column(journal_entries::Column::EntryNo)
            .column(journal_entries::Column::EntryDate)
            .column(journal_entries::Column::Description)
            .column(journal_entries::Column::JournalType)
            .column(journal_entries::Column::Status)
            .column(journal_entries::Column::IsReversed)
            .column_as(journal_entry_lines::Column::Debit.sum(), "total")
            .join(
                JoinType::LeftJoin,
                journal_entries::Relation::JournalEntryLines.def(),
            )
            .group_by(journal_entries::Column::Id)
            .filter(journal_entries::Column::EntryDate.gte(filter.date_from))
            .filter(journal_entries::Column::EntryDate.lte(filter.date_to))
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::EntryNo);

        if let Some(entry_no) = &filter.entry_no {
            query = query.filter(journal_entries::Column::EntryNo.contains(entry_no));
        }
        if let Some(description) = &filter.description {
            query = query.filter(journal_entries::Column::Description.contains(description));
        }
        if let StatusFilter::Only(status) = filter.status {
            query = query.filter(journal_entries::Column::Status.eq(status.as_str()));
        }
        if let JournalTypeFilter::Only(journal_type) = filter.journal_type {
            query = query.filter(journal_entries::Column::JournalType.eq(journal_type.as_str()));
        }

        let rows = query.into_model::<RawRow>().all(&self.db).await?;
        rows.into_iter()
            .map(|row| {
                Ok(ListingRow {
                    id: row.id,
                    entry_no: row.entry_no,
                    entry_date: row.entry_date,
                    description: row.description.unwrap_or_default(),
                    journal_type: parse_journal_type(&row.journal_type)?,
                    total: row.total.unwrap_or(Decimal::ZERO),
                    status: parse_status(&row.status)?,
                    is_reversed: row.is_reversed,
                })
            })
            .collect()
    }

    /// Posts a Draft entry to the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry is missing or not a draft, or
    /// when the update fails.
    pub async fn post(
        &self,
        id: Uuid,
        user: Uuid,
    ) -> Result<journal_entries::Model, JournalEntryError> {
        let entry = journal_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(JournalEntryError::NotFound(id))?;
        if !parse_status(&entry.status)?.can_post() {
            return Err(WorkflowError::CannotPost.into());
        }

        tracing::info!(entry_no = %entry.entry_no, %user, "posting journal entry");

        let mut active: journal_entries::ActiveModel = entry.into();
        active.status = Set(EntryStatus::Posted.as_str().to_string());
        active.updated_at = Set(Utc::now());
        let posted = active.update(&self.db).await?;
        Ok(posted)
    }

    /// Reverses a Posted entry.
    ///
    /// Persists the Draft counter-entry, marks the original as
    /// reversed, and returns the new draft's header.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry is missing, not posted, already
    /// reversed, or when a database operation fails.
    pub async fn reverse(
        &self,
        id: Uuid,
        reversal_date: NaiveDate,
        description: Option<String>,
        reversed_by: Uuid,
    ) -> Result<journal_entries::Model, JournalEntryError> {
        let txn = self.db.begin().await?;

        let original = load_entry(&txn, id).await?;
        let counter = build_reversing_entry(&original, reversal_date, description, reversed_by)?;
        let created = insert_entry(&txn, &counter).await?;

        let header = journal_entries::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(JournalEntryError::NotFound(id))?;
        let mut active: journal_entries::ActiveModel = header.into();
        active.is_reversed = Set(true);
        active.reversing_entry_id = Set(Some(created.id));
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            original = %original.entry_no,
            counter = %created.entry_no,
            "reversed journal entry"
        );
        Ok(created)
    }
}

fn check_input(input: &JournalEntryInput) -> Result<(), JournalEntryError> {
    validate_for_save(input).map_err(|errors| {
        JournalEntryError::Validation(errors.iter().map(ToString::to_string).collect())
    })
}

fn split_source(source: Option<&SourceDocument>) -> (Option<String>, Option<Uuid>) {
    match source {
        Some(source) => (Some(source.doc_type.clone()), Some(source.id)),
        None => (None, None),
    }
}

fn parse_status(value: &str) -> Result<EntryStatus, JournalEntryError> {
    EntryStatus::parse(value).ok_or_else(|| JournalEntryError::InvalidStored {
        field: "status",
        value: value.to_string(),
    })
}

fn parse_journal_type(value: &str) -> Result<JournalType, JournalEntryError> {
    JournalType::parse(value).ok_or_else(|| JournalEntryError::InvalidStored {
        field: "journal_type",
        value: value.to_string(),
    })
}

/// The `JE-YYYYMM-` prefix for an entry date.
fn entry_no_prefix(entry_date: NaiveDate) -> String {
    format!("JE-{:04}{:02}-", entry_date.year(), entry_date.month())
}

/// The next sequence number given the existing entry numbers in the
/// month.
///
/// Suffixes are compared numerically, not lexicographically, so the
/// sequence keeps counting once a month passes 9999 and the numbers
/// grow to five digits ("10000" sorts below "9999" as text).
fn next_sequence<'a>(existing: impl IntoIterator<Item = &'a str>) -> u32 {
    existing
        .into_iter()
        .filter_map(|entry_no| entry_no.rsplit('-').next())
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .map_or(1, |n| n + 1)
}

async fn next_entry_no<C: ConnectionTrait>(
    conn: &C,
    entry_date: NaiveDate,
) -> Result<String, DbErr> {
    let prefix = entry_no_prefix(entry_date);
    let existing: Vec<String> = journal_entries::Entity::find()
        .select_only()
        .column(journal_entries::Column::EntryNo)
        .filter(journal_entries::Column::EntryNo.starts_with(&prefix))
        .into_tuple()
        .all(conn)
        .await?;
    let next = next_sequence(existing.iter().map(String::as_str));
    Ok(format!("{prefix}{next:04}"))
}

async fn insert_entry<C: ConnectionTrait>(
    conn: &C,
    input: &JournalEntryInput,
) -> Result<journal_entries::Model, JournalEntryError> {
    let entry_no = next_entry_no(conn, input.entry_date).await?;
    let now = Utc::now();
    let id = Uuid::new_v4();
    let (source_type, source_id) = split_source(input.source.as_ref());

    let entry = journal_entries::ActiveModel {
        id: Set(id),
        entry_no: Set(entry_no),
        journal_type: Set(input.journal_type.as_str().to_string()),
        entry_date: Set(input.entry_date),
        description: Set(input.description.clone()),
        reference: Set(input.reference.clone()),
        status: Set(EntryStatus::Draft.as_str().to_string()),
        is_reversed: Set(false),
        reversing_entry_id: Set(None),
        source_type: Set(source_type),
        source_id: Set(source_id),
        created_by: Set(input.created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let model = entry.insert(conn).await?;
    insert_lines(conn, id, &input.lines).await?;
    Ok(model)
}

async fn insert_lines<C: ConnectionTrait>(
    conn: &C,
    entry_id: Uuid,
    lines: &[JournalLine],
) -> Result<(), DbErr> {
    for (index, line) in lines.iter().enumerate() {
        let line_no = i32::try_from(index + 1).unwrap_or(i32::MAX);
        journal_entry_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            entry_id: Set(entry_id),
            line_no: Set(line_no),
            account_id: Set(line.account_id),
            description: Set(line.description.clone()),
            debit: Set(line.debit),
            credit: Set(line.credit),
            currency_code: Set(line.currency_code.clone()),
            exchange_rate: Set(line.exchange_rate),
            tax_code: Set(line.tax_code.clone()),
            tax_amount: Set(line.tax_amount),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

async fn load_entry<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<JournalEntry, JournalEntryError> {
    let entry = journal_entries::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(JournalEntryError::NotFound(id))?;
    let lines = journal_entry_lines::Entity::find()
        .filter(journal_entry_lines::Column::EntryId.eq(id))
        .order_by_asc(journal_entry_lines::Column::LineNo)
        .all(conn)
        .await?;
    to_domain(entry, lines)
}

fn to_domain(
    entry: journal_entries::Model,
    lines: Vec<journal_entry_lines::Model>,
) -> Result<JournalEntry, JournalEntryError> {
    let journal_type = parse_journal_type(&entry.journal_type)?;
    let status = parse_status(&entry.status)?;
    let source = entry
        .source_type
        .zip(entry.source_id)
        .map(|(doc_type, id)| SourceDocument { doc_type, id });

    Ok(JournalEntry {
        id: entry.id,
        entry_no: entry.entry_no,
        entry_date: entry.entry_date,
        journal_type,
        description: entry.description,
        reference: entry.reference,
        status,
        is_reversed: entry.is_reversed,
        created_by: entry.created_by,
        source,
        lines: lines
            .into_iter()
            .map(|line| JournalLine {
                account_id: line.account_id,
                description: line.description,
                debit: line.debit,
                credit: line.credit,
                currency_code: line.currency_code,
                exchange_rate: line.exchange_rate,
                tax_code: line.tax_code,
                tax_amount: line.tax_amount,
            })
            .collect(),
    })
}

#[cfg(test)]
#[path = "journal_entry_tests.rs"]
mod tests;
