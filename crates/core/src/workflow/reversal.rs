//! Construction of reversing counter-entries.
//!
//! Reversing a posted entry produces a new Draft whose lines swap
//! debits and credits; the original entry stays Posted and is flagged
//! as reversed by the persistence gateway.

use chrono::NaiveDate;
use uuid::Uuid;

use super::types::WorkflowError;
use crate::journal::types::{JournalEntry, JournalEntryInput, JournalLine, SourceDocument};

/// Source-document type recorded on reversing entries.
pub const REVERSAL_SOURCE_TYPE: &str = "journal_entry";

/// Builds the Draft counter-entry reversing a posted entry.
///
/// Each line's debit and credit are swapped; descriptions, tax codes,
/// tax amounts, currency, and rate are preserved. The counter-entry
/// links back to the original through its source document.
///
/// # Errors
///
/// Returns an error when the entry is not posted or has already been
/// reversed.
pub fn build_reversing_entry(
    original: &JournalEntry,
    reversal_date: NaiveDate,
    description: Option<String>,
    reversed_by: Uuid,
) -> Result<JournalEntryInput, WorkflowError> {
    if !matches!(original.status, super::EntryStatus::Posted) {
        return Err(WorkflowError::NotPosted);
    }
    if original.is_reversed {
        return Err(WorkflowError::AlreadyReversed);
    }

    let lines = original
        .lines
        .iter()
        .map(|line| JournalLine {
            account_id: line.account_id,
            description: line.description.clone(),
            debit: line.credit,
            credit: line.debit,
            currency_code: line.currency_code.clone(),
            exchange_rate: line.exchange_rate,
            tax_code: line.tax_code.clone(),
            tax_amount: line.tax_amount,
        })
        .collect();

    Ok(JournalEntryInput {
        entry_date: reversal_date,
        journal_type: original.journal_type,
        description: Some(
            description.unwrap_or_else(|| format!("Reversal of {}", original.entry_no)),
        ),
        reference: Some(original.entry_no.clone()),
        created_by: reversed_by,
        lines,
        source: Some(SourceDocument {
            doc_type: REVERSAL_SOURCE_TYPE.to_string(),
            id: original.id,
        }),
    })
}
