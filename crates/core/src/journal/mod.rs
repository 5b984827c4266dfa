//! Journal entry editing, balancing, and tax calculation.
//!
//! This module implements the data-entry side of the bookkeeping core:
//! - Journal entry and line domain types
//! - The line grid editor state (mutually exclusive debit/credit amounts)
//! - Per-line tax calculation
//! - Balance validation applied before any save is attempted

pub mod editor;
pub mod tax;
pub mod types;
pub mod validation;

#[cfg(test)]
mod editor_props;

pub use editor::{EntryEditor, LineRow};
pub use tax::{compute_line_tax, TaxCode, TaxKind};
pub use types::{
    JournalEntry, JournalEntryInput, JournalLine, JournalType, LineAmount, SourceDocument,
};
pub use validation::{validate_for_save, EntryTotals, SaveValidationError};
