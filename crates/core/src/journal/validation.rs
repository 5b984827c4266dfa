//! Balance validation applied before any save is attempted.
//!
//! Validation failures are reported synchronously and block the
//! persistence call; the dialog shows every collected message at once.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::JournalEntryInput;

/// The entry is considered balanced for display when the difference is
/// under half a cent (rounding noise from per-line edits).
fn display_tolerance() -> Decimal {
    Decimal::new(5, 3) // 0.005
}

/// Saves are rejected when the imbalance exceeds one cent.
fn save_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Validation errors blocking a save.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveValidationError {
    /// Entry has no lines at all.
    #[error("Journal entry must have at least one line")]
    NoLines,

    /// No line carries a non-zero amount.
    #[error("Journal entry must have at least one line with a non-zero amount")]
    NoAmounts,

    /// A line has both a debit and a credit amount.
    #[error("Line {line}: a line cannot carry both a debit and a credit amount")]
    BothSides {
        /// 1-based line number.
        line: usize,
    },

    /// A line has a negative amount.
    #[error("Line {line}: amounts must not be negative")]
    NegativeAmount {
        /// 1-based line number.
        line: usize,
    },

    /// Entry debits and credits differ beyond the save tolerance.
    #[error("Journal entry is not balanced. Debits: {debits}, Credits: {credits}, Difference: {difference}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
        /// Debits minus credits.
        difference: Decimal,
    },
}

/// Aggregate debit/credit totals for an entry, recomputed on every
/// line mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTotals {
    /// Sum of debit amounts across all lines.
    pub debits: Decimal,
    /// Sum of credit amounts across all lines.
    pub credits: Decimal,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub const fn new(debits: Decimal, credits: Decimal) -> Self {
        Self { debits, credits }
    }

    /// Debits minus credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debits - self.credits
    }

    /// Balanced for display purposes: |difference| < 0.005.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.difference().abs() < display_tolerance()
    }

    /// Within the save tolerance: |difference| <= 0.01.
    #[must_use]
    pub fn is_savable(&self) -> bool {
        self.difference().abs() <= save_tolerance()
    }
}

/// Computes aggregate totals for an entry input.
#[must_use]
pub fn entry_totals(input: &JournalEntryInput) -> EntryTotals {
    let debits = input.lines.iter().map(|line| line.debit).sum();
    let credits = input.lines.iter().map(|line| line.credit).sum();
    EntryTotals::new(debits, credits)
}

/// Validates an entry before save, collecting every problem found.
///
/// # Errors
///
/// Returns all validation errors: missing lines, missing amounts,
/// per-line side/sign violations, and imbalance beyond 0.01.
pub fn validate_for_save(input: &JournalEntryInput) -> Result<(), Vec<SaveValidationError>> {
    let mut errors = Vec::new();

    if input.lines.is_empty() {
        return Err(vec![SaveValidationError::NoLines]);
    }

    let mut has_amount = false;
    for (index, line) in input.lines.iter().enumerate() {
        let line_no = index + 1;
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            errors.push(SaveValidationError::NegativeAmount { line: line_no });
        }
        if !line.debit.is_zero() && !line.credit.is_zero() {
            errors.push(SaveValidationError::BothSides { line: line_no });
        }
        if !line.debit.is_zero() || !line.credit.is_zero() {
            has_amount = true;
        }
    }

    if !has_amount {
        errors.push(SaveValidationError::NoAmounts);
    }

    let totals = entry_totals(input);
    if !totals.is_savable() {
        errors.push(SaveValidationError::Unbalanced {
            debits: totals.debits,
            credits: totals.credits,
            difference: totals.difference(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
