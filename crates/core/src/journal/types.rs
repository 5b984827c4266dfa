//! Journal entry domain types.
//!
//! This module defines the core types used for creating and editing
//! journal entries in the double-entry bookkeeping system.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::workflow::EntryStatus;

/// Journal type classification.
///
/// Categorizes entries by the book of original entry they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalType {
    /// General journal entry.
    General,
    /// Sales journal entry.
    Sales,
    /// Purchase journal entry.
    Purchase,
    /// Cash receipt entry.
    CashReceipt,
    /// Cash disbursement entry.
    CashDisbursement,
    /// Adjustment entry (accruals, corrections).
    Adjustment,
}

impl JournalType {
    /// All journal types, in display order. Used to populate selection combos.
    pub const ALL: [Self; 6] = [
        Self::General,
        Self::Sales,
        Self::Purchase,
        Self::CashReceipt,
        Self::CashDisbursement,
        Self::Adjustment,
    ];

    /// Returns the string representation of the journal type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Sales => "sales",
            Self::Purchase => "purchase",
            Self::CashReceipt => "cash_receipt",
            Self::CashDisbursement => "cash_disbursement",
            Self::Adjustment => "adjustment",
        }
    }

    /// Parses a journal type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "general" => Some(Self::General),
            "sales" => Some(Self::Sales),
            "purchase" => Some(Self::Purchase),
            "cash_receipt" => Some(Self::CashReceipt),
            "cash_disbursement" => Some(Self::CashDisbursement),
            "adjustment" => Some(Self::Adjustment),
            _ => None,
        }
    }

    /// Human-readable label for display grids and combos.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Sales => "Sales",
            Self::Purchase => "Purchase",
            Self::CashReceipt => "Cash Receipt",
            Self::CashDisbursement => "Cash Disbursement",
            Self::Adjustment => "Adjustment",
        }
    }
}

impl fmt::Display for JournalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A debit/credit amount pair where at most one side is non-zero.
///
/// Setting a non-zero debit zeroes the credit and vice versa, matching
/// the behavior of the entry grid: a line is always on exactly one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineAmount {
    debit: Decimal,
    credit: Decimal,
}

impl LineAmount {
    /// Creates an amount pair on the debit side.
    #[must_use]
    pub fn from_debit(amount: Decimal) -> Self {
        let mut value = Self::default();
        value.set_debit(amount);
        value
    }

    /// Creates an amount pair on the credit side.
    #[must_use]
    pub fn from_credit(amount: Decimal) -> Self {
        let mut value = Self::default();
        value.set_credit(amount);
        value
    }

    /// Sets the debit amount. A non-zero debit clears the credit side.
    pub fn set_debit(&mut self, amount: Decimal) {
        self.debit = amount;
        if !amount.is_zero() {
            self.credit = Decimal::ZERO;
        }
    }

    /// Sets the credit amount. A non-zero credit clears the debit side.
    pub fn set_credit(&mut self, amount: Decimal) {
        self.credit = amount;
        if !amount.is_zero() {
            self.debit = Decimal::ZERO;
        }
    }

    /// The debit side.
    #[must_use]
    pub const fn debit(&self) -> Decimal {
        self.debit
    }

    /// The credit side.
    #[must_use]
    pub const fn credit(&self) -> Decimal {
        self.credit
    }

    /// Whichever side is non-zero (zero when both sides are zero).
    ///
    /// This is the base amount tax is computed from.
    #[must_use]
    pub fn base_amount(&self) -> Decimal {
        if self.debit.is_zero() {
            self.credit
        } else {
            self.debit
        }
    }

    /// Returns true when both sides are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }
}

/// A single journal entry line.
///
/// Used both as input to the persistence gateway and as the persisted
/// representation returned when loading an entry for editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// The account this line posts to.
    pub account_id: Uuid,
    /// Free-text line description.
    pub description: String,
    /// Debit amount (zero if the line is a credit).
    pub debit: Decimal,
    /// Credit amount (zero if the line is a debit).
    pub credit: Decimal,
    /// Currency code (ISO 4217), defaulted to the company base currency.
    pub currency_code: String,
    /// Exchange rate to base currency, defaulted to 1.
    pub exchange_rate: Decimal,
    /// Optional tax code applied to this line.
    pub tax_code: Option<String>,
    /// Computed tax amount for this line.
    pub tax_amount: Decimal,
}

/// Source-document linkage carried through edits and reversals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Document type (e.g. "journal_entry" for reversals).
    pub doc_type: String,
    /// Document id.
    pub id: Uuid,
}

/// Input for creating or updating a journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntryInput {
    /// The date of the entry.
    pub entry_date: NaiveDate,
    /// The journal this entry belongs to.
    pub journal_type: JournalType,
    /// Overall description of the entry.
    pub description: Option<String>,
    /// Reference (invoice number, check number, source document id).
    pub reference: Option<String>,
    /// The user creating or editing the entry.
    pub created_by: Uuid,
    /// The entry lines (balance is validated before save).
    pub lines: Vec<JournalLine>,
    /// Optional source-document linkage.
    pub source: Option<SourceDocument>,
}

/// A persisted journal entry, as returned by the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    /// The entry id.
    pub id: Uuid,
    /// The assigned entry number (e.g. `JE-202608-0042`).
    pub entry_no: String,
    /// The date of the entry.
    pub entry_date: NaiveDate,
    /// The journal this entry belongs to.
    pub journal_type: JournalType,
    /// Overall description.
    pub description: Option<String>,
    /// Reference string.
    pub reference: Option<String>,
    /// Lifecycle status.
    pub status: EntryStatus,
    /// True once a reversing counter-entry has been created.
    pub is_reversed: bool,
    /// The user who created the entry.
    pub created_by: Uuid,
    /// Optional source-document linkage.
    pub source: Option<SourceDocument>,
    /// The entry lines, in line-number order.
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// The total of the entry (sum of debits; equals sum of credits
    /// for any entry that passed save validation).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|line| line.debit).sum()
    }
}
