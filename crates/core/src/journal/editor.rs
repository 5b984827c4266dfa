//! Entry editor grid state.
//!
//! Mirrors the row-oriented line grid of the entry dialog: each row
//! holds an account selection, a description, mutually exclusive
//! debit/credit amounts, and an optional tax code. Per-row tax and the
//! aggregate totals are recomputed on every edit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::tax::{compute_line_tax, TaxCode};
use super::types::{
    JournalEntry, JournalEntryInput, JournalLine, JournalType, LineAmount, SourceDocument,
};
use super::validation::{validate_for_save, EntryTotals};

/// A single row of the entry grid.
#[derive(Debug, Clone, Default)]
pub struct LineRow {
    /// Selected account, if any.
    pub account_id: Option<Uuid>,
    /// Free-text line description.
    pub description: String,
    /// Debit/credit amount pair.
    pub amount: LineAmount,
    /// Selected tax code, if any.
    pub tax_code: Option<String>,
    /// Computed tax amount (read-only in the grid).
    pub tax_amount: Decimal,
}

impl LineRow {
    fn to_line(&self, account_id: Uuid, base_currency: &str) -> JournalLine {
        JournalLine {
            account_id,
            description: self.description.clone(),
            debit: self.amount.debit(),
            credit: self.amount.credit(),
            currency_code: base_currency.to_string(),
            exchange_rate: Decimal::ONE,
            tax_code: self.tax_code.clone(),
            tax_amount: self.tax_amount,
        }
    }
}

/// Editor state for one journal entry dialog session.
///
/// Owns the grid rows and the per-session tax-code cache. All mutation
/// happens through methods that keep per-row tax and totals current.
#[derive(Debug, Clone)]
pub struct EntryEditor {
    /// Entry date (header field).
    pub entry_date: NaiveDate,
    /// Journal type (header field).
    pub journal_type: JournalType,
    /// Overall description (header field).
    pub description: String,
    /// Reference (header field).
    pub reference: String,
    /// Source-document linkage carried from a loaded entry.
    pub source: Option<SourceDocument>,
    base_currency: String,
    tax_codes: Vec<TaxCode>,
    rows: Vec<LineRow>,
}

impl EntryEditor {
    /// Creates a fresh editor with two blank rows, matching the new-entry
    /// dialog.
    #[must_use]
    pub fn new(entry_date: NaiveDate, base_currency: impl Into<String>) -> Self {
        Self {
            entry_date,
            journal_type: JournalType::General,
            description: String::new(),
            reference: String::new(),
            source: None,
            base_currency: base_currency.into(),
            tax_codes: Vec::new(),
            rows: vec![LineRow::default(), LineRow::default()],
        }
    }

    /// Creates an editor populated from an existing entry.
    #[must_use]
    pub fn from_entry(entry: &JournalEntry, base_currency: impl Into<String>) -> Self {
        let rows = entry
            .lines
            .iter()
            .map(|line| {
                let amount = if line.debit.is_zero() {
                    LineAmount::from_credit(line.credit)
                } else {
                    LineAmount::from_debit(line.debit)
                };
                LineRow {
                    account_id: Some(line.account_id),
                    description: line.description.clone(),
                    amount,
                    tax_code: line.tax_code.clone(),
                    tax_amount: line.tax_amount,
                }
            })
            .collect();

        Self {
            entry_date: entry.entry_date,
            journal_type: entry.journal_type,
            description: entry.description.clone().unwrap_or_default(),
            reference: entry.reference.clone().unwrap_or_default(),
            source: entry.source.clone(),
            base_currency: base_currency.into(),
            tax_codes: Vec::new(),
            rows,
        }
    }

    /// Installs the per-session tax-code cache and recomputes every row.
    pub fn set_tax_codes(&mut self, tax_codes: Vec<TaxCode>) {
        self.tax_codes = tax_codes;
        for row in 0..self.rows.len() {
            self.recalculate_tax(row);
        }
    }

    /// The grid rows.
    #[must_use]
    pub fn rows(&self) -> &[LineRow] {
        &self.rows
    }

    /// Appends a blank row and returns its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(LineRow::default());
        self.rows.len() - 1
    }

    /// Removes a row; out-of-range indices are ignored.
    pub fn remove_row(&mut self, row: usize) {
        if row < self.rows.len() {
            self.rows.remove(row);
        }
    }

    /// Sets the account selection for a row.
    pub fn set_account(&mut self, row: usize, account_id: Option<Uuid>) {
        if let Some(line) = self.rows.get_mut(row) {
            line.account_id = account_id;
        }
    }

    /// Sets the description for a row.
    pub fn set_description(&mut self, row: usize, description: impl Into<String>) {
        if let Some(line) = self.rows.get_mut(row) {
            line.description = description.into();
        }
    }

    /// Sets the debit amount for a row, clearing its credit side, and
    /// recomputes the row's tax.
    pub fn set_debit(&mut self, row: usize, amount: Decimal) {
        if let Some(line) = self.rows.get_mut(row) {
            line.amount.set_debit(amount);
            self.recalculate_tax(row);
        }
    }

    /// Sets the credit amount for a row, clearing its debit side, and
    /// recomputes the row's tax.
    pub fn set_credit(&mut self, row: usize, amount: Decimal) {
        if let Some(line) = self.rows.get_mut(row) {
            line.amount.set_credit(amount);
            self.recalculate_tax(row);
        }
    }

    /// Sets the tax code for a row and recomputes its tax.
    pub fn set_tax_code(&mut self, row: usize, tax_code: Option<String>) {
        if let Some(line) = self.rows.get_mut(row) {
            line.tax_code = tax_code;
            self.recalculate_tax(row);
        }
    }

    /// Aggregate totals across all rows.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        let debits = self.rows.iter().map(|row| row.amount.debit()).sum();
        let credits = self.rows.iter().map(|row| row.amount.credit()).sum();
        EntryTotals::new(debits, credits)
    }

    /// Collects the grid into a validated `JournalEntryInput`.
    ///
    /// Rows with no account and no amounts are skipped (blank filler
    /// rows); a row with amounts but no account is an error. The
    /// collected entry is then run through save validation.
    ///
    /// # Errors
    ///
    /// Returns every collected problem as a displayable message; the
    /// persistence gateway is never called when this fails.
    pub fn collect(&self, created_by: Uuid) -> Result<JournalEntryInput, Vec<String>> {
        let mut errors = Vec::new();
        let mut lines = Vec::new();

        for (index, row) in self.rows.iter().enumerate() {
            match row.account_id {
                Some(account_id) => {
                    lines.push(row.to_line(account_id, &self.base_currency));
                }
                None if !row.amount.is_zero() => {
                    errors.push(format!(
                        "Account not selected for line {} which has amounts",
                        index + 1
                    ));
                }
                None => {} // blank filler row
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let input = JournalEntryInput {
            entry_date: self.entry_date,
            journal_type: self.journal_type,
            description: non_empty(&self.description),
            reference: non_empty(&self.reference),
            created_by,
            lines,
            source: self.source.clone(),
        };

        validate_for_save(&input)
            .map_err(|errors| errors.iter().map(ToString::to_string).collect::<Vec<_>>())?;

        Ok(input)
    }

    fn recalculate_tax(&mut self, row: usize) {
        let Some(line) = self.rows.get(row) else {
            return;
        };
        let tax_code = line
            .tax_code
            .as_deref()
            .and_then(|code| self.tax_codes.iter().find(|tc| tc.code == code));
        let tax_amount = compute_line_tax(line.amount.base_amount(), tax_code);
        self.rows[row].tax_amount = tax_amount;
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
