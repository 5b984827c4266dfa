//! Initial schema: chart of accounts, tax codes, journal entries.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS journal_entry_lines;
             DROP TABLE IF EXISTS journal_entries;
             DROP TABLE IF EXISTS tax_codes;
             DROP TABLE IF EXISTS accounts;
             DROP TABLE IF EXISTS account_types;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Reference table of account types (small, seeded, integer-keyed)
CREATE TABLE account_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    category TEXT NOT NULL CHECK (category IN ('asset', 'liability', 'equity', 'revenue', 'expense')),
    is_debit_balance BOOLEAN NOT NULL,
    report_type TEXT NOT NULL,
    display_order INTEGER NOT NULL DEFAULT 0
);

-- Chart of accounts
CREATE TABLE accounts (
    id BLOB PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    category TEXT NOT NULL CHECK (category IN ('asset', 'liability', 'equity', 'revenue', 'expense')),
    account_type_id INTEGER NOT NULL REFERENCES account_types(id),
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    is_bank_account BOOLEAN NOT NULL DEFAULT FALSE,
    opened_on DATE,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);

CREATE INDEX idx_accounts_active_code ON accounts(is_active, code);

-- Tax codes applied to entry lines
CREATE TABLE tax_codes (
    code TEXT PRIMARY KEY,
    description TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('percentage', 'fixed')),
    rate NUMERIC NOT NULL DEFAULT 0,
    tax_account_id BLOB REFERENCES accounts(id),
    is_active BOOLEAN NOT NULL DEFAULT TRUE
);

-- Journal entry headers
CREATE TABLE journal_entries (
    id BLOB PRIMARY KEY,
    entry_no TEXT NOT NULL UNIQUE,
    journal_type TEXT NOT NULL,
    entry_date DATE NOT NULL,
    description TEXT,
    reference TEXT,
    status TEXT NOT NULL DEFAULT 'draft' CHECK (status IN ('draft', 'posted')),
    is_reversed BOOLEAN NOT NULL DEFAULT FALSE,
    reversing_entry_id BLOB REFERENCES journal_entries(id),
    source_type TEXT,
    source_id BLOB,
    created_by BLOB NOT NULL,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
);

-- Listing queries filter on date range first
CREATE INDEX idx_journal_entries_date ON journal_entries(entry_date);
CREATE INDEX idx_journal_entries_status ON journal_entries(status);

-- Journal entry lines
CREATE TABLE journal_entry_lines (
    id BLOB PRIMARY KEY,
    entry_id BLOB NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    line_no INTEGER NOT NULL,
    account_id BLOB NOT NULL REFERENCES accounts(id),
    description TEXT NOT NULL DEFAULT '',
    debit NUMERIC NOT NULL DEFAULT 0,
    credit NUMERIC NOT NULL DEFAULT 0,
    currency_code TEXT NOT NULL,
    exchange_rate NUMERIC NOT NULL DEFAULT 1,
    tax_code TEXT REFERENCES tax_codes(code),
    tax_amount NUMERIC NOT NULL DEFAULT 0,
    UNIQUE (entry_id, line_no)
);

CREATE INDEX idx_journal_entry_lines_entry ON journal_entry_lines(entry_id);
CREATE INDEX idx_journal_entry_lines_account ON journal_entry_lines(account_id);
";
