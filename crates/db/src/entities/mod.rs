//! `SeaORM` entity definitions.

pub mod account_types;
pub mod accounts;
pub mod journal_entries;
pub mod journal_entry_lines;
pub mod tax_codes;
