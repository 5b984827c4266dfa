//! Filter model for the journal entry listing screen.

pub mod filter;

pub use filter::{EntryFilter, JournalTypeFilter, ListingRow, StatusFilter};
