//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account_type;
pub mod dashboard;
pub mod journal_entry;
pub mod reference;

pub use account_type::{AccountTypeError, AccountTypeInput, AccountTypeRepository};
pub use dashboard::{DashboardError, DashboardRepository};
pub use journal_entry::{JournalEntryError, JournalEntryRepository};
pub use reference::{ReferenceError, ReferenceRepository};
