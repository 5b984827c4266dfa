//! Entry lifecycle management.
//!
//! Journal entries move Draft -> Posted, and a Posted entry may be
//! reversed into a new Draft counter-entry. The transitions themselves
//! are executed by the persistence gateway; this module owns the status
//! type, the gates deciding which actions are available, and the
//! construction of reversing entries.

pub mod reversal;
pub mod types;

pub use reversal::build_reversing_entry;
pub use types::{EntryStatus, WorkflowError};
