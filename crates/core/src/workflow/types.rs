//! Entry lifecycle types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Journal entry status.
///
/// The valid transitions are:
/// - Draft -> Posted (post)
/// - Posted -> new Draft counter-entry (reverse; the original stays
///   Posted and is flagged as reversed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified or posted.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
}

impl EntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "posted" => Some(Self::Posted),
            _ => None,
        }
    }

    /// Returns true if the entry can be modified.
    #[must_use]
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry can be posted.
    #[must_use]
    pub fn can_post(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry can be reversed.
    ///
    /// Only posted entries that have not already been reversed qualify.
    #[must_use]
    pub fn can_reverse(&self, is_reversed: bool) -> bool {
        matches!(self, Self::Posted) && !is_reversed
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Only draft entries can be modified.
    #[error("Only draft entries can be modified")]
    NotDraft,

    /// Only draft entries can be posted.
    #[error("Only draft entries can be posted")]
    CannotPost,

    /// Only posted entries can be reversed.
    #[error("Only posted entries can be reversed")]
    NotPosted,

    /// The entry has already been reversed.
    #[error("Entry has already been reversed")]
    AlreadyReversed,
}
