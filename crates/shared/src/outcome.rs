//! The `Outcome` result type used at the manager/gateway boundary.
//!
//! Every call that crosses from a screen into a manager returns an
//! `Outcome<T>`: either a value, or a non-empty list of human-readable
//! error messages. Errors never propagate as panics across this boundary;
//! the UI layer renders the messages directly.

use crate::error::AppError;

/// Result of a manager/gateway operation.
///
/// Unlike `Result`, the failure side always carries at least one
/// displayable message, and callers are expected to show all of them
/// (e.g. an unbalanced entry can report several line-level problems
/// in a single round trip).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation succeeded.
    Success(T),
    /// The operation failed with one or more error messages.
    Failure(Vec<String>),
}

impl<T> Outcome<T> {
    /// Creates a successful outcome.
    pub fn ok(value: T) -> Self {
        Self::Success(value)
    }

    /// Creates a failed outcome from a single message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Failure(vec![message.into()])
    }

    /// Creates a failed outcome from a list of messages.
    ///
    /// An empty list is replaced with a generic message so the failure
    /// side is never silent.
    #[must_use]
    pub fn fail_all(messages: Vec<String>) -> Self {
        if messages.is_empty() {
            Self::Failure(vec!["Operation failed".to_string()])
        } else {
            Self::Failure(messages)
        }
    }

    /// Returns true if the outcome is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the error messages (empty slice on success).
    #[must_use]
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(errors) => errors,
        }
    }

    /// Maps the success value, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(errors) => Outcome::Failure(errors),
        }
    }

    /// Joins the error messages for display in a dialog.
    #[must_use]
    pub fn error_summary(&self) -> String {
        self.errors().join(", ")
    }
}

impl<T> From<Result<T, AppError>> for Outcome<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(vec![error.to_string()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_accessors() {
        let outcome = Outcome::ok(7);
        assert!(outcome.is_success());
        assert!(outcome.errors().is_empty());
        assert_eq!(outcome.value(), Some(7));
    }

    #[test]
    fn test_failure_accessors() {
        let outcome: Outcome<i32> = Outcome::fail("entry is not balanced");
        assert!(!outcome.is_success());
        assert_eq!(outcome.errors(), ["entry is not balanced"]);
        assert_eq!(outcome.value(), None);
    }

    #[test]
    fn test_empty_failure_gets_generic_message() {
        let outcome: Outcome<i32> = Outcome::fail_all(vec![]);
        assert_eq!(outcome.errors().len(), 1);
    }

    #[test]
    fn test_map_preserves_errors() {
        let outcome: Outcome<i32> = Outcome::fail("boom");
        let mapped = outcome.map(|v| v * 2);
        assert_eq!(mapped.errors(), ["boom"]);

        let mapped = Outcome::ok(2).map(|v| v * 2);
        assert_eq!(mapped.value(), Some(4));
    }

    #[test]
    fn test_from_app_error() {
        let result: Result<(), AppError> = Err(AppError::Validation("no lines".into()));
        let outcome: Outcome<()> = result.into();
        assert_eq!(outcome.errors(), ["Validation error: no lines"]);
    }

    #[test]
    fn test_error_summary_joins_messages() {
        let outcome: Outcome<()> =
            Outcome::fail_all(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(outcome.error_summary(), "first, second");
    }
}
