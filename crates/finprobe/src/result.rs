//! Result and error types for the suite.

use thiserror::Error;

/// Result type for all suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur while driving the application or the REST API.
///
/// Interaction failures carry the human-readable element name supplied by
/// the page object, so a failed scenario names the control that broke
/// instead of a raw selector.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Click on a named element failed
    #[error("CLICK FAILED: {name}: {cause}")]
    ClickFailed {
        /// Semantic element name
        name: String,
        /// Underlying failure
        cause: String,
    },

    /// Fill did not stick (write failed, or the re-read value differed)
    #[error("FILL FAILED: {name}, VALUE=\"{value}\": {cause}")]
    FillFailed {
        /// Semantic element name
        name: String,
        /// Value that was written
        value: String,
        /// Underlying failure
        cause: String,
    },

    /// Element never became visible within the bounded wait
    #[error("NOT VISIBLE: {name}")]
    NotVisible {
        /// Semantic element name
        name: String,
    },

    /// Select-option interaction failed
    #[error("SELECT FAILED: {name}: {cause}")]
    SelectFailed {
        /// Semantic element name
        name: String,
        /// Underlying failure
        cause: String,
    },

    /// Expected-vs-actual mismatch from a verification helper
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Mismatch description
        message: String,
    },

    /// Native form-validity check did not hold
    #[error("VALIDATION CHECK FAILED: {name}: {message}")]
    ValidationState {
        /// Semantic element name
        name: String,
        /// What was expected of the validity state
        message: String,
    },

    /// Content-based transaction lookup found no matching list item
    #[error(
        "Transaction not found with amount: {amount}, category: {category}, description: {description}"
    )]
    TransactionNotFound {
        /// Amount substring that was matched against
        amount: String,
        /// Exact category
        category: String,
        /// Exact description
        description: String,
    },

    /// REST endpoint answered 404 where the resource path itself is suspect
    #[error(
        "REST API endpoint not found: {url} returned 404. This usually means the \
         REST API is disabled, the endpoint path is wrong, or permalinks need \
         to be flushed"
    )]
    EndpointNotFound {
        /// Requested URL
        url: String,
    },

    /// No element matched the selector when an action required one
    #[error("No element matches selector: {selector}")]
    ElementMissing {
        /// Rendered selector description
        selector: String,
    },

    /// Bounded wait elapsed
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Navigation failed
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// Target URL
        url: String,
        /// Underlying failure
        message: String,
    },

    /// Browser launch or protocol error
    #[error("Browser error: {message}")]
    Browser {
        /// Underlying failure
        message: String,
    },

    /// Fixture setup or teardown failed
    #[error("Fixture error: {message}")]
    Fixture {
        /// Underlying failure
        message: String,
    },

    /// Transport-level HTTP failure (propagated unchanged, no retry layer)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuiteError {
    /// Build an assertion failure from an expected/actual pair.
    pub fn mismatch(what: &str, expected: impl std::fmt::Display, actual: impl std::fmt::Display) -> Self {
        Self::AssertionFailed {
            message: format!("{what}: expected \"{expected}\", got \"{actual}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_semantic_name() {
        let err = SuiteError::ClickFailed {
            name: "Add transaction button".to_string(),
            cause: "element detached".to_string(),
        };
        assert!(err.to_string().contains("Add transaction button"));

        let err = SuiteError::NotVisible {
            name: "New transaction modal".to_string(),
        };
        assert_eq!(err.to_string(), "NOT VISIBLE: New transaction modal");
    }

    #[test]
    fn test_transaction_not_found_message() {
        let err = SuiteError::TransactionNotFound {
            amount: "1000".to_string(),
            category: "Продукти".to_string(),
            description: "Вино".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1000"));
        assert!(msg.contains("Продукти"));
        assert!(msg.contains("Вино"));
    }

    #[test]
    fn test_mismatch_helper() {
        let err = SuiteError::mismatch("Total income", "20000.00 UAH", "19000.00 UAH");
        assert!(err
            .to_string()
            .contains("expected \"20000.00 UAH\", got \"19000.00 UAH\""));
    }
}
