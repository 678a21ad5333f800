//! Abstract browser-automation seam.
//!
//! Page objects and interaction helpers talk to a [`Driver`] trait object
//! rather than to a concrete browser. The default build ships only the
//! in-memory [`crate::mock::MockFinanceApp`]; the `browser` feature adds a
//! CDP-backed implementation in [`crate::chromium`]. Swapping drivers never
//! touches the page-object layer.

use crate::locator::Selector;
use crate::result::SuiteResult;
use crate::storage::StorageState;
use async_trait::async_trait;

/// Abstract driver for one browser page/session.
///
/// Every query re-resolves its selector against the live document; a missing
/// element is reported as [`crate::SuiteError::ElementMissing`] by the
/// operation that needed it, never at locator construction.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to a URL (absolute, or a route resolved by the session)
    async fn goto(&self, url: &str) -> SuiteResult<()>;

    /// Current page URL
    async fn current_url(&self) -> SuiteResult<String>;

    /// Click the first element matching the selector
    async fn click(&self, selector: &Selector) -> SuiteResult<()>;

    /// Replace the value of an input or textarea
    async fn fill(&self, selector: &Selector, value: &str) -> SuiteResult<()>;

    /// Read back an input's current value
    async fn input_value(&self, selector: &Selector) -> SuiteResult<String>;

    /// Text content of the element, if present in the document
    async fn text_content(&self, selector: &Selector) -> SuiteResult<Option<String>>;

    /// Whether the element exists and is rendered visible
    async fn is_visible(&self, selector: &Selector) -> SuiteResult<bool>;

    /// Whether the element is enabled for interaction
    async fn is_enabled(&self, selector: &Selector) -> SuiteResult<bool>;

    /// Native constraint-validation state (`element.validity.valid`)
    async fn validity_valid(&self, selector: &Selector) -> SuiteResult<bool>;

    /// Native validation message (empty string when the element is valid)
    async fn validation_message(&self, selector: &Selector) -> SuiteResult<String>;

    /// Option values currently present in a select control, in DOM order.
    /// Placeholder options count; callers that need a populated list must
    /// wait for more than one entry.
    async fn option_values(&self, selector: &Selector) -> SuiteResult<Vec<String>>;

    /// Select the option with the given value
    async fn select_option(&self, selector: &Selector, value: &str) -> SuiteResult<()>;

    /// Number of elements matching the selector
    async fn count(&self, selector: &Selector) -> SuiteResult<usize>;

    /// All full `data-testid` values starting with `prefix` followed by a
    /// numeric suffix, in DOM order. Used to scan server-assigned ids.
    async fn test_ids_matching(&self, prefix: &str) -> SuiteResult<Vec<String>>;

    /// Read an attribute off the first matching element
    async fn attribute(&self, selector: &Selector, name: &str) -> SuiteResult<Option<String>>;

    /// Write a page-scoped localStorage key
    async fn set_local_storage(&self, key: &str, value: &str) -> SuiteResult<()>;

    /// Read a page-scoped localStorage key
    async fn local_storage(&self, key: &str) -> SuiteResult<Option<String>>;

    /// Snapshot cookies plus origin-scoped storage
    async fn storage_state(&self) -> SuiteResult<StorageState>;

    /// Restore a previously captured snapshot into this session
    async fn restore_storage_state(&self, state: &StorageState) -> SuiteResult<()>;
}
