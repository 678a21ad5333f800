//! Locator abstraction for element selection.
//!
//! A [`Locator`] binds a [`Selector`] to wait options. Constructing one never
//! touches the document: the selector is re-evaluated against the current
//! page snapshot on every use, so a page object can declare all of its
//! locators up front while the elements appear and disappear underneath it.
//! Errors surface at first use, through the interaction layer.

use std::time::Duration;

/// Default timeout for auto-waiting (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for auto-waiting (50ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Selection strategy for locating elements.
///
/// Stable test-id lookup is preferred everywhere; CSS remains as a fallback
/// for third-party screens that carry no test ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `data-testid` attribute match
    TestId(String),
    /// CSS selector fallback
    Css(String),
    /// `placeholder` attribute match (practice-form screens)
    Placeholder(String),
    /// All elements whose test id starts with a prefix followed by a numeric
    /// suffix, e.g. `transaction-item-` matching `transaction-item-17`.
    /// Used to scan server-assigned dynamic ids.
    TestIdPattern(String),
    /// CSS lookup scoped under a parent selector. Used where a nested control
    /// must never be resolved globally, e.g. a tag's own removal button.
    Child {
        /// Enclosing element
        parent: Box<Selector>,
        /// CSS selector evaluated within the parent
        css: String,
    },
}

impl Selector {
    /// Create a test-id selector
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Create a CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a placeholder selector
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::Placeholder(text.into())
    }

    /// Create a dynamic test-id prefix selector
    pub fn test_id_pattern(prefix: impl Into<String>) -> Self {
        Self::TestIdPattern(prefix.into())
    }

    /// Scope a CSS lookup under this selector
    pub fn child(&self, css: impl Into<String>) -> Self {
        Self::Child {
            parent: Box::new(self.clone()),
            css: css.into(),
        }
    }

    /// Convert to a JavaScript query expression returning the first match.
    pub fn to_query(&self) -> String {
        match self {
            Self::TestId(id) => {
                format!("document.querySelector('[data-testid=\"{id}\"]')")
            }
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::Placeholder(p) => {
                format!("document.querySelector('[placeholder=\"{p}\"]')")
            }
            Self::TestIdPattern(prefix) => format!(
                "Array.from(document.querySelectorAll('[data-testid^=\"{prefix}\"]'))\
                 .find(el => /^\\d+$/.test(el.getAttribute('data-testid').slice({len})))",
                len = prefix.len()
            ),
            Self::Child { parent, css } => {
                format!("{}?.querySelector({css:?})", parent.to_query())
            }
        }
    }

    /// Convert to a JavaScript expression counting matches.
    pub fn to_count_query(&self) -> String {
        match self {
            Self::TestId(id) => {
                format!("document.querySelectorAll('[data-testid=\"{id}\"]').length")
            }
            Self::Css(s) => format!("document.querySelectorAll({s:?}).length"),
            Self::Placeholder(p) => {
                format!("document.querySelectorAll('[placeholder=\"{p}\"]').length")
            }
            Self::TestIdPattern(prefix) => format!(
                "Array.from(document.querySelectorAll('[data-testid^=\"{prefix}\"]'))\
                 .filter(el => /^\\d+$/.test(el.getAttribute('data-testid').slice({len}))).length",
                len = prefix.len()
            ),
            Self::Child { parent, css } => {
                format!("({}?.querySelectorAll({css:?}).length ?? 0)", parent.to_query())
            }
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TestId(id) => write!(f, "testid={id}"),
            Self::Css(s) => write!(f, "css={s}"),
            Self::Placeholder(p) => write!(f, "placeholder={p}"),
            Self::TestIdPattern(prefix) => write!(f, "testid^={prefix}\\d+"),
            Self::Child { parent, css } => write!(f, "{parent} >> {css}"),
        }
    }
}

/// Wait options attached to a locator
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting
    pub timeout: Duration,
    /// Polling interval for auto-waiting
    pub poll_interval: Duration,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// A lazily-evaluated element reference.
///
/// The resolved node is never cached across actions; every interaction
/// re-runs the selection against the live document.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator from a selector with default options
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Shorthand for a test-id locator
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::new(Selector::test_id(id))
    }

    /// Shorthand for a CSS locator
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::css(selector))
    }

    /// Shorthand for a placeholder locator
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::new(Selector::placeholder(text))
    }

    /// Set a custom timeout
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set a custom poll interval
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.options.poll_interval = interval;
        self
    }

    /// Scope a CSS lookup under this locator, inheriting its options
    pub fn child(&self, css: impl Into<String>) -> Self {
        Self {
            selector: self.selector.child(css),
            options: self.options.clone(),
        }
    }

    /// Get the selector
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the wait options
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_id_query() {
        let sel = Selector::test_id("login-email-input");
        assert_eq!(
            sel.to_query(),
            "document.querySelector('[data-testid=\"login-email-input\"]')"
        );
    }

    #[test]
    fn test_pattern_query_filters_numeric_suffix() {
        let sel = Selector::test_id_pattern("transaction-item-");
        let q = sel.to_query();
        assert!(q.contains("data-testid^=\"transaction-item-\""));
        assert!(q.contains("slice(17)"));
    }

    #[test]
    fn test_child_query_is_scoped() {
        let tag = Selector::test_id("tag-0");
        let remove = tag.child("button[data-testid^=\"remove-tag-\"]");
        let q = remove.to_query();
        assert!(q.starts_with("document.querySelector('[data-testid=\"tag-0\"]')?.querySelector"));
    }

    #[test]
    fn test_count_query() {
        let sel = Selector::test_id_pattern("tag-");
        assert!(sel.to_count_query().ends_with(".length"));
    }

    #[test]
    fn test_display_round_trips_structure() {
        let sel = Selector::test_id("tag-1").child("button");
        assert_eq!(sel.to_string(), "testid=tag-1 >> button");
    }

    #[test]
    fn test_locator_defaults_and_overrides() {
        let loc = Locator::test_id("user-menu-trigger");
        assert_eq!(loc.options().timeout, Duration::from_millis(5000));

        let loc = loc.with_timeout(Duration::from_secs(10));
        assert_eq!(loc.options().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_construction_is_lazy() {
        // Declaring a locator for an element that will never exist is fine;
        // only an interaction can fail.
        let loc = Locator::test_id("does-not-exist-anywhere");
        assert_eq!(loc.selector().to_string(), "testid=does-not-exist-anywhere");
    }
}
