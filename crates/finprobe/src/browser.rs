//! Browser session configuration and the per-test session handle.

use crate::driver::Driver;
use crate::result::SuiteResult;
use crate::storage::StorageState;
use std::path::Path;
use std::sync::Arc;

/// Default base URL of the application under test
pub const DEFAULT_BASE_URL: &str = "https://finmore.netlify.app";

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Base URL that relative routes resolve against
    pub base_url: String,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            base_url: DEFAULT_BASE_URL.to_string(),
            chromium_path: None,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the chromium binary path
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }
}

/// One isolated browser session.
///
/// Page objects hold a clone of the inner driver handle, never the session
/// itself; dropping the session after the scenario ends the page objects'
/// usefulness with it.
#[derive(Clone)]
pub struct Session {
    driver: Arc<dyn Driver>,
    base_url: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wrap a driver with a base URL for relative navigation
    pub fn new(driver: Arc<dyn Driver>, base_url: impl Into<String>) -> Self {
        Self {
            driver,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The driver handle shared with page objects
    pub fn driver(&self) -> Arc<dyn Driver> {
        Arc::clone(&self.driver)
    }

    /// Configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a route against the base URL
    pub fn resolve(&self, route: &str) -> String {
        if route.starts_with("http://") || route.starts_with("https://") {
            route.to_string()
        } else {
            format!("{}/{}", self.base_url, route.trim_start_matches('/'))
        }
    }

    /// Navigate to a route
    pub async fn goto(&self, route: &str) -> SuiteResult<()> {
        self.driver.goto(&self.resolve(route)).await
    }

    /// Capture this session's storage state to a file
    pub async fn save_storage_state(&self, path: &Path) -> SuiteResult<()> {
        let state = self.driver.storage_state().await?;
        state.save(path)
    }

    /// Restore a storage-state snapshot into this session
    pub async fn restore_storage_state(&self, path: &Path) -> SuiteResult<()> {
        let state = StorageState::load(path)?;
        self.driver.restore_storage_state(&state).await
    }
}
