//! Finprobe: end-to-end suite toolkit for the FinMore personal-finance app.
//!
//! Drives the UI flows (login, registration, dashboard, transactions) through
//! page objects over an abstract [`Driver`], and exercises the companion
//! WordPress REST API through [`wordpress::WordPressApi`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌─────────────────────┐
//! │ Suites       │   │ Page objects │   │ Driver              │
//! │ (tests/)     │──►│ + helpers    │──►│ mock / chromium CDP │
//! └──────────────┘   └──────────────┘   └─────────────────────┘
//!         │                                       ▲
//!         └──► WordPressApi ──► RestTransport ────┘ (http / mock)
//! ```
//!
//! The default build is browser-free: the in-memory [`mock::MockFinanceApp`]
//! stands in for the app and [`wordpress::MockWordPress`] for the REST
//! server. Enabling the `browser` feature adds the chromiumoxide-backed
//! [`chromium::ChromiumDriver`].

// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod browser;
#[cfg(feature = "browser")]
pub mod chromium;
pub mod driver;
pub mod fixtures;
pub mod interactions;
pub mod locator;
pub mod logging;
pub mod mock;
pub mod pages;
pub mod reporter;
pub mod result;
pub mod storage;
pub mod testdata;
pub mod wait;
pub mod wordpress;

pub use browser::{BrowserConfig, Session, DEFAULT_BASE_URL};
#[cfg(feature = "browser")]
pub use chromium::ChromiumDriver;
pub use driver::Driver;
pub use fixtures::{authenticated_pages, bootstrap_auth_state, Pages};
pub use locator::{Locator, LocatorOptions, Selector};
pub use mock::MockFinanceApp;
pub use pages::{
    DashboardPage, LoginForm, NewTransactionModal, PracticeFormPage, RegistrationForm,
    TransactionForm, TransactionsPage,
};
pub use reporter::{RunReporter, TestResultEntry, TestStatus};
pub use result::{SuiteError, SuiteResult};
pub use storage::{StorageState, TransactionRecord, TransactionSeed, TransactionType};
pub use wait::WaitOptions;
pub use wordpress::{
    ApiResponse, MockWordPress, PostData, PostListQuery, PostStatus, WordPressApi,
};
