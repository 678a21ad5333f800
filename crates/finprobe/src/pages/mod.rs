//! Page objects for the FinMore screens.
//!
//! Each page holds a shared driver handle plus lazy locators for its
//! elements; constructing a page performs no browser work. All waiting and
//! verification goes through [`crate::interactions`].

pub mod dashboard;
pub mod login;
pub mod practice_form;
pub mod registration;
pub mod transaction_modal;
pub mod transactions;

pub use dashboard::DashboardPage;
pub use login::LoginForm;
pub use practice_form::PracticeFormPage;
pub use registration::RegistrationForm;
pub use transaction_modal::{NewTransactionModal, TransactionForm};
pub use transactions::TransactionsPage;
