//! Per-suite dependency injection.
//!
//! A [`Pages`] bundle wires every page object to one [`Session`], so a test
//! receives ready page objects instead of reaching for shared globals.
//! [`bootstrap_auth_state`] plays the role of global setup: register a
//! throwaway user once and persist the authenticated storage snapshot for
//! later sessions to restore.

use crate::browser::Session;
use crate::driver::Driver;
use crate::pages::registration::RegistrationInput;
use crate::pages::{
    DashboardPage, LoginForm, NewTransactionModal, PracticeFormPage, RegistrationForm,
    TransactionsPage,
};
use crate::result::SuiteResult;
use crate::testdata;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Default location of the persisted auth snapshot
pub const AUTH_STATE_PATH: &str = "storage/auth.json";

/// Every page object of the suite, bound to one session
pub struct Pages {
    session: Session,
    pub login: LoginForm,
    pub registration: RegistrationForm,
    pub dashboard: DashboardPage,
    pub transactions: TransactionsPage,
    pub transaction_modal: NewTransactionModal,
    pub practice_form: PracticeFormPage,
}

impl Pages {
    pub fn new(session: Session) -> Self {
        Self {
            login: LoginForm::new(&session),
            registration: RegistrationForm::new(&session),
            dashboard: DashboardPage::new(&session),
            transactions: TransactionsPage::new(&session),
            transaction_modal: NewTransactionModal::new(&session),
            practice_form: PracticeFormPage::new(&session),
            session,
        }
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }
}

/// Open the app root and hand back the page bundle
pub async fn pages(driver: Arc<dyn Driver>, base_url: &str) -> SuiteResult<Pages> {
    let session = Session::new(driver, base_url);
    session.goto("/").await?;
    Ok(Pages::new(session))
}

/// Register a unique throwaway user through the UI and wait for the
/// dashboard. Returns the submitted input so the caller can log in again.
pub async fn register_fresh_user(pages: &Pages) -> SuiteResult<RegistrationInput> {
    let password = testdata::random_password(12);
    let input = RegistrationInput {
        name: testdata::random_full_name(),
        email: testdata::random_email(),
        password: password.clone(),
        confirm_password: password,
        currency: "UAH".to_string(),
    };
    info!("FIXTURE: registering {}", input.email);
    pages.login.switch_to_registration().await?;
    pages.registration.register(&input).await?;
    pages.dashboard.wait_for_ready().await?;
    Ok(input)
}

/// Page bundle with a freshly registered, logged-in user
pub async fn authenticated_pages(
    driver: Arc<dyn Driver>,
    base_url: &str,
) -> SuiteResult<(Pages, RegistrationInput)> {
    let pages = pages(driver, base_url).await?;
    let user = register_fresh_user(&pages).await?;
    Ok((pages, user))
}

/// One-time setup: create a user and persist the authenticated snapshot
pub async fn bootstrap_auth_state(
    driver: Arc<dyn Driver>,
    base_url: &str,
    path: &Path,
) -> SuiteResult<RegistrationInput> {
    let (pages, user) = authenticated_pages(driver, base_url).await?;
    pages.session().save_storage_state(path).await?;
    info!("FIXTURE: auth state written to {}", path.display());
    Ok(user)
}

/// Page bundle resuming the session captured by [`bootstrap_auth_state`]
pub async fn pages_from_auth_state(
    driver: Arc<dyn Driver>,
    base_url: &str,
    path: &Path,
) -> SuiteResult<Pages> {
    let session = Session::new(driver, base_url);
    session.restore_storage_state(path).await?;
    session.goto("/").await?;
    let pages = Pages::new(session);
    pages.dashboard.wait_for_ready().await?;
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::DEFAULT_BASE_URL;
    use crate::mock::MockFinanceApp;

    #[tokio::test]
    async fn test_authenticated_pages_reach_dashboard() {
        let driver = Arc::new(MockFinanceApp::new());
        let (pages, user) = authenticated_pages(driver, DEFAULT_BASE_URL).await.unwrap();
        assert!(user.email.contains('@'));
        assert!(pages.dashboard.is_logged_in().await.unwrap());
    }

    #[tokio::test]
    async fn test_auth_state_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");

        let driver = Arc::new(MockFinanceApp::new());
        bootstrap_auth_state(driver, DEFAULT_BASE_URL, &path)
            .await
            .unwrap();

        let fresh = Arc::new(MockFinanceApp::new());
        let pages = pages_from_auth_state(fresh, DEFAULT_BASE_URL, &path)
            .await
            .unwrap();
        assert!(pages.dashboard.is_logged_in().await.unwrap());
    }
}
