//! Login screen.

use crate::browser::Session;
use crate::driver::Driver;
use crate::interactions;
use crate::locator::Locator;
use crate::result::SuiteResult;
use std::sync::Arc;

/// Page object for the login form
pub struct LoginForm {
    driver: Arc<dyn Driver>,
    title: Locator,
    email_input: Locator,
    password_input: Locator,
    submit_button: Locator,
    switch_to_register: Locator,
    login_error: Locator,
    email_error: Locator,
    password_error: Locator,
}

impl LoginForm {
    pub fn new(session: &Session) -> Self {
        Self {
            driver: session.driver(),
            title: Locator::test_id("login-title"),
            email_input: Locator::test_id("login-email-input"),
            password_input: Locator::test_id("login-password-input"),
            submit_button: Locator::test_id("login-submit-button"),
            switch_to_register: Locator::test_id("switch-to-register-button"),
            login_error: Locator::test_id("login-error"),
            email_error: Locator::test_id("email-error"),
            password_error: Locator::test_id("password-error"),
        }
    }

    /// Wait for the form to render
    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.title, "login title").await?;
        interactions::verify_visible(self.driver.as_ref(), &self.email_input, "login email input")
            .await
    }

    /// Type credentials without submitting
    pub async fn fill_login_form(&self, email: &str, password: &str) -> SuiteResult<()> {
        interactions::fill(self.driver.as_ref(), &self.email_input, email, "login email").await?;
        interactions::fill(
            self.driver.as_ref(),
            &self.password_input,
            password,
            "login password",
        )
        .await
    }

    pub async fn submit(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.submit_button, "login submit").await
    }

    /// Fill and submit in one step
    pub async fn login(&self, email: &str, password: &str) -> SuiteResult<()> {
        self.fill_login_form(email, password).await?;
        self.submit().await
    }

    pub async fn switch_to_registration(&self) -> SuiteResult<()> {
        interactions::click(
            self.driver.as_ref(),
            &self.switch_to_register,
            "switch to registration",
        )
        .await
    }

    /// Assert the rejected-credentials banner is shown
    pub async fn verify_login_error(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.login_error, "login error").await
    }

    pub async fn verify_email_error(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.email_error, "email error").await
    }

    pub async fn verify_password_error(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.password_error, "password error")
            .await
    }

    /// Assert the email field reports native invalidity with a message
    pub async fn verify_email_invalid(&self) -> SuiteResult<()> {
        interactions::verify_invalid(self.driver.as_ref(), &self.email_input, "login email").await?;
        interactions::verify_validation_message(
            self.driver.as_ref(),
            &self.email_input,
            "login email",
        )
        .await
    }

    pub async fn verify_email_value(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_value(self.driver.as_ref(), &self.email_input, expected, "login email")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{Session, DEFAULT_BASE_URL};
    use crate::mock::MockFinanceApp;

    fn session() -> Session {
        Session::new(Arc::new(MockFinanceApp::new()), DEFAULT_BASE_URL)
    }

    #[tokio::test]
    async fn test_fill_round_trips_value() {
        let session = session();
        session.goto("/").await.unwrap();
        let login = LoginForm::new(&session);
        login.fill_login_form("іван@пошта.укр", "таємниця").await.unwrap();
        login.verify_email_value("іван@пошта.укр").await.unwrap();
    }

    #[tokio::test]
    async fn test_bad_credentials_surface_error() {
        let session = session();
        session.goto("/").await.unwrap();
        let login = LoginForm::new(&session);
        login.login("nobody@test.ua", "wrong").await.unwrap();
        login.verify_login_error().await.unwrap();
    }
}
