//! Registration screen.

use crate::browser::Session;
use crate::driver::Driver;
use crate::interactions;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::testdata::registration as terms;
use std::sync::Arc;

/// Field values for one registration attempt
#[derive(Debug, Clone)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub currency: String,
}

/// Page object for the registration form
pub struct RegistrationForm {
    driver: Arc<dyn Driver>,
    title: Locator,
    name_input: Locator,
    email_input: Locator,
    password_input: Locator,
    confirm_password_input: Locator,
    currency_select: Locator,
    submit_button: Locator,
    switch_to_login: Locator,
    email_error: Locator,
    password_error: Locator,
    confirm_password_error: Locator,
}

impl RegistrationForm {
    pub fn new(session: &Session) -> Self {
        Self {
            driver: session.driver(),
            title: Locator::test_id("register-title"),
            name_input: Locator::test_id("register-name-input"),
            email_input: Locator::test_id("register-email-input"),
            password_input: Locator::test_id("register-password-input"),
            confirm_password_input: Locator::test_id("register-confirm-password-input"),
            currency_select: Locator::test_id("register-currency-select"),
            submit_button: Locator::test_id("register-submit-button"),
            switch_to_login: Locator::test_id("switch-to-login-button"),
            email_error: Locator::test_id("email-error"),
            password_error: Locator::test_id("password-error"),
            confirm_password_error: Locator::test_id("confirm-password-error"),
        }
    }

    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        interactions::verify_text_content(
            self.driver.as_ref(),
            &self.title,
            terms::TITLE,
            "registration title",
        )
        .await?;
        interactions::verify_visible(
            self.driver.as_ref(),
            &self.name_input,
            "registration name input",
        )
        .await
    }

    /// Check every input advertises its expected placeholder hint
    pub async fn verify_placeholders(&self) -> SuiteResult<()> {
        let checks = [
            (&self.name_input, terms::PLACEHOLDER_FULL_NAME, "registration name placeholder"),
            (&self.email_input, terms::PLACEHOLDER_EMAIL, "registration email placeholder"),
            (
                &self.password_input,
                terms::PLACEHOLDER_PASSWORD,
                "registration password placeholder",
            ),
            (
                &self.confirm_password_input,
                terms::PLACEHOLDER_CONFIRM_PASSWORD,
                "registration confirm password placeholder",
            ),
        ];
        for (locator, expected, name) in checks {
            let actual = self
                .driver
                .attribute(locator.selector(), "placeholder")
                .await?
                .unwrap_or_default();
            if actual != expected {
                return Err(SuiteError::mismatch(name, expected, &actual));
            }
        }
        Ok(())
    }

    /// Fill every field including the currency select, without submitting
    pub async fn fill_registration_form(&self, input: &RegistrationInput) -> SuiteResult<()> {
        let d = self.driver.as_ref();
        interactions::fill(d, &self.name_input, &input.name, "registration name").await?;
        interactions::fill(d, &self.email_input, &input.email, "registration email").await?;
        interactions::fill(d, &self.password_input, &input.password, "registration password")
            .await?;
        interactions::fill(
            d,
            &self.confirm_password_input,
            &input.confirm_password,
            "registration confirm password",
        )
        .await?;
        interactions::select_option_by_value(
            d,
            &self.currency_select,
            &input.currency,
            "registration currency",
        )
        .await
    }

    pub async fn submit(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.submit_button, "registration submit").await
    }

    /// Fill and submit in one step
    pub async fn register(&self, input: &RegistrationInput) -> SuiteResult<()> {
        self.fill_registration_form(input).await?;
        self.submit().await
    }

    pub async fn switch_to_login(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.switch_to_login, "switch to login").await
    }

    pub async fn verify_email_error(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.email_error, "email error").await
    }

    pub async fn verify_password_error(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.password_error, "password error")
            .await
    }

    pub async fn verify_confirm_password_error(&self) -> SuiteResult<()> {
        interactions::verify_visible(
            self.driver.as_ref(),
            &self.confirm_password_error,
            "confirm password error",
        )
        .await
    }

    pub async fn verify_currency_value(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_value(
            self.driver.as_ref(),
            &self.currency_select,
            expected,
            "registration currency",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{Session, DEFAULT_BASE_URL};
    use crate::mock::MockFinanceApp;
    use crate::pages::LoginForm;

    #[tokio::test]
    async fn test_register_lands_on_dashboard() {
        let session = Session::new(Arc::new(MockFinanceApp::new()), DEFAULT_BASE_URL);
        session.goto("/").await.unwrap();
        LoginForm::new(&session).switch_to_registration().await.unwrap();

        let form = RegistrationForm::new(&session);
        form.verify_loaded().await.unwrap();
        form.register(&RegistrationInput {
            name: "Тарас Мельник".to_string(),
            email: "taras@test.ua".to_string(),
            password: "secret-9".to_string(),
            confirm_password: "secret-9".to_string(),
            currency: "GBP".to_string(),
        })
        .await
        .unwrap();

        let menu = Locator::test_id("user-menu-trigger");
        interactions::verify_visible(session.driver().as_ref(), &menu, "user menu")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mismatched_passwords_show_error() {
        let session = Session::new(Arc::new(MockFinanceApp::new()), DEFAULT_BASE_URL);
        session.goto("/").await.unwrap();
        LoginForm::new(&session).switch_to_registration().await.unwrap();

        let form = RegistrationForm::new(&session);
        form.register(&RegistrationInput {
            name: "x".to_string(),
            email: "x@test.ua".to_string(),
            password: "one".to_string(),
            confirm_password: "two".to_string(),
            currency: "UAH".to_string(),
        })
        .await
        .unwrap();
        form.verify_confirm_password_error().await.unwrap();
    }
}
