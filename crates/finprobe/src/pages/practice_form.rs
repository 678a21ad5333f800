//! Practice form page, located by placeholder and CSS rather than test ids.
//!
//! Exercises the native-validity helpers against a form that relies on
//! browser constraint validation instead of custom error elements.

use crate::browser::Session;
use crate::driver::Driver;
use crate::interactions;
use crate::locator::Locator;
use crate::result::SuiteResult;
use std::sync::Arc;

/// URL of the practice form
pub const PRACTICE_FORM_URL: &str = "https://demoqa.com/automation-practice-form";

pub struct PracticeFormPage {
    driver: Arc<dyn Driver>,
    wrapper: Locator,
    first_name: Locator,
    last_name: Locator,
    email: Locator,
    mobile: Locator,
    address: Locator,
    submit_button: Locator,
    confirmation_modal: Locator,
    modal_close: Locator,
}

impl PracticeFormPage {
    pub fn new(session: &Session) -> Self {
        Self {
            driver: session.driver(),
            wrapper: Locator::css(".practice-form-wrapper"),
            first_name: Locator::placeholder("First Name"),
            last_name: Locator::placeholder("Last Name"),
            email: Locator::placeholder("name@example.com"),
            mobile: Locator::placeholder("Mobile Number"),
            address: Locator::placeholder("Current Address"),
            submit_button: Locator::css("#submit"),
            confirmation_modal: Locator::css(".modal-dialog"),
            modal_close: Locator::css("#closeLargeModal"),
        }
    }

    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.wrapper, "practice form").await
    }

    pub async fn fill_name(&self, first: &str, last: &str) -> SuiteResult<()> {
        let d = self.driver.as_ref();
        interactions::fill(d, &self.first_name, first, "first name").await?;
        interactions::fill(d, &self.last_name, last, "last name").await
    }

    pub async fn fill_email(&self, email: &str) -> SuiteResult<()> {
        interactions::fill(self.driver.as_ref(), &self.email, email, "email").await
    }

    pub async fn fill_mobile(&self, mobile: &str) -> SuiteResult<()> {
        interactions::fill(self.driver.as_ref(), &self.mobile, mobile, "mobile number").await
    }

    pub async fn fill_address(&self, address: &str) -> SuiteResult<()> {
        interactions::fill(self.driver.as_ref(), &self.address, address, "current address").await
    }

    pub async fn submit(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.submit_button, "practice form submit")
            .await
    }

    pub async fn verify_confirmation_visible(&self) -> SuiteResult<()> {
        interactions::verify_visible(
            self.driver.as_ref(),
            &self.confirmation_modal,
            "confirmation modal",
        )
        .await
    }

    pub async fn close_confirmation(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.modal_close, "confirmation close").await
    }

    /// Assert the email field is natively invalid and reports a message
    pub async fn verify_email_invalid(&self) -> SuiteResult<()> {
        let d = self.driver.as_ref();
        interactions::verify_invalid(d, &self.email, "email").await?;
        interactions::verify_validation_message(d, &self.email, "email").await
    }

    pub async fn verify_mobile_invalid(&self) -> SuiteResult<()> {
        let d = self.driver.as_ref();
        interactions::verify_invalid(d, &self.mobile, "mobile number").await?;
        interactions::verify_validation_message(d, &self.mobile, "mobile number").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{Session, DEFAULT_BASE_URL};
    use crate::mock::MockFinanceApp;
    use crate::testdata::practice as terms;

    async fn open() -> (Session, PracticeFormPage) {
        let session = Session::new(Arc::new(MockFinanceApp::new()), DEFAULT_BASE_URL);
        session.goto(PRACTICE_FORM_URL).await.unwrap();
        let page = PracticeFormPage::new(&session);
        page.verify_loaded().await.unwrap();
        (session, page)
    }

    #[tokio::test]
    async fn test_valid_submission_shows_confirmation() {
        let (_session, page) = open().await;
        page.fill_name(terms::FIRST_NAME, terms::LAST_NAME).await.unwrap();
        page.fill_email(terms::EMAIL).await.unwrap();
        page.fill_mobile(terms::MOBILE).await.unwrap();
        page.fill_address(terms::ADDRESS).await.unwrap();
        page.submit().await.unwrap();
        page.verify_confirmation_visible().await.unwrap();
        page.close_confirmation().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_email_is_natively_invalid() {
        let (_session, page) = open().await;
        page.fill_email(terms::INVALID_EMAIL).await.unwrap();
        page.verify_email_invalid().await.unwrap();
    }

    #[tokio::test]
    async fn test_short_mobile_is_natively_invalid() {
        let (_session, page) = open().await;
        page.fill_mobile(terms::INVALID_MOBILE).await.unwrap();
        page.verify_mobile_invalid().await.unwrap();
    }
}
