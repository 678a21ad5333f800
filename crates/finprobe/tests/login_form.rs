//! Login screen suite.

use finprobe::fixtures;
use finprobe::mock::MockFinanceApp;
use finprobe::{SuiteError, DEFAULT_BASE_URL};
use std::sync::Arc;

#[tokio::test]
async fn test_login_form_loads() {
    finprobe::logging::init();
    let driver = Arc::new(MockFinanceApp::new());
    let pages = fixtures::pages(driver, DEFAULT_BASE_URL).await.unwrap();
    pages.login.verify_loaded().await.unwrap();
}

#[tokio::test]
async fn test_login_with_registered_user_reaches_dashboard() {
    let driver = Arc::new(MockFinanceApp::new());
    driver.seed_user("Марія Кравченко", "maria@test.ua", "Password123");
    let pages = fixtures::pages(driver, DEFAULT_BASE_URL).await.unwrap();

    pages.login.login("maria@test.ua", "Password123").await.unwrap();
    pages.dashboard.wait_for_ready().await.unwrap();
    assert!(pages.dashboard.is_logged_in().await.unwrap());
}

#[tokio::test]
async fn test_wrong_password_shows_error_and_stays_logged_out() {
    let driver = Arc::new(MockFinanceApp::new());
    driver.seed_user("Марія Кравченко", "maria@test.ua", "Password123");
    let pages = fixtures::pages(driver, DEFAULT_BASE_URL).await.unwrap();

    pages.login.login("maria@test.ua", "wrong-password").await.unwrap();
    pages.login.verify_login_error().await.unwrap();
    assert!(!pages.dashboard.is_logged_in().await.unwrap());
}

#[tokio::test]
async fn test_cyrillic_input_round_trips() {
    let driver = Arc::new(MockFinanceApp::new());
    let pages = fixtures::pages(driver, DEFAULT_BASE_URL).await.unwrap();

    pages
        .login
        .fill_login_form("користувач@пошта.укр", "па́роль-123")
        .await
        .unwrap();
    pages.login.verify_email_value("користувач@пошта.укр").await.unwrap();
}

#[tokio::test]
async fn test_email_without_at_sign_is_natively_invalid() {
    let driver = Arc::new(MockFinanceApp::new());
    let pages = fixtures::pages(driver, DEFAULT_BASE_URL).await.unwrap();

    pages.login.fill_login_form("not-an-email", "x").await.unwrap();
    pages.login.verify_email_invalid().await.unwrap();
}

#[tokio::test]
async fn test_switch_to_registration_and_back() {
    let driver = Arc::new(MockFinanceApp::new());
    let pages = fixtures::pages(driver, DEFAULT_BASE_URL).await.unwrap();

    pages.login.switch_to_registration().await.unwrap();
    pages.registration.verify_loaded().await.unwrap();
    pages.registration.switch_to_login().await.unwrap();
    pages.login.verify_loaded().await.unwrap();
}

#[tokio::test]
async fn test_clicking_absent_control_reports_click_failure() {
    let driver = Arc::new(MockFinanceApp::new());
    let session = finprobe::Session::new(driver, DEFAULT_BASE_URL);
    session.goto("/").await.unwrap();

    // Dashboard control while still on the login screen.
    let dashboard = finprobe::DashboardPage::new(&session);
    let err = dashboard.click_add_transaction().await.unwrap_err();
    assert!(matches!(err, SuiteError::ClickFailed { .. }));
}
