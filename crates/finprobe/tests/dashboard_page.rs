//! Dashboard suite: summary totals computed from transactions entered
//! through the modal.

use finprobe::fixtures::{self, Pages};
use finprobe::mock::MockFinanceApp;
use finprobe::pages::transaction_modal::TransactionForm;
use finprobe::testdata::dashboard;
use finprobe::DEFAULT_BASE_URL;
use std::sync::Arc;
use std::time::Duration;

async fn dashboard_pages() -> Pages {
    let driver = Arc::new(MockFinanceApp::new());
    let (pages, _user) = fixtures::authenticated_pages(driver, DEFAULT_BASE_URL)
        .await
        .unwrap();
    pages
}

async fn add_transaction(pages: &Pages, form: &TransactionForm) {
    // Seed dates are entered as "today", like a user would.
    let mut form = form.clone();
    form.date = finprobe::testdata::recent_date();
    pages.dashboard.click_add_transaction().await.unwrap();
    pages.transaction_modal.verify_open().await.unwrap();
    pages.transaction_modal.fill_transaction_form(&form).await.unwrap();
    pages.transaction_modal.submit().await.unwrap();
    pages.transaction_modal.verify_closed().await.unwrap();
    pages
        .dashboard
        .verify_last_transaction(&form.amount, &form.category, &form.description)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_total_income_adds_up() {
    let pages = dashboard_pages().await;
    add_transaction(&pages, &dashboard::income_1()).await;
    add_transaction(&pages, &dashboard::income_2()).await;
    pages
        .dashboard
        .verify_total_income(dashboard::EXPECTED_TOTAL_INCOME)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_total_expenses_add_up() {
    let pages = dashboard_pages().await;
    add_transaction(&pages, &dashboard::expense_1()).await;
    add_transaction(&pages, &dashboard::expense_2()).await;
    pages
        .dashboard
        .verify_total_expenses(dashboard::EXPECTED_TOTAL_EXPENSES)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_balance_is_income_minus_expenses() {
    let pages = dashboard_pages().await;
    add_transaction(&pages, &dashboard::income_1()).await;
    add_transaction(&pages, &dashboard::expense_3()).await;
    pages
        .dashboard
        .verify_balance(dashboard::EXPECTED_BALANCE)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_budget_used_tracks_expenses() {
    let pages = dashboard_pages().await;
    add_transaction(&pages, &dashboard::expense_1()).await;
    pages.dashboard.verify_budget_used("500.00 UAH").await.unwrap();
}

#[tokio::test]
async fn test_select_waits_out_slow_option_population() {
    // Option lists populate 150ms after the type is chosen; the two-phase
    // select wait must absorb that without failing.
    let driver = Arc::new(MockFinanceApp::with_option_delay(Duration::from_millis(150)));
    let (pages, _user) = fixtures::authenticated_pages(driver, DEFAULT_BASE_URL)
        .await
        .unwrap();
    add_transaction(&pages, &dashboard::income_1()).await;
    pages
        .dashboard
        .verify_total_income("15000.00 UAH")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unknown_transaction_type_fails_fast() {
    let pages = dashboard_pages().await;
    pages.dashboard.click_add_transaction().await.unwrap();
    let mut form = dashboard::income_1();
    form.kind = "Переказ".to_string();
    let err = pages.transaction_modal.fill_transaction_form(&form).await.unwrap_err();
    assert!(matches!(err, finprobe::SuiteError::AssertionFailed { .. }));
}
