//! Transactions page suite: content-based row lookup, CRUD through the
//! modal, tags, filters, and storage-seeded data.

use finprobe::fixtures::{self, Pages};
use finprobe::mock::MockFinanceApp;
use finprobe::pages::transaction_modal::TransactionForm;
use finprobe::storage::{self, TransactionSeed};
use finprobe::testdata::transactions as terms;
use finprobe::{SuiteError, DEFAULT_BASE_URL};
use std::sync::Arc;

async fn transactions_pages() -> (Arc<MockFinanceApp>, Pages) {
    let driver = Arc::new(MockFinanceApp::new());
    let (pages, _user) = fixtures::authenticated_pages(Arc::clone(&driver) as _, DEFAULT_BASE_URL)
        .await
        .unwrap();
    pages.dashboard.navigate_to_transactions().await.unwrap();
    pages.transactions.verify_loaded().await.unwrap();
    (driver, pages)
}

async fn create_transaction(pages: &Pages, form: &TransactionForm) {
    pages.transactions.click_add_transaction().await.unwrap();
    pages.transaction_modal.verify_open().await.unwrap();
    pages
        .transaction_modal
        .verify_title("Нова транзакція")
        .await
        .unwrap();
    pages.transaction_modal.fill_transaction_form(form).await.unwrap();
    pages.transaction_modal.submit().await.unwrap();
    pages.transaction_modal.verify_closed().await.unwrap();
}

#[tokio::test]
async fn test_create_tagged_expense_and_find_by_content() {
    let (_driver, pages) = transactions_pages().await;
    let form = terms::tagged_expense();
    let query = terms::query_of(&form);

    pages.transactions.verify_transaction_absent(&query).await.unwrap();
    create_transaction(&pages, &form).await;
    pages.transactions.verify_transaction_present(&query).await.unwrap();
}

#[tokio::test]
async fn test_create_income_with_tag() {
    let (_driver, pages) = transactions_pages().await;
    let form = terms::tagged_income();
    create_transaction(&pages, &form).await;
    pages
        .transactions
        .verify_transaction_present(&terms::query_of(&form))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_edit_transaction_updates_content() {
    let (_driver, pages) = transactions_pages().await;
    let initial = terms::initial();
    let edited = terms::edited();
    create_transaction(&pages, &initial).await;

    pages
        .transactions
        .edit_transaction(&terms::query_of(&initial))
        .await
        .unwrap();
    pages.transaction_modal.verify_open().await.unwrap();
    pages
        .transaction_modal
        .verify_title("Редагувати транзакцію")
        .await
        .unwrap();
    // The form opens prefilled with the row's current values.
    pages.transaction_modal.verify_amount_value(&initial.amount).await.unwrap();
    pages
        .transaction_modal
        .verify_description_value(&initial.description)
        .await
        .unwrap();

    pages.transaction_modal.fill_transaction_form(&edited).await.unwrap();
    pages.transaction_modal.submit().await.unwrap();
    pages.transaction_modal.verify_closed().await.unwrap();

    pages
        .transactions
        .verify_transaction_present(&terms::query_of(&edited))
        .await
        .unwrap();
    pages
        .transactions
        .verify_transaction_absent(&terms::query_of(&initial))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_transaction_removes_row() {
    let (_driver, pages) = transactions_pages().await;
    let form = terms::initial();
    create_transaction(&pages, &form).await;

    let query = terms::query_of(&form);
    pages.transactions.delete_transaction(&query).await.unwrap();
    pages.transactions.verify_transaction_absent(&query).await.unwrap();
    assert_eq!(pages.transactions.count_transactions().await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_on_empty_list_is_typed_not_found() {
    let (_driver, pages) = transactions_pages().await;
    let err = pages
        .transactions
        .find_transaction(&terms::query_of(&terms::initial()))
        .await
        .unwrap_err();
    assert!(matches!(err, SuiteError::TransactionNotFound { .. }));
}

#[tokio::test]
async fn test_tag_chips_add_and_scoped_remove() {
    let (_driver, pages) = transactions_pages().await;
    pages.transactions.click_add_transaction().await.unwrap();
    pages.transaction_modal.choose_expense().await.unwrap();

    pages.transaction_modal.add_tag("Алкоголь").await.unwrap();
    pages.transaction_modal.add_tag("Вечірка").await.unwrap();
    assert_eq!(pages.transaction_modal.tag_count().await.unwrap(), 2);
    pages.transaction_modal.verify_tag(0, "Алкоголь").await.unwrap();
    pages.transaction_modal.verify_tag(1, "Вечірка").await.unwrap();

    // Removing the first chip shifts the remaining one into slot zero.
    pages.transaction_modal.remove_tag(0).await.unwrap();
    assert_eq!(pages.transaction_modal.tag_count().await.unwrap(), 1);
    pages.transaction_modal.verify_tag(0, "Вечірка").await.unwrap();
}

#[tokio::test]
async fn test_remove_tag_by_text_targets_matching_chip() {
    let (_driver, pages) = transactions_pages().await;
    pages.transactions.click_add_transaction().await.unwrap();
    pages.transaction_modal.choose_expense().await.unwrap();

    pages.transaction_modal.add_tag("Алкоголь").await.unwrap();
    pages.transaction_modal.add_tag("Вечірка").await.unwrap();
    pages.transaction_modal.verify_tag_exists("Алкоголь").await.unwrap();
    pages.transaction_modal.verify_tag_exists("Вечірка").await.unwrap();

    pages.transaction_modal.remove_tag_by_text("Алкоголь").await.unwrap();
    assert_eq!(pages.transaction_modal.tag_count().await.unwrap(), 1);
    pages.transaction_modal.verify_tag_exists("Вечірка").await.unwrap();
    let err = pages
        .transaction_modal
        .verify_tag_exists("Алкоголь")
        .await
        .unwrap_err();
    assert!(matches!(err, SuiteError::AssertionFailed { .. }));
}

#[tokio::test]
async fn test_row_id_stable_across_lookups_and_edit() {
    let (_driver, pages) = transactions_pages().await;
    let initial = terms::initial();
    let edited = terms::edited();
    create_transaction(&pages, &initial).await;

    let first = pages
        .transactions
        .find_transaction(&terms::query_of(&initial))
        .await
        .unwrap();
    let second = pages
        .transactions
        .find_transaction(&terms::query_of(&initial))
        .await
        .unwrap();
    assert_eq!(first, second);

    pages
        .transactions
        .edit_transaction(&terms::query_of(&initial))
        .await
        .unwrap();
    pages.transaction_modal.fill_transaction_form(&edited).await.unwrap();
    pages.transaction_modal.submit().await.unwrap();

    // Editing rewrites the row's content but never its identity.
    let after = pages
        .transactions
        .find_transaction(&terms::query_of(&edited))
        .await
        .unwrap();
    assert_eq!(first, after);
}

#[tokio::test]
async fn test_cancel_discards_form() {
    let (_driver, pages) = transactions_pages().await;
    pages.transactions.click_add_transaction().await.unwrap();
    pages
        .transaction_modal
        .fill_transaction_form(&terms::initial())
        .await
        .unwrap();
    pages.transaction_modal.cancel().await.unwrap();
    pages.transaction_modal.verify_closed().await.unwrap();
    assert_eq!(pages.transactions.count_transactions().await.unwrap(), 0);
}

#[tokio::test]
async fn test_filters_reveal_after_toggle() {
    let (_driver, pages) = transactions_pages().await;
    pages.transactions.toggle_filters().await.unwrap();
    pages.transactions.filter_by_type("expense").await.unwrap();
    pages.transactions.filter_by_category("Продукти").await.unwrap();
    pages
        .transactions
        .filter_by_date_range("2025-11-01", "2025-11-30")
        .await
        .unwrap();
    pages.transactions.search("Вино").await.unwrap();
}

#[tokio::test]
async fn test_storage_seeded_transactions_appear_in_list() {
    let (driver, pages) = transactions_pages().await;
    let user_id = driver.current_user_id().unwrap();

    let seed = TransactionSeed {
        amount: "2000".to_string(),
        category: "Транспорт".to_string(),
        description: "Таксі до аеропорту".to_string(),
        date: "2025-11-26".to_string(),
        account: "Картка Монобанку".to_string(),
        kind: None,
        tags: None,
    };
    let record = storage::build_transaction_from_seed(storage::random_seed_id(), &seed).unwrap();
    storage::seed_transactions(
        pages.session().driver().as_ref(),
        &user_id.to_string(),
        &[record],
    )
    .await
    .unwrap();

    pages
        .transactions
        .verify_transaction_present(&terms::query_of(&terms::initial()))
        .await
        .unwrap();
}
