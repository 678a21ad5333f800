//! Transactions screen: the full list, filters, and per-row actions.
//!
//! Rows are located by content, never by remembered element handles: every
//! lookup re-reads the `transaction-item-*` test ids so that edits and
//! deletions between steps cannot leave a page object holding a stale node.

use crate::browser::Session;
use crate::driver::Driver;
use crate::interactions;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use std::sync::Arc;

const ITEM_PREFIX: &str = "transaction-item-";

/// Content triple identifying one transaction row
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl TransactionQuery {
    pub fn new(
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
        }
    }
}

/// Page object for the transactions list
pub struct TransactionsPage {
    driver: Arc<dyn Driver>,
    page_title: Locator,
    list_title: Locator,
    add_transaction: Locator,
    toggle_filters: Locator,
    type_filter: Locator,
    category_filter: Locator,
    date_from_filter: Locator,
    date_to_filter: Locator,
    search_filter: Locator,
}

impl TransactionsPage {
    pub fn new(session: &Session) -> Self {
        Self {
            driver: session.driver(),
            page_title: Locator::test_id("transactions-page-title"),
            list_title: Locator::test_id("transaction-list-title"),
            add_transaction: Locator::test_id("add-transaction-page-button"),
            toggle_filters: Locator::test_id("toggle-filters-button"),
            type_filter: Locator::test_id("type-filter"),
            category_filter: Locator::test_id("category-filter"),
            date_from_filter: Locator::test_id("date-from-filter"),
            date_to_filter: Locator::test_id("date-to-filter"),
            search_filter: Locator::test_id("search-filter"),
        }
    }

    pub async fn verify_loaded(&self) -> SuiteResult<()> {
        let d = self.driver.as_ref();
        interactions::verify_text_content(d, &self.page_title, "Транзакції", "transactions title")
            .await?;
        interactions::verify_text_content(
            d,
            &self.list_title,
            "Список транзакцій",
            "transaction list title",
        )
        .await
    }

    pub async fn click_add_transaction(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.add_transaction, "add transaction").await
    }

    pub async fn toggle_filters(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.toggle_filters, "toggle filters").await
    }

    pub async fn filter_by_type(&self, value: &str) -> SuiteResult<()> {
        interactions::select_option_by_value(self.driver.as_ref(), &self.type_filter, value, "type filter")
            .await
    }

    pub async fn filter_by_category(&self, value: &str) -> SuiteResult<()> {
        interactions::select_option_by_value(
            self.driver.as_ref(),
            &self.category_filter,
            value,
            "category filter",
        )
        .await
    }

    pub async fn filter_by_date_range(&self, from: &str, to: &str) -> SuiteResult<()> {
        let d = self.driver.as_ref();
        interactions::fill(d, &self.date_from_filter, from, "date from filter").await?;
        interactions::fill(d, &self.date_to_filter, to, "date to filter").await
    }

    pub async fn search(&self, term: &str) -> SuiteResult<()> {
        interactions::fill(self.driver.as_ref(), &self.search_filter, term, "search filter").await
    }

    pub async fn count_transactions(&self) -> SuiteResult<usize> {
        Ok(self.driver.test_ids_matching(ITEM_PREFIX).await?.len())
    }

    /// Scan the list for a row whose content matches the query.
    ///
    /// Description and category must match exactly after trimming; the
    /// amount is a substring match against the decorated amount text.
    /// Returns the matching row's test id.
    pub async fn find_transaction(&self, query: &TransactionQuery) -> SuiteResult<String> {
        let d = self.driver.as_ref();
        for id in d.test_ids_matching(ITEM_PREFIX).await? {
            let item = Locator::test_id(id.clone());
            let description = d
                .text_content(item.child("h3").selector())
                .await?
                .unwrap_or_default();
            if description.trim() != query.description {
                continue;
            }
            let category = d
                .text_content(item.child("p.text-sm").selector())
                .await?
                .unwrap_or_default();
            if category.trim() != query.category {
                continue;
            }
            let amount = d
                .text_content(item.child("p.font-bold").selector())
                .await?
                .unwrap_or_default();
            if amount.contains(&query.amount) {
                return Ok(id);
            }
        }
        Err(SuiteError::TransactionNotFound {
            amount: query.amount.clone(),
            category: query.category.clone(),
            description: query.description.clone(),
        })
    }

    pub async fn verify_transaction_present(&self, query: &TransactionQuery) -> SuiteResult<()> {
        self.find_transaction(query).await.map(|_| ())
    }

    pub async fn verify_transaction_absent(&self, query: &TransactionQuery) -> SuiteResult<()> {
        match self.find_transaction(query).await {
            Ok(id) => Err(SuiteError::AssertionFailed {
                message: format!("transaction unexpectedly present as {id}"),
            }),
            Err(SuiteError::TransactionNotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Open the edit modal for the row matching the query
    pub async fn edit_transaction(&self, query: &TransactionQuery) -> SuiteResult<()> {
        let id = self.find_transaction(query).await?;
        let tx_id = id.strip_prefix(ITEM_PREFIX).unwrap_or(&id);
        let edit = Locator::test_id(format!("edit-transaction-{tx_id}"));
        interactions::click(self.driver.as_ref(), &edit, "edit transaction").await
    }

    /// Delete the row matching the query
    pub async fn delete_transaction(&self, query: &TransactionQuery) -> SuiteResult<()> {
        let id = self.find_transaction(query).await?;
        let tx_id = id.strip_prefix(ITEM_PREFIX).unwrap_or(&id);
        let delete = Locator::test_id(format!("delete-transaction-{tx_id}"));
        interactions::click(self.driver.as_ref(), &delete, "delete transaction").await
    }
}
