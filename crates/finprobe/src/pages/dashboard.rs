//! Dashboard screen: summary totals and the recent-transactions list.

use crate::browser::Session;
use crate::driver::Driver;
use crate::interactions;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{self, WaitOptions, LOGIN_PROBE_TIMEOUT_MS, USER_MENU_TIMEOUT_MS};
use std::sync::Arc;
use std::time::Duration;

/// Page object for the authenticated dashboard
pub struct DashboardPage {
    driver: Arc<dyn Driver>,
    user_menu: Locator,
    nav_transactions: Locator,
    add_transaction: Locator,
    total_income: Locator,
    total_expenses: Locator,
    total_balance: Locator,
    budget_used: Locator,
}

impl DashboardPage {
    pub fn new(session: &Session) -> Self {
        Self {
            driver: session.driver(),
            // The user menu renders last, after auth state and data settle.
            user_menu: Locator::test_id("user-menu-trigger")
                .with_timeout(Duration::from_millis(USER_MENU_TIMEOUT_MS)),
            nav_transactions: Locator::test_id("nav-transactions"),
            add_transaction: Locator::test_id("add-transaction-button"),
            total_income: Locator::test_id("total-income"),
            total_expenses: Locator::test_id("total-expenses"),
            total_balance: Locator::test_id("total-balance"),
            budget_used: Locator::test_id("budget-used"),
        }
    }

    /// Block until the dashboard is fully rendered
    pub async fn wait_for_ready(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.user_menu, "user menu").await
    }

    /// Short probe for an existing session. Absence of the user menu within
    /// the probe window means "not logged in", not a failure.
    pub async fn is_logged_in(&self) -> SuiteResult<bool> {
        let opts = WaitOptions::new().with_timeout(LOGIN_PROBE_TIMEOUT_MS);
        let selector = self.user_menu.selector();
        let driver = self.driver.as_ref();
        match wait::poll_until(&opts, || async move { driver.is_visible(selector).await }).await {
            Ok(()) => Ok(true),
            Err(SuiteError::Timeout { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn verify_total_income(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_text_content(
            self.driver.as_ref(),
            &self.total_income,
            expected,
            "total income",
        )
        .await
    }

    pub async fn verify_total_expenses(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_text_content(
            self.driver.as_ref(),
            &self.total_expenses,
            expected,
            "total expenses",
        )
        .await
    }

    pub async fn verify_balance(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_text_content(
            self.driver.as_ref(),
            &self.total_balance,
            expected,
            "balance",
        )
        .await
    }

    pub async fn verify_budget_used(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_text_content(
            self.driver.as_ref(),
            &self.budget_used,
            expected,
            "budget used",
        )
        .await
    }

    pub async fn navigate_to_transactions(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.nav_transactions, "transactions nav").await
    }

    pub async fn click_add_transaction(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.add_transaction, "add transaction").await
    }

    /// Verify the newest entry of the recent-transactions list by content.
    ///
    /// The amount is matched as a substring of the rendered text since the
    /// list decorates it with a sign and currency suffix.
    pub async fn verify_last_transaction(
        &self,
        amount: &str,
        category: &str,
        description: &str,
    ) -> SuiteResult<()> {
        let ids = self.driver.test_ids_matching("transaction-item-").await?;
        let Some(last) = ids.last() else {
            return Err(SuiteError::TransactionNotFound {
                amount: amount.to_string(),
                category: category.to_string(),
                description: description.to_string(),
            });
        };
        let item = Locator::test_id(last.clone());
        let d = self.driver.as_ref();
        interactions::verify_text_content(d, &item.child("h3"), description, "last transaction description")
            .await?;
        interactions::verify_text_content(d, &item.child("p.text-sm"), category, "last transaction category")
            .await?;
        let rendered = d
            .text_content(item.child("p.font-bold").selector())
            .await?
            .unwrap_or_default();
        if !rendered.contains(amount) {
            return Err(SuiteError::mismatch(
                "last transaction amount",
                amount,
                &rendered,
            ));
        }
        Ok(())
    }
}
