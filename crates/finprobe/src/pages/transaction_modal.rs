//! New/edit transaction modal.

use crate::browser::Session;
use crate::driver::Driver;
use crate::interactions;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use std::sync::Arc;

/// Transaction type label shown on the expense toggle
pub const TYPE_EXPENSE: &str = "Витрата";
/// Transaction type label shown on the income toggle
pub const TYPE_INCOME: &str = "Дохід";

/// Field values for one pass over the transaction form
#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub account: String,
    pub tags: Vec<String>,
}

impl TransactionForm {
    pub fn expense(
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            kind: TYPE_EXPENSE.to_string(),
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            date: date.into(),
            account: account.into(),
            tags: Vec::new(),
        }
    }

    pub fn income(
        amount: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            kind: TYPE_INCOME.to_string(),
            amount: amount.into(),
            category: category.into(),
            description: description.into(),
            date: date.into(),
            account: account.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Page object for the transaction form modal
pub struct NewTransactionModal {
    driver: Arc<dyn Driver>,
    modal: Locator,
    title: Locator,
    close_button: Locator,
    expense_type: Locator,
    income_type: Locator,
    amount_input: Locator,
    category_select: Locator,
    description_input: Locator,
    date_input: Locator,
    account_select: Locator,
    new_tag_input: Locator,
    add_tag_button: Locator,
    cancel_button: Locator,
    submit_button: Locator,
}

impl NewTransactionModal {
    pub fn new(session: &Session) -> Self {
        Self {
            driver: session.driver(),
            modal: Locator::test_id("transaction-form-modal"),
            title: Locator::test_id("transaction-form-title"),
            close_button: Locator::test_id("transaction-form-close"),
            expense_type: Locator::test_id("expense-type-button"),
            income_type: Locator::test_id("income-type-button"),
            amount_input: Locator::test_id("transaction-amount-input"),
            category_select: Locator::test_id("transaction-category-select"),
            description_input: Locator::test_id("transaction-description-input"),
            date_input: Locator::test_id("transaction-date-input"),
            account_select: Locator::test_id("transaction-account-select"),
            new_tag_input: Locator::test_id("new-tag-input"),
            add_tag_button: Locator::test_id("add-tag-button"),
            cancel_button: Locator::test_id("transaction-form-cancel"),
            submit_button: Locator::test_id("transaction-form-submit"),
        }
    }

    pub async fn verify_open(&self) -> SuiteResult<()> {
        interactions::verify_visible(self.driver.as_ref(), &self.modal, "transaction form modal")
            .await
    }

    pub async fn verify_closed(&self) -> SuiteResult<()> {
        interactions::verify_not_visible(
            self.driver.as_ref(),
            &self.modal,
            "transaction form modal",
        )
        .await
    }

    pub async fn verify_title(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_text_content(
            self.driver.as_ref(),
            &self.title,
            expected,
            "transaction form title",
        )
        .await
    }

    pub async fn choose_expense(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.expense_type, "expense type").await
    }

    pub async fn choose_income(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.income_type, "income type").await
    }

    /// Fill the whole form. The type label selects which toggle is pressed;
    /// an unknown label is a test-authoring error and fails fast.
    pub async fn fill_transaction_form(&self, form: &TransactionForm) -> SuiteResult<()> {
        match form.kind.as_str() {
            TYPE_EXPENSE => self.choose_expense().await?,
            TYPE_INCOME => self.choose_income().await?,
            other => {
                return Err(SuiteError::AssertionFailed {
                    message: format!(
                        "unknown transaction type \"{other}\" (expected \"{TYPE_EXPENSE}\" or \"{TYPE_INCOME}\")"
                    ),
                })
            }
        }
        let d = self.driver.as_ref();
        // The category select repopulates after the type toggle, so it is
        // picked first and the plain inputs follow.
        interactions::select_option_by_value(
            d,
            &self.category_select,
            &form.category,
            "transaction category",
        )
        .await?;
        interactions::fill(d, &self.amount_input, &form.amount, "transaction amount").await?;
        interactions::fill(d, &self.description_input, &form.description, "transaction description")
            .await?;
        interactions::fill(d, &self.date_input, &form.date, "transaction date").await?;
        interactions::select_option_by_value(
            d,
            &self.account_select,
            &form.account,
            "transaction account",
        )
        .await?;
        for tag in &form.tags {
            self.add_tag(tag).await?;
        }
        Ok(())
    }

    pub async fn add_tag(&self, tag: &str) -> SuiteResult<()> {
        let d = self.driver.as_ref();
        interactions::fill(d, &self.new_tag_input, tag, "new tag").await?;
        interactions::click(d, &self.add_tag_button, "add tag").await
    }

    /// Remove the tag chip at `index` via its scoped remove button
    pub async fn remove_tag(&self, index: usize) -> SuiteResult<()> {
        let chip = Locator::test_id(format!("tag-{index}"));
        let remove = chip.child("button[data-testid^=\"remove-tag-\"]");
        interactions::click(self.driver.as_ref(), &remove, "remove tag").await
    }

    /// Test id of the chip whose text matches `tag` exactly after trimming
    async fn tag_chip_id(&self, tag: &str) -> SuiteResult<Option<String>> {
        let d = self.driver.as_ref();
        for id in d.test_ids_matching("tag-").await? {
            let chip = Locator::test_id(id.clone());
            let text = d.text_content(chip.selector()).await?.unwrap_or_default();
            if text.trim() == tag {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    pub async fn verify_tag_exists(&self, tag: &str) -> SuiteResult<()> {
        if self.tag_chip_id(tag).await?.is_some() {
            Ok(())
        } else {
            Err(SuiteError::AssertionFailed {
                message: format!("tag chip \"{tag}\" not found"),
            })
        }
    }

    /// Remove a chip by its text; the remove button is scoped under the
    /// matched chip so same-prefix neighbours are untouched.
    pub async fn remove_tag_by_text(&self, tag: &str) -> SuiteResult<()> {
        let id = self
            .tag_chip_id(tag)
            .await?
            .ok_or_else(|| SuiteError::AssertionFailed {
                message: format!("tag chip \"{tag}\" not found"),
            })?;
        let remove = Locator::test_id(id).child("button[data-testid^=\"remove-tag-\"]");
        interactions::click(self.driver.as_ref(), &remove, "remove tag").await
    }

    pub async fn verify_tag(&self, index: usize, expected: &str) -> SuiteResult<()> {
        let chip = Locator::test_id(format!("tag-{index}"));
        interactions::verify_text_content(self.driver.as_ref(), &chip, expected, "tag chip").await
    }

    pub async fn tag_count(&self) -> SuiteResult<usize> {
        self.driver
            .count(&crate::locator::Selector::test_id_pattern("tag-"))
            .await
    }

    pub async fn submit(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.submit_button, "transaction form submit")
            .await
    }

    pub async fn cancel(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.cancel_button, "transaction form cancel")
            .await
    }

    pub async fn close(&self) -> SuiteResult<()> {
        interactions::click(self.driver.as_ref(), &self.close_button, "transaction form close")
            .await
    }

    pub async fn verify_amount_value(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_value(self.driver.as_ref(), &self.amount_input, expected, "transaction amount")
            .await
    }

    pub async fn verify_description_value(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_value(
            self.driver.as_ref(),
            &self.description_input,
            expected,
            "transaction description",
        )
        .await
    }

    pub async fn verify_category_value(&self, expected: &str) -> SuiteResult<()> {
        interactions::verify_value(
            self.driver.as_ref(),
            &self.category_select,
            expected,
            "transaction category",
        )
        .await
    }
}
