//! In-memory simulation of the application under test.
//!
//! [`MockFinanceApp`] implements [`Driver`] against a model of the FinMore
//! screens: login/registration, dashboard summaries, the transactions list
//! with server-assigned ids, the new-transaction modal (including the
//! type-dependent category value-spaces and asynchronously populated option
//! lists), tags, and the practice form with native-validity semantics.
//!
//! Unit and integration suites run against this driver; the `browser`
//! feature swaps in the CDP driver without touching the page-object layer.

use crate::driver::Driver;
use crate::locator::Selector;
use crate::result::{SuiteError, SuiteResult};
use crate::storage::{Cookie, OriginStorage, StorageState, TransactionRecord, TransactionType};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Expense category value-space
pub const EXPENSE_CATEGORIES: [&str; 5] =
    ["Продукти", "Транспорт", "Розваги", "Комунальні", "Здоров'я"];

/// Income category value-space
pub const INCOME_CATEGORIES: [&str; 3] = ["Зарплата", "Фриланс", "Інвестиції"];

/// Account value-space
pub const ACCOUNTS: [&str; 4] = [
    "Готівка",
    "Картка ПриватБанку",
    "Картка Монобанку",
    "Ощадний рахунок",
];

/// Currency value-space on the registration screen
pub const CURRENCIES: [&str; 4] = ["UAH", "USD", "EUR", "GBP"];

const CATEGORY_PLACEHOLDER: &str = "Оберіть категорію";
const ACCOUNT_PLACEHOLDER: &str = "Оберіть рахунок";
const SESSION_COOKIE: &str = "finmore_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Login,
    Register,
    Dashboard,
    Transactions,
    Practice,
}

#[derive(Debug, Clone)]
struct User {
    id: u64,
    name: String,
    email: String,
    password: String,
    currency: String,
}

#[derive(Debug, Clone)]
struct Tx {
    id: u64,
    kind: TransactionType,
    amount: f64,
    category: String,
    description: String,
    date: String,
    account: String,
    tags: Vec<String>,
}

impl Tx {
    fn amount_text(&self) -> String {
        let sign = match self.kind {
            TransactionType::Expense => "-",
            TransactionType::Income => "+",
        };
        format!("{sign}{:.2} UAH", self.amount)
    }
}

#[derive(Debug)]
struct ModalState {
    editing: Option<u64>,
    kind: Option<TransactionType>,
    kind_set_at: Option<Instant>,
    opened_at: Instant,
    amount: String,
    category: String,
    description: String,
    date: String,
    account: String,
    tag_input: String,
    tags: Vec<String>,
}

impl ModalState {
    fn fresh() -> Self {
        Self {
            editing: None,
            kind: None,
            kind_set_at: None,
            opened_at: Instant::now(),
            amount: String::new(),
            category: String::new(),
            description: String::new(),
            date: String::new(),
            account: String::new(),
            tag_input: String::new(),
            tags: Vec::new(),
        }
    }

    fn for_edit(tx: &Tx) -> Self {
        Self {
            editing: Some(tx.id),
            kind: Some(tx.kind),
            kind_set_at: Some(Instant::now()),
            opened_at: Instant::now(),
            amount: format!("{}", tx.amount),
            category: tx.category.clone(),
            description: tx.description.clone(),
            date: tx.date.clone(),
            account: tx.account.clone(),
            tag_input: String::new(),
            tags: tx.tags.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct LoginState {
    email: String,
    password: String,
    failed: bool,
}

#[derive(Debug, Default)]
struct RegisterState {
    name: String,
    email: String,
    password: String,
    confirm: String,
    currency: String,
    email_error: bool,
    password_error: bool,
    confirm_error: bool,
}

#[derive(Debug, Default)]
struct PracticeState {
    first_name: String,
    last_name: String,
    email: String,
    mobile: String,
    address: String,
    submitted: bool,
}

#[derive(Debug, Default)]
struct FilterState {
    open: bool,
    kind: String,
    category: String,
    date_from: String,
    date_to: String,
    search: String,
}

#[derive(Debug)]
struct AppState {
    url: String,
    route: Route,
    users: Vec<User>,
    next_user_id: u64,
    session_user: Option<u64>,
    transactions: Vec<Tx>,
    next_tx_id: u64,
    modal: Option<ModalState>,
    login: LoginState,
    register: RegisterState,
    practice: PracticeState,
    filters: FilterState,
    local_storage: HashMap<String, String>,
    option_delay: Duration,
}

impl AppState {
    fn new(option_delay: Duration) -> Self {
        Self {
            url: String::from("about:blank"),
            route: Route::Login,
            users: Vec::new(),
            next_user_id: 1,
            session_user: None,
            transactions: Vec::new(),
            next_tx_id: 1,
            modal: None,
            login: LoginState::default(),
            register: RegisterState::default(),
            practice: PracticeState::default(),
            filters: FilterState::default(),
            local_storage: HashMap::new(),
            option_delay,
        }
    }

    fn fmt_total(v: f64) -> String {
        format!("{v:.2} UAH")
    }

    fn total_income(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Income)
            .map(|t| t.amount)
            .sum()
    }

    fn total_expenses(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Expense)
            .map(|t| t.amount)
            .sum()
    }

    fn tx(&self, id: u64) -> Option<&Tx> {
        self.transactions.iter().find(|t| t.id == id)
    }

    fn category_options(&self) -> Vec<String> {
        let mut out = vec![CATEGORY_PLACEHOLDER.to_string()];
        let Some(modal) = &self.modal else { return out };
        let Some(kind) = modal.kind else { return out };
        let settled = modal
            .kind_set_at
            .is_some_and(|t| t.elapsed() >= self.option_delay);
        if !settled {
            return out;
        }
        let values: &[&str] = match kind {
            TransactionType::Expense => &EXPENSE_CATEGORIES,
            TransactionType::Income => &INCOME_CATEGORIES,
        };
        out.extend(values.iter().map(|s| (*s).to_string()));
        out
    }

    fn account_options(&self) -> Vec<String> {
        let mut out = vec![ACCOUNT_PLACEHOLDER.to_string()];
        let settled = self
            .modal
            .as_ref()
            .is_some_and(|m| m.opened_at.elapsed() >= self.option_delay);
        if settled {
            out.extend(ACCOUNTS.iter().map(|s| (*s).to_string()));
        }
        out
    }

    fn modal_open(&self) -> bool {
        self.modal.is_some()
    }

    fn load_seeded_transactions(&mut self, value: &str) {
        let Ok(records) = serde_json::from_str::<Vec<TransactionRecord>>(value) else {
            return;
        };
        // DOM ids are numeric; non-numeric seed ids get fresh ones.
        let mut fallback = records
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.transactions = records
            .iter()
            .map(|r| {
                let id = r.id.parse::<u64>().unwrap_or_else(|_| {
                    fallback += 1;
                    fallback
                });
                Tx {
                    id,
                    kind: r.kind,
                    amount: r.amount,
                    category: r.category.clone(),
                    description: r.description.clone(),
                    date: r.date.clone(),
                    account: r.account.clone(),
                    tags: r.tags.clone(),
                }
            })
            .collect();
        self.next_tx_id = self.transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    }

    fn visible(&self, id: &str) -> bool {
        // Modal elements sit above whatever screen opened them.
        if self.modal_open() {
            if let Some(m) = &self.modal {
                match id {
                    "transaction-form-modal"
                    | "transaction-form-title"
                    | "transaction-form-close"
                    | "expense-type-button"
                    | "income-type-button"
                    | "transaction-amount-input"
                    | "transaction-category-select"
                    | "transaction-description-input"
                    | "transaction-date-input"
                    | "transaction-account-select"
                    | "new-tag-input"
                    | "add-tag-button"
                    | "transaction-form-cancel"
                    | "transaction-form-submit" => return true,
                    _ => {
                        if let Some(i) = id.strip_prefix("tag-") {
                            if let Ok(i) = i.parse::<usize>() {
                                return i < m.tags.len();
                            }
                        }
                        if let Some(i) = id.strip_prefix("remove-tag-") {
                            if let Ok(i) = i.parse::<usize>() {
                                return i < m.tags.len();
                            }
                        }
                    }
                }
            }
        }
        match self.route {
            Route::Login => matches!(
                id,
                "login-form"
                    | "login-title"
                    | "login-email-input"
                    | "login-password-input"
                    | "login-submit-button"
                    | "switch-to-register-button"
            ) || (id == "login-error" && self.login.failed),
            Route::Register => matches!(
                id,
                "register-form"
                    | "register-title"
                    | "register-name-input"
                    | "register-email-input"
                    | "register-password-input"
                    | "register-confirm-password-input"
                    | "register-currency-select"
                    | "register-submit-button"
                    | "switch-to-login-button"
            ) || (id == "email-error" && self.register.email_error)
                || (id == "password-error" && self.register.password_error)
                || (id == "confirm-password-error" && self.register.confirm_error),
            Route::Dashboard => {
                matches!(
                    id,
                    "user-menu-trigger"
                        | "nav-transactions"
                        | "add-transaction-button"
                        | "total-income"
                        | "total-expenses"
                        | "total-balance"
                        | "budget-used"
                ) || self.item_visible(id)
            }
            Route::Transactions => {
                matches!(
                    id,
                    "transactions-page-title"
                        | "transaction-list-title"
                        | "add-transaction-page-button"
                        | "toggle-filters-button"
                        | "user-menu-trigger"
                ) || (self.filters.open
                    && matches!(
                        id,
                        "type-filter"
                            | "category-filter"
                            | "date-from-filter"
                            | "date-to-filter"
                            | "search-filter"
                    ))
                    || self.item_visible(id)
            }
            Route::Practice => matches!(
                id,
                "practice-form"
                    | "practice-first-name"
                    | "practice-last-name"
                    | "practice-email"
                    | "practice-mobile"
                    | "practice-address"
                    | "practice-submit"
            ) || (self.practice.submitted
                && matches!(id, "practice-modal" | "practice-modal-close")),
        }
    }

    fn item_visible(&self, id: &str) -> bool {
        for prefix in ["transaction-item-", "edit-transaction-", "delete-transaction-"] {
            if let Some(rest) = id.strip_prefix(prefix) {
                if let Ok(tx_id) = rest.parse::<u64>() {
                    return self.tx(tx_id).is_some();
                }
            }
        }
        for prefix in ["txdesc-", "txcat-", "txamt-"] {
            if let Some(rest) = id.strip_prefix(prefix) {
                if let Ok(tx_id) = rest.parse::<u64>() {
                    return self.tx(tx_id).is_some();
                }
            }
        }
        false
    }

    fn text_of(&self, id: &str) -> Option<String> {
        match id {
            "login-title" => Some("Вхід".to_string()),
            "register-title" => Some("Реєстрація".to_string()),
            "login-error" if self.login.failed => {
                Some("Невірний email або пароль".to_string())
            }
            "transactions-page-title" => Some("Транзакції".to_string()),
            "transaction-list-title" => Some("Список транзакцій".to_string()),
            "transaction-form-title" => self.modal.as_ref().map(|m| {
                if m.editing.is_some() {
                    "Редагувати транзакцію".to_string()
                } else {
                    "Нова транзакція".to_string()
                }
            }),
            "total-income" => Some(Self::fmt_total(self.total_income())),
            "total-expenses" => Some(Self::fmt_total(self.total_expenses())),
            "total-balance" => Some(Self::fmt_total(self.total_income() - self.total_expenses())),
            "budget-used" => Some(Self::fmt_total(self.total_expenses())),
            _ => {
                if let Some(i) = id.strip_prefix("tag-") {
                    let i = i.parse::<usize>().ok()?;
                    return self.modal.as_ref()?.tags.get(i).cloned();
                }
                if let Some(rest) = id.strip_prefix("txdesc-") {
                    return self.tx(rest.parse().ok()?).map(|t| t.description.clone());
                }
                if let Some(rest) = id.strip_prefix("txcat-") {
                    return self.tx(rest.parse().ok()?).map(|t| t.category.clone());
                }
                if let Some(rest) = id.strip_prefix("txamt-") {
                    return self.tx(rest.parse().ok()?).map(Tx::amount_text);
                }
                None
            }
        }
    }

    fn value_of(&self, id: &str) -> Option<String> {
        match id {
            "login-email-input" => Some(self.login.email.clone()),
            "login-password-input" => Some(self.login.password.clone()),
            "register-name-input" => Some(self.register.name.clone()),
            "register-email-input" => Some(self.register.email.clone()),
            "register-password-input" => Some(self.register.password.clone()),
            "register-confirm-password-input" => Some(self.register.confirm.clone()),
            "register-currency-select" => Some(self.register.currency.clone()),
            "transaction-amount-input" => self.modal.as_ref().map(|m| m.amount.clone()),
            "transaction-description-input" => self.modal.as_ref().map(|m| m.description.clone()),
            "transaction-date-input" => self.modal.as_ref().map(|m| m.date.clone()),
            "transaction-category-select" => self.modal.as_ref().map(|m| m.category.clone()),
            "transaction-account-select" => self.modal.as_ref().map(|m| m.account.clone()),
            "new-tag-input" => self.modal.as_ref().map(|m| m.tag_input.clone()),
            "type-filter" => Some(self.filters.kind.clone()),
            "category-filter" => Some(self.filters.category.clone()),
            "date-from-filter" => Some(self.filters.date_from.clone()),
            "date-to-filter" => Some(self.filters.date_to.clone()),
            "search-filter" => Some(self.filters.search.clone()),
            "practice-first-name" => Some(self.practice.first_name.clone()),
            "practice-last-name" => Some(self.practice.last_name.clone()),
            "practice-email" => Some(self.practice.email.clone()),
            "practice-mobile" => Some(self.practice.mobile.clone()),
            "practice-address" => Some(self.practice.address.clone()),
            _ => None,
        }
    }

    fn fill_id(&mut self, id: &str, value: &str) -> SuiteResult<()> {
        if !self.visible(id) {
            return Err(SuiteError::ElementMissing {
                selector: format!("testid={id}"),
            });
        }
        let value = value.to_string();
        match id {
            "login-email-input" => self.login.email = value,
            "login-password-input" => self.login.password = value,
            "register-name-input" => self.register.name = value,
            "register-email-input" => self.register.email = value,
            "register-password-input" => self.register.password = value,
            "register-confirm-password-input" => self.register.confirm = value,
            "transaction-amount-input" => self.modal_mut()?.amount = value,
            "transaction-description-input" => self.modal_mut()?.description = value,
            "transaction-date-input" => self.modal_mut()?.date = value,
            "new-tag-input" => self.modal_mut()?.tag_input = value,
            "date-from-filter" => self.filters.date_from = value,
            "date-to-filter" => self.filters.date_to = value,
            "search-filter" => self.filters.search = value,
            "practice-first-name" => self.practice.first_name = value,
            "practice-last-name" => self.practice.last_name = value,
            "practice-email" => self.practice.email = value,
            "practice-mobile" => self.practice.mobile = value,
            "practice-address" => self.practice.address = value,
            _ => {
                return Err(SuiteError::ElementMissing {
                    selector: format!("testid={id} (not fillable)"),
                })
            }
        }
        Ok(())
    }

    fn modal_mut(&mut self) -> SuiteResult<&mut ModalState> {
        self.modal.as_mut().ok_or(SuiteError::ElementMissing {
            selector: "testid=transaction-form-modal".to_string(),
        })
    }

    fn click_id(&mut self, id: &str) -> SuiteResult<()> {
        if !self.visible(id) {
            return Err(SuiteError::ElementMissing {
                selector: format!("testid={id}"),
            });
        }
        match id {
            "switch-to-register-button" => {
                self.route = Route::Register;
                self.register = RegisterState::default();
            }
            "switch-to-login-button" => self.route = Route::Login,
            "login-submit-button" => {
                let found = self
                    .users
                    .iter()
                    .find(|u| u.email == self.login.email && u.password == self.login.password)
                    .map(|u| u.id);
                if let Some(uid) = found {
                    self.session_user = Some(uid);
                    self.login.failed = false;
                    self.route = Route::Dashboard;
                } else {
                    self.login.failed = true;
                }
            }
            "register-submit-button" => self.submit_registration(),
            "nav-transactions" => self.route = Route::Transactions,
            "add-transaction-button" | "add-transaction-page-button" => {
                self.modal = Some(ModalState::fresh());
            }
            "toggle-filters-button" => self.filters.open = !self.filters.open,
            "expense-type-button" => self.set_modal_kind(TransactionType::Expense)?,
            "income-type-button" => self.set_modal_kind(TransactionType::Income)?,
            "add-tag-button" => {
                let modal = self.modal_mut()?;
                if !modal.tag_input.is_empty() {
                    modal.tags.push(std::mem::take(&mut modal.tag_input));
                }
            }
            "transaction-form-cancel" | "transaction-form-close" => self.modal = None,
            "transaction-form-submit" => self.submit_modal()?,
            "practice-submit" => {
                self.practice.submitted =
                    self.practice_email_valid() && self.practice_mobile_valid();
            }
            "practice-modal-close" => self.practice.submitted = false,
            "user-menu-trigger" => {}
            _ => {
                if let Some(i) = id.strip_prefix("remove-tag-") {
                    let i: usize = i.parse().map_err(|_| SuiteError::ElementMissing {
                        selector: format!("testid={id}"),
                    })?;
                    let modal = self.modal_mut()?;
                    if i < modal.tags.len() {
                        let _ = modal.tags.remove(i);
                    }
                    return Ok(());
                }
                if let Some(rest) = id.strip_prefix("edit-transaction-") {
                    let tx_id: u64 = rest.parse().map_err(|_| SuiteError::ElementMissing {
                        selector: format!("testid={id}"),
                    })?;
                    if let Some(tx) = self.tx(tx_id) {
                        self.modal = Some(ModalState::for_edit(tx));
                    }
                    return Ok(());
                }
                if let Some(rest) = id.strip_prefix("delete-transaction-") {
                    let tx_id: u64 = rest.parse().map_err(|_| SuiteError::ElementMissing {
                        selector: format!("testid={id}"),
                    })?;
                    self.transactions.retain(|t| t.id != tx_id);
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn set_modal_kind(&mut self, kind: TransactionType) -> SuiteResult<()> {
        let modal = self.modal_mut()?;
        if modal.kind != Some(kind) {
            modal.kind = Some(kind);
            modal.kind_set_at = Some(Instant::now());
            // Switching the type invalidates any previously chosen category.
            modal.category.clear();
        }
        Ok(())
    }

    fn submit_registration(&mut self) {
        let r = &mut self.register;
        r.email_error = !r.email.contains('@');
        // Minimum length matches the field's own placeholder hint.
        r.password_error = r.password.chars().count() < 6;
        r.confirm_error = r.password != r.confirm;
        if r.email_error || r.password_error || r.confirm_error {
            return;
        }
        let id = self.next_user_id;
        self.next_user_id += 1;
        let user = User {
            id,
            name: r.name.clone(),
            email: r.email.clone(),
            password: r.password.clone(),
            currency: if r.currency.is_empty() {
                "UAH".to_string()
            } else {
                r.currency.clone()
            },
        };
        self.users.push(user);
        self.session_user = Some(id);
        self.route = Route::Dashboard;
    }

    fn submit_modal(&mut self) -> SuiteResult<()> {
        let Some(modal) = &self.modal else {
            return Err(SuiteError::ElementMissing {
                selector: "testid=transaction-form-modal".to_string(),
            });
        };
        let Some(kind) = modal.kind else {
            // Type not chosen: the form stays open, like the real app.
            return Ok(());
        };
        let Ok(amount) = modal.amount.trim().parse::<f64>() else {
            return Ok(());
        };
        if modal.category.is_empty() || modal.description.is_empty() || modal.account.is_empty() {
            return Ok(());
        }
        let fields = (
            modal.category.clone(),
            modal.description.clone(),
            modal.date.clone(),
            modal.account.clone(),
            modal.tags.clone(),
            modal.editing,
        );
        let (category, description, date, account, tags, editing) = fields;
        match editing {
            Some(id) => {
                if let Some(tx) = self.transactions.iter_mut().find(|t| t.id == id) {
                    tx.kind = kind;
                    tx.amount = amount;
                    tx.category = category;
                    tx.description = description;
                    tx.date = date;
                    tx.account = account;
                    tx.tags = tags;
                }
            }
            None => {
                let id = self.next_tx_id;
                self.next_tx_id += 1;
                self.transactions.push(Tx {
                    id,
                    kind,
                    amount,
                    category,
                    description,
                    date,
                    account,
                    tags,
                });
            }
        }
        self.modal = None;
        Ok(())
    }

    fn practice_email_valid(&self) -> bool {
        let e = &self.practice.email;
        !e.is_empty() && e.contains('@') && e.contains('.')
    }

    fn practice_mobile_valid(&self) -> bool {
        let m = &self.practice.mobile;
        m.len() == 10 && m.chars().all(|c| c.is_ascii_digit())
    }
}

/// Mock driver simulating the FinMore application.
#[derive(Debug)]
pub struct MockFinanceApp {
    state: Mutex<AppState>,
}

impl Default for MockFinanceApp {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFinanceApp {
    /// Create a mock with instantly populated option lists
    pub fn new() -> Self {
        Self {
            state: Mutex::new(AppState::new(Duration::ZERO)),
        }
    }

    /// Create a mock whose select option lists populate only after `delay`,
    /// simulating asynchronous rendering of choice data.
    pub fn with_option_delay(delay: Duration) -> Self {
        Self {
            state: Mutex::new(AppState::new(delay)),
        }
    }

    /// Pre-register a known user without driving the registration screen
    pub fn seed_user(&self, name: &str, email: &str, password: &str) {
        let mut state = self.state.lock().unwrap();
        let id = state.next_user_id;
        state.next_user_id += 1;
        state.users.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            currency: "UAH".to_string(),
        });
    }

    /// Id of the currently logged-in user, if any
    pub fn current_user_id(&self) -> Option<u64> {
        self.state.lock().unwrap().session_user
    }

    fn resolve_id(selector: &Selector) -> SuiteResult<String> {
        match selector {
            Selector::TestId(id) => Ok(id.clone()),
            Selector::Placeholder(p) => match p.as_str() {
                "First Name" => Ok("practice-first-name".to_string()),
                "Last Name" => Ok("practice-last-name".to_string()),
                "name@example.com" => Ok("practice-email".to_string()),
                "Mobile Number" => Ok("practice-mobile".to_string()),
                "Current Address" => Ok("practice-address".to_string()),
                _ => Err(SuiteError::ElementMissing {
                    selector: selector.to_string(),
                }),
            },
            Selector::Css(css) => match css.as_str() {
                ".practice-form-wrapper" => Ok("practice-form".to_string()),
                "#submit" => Ok("practice-submit".to_string()),
                ".modal-dialog" => Ok("practice-modal".to_string()),
                "#closeLargeModal" => Ok("practice-modal-close".to_string()),
                _ => Err(SuiteError::ElementMissing {
                    selector: selector.to_string(),
                }),
            },
            Selector::Child { parent, css } => {
                let parent_id = Self::resolve_id(parent)?;
                if let Some(i) = parent_id.strip_prefix("tag-") {
                    if css.starts_with("button[data-testid^=\"remove-tag-") {
                        return Ok(format!("remove-tag-{i}"));
                    }
                }
                if let Some(tx_id) = parent_id.strip_prefix("transaction-item-") {
                    return match css.as_str() {
                        "h3" => Ok(format!("txdesc-{tx_id}")),
                        "p.text-sm" => Ok(format!("txcat-{tx_id}")),
                        "p.font-bold" => Ok(format!("txamt-{tx_id}")),
                        _ => Err(SuiteError::ElementMissing {
                            selector: selector.to_string(),
                        }),
                    };
                }
                Err(SuiteError::ElementMissing {
                    selector: selector.to_string(),
                })
            }
            Selector::TestIdPattern(_) => Err(SuiteError::ElementMissing {
                selector: selector.to_string(),
            }),
        }
    }
}

#[async_trait]
impl Driver for MockFinanceApp {
    async fn goto(&self, url: &str) -> SuiteResult<()> {
        let mut state = self.state.lock().unwrap();
        state.url = url.to_string();
        state.route = if url.contains("demoqa.com") {
            Route::Practice
        } else if state.session_user.is_some() {
            Route::Dashboard
        } else {
            Route::Login
        };
        state.modal = None;
        state.login.failed = false;
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn click(&self, selector: &Selector) -> SuiteResult<()> {
        let id = Self::resolve_id(selector)?;
        self.state.lock().unwrap().click_id(&id)
    }

    async fn fill(&self, selector: &Selector, value: &str) -> SuiteResult<()> {
        let id = Self::resolve_id(selector)?;
        self.state.lock().unwrap().fill_id(&id, value)
    }

    async fn input_value(&self, selector: &Selector) -> SuiteResult<String> {
        let id = Self::resolve_id(selector)?;
        self.state
            .lock()
            .unwrap()
            .value_of(&id)
            .ok_or(SuiteError::ElementMissing {
                selector: selector.to_string(),
            })
    }

    async fn text_content(&self, selector: &Selector) -> SuiteResult<Option<String>> {
        let id = Self::resolve_id(selector)?;
        Ok(self.state.lock().unwrap().text_of(&id))
    }

    async fn is_visible(&self, selector: &Selector) -> SuiteResult<bool> {
        match Self::resolve_id(selector) {
            Ok(id) => Ok(self.state.lock().unwrap().visible(&id)),
            Err(_) => Ok(false),
        }
    }

    async fn is_enabled(&self, selector: &Selector) -> SuiteResult<bool> {
        let id = Self::resolve_id(selector)?;
        let state = self.state.lock().unwrap();
        if id == "transaction-category-select" {
            return Ok(state.modal.as_ref().is_some_and(|m| m.kind.is_some()));
        }
        Ok(state.visible(&id))
    }

    async fn validity_valid(&self, selector: &Selector) -> SuiteResult<bool> {
        let id = Self::resolve_id(selector)?;
        let state = self.state.lock().unwrap();
        Ok(match id.as_str() {
            "practice-email" => state.practice_email_valid(),
            "practice-mobile" => state.practice_mobile_valid(),
            "login-email-input" => {
                !state.login.email.is_empty() && state.login.email.contains('@')
            }
            "register-email-input" => {
                !state.register.email.is_empty() && state.register.email.contains('@')
            }
            _ => true,
        })
    }

    async fn validation_message(&self, selector: &Selector) -> SuiteResult<String> {
        if self.validity_valid(selector).await? {
            return Ok(String::new());
        }
        let id = Self::resolve_id(selector)?;
        let state = self.state.lock().unwrap();
        let empty = state.value_of(&id).map_or(true, |v| v.is_empty());
        Ok(if empty {
            "Please fill out this field".to_string()
        } else {
            "Please enter a valid value".to_string()
        })
    }

    async fn option_values(&self, selector: &Selector) -> SuiteResult<Vec<String>> {
        let id = Self::resolve_id(selector)?;
        let state = self.state.lock().unwrap();
        Ok(match id.as_str() {
            "transaction-category-select" => state.category_options(),
            "transaction-account-select" => state.account_options(),
            "register-currency-select" => {
                let mut out = vec!["Оберіть валюту".to_string()];
                out.extend(CURRENCIES.iter().map(|s| (*s).to_string()));
                out
            }
            "type-filter" => vec!["all", "income", "expense"]
                .into_iter()
                .map(String::from)
                .collect(),
            "category-filter" => {
                let mut out = vec!["all".to_string()];
                out.extend(EXPENSE_CATEGORIES.iter().map(|s| (*s).to_string()));
                out.extend(INCOME_CATEGORIES.iter().map(|s| (*s).to_string()));
                out
            }
            _ => Vec::new(),
        })
    }

    async fn select_option(&self, selector: &Selector, value: &str) -> SuiteResult<()> {
        let options = self.option_values(selector).await?;
        if !options.iter().any(|v| v == value) {
            return Err(SuiteError::AssertionFailed {
                message: format!("no option with value \"{value}\" in {selector}"),
            });
        }
        let id = Self::resolve_id(selector)?;
        let mut state = self.state.lock().unwrap();
        match id.as_str() {
            "transaction-category-select" => state.modal_mut()?.category = value.to_string(),
            "transaction-account-select" => state.modal_mut()?.account = value.to_string(),
            "register-currency-select" => state.register.currency = value.to_string(),
            "type-filter" => state.filters.kind = value.to_string(),
            "category-filter" => state.filters.category = value.to_string(),
            _ => {
                return Err(SuiteError::ElementMissing {
                    selector: selector.to_string(),
                })
            }
        }
        Ok(())
    }

    async fn count(&self, selector: &Selector) -> SuiteResult<usize> {
        let state = self.state.lock().unwrap();
        match selector {
            Selector::TestIdPattern(prefix) => match prefix.as_str() {
                "tag-" => Ok(state.modal.as_ref().map_or(0, |m| m.tags.len())),
                "transaction-item-" => Ok(state.transactions.len()),
                _ => Ok(0),
            },
            _ => {
                drop(state);
                Ok(usize::from(self.is_visible(selector).await?))
            }
        }
    }

    async fn test_ids_matching(&self, prefix: &str) -> SuiteResult<Vec<String>> {
        let state = self.state.lock().unwrap();
        match prefix {
            "transaction-item-" => Ok(state
                .transactions
                .iter()
                .map(|t| format!("transaction-item-{}", t.id))
                .collect()),
            "tag-" => Ok(state
                .modal
                .as_ref()
                .map(|m| (0..m.tags.len()).map(|i| format!("tag-{i}")).collect())
                .unwrap_or_default()),
            _ => Ok(Vec::new()),
        }
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> SuiteResult<Option<String>> {
        let id = Self::resolve_id(selector)?;
        let state = self.state.lock().unwrap();
        if !state.visible(&id) {
            return Ok(None);
        }
        Ok(match name {
            "data-testid" => Some(id),
            "placeholder" => match id.as_str() {
                "practice-first-name" => Some("First Name".to_string()),
                "practice-last-name" => Some("Last Name".to_string()),
                "practice-email" => Some("name@example.com".to_string()),
                "practice-mobile" => Some("Mobile Number".to_string()),
                "practice-address" => Some("Current Address".to_string()),
                "register-name-input" => Some("Іван Петренко".to_string()),
                "register-email-input" => Some("your@email.com".to_string()),
                "register-password-input" => Some("Мінімум 6 символів".to_string()),
                "register-confirm-password-input" => Some("Повторіть пароль".to_string()),
                _ => None,
            },
            _ => None,
        })
    }

    async fn set_local_storage(&self, key: &str, value: &str) -> SuiteResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .local_storage
            .insert(key.to_string(), value.to_string());
        if key.starts_with("transactions_") {
            state.load_seeded_transactions(value);
        }
        Ok(())
    }

    async fn local_storage(&self, key: &str) -> SuiteResult<Option<String>> {
        Ok(self.state.lock().unwrap().local_storage.get(key).cloned())
    }

    async fn storage_state(&self) -> SuiteResult<StorageState> {
        let state = self.state.lock().unwrap();
        let mut cookies = Vec::new();
        if let Some(uid) = state.session_user {
            if let Some(user) = state.users.iter().find(|u| u.id == uid) {
                cookies.push(Cookie {
                    name: SESSION_COOKIE.to_string(),
                    value: user.email.clone(),
                    domain: "finmore.netlify.app".to_string(),
                    path: "/".to_string(),
                });
            }
        }
        Ok(StorageState {
            cookies,
            origins: vec![OriginStorage {
                origin: crate::browser::DEFAULT_BASE_URL.to_string(),
                local_storage: state.local_storage.clone(),
            }],
        })
    }

    async fn restore_storage_state(&self, snapshot: &StorageState) -> SuiteResult<()> {
        let mut state = self.state.lock().unwrap();
        for origin in &snapshot.origins {
            for (k, v) in &origin.local_storage {
                state.local_storage.insert(k.clone(), v.clone());
                if k.starts_with("transactions_") {
                    state.load_seeded_transactions(v);
                }
            }
        }
        if let Some(cookie) = snapshot.cookies.iter().find(|c| c.name == SESSION_COOKIE) {
            let existing = state.users.iter().find(|u| u.email == cookie.value).map(|u| u.id);
            let uid = existing.unwrap_or_else(|| {
                let id = state.next_user_id;
                state.next_user_id += 1;
                state.users.push(User {
                    id,
                    name: String::new(),
                    email: cookie.value.clone(),
                    password: String::new(),
                    currency: "UAH".to_string(),
                });
                id
            });
            state.session_user = Some(uid);
            if state.route == Route::Login {
                state.route = Route::Dashboard;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_flow_toggles_routes() {
        let app = MockFinanceApp::new();
        app.seed_user("Оля", "olya@test.ua", "pass123");
        app.goto("https://finmore.netlify.app/").await.unwrap();

        assert!(app
            .is_visible(&Selector::test_id("login-email-input"))
            .await
            .unwrap());
        app.fill(&Selector::test_id("login-email-input"), "olya@test.ua")
            .await
            .unwrap();
        app.fill(&Selector::test_id("login-password-input"), "pass123")
            .await
            .unwrap();
        app.click(&Selector::test_id("login-submit-button"))
            .await
            .unwrap();
        assert!(app
            .is_visible(&Selector::test_id("user-menu-trigger"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_wrong_credentials_show_error() {
        let app = MockFinanceApp::new();
        app.goto("https://finmore.netlify.app/").await.unwrap();
        app.fill(&Selector::test_id("login-email-input"), "ghost@test.ua")
            .await
            .unwrap();
        app.fill(&Selector::test_id("login-password-input"), "nope")
            .await
            .unwrap();
        app.click(&Selector::test_id("login-submit-button"))
            .await
            .unwrap();
        assert!(app
            .is_visible(&Selector::test_id("login-error"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_category_options_follow_type() {
        let app = MockFinanceApp::new();
        app.seed_user("n", "e@x.ua", "p");
        app.goto("https://finmore.netlify.app/").await.unwrap();
        app.fill(&Selector::test_id("login-email-input"), "e@x.ua")
            .await
            .unwrap();
        app.fill(&Selector::test_id("login-password-input"), "p")
            .await
            .unwrap();
        app.click(&Selector::test_id("login-submit-button"))
            .await
            .unwrap();
        app.click(&Selector::test_id("add-transaction-button"))
            .await
            .unwrap();

        let select = Selector::test_id("transaction-category-select");
        // Placeholder only until a type is chosen.
        assert_eq!(app.option_values(&select).await.unwrap().len(), 1);

        app.click(&Selector::test_id("income-type-button"))
            .await
            .unwrap();
        let options = app.option_values(&select).await.unwrap();
        assert!(options.iter().any(|o| o == "Зарплата"));
        assert!(!options.iter().any(|o| o == "Продукти"));

        // Switching type clears the category and swaps the value-space.
        app.select_option(&select, "Зарплата").await.unwrap();
        app.click(&Selector::test_id("expense-type-button"))
            .await
            .unwrap();
        assert_eq!(app.input_value(&select).await.unwrap(), "");
        let options = app.option_values(&select).await.unwrap();
        assert!(options.iter().any(|o| o == "Продукти"));
    }

    #[tokio::test]
    async fn test_click_on_absent_element_fails() {
        let app = MockFinanceApp::new();
        app.goto("https://finmore.netlify.app/").await.unwrap();
        // Dashboard-only control on the login screen.
        let err = app
            .click(&Selector::test_id("add-transaction-button"))
            .await
            .unwrap_err();
        assert!(matches!(err, SuiteError::ElementMissing { .. }));
    }
}
