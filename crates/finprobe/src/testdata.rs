//! Shared vocabulary for the suites: fixed term tables plus random identity
//! generation for registration flows.

use crate::pages::transaction_modal::TransactionForm;
use crate::pages::transactions::TransactionQuery;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Terms exercised on the dashboard
pub mod dashboard {
    use super::TransactionForm;

    pub const EXPECTED_TOTAL_INCOME: &str = "20000.00 UAH";
    pub const EXPECTED_TOTAL_EXPENSES: &str = "13000.00 UAH";
    pub const EXPECTED_BALANCE: &str = "10000.00 UAH";

    pub fn income_1() -> TransactionForm {
        TransactionForm::income("15000", "Інвестиції", "Продаж акцій", "2025-12-02", "Картка ПриватБанку")
    }

    pub fn income_2() -> TransactionForm {
        TransactionForm::income("5000", "Фриланс", "Проект", "2025-12-02", "Картка ПриватБанку")
    }

    pub fn expense_1() -> TransactionForm {
        TransactionForm::expense("500", "Транспорт", "Таксі", "2025-12-01", "Картка Монобанку")
    }

    pub fn expense_2() -> TransactionForm {
        TransactionForm::expense("12500", "Продукти", "Покупка продуктів", "2025-12-01", "Картка Монобанку")
    }

    pub fn expense_3() -> TransactionForm {
        TransactionForm::expense("5000", "Продукти", "Покупка продуктів", "2025-12-01", "Картка Монобанку")
    }
}

/// Terms exercised on the transactions page
pub mod transactions {
    use super::{TransactionForm, TransactionQuery};

    pub fn tagged_expense() -> TransactionForm {
        TransactionForm::expense("1000", "Продукти", "Вино", "2025-11-26", "Картка Монобанку")
            .with_tags(["Алкоголь"])
    }

    pub fn tagged_income() -> TransactionForm {
        TransactionForm::income("1000000", "Зарплата", "Листопад", "2025-11-26", "Готівка")
            .with_tags(["Зарплата"])
    }

    /// Starting point for the edit/delete flows
    pub fn initial() -> TransactionForm {
        TransactionForm::expense("2000", "Транспорт", "Таксі до аеропорту", "2025-11-26", "Картка Монобанку")
    }

    /// The same transaction after editing
    pub fn edited() -> TransactionForm {
        TransactionForm::expense(
            "2500",
            "Транспорт",
            "Таксі до аеропорту (оновлено)",
            "2025-11-26",
            "Картка Монобанку",
        )
    }

    pub fn query_of(form: &TransactionForm) -> TransactionQuery {
        TransactionQuery::new(&form.amount, &form.category, &form.description)
    }
}

/// Terms for the registration screen
pub mod registration {
    pub const TITLE: &str = "Реєстрація";
    pub const PASSWORD: &str = "Password123";
    pub const SHORT_PASSWORD: &str = "Pass";
    pub const CURRENCIES: [&str; 4] = ["UAH", "USD", "EUR", "GBP"];

    pub const PLACEHOLDER_FULL_NAME: &str = "Іван Петренко";
    pub const PLACEHOLDER_EMAIL: &str = "your@email.com";
    pub const PLACEHOLDER_PASSWORD: &str = "Мінімум 6 символів";
    pub const PLACEHOLDER_CONFIRM_PASSWORD: &str = "Повторіть пароль";
}

/// Terms for the practice form
pub mod practice {
    pub const FIRST_NAME: &str = "John";
    pub const LAST_NAME: &str = "Doe";
    pub const EMAIL: &str = "john.doe@example.com";
    pub const INVALID_EMAIL: &str = "invalid-email";
    pub const MOBILE: &str = "1234567890";
    pub const INVALID_MOBILE: &str = "12345";
    pub const ADDRESS: &str = "123 Main St, Springfield, USA";
}

/// Terms for the WordPress API suite
pub mod wordpress {
    pub const INITIAL_TITLE: &str = "Test Post from Suite";
    pub const INITIAL_CONTENT: &str = "<p>Test content for the API suite.</p>";
    pub const INITIAL_EXCERPT: &str = "Test excerpt";
    pub const UPDATED_TITLE: &str = "Updated Title from Suite";
    pub const NONEXISTENT_POST_ID: u64 = 999_999;
    pub const POSTS_PER_PAGE: u32 = 10;
}

const FIRST_NAMES: [&str; 15] = [
    "Олег", "Іван", "Петро", "Андрій", "Михайло", "Василь", "Сергій", "Юрій", "Тарас", "Богдан",
    "Роман", "Дмитро", "Максим", "Олексій", "Володимир",
];

const SURNAMES: [&str; 15] = [
    "Ляшко", "Шевченко", "Франко", "Коваленко", "Бондаренко", "Ткаченко", "Кравченко", "Олійник",
    "Шевчук", "Поліщук", "Савченко", "Петренко", "Кличко", "Порошенко", "Зеленський",
];

const PASSWORD_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Today's date in the `YYYY-MM-DD` form the date inputs accept
pub fn recent_date() -> String {
    chrono::Utc::now().date_naive().to_string()
}

/// Unique email for a throwaway registration
pub fn random_email() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix: String = (0..6)
        .map(|_| {
            let n = rand::thread_rng().gen_range(0..36u32);
            char::from_digit(n, 36).unwrap_or('0')
        })
        .collect();
    format!("testuser+{timestamp}{suffix}@gmail.com")
}

/// Random Ukrainian full name
pub fn random_full_name() -> String {
    let mut rng = rand::thread_rng();
    let name = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Іван");
    let surname = SURNAMES.choose(&mut rng).copied().unwrap_or("Петренко");
    format!("{name} {surname}")
}

/// Random password of the given length
pub fn random_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let i = rng.gen_range(0..PASSWORD_CHARS.len());
            char::from(PASSWORD_CHARS[i])
        })
        .collect()
}
