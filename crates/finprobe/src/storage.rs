//! Seed data and persisted session state.
//!
//! Two storage channels exist: the `transactions_{userId}` localStorage key
//! used to seed CRUD fixtures without driving the UI, and the storage-state
//! snapshot file (cookies + origin-scoped storage) written once by the setup
//! routine and consumed read-only by authenticated test sessions.

use crate::driver::Driver;
use crate::result::SuiteResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money out
    Expense,
    /// Money in
    Income,
}

/// Pre-persistence transaction input. The id is assigned at seed time and
/// the type defaults to expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSeed {
    /// Amount as the string a user would type; must parse numerically
    pub amount: String,
    /// Category label
    pub category: String,
    /// Free-text description
    pub description: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Account label
    pub account: String,
    /// Direction, defaulting to expense when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    /// Tags in insertion order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Persisted form of a transaction, as the application stores it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Direction
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Numeric amount
    pub amount: f64,
    /// Category label
    pub category: String,
    /// Free-text description
    pub description: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Account label
    pub account: String,
    /// Tags in insertion order
    pub tags: Vec<String>,
    /// Server-assigned id, unique per seeded batch
    pub id: String,
}

/// Build a transaction record from seed data and a runtime id.
///
/// Fails when the seed amount is not numerically convertible.
pub fn build_transaction_from_seed(
    seed_id: impl Into<String>,
    seed: &TransactionSeed,
) -> SuiteResult<TransactionRecord> {
    let amount = seed.amount.trim().parse::<f64>().map_err(|e| {
        crate::SuiteError::AssertionFailed {
            message: format!("seed amount \"{}\" is not numeric: {e}", seed.amount),
        }
    })?;
    Ok(TransactionRecord {
        kind: seed.kind.unwrap_or(TransactionType::Expense),
        amount,
        category: seed.category.clone(),
        description: seed.description.clone(),
        date: seed.date.clone(),
        account: seed.account.clone(),
        tags: seed.tags.clone().unwrap_or_default(),
        id: seed_id.into(),
    })
}

/// Fresh unique id for a seeded transaction
pub fn random_seed_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// localStorage key holding a user's transaction list
pub fn transactions_key(user_id: &str) -> String {
    format!("transactions_{user_id}")
}

/// Seed localStorage with the provided transactions for a user, bypassing
/// the UI. Returns the key that was written.
pub async fn seed_transactions(
    driver: &dyn Driver,
    user_id: &str,
    transactions: &[TransactionRecord],
) -> SuiteResult<String> {
    let key = transactions_key(user_id);
    let value = serde_json::to_string(transactions)?;
    driver.set_local_storage(&key, &value).await?;
    tracing::info!(key = %key, count = transactions.len(), "seeded transactions");
    Ok(key)
}

/// One browser cookie in a storage snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Cookie domain
    pub domain: String,
    /// Cookie path
    pub path: String,
}

/// Per-origin localStorage contents
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OriginStorage {
    /// Origin URL
    pub origin: String,
    /// Key/value pairs for that origin
    pub local_storage: HashMap<String, String>,
}

/// A serialized snapshot of cookies and per-origin storage representing a
/// logged-in session.
///
/// Produced once by the setup routine; readers must treat the file as
/// immutable within a run. Regenerate it whenever the target application's
/// auth mechanism or seed user changes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StorageState {
    /// All cookies
    pub cookies: Vec<Cookie>,
    /// Storage per origin
    pub origins: Vec<OriginStorage>,
}

impl StorageState {
    /// Write the snapshot as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> SuiteResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "saved storage state");
        Ok(())
    }

    /// Load a snapshot previously written by [`StorageState::save`].
    pub fn load(path: &Path) -> SuiteResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> TransactionSeed {
        TransactionSeed {
            amount: "2000".to_string(),
            category: "Транспорт".to_string(),
            description: "Таксі до аеропорту".to_string(),
            date: "2025-11-26".to_string(),
            account: "Картка Монобанку".to_string(),
            kind: None,
            tags: None,
        }
    }

    #[test]
    fn test_seed_defaults_to_expense() {
        let record = build_transaction_from_seed("1", &seed()).unwrap();
        assert_eq!(record.kind, TransactionType::Expense);
        assert!((record.amount - 2000.0).abs() < f64::EPSILON);
        assert!(record.tags.is_empty());
        assert_eq!(record.id, "1");
    }

    #[test]
    fn test_seed_rejects_non_numeric_amount() {
        let mut s = seed();
        s.amount = "дві тисячі".to_string();
        assert!(build_transaction_from_seed("1", &s).is_err());
    }

    #[test]
    fn test_record_serializes_type_field() {
        let record = build_transaction_from_seed("7", &seed()).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        assert!(json.contains("\"id\":\"7\""));
    }

    #[test]
    fn test_transactions_key() {
        assert_eq!(transactions_key("user-42"), "transactions_user-42");
    }

    #[test]
    fn test_storage_state_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage").join("auth.json");

        let mut origin = OriginStorage {
            origin: "https://finmore.netlify.app".to_string(),
            local_storage: HashMap::new(),
        };
        origin
            .local_storage
            .insert("session".to_string(), "abc".to_string());
        let state = StorageState {
            cookies: vec![Cookie {
                name: "sid".to_string(),
                value: "s3cr3t".to_string(),
                domain: "finmore.netlify.app".to_string(),
                path: "/".to_string(),
            }],
            origins: vec![origin],
        };

        state.save(&path).unwrap();
        let loaded = StorageState::load(&path).unwrap();
        assert_eq!(loaded, state);
    }
}
