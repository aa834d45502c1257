//! Persistence behind a key-value interface
//!
//! Each collection is stored as JSON text under its own key:
//! - `transactions` - `Vec<Transaction>`
//! - `categories` - `Vec<CategoryDefinition>`
//! - `savingsGoals` - `Vec<SavingsGoal>`
//! - `monthlyBudget` - a single number
//!
//! Backends only move strings; the typed load/save methods on [`Storage`]
//! handle (de)serialization so every backend stores the same layout.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::models::{CategoryDefinition, SavingsGoal, Transaction};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{SqliteStorage, DB_KEY_ENV};

/// Storage key for the transaction list
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Storage key for the category list
pub const CATEGORIES_KEY: &str = "categories";
/// Storage key for the savings goal list
pub const GOALS_KEY: &str = "savingsGoals";
/// Storage key for the monthly budget
pub const BUDGET_KEY: &str = "monthlyBudget";

/// Durable key-value store holding JSON text
pub trait Storage: Send + Sync {
    /// Raw value for a key, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace one key
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write several keys as one unit
    ///
    /// Either every entry is stored or none is.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>> {
        read_json(self, TRANSACTIONS_KEY)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.set(TRANSACTIONS_KEY, &serde_json::to_string(transactions)?)
    }

    fn load_categories(&self) -> Result<Option<Vec<CategoryDefinition>>> {
        read_json(self, CATEGORIES_KEY)
    }

    fn save_categories(&self, categories: &[CategoryDefinition]) -> Result<()> {
        self.set(CATEGORIES_KEY, &serde_json::to_string(categories)?)
    }

    fn load_goals(&self) -> Result<Option<Vec<SavingsGoal>>> {
        read_json(self, GOALS_KEY)
    }

    fn save_goals(&self, goals: &[SavingsGoal]) -> Result<()> {
        self.set(GOALS_KEY, &serde_json::to_string(goals)?)
    }

    fn load_budget(&self) -> Result<Option<f64>> {
        read_json(self, BUDGET_KEY)
    }

    fn save_budget(&self, budget: f64) -> Result<()> {
        self.set(BUDGET_KEY, &serde_json::to_string(&budget)?)
    }

    /// Persist categories and transactions together
    fn save_categories_and_transactions(
        &self,
        categories: &[CategoryDefinition],
        transactions: &[Transaction],
    ) -> Result<()> {
        self.set_many(&[
            (CATEGORIES_KEY, to_json(categories)?),
            (TRANSACTIONS_KEY, to_json(transactions)?),
        ])
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}
