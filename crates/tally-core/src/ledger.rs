//! The ledger: owner of every stored collection
//!
//! `Ledger` holds transactions, categories, savings goals and the monthly
//! budget in memory and writes each change through to its [`Storage`]. A
//! mutation is persisted before it is committed in memory, so a failed write
//! leaves the in-memory state unchanged.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::filter::{FilteredView, TransactionFilter};
use crate::models::{
    default_categories, CategoryDefinition, CategoryIcon, DashboardSnapshot, NewSavingsGoal,
    NewTransaction, SavingsGoal, Transaction, TransactionType, DEFAULT_DESCRIPTION, GOAL_COLORS,
    INCOME_CATEGORY_ID, OTHER_CATEGORY_ID,
};
use crate::months::{available_months, MonthKey};
use crate::stats::build_dashboard;
use crate::store::Storage;

/// In-memory ledger backed by a storage implementation
pub struct Ledger<S: Storage> {
    storage: S,
    transactions: Vec<Transaction>,
    categories: Vec<CategoryDefinition>,
    goals: Vec<SavingsGoal>,
    monthly_budget: f64,
}

/// Canonical text form for stored timestamps, e.g. `2026-10-18T09:30:00.000Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn require_finite(value: f64, what: &str) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidData(format!("{} must be a number", what)))
    }
}

fn validate_goal(goal: &NewSavingsGoal) -> Result<()> {
    if goal.title.trim().is_empty() {
        return Err(Error::InvalidData("Goal title cannot be empty".to_string()));
    }
    require_finite(goal.target_amount, "Goal target")?;
    require_finite(goal.current_amount, "Goal amount")?;
    if goal.target_amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Goal target must be greater than zero, got {}",
            goal.target_amount
        )));
    }
    if goal.current_amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "Goal amount cannot be negative, got {}",
            goal.current_amount
        )));
    }
    Ok(())
}

impl<S: Storage> Ledger<S> {
    /// Load every collection, seeding absent keys
    ///
    /// A stored value that cannot be decoded is an error; nothing is seeded
    /// over it.
    pub fn load(storage: S, default_budget: f64) -> Result<Self> {
        let transactions = storage.load_transactions()?.unwrap_or_default();
        let categories = storage
            .load_categories()?
            .unwrap_or_else(default_categories);
        let goals = storage.load_goals()?.unwrap_or_default();
        let monthly_budget = storage.load_budget()?.unwrap_or(default_budget);

        info!(
            transactions = transactions.len(),
            categories = categories.len(),
            goals = goals.len(),
            "Loaded ledger"
        );

        Ok(Self {
            storage,
            transactions,
            categories,
            goals,
            monthly_budget,
        })
    }

    /// Write every collection, including seeded defaults
    pub fn persist_all(&self) -> Result<()> {
        self.storage.save_transactions(&self.transactions)?;
        self.storage.save_categories(&self.categories)?;
        self.storage.save_goals(&self.goals)?;
        self.storage.save_budget(self.monthly_budget)?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Transactions, newest additions first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn monthly_budget(&self) -> f64 {
        self.monthly_budget
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn goal(&self, id: &str) -> Option<&SavingsGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Categories an expense may use (everything except Income)
    pub fn expense_categories(&self) -> Vec<&CategoryDefinition> {
        self.categories
            .iter()
            .filter(|c| c.id != INCOME_CATEGORY_ID)
            .collect()
    }

    // ========== Transactions ==========

    fn validate_transaction(&self, tx: &NewTransaction) -> Result<()> {
        require_finite(tx.amount, "Amount")?;
        if tx.amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Amount must be greater than zero, got {}",
                tx.amount
            )));
        }
        if self.category(&tx.category).is_none() {
            return Err(Error::NotFound(format!("Category {}", tx.category)));
        }
        if tx.kind == TransactionType::Expense && tx.category == INCOME_CATEGORY_ID {
            return Err(Error::InvalidData("An expense cannot use the Income category".into()));
        }
        Ok(())
    }

    fn description_or_default(description: &str) -> String {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            DEFAULT_DESCRIPTION.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Record a new transaction; it is placed first in the list
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        self.validate_transaction(&new)?;

        let date = new.date.unwrap_or_else(Utc::now);
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            amount: new.amount,
            kind: new.kind,
            category: new.category,
            description: Self::description_or_default(&new.description),
            date: format_timestamp(&date),
            receipt_image: new.receipt_image,
        };

        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(transaction.clone());
        next.extend(self.transactions.iter().cloned());
        self.storage.save_transactions(&next)?;
        self.transactions = next;

        info!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = transaction.amount,
            "Added transaction"
        );
        Ok(transaction)
    }

    /// Replace a transaction's fields; the date is kept unless one is given
    pub fn edit_transaction(&mut self, id: &str, update: NewTransaction) -> Result<Transaction> {
        self.validate_transaction(&update)?;
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;

        let existing = &self.transactions[index];
        let updated = Transaction {
            id: existing.id.clone(),
            amount: update.amount,
            kind: update.kind,
            category: update.category,
            description: Self::description_or_default(&update.description),
            date: update
                .date
                .map(|d| format_timestamp(&d))
                .unwrap_or_else(|| existing.date.clone()),
            receipt_image: update.receipt_image,
        };

        let mut next = self.transactions.clone();
        next[index] = updated.clone();
        self.storage.save_transactions(&next)?;
        self.transactions = next;

        info!(id, "Updated transaction");
        Ok(updated)
    }

    pub fn delete_transaction(&mut self, id: &str) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;

        let mut next = self.transactions.clone();
        let removed = next.remove(index);
        self.storage.save_transactions(&next)?;
        self.transactions = next;

        info!(id, "Deleted transaction");
        Ok(removed)
    }

    // ========== Categories ==========

    fn clean_category_name(name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name cannot be empty".to_string()));
        }
        Ok(name.to_string())
    }

    fn custom_category_index(&self, id: &str) -> Result<usize> {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("Category {}", id)))?;
        if self.categories[index].is_system {
            return Err(Error::ProtectedCategory(self.categories[index].name.clone()));
        }
        Ok(index)
    }

    /// Append a user category
    pub fn add_category(&mut self, name: &str, icon: CategoryIcon) -> Result<CategoryDefinition> {
        let category = CategoryDefinition {
            id: format!("cat-{}", Uuid::new_v4()),
            name: Self::clean_category_name(name)?,
            icon_name: icon.as_str().to_string(),
            is_system: false,
        };

        let mut next = self.categories.clone();
        next.push(category.clone());
        self.storage.save_categories(&next)?;
        self.categories = next;

        info!(id = %category.id, name = %category.name, "Added category");
        Ok(category)
    }

    /// Rename a user category, optionally changing its icon
    pub fn rename_category(
        &mut self,
        id: &str,
        name: &str,
        icon: Option<CategoryIcon>,
    ) -> Result<CategoryDefinition> {
        let index = self.custom_category_index(id)?;
        let name = Self::clean_category_name(name)?;

        let mut next = self.categories.clone();
        next[index].name = name;
        if let Some(icon) = icon {
            next[index].icon_name = icon.as_str().to_string();
        }
        let updated = next[index].clone();
        self.storage.save_categories(&next)?;
        self.categories = next;

        info!(id, name = %updated.name, "Updated category");
        Ok(updated)
    }

    /// Delete a user category, moving its transactions to "Other"
    ///
    /// Both collections are written together. Returns how many transactions
    /// were reassigned.
    pub fn delete_category(&mut self, id: &str) -> Result<usize> {
        let index = self.custom_category_index(id)?;

        let mut categories = self.categories.clone();
        categories.remove(index);

        let mut reassigned = 0;
        let mut transactions = self.transactions.clone();
        for t in transactions.iter_mut().filter(|t| t.category == id) {
            t.category = OTHER_CATEGORY_ID.to_string();
            reassigned += 1;
        }

        self.storage
            .save_categories_and_transactions(&categories, &transactions)?;
        self.categories = categories;
        self.transactions = transactions;

        info!(id, reassigned, "Deleted category");
        Ok(reassigned)
    }

    // ========== Savings Goals ==========

    pub fn add_goal(&mut self, new: NewSavingsGoal) -> Result<SavingsGoal> {
        validate_goal(&new)?;

        let goal = SavingsGoal {
            id: Uuid::new_v4().to_string(),
            title: new.title.trim().to_string(),
            target_amount: new.target_amount,
            current_amount: new.current_amount,
            color: GOAL_COLORS[self.goals.len() % GOAL_COLORS.len()].to_string(),
        };

        let mut next = self.goals.clone();
        next.push(goal.clone());
        self.storage.save_goals(&next)?;
        self.goals = next;

        info!(id = %goal.id, title = %goal.title, "Added savings goal");
        Ok(goal)
    }

    /// Replace a goal's title and amounts; the color is kept
    pub fn edit_goal(&mut self, id: &str, update: NewSavingsGoal) -> Result<SavingsGoal> {
        validate_goal(&update)?;
        self.update_goal(id, |goal| {
            goal.title = update.title.trim().to_string();
            goal.target_amount = update.target_amount;
            goal.current_amount = update.current_amount;
        })
    }

    /// Add (or, when negative, withdraw) an amount; the balance never drops below zero
    pub fn add_funds(&mut self, id: &str, amount: f64) -> Result<SavingsGoal> {
        require_finite(amount, "Amount")?;
        self.update_goal(id, |goal| {
            goal.current_amount = (goal.current_amount + amount).max(0.0);
        })
    }

    fn update_goal(
        &mut self,
        id: &str,
        apply: impl FnOnce(&mut SavingsGoal),
    ) -> Result<SavingsGoal> {
        let index = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| Error::NotFound(format!("Savings goal {}", id)))?;

        let mut next = self.goals.clone();
        apply(&mut next[index]);
        let updated = next[index].clone();
        self.storage.save_goals(&next)?;
        self.goals = next;

        info!(id, current = updated.current_amount, "Updated savings goal");
        Ok(updated)
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<SavingsGoal> {
        let index = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| Error::NotFound(format!("Savings goal {}", id)))?;

        let mut next = self.goals.clone();
        let removed = next.remove(index);
        self.storage.save_goals(&next)?;
        self.goals = next;

        info!(id, "Deleted savings goal");
        Ok(removed)
    }

    // ========== Budget ==========

    pub fn set_budget(&mut self, amount: f64) -> Result<()> {
        require_finite(amount, "Budget")?;
        if amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Budget cannot be negative, got {}",
                amount
            )));
        }
        self.storage.save_budget(amount)?;
        self.monthly_budget = amount;
        info!(amount, "Set monthly budget");
        Ok(())
    }

    // ========== Derived views ==========

    /// Dashboard figures for the month containing `now`
    pub fn dashboard(&self, now: &DateTime<Utc>) -> DashboardSnapshot {
        build_dashboard(
            &self.transactions,
            &self.categories,
            &self.goals,
            self.monthly_budget,
            now,
        )
    }

    /// Filtered history with totals and summary
    pub fn history(&self, filter: &TransactionFilter) -> FilteredView {
        let view = filter.view(&self.transactions, &self.categories);
        debug!(matched = view.stats.count, summary = %view.summary, "Filtered history");
        view
    }

    /// Months available to the history month filter
    pub fn available_months(&self, now: &DateTime<Utc>) -> Vec<MonthKey> {
        available_months(&self.transactions, now)
    }
}
