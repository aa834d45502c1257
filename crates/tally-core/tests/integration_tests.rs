//! Integration tests for tally-core
//!
//! These tests run the ledger against the SQLite store and check the derived
//! views end to end.

use chrono::{DateTime, TimeZone, Utc};
use tally_core::{
    export::export_transactions_csv,
    models::{
        CategoryIcon, NewSavingsGoal, NewTransaction, TransactionType, DEFAULT_MONTHLY_BUDGET,
        INCOME_CATEGORY_ID, OTHER_CATEGORY_ID,
    },
    stats::TREND_WINDOW_MONTHS,
    Ledger, SqliteStorage, Storage, TransactionFilter,
};

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn open_plain(path: &str) -> Ledger<SqliteStorage> {
    Ledger::load(SqliteStorage::new_unencrypted(path).unwrap(), DEFAULT_MONTHLY_BUDGET).unwrap()
}

fn entry(
    amount: f64,
    kind: TransactionType,
    category: &str,
    description: &str,
    date: DateTime<Utc>,
) -> NewTransaction {
    NewTransaction {
        amount,
        kind,
        category: category.to_string(),
        description: description.to_string(),
        date: Some(date),
        receipt_image: None,
    }
}

/// A semester of student spending across three months
fn seeded_ledger() -> Ledger<SqliteStorage> {
    let storage = SqliteStorage::in_memory().expect("Failed to create ledger store");
    let mut ledger = Ledger::load(storage, DEFAULT_MONTHLY_BUDGET).expect("Failed to load ledger");

    let rows = [
        (15000.0, TransactionType::Income, INCOME_CATEGORY_ID, "Stipend", at(2026, 8, 1)),
        (6000.0, TransactionType::Expense, "cat-rent", "Hostel rent", at(2026, 8, 3)),
        (450.0, TransactionType::Expense, "cat-food", "Coffee with friends", at(2026, 8, 20)),
        (15000.0, TransactionType::Income, INCOME_CATEGORY_ID, "Stipend", at(2026, 9, 1)),
        (6000.0, TransactionType::Expense, "cat-rent", "Hostel rent", at(2026, 9, 3)),
        (1200.0, TransactionType::Expense, "cat-books", "Algorithms textbook", at(2026, 9, 12)),
        (15000.0, TransactionType::Income, INCOME_CATEGORY_ID, "Stipend", at(2026, 10, 1)),
        (6000.0, TransactionType::Expense, "cat-rent", "Hostel rent", at(2026, 10, 3)),
        (320.0, TransactionType::Expense, "cat-food", "Coffee beans", at(2026, 10, 9)),
        (180.0, TransactionType::Expense, "cat-transport", "Metro card", at(2026, 10, 11)),
    ];
    for (amount, kind, category, description, date) in rows {
        ledger
            .add_transaction(entry(amount, kind, category, description, date))
            .expect("Failed to add transaction");
    }
    ledger
}

#[test]
fn test_dashboard_for_current_month() {
    let ledger = seeded_ledger();
    let snapshot = ledger.dashboard(&at(2026, 10, 18));

    assert_eq!(snapshot.totals.total_income, 15000.0);
    assert_eq!(snapshot.totals.total_expense, 6500.0);
    assert_eq!(snapshot.totals.balance, 8500.0);
    assert_eq!(snapshot.totals.remaining_budget, 3500.0);
    assert_eq!(snapshot.totals.transaction_count, 4);

    let names: Vec<&str> = snapshot.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rent & Bills", "Food & Drink", "Transport"]);
    let breakdown_total: f64 = snapshot.categories.iter().map(|c| c.amount).sum();
    assert_eq!(breakdown_total, snapshot.totals.total_expense);

    assert_eq!(snapshot.trend.len(), TREND_WINDOW_MONTHS);
    let amounts: Vec<f64> = snapshot.trend.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![0.0, 0.0, 0.0, 6450.0, 7200.0, 6500.0]);

    let months: Vec<String> = snapshot
        .available_months
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(months, vec!["2026-10", "2026-09", "2026-08"]);
}

#[test]
fn test_history_filter_and_export() {
    let ledger = seeded_ledger();

    let filter = TransactionFilter::new()
        .search(Some("coffee"))
        .kind(Some(TransactionType::Expense));
    let view = ledger.history(&filter);
    assert_eq!(view.stats.count, 2);
    assert_eq!(view.stats.expense, 770.0);
    assert_eq!(view.summary, "\"coffee\" · Expense");
    // Newest additions come first
    assert_eq!(view.transactions[0].description, "Coffee beans");

    let csv = export_transactions_csv(&view.transactions, ledger.categories()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "2026-10-09,expense,Food & Drink,Coffee beans,320.00");
}

#[test]
fn test_month_filter_view() {
    let ledger = seeded_ledger();
    let view = ledger.history(&TransactionFilter::new().month(Some("2026-09")));
    assert_eq!(view.stats.count, 3);
    assert_eq!(view.stats.income, 15000.0);
    assert_eq!(view.stats.expense, 7200.0);
    assert_eq!(view.stats.balance, 7800.0);
    assert_eq!(view.summary, "September 2026");
}

#[test]
fn test_category_delete_persists_reassignment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");
    let path = path.to_str().unwrap();

    let gym_id = {
        let storage = SqliteStorage::new_unencrypted(path).unwrap();
        let mut ledger = Ledger::load(storage, DEFAULT_MONTHLY_BUDGET).unwrap();
        let gym = ledger.add_category("Gym", CategoryIcon::Dumbbell).unwrap();
        ledger
            .add_transaction(entry(
                800.0,
                TransactionType::Expense,
                &gym.id,
                "Membership",
                at(2026, 10, 2),
            ))
            .unwrap();
        assert_eq!(ledger.delete_category(&gym.id).unwrap(), 1);
        gym.id
    };

    let reopened = open_plain(path);
    assert!(reopened.category(&gym_id).is_none());
    assert_eq!(reopened.transactions().len(), 1);
    assert_eq!(reopened.transactions()[0].category, OTHER_CATEGORY_ID);

    let snapshot = reopened.dashboard(&at(2026, 10, 18));
    assert_eq!(snapshot.categories[0].name, "Other");
}

#[test]
fn test_goals_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");
    let path = path.to_str().unwrap();

    {
        let mut ledger = open_plain(path);
        let goal = ledger
            .add_goal(NewSavingsGoal {
                title: "New laptop".to_string(),
                target_amount: 1000.0,
                current_amount: 0.0,
            })
            .unwrap();
        ledger.add_funds(&goal.id, 1500.0).unwrap();
        ledger.set_budget(8000.0).unwrap();
    }

    let reopened = open_plain(path);
    assert_eq!(reopened.monthly_budget(), 8000.0);
    assert_eq!(reopened.goals()[0].current_amount, 1500.0);
    let progress = &reopened.dashboard(&at(2026, 10, 18)).goals[0];
    assert_eq!(progress.percent, 100.0);
    assert!(progress.is_complete);
}

#[test]
fn test_encrypted_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secret.db");
    let path = path.to_str().unwrap();

    {
        let storage = SqliteStorage::new_with_key(path, Some("correct horse")).unwrap();
        assert!(storage.is_encrypted());
        storage.save_budget(1234.0).unwrap();
    }

    let storage = SqliteStorage::new_with_key(path, Some("correct horse")).unwrap();
    assert_eq!(storage.load_budget().unwrap(), Some(1234.0));

    // The wrong passphrase cannot read the file
    assert!(SqliteStorage::new_with_key(path, Some("wrong")).is_err());
}
