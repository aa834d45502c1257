//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use tally_core::models::{
    NewSavingsGoal, NewTransaction, TransactionType, DEFAULT_MONTHLY_BUDGET, INCOME_CATEGORY_ID,
    OTHER_CATEGORY_ID,
};
use tally_core::{Ledger, MemoryStorage, MockBackend, Settings, Storage};

use crate::commands::{self, bar, truncate, TxArgs};

fn settings() -> Settings {
    Settings::embedded().unwrap()
}

fn setup_ledger() -> Ledger<MemoryStorage> {
    Ledger::load(MemoryStorage::new(), DEFAULT_MONTHLY_BUDGET).unwrap()
}

fn add_expense<S: Storage>(
    ledger: &mut Ledger<S>,
    amount: f64,
    category: &str,
    description: &str,
) -> String {
    ledger
        .add_transaction(NewTransaction {
            amount,
            kind: TransactionType::Expense,
            category: category.to_string(),
            description: description.to_string(),
            date: None,
            receipt_image: None,
        })
        .unwrap()
        .id
}

fn add_args(amount: f64, kind: &str, category: Option<&str>, description: &str) -> TxArgs {
    TxArgs {
        amount: Some(amount),
        kind: Some(kind.to_string()),
        category: category.map(str::to_string),
        description: Some(description.to_string()),
        date: None,
        receipt: None,
    }
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer description", 10), "a much ...");
    // Multi-byte characters are never split
    assert_eq!(truncate("₹₹₹₹₹₹₹₹₹₹₹₹", 5), "₹₹...");
}

#[test]
fn test_bar() {
    assert_eq!(bar(50.0, 10), "[#####-----]");
    assert_eq!(bar(0.0, 4), "[----]");
    assert_eq!(bar(250.0, 4), "[####]");
}

#[test]
fn test_resolve_category_arg() {
    let ledger = setup_ledger();
    assert_eq!(commands::resolve_category_arg(&ledger, "cat-food").unwrap(), "cat-food");
    assert_eq!(commands::resolve_category_arg(&ledger, "food & drink").unwrap(), "cat-food");
    assert_eq!(commands::resolve_category_arg(&ledger, " Transport ").unwrap(), "cat-transport");
    assert!(commands::resolve_category_arg(&ledger, "Groceries").is_err());
}

#[test]
fn test_resolve_category_arg_short_id() {
    let ledger = setup_ledger();
    assert_eq!(commands::resolve_category_arg(&ledger, "food").unwrap(), "cat-food");
    assert_eq!(commands::resolve_category_arg(&ledger, "Rent").unwrap(), "cat-rent");
    assert_eq!(commands::resolve_category_arg(&ledger, "other").unwrap(), OTHER_CATEGORY_ID);
}

#[test]
fn test_cmd_tx_add_with_short_category() {
    let mut ledger = setup_ledger();
    let result = commands::cmd_tx_add(
        &mut ledger,
        &settings(),
        add_args(250.0, "expense", Some("food"), "Lunch"),
    );
    assert!(result.is_ok());
    assert_eq!(ledger.transactions()[0].category, "cat-food");
}

#[test]
fn test_confirm_with_yes_skips_prompt() {
    assert!(commands::confirm("Delete everything?", true).unwrap());
}

// ========== Init / Status Tests ==========

#[test]
fn test_cmd_init_persists_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tally.db");
    let settings = settings();

    let result = commands::cmd_init(&db, true, &settings);
    assert!(result.is_ok());

    let ledger = commands::open_ledger(&db, true, &settings).unwrap();
    let stored = ledger.storage();
    assert_eq!(stored.load_categories().unwrap().map(|c| c.len()), Some(7));
    assert_eq!(
        stored.load_budget().unwrap(),
        Some(settings.budget.default_monthly_budget)
    );
}

#[test]
fn test_cmd_status() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tally.db");
    let settings = settings();

    // Before and after initialization
    assert!(commands::cmd_status(&db, true, &settings).is_ok());
    commands::cmd_init(&db, true, &settings).unwrap();
    assert!(commands::cmd_status(&db, true, &settings).is_ok());
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_tx_add_expense_by_category_name() {
    let mut ledger = setup_ledger();
    let result = commands::cmd_tx_add(
        &mut ledger,
        &settings(),
        add_args(250.0, "expense", Some("Books & Study"), "Notebook"),
    );
    assert!(result.is_ok());

    let tx = &ledger.transactions()[0];
    assert_eq!(tx.category, "cat-books");
    assert_eq!(tx.description, "Notebook");
    assert_eq!(tx.kind, TransactionType::Expense);
}

#[test]
fn test_cmd_tx_add_default_categories() {
    let mut ledger = setup_ledger();
    let stipend = add_args(2000.0, "income", None, "Stipend");
    commands::cmd_tx_add(&mut ledger, &settings(), stipend).unwrap();
    assert_eq!(ledger.transactions()[0].category, INCOME_CATEGORY_ID);

    let unlabelled = add_args(80.0, "expense", None, "");
    commands::cmd_tx_add(&mut ledger, &settings(), unlabelled).unwrap();
    assert_eq!(ledger.transactions()[0].category, "cat-food");
    assert_eq!(ledger.transactions()[0].description, "No description");
}

#[test]
fn test_cmd_tx_add_with_date() {
    let mut ledger = setup_ledger();
    let mut args = add_args(60.0, "expense", Some("cat-transport"), "Bus pass");
    args.date = Some("2026-09-14".to_string());
    commands::cmd_tx_add(&mut ledger, &settings(), args).unwrap();
    assert_eq!(ledger.transactions()[0].date, "2026-09-14T00:00:00.000Z");
}

#[test]
fn test_cmd_tx_add_rejects_bad_input() {
    let mut ledger = setup_ledger();
    let settings = settings();
    let rejected = [
        add_args(0.0, "expense", None, "x"),
        add_args(5.0, "transfer", None, "x"),
        add_args(5.0, "expense", Some("Nope"), "x"),
        add_args(5.0, "expense", Some("income"), "x"),
    ];
    for args in rejected {
        assert!(commands::cmd_tx_add(&mut ledger, &settings, args).is_err());
    }

    let mut bad_date = add_args(5.0, "expense", None, "x");
    bad_date.date = Some("last tuesday".to_string());
    assert!(commands::cmd_tx_add(&mut ledger, &settings, bad_date).is_err());

    assert!(ledger.transactions().is_empty());
}

#[test]
fn test_cmd_tx_list() {
    let mut ledger = setup_ledger();
    assert!(commands::cmd_tx_list(&ledger, &settings(), 20).is_ok());

    add_expense(&mut ledger, 120.0, "cat-food", "Lunch");
    assert!(commands::cmd_tx_list(&ledger, &settings(), 20).is_ok());
}

#[test]
fn test_cmd_tx_edit_keeps_unspecified_fields() {
    let mut ledger = setup_ledger();
    let id = add_expense(&mut ledger, 120.0, "cat-food", "Lunch");
    let original_date = ledger.transaction(&id).unwrap().date.clone();

    let result = commands::cmd_tx_edit(
        &mut ledger,
        &settings(),
        &id,
        TxArgs {
            amount: Some(150.0),
            ..TxArgs::default()
        },
    );
    assert!(result.is_ok());

    let tx = ledger.transaction(&id).unwrap();
    assert_eq!(tx.amount, 150.0);
    assert_eq!(tx.description, "Lunch");
    assert_eq!(tx.category, "cat-food");
    assert_eq!(tx.date, original_date);
}

#[test]
fn test_cmd_tx_edit_not_found() {
    let mut ledger = setup_ledger();
    let result = commands::cmd_tx_edit(&mut ledger, &settings(), "missing", TxArgs::default());
    assert!(result.is_err());
}

#[test]
fn test_cmd_tx_delete() {
    let mut ledger = setup_ledger();
    let id = add_expense(&mut ledger, 120.0, "cat-food", "Lunch");

    let result = commands::cmd_tx_delete(&mut ledger, &id, true);
    assert!(result.is_ok());
    assert!(ledger.transactions().is_empty());

    assert!(commands::cmd_tx_delete(&mut ledger, &id, true).is_err());
}

// ========== History Command Tests ==========

#[test]
fn test_build_filter_resolves_arguments() {
    let ledger = setup_ledger();
    let filter = commands::build_filter(
        &ledger,
        Some("expense"),
        Some("Food & Drink"),
        Some("coffee"),
        Some("2026-10"),
        Some("2026-10-01"),
        None,
    )
    .unwrap();

    assert_eq!(filter.kind, Some(TransactionType::Expense));
    assert_eq!(filter.category_id.as_deref(), Some("cat-food"));
    assert_eq!(filter.search.as_deref(), Some("coffee"));
    assert_eq!(filter.month.as_deref(), Some("2026-10"));
    assert_eq!(filter.start_date.as_deref(), Some("2026-10-01"));
    assert!(filter.end_date.is_none());
}

#[test]
fn test_build_filter_all_means_unconstrained() {
    let ledger = setup_ledger();
    let filter =
        commands::build_filter(&ledger, Some("all"), Some("all"), None, None, None, None).unwrap();
    assert!(filter.kind.is_none());
    assert!(filter.category_id.is_none());
    assert!(!filter.is_active());

    assert!(commands::build_filter(&ledger, Some("refund"), None, None, None, None, None).is_err());
    assert!(commands::build_filter(&ledger, None, Some("Nope"), None, None, None, None).is_err());
}

#[test]
fn test_cmd_history_prints_and_exports() {
    let mut ledger = setup_ledger();
    add_expense(&mut ledger, 320.0, "cat-food", "Coffee beans");
    add_expense(&mut ledger, 180.0, "cat-transport", "Metro card");

    let settings = settings();
    let filter =
        commands::build_filter(&ledger, None, None, Some("coffee"), None, None, None).unwrap();
    assert!(commands::cmd_history(&ledger, &settings, &filter, None, false).is_ok());
    assert!(commands::cmd_history(&ledger, &settings, &filter, None, true).is_ok());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coffee.csv");
    commands::cmd_history(&ledger, &settings, &filter, Some(&path), false).unwrap();

    let csv = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Date,Type,Category,Description,Amount");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Coffee beans"));
}

#[test]
fn test_history_heading_ignores_unusable_bounds() {
    let mut ledger = setup_ledger();
    add_expense(&mut ledger, 45.0, "cat-fun", "Cinema");

    let filter =
        commands::build_filter(&ledger, None, None, None, None, Some("someday"), None).unwrap();
    assert!(filter.is_active());
    let view = ledger.history(&filter);
    assert_eq!(view.stats.count, 1);
    assert_eq!(commands::history_heading(&view), "all transactions");
    assert!(commands::cmd_history(&ledger, &settings(), &filter, None, false).is_ok());

    let filter =
        commands::build_filter(&ledger, None, None, Some("cinema"), None, None, None).unwrap();
    assert_eq!(commands::history_heading(&ledger.history(&filter)), "\"cinema\"");
}

#[test]
fn test_cmd_history_export_to_directory_uses_default_name() {
    let mut ledger = setup_ledger();
    add_expense(&mut ledger, 45.0, "cat-fun", "Cinema");

    let dir = tempfile::tempdir().unwrap();
    let filter = tally_core::TransactionFilter::new();
    commands::cmd_history(&ledger, &settings(), &filter, Some(dir.path()), false).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("budget_export_"));
    assert!(names[0].ends_with(".csv"));
}

// ========== Category Command Tests ==========

#[test]
fn test_cmd_categories_list_and_icons() {
    let ledger = setup_ledger();
    assert!(commands::cmd_categories_list(&ledger).is_ok());
    assert!(commands::cmd_categories_icons().is_ok());
}

#[test]
fn test_cmd_categories_add_and_rename() {
    let mut ledger = setup_ledger();
    let result = commands::cmd_categories_add(&mut ledger, "Gym", "Dumbbell");
    assert!(result.is_ok());
    assert_eq!(ledger.categories().len(), 8);

    let result = commands::cmd_categories_rename(&mut ledger, "gym", "Fitness", Some("heart"));
    assert!(result.is_ok());
    let cat = ledger.categories().last().unwrap();
    assert_eq!(cat.name, "Fitness");
    assert_eq!(cat.icon_name, "Heart");
}

#[test]
fn test_cmd_categories_add_rejects_unknown_icon() {
    let mut ledger = setup_ledger();
    assert!(commands::cmd_categories_add(&mut ledger, "Space", "Rocket").is_err());
    assert_eq!(ledger.categories().len(), 7);
}

#[test]
fn test_cmd_categories_delete_moves_transactions() {
    let mut ledger = setup_ledger();
    commands::cmd_categories_add(&mut ledger, "Gym", "Dumbbell").unwrap();
    let gym_id = ledger.categories().last().unwrap().id.clone();
    let tx_id = add_expense(&mut ledger, 800.0, &gym_id, "Membership");

    let result = commands::cmd_categories_delete(&mut ledger, "Gym", true);
    assert!(result.is_ok());
    assert!(ledger.category(&gym_id).is_none());
    assert_eq!(ledger.transaction(&tx_id).unwrap().category, OTHER_CATEGORY_ID);
}

#[test]
fn test_cmd_categories_built_ins_protected() {
    let mut ledger = setup_ledger();
    assert!(commands::cmd_categories_delete(&mut ledger, "Other", true).is_err());
    assert!(commands::cmd_categories_rename(&mut ledger, "Income", "Salary", None).is_err());
    assert_eq!(ledger.categories().len(), 7);
}

// ========== Goal Command Tests ==========

#[test]
fn test_cmd_goals_lifecycle() {
    let mut ledger = setup_ledger();
    let settings = settings();
    assert!(commands::cmd_goals_list(&ledger, &settings).is_ok());

    commands::cmd_goals_add(&mut ledger, &settings, "New laptop", 1000.0, 0.0).unwrap();
    let id = ledger.goals()[0].id.clone();

    assert!(commands::cmd_goals_fund(&mut ledger, &settings, &id, 400.0).is_ok());
    assert_eq!(ledger.goal(&id).unwrap().current_amount, 400.0);

    assert!(commands::cmd_goals_fund(&mut ledger, &settings, &id, -1000.0).is_ok());
    assert_eq!(ledger.goal(&id).unwrap().current_amount, 0.0);

    let result = commands::cmd_goals_edit(&mut ledger, &settings, &id, None, Some(1200.0), None);
    assert!(result.is_ok());
    let goal = ledger.goal(&id).unwrap();
    assert_eq!(goal.title, "New laptop");
    assert_eq!(goal.target_amount, 1200.0);

    assert!(commands::cmd_goals_list(&ledger, &settings).is_ok());
    assert!(commands::cmd_goals_delete(&mut ledger, &id, true).is_ok());
    assert!(ledger.goals().is_empty());
}

#[test]
fn test_cmd_goals_invalid() {
    let mut ledger = setup_ledger();
    let settings = settings();
    assert!(commands::cmd_goals_add(&mut ledger, &settings, "Bike", 0.0, 0.0).is_err());
    assert!(commands::cmd_goals_fund(&mut ledger, &settings, "missing", 10.0).is_err());
    assert!(commands::cmd_goals_edit(&mut ledger, &settings, "missing", None, None, None).is_err());
    assert!(commands::cmd_goals_delete(&mut ledger, "missing", true).is_err());
}

// ========== Budget / Report Command Tests ==========

#[test]
fn test_cmd_budget() {
    let mut ledger = setup_ledger();
    let settings = settings();
    assert!(commands::cmd_budget_show(&ledger, &settings).is_ok());

    assert!(commands::cmd_budget_set(&mut ledger, &settings, 8000.0).is_ok());
    assert_eq!(ledger.monthly_budget(), 8000.0);

    assert!(commands::cmd_budget_set(&mut ledger, &settings, -5.0).is_err());
    assert_eq!(ledger.monthly_budget(), 8000.0);
}

#[test]
fn test_cmd_reports() {
    let mut ledger = setup_ledger();
    let settings = settings();
    add_expense(&mut ledger, 6000.0, "cat-rent", "Hostel rent");
    add_expense(&mut ledger, 320.0, "cat-food", "Coffee beans");
    ledger
        .add_goal(NewSavingsGoal {
            title: "Trip".to_string(),
            target_amount: 5000.0,
            current_amount: 1000.0,
        })
        .unwrap();

    for json in [false, true] {
        assert!(commands::cmd_dashboard(&ledger, &settings, json).is_ok());
        assert!(commands::cmd_report_spending(&ledger, &settings, json).is_ok());
        assert!(commands::cmd_report_trends(&ledger, &settings, 6, json).is_ok());
        assert!(commands::cmd_report_months(&ledger, json).is_ok());
    }
    assert!(commands::cmd_report_trends(&ledger, &settings, 0, false).is_err());
}

#[test]
fn test_cmd_reports_on_empty_ledger() {
    let ledger = setup_ledger();
    let settings = settings();
    assert!(commands::cmd_dashboard(&ledger, &settings, false).is_ok());
    assert!(commands::cmd_report_spending(&ledger, &settings, false).is_ok());
    assert!(commands::cmd_report_months(&ledger, false).is_ok());
}

// ========== Advice Command Tests ==========

#[tokio::test]
async fn test_advise_with_mock_backend() {
    let mut ledger = setup_ledger();
    add_expense(&mut ledger, 450.0, "cat-food", "Groceries");

    let result = commands::advise(&MockBackend::new(), &ledger, &settings()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_advise_survives_backend_failure() {
    let ledger = setup_ledger();
    let result = commands::advise(&MockBackend::failing(), &ledger, &settings()).await;
    assert!(result.is_ok());

    let result = commands::advise(&MockBackend::unhealthy(), &ledger, &settings()).await;
    assert!(result.is_ok());
}
