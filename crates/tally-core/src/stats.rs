//! Spending aggregation
//!
//! Pure functions over a transaction snapshot: current-month totals, the
//! per-category expense breakdown and the trailing monthly trend. A transaction
//! whose date cannot be parsed is left out of anything keyed by month.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::goals::goal_progress;
use crate::models::{
    category_name, CategoryDefinition, CategorySpending, DashboardSnapshot, FilteredStats,
    MonthlyTotals, SavingsGoal, Transaction, TrendPoint,
};
use crate::months::{available_months, trailing_months, MonthKey};

/// Number of months in the dashboard trend
pub const TREND_WINDOW_MONTHS: usize = 6;

/// Transactions dated inside the month containing `now`
pub fn current_month_transactions<'a>(
    transactions: &'a [Transaction],
    now: &DateTime<Utc>,
) -> impl Iterator<Item = &'a Transaction> {
    let month = MonthKey::of(now);
    transactions
        .iter()
        .filter(move |t| t.timestamp().is_some_and(|ts| month.contains(&ts)))
}

/// Sum income and expense amounts
pub fn summarize<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> FilteredStats {
    let mut stats = FilteredStats::default();
    for t in transactions {
        if t.is_income() {
            stats.income += t.amount;
        } else {
            stats.expense += t.amount;
        }
        stats.count += 1;
    }
    stats.balance = stats.income - stats.expense;
    stats
}

/// Income, expense, balance and remaining budget for the current month
pub fn monthly_totals(
    transactions: &[Transaction],
    now: &DateTime<Utc>,
    monthly_budget: f64,
) -> MonthlyTotals {
    let sums = summarize(current_month_transactions(transactions, now));

    let budget_used_percent = if monthly_budget > 0.0 {
        (sums.expense / monthly_budget * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    MonthlyTotals {
        month: MonthKey::of(now),
        total_income: sums.income,
        total_expense: sums.expense,
        balance: sums.balance,
        monthly_budget,
        remaining_budget: monthly_budget - sums.expense,
        budget_used_percent,
        transaction_count: sums.count,
    }
}

/// Current-month expenses grouped by category, largest first
///
/// Zero-value groups are dropped. Equal amounts keep the order in which their
/// category was first seen.
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &[CategoryDefinition],
    now: &DateTime<Utc>,
) -> Vec<CategorySpending> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();

    for t in current_month_transactions(transactions, now).filter(|t| t.is_expense()) {
        let slot = *index.entry(t.category.as_str()).or_insert_with(|| {
            groups.push((t.category.as_str(), 0.0, 0));
            groups.len() - 1
        });
        groups[slot].1 += t.amount;
        groups[slot].2 += 1;
    }

    let total: f64 = groups.iter().map(|(_, amount, _)| amount).sum();

    let mut breakdown: Vec<CategorySpending> = groups
        .into_iter()
        .filter(|(_, amount, _)| *amount > 0.0)
        .map(|(id, amount, count)| CategorySpending {
            category_id: id.to_string(),
            name: category_name(categories, id).to_string(),
            amount,
            percentage: if total > 0.0 {
                (amount / total) * 100.0
            } else {
                0.0
            },
            transaction_count: count,
        })
        .collect();

    // sort_by is stable, so ties stay in first-seen order
    breakdown.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    breakdown
}

/// Expense totals for the `months` calendar months ending at `now`, oldest first
///
/// Always returns exactly `months` points; empty months report zero.
pub fn spending_trend(
    transactions: &[Transaction],
    now: &DateTime<Utc>,
    months: usize,
) -> Vec<TrendPoint> {
    let window = trailing_months(now, months);
    let mut buckets: HashMap<MonthKey, (f64, usize)> =
        window.iter().map(|m| (*m, (0.0, 0))).collect();

    for t in transactions.iter().filter(|t| t.is_expense()) {
        if let Some(bucket) = t.month_key().and_then(|key| buckets.get_mut(&key)) {
            bucket.0 += t.amount;
            bucket.1 += 1;
        }
    }

    window
        .into_iter()
        .map(|month| {
            let (amount, transaction_count) = buckets.get(&month).copied().unwrap_or_default();
            TrendPoint {
                month,
                label: month.short_label(),
                amount,
                transaction_count,
            }
        })
        .collect()
}

/// Compute every dashboard view from one snapshot
pub fn build_dashboard(
    transactions: &[Transaction],
    categories: &[CategoryDefinition],
    goals: &[SavingsGoal],
    monthly_budget: f64,
    now: &DateTime<Utc>,
) -> DashboardSnapshot {
    let snapshot = DashboardSnapshot {
        totals: monthly_totals(transactions, now, monthly_budget),
        categories: category_breakdown(transactions, categories, now),
        trend: spending_trend(transactions, now, TREND_WINDOW_MONTHS),
        goals: goal_progress(goals),
        available_months: available_months(transactions, now),
    };
    debug!(
        month = %snapshot.totals.month,
        transactions = snapshot.totals.transaction_count,
        categories = snapshot.categories.len(),
        "Computed dashboard"
    );
    snapshot
}
