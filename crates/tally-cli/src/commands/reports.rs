//! Dashboard and report command implementations

use anyhow::Result;
use chrono::Utc;
use tally_core::models::DashboardSnapshot;
use tally_core::stats::{category_breakdown, spending_trend};
use tally_core::{Ledger, Settings, Storage};

use super::{bar, truncate};

pub fn cmd_dashboard<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let snapshot = ledger.dashboard(&Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_dashboard(&snapshot, settings);
    Ok(())
}

fn print_dashboard(snapshot: &DashboardSnapshot, settings: &Settings) {
    let totals = &snapshot.totals;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Tally Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {}", totals.month.label());
    println!("  Income:          {}", settings.money(totals.total_income));
    println!("  Expenses:        {}", settings.money(totals.total_expense));
    println!("  Balance:         {}", settings.money(totals.balance));
    println!();
    println!("  Budget:          {}", settings.money(totals.monthly_budget));
    println!("  Remaining:       {}", settings.money(totals.remaining_budget));
    println!(
        "  {} {:.1}% used",
        bar(totals.budget_used_percent, 30),
        totals.budget_used_percent
    );
    if totals.remaining_budget < 0.0 {
        println!("  ⚠️  Over budget!");
    }

    if !snapshot.categories.is_empty() {
        println!();
        println!("  Top spending:");
        for cat in snapshot.categories.iter().take(5) {
            println!(
                "    {:20} {:>12}  {:>5.1}%",
                truncate(&cat.name, 20),
                settings.money(cat.amount),
                cat.percentage
            );
        }
    }

    if !snapshot.goals.is_empty() {
        println!();
        println!("  Savings goals:");
        for goal in &snapshot.goals {
            println!(
                "    {:20} {} {:>5.1}%",
                truncate(&goal.title, 20),
                bar(goal.percent, 20),
                goal.percent
            );
        }
    }
    println!();
}

pub fn cmd_report_spending<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let now = Utc::now();
    let breakdown = category_breakdown(ledger.transactions(), ledger.categories(), &now);

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending by Category");
    println!("   Month: {}", tally_core::MonthKey::of(&now).label());
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.is_empty() {
        println!("   No spending recorded this month.");
        return Ok(());
    }

    println!(
        "   {:25} │ {:>12} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   {}", "─".repeat(58));
    for cat in &breakdown {
        println!(
            "   {:25} │ {:>12} │ {:>5.1}% │ {:>5}",
            truncate(&cat.name, 25),
            settings.money(cat.amount),
            cat.percentage,
            cat.transaction_count
        );
    }

    let total: f64 = breakdown.iter().map(|c| c.amount).sum();
    println!("   {}", "─".repeat(58));
    println!("   {:25} │ {:>12} │", "Total", settings.money(total));
    Ok(())
}

pub fn cmd_report_trends<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    months: usize,
    json: bool,
) -> Result<()> {
    if months == 0 {
        anyhow::bail!("--months must be at least 1");
    }
    let trend = spending_trend(ledger.transactions(), &Utc::now(), months);

    if json {
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    println!();
    println!("📈 Spending Trend (last {} months)", months);
    println!("   ─────────────────────────────────────────────────────────────");

    let peak = trend.iter().map(|p| p.amount).fold(0.0_f64, f64::max);
    for point in &trend {
        let percent = if peak > 0.0 {
            point.amount / peak * 100.0
        } else {
            0.0
        };
        println!(
            "   {:8} │ {:>12} │ {}",
            point.label,
            settings.money(point.amount),
            bar(percent, 30)
        );
    }
    Ok(())
}

pub fn cmd_report_months<S: Storage>(ledger: &Ledger<S>, json: bool) -> Result<()> {
    let months = ledger.available_months(&Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&months)?);
        return Ok(());
    }

    println!();
    println!("🗓️  Months with history");
    for month in &months {
        println!("   {}  {}", month, month.label());
    }
    Ok(())
}
