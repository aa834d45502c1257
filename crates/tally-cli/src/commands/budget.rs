//! Monthly budget commands

use anyhow::Result;
use chrono::Utc;
use tally_core::stats::monthly_totals;
use tally_core::{Ledger, Settings, Storage};

use super::bar;

pub fn cmd_budget_show<S: Storage>(ledger: &Ledger<S>, settings: &Settings) -> Result<()> {
    let totals = monthly_totals(ledger.transactions(), &Utc::now(), ledger.monthly_budget());

    println!();
    println!("💰 Budget for {}", totals.month.label());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Monthly budget: {}", settings.money(totals.monthly_budget));
    println!("   Spent:          {}", settings.money(totals.total_expense));
    println!("   Remaining:      {}", settings.money(totals.remaining_budget));
    println!(
        "   {} {:.1}% used",
        bar(totals.budget_used_percent, 30),
        totals.budget_used_percent
    );
    if totals.remaining_budget < 0.0 {
        println!("   ⚠️  Over budget by {}", settings.money(-totals.remaining_budget));
    }
    Ok(())
}

pub fn cmd_budget_set<S: Storage>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    amount: f64,
) -> Result<()> {
    ledger.set_budget(amount)?;
    println!("✅ Monthly budget set to {}", settings.money(amount));
    Ok(())
}
