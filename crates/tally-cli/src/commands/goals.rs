//! Savings goal command implementations

use anyhow::Result;
use tally_core::goals::progress_for;
use tally_core::models::NewSavingsGoal;
use tally_core::{Ledger, Settings, Storage};

use super::{bar, confirm, truncate};

pub fn cmd_goals_list<S: Storage>(ledger: &Ledger<S>, settings: &Settings) -> Result<()> {
    let goals = ledger.goals();
    if goals.is_empty() {
        println!("No savings goals yet. Add one with 'tally goals add <title> --target <amount>'.");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");
    for goal in goals {
        let progress = progress_for(goal);
        let status = if progress.is_complete { " ✅" } else { "" };
        println!(
            "   {:24} {} {:>5.1}%  {} / {}{}",
            truncate(&goal.title, 24),
            bar(progress.percent, 20),
            progress.percent,
            settings.money(goal.current_amount),
            settings.money(goal.target_amount),
            status
        );
        println!("   {:24} id: {}", "", goal.id);
    }

    Ok(())
}

pub fn cmd_goals_add<S: Storage>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    title: &str,
    target: f64,
    current: f64,
) -> Result<()> {
    let goal = ledger.add_goal(NewSavingsGoal {
        title: title.to_string(),
        target_amount: target,
        current_amount: current,
    })?;
    println!(
        "✅ Created goal '{}' targeting {} (id: {})",
        goal.title,
        settings.money(goal.target_amount),
        goal.id
    );
    Ok(())
}

pub fn cmd_goals_edit<S: Storage>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    id: &str,
    title: Option<&str>,
    target: Option<f64>,
    current: Option<f64>,
) -> Result<()> {
    let existing = ledger
        .goal(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Savings goal not found: {}", id))?;

    let goal = ledger.edit_goal(
        id,
        NewSavingsGoal {
            title: title.map(str::to_string).unwrap_or(existing.title),
            target_amount: target.unwrap_or(existing.target_amount),
            current_amount: current.unwrap_or(existing.current_amount),
        },
    )?;
    println!(
        "✅ Updated goal '{}' ({} / {})",
        goal.title,
        settings.money(goal.current_amount),
        settings.money(goal.target_amount)
    );
    Ok(())
}

pub fn cmd_goals_fund<S: Storage>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    id: &str,
    amount: f64,
) -> Result<()> {
    let goal = ledger.add_funds(id, amount)?;
    let progress = progress_for(&goal);
    println!(
        "✅ '{}' now at {} of {} ({:.1}%)",
        goal.title,
        settings.money(goal.current_amount),
        settings.money(goal.target_amount),
        progress.percent
    );
    if progress.is_complete {
        println!("   🎉 Goal reached!");
    }
    Ok(())
}

pub fn cmd_goals_delete<S: Storage>(ledger: &mut Ledger<S>, id: &str, yes: bool) -> Result<()> {
    let goal = ledger
        .goal(id)
        .ok_or_else(|| anyhow::anyhow!("Savings goal not found: {}", id))?;
    let prompt = format!("Delete goal '{}'?", goal.title);

    if !confirm(&prompt, yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    let removed = ledger.delete_goal(id)?;
    println!("✅ Deleted goal '{}'", removed.title);
    Ok(())
}
