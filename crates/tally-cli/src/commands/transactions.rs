//! Transaction command implementations (add, list, edit, delete)

use anyhow::Result;
use tally_core::models::{category_name, NewTransaction, TransactionType, INCOME_CATEGORY_ID};
use tally_core::{Ledger, Settings, Storage};

use super::{confirm, parse_date_arg, parse_kind, resolve_category_arg, truncate};

/// Category a new expense lands in when none is given
const DEFAULT_EXPENSE_CATEGORY: &str = "cat-food";

/// Transaction fields as given on the command line
///
/// For `add`, `amount` and `kind` are always present. For `edit`, any `None`
/// keeps the stored value.
#[derive(Debug, Default)]
pub struct TxArgs {
    pub amount: Option<f64>,
    pub kind: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub receipt: Option<String>,
}

pub fn cmd_tx_add<S: Storage>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    args: TxArgs,
) -> Result<()> {
    let amount = args
        .amount
        .ok_or_else(|| anyhow::anyhow!("Amount is required"))?;
    let kind = match args.kind.as_deref() {
        Some(k) => parse_kind(k)?,
        None => TransactionType::Expense,
    };
    let category = match args.category.as_deref() {
        Some(c) => resolve_category_arg(ledger, c)?,
        None if kind == TransactionType::Income => INCOME_CATEGORY_ID.to_string(),
        None => DEFAULT_EXPENSE_CATEGORY.to_string(),
    };
    let date = args.date.as_deref().map(parse_date_arg).transpose()?;

    let tx = ledger.add_transaction(NewTransaction {
        amount,
        kind,
        category,
        description: args.description.unwrap_or_default(),
        date,
        receipt_image: args.receipt,
    })?;

    println!(
        "✅ Recorded {} of {} in {} (id: {})",
        tx.kind,
        settings.money(tx.amount),
        category_name(ledger.categories(), &tx.category),
        tx.id
    );
    Ok(())
}

pub fn cmd_tx_list<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    limit: usize,
) -> Result<()> {
    let transactions = ledger.transactions();
    if transactions.is_empty() {
        println!("No transactions yet. Record one with 'tally tx add <amount>'.");
        return Ok(());
    }

    println!();
    println!(
        "📋 Transactions (showing {} of {})",
        limit.min(transactions.len()),
        transactions.len()
    );
    print_transaction_rows(ledger, settings, transactions.iter().take(limit));
    Ok(())
}

/// Print one table row per transaction
pub fn print_transaction_rows<'a, S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    rows: impl Iterator<Item = &'a tally_core::models::Transaction>,
) {
    println!(
        "   {:10} │ {:36} │ {:15} │ {:28} │ {:>12}",
        "Date", "ID", "Category", "Description", "Amount"
    );
    println!("   {}", "─".repeat(115));
    for tx in rows {
        let day = tx
            .timestamp()
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| truncate(&tx.date, 10));
        let signed = if tx.is_income() { tx.amount } else { -tx.amount };
        println!(
            "   {:10} │ {:36} │ {:15} │ {:28} │ {:>12}",
            day,
            tx.id,
            truncate(category_name(ledger.categories(), &tx.category), 15),
            truncate(&tx.description, 28),
            settings.money(signed)
        );
    }
}

pub fn cmd_tx_edit<S: Storage>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    id: &str,
    args: TxArgs,
) -> Result<()> {
    let existing = ledger
        .transaction(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {}", id))?;

    let kind = match args.kind.as_deref() {
        Some(k) => parse_kind(k)?,
        None => existing.kind,
    };
    let category = match args.category.as_deref() {
        Some(c) => resolve_category_arg(ledger, c)?,
        None => existing.category.clone(),
    };
    let date = args.date.as_deref().map(parse_date_arg).transpose()?;

    let tx = ledger.edit_transaction(
        id,
        NewTransaction {
            amount: args.amount.unwrap_or(existing.amount),
            kind,
            category,
            description: args.description.unwrap_or(existing.description),
            date,
            receipt_image: args.receipt.or(existing.receipt_image),
        },
    )?;

    println!(
        "✅ Updated transaction {} ({} {})",
        tx.id,
        tx.kind,
        settings.money(tx.amount)
    );
    Ok(())
}

pub fn cmd_tx_delete<S: Storage>(ledger: &mut Ledger<S>, id: &str, yes: bool) -> Result<()> {
    let tx = ledger
        .transaction(id)
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {}", id))?;
    let prompt = format!("Delete '{}' ({})?", tx.description, tx.amount);

    if !confirm(&prompt, yes)? {
        println!("Cancelled.");
        return Ok(());
    }

    ledger.delete_transaction(id)?;
    println!("✅ Deleted transaction {}", id);
    Ok(())
}
