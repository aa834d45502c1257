//! History command: filtered transactions with totals and CSV export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tally_core::export::{default_export_filename, write_transactions_csv};
use tally_core::{FilteredView, Ledger, Settings, Storage, TransactionFilter};

use super::{parse_kind, print_transaction_rows, resolve_category_arg};

/// Build a filter from command-line selections
///
/// The category may be given by id or name; "all" keeps it unconstrained.
pub fn build_filter<S: Storage>(
    ledger: &Ledger<S>,
    kind: Option<&str>,
    category: Option<&str>,
    search: Option<&str>,
    month: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<TransactionFilter> {
    let kind = match kind.map(str::trim) {
        None | Some("") => None,
        Some(k) if k.eq_ignore_ascii_case("all") => None,
        Some(k) => Some(parse_kind(k)?),
    };
    let category = match category.map(str::trim) {
        None | Some("") => None,
        Some(c) if c.eq_ignore_ascii_case("all") => None,
        Some(c) => Some(resolve_category_arg(ledger, c)?),
    };

    Ok(TransactionFilter::new()
        .kind(kind)
        .category(category.as_deref())
        .search(search)
        .month(month)
        .start_date(from)
        .end_date(to))
}

pub fn cmd_history<S: Storage>(
    ledger: &Ledger<S>,
    settings: &Settings,
    filter: &TransactionFilter,
    export: Option<&Path>,
    json: bool,
) -> Result<()> {
    let view = ledger.history(filter);

    if let Some(target) = export {
        let path = if target.is_dir() {
            target.join(default_export_filename(&Utc::now()))
        } else {
            target.to_path_buf()
        };
        let rows = write_transactions_csv(&path, &view.transactions, ledger.categories())
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        println!("✅ Exported {} transactions to {}", rows, path.display());
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_view(ledger, settings, &view);
    Ok(())
}

/// Heading text for a history listing
///
/// Selections that constrain nothing (such as an unparseable date bound) leave
/// the summary empty, which reads as the full history.
pub fn history_heading(view: &FilteredView) -> &str {
    if view.summary.is_empty() {
        "all transactions"
    } else {
        &view.summary
    }
}

fn print_view<S: Storage>(ledger: &Ledger<S>, settings: &Settings, view: &FilteredView) {
    println!();
    println!("🔎 History: {}", history_heading(view));

    if view.transactions.is_empty() {
        println!("   No transactions match.");
        return;
    }

    print_transaction_rows(ledger, settings, view.transactions.iter());
    println!();
    println!(
        "   {} transactions │ In {} │ Out {} │ Net {}",
        view.stats.count,
        settings.money(view.stats.income),
        settings.money(view.stats.expense),
        settings.money(view.stats.balance)
    );
}
