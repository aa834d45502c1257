//! CSV export of a transaction list

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{category_name, CategoryDefinition, Transaction};

/// One exported row, in column order
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

impl<'a> ExportRow<'a> {
    fn new(tx: &'a Transaction, categories: &'a [CategoryDefinition]) -> Self {
        let date = tx
            .timestamp()
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| tx.date.clone());
        Self {
            date,
            kind: tx.kind.as_str(),
            category: category_name(categories, &tx.category),
            description: &tx.description,
            amount: format!("{:.2}", tx.amount),
        }
    }
}

/// Render transactions as CSV with a `Date,Type,Category,Description,Amount` header
///
/// Rows keep the input order. Malformed dates are written as stored.
pub fn export_transactions_csv(
    transactions: &[Transaction],
    categories: &[CategoryDefinition],
) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if transactions.is_empty() {
        // serialize() only emits the header alongside the first row
        writer.write_record(["Date", "Type", "Category", "Description", "Amount"])?;
    }
    for tx in transactions {
        writer.serialize(ExportRow::new(tx, categories))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::InvalidData(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

/// Write the CSV export to a file, returning the number of rows written
pub fn write_transactions_csv(
    path: &Path,
    transactions: &[Transaction],
    categories: &[CategoryDefinition],
) -> Result<usize> {
    let csv = export_transactions_csv(transactions, categories)?;
    std::fs::write(path, csv)?;
    info!(path = %path.display(), rows = transactions.len(), "Exported transactions");
    Ok(transactions.len())
}

/// Default export file name, e.g. `budget_export_2026-10-18.csv`
pub fn default_export_filename(now: &DateTime<Utc>) -> String {
    format!("budget_export_{}.csv", now.format("%Y-%m-%d"))
}
