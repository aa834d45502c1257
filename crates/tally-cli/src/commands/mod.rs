//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `advice` - Spending advice from the configured backend
//! - `budget` - Monthly budget commands (show, set)
//! - `categories` - Category management commands (list, add, rename, delete, icons)
//! - `core` - Core commands (init, status) and shared utilities (open_ledger)
//! - `goals` - Savings goal commands (list, add, edit, fund, delete)
//! - `history` - Filtered transaction history and CSV export
//! - `reports` - Dashboard and report commands (spending, trends, months)
//! - `transactions` - Transaction commands (add, list, edit, delete)

pub mod advice;
pub mod budget;
pub mod categories;
pub mod core;
pub mod goals;
pub mod history;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use advice::*;
pub use budget::*;
pub use categories::*;
pub use core::*;
pub use goals::*;
pub use history::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Text progress bar, e.g. `[#####-----]`
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
