//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track student spending against a monthly budget
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal budget ledger with savings goals", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable ledger encryption
    ///
    /// By default, the ledger is encrypted using SQLCipher.
    /// Set TALLY_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Settings file (defaults to the per-user override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the ledger
    Init,

    /// Show this month's summary
    Dashboard,

    /// Show ledger status (encryption, size, counts)
    Status,

    /// Manage transactions (add, list, edit, delete)
    Tx {
        #[command(subcommand)]
        action: Option<TxAction>,
    },

    /// Search and filter transaction history
    History {
        /// Transaction type: income or expense
        #[arg(long = "type")]
        kind: Option<String>,

        /// Category id or name
        #[arg(long)]
        category: Option<String>,

        /// Text to find in description or category name
        #[arg(short, long)]
        search: Option<String>,

        /// Month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        to: Option<String>,

        /// Write the matching transactions to a CSV file
        ///
        /// Pass a directory to use the default budget_export_<date>.csv name.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Manage categories (list, add, rename, delete)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage savings goals (list, add, edit, fund, delete)
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Show or set the monthly budget
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Ask the advice backend for tips on this month's spending
    Advice,
}

#[derive(Subcommand)]
pub enum TxAction {
    /// Record a transaction
    Add {
        /// Amount (positive)
        amount: f64,

        /// Transaction type: income or expense
        #[arg(long = "type", default_value = "expense")]
        kind: String,

        /// Category id or name (defaults to Income for income, Food & Drink otherwise)
        #[arg(short, long)]
        category: Option<String>,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Date (YYYY-MM-DD or ISO-8601), defaults to now
        #[arg(long)]
        date: Option<String>,

        /// Receipt payload stored as-is
        #[arg(long)]
        receipt: Option<String>,
    },

    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Edit a transaction (unspecified fields keep their value)
    Edit {
        /// Transaction ID
        id: String,

        #[arg(long)]
        amount: Option<f64>,

        #[arg(long = "type")]
        kind: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,

    /// Add a category
    Add {
        /// Category name
        name: String,

        /// Icon name (see `tally categories icons`)
        #[arg(long, default_value = "CircleEllipsis")]
        icon: String,
    },

    /// Rename a category
    Rename {
        /// Category id or current name
        category: String,

        /// New name
        name: String,

        /// New icon name
        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a category (its transactions move to Other)
    Delete {
        /// Category id or name
        category: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List available icons
    Icons,
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List savings goals with progress
    List,

    /// Add a savings goal
    Add {
        /// Goal title
        title: String,

        /// Target amount
        #[arg(long)]
        target: f64,

        /// Amount already saved
        #[arg(long, default_value = "0")]
        current: f64,
    },

    /// Edit a savings goal (unspecified fields keep their value)
    Edit {
        /// Goal ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        target: Option<f64>,

        #[arg(long)]
        current: Option<f64>,
    },

    /// Add money to a goal (negative to withdraw)
    Fund {
        /// Goal ID
        id: String,

        /// Amount to add
        #[arg(allow_hyphen_values = true)]
        amount: f64,
    },

    /// Delete a savings goal
    Delete {
        /// Goal ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Show the budget and this month's usage
    Show,

    /// Set the monthly budget
    Set {
        /// New monthly budget
        amount: f64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// This month's spending by category
    Spending,

    /// Monthly spending trend
    Trends {
        /// Number of months to show
        #[arg(long, default_value = "6")]
        months: usize,
    },

    /// Months that have history
    Months,
}
