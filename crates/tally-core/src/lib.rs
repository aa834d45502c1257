//! Tally Core Library
//!
//! Shared functionality for the Tally personal budget ledger:
//! - Ledger of transactions, categories, savings goals and the monthly budget
//! - Pluggable key-value persistence (encrypted SQLite, in-memory)
//! - Monthly totals, category breakdowns and spending trends
//! - Transaction filtering with summaries and filtered totals
//! - Savings goal progress
//! - CSV export
//! - Budget advice from a local text-generation backend

pub mod advice;
pub mod config;
pub mod dates;
pub mod error;
pub mod export;
pub mod filter;
pub mod goals;
pub mod ledger;
pub mod models;
pub mod months;
pub mod stats;
pub mod store;

pub use advice::{
    get_financial_insights, AdviceBackend, AdviceClient, AdviceRequest, MockBackend,
    OllamaBackend,
};
pub use config::Settings;
pub use error::{Error, Result};
pub use filter::{FilteredView, TransactionFilter};
pub use ledger::Ledger;
pub use months::MonthKey;
pub use store::{MemoryStorage, SqliteStorage, Storage};
