//! Budget advice from a local text-generation backend
//!
//! - `AdviceRequest`: the month's figures that go into the prompt
//! - `AdviceBackend` trait: anything that can turn a prompt into text
//! - `AdviceClient` enum: concrete dispatch over `OllamaBackend` and `MockBackend`
//!
//! Environment variables:
//! - `ADVICE_BACKEND`: `ollama` (default) or `mock`
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama)
//! - `OLLAMA_MODEL`: model name (defaults to the configured advice model)

mod mock;
mod ollama;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AdviceSettings;
use crate::error::Result;
use crate::models::{CategorySpending, MonthlyTotals};

const ADVICE_TEMPLATE: &str = include_str!("../../../../prompts/financial_advice.md");

/// Returned when the backend answers with nothing
pub const EMPTY_INSIGHTS: &str =
    "No insights available at the moment. Keep tracking your spending!";

/// Returned when the backend call fails
pub const FAILED_INSIGHTS: &str = "Error generating insights. Please try again later.";

/// Figures sent to the advice backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceRequest {
    pub monthly_budget: f64,
    pub total_income: f64,
    pub total_expense: f64,
    /// Expense totals keyed by category name
    pub category_spending: BTreeMap<String, f64>,
    pub currency_symbol: String,
}

impl AdviceRequest {
    /// Capture the current month's totals and category breakdown
    pub fn from_snapshot(
        totals: &MonthlyTotals,
        breakdown: &[CategorySpending],
        currency_symbol: &str,
    ) -> Self {
        let mut category_spending = BTreeMap::new();
        for entry in breakdown {
            *category_spending.entry(entry.name.clone()).or_insert(0.0) += entry.amount;
        }
        Self {
            monthly_budget: totals.monthly_budget,
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            category_spending,
            currency_symbol: currency_symbol.to_string(),
        }
    }

    /// Render the advice prompt
    pub fn build_prompt(&self) -> String {
        let categories =
            serde_json::to_string(&self.category_spending).unwrap_or_else(|_| "{}".to_string());
        ADVICE_TEMPLATE
            .replace("{{currency}}", &self.currency_symbol)
            .replace("{{budget}}", &format_amount(self.monthly_budget))
            .replace("{{income}}", &format_amount(self.total_income))
            .replace("{{expenses}}", &format_amount(self.total_expense))
            .replace("{{categories}}", &categories)
    }
}

/// Whole amounts print without decimals
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

/// Interface for text-generation backends
#[async_trait]
pub trait AdviceBackend: Send + Sync {
    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Model name (for logging)
    fn model(&self) -> &str;
}

/// Concrete advice client
#[derive(Clone)]
pub enum AdviceClient {
    Ollama(OllamaBackend),
    Mock(MockBackend),
}

impl AdviceClient {
    /// Create a client from environment variables
    ///
    /// Returns None when the selected backend is not configured.
    pub fn from_env(settings: &AdviceSettings) -> Option<Self> {
        let backend = std::env::var("ADVICE_BACKEND").unwrap_or_else(|_| "ollama".to_string());

        match backend.to_lowercase().as_str() {
            "ollama" => OllamaBackend::from_env(settings).map(AdviceClient::Ollama),
            "mock" => Some(AdviceClient::Mock(MockBackend::new())),
            _ => {
                warn!(backend = %backend, "Unknown ADVICE_BACKEND, falling back to ollama");
                OllamaBackend::from_env(settings).map(AdviceClient::Ollama)
            }
        }
    }

    pub fn mock() -> Self {
        AdviceClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl AdviceBackend for AdviceClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            AdviceClient::Ollama(b) => b.generate(prompt).await,
            AdviceClient::Mock(b) => b.generate(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AdviceClient::Ollama(b) => b.health_check().await,
            AdviceClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AdviceClient::Ollama(b) => b.model(),
            AdviceClient::Mock(b) => b.model(),
        }
    }
}

/// Ask the backend for advice on this month's figures
///
/// Never fails: an empty answer or a backend error becomes a fixed message.
pub async fn get_financial_insights<B>(backend: &B, request: &AdviceRequest) -> String
where
    B: AdviceBackend + ?Sized,
{
    let prompt = request.build_prompt();
    debug!(model = backend.model(), chars = prompt.len(), "Requesting advice");

    match backend.generate(&prompt).await {
        Ok(text) if text.trim().is_empty() => EMPTY_INSIGHTS.to_string(),
        Ok(text) => text,
        Err(e) => {
            warn!(model = backend.model(), error = %e, "Advice generation failed");
            FAILED_INSIGHTS.to_string()
        }
    }
}
