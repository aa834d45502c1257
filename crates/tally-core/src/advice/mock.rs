//! Mock backend for testing
//!
//! Produces canned advice without a running model server.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::AdviceBackend;

/// Mock advice backend
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// Fixed reply; `None` builds one from the prompt
    pub response: Option<String>,
    /// Whether generate should return an error
    pub fail: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Self::default()
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self::default()
    }

    /// Always answer with `response`
    pub fn with_response(response: &str) -> Self {
        Self {
            healthy: true,
            response: Some(response.to_string()),
            fail: false,
        }
    }

    /// Always fail to generate
    pub fn failing() -> Self {
        Self {
            healthy: true,
            response: None,
            fail: true,
        }
    }
}

/// Pull the category object out of a rendered advice prompt
fn largest_category(prompt: &str) -> Option<String> {
    let line = prompt
        .lines()
        .find_map(|l| l.trim().strip_prefix("- Category Spending:"))?;
    let spending: std::collections::BTreeMap<String, f64> =
        serde_json::from_str(line.trim()).ok()?;
    spending
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}

#[async_trait]
impl AdviceBackend for MockBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.fail {
            return Err(Error::InvalidData("mock backend failure".to_string()));
        }
        if let Some(response) = &self.response {
            return Ok(response.clone());
        }

        let focus = largest_category(prompt)
            .map(|name| format!("- Your biggest spend is **{}**; set a weekly cap for it.", name))
            .unwrap_or_else(|| {
                "- Log every expense this week to see where money goes.".to_string()
            });

        Ok(format!(
            "{}\n- Move a fixed amount to savings on the day income arrives.\n\
             - Review small daily purchases; they add up by month end.",
            focus
        ))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }
}
