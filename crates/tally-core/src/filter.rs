//! Transaction filter builder
//!
//! A `TransactionFilter` holds the raw user selections (all optional). Applying
//! it compiles those selections once, then keeps every transaction that meets
//! all active constraints, in input order. Nothing here fails: unusable date
//! bounds are ignored and an unusable month matches nothing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::dates::{end_of_day, format_day, is_within, parse_day, start_of_day};
use crate::models::{category_name, CategoryDefinition, FilteredStats, Transaction, TransactionType};
use crate::months::MonthKey;
use crate::stats::summarize;

/// Separator between active-filter summary tokens
pub const SUMMARY_SEPARATOR: &str = " · ";

/// Selections for the history view
///
/// Blank strings and `"all"` (for month and category) mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionType>,
    pub category_id: Option<String>,
    pub search: Option<String>,
    /// `YYYY-MM`
    pub month: Option<String>,
    /// Inclusive lower day bound
    pub start_date: Option<String>,
    /// Inclusive upper day bound
    pub end_date: Option<String>,
}

/// Result of applying a filter
#[derive(Debug, Clone, Serialize)]
pub struct FilteredView {
    pub transactions: Vec<Transaction>,
    pub stats: FilteredStats,
    pub summary: String,
}

enum MonthConstraint {
    Any,
    In(MonthKey),
    Unmatchable,
}

/// Filter selections resolved into comparable values
struct CompiledFilter<'f> {
    kind: Option<TransactionType>,
    category_id: Option<&'f str>,
    needle: Option<String>,
    month: MonthConstraint,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn active_selection(value: &Option<String>) -> Option<&str> {
    active(value).filter(|v| !v.eq_ignore_ascii_case("all"))
}

impl TransactionFilter {
    /// Create a filter with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set transaction type filter
    pub fn kind(mut self, kind: Option<TransactionType>) -> Self {
        self.kind = kind;
        self
    }

    /// Set category filter (exact id)
    pub fn category(mut self, id: Option<&str>) -> Self {
        self.category_id = id.map(str::to_string);
        self
    }

    /// Set search text (matches description or category name, case-insensitive)
    pub fn search(mut self, query: Option<&str>) -> Self {
        self.search = query.map(str::to_string);
        self
    }

    /// Set month filter (`YYYY-MM` or `all`)
    pub fn month(mut self, month: Option<&str>) -> Self {
        self.month = month.map(str::to_string);
        self
    }

    /// Set start date (`YYYY-MM-DD`)
    pub fn start_date(mut self, date: Option<&str>) -> Self {
        self.start_date = date.map(str::to_string);
        self
    }

    /// Set end date (`YYYY-MM-DD`)
    pub fn end_date(mut self, date: Option<&str>) -> Self {
        self.end_date = date.map(str::to_string);
        self
    }

    /// True when at least one constraint is set
    pub fn is_active(&self) -> bool {
        self.kind.is_some()
            || active_selection(&self.category_id).is_some()
            || active(&self.search).is_some()
            || active_selection(&self.month).is_some()
            || active(&self.start_date).is_some()
            || active(&self.end_date).is_some()
    }

    fn start_day(&self) -> Option<NaiveDate> {
        active(&self.start_date).and_then(parse_day)
    }

    fn end_day(&self) -> Option<NaiveDate> {
        active(&self.end_date).and_then(parse_day)
    }

    fn compile(&self) -> CompiledFilter<'_> {
        let month = match active_selection(&self.month) {
            None => MonthConstraint::Any,
            Some(raw) => raw
                .parse::<MonthKey>()
                .map_or(MonthConstraint::Unmatchable, MonthConstraint::In),
        };

        CompiledFilter {
            kind: self.kind,
            category_id: active_selection(&self.category_id),
            needle: active(&self.search).map(str::to_lowercase),
            month,
            start: self.start_day().map(start_of_day),
            end: self.end_day().map(end_of_day),
        }
    }

    /// Whether a single transaction passes every active constraint
    pub fn matches(&self, transaction: &Transaction, categories: &[CategoryDefinition]) -> bool {
        self.compile().matches(transaction, categories)
    }

    /// Matching transactions in input order
    pub fn apply<'a>(
        &self,
        transactions: &'a [Transaction],
        categories: &[CategoryDefinition],
    ) -> Vec<&'a Transaction> {
        let compiled = self.compile();
        transactions
            .iter()
            .filter(|t| compiled.matches(t, categories))
            .collect()
    }

    /// Matching transactions with their totals and the active-filter summary
    pub fn view(
        &self,
        transactions: &[Transaction],
        categories: &[CategoryDefinition],
    ) -> FilteredView {
        let matched = self.apply(transactions, categories);
        let stats = summarize(matched.iter().copied());
        FilteredView {
            transactions: matched.into_iter().cloned().collect(),
            stats,
            summary: self.summary(categories),
        }
    }

    /// Human-readable description of the active constraints, empty when none
    pub fn summary(&self, categories: &[CategoryDefinition]) -> String {
        let mut tokens: Vec<String> = Vec::new();

        if let Some(search) = active(&self.search) {
            tokens.push(format!("\"{}\"", search));
        }
        if let Some(kind) = self.kind {
            tokens.push(kind.label().to_string());
        }
        if let Some(month) = active_selection(&self.month) {
            tokens.push(
                month
                    .parse::<MonthKey>()
                    .map_or_else(|_| month.to_string(), |key| key.label()),
            );
        }
        if let Some(id) = active_selection(&self.category_id) {
            let name = categories
                .iter()
                .find(|c| c.id == id)
                .map_or(id, |c| c.name.as_str());
            tokens.push(name.to_string());
        }
        match (self.start_day(), self.end_day()) {
            (Some(start), Some(end)) => {
                tokens.push(format!("{} - {}", format_day(start), format_day(end)))
            }
            (Some(start), None) => tokens.push(format!("from {}", format_day(start))),
            (None, Some(end)) => tokens.push(format!("until {}", format_day(end))),
            (None, None) => {}
        }

        tokens.join(SUMMARY_SEPARATOR)
    }
}

impl CompiledFilter<'_> {
    fn has_date_constraint(&self) -> bool {
        !matches!(self.month, MonthConstraint::Any) || self.start.is_some() || self.end.is_some()
    }

    fn matches(&self, t: &Transaction, categories: &[CategoryDefinition]) -> bool {
        if self.kind.is_some_and(|kind| kind != t.kind) {
            return false;
        }

        if self.category_id.is_some_and(|id| id != t.category) {
            return false;
        }

        if let Some(needle) = &self.needle {
            let in_description = t.description.to_lowercase().contains(needle.as_str());
            if !in_description
                && !category_name(categories, &t.category)
                    .to_lowercase()
                    .contains(needle.as_str())
            {
                return false;
            }
        }

        if self.has_date_constraint() {
            let Some(ts) = t.timestamp() else {
                return false;
            };
            match &self.month {
                MonthConstraint::Any => {}
                MonthConstraint::In(key) => {
                    if !key.contains(&ts) {
                        return false;
                    }
                }
                MonthConstraint::Unmatchable => return false,
            }
            let start = self.start.unwrap_or(DateTime::<Utc>::MIN_UTC);
            let end = self.end.unwrap_or(DateTime::<Utc>::MAX_UTC);
            if !is_within(&ts, &start, &end) {
                return false;
            }
        }

        true
    }
}
