//! Calendar-month keys and month enumeration
//!
//! `MonthKey` is the canonical year-month identifier used for trend buckets and
//! the month filter. It serializes as `YYYY-MM`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dates::{end_of_day, start_of_day};
use crate::models::Transaction;

/// A specific calendar month
///
/// Ordering is chronological (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key, returning `None` for a month outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing a timestamp
    pub fn of(ts: &DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The previous calendar month
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next calendar month
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // month is validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.succ()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    /// First instant of the month
    pub fn start(&self) -> DateTime<Utc> {
        start_of_day(self.first_day())
    }

    /// Last instant of the month
    pub fn end(&self) -> DateTime<Utc> {
        end_of_day(self.last_day())
    }

    /// Inclusive membership: `start() <= ts <= end()`
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        Self::of(ts) == *self
    }

    /// Long label, e.g. `October 2026`
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Axis label, e.g. `Oct`
    pub fn short_label(&self) -> String {
        self.first_day().format("%b").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month: {} (expected YYYY-MM)", s))?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(format!("Invalid month: {} (expected YYYY-MM)", s));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in month: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month number in: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Month out of range: {}", s))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The `count` months ending at the month containing `now`, oldest first
pub fn trailing_months(now: &DateTime<Utc>, count: usize) -> Vec<MonthKey> {
    let mut months = Vec::with_capacity(count);
    let mut key = MonthKey::of(now);
    for _ in 0..count {
        months.push(key);
        key = key.pred();
    }
    months.reverse();
    months
}

/// Months a user may filter by, most recent first
///
/// Spans from the month of the earliest valid transaction date (or the current
/// month when there is none) through the month containing `now`. Transactions
/// dated after `now` never extend the range.
pub fn available_months(transactions: &[Transaction], now: &DateTime<Utc>) -> Vec<MonthKey> {
    let current = MonthKey::of(now);
    let earliest = transactions
        .iter()
        .filter_map(Transaction::timestamp)
        .map(|ts| MonthKey::of(&ts))
        .min()
        .map_or(current, |first| first.min(current));

    let mut months = Vec::new();
    let mut key = current;
    loop {
        months.push(key);
        if key <= earliest {
            break;
        }
        key = key.pred();
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionType};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn tx_on(date: &str) -> Transaction {
        Transaction {
            id: date.to_string(),
            amount: 10.0,
            kind: TransactionType::Expense,
            category: "cat-food".to_string(),
            description: "test".to_string(),
            date: date.to_string(),
            receipt_image: None,
        }
    }

    #[test]
    fn test_display_and_parse() {
        let key = MonthKey::new(2026, 3).unwrap();
        assert_eq!(key.to_string(), "2026-03");
        assert_eq!("2026-03".parse::<MonthKey>().unwrap(), key);
        assert_eq!("2026-3".parse::<MonthKey>().unwrap(), key);
        assert!("2026-13".parse::<MonthKey>().is_err());
        assert!("2026-00".parse::<MonthKey>().is_err());
        assert!("March".parse::<MonthKey>().is_err());
        assert!("26-03".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_pred_succ_cross_year() {
        let jan = MonthKey::new(2026, 1).unwrap();
        assert_eq!(jan.pred(), MonthKey::new(2025, 12).unwrap());
        assert_eq!(jan.pred().succ(), jan);
    }

    #[test]
    fn test_month_bounds_are_inclusive() {
        let feb = MonthKey::new(2024, 2).unwrap();
        assert_eq!(feb.last_day().to_string(), "2024-02-29");
        assert!(feb.contains(&feb.start()));
        assert!(feb.contains(&feb.end()));
        assert!(!feb.contains(&(feb.start() - chrono::Duration::nanoseconds(1))));
        assert!(!feb.contains(&(feb.end() + chrono::Duration::nanoseconds(1))));
    }

    #[test]
    fn test_labels() {
        let key = MonthKey::new(2026, 10).unwrap();
        assert_eq!(key.label(), "October 2026");
        assert_eq!(key.short_label(), "Oct");
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2026, 10).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2026-10\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_trailing_months_oldest_first() {
        let now = at(2026, 2, 15, 12, 0, 0);
        let months: Vec<String> = trailing_months(&now, 6)
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(
            months,
            vec!["2025-09", "2025-10", "2025-11", "2025-12", "2026-01", "2026-02"]
        );
    }

    #[test]
    fn test_available_months_empty_is_current_month() {
        let now = at(2026, 10, 18, 8, 0, 0);
        let months = available_months(&[], &now);
        assert_eq!(months, vec![MonthKey::new(2026, 10).unwrap()]);
    }

    #[test]
    fn test_available_months_spans_to_earliest() {
        let now = at(2026, 10, 18, 8, 0, 0);
        let txs = vec![tx_on("2026-09-10T00:00:00Z"), tx_on("2026-07-31T23:59:59.999Z")];
        let months: Vec<String> = available_months(&txs, &now)
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["2026-10", "2026-09", "2026-08", "2026-07"]);
    }

    #[test]
    fn test_available_months_first_instant_belongs_to_month() {
        let now = at(2026, 10, 18, 8, 0, 0);
        let txs = vec![tx_on("2026-08-01T00:00:00.000Z")];
        let months = available_months(&txs, &now);
        assert_eq!(months.last().unwrap().to_string(), "2026-08");
        assert_eq!(months.len(), 3);
    }

    #[test]
    fn test_available_months_ignores_invalid_and_future() {
        let now = at(2026, 10, 18, 8, 0, 0);
        let txs = vec![tx_on("garbage"), tx_on("2027-03-01T00:00:00Z")];
        let months = available_months(&txs, &now);
        assert_eq!(months, vec![MonthKey::new(2026, 10).unwrap()]);
    }
}
