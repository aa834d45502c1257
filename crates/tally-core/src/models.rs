//! Domain models for Tally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::parse_timestamp;
use crate::months::MonthKey;

/// Id of the seeded income category (excluded from expense category lists)
pub const INCOME_CATEGORY_ID: &str = "cat-income";

/// Id of the sentinel category that orphaned transactions fall back to
pub const OTHER_CATEGORY_ID: &str = "cat-other";

/// Default monthly spending ceiling when none has been stored
pub const DEFAULT_MONTHLY_BUDGET: f64 = 10000.0;

/// Description stored when a transaction is saved without one
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Palette assigned to savings goals in creation order
pub const GOAL_COLORS: [&str; 5] = ["#6366f1", "#10b981", "#f59e0b", "#ec4899", "#8b5cf6"];

// ========== Transactions ==========

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Capitalized name for summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Unknown transaction type: {} (valid: income, expense)",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
///
/// `date` is kept as the stored ISO-8601 text so a malformed value never stops
/// the ledger from loading; use [`Transaction::timestamp`] for calendar math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Positive magnitude; the direction comes from `kind`
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// References `CategoryDefinition::id`
    pub category: String,
    pub description: String,
    pub date: String,
    /// Opaque encoded image, never inspected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
}

impl Transaction {
    /// Parsed timestamp, `None` when the stored date is malformed
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    /// Year-month bucket, `None` when the stored date is malformed
    pub fn month_key(&self) -> Option<MonthKey> {
        self.timestamp().map(|ts| MonthKey::of(&ts))
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

/// Input for creating or replacing a transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    /// Defaults to the creation time when adding
    pub date: Option<DateTime<Utc>>,
    pub receipt_image: Option<String>,
}

// ========== Categories ==========

/// Display glyph for a category
///
/// Stored category records keep the icon as a plain name; [`CategoryIcon::from_name`]
/// maps it through a fixed table and falls back to `CircleEllipsis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryIcon {
    Banknote,
    Utensils,
    Home,
    BookOpen,
    Bus,
    Music,
    #[default]
    CircleEllipsis,
    ShoppingCart,
    Coffee,
    Dumbbell,
    Laptop,
    GraduationCap,
    Heart,
    Pizza,
    Smartphone,
    Gamepad2,
    Shirt,
    Briefcase,
    Zap,
    Car,
    Plane,
    Gift,
    Wine,
    Camera,
    Brush,
}

/// (icon, stored name, terminal glyph)
const ICON_TABLE: &[(CategoryIcon, &str, &str)] = &[
    (CategoryIcon::Banknote, "Banknote", "💵"),
    (CategoryIcon::Utensils, "Utensils", "🍴"),
    (CategoryIcon::Home, "Home", "🏠"),
    (CategoryIcon::BookOpen, "BookOpen", "📖"),
    (CategoryIcon::Bus, "Bus", "🚌"),
    (CategoryIcon::Music, "Music", "🎵"),
    (CategoryIcon::CircleEllipsis, "CircleEllipsis", "⋯"),
    (CategoryIcon::ShoppingCart, "ShoppingCart", "🛒"),
    (CategoryIcon::Coffee, "Coffee", "☕"),
    (CategoryIcon::Dumbbell, "Dumbbell", "🏋"),
    (CategoryIcon::Laptop, "Laptop", "💻"),
    (CategoryIcon::GraduationCap, "GraduationCap", "🎓"),
    (CategoryIcon::Heart, "Heart", "❤"),
    (CategoryIcon::Pizza, "Pizza", "🍕"),
    (CategoryIcon::Smartphone, "Smartphone", "📱"),
    (CategoryIcon::Gamepad2, "Gamepad2", "🎮"),
    (CategoryIcon::Shirt, "Shirt", "👕"),
    (CategoryIcon::Briefcase, "Briefcase", "💼"),
    (CategoryIcon::Zap, "Zap", "⚡"),
    (CategoryIcon::Car, "Car", "🚗"),
    (CategoryIcon::Plane, "Plane", "✈"),
    (CategoryIcon::Gift, "Gift", "🎁"),
    (CategoryIcon::Wine, "Wine", "🍷"),
    (CategoryIcon::Camera, "Camera", "📷"),
    (CategoryIcon::Brush, "Brush", "🖌"),
];

impl CategoryIcon {
    /// Resolve a stored icon name; unknown names give the default icon
    pub fn from_name(name: &str) -> Self {
        ICON_TABLE
            .iter()
            .find(|(_, n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(icon, _, _)| *icon)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    pub fn glyph(&self) -> &'static str {
        self.entry().2
    }

    /// Every icon a user may pick for a custom category
    pub fn all() -> impl Iterator<Item = CategoryIcon> {
        ICON_TABLE.iter().map(|(icon, _, _)| *icon)
    }

    fn entry(&self) -> &'static (CategoryIcon, &'static str, &'static str) {
        ICON_TABLE
            .iter()
            .find(|(icon, _, _)| icon == self)
            .unwrap_or(&ICON_TABLE[6])
    }
}

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub id: String,
    pub name: String,
    pub icon_name: String,
    /// Seed categories cannot be renamed or deleted
    #[serde(default)]
    pub is_system: bool,
}

impl CategoryDefinition {
    pub fn icon(&self) -> CategoryIcon {
        CategoryIcon::from_name(&self.icon_name)
    }

    pub fn is_income(&self) -> bool {
        self.id == INCOME_CATEGORY_ID
    }
}

/// Categories present on first run
pub fn default_categories() -> Vec<CategoryDefinition> {
    [
        (INCOME_CATEGORY_ID, "Income", CategoryIcon::Banknote),
        ("cat-food", "Food & Drink", CategoryIcon::Utensils),
        ("cat-rent", "Rent & Bills", CategoryIcon::Home),
        ("cat-books", "Books & Study", CategoryIcon::BookOpen),
        ("cat-transport", "Transport", CategoryIcon::Bus),
        ("cat-fun", "Fun & Social", CategoryIcon::Music),
        (OTHER_CATEGORY_ID, "Other", CategoryIcon::CircleEllipsis),
    ]
    .into_iter()
    .map(|(id, name, icon)| CategoryDefinition {
        id: id.to_string(),
        name: name.to_string(),
        icon_name: icon.as_str().to_string(),
        is_system: true,
    })
    .collect()
}

/// Look up a category, falling back to the "Other" sentinel for unknown ids
pub fn resolve_category<'a>(
    categories: &'a [CategoryDefinition],
    id: &str,
) -> Option<&'a CategoryDefinition> {
    categories
        .iter()
        .find(|c| c.id == id)
        .or_else(|| categories.iter().find(|c| c.id == OTHER_CATEGORY_ID))
}

/// Display name for a category id, following the same fallback as [`resolve_category`]
pub fn category_name<'a>(categories: &'a [CategoryDefinition], id: &str) -> &'a str {
    resolve_category(categories, id).map_or("Other", |c| c.name.as_str())
}

// ========== Savings Goals ==========

/// A savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub title: String,
    pub target_amount: f64,
    /// May exceed the target; only progress reporting clamps
    pub current_amount: f64,
    pub color: String,
}

/// Input for creating or replacing a savings goal
#[derive(Debug, Clone)]
pub struct NewSavingsGoal {
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
}

// ========== Report Models ==========

/// Income and expense totals for the month containing the reference time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: MonthKey,
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub monthly_budget: f64,
    /// Negative when the budget is overspent
    pub remaining_budget: f64,
    /// Share of the budget spent, clamped to 0..=100
    pub budget_used_percent: f64,
    pub transaction_count: usize,
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category_id: String,
    pub name: String,
    pub amount: f64,
    pub percentage: f64,
    pub transaction_count: usize,
}

/// A single month in a spending trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: MonthKey,
    pub label: String,
    pub amount: f64,
    pub transaction_count: usize,
}

/// Totals over a filtered transaction set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredStats {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub count: usize,
}

/// Progress of one savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: String,
    pub title: String,
    pub color: String,
    pub current_amount: f64,
    pub target_amount: f64,
    /// Clamped to 0..=100
    pub percent: f64,
    pub remaining: f64,
    pub is_complete: bool,
}

/// Everything the dashboard shows, computed from one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub totals: MonthlyTotals,
    pub categories: Vec<CategorySpending>,
    pub trend: Vec<TrendPoint>,
    pub goals: Vec<GoalProgress>,
    pub available_months: Vec<MonthKey>,
}
