use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: u64,
    pub name: String,
    pub budget_amount: Decimal,
    pub spent_amount: Decimal,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: u64,
    pub name: String,
    pub target_amount: Decimal,
    /// May exceed `target_amount`.
    pub saved_amount: Decimal,
    pub deadline: NaiveDate,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Travel,
    Emi,
    Utilities,
    Entertainment,
    Shopping,
    Health,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Travel,
        Category::Emi,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Health,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Emi => "emi",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Shopping => "shopping",
            Category::Health => "health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}' (expected all, food, travel, emi, utilities, entertainment, shopping or health)")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Category selector used by the expenses view. `All` matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Keep,
    Cancel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u64,
    pub name: String,
    /// Monthly cost.
    pub cost: Decimal,
    pub next_renewal: NaiveDate,
    pub category: String,
    pub logo: String,
    pub is_active: bool,
    pub recommendation: Option<Recommendation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Positive,
    Negative,
    Warning,
    Tip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub kind: InsightKind,
    pub value: Option<String>,
    pub trend: Option<Trend>,
    pub percentage: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{other}' (expected low, medium or high)")),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: u64,
    pub name: String,
    pub kind: String,
    pub expected_returns: String,
    pub risk: RiskLevel,
    pub time_horizon: String,
    pub min_investment: Decimal,
    pub description: String,
}

/// One month of the dashboard expense trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpensePoint {
    pub month: String,
    pub amount: Decimal,
}

/// One slice of the dashboard spending split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalInputError {
    #[error("goal name must not be empty")]
    EmptyName,
    #[error("goal target must not be empty")]
    EmptyTarget,
    #[error("goal deadline must not be empty")]
    EmptyDeadline,
    #[error("invalid goal target '{0}': expected a positive whole amount")]
    InvalidTarget(String),
    #[error("invalid goal deadline '{0}': expected YYYY-MM-DD")]
    InvalidDeadline(String),
}

/// Raw values from the goal-creation form, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: NaiveDate,
}

impl NewGoal {
    pub const ICON: &'static str = "🎯";

    pub fn parse(name: &str, target: &str, deadline: &str) -> Result<Self, GoalInputError> {
        let name = name.trim();
        let target = target.trim();
        let deadline = deadline.trim();

        if name.is_empty() {
            return Err(GoalInputError::EmptyName);
        }
        if target.is_empty() {
            return Err(GoalInputError::EmptyTarget);
        }
        if deadline.is_empty() {
            return Err(GoalInputError::EmptyDeadline);
        }

        let target_amount = target
            .parse::<u64>()
            .ok()
            .filter(|t| *t > 0)
            .map(Decimal::from)
            .ok_or_else(|| GoalInputError::InvalidTarget(target.to_string()))?;

        let deadline = NaiveDate::parse_from_str(deadline, "%Y-%m-%d")
            .map_err(|_| GoalInputError::InvalidDeadline(deadline.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            target_amount,
            deadline,
        })
    }

    pub fn into_goal(self, id: u64) -> Goal {
        Goal {
            id,
            name: self.name,
            target_amount: self.target_amount,
            saved_amount: Decimal::ZERO,
            deadline: self.deadline,
            icon: Self::ICON.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_parses_all_and_keys() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!("ALL".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Food".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Food))
        );
        assert_eq!(
            "emi".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Emi))
        );
        assert!("groceries".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn category_filter_all_matches_everything() {
        for c in Category::ALL {
            assert!(CategoryFilter::All.matches(c));
        }
        assert!(CategoryFilter::Only(Category::Food).matches(Category::Food));
        assert!(!CategoryFilter::Only(Category::Food).matches(Category::Travel));
    }

    #[test]
    fn new_goal_requires_all_fields() {
        assert_eq!(
            NewGoal::parse("", "1000", "2026-01-01"),
            Err(GoalInputError::EmptyName)
        );
        assert_eq!(
            NewGoal::parse("Trip", " ", "2026-01-01"),
            Err(GoalInputError::EmptyTarget)
        );
        assert_eq!(
            NewGoal::parse("Trip", "1000", ""),
            Err(GoalInputError::EmptyDeadline)
        );
    }

    #[test]
    fn new_goal_rejects_non_numeric_target_and_bad_date() {
        assert_eq!(
            NewGoal::parse("Trip", "lots", "2026-01-01"),
            Err(GoalInputError::InvalidTarget("lots".to_string()))
        );
        assert_eq!(
            NewGoal::parse("Trip", "0", "2026-01-01"),
            Err(GoalInputError::InvalidTarget("0".to_string()))
        );
        assert_eq!(
            NewGoal::parse("Trip", "1000", "01/02/2026"),
            Err(GoalInputError::InvalidDeadline("01/02/2026".to_string()))
        );
    }

    #[test]
    fn new_goal_starts_empty() {
        let goal = NewGoal::parse(" Dream Vacation ", "100000", "2027-01-01")
            .unwrap()
            .into_goal(5);
        assert_eq!(goal.id, 5);
        assert_eq!(goal.name, "Dream Vacation");
        assert_eq!(goal.target_amount, Decimal::from(100000));
        assert_eq!(goal.saved_amount, Decimal::ZERO);
        assert_eq!(goal.icon, NewGoal::ICON);
    }
}
