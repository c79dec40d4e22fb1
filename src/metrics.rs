//! Derived display values for the dashboard pages.
//!
//! Everything here is a pure function of its inputs. Numeric edge cases are
//! returned as values (negative remaining, `None` for a zero denominator)
//! rather than errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    Budget, CategoryFilter, CategorySlice, ExpensePoint, Goal, Insight, InsightKind,
    Subscription, Transaction,
};

/// Expected goal progress accrues linearly over this many days, counted back
/// from the deadline.
pub const GOAL_HORIZON_DAYS: i64 = 365;

/// Length of a "month" when spreading a goal's remaining amount.
pub const DAYS_PER_MONTH: i64 = 30;

/// Subscriptions renewing within this many days are flagged.
pub const RENEWAL_WINDOW_DAYS: i64 = 7;

/// Budgets above this percentage (and not yet exceeded) are shown as a warning.
pub const BUDGET_WARNING_PERCENT: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    /// `None` when the budget amount is zero.
    pub percentage: Option<Decimal>,
    pub over_budget: bool,
    /// Negative when over budget.
    pub remaining: Decimal,
}

pub fn budget_status(budget: &Budget) -> BudgetStatus {
    let remaining = budget.budget_amount - budget.spent_amount;

    if budget.budget_amount.is_zero() {
        return BudgetStatus {
            percentage: None,
            over_budget: budget.spent_amount > Decimal::ZERO,
            remaining,
        };
    }

    let percentage = budget.spent_amount / budget.budget_amount * Decimal::ONE_HUNDRED;
    BudgetStatus {
        percentage: Some(percentage),
        over_budget: percentage > Decimal::ONE_HUNDRED,
        remaining,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTone {
    Healthy,
    Warning,
    Exceeded,
}

pub fn budget_tone(status: &BudgetStatus, warning_percent: Decimal) -> BudgetTone {
    if status.over_budget {
        return BudgetTone::Exceeded;
    }
    match status.percentage {
        Some(p) if p > warning_percent => BudgetTone::Warning,
        _ => BudgetTone::Healthy,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetTotals {
    pub total_budget: Decimal,
    pub total_spent: Decimal,
    pub over_budget_count: usize,
}

pub fn aggregate_totals(budgets: &[Budget]) -> BudgetTotals {
    BudgetTotals {
        total_budget: budgets.iter().map(|b| b.budget_amount).sum(),
        total_spent: budgets.iter().map(|b| b.spent_amount).sum(),
        over_budget_count: budgets
            .iter()
            .filter(|b| b.spent_amount > b.budget_amount)
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalStatus {
    /// `None` when the target is zero.
    pub progress: Option<Decimal>,
    /// Negative once the deadline has passed.
    pub days_left: i64,
    pub expected_progress: Decimal,
    pub on_track: bool,
}

fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

pub fn goal_status(goal: &Goal, today: NaiveDate) -> GoalStatus {
    let days_left = days_until(goal.deadline, today);
    let expected_progress = Decimal::from(GOAL_HORIZON_DAYS - days_left)
        / Decimal::from(GOAL_HORIZON_DAYS)
        * Decimal::ONE_HUNDRED;

    let progress = if goal.target_amount.is_zero() {
        None
    } else {
        Some(goal.saved_amount / goal.target_amount * Decimal::ONE_HUNDRED)
    };

    GoalStatus {
        progress,
        days_left,
        expected_progress,
        on_track: progress.is_none_or(|p| p >= expected_progress),
    }
}

/// Whole amount to save per month to reach the target by the deadline.
///
/// Months left is `ceil(days_left / 30)`, never less than one. Negative when
/// the goal is already over-saved.
pub fn monthly_required(goal: &Goal, today: NaiveDate) -> Decimal {
    let remaining = goal.target_amount - goal.saved_amount;
    let days_left = days_until(goal.deadline, today);
    let months_left = (days_left + DAYS_PER_MONTH - 1)
        .div_euclid(DAYS_PER_MONTH)
        .max(1);
    (remaining / Decimal::from(months_left)).ceil()
}

/// Transactions whose description contains `search_text` (case-insensitive)
/// and whose category matches `category`, in input order.
///
/// The returned iterator is lazy and `Clone`, so it can be walked again.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    search_text: &str,
    category: CategoryFilter,
) -> impl Iterator<Item = &'a Transaction> + Clone + use<'a> {
    let needle = search_text.to_lowercase();
    transactions.iter().filter(move |t| {
        category.matches(t.category) && t.description.to_lowercase().contains(&needle)
    })
}

pub fn total_amount<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    transactions.into_iter().map(|t| t.amount).sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionSummary<'a> {
    pub monthly_total: Decimal,
    pub potential_savings: Decimal,
    pub upcoming_renewals: Vec<&'a Subscription>,
}

pub fn subscription_summary(subs: &[Subscription], today: NaiveDate) -> SubscriptionSummary<'_> {
    subscription_summary_within(subs, today, RENEWAL_WINDOW_DAYS)
}

/// Past-due renewals of active subscriptions count as upcoming.
pub fn subscription_summary_within(
    subs: &[Subscription],
    today: NaiveDate,
    window_days: i64,
) -> SubscriptionSummary<'_> {
    use crate::domain::Recommendation;

    SubscriptionSummary {
        monthly_total: subs.iter().filter(|s| s.is_active).map(|s| s.cost).sum(),
        potential_savings: subs
            .iter()
            .filter(|s| s.recommendation == Some(Recommendation::Cancel))
            .map(|s| s.cost)
            .sum(),
        upcoming_renewals: subs
            .iter()
            .filter(|s| s.is_active)
            .filter(|s| days_until(s.next_renewal, today) <= window_days)
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsightSummary {
    pub positive: usize,
    pub needs_attention: usize,
}

pub fn insight_summary(insights: &[Insight]) -> InsightSummary {
    InsightSummary {
        positive: insights
            .iter()
            .filter(|i| i.kind == InsightKind::Positive)
            .count(),
        needs_attention: insights
            .iter()
            .filter(|i| matches!(i.kind, InsightKind::Warning | InsightKind::Negative))
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub value: Decimal,
    pub share: Decimal,
}

pub fn category_shares(slices: &[CategorySlice]) -> Vec<CategoryShare> {
    let total: Decimal = slices.iter().map(|s| s.value).sum();
    slices
        .iter()
        .map(|s| CategoryShare {
            name: s.name.clone(),
            value: s.value,
            share: if total.is_zero() {
                Decimal::ZERO
            } else {
                s.value / total * Decimal::ONE_HUNDRED
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavingsSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
    /// `None` when income is zero.
    pub savings_rate: Option<Decimal>,
}

pub fn savings_summary(income: Decimal, expenses: Decimal) -> SavingsSummary {
    let savings = income - expenses;
    SavingsSummary {
        income,
        expenses,
        savings,
        savings_rate: (!income.is_zero()).then(|| savings / income * Decimal::ONE_HUNDRED),
    }
}

/// Percent change of the latest point against the one before it.
pub fn trend_change(points: &[ExpensePoint]) -> Option<Decimal> {
    let [.., prev, last] = points else {
        return None;
    };
    if prev.amount.is_zero() {
        return None;
    }
    Some((last.amount - prev.amount) / prev.amount * Decimal::ONE_HUNDRED)
}

pub fn clamp_percent(p: Decimal) -> Decimal {
    p.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
