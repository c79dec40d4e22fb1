//! Built-in datasets rendered by every page.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{
    Budget, Category, CategorySlice, ExpensePoint, Goal, Insight, InsightKind, Investment,
    Recommendation, RiskLevel, Subscription, Transaction, Trend,
};

/// Income figure shown on the dashboard.
pub const MONTHLY_INCOME: i64 = 85_000;

/// Dashboard risk label; descriptive only.
pub const RISK_SCORE: &str = "Low";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    // Literal dates below are all valid.
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn amount(v: i64) -> Decimal {
    Decimal::from(v)
}

pub fn budgets() -> Vec<Budget> {
    [
        (1, "Food & Dining", 10000, 12500, "🍔"),
        (2, "Travel", 5000, 3800, "🚗"),
        (3, "Entertainment", 3000, 2200, "🎬"),
        (4, "Shopping", 8000, 4500, "🛍️"),
        (5, "Utilities", 4000, 3200, "💡"),
        (6, "Health", 2000, 800, "🏥"),
    ]
    .into_iter()
    .map(|(id, name, budget, spent, icon)| Budget {
        id,
        name: name.to_string(),
        budget_amount: amount(budget),
        spent_amount: amount(spent),
        icon: icon.to_string(),
    })
    .collect()
}

pub fn goals() -> Vec<Goal> {
    [
        (1, "Emergency Fund", 200000, 136000, ymd(2025, 6, 30), "🛡️"),
        (2, "Vacation Trip", 80000, 45000, ymd(2025, 3, 31), "✈️"),
        (3, "New Laptop", 120000, 72000, ymd(2025, 4, 15), "💻"),
        (4, "Wedding Fund", 500000, 125000, ymd(2026, 12, 1), "💒"),
    ]
    .into_iter()
    .map(|(id, name, target, saved, deadline, icon)| Goal {
        id,
        name: name.to_string(),
        target_amount: amount(target),
        saved_amount: amount(saved),
        deadline,
        icon: icon.to_string(),
    })
    .collect()
}

pub fn transactions() -> Vec<Transaction> {
    use Category::*;

    [
        (1, ymd(2024, 12, 23), "Swiggy Order", Food, 450),
        (2, ymd(2024, 12, 22), "Uber Ride", Travel, 280),
        (3, ymd(2024, 12, 22), "Netflix Subscription", Entertainment, 649),
        (4, ymd(2024, 12, 21), "Electricity Bill", Utilities, 2100),
        (5, ymd(2024, 12, 20), "Home Loan EMI", Emi, 15000),
        (6, ymd(2024, 12, 19), "Zomato Order", Food, 580),
        (7, ymd(2024, 12, 18), "Amazon Purchase", Shopping, 2499),
        (8, ymd(2024, 12, 17), "Doctor Visit", Health, 800),
        (9, ymd(2024, 12, 16), "Metro Card Recharge", Travel, 500),
        (10, ymd(2024, 12, 15), "Grocery - BigBasket", Food, 3200),
        (11, ymd(2024, 12, 14), "Phone Bill", Utilities, 599),
        (12, ymd(2024, 12, 13), "Movie Tickets", Entertainment, 800),
    ]
    .into_iter()
    .map(|(id, date, description, category, value)| Transaction {
        id,
        date,
        description: description.to_string(),
        category,
        amount: amount(value),
    })
    .collect()
}

pub fn subscriptions() -> Vec<Subscription> {
    use Recommendation::*;

    [
        (1, "Netflix", 649, ymd(2025, 1, 15), "Entertainment", "🎬", true, Some(Keep)),
        (2, "Spotify", 119, ymd(2025, 1, 8), "Music", "🎵", true, Some(Keep)),
        (3, "Amazon Prime", 299, ymd(2025, 2, 20), "Shopping", "📦", true, None),
        (4, "Hotstar", 499, ymd(2025, 1, 5), "Entertainment", "⭐", true, Some(Cancel)),
        (5, "Gym Membership", 1500, ymd(2025, 1, 1), "Health", "💪", false, Some(Cancel)),
        (6, "LinkedIn Premium", 1850, ymd(2025, 3, 10), "Career", "💼", true, Some(Cancel)),
        (7, "iCloud Storage", 75, ymd(2025, 1, 20), "Cloud", "☁️", true, Some(Keep)),
        (8, "YouTube Premium", 139, ymd(2025, 1, 12), "Entertainment", "▶️", true, Some(Keep)),
    ]
    .into_iter()
    .map(
        |(id, name, cost, next_renewal, category, logo, is_active, recommendation)| Subscription {
            id,
            name: name.to_string(),
            cost: amount(cost),
            next_renewal,
            category: category.to_string(),
            logo: logo.to_string(),
            is_active,
            recommendation,
        },
    )
    .collect()
}

pub fn insights() -> Vec<Insight> {
    fn insight(
        id: u64,
        title: &str,
        description: &str,
        kind: InsightKind,
        value: Option<&str>,
        trend: Option<(Trend, u32)>,
    ) -> Insight {
        Insight {
            id,
            title: title.to_string(),
            description: description.to_string(),
            kind,
            value: value.map(str::to_string),
            trend: trend.map(|(t, _)| t),
            percentage: trend.map(|(_, p)| p),
        }
    }

    use InsightKind::*;
    vec![
        insight(
            1,
            "Food expenses increased",
            "Your food & dining expenses went up by 18% compared to last month. Consider cooking at home more often.",
            Negative,
            None,
            Some((Trend::Up, 18)),
        ),
        insight(
            2,
            "Great savings progress!",
            "You've saved ₹40,500 this month, exceeding your target by 12%. Keep up the excellent work!",
            Positive,
            None,
            Some((Trend::Up, 12)),
        ),
        insight(
            3,
            "Subscription optimization",
            "You can save ₹3,850/month by cancelling 3 subscriptions you rarely use (Hotstar, Gym, LinkedIn).",
            Tip,
            Some("₹3,850/mo"),
            None,
        ),
        insight(
            4,
            "Budget alert: Food category",
            "You've exceeded your food budget by ₹2,500. Consider adjusting your budget or reducing expenses.",
            Warning,
            Some("₹2,500 over"),
            None,
        ),
        insight(
            5,
            "Travel expenses down",
            "Your travel expenses decreased by 24% this month. Great job on optimizing commute costs!",
            Positive,
            None,
            Some((Trend::Down, 24)),
        ),
        insight(
            6,
            "Emergency fund milestone",
            "You're just ₹64,000 away from your emergency fund goal. At current rate, you'll reach it by March 2025.",
            Positive,
            Some("₹64,000 left"),
            None,
        ),
        insight(
            7,
            "Investment opportunity",
            "Based on your savings rate, you could invest ₹10,000/month in SIP for better returns than savings account.",
            Tip,
            Some("₹10,000/mo"),
            None,
        ),
        insight(
            8,
            "Entertainment spending stable",
            "Your entertainment expenses have remained consistent at ₹4,000/month for the past 3 months.",
            Positive,
            Some("₹4,000/mo"),
            None,
        ),
    ]
}

pub fn investments() -> Vec<Investment> {
    use RiskLevel::*;

    [
        (
            1,
            "Nifty 50 Index Fund",
            "SIP",
            "12-14%",
            Medium,
            "5+ years",
            500,
            "Diversified exposure to India's top 50 companies. Ideal for long-term wealth creation.",
        ),
        (
            2,
            "HDFC Mid-Cap Fund",
            "Mutual Fund",
            "14-16%",
            High,
            "7+ years",
            1000,
            "Higher growth potential with mid-sized companies. Suitable for aggressive investors.",
        ),
        (
            3,
            "SBI Fixed Deposit",
            "Fixed Deposit",
            "6.5-7%",
            Low,
            "1-5 years",
            10000,
            "Guaranteed returns with capital protection. Best for conservative investors.",
        ),
        (
            4,
            "Axis Bluechip Fund",
            "Mutual Fund",
            "10-12%",
            Low,
            "3+ years",
            500,
            "Invests in large-cap, stable companies. Lower volatility with steady returns.",
        ),
        (
            5,
            "PPF Account",
            "Government Scheme",
            "7.1%",
            Low,
            "15 years",
            500,
            "Tax-free returns with sovereign guarantee. Great for retirement planning.",
        ),
        (
            6,
            "Parag Parikh Flexi Cap",
            "Mutual Fund",
            "13-15%",
            Medium,
            "5+ years",
            1000,
            "Flexible allocation across market caps. Good for balanced portfolios.",
        ),
    ]
    .into_iter()
    .map(
        |(id, name, kind, expected_returns, risk, time_horizon, min, description)| Investment {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            expected_returns: expected_returns.to_string(),
            risk,
            time_horizon: time_horizon.to_string(),
            min_investment: amount(min),
            description: description.to_string(),
        },
    )
    .collect()
}

pub fn expense_trend() -> Vec<ExpensePoint> {
    [
        ("Jul", 42000),
        ("Aug", 38000),
        ("Sep", 45000),
        ("Oct", 41000),
        ("Nov", 48000),
        ("Dec", 44500),
    ]
    .into_iter()
    .map(|(month, value)| ExpensePoint {
        month: month.to_string(),
        amount: amount(value),
    })
    .collect()
}

pub fn category_split() -> Vec<CategorySlice> {
    [
        ("Food & Dining", 12000),
        ("Rent & EMI", 18000),
        ("Travel", 5500),
        ("Utilities", 3500),
        ("Entertainment", 4000),
        ("Shopping", 1500),
    ]
    .into_iter()
    .map(|(name, value)| CategorySlice {
        name: name.to_string(),
        value: amount(value),
    })
    .collect()
}
