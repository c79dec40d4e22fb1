mod cli;
mod config;
mod domain;
mod format;
mod metrics;
mod sample;
mod state;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::cli::{Cli, Command, ConfigCmd, ExpensesArgs, GoalsCmd, InvestmentsArgs};
use crate::config::{AppConfig, app_paths, load_or_init_config, today_or, write_config};
use crate::domain::{
    Budget, Goal, Insight, InsightKind, Investment, NewGoal, Recommendation, Subscription,
    Transaction, Trend,
};
use crate::format::{
    OutputFormat, format_money, format_optional_percent, format_percent, print_table, print_tsv,
    progress_bar,
};
use crate::metrics::{
    BudgetStatus, BudgetTone, CategoryShare, GoalStatus, aggregate_totals, budget_status,
    budget_tone, category_shares, clamp_percent, goal_status, insight_summary, monthly_required,
    savings_summary, subscription_summary_within, total_amount, trend_change,
};
use crate::state::AppState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

/// Everything a page needs besides its data.
struct Ctx {
    cfg: AppConfig,
    today: NaiveDate,
    format: OutputFormat,
}

impl Ctx {
    fn money(&self, amount: Decimal) -> String {
        format_money(amount, &self.cfg.currency_symbol, self.cfg.grouping)
    }

    fn emit(&self, headers: &[&str], table_rows: &[Vec<String>], tsv_rows: &[Vec<String>]) {
        match self.format {
            OutputFormat::Table => print_table(headers, table_rows),
            OutputFormat::Tsv => print_tsv(headers, tsv_rows),
            OutputFormat::Json => {}
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = app_paths(cli.home.clone())?;
    let (mut cfg, cfg_path) = load_or_init_config(&paths)?;

    match cli.command {
        Command::Config(args) => handle_config(args.cmd, &mut cfg, &cfg_path),
        cmd => {
            let ctx = Ctx {
                cfg,
                today: today_or(cli.today.as_deref())?,
                format: cli.format,
            };
            log::debug!("rendering {cmd:?} as of {}", ctx.today);

            let mut state = AppState::from_samples();

            match cmd {
                Command::Dashboard => handle_dashboard(&ctx, &state),
                Command::Budgets => handle_budgets(&ctx, &sample::budgets()),
                Command::Expenses(args) => handle_expenses(&ctx, &mut state, args),
                Command::Goals(args) => {
                    handle_goals(&ctx, &mut state, args.cmd.unwrap_or(GoalsCmd::List))
                }
                Command::Insights => handle_insights(&ctx, &sample::insights()),
                Command::Investments(args) => {
                    handle_investments(&ctx, &sample::investments(), args)
                }
                Command::Subscriptions => handle_subscriptions(&ctx, &sample::subscriptions()),
                Command::Config(_) => unreachable!(),
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Decimal rendered for machine-readable output: at most two places, no trailing zeros.
fn raw(d: Decimal) -> String {
    d.round_dp(2).normalize().to_string()
}

fn handle_config(cmd: ConfigCmd, cfg: &mut AppConfig, cfg_path: &std::path::Path) -> Result<()> {
    match cmd {
        ConfigCmd::Show => {
            println!("# {}", cfg_path.display());
            print_json(cfg)
        }
        ConfigCmd::Set { key, value } => {
            cfg.set(&key, &value)?;
            write_config(cfg_path, cfg)?;
            println!("Set {key} = {value}.");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct DashboardView<'a> {
    today: NaiveDate,
    income: Decimal,
    expenses: Decimal,
    savings: Decimal,
    savings_rate: Option<Decimal>,
    expense_change: Option<Decimal>,
    risk_score: &'a str,
    savings_goal: Option<GoalView<'a>>,
    expense_trend: Vec<crate::domain::ExpensePoint>,
    category_split: Vec<CategoryShare>,
}

fn handle_dashboard(ctx: &Ctx, state: &AppState) -> Result<()> {
    let trend = sample::expense_trend();
    let expenses = trend.last().map(|p| p.amount).unwrap_or(Decimal::ZERO);
    let savings = savings_summary(Decimal::from(sample::MONTHLY_INCOME), expenses);
    let change = trend_change(&trend);
    let split = category_shares(&sample::category_split());
    let savings_goal = state.goals.first().map(|g| goal_view(ctx, g));

    if ctx.format == OutputFormat::Json {
        return print_json(&DashboardView {
            today: ctx.today,
            income: savings.income,
            expenses: savings.expenses,
            savings: savings.savings,
            savings_rate: savings.savings_rate,
            expense_change: change,
            risk_score: sample::RISK_SCORE,
            savings_goal,
            expense_trend: trend,
            category_split: split,
        });
    }

    let stats = vec![
        ("Monthly income", ctx.money(savings.income), raw(savings.income)),
        (
            "Total expenses",
            match change {
                Some(c) => {
                    let arrow = if c > Decimal::ZERO { "↑" } else { "↓" };
                    format!("{} ({arrow} {})", ctx.money(expenses), format_percent(c.abs()))
                }
                None => ctx.money(expenses),
            },
            raw(expenses),
        ),
        ("Savings this month", ctx.money(savings.savings), raw(savings.savings)),
        (
            "Savings rate",
            format_optional_percent(savings.savings_rate),
            savings.savings_rate.map(raw).unwrap_or_default(),
        ),
        ("Risk score", sample::RISK_SCORE.to_string(), sample::RISK_SCORE.to_string()),
    ];
    let mut stat_table: Vec<Vec<String>> = stats
        .iter()
        .map(|(k, v, _)| vec![k.to_string(), v.clone()])
        .collect();
    let mut stat_tsv: Vec<Vec<String>> = stats
        .iter()
        .map(|(k, _, v)| vec![k.to_string(), v.clone()])
        .collect();

    if let Some(goal) = &savings_goal {
        let p = goal.status.progress.unwrap_or(Decimal::ZERO);
        stat_table.push(vec![
            format!("Savings goal ({})", goal.goal.name),
            format!("{} {}", progress_bar(p, 10), format_percent(p)),
        ]);
        stat_tsv.push(vec!["Savings goal".to_string(), raw(p)]);
    }
    ctx.emit(&["METRIC", "VALUE"], &stat_table, &stat_tsv);
    println!();

    let trend_table: Vec<Vec<String>> = trend
        .iter()
        .map(|p| vec![p.month.clone(), ctx.money(p.amount)])
        .collect();
    let trend_tsv: Vec<Vec<String>> = trend
        .iter()
        .map(|p| vec![p.month.clone(), raw(p.amount)])
        .collect();
    ctx.emit(&["MONTH", "EXPENSES"], &trend_table, &trend_tsv);
    println!();

    let split_table: Vec<Vec<String>> = split
        .iter()
        .map(|s| vec![s.name.clone(), ctx.money(s.value), format_percent(s.share)])
        .collect();
    let split_tsv: Vec<Vec<String>> = split
        .iter()
        .map(|s| vec![s.name.clone(), raw(s.value), raw(s.share)])
        .collect();
    ctx.emit(&["CATEGORY", "SPENT", "SHARE"], &split_table, &split_tsv);
    Ok(())
}

#[derive(Serialize)]
struct BudgetView<'a> {
    #[serde(flatten)]
    budget: &'a Budget,
    status: BudgetStatus,
    tone: BudgetTone,
}

fn handle_budgets(ctx: &Ctx, budgets: &[Budget]) -> Result<()> {
    let warning = Decimal::from(ctx.cfg.budget_warning_percent);
    let views: Vec<BudgetView> = budgets
        .iter()
        .map(|b| {
            let status = budget_status(b);
            if status.percentage.is_none() {
                log::warn!("budget '{}' has a zero amount; percentage is undefined", b.name);
            }
            let tone = budget_tone(&status, warning);
            BudgetView {
                budget: b,
                status,
                tone,
            }
        })
        .collect();
    let totals = aggregate_totals(budgets);

    if ctx.format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Out<'a> {
            budgets: Vec<BudgetView<'a>>,
            totals: crate::metrics::BudgetTotals,
        }
        return print_json(&Out {
            budgets: views,
            totals,
        });
    }

    let tone_label = |t: BudgetTone| match t {
        BudgetTone::Healthy => "ok",
        BudgetTone::Warning => "warning",
        BudgetTone::Exceeded => "exceeded",
    };

    let table: Vec<Vec<String>> = views
        .iter()
        .map(|v| {
            let remaining = if v.status.over_budget {
                format!("over by {}", ctx.money(v.status.remaining.abs()))
            } else {
                ctx.money(v.status.remaining)
            };
            let pct = v.status.percentage.unwrap_or(Decimal::ZERO);
            vec![
                v.budget.name.clone(),
                ctx.money(v.budget.budget_amount),
                ctx.money(v.budget.spent_amount),
                format!("{} {}", progress_bar(pct, 10), format_optional_percent(v.status.percentage)),
                remaining,
                tone_label(v.tone).to_string(),
            ]
        })
        .collect();
    let tsv: Vec<Vec<String>> = views
        .iter()
        .map(|v| {
            vec![
                v.budget.name.clone(),
                raw(v.budget.budget_amount),
                raw(v.budget.spent_amount),
                v.status.percentage.map(raw).unwrap_or_default(),
                raw(v.status.remaining),
                tone_label(v.tone).to_string(),
            ]
        })
        .collect();

    ctx.emit(
        &["NAME", "BUDGET", "SPENT", "USED", "REMAINING", "STATUS"],
        &table,
        &tsv,
    );

    println!();
    match ctx.format {
        OutputFormat::Tsv => {
            println!("total_budget\t{}", raw(totals.total_budget));
            println!("total_spent\t{}", raw(totals.total_spent));
            println!("over_budget\t{}", totals.over_budget_count);
        }
        _ => {
            println!("Total budget: {}", ctx.money(totals.total_budget));
            println!("Total spent:  {}", ctx.money(totals.total_spent));
            println!("Status:       {} over budget", totals.over_budget_count);
        }
    }
    Ok(())
}

fn handle_expenses(ctx: &Ctx, state: &mut AppState, args: ExpensesArgs) -> Result<()> {
    state.set_search(args.search);
    state.set_category(args.category);

    let transactions = sample::transactions();
    let visible = state.visible_transactions(&transactions);
    let total = total_amount(visible.clone());

    if ctx.format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Out<'a> {
            search: &'a str,
            category: String,
            total: Decimal,
            transactions: Vec<&'a Transaction>,
        }
        return print_json(&Out {
            search: &state.search,
            category: state.category.to_string(),
            total,
            transactions: visible.collect(),
        });
    }

    let table: Vec<Vec<String>> = visible
        .clone()
        .map(|t| {
            vec![
                t.date.format("%d %b %Y").to_string(),
                t.description.clone(),
                t.category.to_string(),
                format!("-{}", ctx.money(t.amount)),
            ]
        })
        .collect();
    let tsv: Vec<Vec<String>> = visible
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                t.category.to_string(),
                raw(t.amount),
            ]
        })
        .collect();

    if tsv.is_empty() && ctx.format == OutputFormat::Table {
        println!("No transactions found");
    } else {
        ctx.emit(&["DATE", "DESCRIPTION", "CATEGORY", "AMOUNT"], &table, &tsv);
    }

    println!();
    match ctx.format {
        OutputFormat::Tsv => println!("total\t{}", raw(total)),
        _ => println!("Monthly total: {}", ctx.money(total)),
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalView<'a> {
    #[serde(flatten)]
    goal: &'a Goal,
    status: GoalStatus,
    monthly_required: Decimal,
}

fn goal_view<'a>(ctx: &Ctx, goal: &'a Goal) -> GoalView<'a> {
    GoalView {
        goal,
        status: goal_status(goal, ctx.today),
        monthly_required: monthly_required(goal, ctx.today),
    }
}

fn handle_goals(ctx: &Ctx, state: &mut AppState, cmd: GoalsCmd) -> Result<()> {
    if let GoalsCmd::Add {
        name,
        target,
        deadline,
    } = cmd
    {
        let new_goal = NewGoal::parse(&name, &target, &deadline)
            .context("Could not create goal")?;
        let goal = state.add_goal(new_goal);
        if ctx.format != OutputFormat::Json {
            println!(
                "Added goal '{}' target {} by {} (this session only).",
                goal.name,
                ctx.money(goal.target_amount),
                goal.deadline
            );
            println!();
        }
    }

    let views: Vec<GoalView> = state.goals.iter().map(|g| goal_view(ctx, g)).collect();

    if ctx.format == OutputFormat::Json {
        return print_json(&views);
    }

    if views.is_empty() {
        println!("No goals yet");
        return Ok(());
    }

    let label = |s: &GoalStatus| if s.on_track { "On Track" } else { "Behind" };

    let table: Vec<Vec<String>> = views
        .iter()
        .map(|v| {
            let progress = v.status.progress.unwrap_or(Decimal::ZERO);
            vec![
                v.goal.name.clone(),
                v.goal.deadline.format("%d %b %Y").to_string(),
                ctx.money(v.goal.saved_amount),
                ctx.money(v.goal.target_amount),
                format!(
                    "{} {}",
                    progress_bar(clamp_percent(progress), 10),
                    format_optional_percent(v.status.progress)
                ),
                v.status.days_left.to_string(),
                ctx.money(v.monthly_required),
                label(&v.status).to_string(),
            ]
        })
        .collect();
    let tsv: Vec<Vec<String>> = views
        .iter()
        .map(|v| {
            vec![
                v.goal.name.clone(),
                v.goal.deadline.to_string(),
                raw(v.goal.saved_amount),
                raw(v.goal.target_amount),
                v.status.progress.map(raw).unwrap_or_default(),
                v.status.days_left.to_string(),
                raw(v.monthly_required),
                label(&v.status).to_string(),
            ]
        })
        .collect();

    ctx.emit(
        &[
            "GOAL", "DEADLINE", "SAVED", "TARGET", "PROGRESS", "DAYS LEFT", "MONTHLY", "STATUS",
        ],
        &table,
        &tsv,
    );
    Ok(())
}

fn insight_signal(insight: &Insight) -> String {
    match (insight.trend, insight.percentage, &insight.value) {
        (Some(trend), Some(p), _) => {
            let arrow = match trend {
                Trend::Up => "↑",
                Trend::Down => "↓",
            };
            format!("{arrow} {p}%")
        }
        (None, _, Some(value)) => value.clone(),
        _ => String::new(),
    }
}

fn handle_insights(ctx: &Ctx, insights: &[Insight]) -> Result<()> {
    let summary = insight_summary(insights);

    if ctx.format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Out<'a> {
            summary: crate::metrics::InsightSummary,
            insights: &'a [Insight],
        }
        return print_json(&Out { summary, insights });
    }

    let kind_label = |k: InsightKind| match k {
        InsightKind::Positive => "positive",
        InsightKind::Negative => "negative",
        InsightKind::Warning => "warning",
        InsightKind::Tip => "tip",
    };

    match ctx.format {
        OutputFormat::Tsv => {
            println!("positive\t{}", summary.positive);
            println!("needs_attention\t{}", summary.needs_attention);
        }
        _ => println!(
            "{} positive, {} need attention",
            summary.positive, summary.needs_attention
        ),
    }
    println!();

    let table: Vec<Vec<String>> = insights
        .iter()
        .map(|i| {
            vec![
                kind_label(i.kind).to_string(),
                i.title.clone(),
                insight_signal(i),
            ]
        })
        .collect();
    let tsv: Vec<Vec<String>> = insights
        .iter()
        .map(|i| {
            vec![
                kind_label(i.kind).to_string(),
                i.title.clone(),
                insight_signal(i),
                i.description.clone(),
            ]
        })
        .collect();
    match ctx.format {
        OutputFormat::Tsv => ctx.emit(&["KIND", "TITLE", "SIGNAL", "DESCRIPTION"], &table, &tsv),
        _ => ctx.emit(&["KIND", "TITLE", "SIGNAL"], &table, &tsv),
    }
    Ok(())
}

fn handle_investments(ctx: &Ctx, investments: &[Investment], args: InvestmentsArgs) -> Result<()> {
    let shown: Vec<&Investment> = investments
        .iter()
        .filter(|i| args.risk.is_none_or(|r| i.risk == r))
        .collect();

    if ctx.format == OutputFormat::Json {
        return print_json(&shown);
    }

    if shown.is_empty() {
        println!("(no investments)");
        return Ok(());
    }

    let row = |i: &Investment, min: String| {
        vec![
            i.name.clone(),
            i.kind.clone(),
            i.expected_returns.clone(),
            i.risk.to_string(),
            i.time_horizon.clone(),
            min,
        ]
    };
    let table: Vec<Vec<String>> = shown
        .iter()
        .map(|&i| row(i, ctx.money(i.min_investment)))
        .collect();
    let tsv: Vec<Vec<String>> = shown
        .iter()
        .map(|&i| row(i, raw(i.min_investment)))
        .collect();

    ctx.emit(
        &["NAME", "TYPE", "RETURNS", "RISK", "HORIZON", "MIN"],
        &table,
        &tsv,
    );
    Ok(())
}

fn handle_subscriptions(ctx: &Ctx, subs: &[Subscription]) -> Result<()> {
    let summary = subscription_summary_within(subs, ctx.today, ctx.cfg.renewal_window_days);
    let cancel_count = subs
        .iter()
        .filter(|s| s.recommendation == Some(Recommendation::Cancel))
        .count();

    if ctx.format == OutputFormat::Json {
        #[derive(Serialize)]
        struct Out<'a> {
            today: NaiveDate,
            summary: crate::metrics::SubscriptionSummary<'a>,
            subscriptions: &'a [Subscription],
        }
        return print_json(&Out {
            today: ctx.today,
            summary,
            subscriptions: subs,
        });
    }

    match ctx.format {
        OutputFormat::Tsv => {
            println!("monthly_total\t{}", raw(summary.monthly_total));
            println!("potential_savings\t{}", raw(summary.potential_savings));
            println!("renewing_soon\t{}", summary.upcoming_renewals.len());
        }
        _ => {
            println!("Monthly spend:     {}", ctx.money(summary.monthly_total));
            println!(
                "Potential savings: {}/mo",
                ctx.money(summary.potential_savings)
            );
            println!(
                "Renewing soon:     {} within {} days",
                summary.upcoming_renewals.len(),
                ctx.cfg.renewal_window_days
            );
            if summary.potential_savings > Decimal::ZERO {
                println!(
                    "You could save {}/month by cancelling {} unused or rarely-used subscriptions.",
                    ctx.money(summary.potential_savings),
                    cancel_count
                );
            }
        }
    }
    println!();

    let note = |s: &Subscription| {
        if !s.is_active {
            "inactive"
        } else if s.recommendation == Some(Recommendation::Cancel) {
            "consider cancelling"
        } else {
            ""
        }
    };

    let table: Vec<Vec<String>> = subs
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                s.category.clone(),
                format!("{}/mo", ctx.money(s.cost)),
                s.next_renewal.format("%d %b").to_string(),
                note(s).to_string(),
            ]
        })
        .collect();
    let tsv: Vec<Vec<String>> = subs
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                s.category.clone(),
                raw(s.cost),
                s.next_renewal.to_string(),
                note(s).to_string(),
            ]
        })
        .collect();

    ctx.emit(&["NAME", "CATEGORY", "COST", "RENEWS", "NOTE"], &table, &tsv);
    Ok(())
}
