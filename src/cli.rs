use crate::domain::{CategoryFilter, RiskLevel};
use crate::format::OutputFormat;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "finboard")]
#[command(about = "Personal-finance dashboard for the terminal", long_about = None)]
pub struct Cli {
    /// Override finboard home directory (a config subdir will be created inside it).
    #[arg(long, env = "FINBOARD_HOME", global = true)]
    pub home: Option<std::path::PathBuf>,

    /// Date used for deadline and renewal math (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, env = "FINBOARD_TODAY", global = true)]
    pub today: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Dashboard,
    Budgets,
    Expenses(ExpensesArgs),
    Goals(GoalsArgs),
    Insights,
    Investments(InvestmentsArgs),
    Subscriptions,
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ExpensesArgs {
    /// Case-insensitive text to look for in descriptions.
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// all, food, travel, emi, utilities, entertainment, shopping or health.
    #[arg(long, short = 'c', default_value = "all")]
    pub category: CategoryFilter,
}

#[derive(Debug, Subcommand)]
pub enum GoalsCmd {
    List,
    /// Create a goal for this session and show the updated list.
    Add {
        name: String,
        target: String,
        deadline: String,
    },
}

#[derive(Debug, Args)]
pub struct GoalsArgs {
    #[command(subcommand)]
    pub cmd: Option<GoalsCmd>,
}

#[derive(Debug, Args)]
pub struct InvestmentsArgs {
    #[arg(long)]
    pub risk: Option<RiskLevel>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCmd {
    Show,
    Set { key: String, value: String },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub cmd: ConfigCmd,
}
