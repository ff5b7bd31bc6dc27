use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};
use finsight::core::TransactionKind;
use finsight::core::ledger::NewTransaction;
use finsight::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show forecast, insights, budget and ledger totals together
    Dashboard,
    /// Forecast next month's total spending
    Forecast,
    /// List unusually large or small expenses
    Anomalies {
        /// Z-score above which an expense is reported
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Recommend monthly budgets per category (50/30/20 rule)
    Budget,
    /// Show prioritized insights about your finances
    Insights,
    /// Show income, expense and per-category totals
    Stats,
    /// List the most recent transactions
    Transactions {
        /// Number of transactions to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Record a new transaction
    Add {
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// income or expense
        #[arg(short, long)]
        kind: TransactionKind,
        #[arg(long)]
        category: String,
        #[arg(short, long)]
        amount: f64,
        #[arg(long, default_value = "")]
        description: String,
    },
}

impl From<Commands> for finsight::AppCommand {
    fn from(cmd: Commands) -> finsight::AppCommand {
        match cmd {
            Commands::Dashboard => finsight::AppCommand::Dashboard,
            Commands::Forecast => finsight::AppCommand::Forecast,
            Commands::Anomalies { threshold } => finsight::AppCommand::Anomalies { threshold },
            Commands::Budget => finsight::AppCommand::Budget,
            Commands::Insights => finsight::AppCommand::Insights,
            Commands::Stats => finsight::AppCommand::Stats,
            Commands::Transactions { limit } => finsight::AppCommand::Transactions { limit },
            Commands::Setup | Commands::Add { .. } => {
                unreachable!("Setup and Add commands are handled separately")
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => finsight::cli::setup::setup(config_path),
        Some(Commands::Add {
            date,
            kind,
            category,
            amount,
            description,
        }) => {
            let entry = NewTransaction {
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                kind,
                category,
                amount,
                description,
            };
            finsight::add_transaction(entry, config_path).await.map(|_| ())
        }
        Some(cmd) => finsight::run_command(cmd.into(), config_path, cli.json).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
