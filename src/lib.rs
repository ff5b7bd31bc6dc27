pub mod cli;
pub mod core;
pub mod providers;

use crate::core::ledger::NewTransaction;
use crate::core::config::AppConfig;
use crate::core::{AnalysisContext, LedgerSource, ModelSource, StatModel, TransactionRecord};
use crate::providers::{CsvLedger, JsonModelSource};
use anyhow::Result;
use futures::future::join;
use tracing::{debug, info, warn};

/// Commands that operate on the model and ledger.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Dashboard,
    Forecast,
    Anomalies { threshold: Option<f64> },
    Budget,
    Insights,
    Stats,
    Transactions { limit: usize },
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>, json: bool) -> Result<()> {
    info!("finsight starting...");

    let config = load_config(config_path)?;
    let model_source = JsonModelSource::new(config.model_file()?);
    let ledger = CsvLedger::new(config.ledger_file()?);

    let (model, transactions) = load_snapshot(&model_source, &ledger).await?;
    let ctx = AnalysisContext::new(model.as_ref(), &transactions).with_currency(&config.currency);

    match command {
        AppCommand::Dashboard => cli::dashboard::run(&ctx, json),
        AppCommand::Forecast => cli::forecast::run(&ctx, json),
        AppCommand::Anomalies { threshold } => {
            cli::anomalies::run(&ctx, threshold.unwrap_or(config.anomaly_threshold), json)
        }
        AppCommand::Budget => cli::budget::run(&ctx, json),
        AppCommand::Insights => cli::insights::run(&ctx, json),
        AppCommand::Stats => cli::ledger::run_stats(&transactions, &config.currency, json),
        AppCommand::Transactions { limit } => {
            cli::ledger::run_transactions(&transactions, limit, &config.currency, json)
        }
    }
}

/// Appends a transaction to the configured ledger and returns its id.
pub async fn add_transaction(entry: NewTransaction, config_path: Option<&str>) -> Result<String> {
    let config = load_config(config_path)?;
    let ledger = CsvLedger::new(config.ledger_file()?);
    cli::ledger::add(&ledger, entry).await
}

/// Loads the model and ledger together. A model that cannot be read is
/// reported and treated as unavailable.
pub async fn load_snapshot(
    model_source: &dyn ModelSource,
    ledger: &dyn LedgerSource,
) -> Result<(Option<StatModel>, Vec<TransactionRecord>)> {
    let (model, transactions) = join(model_source.load_model(), ledger.load_transactions()).await;

    let model = match model {
        Ok(Some(model)) => Some(model),
        Ok(None) => {
            warn!("No trained model found, analytics are not available");
            None
        }
        Err(e) => {
            warn!(error = %e, "Failed to load model, analytics are not available");
            None
        }
    };
    Ok((model, transactions?))
}
