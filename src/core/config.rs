use crate::core::anomaly::DEFAULT_THRESHOLD;
use crate::core::context::DEFAULT_CURRENCY;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

const MODEL_FILE: &str = "finance_model.json";
const LEDGER_FILE: &str = "financial_transactions.csv";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Fitted model artifact (JSON). Defaults to a file in the data directory.
    pub model_path: Option<String>,
    /// Transaction ledger (CSV). Defaults to a file in the data directory.
    pub ledger_path: Option<String>,
    pub data_path: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_threshold")]
    pub anomaly_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            model_path: None,
            ledger_path: None,
            data_path: None,
            currency: default_currency(),
            anomaly_threshold: default_threshold(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "finsight", "finsight")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "finsight", "finsight")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn model_file(&self) -> Result<PathBuf> {
        match &self.model_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(self.default_data_path()?.join(MODEL_FILE)),
        }
    }

    pub fn ledger_file(&self) -> Result<PathBuf> {
        match &self.ledger_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(self.default_data_path()?.join(LEDGER_FILE)),
        }
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
