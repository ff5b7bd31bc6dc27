use crate::core::{ModelSource, StatModel};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads a fitted model serialized as JSON.
pub struct JsonModelSource {
    path: PathBuf,
}

impl JsonModelSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonModelSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ModelSource for JsonModelSource {
    async fn load_model(&self) -> Result<Option<StatModel>> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            info!("Model file not found at {}", self.path.display());
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read model file: {}", self.path.display()))?;
        let model: StatModel = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse model file: {}", self.path.display()))?;

        debug!(
            "Loaded model with {} categories and {} months",
            model.category_stats.len(),
            model.monthly_stats.expense.len()
        );
        Ok(Some(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_model_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{
                "model_weights": {"slope": 50000.0, "intercept": 1000000.0, "n_months": 6},
                "category_stats": {
                    "Food": {"mean": 1.0, "std": 2.0, "q25": 0.5, "q75": 1.5, "total": 10.0}
                },
                "monthly_stats": {"expense": {"2024-01": {"sum": 5.0}}},
                "income_stats": {"avg_monthly": 100.0},
                "spending_patterns": {"Food": 1.0}
            }"#,
        )
        .unwrap();

        let model = JsonModelSource::new(&path).load_model().await.unwrap().unwrap();
        assert_eq!(model.trend.period_count, 6);
        assert_eq!(model.category_stats["Food"].total, 10.0);
    }

    #[tokio::test]
    async fn test_missing_model_is_none() {
        let dir = tempdir().unwrap();
        let source = JsonModelSource::new(dir.path().join("absent.json"));
        assert!(source.load_model().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_model_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, r#"{"category_stats": {}}"#).unwrap();

        let err = JsonModelSource::new(&path).load_model().await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse model file"));
    }
}
