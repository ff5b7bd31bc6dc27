//! Precomputed statistical model consumed by the analytics.
//!
//! The model is fitted offline and treated as read-only data here. Field names
//! follow the persisted artifact; `model_weights` and `n_months` are accepted as
//! aliases for artifacts written by older fitting runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Linear fit of total monthly expense over the period index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    #[serde(alias = "n_months")]
    pub period_count: u32,
}

/// Historical distribution of expense amounts for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub mean: f64,
    pub std: f64,
    pub q25: f64,
    pub q75: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub sum: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    /// Period label (e.g. `2024-03`) to total expense for that month.
    #[serde(default)]
    pub expense: BTreeMap<String, MonthlyAggregate>,
}

impl MonthlyStats {
    pub fn expense_sums(&self) -> Vec<f64> {
        self.expense.values().map(|m| m.sum).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStats {
    #[serde(default)]
    pub avg_monthly: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatModel {
    #[serde(alias = "model_weights")]
    pub trend: TrendFit,
    #[serde(default)]
    pub category_stats: BTreeMap<String, CategoryStats>,
    #[serde(default)]
    pub monthly_stats: MonthlyStats,
    #[serde(default)]
    pub income_stats: IncomeStats,
    /// Category to share of total expense; shares sum to 1.
    #[serde(default)]
    pub spending_patterns: BTreeMap<String, f64>,
}

/// Supplies the fitted model, or `None` when no model has been produced yet.
#[async_trait]
pub trait ModelSource: Send + Sync {
    async fn load_model(&self) -> anyhow::Result<Option<StatModel>>;
}
