//! Next-period spending forecast from the fitted linear trend.

use crate::core::context::AnalysisContext;
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

const MIN_CONFIDENCE: f64 = 0.6;
const MAX_CONFIDENCE: f64 = 0.95;
const ZERO_PREDICTION_CONFIDENCE: f64 = 0.7;

/// Direction of the fitted trend. A flat slope counts as decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Increasing,
    Decreasing,
}

impl Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TrendLabel::Increasing => "increasing",
                TrendLabel::Decreasing => "decreasing",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_amount: f64,
    #[serde(rename = "trend")]
    pub trend_label: TrendLabel,
    pub confidence: f64,
    pub range: PredictionRange,
}

/// Projects total expense for the period after the last fitted one.
///
/// Returns `None` when no model is available.
pub fn predict_next_period(ctx: &AnalysisContext<'_>) -> Option<Prediction> {
    let model = ctx.model?;
    let trend = &model.trend;

    let predicted_amount = trend.slope * f64::from(trend.period_count) + trend.intercept;
    let historical_std = population_std(&model.monthly_stats.expense_sums()).unwrap_or(0.0);

    let confidence = if predicted_amount == 0.0 {
        debug!("Predicted amount is zero, using fallback confidence");
        ZERO_PREDICTION_CONFIDENCE
    } else {
        (1.0 - historical_std / predicted_amount)
            .max(MIN_CONFIDENCE)
            .min(MAX_CONFIDENCE)
    };

    let trend_label = if trend.slope > 0.0 {
        TrendLabel::Increasing
    } else {
        TrendLabel::Decreasing
    };

    debug!(
        predicted_amount,
        historical_std, confidence, "Computed next period forecast"
    );

    Some(Prediction {
        predicted_amount,
        trend_label,
        confidence,
        range: PredictionRange {
            min: predicted_amount - historical_std,
            max: predicted_amount + historical_std,
        },
    })
}

/// Population standard deviation, `None` for an empty sample.
fn population_std(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}
