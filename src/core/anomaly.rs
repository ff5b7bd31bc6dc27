//! Flags expenses that sit far outside their category's historical distribution.

use crate::core::context::AnalysisContext;
use crate::core::format::format_money;
use crate::core::ledger::TransactionKind;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

pub const DEFAULT_THRESHOLD: f64 = 2.5;
const HIGH_SEVERITY_Z: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::Medium => "medium",
                Severity::High => "high",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub transaction_id: String,
    pub category: String,
    pub amount: f64,
    pub expected_mean: f64,
    /// Interquartile range as display text, e.g. `Rp 80,000 - Rp 120,000`.
    pub expected_range: String,
    pub z_score: f64,
    pub severity: Severity,
    pub message: String,
}

/// Scores every expense against its category's mean and standard deviation.
///
/// An expense is reported when `|z| > threshold`. Income, categories without
/// stats and categories with zero standard deviation are never scored. The
/// result is ordered by descending `|z|`, ties keeping ledger order.
pub fn detect_anomalies(ctx: &AnalysisContext<'_>, threshold: f64) -> Vec<Anomaly> {
    let Some(model) = ctx.model else {
        return Vec::new();
    };

    let mut anomalies = Vec::new();
    for t in ctx.transactions {
        if t.kind != TransactionKind::Expense {
            continue;
        }
        let Some(stats) = model.category_stats.get(&t.category) else {
            continue;
        };
        if stats.std <= 0.0 {
            debug!(category = %t.category, "Skipping category with zero std");
            continue;
        }

        let z_score = (t.amount - stats.mean) / stats.std;
        if z_score.abs() <= threshold {
            continue;
        }

        let severity = if z_score.abs() > HIGH_SEVERITY_Z {
            Severity::High
        } else {
            Severity::Medium
        };
        anomalies.push(Anomaly {
            date: t.date,
            transaction_id: t.id.clone(),
            category: t.category.clone(),
            amount: t.amount,
            expected_mean: stats.mean,
            expected_range: format!(
                "{} - {}",
                format_money(ctx.currency, stats.q25),
                format_money(ctx.currency, stats.q75)
            ),
            z_score,
            severity,
            message: format!(
                "Unusual {} expense of {} (typically {})",
                t.category,
                format_money(ctx.currency, t.amount),
                format_money(ctx.currency, stats.mean)
            ),
        });
    }

    anomalies.sort_by(|a, b| b.z_score.abs().total_cmp(&a.z_score.abs()));
    debug!("Detected {} anomalies", anomalies.len());
    anomalies
}
