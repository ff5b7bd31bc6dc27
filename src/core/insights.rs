//! Human-readable insights built from the model and the trend forecast.

use crate::core::context::AnalysisContext;
use crate::core::model::StatModel;
use crate::core::trend::{TrendLabel, predict_next_period};
use serde::Serialize;
use std::fmt::Display;
use tracing::debug;

const TARGET_SAVINGS_RATE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    SpendingPattern,
    Savings,
    Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Priority::High => "high",
                Priority::Medium => "medium",
                Priority::Low => "low",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightType,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    pub recommendation: String,
}

/// Produces insights in a fixed order: top spending category, savings rate,
/// then spending trend. Each check runs independently and may emit nothing.
///
/// The list is not sorted by priority. Returns an empty list when no model is
/// available.
pub fn generate_insights(ctx: &AnalysisContext<'_>) -> Vec<Insight> {
    let Some(model) = ctx.model else {
        return Vec::new();
    };

    let mut insights = Vec::new();
    insights.extend(top_spending_insight(model));
    insights.extend(savings_rate_insight(model));

    if let Some(prediction) = predict_next_period(ctx) {
        if prediction.trend_label == TrendLabel::Increasing {
            insights.push(Insight {
                kind: InsightType::Trend,
                priority: Priority::Medium,
                title: "Increasing Spending Trend".to_string(),
                message: "Your spending is trending upward".to_string(),
                recommendation: "Monitor your expenses closely".to_string(),
            });
        }
    }

    debug!("Generated {} insights", insights.len());
    insights
}

fn top_spending_insight(model: &StatModel) -> Option<Insight> {
    // First category wins ties.
    let (category, share) = model
        .spending_patterns
        .iter()
        .fold(None, |best: Option<(&String, f64)>, (c, s)| match best {
            Some((_, best_share)) if *s <= best_share => best,
            _ => Some((c, *s)),
        })?;

    Some(Insight {
        kind: InsightType::SpendingPattern,
        priority: Priority::High,
        title: "Top Spending Category".to_string(),
        message: format!(
            "'{category}' accounts for {:.1}% of your total expenses",
            share * 100.0
        ),
        recommendation: format!("Review your {category} transactions for potential savings"),
    })
}

/// Percentage of average income left after average monthly expense.
pub fn savings_rate(model: &StatModel) -> Option<f64> {
    let income = model.income_stats.avg_monthly;
    let sums = model.monthly_stats.expense_sums();
    if income == 0.0 || sums.is_empty() {
        debug!("Skipping savings rate, no income or monthly expense data");
        return None;
    }
    let avg_expense = sums.iter().sum::<f64>() / sums.len() as f64;
    Some((income - avg_expense) / income * 100.0)
}

fn savings_rate_insight(model: &StatModel) -> Option<Insight> {
    let rate = savings_rate(model)?;
    let insight = if rate < TARGET_SAVINGS_RATE {
        Insight {
            kind: InsightType::Savings,
            priority: Priority::High,
            title: "Low Savings Rate".to_string(),
            message: format!("Your savings rate is {rate:.1}%, below the recommended 20%"),
            recommendation: "Consider reducing discretionary spending".to_string(),
        }
    } else {
        Insight {
            kind: InsightType::Savings,
            priority: Priority::Low,
            title: "Good Savings Rate".to_string(),
            message: format!("Great job! Your savings rate is {rate:.1}%"),
            recommendation: "Maintain this healthy financial habit".to_string(),
        }
    };
    Some(insight)
}
