use super::{budget, forecast, insights, ledger, ui};
use crate::core::AnalysisContext;
use crate::core::budget::{BudgetPlan, recommend_budget};
use crate::core::insights::{Insight, generate_insights};
use crate::core::ledger::{BasicStats, basic_stats};
use crate::core::trend::{Prediction, predict_next_period};
use anyhow::Result;
use serde::Serialize;

/// Everything shown on the overview screen.
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub prediction: Option<Prediction>,
    pub insights: Vec<Insight>,
    pub budget_recommendations: Option<BudgetPlan>,
    pub stats: BasicStats,
}

impl Dashboard {
    pub fn build(ctx: &AnalysisContext<'_>) -> Self {
        Dashboard {
            prediction: predict_next_period(ctx),
            insights: generate_insights(ctx),
            budget_recommendations: recommend_budget(ctx),
            stats: basic_stats(ctx.transactions),
        }
    }

    pub fn display(&self, currency: &str) -> String {
        // Prediction is only missing when there is no model.
        let insights = if self.prediction.is_none() {
            ui::unavailable("Insights")
        } else {
            insights::display_insights(&self.insights)
        };
        [
            ledger::display_stats(&self.stats, currency),
            forecast::display_prediction(self.prediction.as_ref(), currency),
            insights,
            budget::display_budget(self.budget_recommendations.as_ref(), currency),
        ]
        .join("\n\n")
    }
}

pub fn run(ctx: &AnalysisContext<'_>, json: bool) -> Result<()> {
    let dashboard = Dashboard::build(ctx);
    if json {
        return ui::print_json(&dashboard);
    }
    println!("{}", dashboard.display(ctx.currency));
    Ok(())
}
