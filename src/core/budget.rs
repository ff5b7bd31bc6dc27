//! Category budgets derived from the 50/30/20 rule.

use crate::core::context::AnalysisContext;
use crate::core::model::CategoryStats;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::debug;

const NEEDS_CATEGORIES: [&str; 4] = ["Food", "Transport", "Bills", "Health"];
const WANTS_CATEGORIES: [&str; 2] = ["Entertainment", "Shopping"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Needs,
    Wants,
    Savings,
}

impl Bucket {
    /// Share of average monthly income given to the bucket.
    pub fn share(&self) -> f64 {
        match self {
            Bucket::Needs => 0.50,
            Bucket::Wants => 0.30,
            Bucket::Savings => 0.20,
        }
    }

    /// Anything not listed as a need or a want, including unrecognized
    /// labels, lands in savings.
    // NOTE: unknown categories silently receive a savings allocation here
    // rather than being reported; kept to match existing budgets.
    pub fn of(category: &str) -> Self {
        if NEEDS_CATEGORIES.contains(&category) {
            Bucket::Needs
        } else if WANTS_CATEGORIES.contains(&category) {
            Bucket::Wants
        } else {
            Bucket::Savings
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Bucket::Needs => "needs",
                Bucket::Wants => "wants",
                Bucket::Savings => "savings",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    UnderBudget,
    OverBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryBudget {
    pub recommended_monthly: f64,
    pub current_average: f64,
    pub difference: f64,
    pub status: BudgetStatus,
}

pub type BudgetPlan = BTreeMap<String, CategoryBudget>;

/// Recommends a monthly amount for every category with historical stats.
///
/// Each bucket's budget is split across its categories in proportion to their
/// historical totals. Returns `None` when no model is available.
pub fn recommend_budget(ctx: &AnalysisContext<'_>) -> Option<BudgetPlan> {
    let model = ctx.model?;
    let income = model.income_stats.avg_monthly;
    let period_count = model.trend.period_count;

    let mut bucket_totals: BTreeMap<Bucket, f64> = BTreeMap::new();
    for (category, stats) in &model.category_stats {
        *bucket_totals.entry(Bucket::of(category)).or_default() += stats.total;
    }

    let plan = model
        .category_stats
        .iter()
        .map(|(category, stats)| {
            let bucket = Bucket::of(category);
            let bucket_total = bucket_totals.get(&bucket).copied().unwrap_or(0.0);
            let budget = category_budget(stats, income * bucket.share(), bucket_total, period_count);
            (category.clone(), budget)
        })
        .collect::<BudgetPlan>();

    debug!("Recommended budgets for {} categories", plan.len());
    Some(plan)
}

fn category_budget(
    stats: &CategoryStats,
    bucket_budget: f64,
    bucket_total: f64,
    period_count: u32,
) -> CategoryBudget {
    let proportion = if bucket_total > 0.0 {
        stats.total / bucket_total
    } else {
        0.0
    };
    let recommended_monthly = bucket_budget * proportion;

    let current_average = if period_count > 0 {
        stats.total / f64::from(period_count)
    } else {
        debug!("Model has no periods, treating current average as zero");
        0.0
    };

    let status = if current_average > recommended_monthly {
        BudgetStatus::OverBudget
    } else {
        BudgetStatus::UnderBudget
    };

    CategoryBudget {
        recommended_monthly,
        current_average,
        difference: recommended_monthly - current_average,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{IncomeStats, StatModel, TrendFit};

    fn stats_with_total(total: f64) -> CategoryStats {
        CategoryStats {
            mean: 0.0,
            std: 0.0,
            q25: 0.0,
            q75: 0.0,
            total,
        }
    }

    fn model(income: f64, period_count: u32, totals: &[(&str, f64)]) -> StatModel {
        StatModel {
            trend: TrendFit {
                slope: 0.0,
                intercept: 0.0,
                period_count,
            },
            category_stats: totals
                .iter()
                .map(|(c, t)| (c.to_string(), stats_with_total(*t)))
                .collect(),
            monthly_stats: Default::default(),
            income_stats: IncomeStats {
                avg_monthly: income,
            },
            spending_patterns: BTreeMap::new(),
        }
    }

    #[test]
    fn test_bucket_membership() {
        assert_eq!(Bucket::of("Food"), Bucket::Needs);
        assert_eq!(Bucket::of("Health"), Bucket::Needs);
        assert_eq!(Bucket::of("Shopping"), Bucket::Wants);
        assert_eq!(Bucket::of("Investment"), Bucket::Savings);
        assert_eq!(Bucket::of("Crypto"), Bucket::Savings);
        // Membership is case sensitive.
        assert_eq!(Bucket::of("food"), Bucket::Savings);
        assert_eq!(Bucket::of("Bills").to_string(), "needs");
        assert_eq!(Bucket::Wants.to_string(), "wants");
    }

    #[test]
    fn test_needs_split_by_historical_total() {
        let model = model(
            10000000.0,
            5,
            &[("Food", 300000.0), ("Transport", 200000.0)],
        );
        let ctx = AnalysisContext::new(Some(&model), &[]);

        let plan = recommend_budget(&ctx).unwrap();
        let food = &plan["Food"];
        assert_eq!(food.recommended_monthly, 3000000.0);
        assert_eq!(food.current_average, 60000.0);
        assert_eq!(food.difference, 2940000.0);
        assert_eq!(food.status, BudgetStatus::UnderBudget);
        assert_eq!(plan["Transport"].recommended_monthly, 2000000.0);
    }

    #[test]
    fn test_bucket_sums_match_bucket_budget() {
        let income = 7300000.0;
        let model = model(
            income,
            6,
            &[
                ("Food", 123456.0),
                ("Bills", 98765.4),
                ("Health", 5555.5),
                ("Entertainment", 7777.0),
                ("Shopping", 3333.3),
                ("Investment", 1000.0),
                ("Education", 2500.0),
                ("Mystery", 1234.5),
            ],
        );
        let ctx = AnalysisContext::new(Some(&model), &[]);
        let plan = recommend_budget(&ctx).unwrap();

        for bucket in [Bucket::Needs, Bucket::Wants, Bucket::Savings] {
            let sum: f64 = plan
                .iter()
                .filter(|(c, _)| Bucket::of(c) == bucket)
                .map(|(_, b)| b.recommended_monthly)
                .sum();
            assert!((sum - income * bucket.share()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_unknown_category_gets_savings_allocation() {
        let model = model(1000.0, 1, &[("Mystery", 50.0)]);
        let ctx = AnalysisContext::new(Some(&model), &[]);

        let plan = recommend_budget(&ctx).unwrap();
        assert_eq!(plan["Mystery"].recommended_monthly, 200.0);
    }

    #[test]
    fn test_zero_bucket_total_recommends_zero() {
        let model = model(1000.0, 2, &[("Food", 0.0), ("Shopping", 0.0)]);
        let ctx = AnalysisContext::new(Some(&model), &[]);

        let plan = recommend_budget(&ctx).unwrap();
        assert_eq!(plan["Food"].recommended_monthly, 0.0);
        assert_eq!(plan["Food"].current_average, 0.0);
        // Equal values resolve to under budget.
        assert_eq!(plan["Food"].status, BudgetStatus::UnderBudget);
        assert_eq!(plan["Shopping"].recommended_monthly, 0.0);
    }

    #[test]
    fn test_over_budget_status() {
        // Wants budget is 300, Shopping averages 600 a month.
        let model = model(1000.0, 2, &[("Shopping", 1200.0)]);
        let ctx = AnalysisContext::new(Some(&model), &[]);

        let plan = recommend_budget(&ctx).unwrap();
        let shopping = &plan["Shopping"];
        assert_eq!(shopping.recommended_monthly, 300.0);
        assert_eq!(shopping.current_average, 600.0);
        assert_eq!(shopping.difference, -300.0);
        assert_eq!(shopping.status, BudgetStatus::OverBudget);
    }

    #[test]
    fn test_zero_periods_does_not_divide() {
        let model = model(1000.0, 0, &[("Food", 400.0)]);
        let ctx = AnalysisContext::new(Some(&model), &[]);

        let plan = recommend_budget(&ctx).unwrap();
        assert_eq!(plan["Food"].current_average, 0.0);
        assert!(plan["Food"].difference.is_finite());
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let ctx = AnalysisContext::new(None, &[]);
        assert!(recommend_budget(&ctx).is_none());
    }

    #[test]
    fn test_budget_is_idempotent() {
        let model = model(
            5000.0,
            3,
            &[("Food", 900.0), ("Shopping", 1500.0), ("Investment", 600.0)],
        );
        let ctx = AnalysisContext::new(Some(&model), &[]);
        assert_eq!(recommend_budget(&ctx), recommend_budget(&ctx));
    }
}
