use super::ui;
use crate::core::AnalysisContext;
use crate::core::budget::{Bucket, BudgetPlan, BudgetStatus, recommend_budget};
use anyhow::Result;
use comfy_table::Cell;

pub fn display_budget(plan: Option<&BudgetPlan>, currency: &str) -> String {
    let Some(plan) = plan else {
        return ui::unavailable("Budget recommendations");
    };
    if plan.is_empty() {
        return "No spending categories in the model.".to_string();
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Bucket"),
        ui::header_cell("Recommended"),
        ui::header_cell("Current Avg"),
        ui::header_cell("Difference"),
        ui::header_cell("Status"),
    ]);

    let mut rows: Vec<_> = plan.iter().collect();
    rows.sort_by_key(|(category, _)| Bucket::of(category));

    for (category, budget) in rows {
        let (status, over) = match budget.status {
            BudgetStatus::OverBudget => ("over_budget", true),
            BudgetStatus::UnderBudget => ("under_budget", false),
        };
        table.add_row(vec![
            Cell::new(category),
            Cell::new(ui::style_text(
                &Bucket::of(category).to_string(),
                ui::StyleType::Subtle,
            )),
            ui::money_cell(currency, budget.recommended_monthly),
            ui::money_cell(currency, budget.current_average),
            ui::difference_cell(currency, budget.difference),
            ui::flag_cell(status, over),
        ]);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text("Monthly Budget (50/30/20)", ui::StyleType::Title)
    )
}

pub fn run(ctx: &AnalysisContext<'_>, json: bool) -> Result<()> {
    let plan = recommend_budget(ctx);
    if json {
        return ui::print_json(&plan);
    }
    println!("{}", display_budget(plan.as_ref(), ctx.currency));
    Ok(())
}
