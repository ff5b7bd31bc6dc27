use super::ui;
use crate::core::AnalysisContext;
use crate::core::insights::{Insight, Priority, generate_insights};
use anyhow::Result;
use console::style;

pub fn display_insights(insights: &[Insight]) -> String {
    if insights.is_empty() {
        return "No insights to show.".to_string();
    }

    insights
        .iter()
        .map(|i| {
            let badge = match i.priority {
                Priority::High => style(format!("[{}]", i.priority)).red().bold(),
                Priority::Medium => style(format!("[{}]", i.priority)).yellow(),
                Priority::Low => style(format!("[{}]", i.priority)).green(),
            };
            format!(
                "{badge} {}\n    {}\n    {} {}",
                ui::style_text(&i.title, ui::StyleType::TotalLabel),
                i.message,
                ui::style_text("→", ui::StyleType::Subtle),
                i.recommendation
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn run(ctx: &AnalysisContext<'_>, json: bool) -> Result<()> {
    let insights = generate_insights(ctx);
    if json {
        return ui::print_json(&insights);
    }
    if ctx.model.is_none() {
        println!("{}", ui::unavailable("Insights"));
        return Ok(());
    }
    println!(
        "{}\n\n{}",
        ui::style_text("Insights", ui::StyleType::Title),
        display_insights(&insights)
    );
    Ok(())
}
