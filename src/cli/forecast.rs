use super::ui;
use crate::core::AnalysisContext;
use crate::core::format::format_money;
use crate::core::trend::{Prediction, TrendLabel, predict_next_period};
use anyhow::Result;
use comfy_table::Cell;

pub fn display_prediction(prediction: Option<&Prediction>, currency: &str) -> String {
    let Some(p) = prediction else {
        return ui::unavailable("Forecast");
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Forecast"), ui::header_cell("Value")]);
    table.add_row(vec![
        Cell::new("Predicted spending"),
        ui::money_cell(currency, p.predicted_amount),
    ]);
    table.add_row(vec![
        Cell::new("Range"),
        Cell::new(format!(
            "{} - {}",
            format_money(currency, p.range.min),
            format_money(currency, p.range.max)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Trend"),
        ui::flag_cell(
            &p.trend_label.to_string(),
            p.trend_label == TrendLabel::Increasing,
        ),
    ]);
    table.add_row(vec![
        Cell::new("Confidence"),
        Cell::new(format!("{:.0}%", p.confidence * 100.0)),
    ]);

    format!(
        "{}\n\n{table}",
        ui::style_text("Next Month Forecast", ui::StyleType::Title)
    )
}

pub fn run(ctx: &AnalysisContext<'_>, json: bool) -> Result<()> {
    let prediction = predict_next_period(ctx);
    if json {
        return ui::print_json(&prediction);
    }
    println!("{}", display_prediction(prediction.as_ref(), ctx.currency));
    Ok(())
}
