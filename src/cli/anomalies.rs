use super::ui;
use crate::core::AnalysisContext;
use crate::core::anomaly::{Anomaly, Severity, detect_anomalies};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};
use tracing::info;

pub fn display_anomalies(anomalies: &[Anomaly], currency: &str) -> String {
    if anomalies.is_empty() {
        return "No unusual transactions found.".to_string();
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("ID"),
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Typical Range"),
        ui::header_cell("Z-Score"),
        ui::header_cell("Severity"),
    ]);

    for a in anomalies {
        table.add_row(vec![
            Cell::new(a.date),
            Cell::new(&a.transaction_id),
            Cell::new(&a.category),
            ui::money_cell(currency, a.amount),
            Cell::new(ui::style_text(&a.expected_range, ui::StyleType::Subtle)),
            Cell::new(format!("{:.2}", a.z_score)).set_alignment(CellAlignment::Right),
            ui::flag_cell(&a.severity.to_string(), a.severity == Severity::High),
        ]);
    }

    let messages = anomalies
        .iter()
        .map(|a| format!("  • {}", a.message))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n{table}\n\n{messages}",
        ui::style_text("Unusual Transactions", ui::StyleType::Title)
    )
}

pub fn run(ctx: &AnalysisContext<'_>, threshold: f64, json: bool) -> Result<()> {
    info!("Scanning {} transactions for anomalies", ctx.transactions.len());
    let anomalies = detect_anomalies(ctx, threshold);
    if json {
        return ui::print_json(&anomalies);
    }
    if ctx.model.is_none() {
        println!("{}", ui::unavailable("Anomaly detection"));
        return Ok(());
    }
    println!("{}", display_anomalies(&anomalies, ctx.currency));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_anomalies() {
        let anomalies = vec![Anomaly {
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            transaction_id: "T42".to_string(),
            category: "Food".to_string(),
            amount: 200000.0,
            expected_mean: 100000.0,
            expected_range: "Rp 80,000 - Rp 120,000".to_string(),
            z_score: 5.0,
            severity: Severity::High,
            message: "Unusual Food expense of Rp 200,000 (typically Rp 100,000)".to_string(),
        }];

        let output = console::strip_ansi_codes(&display_anomalies(&anomalies, "Rp")).to_string();
        assert!(output.contains("2024-02-29"));
        assert!(output.contains("T42"));
        assert!(output.contains("5.00"));
        assert!(output.contains("high"));
        assert!(output.contains("Unusual Food expense of Rp 200,000"));
    }

    #[test]
    fn test_display_no_anomalies() {
        assert_eq!(display_anomalies(&[], "Rp"), "No unusual transactions found.");
    }
}
