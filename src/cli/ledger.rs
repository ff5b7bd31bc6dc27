use super::ui;
use crate::core::format::format_money;
use crate::core::ledger::{self, BasicStats, NewTransaction, new_transaction_id};
use crate::core::{LedgerSource, TransactionKind, TransactionRecord};
use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;
use tracing::info;

pub fn display_stats(stats: &BasicStats, currency: &str) -> String {
    let mut output = format!(
        "{}\n\n",
        ui::style_text("Ledger Summary", ui::StyleType::Title)
    );
    output.push_str(&format!(
        "Total income:   {}\nTotal expenses: {}\n{} {}\n",
        format_money(currency, stats.total_income),
        format_money(currency, stats.total_expenses),
        ui::style_text("Savings:", ui::StyleType::TotalLabel),
        ui::style_text(
            &format_money(currency, stats.savings),
            if stats.savings >= 0.0 {
                ui::StyleType::TotalValue
            } else {
                ui::StyleType::Error
            }
        ),
    ));

    if !stats.category_spending.is_empty() {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Category"), ui::header_cell("Spent")]);
        let mut categories: Vec<_> = stats.category_spending.iter().collect();
        categories.sort_by(|(_, a), (_, b)| b.total_cmp(a));
        for (category, spent) in categories {
            table.add_row(vec![Cell::new(category), ui::money_cell(currency, *spent)]);
        }
        output.push_str(&format!("\n{table}"));
    }
    output
}

pub fn display_transactions(transactions: &[TransactionRecord], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions recorded.".to_string();
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("ID"),
        ui::header_cell("Type"),
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Description"),
    ]);
    for t in transactions {
        table.add_row(vec![
            Cell::new(t.date),
            Cell::new(&t.id),
            ui::flag_cell(&t.kind.to_string(), t.kind == TransactionKind::Expense),
            Cell::new(&t.category),
            ui::money_cell(currency, t.amount),
            Cell::new(ui::style_text(&t.description, ui::StyleType::Subtle)),
        ]);
    }
    table.to_string()
}

pub fn run_stats(transactions: &[TransactionRecord], currency: &str, json: bool) -> Result<()> {
    let stats = ledger::basic_stats(transactions);
    if json {
        return ui::print_json(&stats);
    }
    println!("{}", display_stats(&stats, currency));
    Ok(())
}

pub fn run_transactions(
    transactions: &[TransactionRecord],
    limit: usize,
    currency: &str,
    json: bool,
) -> Result<()> {
    let recent = ledger::recent(transactions, limit);
    if json {
        return ui::print_json(recent);
    }
    println!("{}", display_transactions(recent, currency));
    Ok(())
}

/// Records a new transaction through the ledger and returns its id.
pub async fn add(ledger: &dyn LedgerSource, entry: NewTransaction) -> Result<String> {
    let record = TransactionRecord {
        id: new_transaction_id(Utc::now()),
        date: entry.date,
        kind: entry.kind,
        category: entry.category,
        amount: entry.amount,
        description: entry.description,
    };
    ledger.append_transaction(&record).await?;
    info!("Added transaction {}", record.id);
    println!("Transaction added successfully! ({})", record.id);
    Ok(record.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::CsvLedger;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_add_appends_to_ledger() {
        let dir = tempdir().unwrap();
        let ledger = CsvLedger::new(dir.path().join("ledger.csv"));

        let id = add(
            &ledger,
            NewTransaction {
                date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                kind: TransactionKind::Expense,
                category: "Food".to_string(),
                amount: 75000.0,
                description: "Dinner".to_string(),
            },
        )
        .await
        .unwrap();

        let records = ledger.load_transactions().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert!(id.starts_with('T'));
        assert_eq!(records[0].amount, 75000.0);
    }

    #[test]
    fn test_display_stats() {
        let mut stats = BasicStats {
            total_income: 10000.0,
            total_expenses: 12500.0,
            savings: -2500.0,
            ..Default::default()
        };
        stats.category_spending.insert("Food".to_string(), 2500.0);
        stats.category_spending.insert("Bills".to_string(), 10000.0);

        let output = console::strip_ansi_codes(&display_stats(&stats, "Rp")).to_string();
        assert!(output.contains("Total income:   Rp 10,000"));
        assert!(output.contains("Savings: Rp -2,500"));
        assert!(output.find("Bills").unwrap() < output.find("Food").unwrap());
    }

    #[test]
    fn test_display_transactions_empty() {
        assert_eq!(display_transactions(&[], "Rp"), "No transactions recorded.");
    }
}
