//! Transaction ledger types and simple ledger-wide summaries.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionKind::Income => "income",
                TransactionKind::Expense => "expense",
            }
        )
    }
}

impl FromStr for TransactionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(anyhow::anyhow!("Invalid transaction type: {}", s)),
        }
    }
}

/// A single ledger entry. Amounts are expected to be non-negative but are not
/// validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub description: String,
}

/// Fields entered by the user for a new transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub description: String,
}

/// Totals over the whole ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasicStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub savings: f64,
    pub category_spending: BTreeMap<String, f64>,
}

/// Read access to the ledger plus append-only writes.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn load_transactions(&self) -> anyhow::Result<Vec<TransactionRecord>>;
    async fn append_transaction(&self, record: &TransactionRecord) -> anyhow::Result<()>;
}

/// Generates an identifier for a newly entered transaction.
pub fn new_transaction_id(now: DateTime<Utc>) -> String {
    format!("T{}", now.timestamp())
}

pub fn basic_stats(transactions: &[TransactionRecord]) -> BasicStats {
    let mut stats = BasicStats::default();
    for t in transactions {
        match t.kind {
            TransactionKind::Income => stats.total_income += t.amount,
            TransactionKind::Expense => {
                stats.total_expenses += t.amount;
                *stats
                    .category_spending
                    .entry(t.category.clone())
                    .or_default() += t.amount;
            }
        }
    }
    stats.savings = stats.total_income - stats.total_expenses;
    stats
}

/// Returns the last `n` records in ledger order.
pub fn recent(transactions: &[TransactionRecord], n: usize) -> &[TransactionRecord] {
    let start = transactions.len().saturating_sub(n);
    &transactions[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, kind: TransactionKind, category: &str, amount: f64) -> TransactionRecord {
        TransactionRecord {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            kind,
            category: category.to_string(),
            amount,
            description: String::new(),
        }
    }

    #[test]
    fn test_basic_stats() {
        let transactions = vec![
            record("T1", TransactionKind::Income, "Salary", 5000.0),
            record("T2", TransactionKind::Expense, "Food", 300.0),
            record("T3", TransactionKind::Expense, "Food", 200.0),
            record("T4", TransactionKind::Expense, "Bills", 1000.0),
        ];

        let stats = basic_stats(&transactions);
        assert_eq!(stats.total_income, 5000.0);
        assert_eq!(stats.total_expenses, 1500.0);
        assert_eq!(stats.savings, 3500.0);
        assert_eq!(stats.category_spending.len(), 2);
        assert_eq!(stats.category_spending["Food"], 500.0);
        assert!(!stats.category_spending.contains_key("Salary"));
    }

    #[test]
    fn test_basic_stats_empty_ledger() {
        assert_eq!(basic_stats(&[]), BasicStats::default());
    }

    #[test]
    fn test_recent_returns_tail() {
        let transactions: Vec<_> = (1..=5)
            .map(|i| record(&format!("T{i}"), TransactionKind::Expense, "Food", 1.0))
            .collect();

        let tail = recent(&transactions, 2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].id, "T4");
        assert_eq!(tail[1].id, "T5");
        assert_eq!(recent(&transactions, 10).len(), 5);
    }

    #[test]
    fn test_transaction_kind_parsing() {
        assert_eq!(
            "Expense".parse::<TransactionKind>().unwrap(),
            TransactionKind::Expense
        );
        assert_eq!(
            " income".parse::<TransactionKind>().unwrap(),
            TransactionKind::Income
        );
        assert!("transfer".parse::<TransactionKind>().is_err());
        assert_eq!(TransactionKind::Expense.to_string(), "expense");
    }

    #[test]
    fn test_new_transaction_id() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(new_transaction_id(now), "T1704067200");
    }
}
