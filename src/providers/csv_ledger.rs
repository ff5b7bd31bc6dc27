use crate::core::{LedgerSource, TransactionKind, TransactionRecord};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, info, warn};

const MISSING_ID: &str = "N/A";

/// One row of the ledger file:
/// `transaction_id,date,type,category,amount,description`.
#[derive(Debug, Deserialize, Serialize)]
struct LedgerRow {
    #[serde(default)]
    transaction_id: Option<String>,
    date: String,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    amount: f64,
    #[serde(default)]
    description: String,
}

impl TryFrom<LedgerRow> for TransactionRecord {
    type Error = anyhow::Error;

    fn try_from(row: LedgerRow) -> Result<Self> {
        Ok(TransactionRecord {
            id: row
                .transaction_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| MISSING_ID.to_string()),
            date: parse_date(&row.date)?,
            kind: row.kind,
            category: row.category,
            amount: row.amount,
            description: row.description,
        })
    }
}

impl From<&TransactionRecord> for LedgerRow {
    fn from(record: &TransactionRecord) -> Self {
        LedgerRow {
            transaction_id: Some(record.id.clone()),
            date: record.date.format("%Y-%m-%d").to_string(),
            kind: record.kind,
            category: record.category.clone(),
            amount: record.amount,
            description: record.description.clone(),
        }
    }
}

/// Accepts `YYYY-MM-DD`, ignoring any trailing time part.
fn parse_date(value: &str) -> Result<NaiveDate> {
    let day = value
        .trim()
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| anyhow!("Invalid date '{value}': {e}"))
}

/// Transaction ledger stored as a CSV file with a header row.
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CsvLedger {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn ends_with_newline(&self) -> Result<bool> {
        let mut file = tokio::fs::File::open(&self.path)
            .await
            .with_context(|| format!("Failed to open ledger file: {}", self.path.display()))?;
        file.seek(SeekFrom::End(-1)).await?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last).await?;
        Ok(last[0] == b'\n')
    }

    fn parse(content: &[u8]) -> Result<Vec<TransactionRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content);

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<LedgerRow>().enumerate() {
            // Header is line 1.
            let line = i + 2;
            match row
                .map_err(anyhow::Error::from)
                .and_then(TransactionRecord::try_from)
            {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping ledger line {line}: {e}"),
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl LedgerSource for CsvLedger {
    async fn load_transactions(&self) -> Result<Vec<TransactionRecord>> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            info!("Ledger file not found at {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read ledger file: {}", self.path.display()))?;
        let records = Self::parse(&content)?;
        debug!("Loaded {} transactions", records.len());
        Ok(records)
    }

    async fn append_transaction(&self, record: &TransactionRecord) -> Result<()> {
        let len = tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if len == 0 {
            if let Some(parent) = self.path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        // A hand-edited ledger may lack the final newline.
        let mut prefix = Vec::new();
        if len > 0 && !self.ends_with_newline().await? {
            prefix.push(b'\n');
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(len == 0)
            .from_writer(prefix);
        writer.serialize(LedgerRow::from(record))?;
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to encode ledger row: {e}"))?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open ledger file: {}", self.path.display()))?;
        file.write_all(&bytes)
            .await
            .with_context(|| format!("Failed to write ledger file: {}", self.path.display()))?;
        file.flush().await?;

        debug!("Appended transaction {}", record.id);
        Ok(())
    }
}
