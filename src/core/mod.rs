//! Core analytics and the data they operate on

pub mod anomaly;
pub mod budget;
pub mod config;
pub mod context;
pub mod format;
pub mod insights;
pub mod ledger;
pub mod log;
pub mod model;
pub mod trend;

// Re-export main types for cleaner imports
pub use context::AnalysisContext;
pub use ledger::{LedgerSource, TransactionKind, TransactionRecord};
pub use model::{ModelSource, StatModel};
