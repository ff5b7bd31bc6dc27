pub mod csv_ledger;
pub mod model_file;

pub use csv_ledger::CsvLedger;
pub use model_file::JsonModelSource;
