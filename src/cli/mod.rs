//! Terminal rendering for each command

pub mod anomalies;
pub mod budget;
pub mod dashboard;
pub mod forecast;
pub mod insights;
pub mod ledger;
pub mod setup;
pub mod ui;
