//! Inputs shared by every analytic call.

use crate::core::ledger::TransactionRecord;
use crate::core::model::StatModel;

pub const DEFAULT_CURRENCY: &str = "Rp";

/// A consistent snapshot of the model and ledger for one round of analysis.
///
/// `model` is `None` when no fitted model is available; every analytic then
/// returns its empty result.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub model: Option<&'a StatModel>,
    pub transactions: &'a [TransactionRecord],
    pub currency: &'a str,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(model: Option<&'a StatModel>, transactions: &'a [TransactionRecord]) -> Self {
        Self {
            model,
            transactions,
            currency: DEFAULT_CURRENCY,
        }
    }

    pub fn with_currency(mut self, currency: &'a str) -> Self {
        self.currency = currency;
        self
    }
}
