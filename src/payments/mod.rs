pub mod recorder;

use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::period::Period;
use crate::types::PaymentMode;

pub use recorder::PaymentRecorder;

/// payment as entered by an operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInput {
    pub amount: Money,
    pub month: u32,
    pub year: i32,
    pub mode: PaymentMode,
    #[serde(default)]
    pub notes: String,
}

impl PaymentInput {
    pub fn new(amount: Money, period: Period, mode: PaymentMode) -> Self {
        Self {
            amount,
            month: period.month(),
            year: period.year(),
            mode,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// reject malformed input before any ledger math runs
    pub fn validate(&self, config: &LedgerConfig) -> Result<Period> {
        if !self.amount.is_positive() {
            return Err(LedgerError::invalid_input(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if !config.accepts_year(self.year) {
            return Err(LedgerError::invalid_input(format!(
                "year {} is outside {}..={}",
                self.year, config.min_year, config.max_year
            )));
        }
        Period::new(self.year, self.month)
    }
}
