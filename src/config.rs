use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};
use crate::period::Period;

/// where to start scanning for arrears when a resident has no joining date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrearsStartPolicy {
    /// january of the year before the target period
    #[default]
    PriorYearJanuary,
    /// start at the target period itself, so no arrears are counted
    TargetPeriod,
}

impl ArrearsStartPolicy {
    /// first period to scan for `target`
    pub fn fallback_start(&self, target: Period) -> Period {
        match self {
            ArrearsStartPolicy::PriorYearJanuary => target.january_of_prior_year(),
            ArrearsStartPolicy::TargetPeriod => target,
        }
    }
}

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub arrears_start: ArrearsStartPolicy,
    /// list residents without a billable room on the period ledger as N/A rows
    pub include_unbilled_in_ledger: bool,
    pub receipt_prefix: String,
    /// oldest year a payment may be recorded against
    pub min_year: i32,
    /// latest year a payment may be recorded against
    pub max_year: i32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            arrears_start: ArrearsStartPolicy::PriorYearJanuary,
            include_unbilled_in_ledger: true,
            receipt_prefix: "RCPT".to_string(),
            min_year: 2000,
            max_year: 2100,
        }
    }
}

impl LedgerConfig {
    /// only count arrears that can be traced to a known joining date
    pub fn strict() -> Self {
        Self {
            arrears_start: ArrearsStartPolicy::TargetPeriod,
            include_unbilled_in_ledger: false,
            ..Self::default()
        }
    }

    pub fn with_arrears_start(mut self, policy: ArrearsStartPolicy) -> Self {
        self.arrears_start = policy;
        self
    }

    pub fn with_unbilled_rows(mut self, include: bool) -> Self {
        self.include_unbilled_in_ledger = include;
        self
    }

    pub fn with_receipt_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.receipt_prefix = prefix.into();
        self
    }

    pub fn with_year_window(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_year > self.max_year {
            return Err(LedgerError::InvalidConfiguration {
                message: format!(
                    "min_year {} is after max_year {}",
                    self.min_year, self.max_year
                ),
            });
        }
        if self.receipt_prefix.trim().is_empty() {
            return Err(LedgerError::InvalidConfiguration {
                message: "receipt prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn accepts_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_start() {
        let target = Period::new(2024, 3).unwrap();
        assert_eq!(
            ArrearsStartPolicy::PriorYearJanuary.fallback_start(target),
            Period::new(2023, 1).unwrap()
        );
        assert_eq!(ArrearsStartPolicy::TargetPeriod.fallback_start(target), target);
    }

    #[test]
    fn test_validate() {
        assert!(LedgerConfig::default().validate().is_ok());
        assert!(LedgerConfig::strict().validate().is_ok());
        assert!(LedgerConfig::default().with_year_window(2030, 2020).validate().is_err());
        assert!(LedgerConfig::default().with_receipt_prefix("  ").validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = LedgerConfig::strict().with_receipt_prefix("PG");
        let json = serde_json::to_string(&config).unwrap();
        let back: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
