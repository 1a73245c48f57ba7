//! Model parameters shared by the preparation steps
//!
//! Passed explicitly into each call; nothing here is process-global.

use crate::error::PrepResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default months per origin step in the development age formula
pub const DEFAULT_ORIGIN_STEP_MONTHS: i64 = 3;

/// Months per development period
pub const MONTHS_PER_PERIOD: i64 = 3;

fn default_origin_step_months() -> i64 {
    DEFAULT_ORIGIN_STEP_MONTHS
}

/// Immutable configuration for triangle construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Line of business used to select the premium basis
    pub line_of_business: String,

    /// Earliest origin period modeled
    pub first_origin_period: i64,

    /// Months added to the development age per origin step behind the accounting year.
    /// 3 by default; 12 treats each origin step as a full calendar year.
    #[serde(default = "default_origin_step_months")]
    pub origin_step_months: i64,
}

impl Parameters {
    pub fn new(line_of_business: impl Into<String>, first_origin_period: i64) -> Self {
        Self {
            line_of_business: line_of_business.into(),
            first_origin_period,
            origin_step_months: DEFAULT_ORIGIN_STEP_MONTHS,
        }
    }

    pub fn with_origin_step_months(mut self, months: i64) -> Self {
        self.origin_step_months = months;
        self
    }

    /// Parse parameters from JSON text
    pub fn from_json_str(text: &str) -> PrepResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load parameters from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Development age in months of an observation in `quarter` of `origin`,
    /// evaluated as of `accounting_year`. `None` when the result does not fit in an i64.
    pub fn current_age_months(&self, accounting_year: i64, origin: i64, quarter: i64) -> Option<i64> {
        let origin_offset = accounting_year
            .checked_sub(self.first_origin_period)?
            .checked_add(1)?
            .checked_sub(origin)?;
        self.origin_step_months
            .checked_mul(origin_offset)?
            .checked_add(MONTHS_PER_PERIOD.checked_mul(quarter)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;

    #[test]
    fn test_from_json_defaults_step() {
        let params = Parameters::from_json_str(
            r#"{"line_of_business": "ppa", "first_origin_period": 2015}"#,
        )
        .unwrap();
        assert_eq!(params, Parameters::new("ppa", 2015));
        assert_eq!(params.origin_step_months, 3);
    }

    #[test]
    fn test_from_json_with_step() {
        let params = Parameters::from_json_str(
            r#"{"line_of_business": "ppa", "first_origin_period": 1, "origin_step_months": 12}"#,
        )
        .unwrap();
        assert_eq!(params.origin_step_months, 12);
    }

    #[test]
    fn test_missing_field_is_json_error() {
        assert!(matches!(
            Parameters::from_json_str(r#"{"line_of_business": "ppa"}"#),
            Err(PrepError::Json(_))
        ));
    }

    #[test]
    fn test_current_age_months() {
        let params = Parameters::new("ppa", 1);
        // 3 * (5 - 1 + 1 - 2) + 3 * 2 = 15
        assert_eq!(params.current_age_months(5, 2, 2), Some(15));

        let annual = params.with_origin_step_months(12);
        // 12 * 3 + 6 = 42
        assert_eq!(annual.current_age_months(5, 2, 2), Some(42));
    }

    #[test]
    fn test_current_age_months_overflow() {
        let params = Parameters::new("ppa", 1);
        assert_eq!(params.current_age_months(2022, -i64::MAX, 1), None);
        assert_eq!(params.current_age_months(2022, 1, i64::MAX), None);
        assert_eq!(params.current_age_months(i64::MIN, 1, 0), None);
    }
}
