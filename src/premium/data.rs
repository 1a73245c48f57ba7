//! Cumulative earned premium by origin, line of business and development

use serde::{Deserialize, Serialize};

/// Development period at which an origin's premium is fully earned
pub const FULL_YEAR_DEVELOPMENT: i64 = 12;

/// A single premium reference row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumRow {
    /// Origin period (compared against the accounting year for the current-year basis)
    pub origin: i64,

    /// Line of business the premium belongs to
    pub line_of_business: String,

    /// Development period of the cumulative figure
    pub development_period: i64,

    /// Cumulative earned premium
    pub cumulative_premium: f64,
}

/// Premium reference table keyed by (origin, line of business, development period)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PremiumReference {
    pub rows: Vec<PremiumRow>,
}

impl PremiumReference {
    pub fn new(rows: Vec<PremiumRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fully earned rows for one line of business, in table order
    pub fn full_year<'a>(&'a self, line_of_business: &'a str) -> impl Iterator<Item = &'a PremiumRow> + 'a {
        self.rows.iter().filter(move |row| {
            row.line_of_business == line_of_business
                && row.development_period == FULL_YEAR_DEVELOPMENT
        })
    }

    /// Fully earned rows for one line of business whose origin is `accounting_year`
    ///
    /// Callers expect exactly one match; zero or several means the premium
    /// basis is missing or ambiguous.
    pub fn current_year<'a>(&'a self, line_of_business: &'a str, accounting_year: i64) -> Vec<&'a PremiumRow> {
        self.full_year(line_of_business)
            .filter(|row| row.origin == accounting_year)
            .collect()
    }
}
