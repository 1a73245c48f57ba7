//! Output structures for the current-year triangle view

use crate::error::PrepResult;
use crate::numeric::divide_columns;
use ndarray::{Array1, Array2};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Values observed for one (origin, development period) cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriangleCell {
    pub origin: i64,
    pub development_period: i64,
    pub paid_loss: f64,
    pub reported_loss: f64,
    pub paid_expense: f64,
    pub reported_counts: f64,
    pub closed_counts: f64,
}

impl TriangleCell {
    /// Number of value columns in [`TriangleCell::values`]
    pub const VALUE_COLUMNS: usize = 5;

    /// Paid loss, reported loss, paid expense, reported counts, closed counts
    pub fn values(&self) -> [f64; Self::VALUE_COLUMNS] {
        [
            self.paid_loss,
            self.reported_loss,
            self.paid_expense,
            self.reported_counts,
            self.closed_counts,
        ]
    }
}

/// Origin identifier and the accounting year it was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OriginYear {
    pub origin: i64,
    pub accounting_year: i64,
}

/// Development month label and its development period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DevelopmentMonth {
    pub development_month: i64,
    pub development_period: i64,
}

/// Fully earned premium for one origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OriginPremium {
    pub origin: i64,
    pub cumulative_premium: f64,
}

/// One point on the current diagonal and the cell observed there, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagonalEntry<'a> {
    pub origin: i64,
    pub development_period: i64,
    pub cell: Option<&'a TriangleCell>,
}

/// Triangle data as of one accounting year
///
/// `row_origins`, `current_age_months` and `development_periods` run parallel
/// to the input rows. Everything else is deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentYearView {
    /// Target accounting year, shared by every origin
    pub accounting_year: i64,

    /// Distinct origins, ascending
    pub origins: Vec<i64>,

    pub origin_count: usize,

    /// Origin of each input row
    pub row_origins: Vec<i64>,

    /// Development age in months of each input row as of `accounting_year`
    pub current_age_months: Vec<i64>,

    /// `current_age_months` in development periods
    pub development_periods: Vec<i64>,

    /// Fully earned premium of the origin equal to `accounting_year`
    pub current_year_earned_premium: f64,

    /// Records reshaped by (origin, development period), first occurrence kept
    pub cells: Vec<TriangleCell>,

    /// Distinct (origin, accounting year) pairs
    pub origin_years: Vec<OriginYear>,

    /// Distinct (development month, development period) pairs
    pub development_months: Vec<DevelopmentMonth>,

    /// Fully earned premium for every origin of the line of business
    pub earned_premium_by_origin: Vec<OriginPremium>,
}

impl CurrentYearView {
    /// Cell at (origin, development period)
    pub fn cell(&self, origin: i64, development_period: i64) -> Option<&TriangleCell> {
        self.cells
            .iter()
            .find(|c| c.origin == origin && c.development_period == development_period)
    }

    /// Cells reachable as of the accounting year, one entry per distinct
    /// (origin, computed development period) in row order
    pub fn diagonal(&self) -> Vec<DiagonalEntry<'_>> {
        let index: HashMap<(i64, i64), &TriangleCell> = self
            .cells
            .iter()
            .map(|c| ((c.origin, c.development_period), c))
            .collect();

        let mut seen = HashSet::new();
        self.row_origins
            .iter()
            .zip(&self.development_periods)
            .filter(|&(&origin, &period)| seen.insert((origin, period)))
            .map(|(&origin, &development_period)| DiagonalEntry {
                origin,
                development_period,
                cell: index.get(&(origin, development_period)).copied(),
            })
            .collect()
    }

    /// Fully earned premium for an origin, if the reference carries one
    pub fn earned_premium(&self, origin: i64) -> Option<f64> {
        self.earned_premium_by_origin
            .iter()
            .find(|p| p.origin == origin)
            .map(|p| p.cumulative_premium)
    }

    /// Cell values as a matrix, one row per cell in [`TriangleCell::values`] order
    pub fn cell_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.cells.len(), TriangleCell::VALUE_COLUMNS));
        for (mut row, cell) in matrix.rows_mut().into_iter().zip(&self.cells) {
            row.assign(&Array1::from(cell.values().to_vec()));
        }
        matrix
    }

    /// Cell matrix with the loss and expense columns expressed per unit of
    /// current-year earned premium; count columns are left as is
    pub fn premium_ratios(&self) -> PrepResult<Array2<f64>> {
        let premium = self.current_year_earned_premium;
        let divisor = Array1::from(vec![premium, premium, premium, 1.0, 1.0]);
        divide_columns(&self.cell_matrix(), &divisor)
    }
}
