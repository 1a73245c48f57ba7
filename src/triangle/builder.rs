//! Builds the current-year view from records and the premium reference

use super::view::{CurrentYearView, DevelopmentMonth, OriginPremium, OriginYear, TriangleCell};
use crate::error::{PrepError, PrepResult};
use crate::params::{Parameters, MONTHS_PER_PERIOD};
use crate::premium::PremiumReference;
use crate::records::columns::{
    ACCOUNTING_YEAR, CELL_COLUMNS, CLOSED_COUNTS, DEVELOPMENT_MONTH, DEVELOPMENT_PERIOD, ORIGIN,
    PAID_EXPENSE, PAID_LOSS, QUARTER, REPORTED_COUNTS, REPORTED_LOSS,
};
use crate::records::RecordSet;
use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

/// Key columns the builder reads besides [`CELL_COLUMNS`]
const KEY_COLUMNS: [&str; 5] = [ORIGIN, ACCOUNTING_YEAR, QUARTER, DEVELOPMENT_PERIOD, DEVELOPMENT_MONTH];

/// Builds [`CurrentYearView`]s for a fixed set of parameters
///
/// Inputs are only read; each call produces a fresh view.
#[derive(Debug, Clone, Copy)]
pub struct TriangleBuilder<'a> {
    params: &'a Parameters,
}

impl<'a> TriangleBuilder<'a> {
    pub fn new(params: &'a Parameters) -> Self {
        Self { params }
    }

    /// Build the view as of `accounting_year`
    pub fn build(
        &self,
        records: &RecordSet,
        premium: &PremiumReference,
        accounting_year: i64,
    ) -> PrepResult<CurrentYearView> {
        records.require(&KEY_COLUMNS)?;
        records.require(&CELL_COLUMNS)?;
        let n = records.num_rows()?;

        let origin = records.ints(ORIGIN)?;
        let row_years = records.ints(ACCOUNTING_YEAR)?;
        let quarter = records.ints(QUARTER)?;
        let period = records.ints(DEVELOPMENT_PERIOD)?;
        let month = records.ints(DEVELOPMENT_MONTH)?;

        log::debug!(
            "Building current-year view for {} as of {} from {} rows",
            self.params.line_of_business,
            accounting_year,
            n
        );

        let origins: Vec<i64> = origin.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

        let (current_age_months, development_periods) =
            self.development_ages(origin, quarter, accounting_year)?;

        let cells = reshape_cells(records, origin, period)?;

        let origin_years = distinct(
            origin
                .iter()
                .zip(row_years)
                .map(|(&origin, &accounting_year)| OriginYear { origin, accounting_year }),
        );

        let development_months = distinct(month.iter().zip(period).map(
            |(&development_month, &development_period)| DevelopmentMonth {
                development_month,
                development_period,
            },
        ));

        let lob = self.params.line_of_business.as_str();
        let earned_premium_by_origin: Vec<OriginPremium> = premium
            .full_year(lob)
            .map(|row| OriginPremium {
                origin: row.origin,
                cumulative_premium: row.cumulative_premium,
            })
            .collect();

        let current = premium.current_year(lob, accounting_year);
        let current_year_earned_premium = match current.as_slice() {
            [row] => row.cumulative_premium,
            matches => {
                return Err(PrepError::PremiumNotFound {
                    line_of_business: lob.to_string(),
                    accounting_year,
                    matches: matches.len(),
                })
            }
        };

        log::info!(
            "Current-year view {}: {} origins, {} cells, earned premium {:.2}",
            accounting_year,
            origins.len(),
            cells.len(),
            current_year_earned_premium
        );

        Ok(CurrentYearView {
            accounting_year,
            origin_count: origins.len(),
            origins,
            row_origins: origin.to_vec(),
            current_age_months,
            development_periods,
            current_year_earned_premium,
            cells,
            origin_years,
            development_months,
            earned_premium_by_origin,
        })
    }

    /// Per-row development age in months and in periods as of `accounting_year`
    fn development_ages(
        &self,
        origin: &[i64],
        quarter: &[i64],
        accounting_year: i64,
    ) -> PrepResult<(Vec<i64>, Vec<i64>)> {
        let mut months = Vec::with_capacity(origin.len());
        let mut periods = Vec::with_capacity(origin.len());

        for (row, (&origin, &quarter)) in origin.iter().zip(quarter).enumerate() {
            let age_months = self
                .params
                .current_age_months(accounting_year, origin, quarter)
                .ok_or(PrepError::AgeOverflow {
                    row,
                    origin,
                    quarter,
                    accounting_year,
                })?;
            if age_months < 0 {
                return Err(PrepError::NegativeAge {
                    row,
                    origin,
                    quarter,
                    accounting_year,
                    age_months,
                });
            }
            months.push(age_months);
            periods.push(age_months / MONTHS_PER_PERIOD);
        }

        Ok((months, periods))
    }
}

/// Build the view with a one-off builder
pub fn build_current_year_view(
    records: &RecordSet,
    premium: &PremiumReference,
    accounting_year: i64,
    params: &Parameters,
) -> PrepResult<CurrentYearView> {
    TriangleBuilder::new(params).build(records, premium, accounting_year)
}

/// Project the cell columns keyed by (origin, development period).
/// Rows repeating a key are dropped; the first occurrence wins.
fn reshape_cells(records: &RecordSet, origin: &[i64], period: &[i64]) -> PrepResult<Vec<TriangleCell>> {
    let paid_loss = records.floats(PAID_LOSS)?;
    let reported_loss = records.floats(REPORTED_LOSS)?;
    let paid_expense = records.floats(PAID_EXPENSE)?;
    let reported_counts = records.floats(REPORTED_COUNTS)?;
    let closed_counts = records.floats(CLOSED_COUNTS)?;

    let mut seen = HashSet::with_capacity(origin.len());
    let mut cells = Vec::with_capacity(origin.len());

    for i in 0..origin.len() {
        if !seen.insert((origin[i], period[i])) {
            continue;
        }
        cells.push(TriangleCell {
            origin: origin[i],
            development_period: period[i],
            paid_loss: paid_loss[i],
            reported_loss: reported_loss[i],
            paid_expense: paid_expense[i],
            reported_counts: reported_counts[i],
            closed_counts: closed_counts[i],
        });
    }

    let dropped = origin.len() - cells.len();
    if dropped > 0 {
        log::warn!(
            "{} rows repeat an (origin, development period) key; kept first occurrences",
            dropped
        );
    }

    Ok(cells)
}

/// Deduplicate exactly, keeping first-occurrence order
fn distinct<T: Copy + Eq + Hash>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(*item)).collect()
}
