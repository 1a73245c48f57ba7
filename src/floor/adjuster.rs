//! Row-wise floor and case reserve compensation

use crate::error::PrepResult;
use crate::records::columns::{CASE_RESERVE, CUMULATIVE_PREMIUM, FLOORED_COLUMNS, PAID_EXPENSE, PAID_LOSS};
use crate::records::{Column, RecordSet};
use rayon::prelude::*;
use serde::Serialize;

/// Counts of what the floor pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FloorSummary {
    pub rows: usize,
    pub paid_loss_floored: usize,
    pub case_reserve_floored: usize,
    pub paid_expense_floored: usize,
    pub premium_floored: usize,
    /// Total one-dollar decrements taken from `case_reserve`
    pub case_reserve_compensations: usize,
    /// Compensated rows whose `case_reserve` ended at zero or below
    pub non_positive_case_reserves: usize,
}

/// Adjusted records together with the change counts
#[derive(Debug, Clone, PartialEq)]
pub struct FloorOutcome {
    pub records: RecordSet,
    pub summary: FloorSummary,
}

/// Applies the floor-to-one adjustment
///
/// The parallel path splits rows across the rayon pool and produces exactly
/// the same output as the serial path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorAdjuster {
    parallel: bool,
}

impl FloorAdjuster {
    pub fn new() -> Self {
        Self { parallel: false }
    }

    /// Adjuster that processes rows on the rayon thread pool
    pub fn parallel() -> Self {
        Self { parallel: true }
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Floor the four targeted columns and compensate `case_reserve`
    ///
    /// The input is left untouched; every other column is copied as is.
    pub fn apply(&self, records: &RecordSet) -> PrepResult<FloorOutcome> {
        records.require(&FLOORED_COLUMNS)?;
        let inputs = FloorInputs {
            paid_loss: records.floats(PAID_LOSS)?,
            case_reserve: records.floats(CASE_RESERVE)?,
            paid_expense: records.floats(PAID_EXPENSE)?,
            premium: records.floats(CUMULATIVE_PREMIUM)?,
        };
        let n = records.num_rows()?;

        log::debug!("Flooring {} rows (parallel: {})", n, self.parallel);

        let rows: Vec<FlooredRow> = if self.parallel {
            (0..n).into_par_iter().map(|i| inputs.row(i)).collect()
        } else {
            (0..n).map(|i| inputs.row(i)).collect()
        };

        let mut summary = FloorSummary { rows: n, ..Default::default() };
        let mut paid_loss = Vec::with_capacity(n);
        let mut case_reserve = Vec::with_capacity(n);
        let mut paid_expense = Vec::with_capacity(n);
        let mut premium = Vec::with_capacity(n);

        for row in &rows {
            summary.paid_loss_floored += row.paid_loss_floored as usize;
            summary.case_reserve_floored += row.case_reserve_floored as usize;
            summary.paid_expense_floored += row.paid_expense_floored as usize;
            summary.premium_floored += row.premium_floored as usize;
            summary.case_reserve_compensations += row.compensations as usize;
            if row.compensations > 0 && row.case_reserve <= 0.0 {
                summary.non_positive_case_reserves += 1;
            }

            paid_loss.push(row.paid_loss);
            case_reserve.push(row.case_reserve);
            paid_expense.push(row.paid_expense);
            premium.push(row.premium);
        }

        if summary.non_positive_case_reserves > 0 {
            log::warn!(
                "{} rows have a non-positive case reserve after compensation",
                summary.non_positive_case_reserves
            );
        }
        log::info!(
            "Floored {} paid loss, {} case reserve, {} paid expense, {} premium cells; {} reserve compensations",
            summary.paid_loss_floored,
            summary.case_reserve_floored,
            summary.paid_expense_floored,
            summary.premium_floored,
            summary.case_reserve_compensations,
        );

        let mut adjusted = records.clone();
        adjusted.insert(PAID_LOSS, Column::Float(paid_loss));
        adjusted.insert(CASE_RESERVE, Column::Float(case_reserve));
        adjusted.insert(PAID_EXPENSE, Column::Float(paid_expense));
        adjusted.insert(CUMULATIVE_PREMIUM, Column::Float(premium));

        Ok(FloorOutcome { records: adjusted, summary })
    }
}

/// Serial floor adjustment returning only the adjusted records
pub fn floor_to_one(records: &RecordSet) -> PrepResult<RecordSet> {
    FloorAdjuster::new().apply(records).map(|outcome| outcome.records)
}

#[derive(Clone, Copy)]
struct FloorInputs<'a> {
    paid_loss: &'a [f64],
    case_reserve: &'a [f64],
    paid_expense: &'a [f64],
    premium: &'a [f64],
}

impl FloorInputs<'_> {
    fn row(&self, i: usize) -> FlooredRow {
        floor_row(
            self.paid_loss[i],
            self.case_reserve[i],
            self.paid_expense[i],
            self.premium[i],
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FlooredRow {
    paid_loss: f64,
    case_reserve: f64,
    paid_expense: f64,
    premium: f64,
    paid_loss_floored: bool,
    case_reserve_floored: bool,
    paid_expense_floored: bool,
    premium_floored: bool,
    compensations: u8,
}

fn at_least_one(value: f64) -> (f64, bool) {
    if value == 0.0 {
        (1.0, true)
    } else {
        (value, false)
    }
}

/// Floor one row. A compensated case reserve is not floored again, so it can
/// end at zero or below.
fn floor_row(paid_loss: f64, case_reserve: f64, paid_expense: f64, premium: f64) -> FlooredRow {
    let (paid_loss, paid_loss_floored) = at_least_one(paid_loss);
    let (mut case_reserve, case_reserve_floored) = at_least_one(case_reserve);
    let (paid_expense, paid_expense_floored) = at_least_one(paid_expense);
    let (premium, premium_floored) = at_least_one(premium);

    let mut compensations = 0;
    if paid_loss_floored && !case_reserve_floored {
        case_reserve -= 1.0;
        compensations += 1;
    }
    if paid_expense_floored && !case_reserve_floored {
        case_reserve -= 1.0;
        compensations += 1;
    }

    FlooredRow {
        paid_loss,
        case_reserve,
        paid_expense,
        premium,
        paid_loss_floored,
        case_reserve_floored,
        paid_expense_floored,
        premium_floored,
        compensations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;

    fn records(
        paid_loss: Vec<f64>,
        case_reserve: Vec<f64>,
        paid_expense: Vec<f64>,
        premium: Vec<f64>,
    ) -> RecordSet {
        RecordSet::new()
            .with_floats(PAID_LOSS, paid_loss)
            .with_floats(CASE_RESERVE, case_reserve)
            .with_floats(PAID_EXPENSE, paid_expense)
            .with_floats(CUMULATIVE_PREMIUM, premium)
    }

    #[test]
    fn test_two_row_example() {
        let input = records(
            vec![0.0, 4.0],
            vec![2.0, 0.0],
            vec![1.0, 1.0],
            vec![10.0, 10.0],
        );

        let outcome = FloorAdjuster::new().apply(&input).unwrap();
        let out = &outcome.records;

        assert_eq!(out.floats(PAID_LOSS).unwrap(), &[1.0, 4.0]);
        assert_eq!(out.floats(CASE_RESERVE).unwrap(), &[1.0, 1.0]);
        assert_eq!(out.floats(PAID_EXPENSE).unwrap(), &[1.0, 1.0]);
        assert_eq!(out.floats(CUMULATIVE_PREMIUM).unwrap(), &[10.0, 10.0]);

        assert_eq!(outcome.summary.paid_loss_floored, 1);
        assert_eq!(outcome.summary.case_reserve_floored, 1);
        assert_eq!(outcome.summary.case_reserve_compensations, 1);
        assert_eq!(outcome.summary.non_positive_case_reserves, 0);
    }

    #[test]
    fn test_compensations_are_additive() {
        let input = records(vec![0.0], vec![7.5], vec![0.0], vec![3.0]);
        let out = floor_to_one(&input).unwrap();

        assert_eq!(out.floats(PAID_LOSS).unwrap(), &[1.0]);
        assert_eq!(out.floats(PAID_EXPENSE).unwrap(), &[1.0]);
        assert_eq!(out.floats(CASE_RESERVE).unwrap(), &[5.5]);
    }

    #[test]
    fn test_no_compensation_when_reserve_also_floored() {
        let input = records(vec![0.0], vec![0.0], vec![0.0], vec![0.0]);
        let outcome = FloorAdjuster::new().apply(&input).unwrap();
        let out = &outcome.records;

        for column in FLOORED_COLUMNS {
            assert_eq!(out.floats(column).unwrap(), &[1.0], "{}", column);
        }
        assert_eq!(outcome.summary.case_reserve_compensations, 0);
        assert_eq!(outcome.summary.premium_floored, 1);
    }

    #[test]
    fn test_compensation_can_leave_non_positive_reserve() {
        let input = records(vec![0.0, 0.0], vec![1.0, 1.5], vec![0.0, 5.0], vec![1.0, 1.0]);
        let outcome = FloorAdjuster::new().apply(&input).unwrap();

        // Row 0: 1 - 2 = -1, not floored again; row 1: 1.5 - 1 = 0.5
        assert_eq!(outcome.records.floats(CASE_RESERVE).unwrap(), &[-1.0, 0.5]);
        assert_eq!(outcome.summary.non_positive_case_reserves, 1);
    }

    #[test]
    fn test_untouched_rows_keep_reserve() {
        let input = records(vec![3.0, 0.5], vec![9.0, -2.0], vec![2.0, 4.0], vec![8.0, 8.0]);
        let out = floor_to_one(&input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_second_pass_is_a_no_op() {
        let input = records(
            vec![0.0, 4.0, 0.0, 2.0],
            vec![2.0, 0.0, 6.0, 3.0],
            vec![1.0, 0.0, 0.0, 2.0],
            vec![10.0, 0.0, 10.0, 10.0],
        );
        let once = floor_to_one(&input).unwrap();
        let twice = floor_to_one(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_not_mutated_and_other_columns_survive() {
        let input = records(vec![0.0], vec![5.0], vec![1.0], vec![1.0]).with_ints("origin", vec![3]);
        let before = input.clone();
        let out = floor_to_one(&input).unwrap();

        assert_eq!(input, before);
        assert_eq!(out.ints("origin").unwrap(), &[3]);
        let names: Vec<&str> = out.names().collect();
        assert_eq!(names, vec![PAID_LOSS, CASE_RESERVE, PAID_EXPENSE, CUMULATIVE_PREMIUM, "origin"]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let n = 1000;
        let paid_loss: Vec<f64> = (0..n).map(|i| (i % 3) as f64).collect();
        let case_reserve: Vec<f64> = (0..n).map(|i| (i % 5) as f64 * 2.0).collect();
        let paid_expense: Vec<f64> = (0..n).map(|i| (i % 4) as f64).collect();
        let premium: Vec<f64> = (0..n).map(|i| (i % 7) as f64 * 100.0).collect();
        let input = records(paid_loss, case_reserve, paid_expense, premium);

        assert!(!FloorAdjuster::new().is_parallel());
        assert!(FloorAdjuster::parallel().is_parallel());

        let serial = FloorAdjuster::new().apply(&input).unwrap();
        let parallel = FloorAdjuster::parallel().apply(&input).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let input = RecordSet::new()
            .with_floats(PAID_LOSS, vec![0.0])
            .with_floats(CASE_RESERVE, vec![0.0])
            .with_floats(PAID_EXPENSE, vec![0.0]);
        match FloorAdjuster::new().apply(&input) {
            Err(PrepError::Schema(msg)) => assert!(msg.contains(CUMULATIVE_PREMIUM)),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_unequal_columns_are_length_mismatch() {
        let input = records(vec![0.0, 1.0], vec![1.0], vec![1.0, 1.0], vec![1.0, 1.0]);
        assert!(matches!(
            FloorAdjuster::parallel().apply(&input),
            Err(PrepError::LengthMismatch { .. })
        ));
    }
}
