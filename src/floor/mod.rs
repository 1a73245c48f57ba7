//! Floor-to-one adjustment for loss, reserve, expense and premium columns
//!
//! Zero values in `paid_loss`, `case_reserve`, `paid_expense` and
//! `cumulative_premium` are raised to one so downstream ratios never divide by
//! zero. When a paid column is floored while the case reserve was already
//! non-zero, the extra dollar is taken back out of the case reserve so the
//! reported total is not double counted.

mod adjuster;

pub use adjuster::{floor_to_one, FloorAdjuster, FloorOutcome, FloorSummary};
