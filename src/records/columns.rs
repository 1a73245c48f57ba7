//! Canonical column names for loss development records

/// Origin (accident) period identifier
pub const ORIGIN: &str = "origin";
/// Calendar year the observation was made in
pub const ACCOUNTING_YEAR: &str = "accounting_year";
/// Sub-period within the accounting year
pub const QUARTER: &str = "quarter";
/// Age of the observation in quarters
pub const DEVELOPMENT_PERIOD: &str = "development_period";
/// Age of the observation in months, kept for display
pub const DEVELOPMENT_MONTH: &str = "development_month";

pub const PAID_LOSS: &str = "paid_loss";
pub const REPORTED_LOSS: &str = "reported_loss";
pub const CASE_RESERVE: &str = "case_reserve";
pub const PAID_EXPENSE: &str = "paid_expense";
pub const CUMULATIVE_PREMIUM: &str = "cumulative_premium";
pub const REPORTED_COUNTS: &str = "reported_counts";
pub const CLOSED_COUNTS: &str = "closed_counts";

/// Columns parsed as integers when loading from CSV; everything else is f64
pub const INTEGER_COLUMNS: [&str; 5] = [
    ORIGIN,
    ACCOUNTING_YEAR,
    QUARTER,
    DEVELOPMENT_PERIOD,
    DEVELOPMENT_MONTH,
];

/// Columns rewritten by the floor-to-one adjustment
pub const FLOORED_COLUMNS: [&str; 4] = [PAID_LOSS, CASE_RESERVE, PAID_EXPENSE, CUMULATIVE_PREMIUM];

/// Value columns carried into the reshaped triangle cells
pub const CELL_COLUMNS: [&str; 5] = [
    PAID_LOSS,
    REPORTED_LOSS,
    PAID_EXPENSE,
    REPORTED_COUNTS,
    CLOSED_COUNTS,
];

pub fn is_integer_column(name: &str) -> bool {
    INTEGER_COLUMNS.contains(&name)
}
