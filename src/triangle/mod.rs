//! Current-year triangle construction
//!
//! For a target accounting year, maps each origin/quarter row to the
//! development age reachable as of that year, reshapes the records into
//! (origin, development period) cells, and attaches the fully earned premium
//! basis for the year.

mod builder;
mod view;

pub use builder::{build_current_year_view, TriangleBuilder};
pub use view::{CurrentYearView, DevelopmentMonth, DiagonalEntry, OriginPremium, OriginYear, TriangleCell};
