//! Triangle Prep - Loss triangle data preparation for MCMC reserving models
//!
//! This library provides:
//! - Column-oriented loss development records with CSV loading
//! - Floor-to-one adjustment with case reserve compensation
//! - Current-year triangle views with the fully earned premium basis
//! - Column division and bracketed index parsing for sampler inputs/outputs

pub mod error;
pub mod params;
pub mod records;
pub mod premium;
pub mod floor;
pub mod triangle;
pub mod numeric;

// Re-export commonly used types
pub use error::{PrepError, PrepResult};
pub use params::Parameters;
pub use records::{Column, RecordSet};
pub use premium::{PremiumReference, PremiumRow};
pub use floor::{floor_to_one, FloorAdjuster, FloorOutcome, FloorSummary};
pub use triangle::{build_current_year_view, CurrentYearView, TriangleBuilder, TriangleCell};
pub use numeric::{divide_columns, divide_columns_parallel, extract_bracketed_integer};
