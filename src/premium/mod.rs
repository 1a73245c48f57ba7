//! Earned premium reference table and loading

mod data;
pub mod loader;

pub use data::{PremiumReference, PremiumRow, FULL_YEAR_DEVELOPMENT};
pub use loader::{load_premium, load_premium_from_reader};
