//! Load the premium reference table from CSV
//!
//! Expected header: `origin,line_of_business,development_period,cumulative_premium`

use super::{PremiumReference, PremiumRow};
use crate::error::PrepResult;
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;

/// Load the premium reference from a CSV file
pub fn load_premium<P: AsRef<Path>>(path: P) -> PrepResult<PremiumReference> {
    let path = path.as_ref();
    log::debug!("Loading premium reference from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_premium_from_reader(file)
}

/// Load the premium reference from any reader
pub fn load_premium_from_reader<R: Read>(reader: R) -> PrepResult<PremiumReference> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: PremiumRow = result?;
        rows.push(row);
    }

    log::debug!("Loaded {} premium rows", rows.len());
    Ok(PremiumReference::new(rows))
}
