//! Loss development records and CSV loading

mod data;
pub mod columns;
pub mod loader;

pub use data::{Column, RecordSet};
pub use loader::{load_records, load_records_from_reader, write_records, write_records_to_writer};
