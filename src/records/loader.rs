//! Load and write loss development records as CSV
//!
//! The header row names the columns. Columns listed in
//! [`columns::INTEGER_COLUMNS`](super::columns::INTEGER_COLUMNS) parse as integers,
//! every other column as f64.

use super::columns::is_integer_column;
use super::{Column, RecordSet};
use crate::error::{PrepError, PrepResult};
use csv::{Reader, Writer};
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Load a record set from a CSV file
pub fn load_records<P: AsRef<Path>>(path: P) -> PrepResult<RecordSet> {
    let path = path.as_ref();
    log::debug!("Loading records from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_records_from_reader(file)
}

/// Load a record set from any reader (e.g., string buffer, network stream)
pub fn load_records_from_reader<R: Read>(reader: R) -> PrepResult<RecordSet> {
    let mut csv_reader = Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for (idx, name) in headers.iter().enumerate() {
        if headers[..idx].contains(name) {
            return Err(PrepError::Schema(format!("duplicate column '{}'", name)));
        }
    }

    let mut columns: Vec<Column> = headers
        .iter()
        .map(|name| {
            if is_integer_column(name) {
                Column::Int(Vec::new())
            } else {
                Column::Float(Vec::new())
            }
        })
        .collect();

    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        for (idx, column) in columns.iter_mut().enumerate() {
            let raw = record.get(idx).unwrap_or("").trim();
            match column {
                Column::Int(values) => values.push(parse_cell(raw, row, &headers[idx])?),
                Column::Float(values) => values.push(parse_cell(raw, row, &headers[idx])?),
            }
        }
    }

    let mut records = RecordSet::new();
    for (name, column) in headers.iter().zip(columns) {
        records.insert(name, column);
    }

    log::debug!(
        "Loaded {} columns x {} rows",
        records.num_columns(),
        records.num_rows()?
    );
    Ok(records)
}

fn parse_cell<T: FromStr>(raw: &str, row: usize, column: &str) -> PrepResult<T> {
    raw.parse().map_err(|_| {
        PrepError::Parse(format!(
            "row {}, column '{}': cannot parse '{}'",
            row + 1,
            column,
            raw
        ))
    })
}

/// Write a record set to a CSV file, keeping column order
pub fn write_records<P: AsRef<Path>>(records: &RecordSet, path: P) -> PrepResult<()> {
    let file = std::fs::File::create(path)?;
    write_records_to_writer(records, file)
}

/// Write a record set as CSV to any writer
pub fn write_records_to_writer<W: Write>(records: &RecordSet, writer: W) -> PrepResult<()> {
    let rows = records.num_rows()?;
    let mut csv_writer = Writer::from_writer(writer);

    csv_writer.write_record(records.names())?;

    for row in 0..rows {
        let cells: Vec<String> = records
            .columns()
            .map(|(_, column)| column.format_cell(row).unwrap_or_default())
            .collect();
        csv_writer.write_record(&cells)?;
    }

    csv_writer.flush()?;
    Ok(())
}
