//! Column-oriented record set for loss development data

use crate::error::{PrepError, PrepResult};

/// A single typed column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Identifiers and period keys (origin, year, quarter, ...)
    Int(Vec<i64>),
    /// Loss, expense, premium and count amounts
    Float(Vec<f64>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(values) => values.len(),
            Column::Float(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Int(_) => "integer",
            Column::Float(_) => "float",
        }
    }

    /// Render the value at `row` for CSV output
    pub fn format_cell(&self, row: usize) -> Option<String> {
        match self {
            Column::Int(values) => values.get(row).map(|v| v.to_string()),
            Column::Float(values) => values.get(row).map(|v| v.to_string()),
        }
    }
}

/// One row per origin period x development period observation,
/// stored as named columns of equal length.
///
/// Column order is insertion order and is preserved through every
/// transformation and when written back to CSV.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    columns: Vec<(String, Column)>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style integer column
    pub fn with_ints(mut self, name: &str, values: Vec<i64>) -> Self {
        self.insert(name, Column::Int(values));
        self
    }

    /// Builder-style float column
    pub fn with_floats(mut self, name: &str, values: Vec<f64>) -> Self {
        self.insert(name, Column::Float(values));
        self
    }

    /// Insert a column, replacing an existing one of the same name in place
    pub fn insert(&mut self, name: &str, column: Column) {
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name.to_string(), column)),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Column names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Integer column by name
    pub fn ints(&self, name: &str) -> PrepResult<&[i64]> {
        match self.column(name) {
            Some(Column::Int(values)) => Ok(values),
            Some(other) => Err(PrepError::Schema(format!(
                "column '{}' is {}, expected integer",
                name,
                other.type_name()
            ))),
            None => Err(missing_column(name)),
        }
    }

    /// Float column by name
    pub fn floats(&self, name: &str) -> PrepResult<&[f64]> {
        match self.column(name) {
            Some(Column::Float(values)) => Ok(values),
            Some(other) => Err(PrepError::Schema(format!(
                "column '{}' is {}, expected float",
                name,
                other.type_name()
            ))),
            None => Err(missing_column(name)),
        }
    }

    /// Fail with a schema error naming the first absent column
    pub fn require(&self, names: &[&str]) -> PrepResult<()> {
        match names.iter().find(|name| !self.contains(name)) {
            Some(name) => Err(missing_column(name)),
            None => Ok(()),
        }
    }

    /// Number of rows, checking that every column has the same length
    pub fn num_rows(&self) -> PrepResult<usize> {
        let mut iter = self.columns.iter();
        let expected = match iter.next() {
            Some((_, first)) => first.len(),
            None => return Ok(0),
        };

        for (name, column) in iter {
            if column.len() != expected {
                return Err(PrepError::LengthMismatch {
                    column: name.clone(),
                    expected,
                    actual: column.len(),
                });
            }
        }

        Ok(expected)
    }
}

fn missing_column(name: &str) -> PrepError {
    PrepError::Schema(format!("missing required column '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::new()
            .with_ints("origin", vec![1, 1, 2])
            .with_floats("paid_loss", vec![10.0, 0.0, 5.5])
    }

    #[test]
    fn test_typed_access() {
        let records = sample();
        assert_eq!(records.ints("origin").unwrap(), &[1, 1, 2]);
        assert_eq!(records.floats("paid_loss").unwrap(), &[10.0, 0.0, 5.5]);
        assert_eq!(records.num_rows().unwrap(), 3);
    }

    #[test]
    fn test_missing_and_mistyped_columns_are_schema_errors() {
        let records = sample();
        assert!(matches!(records.floats("case_reserve"), Err(PrepError::Schema(_))));
        assert!(matches!(records.floats("origin"), Err(PrepError::Schema(_))));
        assert!(matches!(records.ints("paid_loss"), Err(PrepError::Schema(_))));

        let err = records.require(&["origin", "quarter"]).unwrap_err();
        assert!(err.to_string().contains("'quarter'"));
    }

    #[test]
    fn test_length_mismatch() {
        let records = sample().with_floats("case_reserve", vec![1.0]);
        match records.num_rows() {
            Err(PrepError::LengthMismatch { column, expected, actual }) => {
                assert_eq!(column, "case_reserve");
                assert_eq!(expected, 3);
                assert_eq!(actual, 1);
            }
            other => panic!("expected length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut records = sample().with_floats("case_reserve", vec![1.0, 2.0, 3.0]);
        records.insert("paid_loss", Column::Float(vec![1.0, 1.0, 1.0]));

        let names: Vec<&str> = records.names().collect();
        assert_eq!(names, vec!["origin", "paid_loss", "case_reserve"]);
        assert_eq!(records.floats("paid_loss").unwrap(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_empty_record_set_has_zero_rows() {
        assert_eq!(RecordSet::new().num_rows().unwrap(), 0);
    }
}
