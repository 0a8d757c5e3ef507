//! Loader for the Titanic passenger CSV.
//!
//! Expected layout (header row is always skipped):
//!
//! ```text
//! PassengerId,Survived,Pclass,Last Name,First Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
//! ```
//!
//! Rows are split on every comma with no quote handling. The passenger name
//! is stored quoted as `"Last, First"`, so it occupies two columns; the
//! column indices below rely on that split.
//!
//! Passengers with an empty `Age` cell are skipped. Features are emitted in
//! the order Pclass, Sex (male = 1, otherwise 0), Age, SibSp, Parch, Fare.
use std::fmt;
use std::path::Path;

use log::debug;

use crate::data::dataset::Dataset;
use crate::math::matrix::Matrix;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

const SURVIVED: usize = 1;
const PCLASS: usize = 2;
const SEX: usize = 5;
const AGE: usize = 6;
const SIBSP: usize = 7;
const PARCH: usize = 8;
const FARE: usize = 10;

/// Feature names in output (row) order.
const FEATURE_NAMES: [&str; 6] = ["Pclass", "Sex", "Age", "SibSp", "Parch", "Fare"];

pub const NUM_FEATURES: usize = FEATURE_NAMES.len();

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum DataError {
    Io(std::io::Error),
    /// A data row had too few cells to contain `column`. Rows are 1-based
    /// and count the header.
    MissingColumn { row: usize, column: &'static str },
    InvalidNumber { row: usize, column: &'static str, value: String },
    NoRows,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "failed to read dataset: {}", e),
            DataError::MissingColumn { row, column } => {
                write!(f, "Row {}: missing column '{}'", row, column)
            }
            DataError::InvalidNumber { row, column, value } => {
                write!(f, "Row {}: '{}' in column '{}' is not a valid number", row, value, column)
            }
            DataError::NoRows => f.write_str("CSV contains no usable passenger rows"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads and parses the passenger CSV at `path`.
pub fn load_titanic_csv<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    let text = std::fs::read_to_string(path)?;
    parse_titanic_csv(&text)
}

/// Parses passenger CSV text into a (6 × m) feature matrix and a (1 × m)
/// survival label row. Features are raw; normalize them before training.
pub fn parse_titanic_csv(text: &str) -> Result<Dataset, DataError> {
    let mut samples: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<f64> = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in text.lines().enumerate().skip(1) {
        let row = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(',').collect();
        if cell(&cells, AGE, "Age", row)?.is_empty() {
            skipped += 1;
            continue;
        }

        let label = parse_number(&cells, SURVIVED, "Survived", row)?;
        let sex = if cell(&cells, SEX, "Sex", row)? == "male" { 1.0 } else { 0.0 };

        samples.push(vec![
            parse_number(&cells, PCLASS, "Pclass", row)?,
            sex,
            parse_number(&cells, AGE, "Age", row)?,
            parse_number(&cells, SIBSP, "SibSp", row)?,
            parse_number(&cells, PARCH, "Parch", row)?,
            parse_number(&cells, FARE, "Fare", row)?,
        ]);
        labels.push(label);
    }

    if samples.is_empty() {
        return Err(DataError::NoRows);
    }

    debug!(
        "parsed {} passengers ({} skipped for missing age), features {:?}",
        samples.len(), skipped, FEATURE_NAMES
    );

    Ok(Dataset {
        features: Matrix::from_column_samples(&samples),
        labels: Matrix::from_data(vec![labels]),
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn cell<'a>(cells: &[&'a str], index: usize, column: &'static str, row: usize) -> Result<&'a str, DataError> {
    cells.get(index)
        .map(|c| c.trim())
        .ok_or(DataError::MissingColumn { row, column })
}

fn parse_number(cells: &[&str], index: usize, column: &'static str, row: usize) -> Result<f64, DataError> {
    let raw = cell(cells, index, column, row)?;
    raw.parse::<f64>().map_err(|_| DataError::InvalidNumber {
        row,
        column,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.2833,C85,C
6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q
";

    #[test]
    fn parses_features_and_skips_missing_age() {
        let ds = parse_titanic_csv(SAMPLE).unwrap();
        assert_eq!(ds.features.shape(), (NUM_FEATURES, 2));
        assert_eq!(ds.labels.data, vec![vec![0.0, 1.0]]);
        let first: Vec<f64> = ds.features.data.iter().map(|row| row[0]).collect();
        assert_eq!(first, vec![3.0, 1.0, 22.0, 1.0, 0.0, 7.25]);
        let second: Vec<f64> = ds.features.data.iter().map(|row| row[1]).collect();
        assert_eq!(second, vec![1.0, 0.0, 38.0, 1.0, 0.0, 71.2833]);
    }

    #[test]
    fn header_only_is_an_error() {
        let header = SAMPLE.lines().next().unwrap();
        assert!(matches!(parse_titanic_csv(header), Err(DataError::NoRows)));
    }

    #[test]
    fn bad_number_reports_row_and_column() {
        let text = "header\n1,x,3,\"A, B\",male,22,1,0,T,7.25,,S\n";
        match parse_titanic_csv(text) {
            Err(DataError::InvalidNumber { row, column, value }) => {
                assert_eq!((row, column, value.as_str()), (2, "Survived", "x"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn short_row_reports_missing_column() {
        let text = "header\n1,0,3\n";
        assert!(matches!(
            parse_titanic_csv(text),
            Err(DataError::MissingColumn { row: 2, column: "Age" })
        ));
    }
}
