use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::math::matrix::Matrix;

/// Errors raised before or during training. All of them are detected before
/// the first parameter update; numeric degeneracy (NaN / infinity) is not an
/// error and flows through the returned cost and parameters instead.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainError {
    /// Two matrices that must agree in shape do not.
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    InvalidTopology(String),
    /// The epoch count must be at least 1.
    InvalidEpochs(usize),
    /// The learning rate must be finite and strictly positive.
    InvalidLearningRate(f64),
    EmptyDataset,
    NotInitialized,
    AlreadyConverged,
}

impl Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::ShapeMismatch { what, expected, found } => write!(
                f,
                "shape mismatch for {}: expected {}×{}, found {}×{}",
                what, expected.0, expected.1, found.0, found.1
            ),
            TrainError::InvalidTopology(reason) => write!(f, "invalid topology: {}", reason),
            TrainError::InvalidEpochs(epochs) => {
                write!(f, "epoch count must be positive, got {}", epochs)
            }
            TrainError::InvalidLearningRate(lr) => {
                write!(f, "learning rate must be a positive finite number, got {}", lr)
            }
            TrainError::EmptyDataset => f.write_str("dataset contains no samples"),
            TrainError::NotInitialized => {
                f.write_str("trainer must be initialized before running an epoch")
            }
            TrainError::AlreadyConverged => {
                f.write_str("trainer has already run its configured number of epochs")
            }
        }
    }
}

impl Error for TrainError {}

/// Checks that `found` has the `expected` shape.
pub(crate) fn ensure_shape(
    what: &'static str,
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<(), TrainError> {
    if expected == found {
        Ok(())
    } else {
        Err(TrainError::ShapeMismatch { what, expected, found })
    }
}

/// Checks that `matrix` has the `expected` shape and that every stored row
/// really holds `cols` entries. A ragged row is reported with the row count
/// and that row's length as the found shape.
pub(crate) fn ensure_matrix(
    what: &'static str,
    expected: (usize, usize),
    matrix: &Matrix,
) -> Result<(), TrainError> {
    ensure_shape(what, expected, matrix.shape())?;
    if matrix.is_rectangular() {
        return Ok(());
    }
    let found_cols = matrix.data.iter()
        .map(|row| row.len())
        .find(|&len| len != matrix.cols)
        .unwrap_or(matrix.cols);
    Err(TrainError::ShapeMismatch { what, expected, found: (matrix.data.len(), found_cols) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message_names_both_shapes() {
        let err = ensure_shape("labels", (1, 4), (1, 3)).unwrap_err();
        assert_eq!(err.to_string(), "shape mismatch for labels: expected 1×4, found 1×3");
    }

    #[test]
    fn ragged_matrix_is_a_shape_mismatch() {
        let ragged = Matrix::from_data(vec![vec![0.0, 1.0], vec![1.0]]);
        assert_eq!(
            ensure_matrix("features", (2, 2), &ragged),
            Err(TrainError::ShapeMismatch { what: "features", expected: (2, 2), found: (2, 1) })
        );
        assert!(ensure_matrix("features", (2, 2), &Matrix::zeros(2, 2)).is_ok());
    }
}
