use crate::error::{ensure_matrix, TrainError};
use crate::math::matrix::Matrix;

/// A feature matrix (N0 × m) paired with its aligned label row (1 × m).
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Matrix,
}

impl Dataset {
    /// Pairs features with labels, rejecting ragged matrices and a label
    /// matrix that is not a single row with one entry per sample.
    pub fn new(features: Matrix, labels: Matrix) -> Result<Dataset, TrainError> {
        ensure_matrix("features", features.shape(), &features)?;
        ensure_matrix("labels", (1, features.cols), &labels)?;
        Ok(Dataset { features, labels })
    }

    pub fn num_samples(&self) -> usize {
        self.features.cols
    }

    pub fn num_features(&self) -> usize {
        self.features.rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_samples() == 0
    }
}
