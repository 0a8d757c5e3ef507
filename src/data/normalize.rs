//! Min-max feature rescaling.
//!
//! Each feature row is mapped to `(x - min) / (max - min)` using the min and
//! max observed across all samples. A constant feature has zero range and
//! rescales to non-finite values; this is left visible rather than patched.

use log::warn;
use serde::{Serialize, Deserialize};

use crate::error::{ensure_matrix, TrainError};
use crate::math::matrix::Matrix;

/// Per-feature min and max, each stored as an (N0 × 1) column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub min: Matrix,
    pub max: Matrix,
}

impl MinMaxScaler {
    /// Records each feature row's min and max over the samples of `x`.
    pub fn fit(x: &Matrix) -> MinMaxScaler {
        let scaler = MinMaxScaler { min: x.row_min(), max: x.row_max() };
        let constant = scaler.zero_range_features();
        if !constant.is_empty() && x.cols > 0 {
            warn!("features {:?} are constant; normalization will produce non-finite values", constant);
        }
        scaler
    }

    /// Rescales `x` with the fitted statistics. `x` may hold a different set
    /// of samples, in which case values can fall outside [0, 1].
    pub fn transform(&self, x: &Matrix) -> Result<Matrix, TrainError> {
        ensure_matrix("feature rows", (self.min.rows, x.cols), x)?;
        Ok(self.rescale(x))
    }

    pub fn fit_transform(x: &Matrix) -> (MinMaxScaler, Matrix) {
        let scaler = MinMaxScaler::fit(x);
        let scaled = scaler.rescale(x);
        (scaler, scaled)
    }

    /// Indices of features whose fitted range is zero.
    pub fn zero_range_features(&self) -> Vec<usize> {
        self.min.data.iter().zip(self.max.data.iter())
            .enumerate()
            .filter(|(_, (lo, hi))| hi[0] - lo[0] == 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    fn rescale(&self, x: &Matrix) -> Matrix {
        let mut res = x.clone();
        for ((row, lo), hi) in res.data.iter_mut().zip(self.min.data.iter()).zip(self.max.data.iter()) {
            let (lo, range) = (lo[0], hi[0] - lo[0]);
            for v in row.iter_mut() {
                *v = (*v - lo) / range;
            }
        }
        res
    }
}

/// Rescales every feature row of `x` into [0, 1] using its own min and max.
pub fn normalize(x: &Matrix) -> Matrix {
    MinMaxScaler::fit_transform(x).1
}
