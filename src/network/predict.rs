use crate::error::{ensure_matrix, ensure_shape, TrainError};
use crate::math::matrix::Matrix;
use crate::network::forward::forward;
use crate::network::parameters::Parameters;

/// Classifies every column of `x` (N0 × m), returning a (1 × m) row of 0/1.
///
/// A sample is positive when its raw score is above zero, which is the same
/// as a sigmoid probability above one half.
pub fn predict(x: &Matrix, params: &Parameters) -> Result<Matrix, TrainError> {
    let n0 = params.layers()[0].input_size();
    ensure_matrix("features", (n0, x.cols), x)?;
    let cache = forward(x, params);
    Ok(cache.scores.map(|s| if s > 0.0 { 1.0 } else { 0.0 }))
}

/// Fraction of entries where `predictions` equals `labels`.
pub fn accuracy(predictions: &Matrix, labels: &Matrix) -> Result<f64, TrainError> {
    ensure_shape("predictions", labels.shape(), predictions.shape())?;
    let total = predictions.rows * predictions.cols;
    if total == 0 {
        return Err(TrainError::EmptyDataset);
    }
    let correct = predictions.data.iter().flatten()
        .zip(labels.data.iter().flatten())
        .filter(|(p, y)| p == y)
        .count();
    Ok(correct as f64 / total as f64)
}
