use crate::data::dataset::Dataset;
use crate::error::TrainError;
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{TrainOutcome, Trainer};

/// Trains a fresh network on `dataset` for `config.epochs` epochs.
///
/// Configuration and shape errors are returned before any parameter is
/// drawn. A non-finite cost is not an error; it shows up in
/// `TrainOutcome::final_cost` and in the parameters.
pub fn train_loop(dataset: &Dataset, config: &TrainConfig) -> Result<TrainOutcome, TrainError> {
    let mut trainer = Trainer::new(config.clone())?;
    trainer.fit(dataset)
}

/// Trains on features `x` (N0 × m) and labels `y` (1 × m) and returns the
/// final per-layer `(weights, biases)`.
pub fn train(
    x: Matrix,
    y: Matrix,
    topology: Topology,
    epochs: usize,
    learning_rate: f64,
    seed: u64,
) -> Result<(Vec<Matrix>, Vec<Matrix>), TrainError> {
    let config = TrainConfig::new(topology, epochs, learning_rate, seed);
    config.validate()?;
    let dataset = Dataset::new(x, y)?;
    Ok(train_loop(&dataset, &config)?.parameters.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_come_before_shape_errors() {
        let topology = Topology::new(vec![2, 1]).unwrap();
        let err = train(Matrix::zeros(2, 3), Matrix::zeros(1, 2), topology, 0, 0.1, 0).unwrap_err();
        assert_eq!(err, TrainError::InvalidEpochs(0));
    }

    #[test]
    fn label_misalignment_is_a_shape_mismatch() {
        let topology = Topology::new(vec![2, 1]).unwrap();
        let err = train(Matrix::zeros(2, 3), Matrix::zeros(1, 2), topology, 5, 0.1, 0).unwrap_err();
        assert!(matches!(err, TrainError::ShapeMismatch { what: "labels", .. }));
    }

    #[test]
    fn ragged_features_are_rejected_before_training() {
        let x = Matrix::from_data(vec![vec![0.0, 1.0], vec![1.0]]);
        let y = Matrix::from_data(vec![vec![0.0, 1.0]]);
        let topology = Topology::new(vec![2, 2, 1]).unwrap();
        let err = train(x, y, topology, 5, 0.1, 1).unwrap_err();
        assert_eq!(
            err,
            TrainError::ShapeMismatch { what: "features", expected: (2, 2), found: (2, 1) }
        );
    }

    #[test]
    fn returns_one_weight_and_bias_per_layer() {
        let x = Matrix::from_data(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let y = Matrix::from_data(vec![vec![0.0, 1.0]]);
        let topology = Topology::new(vec![2, 2, 1]).unwrap();
        let (weights, biases) = train(x, y, topology, 5, 0.1, 1).unwrap();
        assert_eq!(weights.len(), 2);
        assert_eq!(biases.len(), 2);
        assert_eq!(weights[0].shape(), (2, 2));
        assert_eq!(biases[1].shape(), (1, 1));
    }
}
