use std::time::Instant;

use log::{debug, info, warn};

use crate::data::dataset::Dataset;
use crate::error::{ensure_matrix, TrainError};
use crate::loss::bce::BceLoss;
use crate::network::backward::backward;
use crate::network::forward::forward;
use crate::network::parameters::Parameters;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Lifecycle of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    /// Configuration accepted, no parameters drawn yet.
    Uninitialized,
    /// Parameters exist and epochs may run.
    Initialized,
    /// The configured number of epochs has run; parameters are final.
    Converged,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub parameters: Parameters,
    /// Cost measured by the last epoch's forward pass, before its update.
    pub final_cost: f64,
    pub epochs_run: usize,
}

/// Drives full-batch gradient descent: each epoch is forward pass → cost →
/// backward pass → update, strictly in sequence.
pub struct Trainer {
    config: TrainConfig,
    optimizer: Sgd,
    parameters: Option<Parameters>,
    state: TrainerState,
    epochs_run: usize,
    last_cost: f64,
    warned_non_finite: bool,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Result<Trainer, TrainError> {
        config.validate()?;
        Ok(Trainer {
            optimizer: Sgd::new(config.learning_rate),
            config,
            parameters: None,
            state: TrainerState::Uninitialized,
            epochs_run: 0,
            last_cost: f64::NAN,
            warned_non_finite: false,
        })
    }

    /// Starts from the given parameters instead of a seeded draw. They must
    /// match the configured topology.
    pub fn with_parameters(config: TrainConfig, parameters: Parameters) -> Result<Trainer, TrainError> {
        if !parameters.matches(&config.topology) {
            return Err(TrainError::InvalidTopology(format!(
                "parameters have widths {:?} but the topology is {:?}",
                parameters.widths(),
                config.topology.widths()
            )));
        }
        let mut trainer = Trainer::new(config)?;
        trainer.parameters = Some(parameters);
        Ok(trainer)
    }

    pub fn state(&self) -> TrainerState {
        self.state
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    /// Checks `dataset` against the topology and draws parameters from the
    /// configured seed unless some were supplied up front.
    pub fn initialize(&mut self, dataset: &Dataset) -> Result<(), TrainError> {
        if self.state == TrainerState::Converged {
            return Err(TrainError::AlreadyConverged);
        }
        self.check_dataset(dataset)?;

        if self.parameters.is_none() {
            self.parameters = Some(Parameters::initialize(&self.config.topology, self.config.seed));
        }
        self.state = TrainerState::Initialized;
        debug!(
            "trainer initialized: {} samples of {} features, {} epochs, learning rate {}",
            dataset.num_samples(), dataset.num_features(), self.config.epochs, self.config.learning_rate
        );
        Ok(())
    }

    /// Runs one epoch over the full dataset and returns the cost measured
    /// before the update.
    pub fn run_epoch(&mut self, dataset: &Dataset) -> Result<f64, TrainError> {
        match self.state {
            TrainerState::Uninitialized => return Err(TrainError::NotInitialized),
            TrainerState::Converged => return Err(TrainError::AlreadyConverged),
            TrainerState::Initialized => {}
        }
        self.check_dataset(dataset)?;
        let params = self.parameters.as_mut().ok_or(TrainError::NotInitialized)?;

        let cache = forward(&dataset.features, params);
        let h = BceLoss::probabilities(&cache.scores);
        let cost = BceLoss::cost(&h, &dataset.labels);
        let gradients = backward(&cache, &h, &dataset.labels, params);
        self.optimizer.step(params, &gradients);

        self.epochs_run += 1;
        self.last_cost = cost;
        if !cost.is_finite() && !self.warned_non_finite {
            warn!("cost became non-finite ({}) at epoch {}", cost, self.epochs_run);
            self.warned_non_finite = true;
        }
        Ok(cost)
    }

    /// Initializes if needed, then runs the remaining configured epochs and
    /// moves to `Converged`.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<TrainOutcome, TrainError> {
        if self.state == TrainerState::Uninitialized {
            self.initialize(dataset)?;
        }

        let total_epochs = self.config.epochs;
        while self.epochs_run < total_epochs {
            let t_start = Instant::now();
            let cost = self.run_epoch(dataset)?;
            let elapsed_ms = t_start.elapsed().as_millis() as u64;

            let epoch = self.epochs_run;
            if self.should_report(epoch) {
                self.report(EpochStats { epoch, total_epochs, cost, elapsed_ms });
            }
        }

        self.state = TrainerState::Converged;
        let parameters = self.parameters.clone().ok_or(TrainError::NotInitialized)?;
        Ok(TrainOutcome {
            parameters,
            final_cost: self.last_cost,
            epochs_run: self.epochs_run,
        })
    }

    fn should_report(&self, epoch: usize) -> bool {
        let periodic = self.config.report_every > 0 && (epoch - 1) % self.config.report_every == 0;
        periodic || epoch == self.config.epochs
    }

    fn report(&mut self, stats: EpochStats) {
        info!("Epoch: {}/{}\t Cost: {}", stats.epoch, stats.total_epochs, stats.cost);
        let delivered = match &self.config.progress_tx {
            Some(tx) => tx.send(stats).is_ok(),
            None => true,
        };
        if !delivered {
            debug!("progress receiver dropped; continuing without readings");
            self.config.progress_tx = None;
        }
    }

    fn check_dataset(&self, dataset: &Dataset) -> Result<(), TrainError> {
        if dataset.is_empty() {
            return Err(TrainError::EmptyDataset);
        }
        let m = dataset.num_samples();
        ensure_matrix("features", (self.config.topology.input_size(), m), &dataset.features)?;
        ensure_matrix("labels", (1, m), &dataset.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;
    use crate::network::topology::Topology;
    use std::sync::mpsc;

    fn toy_dataset() -> Dataset {
        Dataset::new(
            Matrix::from_data(vec![vec![0.0, 0.2, 0.8, 1.0], vec![1.0, 0.7, 0.1, 0.0]]),
            Matrix::from_data(vec![vec![0.0, 0.0, 1.0, 1.0]]),
        ).unwrap()
    }

    fn toy_config(epochs: usize) -> TrainConfig {
        TrainConfig::new(Topology::new(vec![2, 3, 1]).unwrap(), epochs, 0.5, 7)
    }

    #[test]
    fn walks_through_states() {
        let ds = toy_dataset();
        let mut trainer = Trainer::new(toy_config(3)).unwrap();
        assert_eq!(trainer.state(), TrainerState::Uninitialized);
        assert_eq!(trainer.run_epoch(&ds), Err(TrainError::NotInitialized));

        trainer.initialize(&ds).unwrap();
        assert_eq!(trainer.state(), TrainerState::Initialized);
        trainer.run_epoch(&ds).unwrap();

        let outcome = trainer.fit(&ds).unwrap();
        assert_eq!(outcome.epochs_run, 3);
        assert_eq!(trainer.state(), TrainerState::Converged);
        assert_eq!(trainer.run_epoch(&ds), Err(TrainError::AlreadyConverged));
    }

    #[test]
    fn fails_fast_on_shape_mismatch() {
        let ds = Dataset::new(Matrix::zeros(3, 4), Matrix::zeros(1, 4)).unwrap();
        let mut trainer = Trainer::new(toy_config(3)).unwrap();
        assert!(matches!(
            trainer.initialize(&ds),
            Err(TrainError::ShapeMismatch { what: "features", .. })
        ));
        assert!(trainer.parameters().is_none());
    }

    #[test]
    fn fails_fast_on_ragged_features() {
        let ds = Dataset {
            features: Matrix::from_data(vec![vec![0.0, 0.2, 0.8, 1.0], vec![1.0, 0.7]]),
            labels: Matrix::from_data(vec![vec![0.0, 0.0, 1.0, 1.0]]),
        };
        let mut trainer = Trainer::new(toy_config(3)).unwrap();
        assert_eq!(
            trainer.fit(&ds).unwrap_err(),
            TrainError::ShapeMismatch { what: "features", expected: (2, 4), found: (2, 2) }
        );
        assert!(trainer.parameters().is_none());
    }

    #[test]
    fn fails_fast_on_empty_dataset() {
        let ds = Dataset::new(Matrix::zeros(2, 0), Matrix::zeros(1, 0)).unwrap();
        let mut trainer = Trainer::new(toy_config(3)).unwrap();
        assert_eq!(trainer.fit(&ds).unwrap_err(), TrainError::EmptyDataset);
    }

    #[test]
    fn rejects_parameters_for_another_topology() {
        let params = Parameters::initialize(&Topology::new(vec![2, 4, 1]).unwrap(), 0);
        assert!(Trainer::with_parameters(toy_config(1), params).is_err());
    }

    #[test]
    fn reports_first_periodic_and_final_epochs() {
        let (tx, rx) = mpsc::channel();
        let mut config = toy_config(10);
        config.report_every = 4;
        config.progress_tx = Some(tx);

        let mut trainer = Trainer::new(config).unwrap();
        let outcome = trainer.fit(&toy_dataset()).unwrap();
        drop(trainer);

        let epochs: Vec<usize> = rx.iter().map(|s| s.epoch).collect();
        assert_eq!(epochs, vec![1, 5, 9, 10]);
        assert!(outcome.final_cost.is_finite());
    }

    #[test]
    fn dropped_receiver_does_not_stop_training() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut config = toy_config(6);
        config.report_every = 1;
        config.progress_tx = Some(tx);

        let outcome = Trainer::new(config).unwrap().fit(&toy_dataset()).unwrap();
        assert_eq!(outcome.epochs_run, 6);
    }
}
