use std::fmt;
use std::sync::mpsc;

use serde::{Serialize, Deserialize};

use crate::error::TrainError;
use crate::network::topology::Topology;
use crate::train::epoch_stats::EpochStats;

/// Hyperparameters for a training run.
///
/// # Fields
/// - `topology`:      layer widths `N0..NL`
/// - `epochs`:        number of full-batch gradient steps
/// - `learning_rate`: step size α
/// - `seed`:          seed for parameter initialization
/// - `report_every`:  log and send a progress reading every this many
///                     epochs (counting from the first); `0` disables
///                     periodic readings, the final epoch is always reported
/// - `progress_tx`:   optional channel sender receiving `EpochStats`;
///                     not part of the serialized form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub topology: Topology,
    pub epochs: usize,
    pub learning_rate: f64,
    pub seed: u64,
    #[serde(default = "default_report_every")]
    pub report_every: usize,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

fn default_report_every() -> usize {
    5000
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default reporting interval and no
    /// progress channel.
    pub fn new(topology: Topology, epochs: usize, learning_rate: f64, seed: u64) -> Self {
        TrainConfig {
            topology,
            epochs,
            learning_rate,
            seed,
            report_every: default_report_every(),
            progress_tx: None,
        }
    }

    /// The passenger-survival run: 6 → 5 → 4 → 3 → 2 → 1, 40000 epochs at
    /// α = 0.01, seed 1.
    pub fn titanic() -> Self {
        TrainConfig::new(Topology::titanic(), 40_000, 0.01, 1)
    }

    /// Rejects configurations that cannot start a run.
    pub fn validate(&self) -> Result<(), TrainError> {
        if self.epochs == 0 {
            return Err(TrainError::InvalidEpochs(self.epochs));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(TrainError::InvalidLearningRate(self.learning_rate));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config from a JSON file.
    pub fn load_json(path: &str) -> Result<TrainConfig, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(TrainError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config file error: {}", e),
            ConfigError::Json(e) => write!(f, "config is not valid JSON: {}", e),
            ConfigError::Invalid(e) => write!(f, "config rejected: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<TrainError> for ConfigError {
    fn from(e: TrainError) -> Self {
        ConfigError::Invalid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titanic_defaults_are_valid() {
        let config = TrainConfig::titanic();
        assert!(config.validate().is_ok());
        assert_eq!(config.topology.widths(), &[6, 5, 4, 3, 2, 1]);
        assert_eq!(config.report_every, 5000);
    }

    #[test]
    fn rejects_zero_epochs_and_bad_learning_rates() {
        let mut config = TrainConfig::titanic();
        config.epochs = 0;
        assert_eq!(config.validate(), Err(TrainError::InvalidEpochs(0)));

        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let mut config = TrainConfig::titanic();
            config.learning_rate = lr;
            assert!(matches!(config.validate(), Err(TrainError::InvalidLearningRate(_))));
        }
    }

    #[test]
    fn json_omits_channel_and_fills_report_interval() {
        let json = r#"{"topology":[2,2,1],"epochs":10,"learning_rate":0.5,"seed":3}"#;
        let config: TrainConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.report_every, 5000);
        assert!(config.progress_tx.is_none());

        let out = serde_json::to_value(&config).unwrap();
        assert!(out.get("progress_tx").is_none());
        assert_eq!(out["topology"], serde_json::json!([2, 2, 1]));
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("titanic-nn-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let mut config = TrainConfig::titanic();
        config.report_every = 7;
        config.save_json(path).unwrap();
        let loaded = TrainConfig::load_json(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(loaded.report_every, 7);
        assert_eq!(loaded.topology, config.topology);
        assert_eq!(loaded.epochs, config.epochs);
    }
}
