pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::{Trainer, TrainerState, TrainOutcome};
pub use epoch_stats::EpochStats;
pub use train_config::{ConfigError, TrainConfig};
pub use loop_fn::{train, train_loop};
