use serde::{Serialize, Deserialize};

/// One progress reading emitted by the trainer.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the trainer
/// sends one `EpochStats` on every reporting epoch and on the final epoch.
/// Readings are diagnostic only; a dropped receiver does not stop training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Cross-entropy cost measured by this epoch's forward pass, before its update.
    pub cost: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
