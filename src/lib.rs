pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{accuracy, predict, Parameters, Topology};
pub use loss::bce::BceLoss;
pub use optim::sgd::Sgd;
pub use data::{normalize, Dataset, MinMaxScaler};
pub use train::{train, train_loop, TrainConfig, Trainer, TrainOutcome};
pub use error::TrainError;
