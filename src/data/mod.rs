pub mod dataset;
pub mod normalize;
pub mod titanic;

pub use dataset::Dataset;
pub use normalize::{normalize, MinMaxScaler};
pub use titanic::{load_titanic_csv, parse_titanic_csv, DataError};
