pub mod topology;
pub mod parameters;
pub mod forward;
pub mod backward;
pub mod predict;

pub use topology::Topology;
pub use parameters::Parameters;
pub use forward::{forward, ForwardCache};
pub use backward::{backward, Gradients, LayerGradients};
pub use predict::{accuracy, predict};
