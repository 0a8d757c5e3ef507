use crate::network::backward::Gradients;
use crate::network::parameters::Parameters;

/// Plain full-batch gradient descent: no momentum, no clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to every layer.
    pub fn step(&self, params: &mut Parameters, gradients: &Gradients) {
        params.apply_update(gradients, self.learning_rate);
    }
}
