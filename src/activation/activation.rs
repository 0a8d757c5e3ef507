use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Element-wise nonlinearities used by the classifier.
///
/// Hidden layers are rectified-linear; the single output node is passed
/// through `Sigmoid` only when a probability is needed (loss evaluation),
/// never during the forward pass itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
}

impl ActivationFunction {
    /// ReLU passes NaN through unchanged.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x < 0.0 { 0.0 } else { x },
        }
    }

    /// Derivative with respect to the pre-activation `x`.
    ///
    /// For ReLU this is the gate `1[x > 0]`; a pre-activation of exactly zero
    /// blocks the gradient.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            },
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
        }
    }
}
