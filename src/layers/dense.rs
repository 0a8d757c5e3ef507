use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Parameters of one fully-connected layer.
///
/// `weights` is (input_size × size) and is applied transposed, so a layer
/// maps an (input_size × m) activation to (size × m). `biases` is (size × 1)
/// and broadcasts across samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub weights: Matrix,
    pub biases: Matrix,
}

impl Layer {
    /// Draws weights, then biases, from U[-0.5, 0.5).
    pub fn new<R: Rng + ?Sized>(input_size: usize, size: usize, rng: &mut R) -> Layer {
        let weights = Matrix::random_uniform_shifted(input_size, size, rng);
        let biases = Matrix::random_uniform_shifted(size, 1, rng);

        Layer { weights, biases }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    pub fn size(&self) -> usize {
        self.weights.cols
    }

    /// Pre-activation `Wᵗ·input + b`.
    pub fn affine(&self, input: &Matrix) -> Matrix {
        self.weights.transpose().dot(input).add_column(&self.biases)
    }

    /// Plain gradient step: `W ← W − lr·dW`, `b ← b − lr·db`.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights.scaled_add(-lr, weights_grad);
        self.biases.scaled_add(-lr, biases_grad);
    }
}
