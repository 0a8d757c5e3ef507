use crate::activation::activation::ActivationFunction;
use crate::loss::bce::BceLoss;
use crate::math::matrix::Matrix;
use crate::network::forward::ForwardCache;
use crate::network::parameters::Parameters;

/// Loss gradient for one layer, shaped like that layer's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradients {
    pub weights: Matrix,
    pub biases: Matrix,
}

/// One `LayerGradients` per layer, in the same order as `Parameters::layers()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub layers: Vec<LayerGradients>,
}

/// Backpropagates the binary cross-entropy cost through the cached forward
/// pass.
///
/// `h` is `sigmoid(scores)` and `y` the (1 × m) labels. The output layer uses
/// the fused sigmoid + cross-entropy gradient `dK_L = (H − Y)/m`; hidden
/// layers gate `dA_i = W_{i+1}·dK_{i+1}` by `1[K_i > 0]`.
pub fn backward(cache: &ForwardCache, h: &Matrix, y: &Matrix, params: &Parameters) -> Gradients {
    let num_layers = params.num_layers();
    let mut layers = Vec::with_capacity(num_layers);

    let mut dk = BceLoss::score_gradient(h, y);
    layers.push(layer_gradients(&cache.activations[num_layers - 1], &dk));

    for i in (0..num_layers - 1).rev() {
        let da = params.layers()[i + 1].weights.dot(&dk);
        dk = da.zip_map(&cache.pre_activations[i], |g, k| {
            g * ActivationFunction::ReLU.derivative(k)
        });
        layers.push(layer_gradients(&cache.activations[i], &dk));
    }

    layers.reverse();
    Gradients { layers }
}

/// `dW = A_prev·dKᵗ`, `dB = Σ_samples dK`.
fn layer_gradients(prev_activation: &Matrix, dk: &Matrix) -> LayerGradients {
    LayerGradients {
        weights: prev_activation.dot(&dk.transpose()),
        biases: dk.sum_rows(),
    }
}
