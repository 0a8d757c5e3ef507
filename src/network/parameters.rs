use log::debug;
use rand::{rngs::StdRng, SeedableRng};

use crate::error::{ensure_matrix, TrainError};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::backward::Gradients;
use crate::network::topology::Topology;

/// The weight matrix and bias vector of every layer, ordered input → output.
/// `layers()[i - 1]` holds `W_i` and `B_i`.
///
/// Always holds at least one layer, consecutive layers chain
/// (`W_i` is `N_{i-1} × N_i`, `B_i` is `N_i × 1`) and the output layer has a
/// single node.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    layers: Vec<Layer>,
}

impl Parameters {
    /// Draws every layer from U[-0.5, 0.5) using one generator seeded with
    /// `seed`. Layers are drawn in order, weights before biases, so the same
    /// topology and seed always give the same parameters.
    pub fn initialize(topology: &Topology, seed: u64) -> Parameters {
        let mut rng = StdRng::seed_from_u64(seed);
        let layers = (1..=topology.num_layers())
            .map(|i| {
                let (input_size, size) = topology.layer_shape(i);
                Layer::new(input_size, size, &mut rng)
            })
            .collect();
        debug!("initialized parameters for topology {:?} with seed {}", topology.widths(), seed);
        Parameters { layers }
    }

    /// Wraps ready-made layers, checking that there is at least one, that
    /// consecutive layers chain and that the output is a single node.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Parameters, TrainError> {
        let first = layers.first()
            .ok_or_else(|| TrainError::InvalidTopology("no layers".to_string()))?;

        let mut widths = vec![first.weights.rows];
        for layer in &layers {
            let n_in = widths[widths.len() - 1];
            let n_out = layer.weights.cols;
            ensure_matrix("weights", (n_in, n_out), &layer.weights)?;
            ensure_matrix("biases", (n_out, 1), &layer.biases)?;
            widths.push(n_out);
        }
        Topology::new(widths)?;

        Ok(Parameters { layers })
    }

    /// Rebuilds a parameter set from per-layer weights and biases.
    pub fn from_parts(weights: Vec<Matrix>, biases: Vec<Matrix>) -> Result<Parameters, TrainError> {
        if weights.len() != biases.len() {
            return Err(TrainError::InvalidTopology(format!(
                "{} weight matrices but {} bias vectors",
                weights.len(),
                biases.len()
            )));
        }

        Parameters::from_layers(
            weights.into_iter().zip(biases)
                .map(|(weights, biases)| Layer { weights, biases })
                .collect()
        )
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Widths `N0..NL` implied by the layer shapes.
    pub fn widths(&self) -> Vec<usize> {
        let mut widths = Vec::with_capacity(self.layers.len() + 1);
        if let Some(first) = self.layers.first() {
            widths.push(first.input_size());
        }
        widths.extend(self.layers.iter().map(|layer| layer.size()));
        widths
    }

    pub fn matches(&self, topology: &Topology) -> bool {
        self.widths() == topology.widths()
    }

    /// `W_i ← W_i − lr·dW_i` and `B_i ← B_i − lr·dB_i` for every layer.
    pub fn apply_update(&mut self, gradients: &Gradients, learning_rate: f64) {
        assert_eq!(self.layers.len(), gradients.layers.len(), "one gradient per layer");
        for (layer, grad) in self.layers.iter_mut().zip(gradients.layers.iter()) {
            layer.apply_gradients(&grad.weights, &grad.biases, learning_rate);
        }
    }

    /// Splits into per-layer `(weights, biases)`.
    pub fn into_parts(self) -> (Vec<Matrix>, Vec<Matrix>) {
        self.layers.into_iter()
            .map(|layer| (layer.weights, layer.biases))
            .unzip()
    }
}
