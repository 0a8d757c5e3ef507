use crate::activation::activation::ActivationFunction;
use crate::math::matrix::Matrix;
use crate::network::parameters::Parameters;

/// Intermediates of one forward pass, kept for the backward pass.
///
/// With L layers:
/// - `pre_activations[i - 1]` is `K_i` for `i = 1..L-1`
/// - `activations[i]` is `A_i` for `i = 0..L-1`, where `A_0` is the input
/// - `scores` is the raw (1 × m) output of layer L, before any sigmoid
#[derive(Debug, Clone)]
pub struct ForwardCache {
    pub pre_activations: Vec<Matrix>,
    pub activations: Vec<Matrix>,
    pub scores: Matrix,
}

/// Runs `input` (N0 × m) through every layer. Hidden layers apply ReLU; the
/// output layer is left affine.
pub fn forward(input: &Matrix, params: &Parameters) -> ForwardCache {
    let layers = params.layers();
    let (hidden, output) = layers.split_at(params.num_layers() - 1);
    let output = &output[0];

    let mut pre_activations = Vec::with_capacity(hidden.len());
    let mut activations = Vec::with_capacity(hidden.len() + 1);
    activations.push(input.clone());

    for layer in hidden {
        let k = layer.affine(&activations[activations.len() - 1]);
        let a = k.map(|x| ActivationFunction::ReLU.function(x));
        pre_activations.push(k);
        activations.push(a);
    }

    let scores = output.affine(&activations[activations.len() - 1]);

    ForwardCache { pre_activations, activations, scores }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::dense::Layer;
    use crate::network::topology::Topology;

    #[test]
    fn cache_shapes_follow_topology() {
        let topology = Topology::new(vec![4, 5, 3, 1]).unwrap();
        let params = Parameters::initialize(&topology, 11);
        let m = 7;
        let cache = forward(&Matrix::zeros(4, m), &params);

        assert_eq!(cache.activations.len(), 3);
        assert_eq!(cache.pre_activations.len(), 2);
        for (i, a) in cache.activations.iter().enumerate() {
            assert_eq!(a.shape(), (topology.widths()[i], m));
        }
        for (i, k) in cache.pre_activations.iter().enumerate() {
            assert_eq!(k.shape(), (topology.widths()[i + 1], m));
        }
        assert_eq!(cache.scores.shape(), (1, m));
    }

    #[test]
    fn hidden_layers_rectify_and_output_stays_linear() {
        let params = Parameters::from_layers(vec![
            Layer {
                weights: Matrix::from_data(vec![vec![1.0, -1.0]]),
                biases: Matrix::from_data(vec![vec![0.0], vec![0.0]]),
            },
            Layer {
                weights: Matrix::from_data(vec![vec![-2.0], vec![3.0]]),
                biases: Matrix::from_data(vec![vec![-1.0]]),
            },
        ]).unwrap();
        let cache = forward(&Matrix::from_data(vec![vec![2.0, -1.0]]), &params);

        assert_eq!(cache.pre_activations[0].data, vec![vec![2.0, -1.0], vec![-2.0, 1.0]]);
        assert_eq!(cache.activations[1].data, vec![vec![2.0, 0.0], vec![0.0, 1.0]]);
        // -2·2 + 3·0 - 1 = -5 ; -2·0 + 3·1 - 1 = 2
        assert_eq!(cache.scores.data, vec![vec![-5.0, 2.0]]);
    }

    #[test]
    fn nan_input_reaches_the_scores() {
        let params = Parameters::initialize(&Topology::new(vec![2, 3, 1]).unwrap(), 3);
        let x = Matrix::from_data(vec![vec![f64::NAN, 0.5], vec![0.2, 0.5]]);
        let cache = forward(&x, &params);

        assert!(cache.activations[1].data.iter().all(|row| row[0].is_nan()));
        assert!(cache.scores.data[0][0].is_nan());
        assert!(cache.scores.data[0][1].is_finite());
    }
}
