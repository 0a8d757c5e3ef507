use crate::activation::activation::ActivationFunction;
use crate::math::matrix::Matrix;

/// Binary cross-entropy over a row of output scores.
///
/// Probabilities are not clipped away from 0 and 1, so a saturated wrong
/// prediction yields an infinite (or NaN) cost.
pub struct BceLoss;

impl BceLoss {
    /// `H = sigmoid(scores)`, the positive-class probability per sample.
    pub fn probabilities(scores: &Matrix) -> Matrix {
        scores.map(|s| ActivationFunction::Sigmoid.function(s))
    }

    /// `J = -(1/m)·Σ [y·ln(h) + (1-y)·ln(1-h)]` over every entry.
    pub fn cost(h: &Matrix, y: &Matrix) -> f64 {
        let m = y.cols as f64;
        let total: f64 = h.zip_map(y, |h, y| y * h.ln() + (1.0 - y) * (1.0 - h).ln())
            .data
            .iter()
            .flatten()
            .sum();
        -total / m
    }

    /// Gradient of `J` with respect to the scores, through the sigmoid:
    /// `(H − Y) / m`, summed over output nodes (axis 0) and kept as (1 × m).
    pub fn score_gradient(h: &Matrix, y: &Matrix) -> Matrix {
        let m = y.cols as f64;
        h.zip_map(y, |h, y| h - y).sum_cols().scale(1.0 / m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninformed_prediction_costs_ln_two() {
        let h = BceLoss::probabilities(&Matrix::zeros(1, 4));
        let y = Matrix::from_data(vec![vec![0.0, 1.0, 1.0, 0.0]]);
        assert!((BceLoss::cost(&h, &y) - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn confident_correct_prediction_is_cheap_and_wrong_is_expensive() {
        let y = Matrix::from_data(vec![vec![1.0, 0.0]]);
        let right = BceLoss::probabilities(&Matrix::from_data(vec![vec![8.0, -8.0]]));
        let wrong = BceLoss::probabilities(&Matrix::from_data(vec![vec![-8.0, 8.0]]));
        let (c_right, c_wrong) = (BceLoss::cost(&right, &y), BceLoss::cost(&wrong, &y));
        assert!(c_right >= 0.0 && c_right < 1e-3);
        assert!(c_wrong > 7.0);
    }

    #[test]
    fn saturated_wrong_prediction_is_not_finite() {
        let y = Matrix::from_data(vec![vec![1.0]]);
        let h = BceLoss::probabilities(&Matrix::from_data(vec![vec![-1000.0]]));
        assert!(!BceLoss::cost(&h, &y).is_finite());
    }

    #[test]
    fn score_gradient_is_mean_residual() {
        let h = Matrix::from_data(vec![vec![0.75, 0.25]]);
        let y = Matrix::from_data(vec![vec![1.0, 0.0]]);
        assert_eq!(BceLoss::score_gradient(&h, &y).data, vec![vec![-0.125, 0.125]]);
    }
}
