use serde::{Serialize, Deserialize};

use crate::error::TrainError;

/// Layer widths `N0..NL`: the input feature count followed by the width of
/// each of the L layers.
///
/// The output width is fixed at one node, because the output gradient is the
/// fused sigmoid + binary cross-entropy derivative for a single score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology(Vec<usize>);

impl Topology {
    pub fn new(widths: Vec<usize>) -> Result<Topology, TrainError> {
        if widths.len() < 2 {
            return Err(TrainError::InvalidTopology(format!(
                "need an input width and at least one layer, got {:?}",
                widths
            )));
        }
        if let Some(i) = widths.iter().position(|&w| w == 0) {
            return Err(TrainError::InvalidTopology(format!("width N{} is zero", i)));
        }
        if widths[widths.len() - 1] != 1 {
            return Err(TrainError::InvalidTopology(format!(
                "output layer must have exactly one node, got {}",
                widths[widths.len() - 1]
            )));
        }
        Ok(Topology(widths))
    }

    /// The five-layer 6 → 5 → 4 → 3 → 2 → 1 layout used for the passenger data.
    pub fn titanic() -> Topology {
        Topology(vec![6, 5, 4, 3, 2, 1])
    }

    pub fn widths(&self) -> &[usize] {
        &self.0
    }

    /// N0.
    pub fn input_size(&self) -> usize {
        self.0[0]
    }

    /// L, the number of weighted layers.
    pub fn num_layers(&self) -> usize {
        self.0.len() - 1
    }

    /// Weight shape `(N_{i-1}, N_i)` of layer `i`, 1-based.
    pub fn layer_shape(&self, i: usize) -> (usize, usize) {
        (self.0[i - 1], self.0[i])
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = TrainError;

    fn try_from(widths: Vec<usize>) -> Result<Self, Self::Error> {
        Topology::new(widths)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Self {
        topology.0
    }
}
