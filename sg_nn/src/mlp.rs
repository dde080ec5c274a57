//! Multi-layer perceptron.

use log::debug;
use rand::Rng;
use sg_core::Value;

use crate::layer::Layer;

/// A stack of fully connected tanh layers.
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Build an MLP taking `nin` inputs through hidden/output widths
    /// `nouts`, e.g. `Mlp::new(3, &[4, 4, 1], rng)` for a 3-4-4-1 network.
    pub fn new(nin: usize, nouts: &[usize], rng: &mut impl Rng) -> Self {
        let mut sizes = vec![nin];
        sizes.extend_from_slice(nouts);

        let layers = sizes
            .windows(2)
            .map(|pair| Layer::new(pair[0], pair[1], rng))
            .collect();

        debug!("mlp with layer sizes {:?}", sizes);
        Mlp { layers }
    }

    /// Forward pass through every layer in order.
    pub fn forward(&self, inputs: &[Value]) -> Vec<Value> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        activations
    }

    /// All trainable parameters, flattened in layer order.
    pub fn parameters(&self) -> Vec<Value> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parameter_count() {
        let mut rng = StdRng::seed_from_u64(6);
        let mlp = Mlp::new(3, &[4, 4, 1], &mut rng);

        // (3+1)*4 + (4+1)*4 + (4+1)*1 = 41
        assert_eq!(mlp.parameters().len(), 41);
    }

    #[test]
    fn forward_narrows_to_output_width() {
        let mut rng = StdRng::seed_from_u64(7);
        let mlp = Mlp::new(2, &[3, 1], &mut rng);

        let x = [Value::new(0.5), Value::new(-0.5)];
        let out = mlp.forward(&x);
        assert_eq!(out.len(), 1);
        assert!(out[0].value().abs() < 1.0);
    }
}
