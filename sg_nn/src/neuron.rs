//! A single tanh neuron.

use rand::Rng;
use sg_core::Value;

/// One neuron: a weighted sum of its inputs plus a bias, squashed by tanh.
pub struct Neuron {
    weights: Vec<Value>,
    bias: Value,
}

impl Neuron {
    /// Create a neuron with `nin` inputs, weights and bias drawn uniformly
    /// from [-1, 1).
    pub fn new(nin: usize, rng: &mut impl Rng) -> Self {
        let weights = (0..nin)
            .map(|i| Value::with_label(rng.gen_range(-1.0..1.0), &format!("w{i}")))
            .collect();
        let bias = Value::with_label(rng.gen_range(-1.0..1.0), "b");
        Neuron { weights, bias }
    }

    /// Forward pass: tanh(w . x + b).
    ///
    /// `inputs` must have exactly `nin` elements.
    pub fn forward(&self, inputs: &[Value]) -> Value {
        debug_assert_eq!(inputs.len(), self.weights.len());
        let activation = self
            .weights
            .iter()
            .zip(inputs)
            .fold(self.bias.clone(), |acc, (w, x)| &acc + &(w * x));
        activation.tanh()
    }

    /// All trainable parameters: the weights, then the bias.
    pub fn parameters(&self) -> Vec<Value> {
        let mut params = self.weights.clone();
        params.push(self.bias.clone());
        params
    }

    /// Number of inputs this neuron accepts.
    pub fn nin(&self) -> usize {
        self.weights.len()
    }
}
