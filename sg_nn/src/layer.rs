//! A fully connected layer of independent neurons.

use rand::Rng;
use sg_core::Value;

use crate::neuron::Neuron;

/// `nout` neurons reading the same `nin` inputs.
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    pub fn new(nin: usize, nout: usize, rng: &mut impl Rng) -> Self {
        let neurons = (0..nout).map(|_| Neuron::new(nin, rng)).collect();
        Layer { neurons }
    }

    /// Forward pass: one output per neuron, in neuron order.
    pub fn forward(&self, inputs: &[Value]) -> Vec<Value> {
        self.neurons.iter().map(|n| n.forward(inputs)).collect()
    }

    /// All trainable parameters, flattened in neuron order.
    pub fn parameters(&self) -> Vec<Value> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }

    pub fn nout(&self) -> usize {
        self.neurons.len()
    }
}
