//! # sg_nn - Feed-Forward Network Building Blocks
//!
//! Neurons, layers, and a multi-layer perceptron built directly on the
//! [`sg_core`] scalar autodiff engine. Each forward pass composes engine
//! operations, so the resulting output is a graph root: calling
//! `backward()` on it fills in gradients for every weight and bias.
//!
//! Randomness is explicit: constructors take a [`rand::Rng`] so
//! initialization is reproducible from a seed rather than depending on
//! ambient global state.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use sg_core::Value;
//! use sg_nn::Mlp;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mlp = Mlp::new(3, &[4, 4, 1], &mut rng);
//!
//! let x = [Value::new(2.0), Value::new(3.0), Value::new(-1.0)];
//! let out = mlp.forward(&x);
//! assert_eq!(out.len(), 1);
//!
//! out[0].backward();
//! // Every parameter now carries d(out)/d(param).
//! let grads: Vec<f64> = mlp.parameters().iter().map(|p| p.grad()).collect();
//! assert!(grads.iter().all(|g| g.is_finite()));
//! ```
//!
//! This crate deliberately stops at graph construction and parameter
//! access; losses, optimizers, and training loops belong to the host
//! program.

mod layer;
mod mlp;
mod neuron;

pub use layer::Layer;
pub use mlp::Mlp;
pub use neuron::Neuron;
