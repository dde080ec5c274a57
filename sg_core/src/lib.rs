//! # sg_core - Scalar Reverse-Mode Autodiff Engine
//!
//! This crate builds a directed acyclic graph of scalar arithmetic as it is
//! evaluated, then computes exact gradients of any output with respect to
//! every node that contributed to it in a single reverse pass.
//!
//! ## Quick Start
//!
//! ```
//! use sg_core::Value;
//!
//! // Leaves are the inputs we differentiate with respect to.
//! let a = Value::with_label(2.0, "a");
//! let b = Value::with_label(-3.0, "b");
//! let c = Value::with_label(10.0, "c");
//!
//! // Each operation computes its value eagerly and records how it was made.
//! let f = (&(&a * &b) + &c).tanh();
//! assert!((f.value() - 4.0_f64.tanh()).abs() < 1e-12);
//!
//! // One backward pass fills in d(f)/d(node) for every node in the graph.
//! f.backward();
//! let local = 1.0 - f.value() * f.value();
//! assert!((a.grad() - b.value() * local).abs() < 1e-12);
//! assert!((c.grad() - local).abs() < 1e-12);
//! ```
//!
//! ## Supported Operations
//!
//! | Category | Operations |
//! |----------|------------|
//! | Arithmetic | `+`, `-`, `*`, `/`, unary `-` |
//! | Power | [`Value::pow`] (x^c for a constant c) |
//! | Transcendental | [`Value::exp`], [`Value::tanh`] |
//!
//! Subtraction is sugar: `a - b` builds `a + (-b)`, so only the operations
//! above carry differentiation rules.
//!
//! ## Architecture
//!
//! - **[`Value`]**: reference-counted handle to a graph node holding a
//!   forward value and a gradient accumulator. Cloning is O(1) and shares
//!   the node, which is how fan-out (one value feeding many consumers) is
//!   expressed.
//! - **[`backward`]**: seeds the root's gradient to 1.0, orders the graph
//!   topologically, and accumulates gradients in reverse. Gradients are only
//!   ever added to, so a value used on several paths receives the sum of all
//!   path contributions.
//! - **[`finite_diff_grad`]**: numerical cross-check for the analytic
//!   gradients.
//!
//! Gradients persist on the nodes until reset: call [`Value::zero_grad`]
//! before reusing a graph across independent backward passes, or the passes
//! will accumulate on top of each other.
//!
//! The engine is single-threaded and synchronous; a backward pass mutates
//! only gradient accumulators, and nothing else in a graph changes after
//! construction.

mod backward;
mod error;
mod finite_diff;
mod node;
mod ops;

pub use backward::{backward, topological_order};
pub use error::EngineError;
pub use finite_diff::{finite_diff_grad, max_grad_error};
pub use node::{Exponent, NodeId, Op, Value};
