//! Local gradient rules for each operation.
//!
//! Instead of storing a deferred closure per node, the backward pass
//! dispatches the partial-derivative formula from the node's operation tag.
//! All the state the formulas need is already recorded in the graph: the
//! node's own forward value and its operands' values.

use crate::node::{Node, Op};

/// Compute the local gradients d(node)/d(operand_i) for every operand of a
/// node, in operand order. Leaves have no operands and return nothing.
pub(crate) fn local_gradients(node: &Node) -> Vec<f64> {
    match node.op {
        Op::Leaf => vec![],

        // z = x + y: dz/dx = 1, dz/dy = 1
        Op::Add => vec![1.0, 1.0],

        // z = x * y: dz/dx = y, dz/dy = x
        Op::Mul => {
            let x = node.operands[0].value();
            let y = node.operands[1].value();
            vec![y, x]
        }

        // z = x / y: dz/dx = 1/y, dz/dy = -x/y^2
        Op::Div => {
            let x = node.operands[0].value();
            let y = node.operands[1].value();
            vec![1.0 / y, -x / (y * y)]
        }

        // z = -x: dz/dx = -1
        Op::Neg => vec![-1.0],

        // z = x^c for constant c: dz/dx = c * x^(c-1)
        Op::Pow { exponent } => {
            let x = node.operands[0].value();
            vec![exponent * x.powf(exponent - 1.0)]
        }

        // z = exp(x): dz/dx = z
        Op::Exp => vec![node.value],

        // z = tanh(x): dz/dx = 1 - z^2
        Op::Tanh => vec![1.0 - node.value * node.value],
    }
}
