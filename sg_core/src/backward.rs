//! Reverse-mode gradient accumulation.
//!
//! The backward pass has two phases:
//! 1. Order every node reachable from the root so that operands come
//!    strictly before their consumers.
//! 2. Walk that order in reverse, pushing each node's (by then final)
//!    gradient down to its operands through the chain rule.

use std::collections::HashSet;

use log::trace;

use crate::node::{NodeId, Value};
use crate::ops::local_gradients;

/// Compute gradients of `root` with respect to every node that contributed
/// to it.
///
/// Seeds `root`'s gradient to 1.0 (the single place a gradient is
/// overwritten rather than added to), then walks the topological order in
/// reverse, adding `node.grad * local_gradient` into each operand's
/// accumulator. Processing strictly in reverse topological order guarantees
/// a node's gradient is fully accumulated from all of its consumers before
/// it propagates further.
///
/// After the pass, every reachable node's [`Value::grad`] is the exact
/// partial derivative of the root's value with respect to that node,
/// evaluated at the forward values stored in the graph.
///
/// Calling this twice on the same root without [`Value::zero_grad`]
/// accumulates again: gradients double. Calling it on a leaf just sets that
/// leaf's gradient to 1.0.
pub fn backward(root: &Value) {
    let order = topological_order(root);
    trace!("backward pass over {} nodes", order.len());

    root.seed_grad(1.0);

    for node in order.iter().rev() {
        let upstream = node.grad();
        let locals = local_gradients(&node.0);
        for (operand, local) in node.operands().iter().zip(locals) {
            operand.accumulate_grad(upstream * local);
        }
    }
}

/// Produce a topological ordering of every node reachable from `root`.
///
/// Each distinct node appears exactly once, after all of its operands.
/// The traversal is an iterative post-order DFS with an explicit stack, so
/// graph depth is bounded by heap, not the call stack; the chains built by
/// iterative consumers (e.g. network layers) can get arbitrarily deep.
/// A visited set keyed by [`NodeId`] keeps shared subexpressions from being
/// emitted more than once.
pub fn topological_order(root: &Value) -> Vec<Value> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut order = Vec::new();
    // (node, expanded): a node is pushed once to expand its operands and a
    // second time, beneath them, to be emitted after they all are.
    let mut stack = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        if !visited.insert(node.id()) {
            continue;
        }
        stack.push((node.clone(), true));
        for operand in node.operands() {
            stack.push((operand.clone(), false));
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Value;

    #[test]
    fn order_respects_operand_precedence() {
        // f = (a + b) * (a - b), plus a tanh on top for depth.
        let a = Value::new(3.0);
        let b = Value::new(2.0);
        let s = &a + &b;
        let d = &a - &b;
        let f = (&s * &d).tanh();

        let order = topological_order(&f);

        let index_of = |v: &Value| order.iter().position(|n| n.id() == v.id()).unwrap();
        for node in &order {
            for operand in node.operands() {
                assert!(
                    index_of(operand) < index_of(node),
                    "operand {} must precede node {}",
                    operand.id(),
                    node.id()
                );
            }
        }
        // Root comes last.
        assert_eq!(order.last().unwrap().id(), f.id());
    }

    #[test]
    fn shared_nodes_appear_once() {
        let a = Value::new(1.5);
        // a feeds both operand slots: the graph has 2 distinct nodes.
        let out = &a * &a;

        let order = topological_order(&out);
        assert_eq!(order.len(), 2);
        assert_eq!(order[0].id(), a.id());
        assert_eq!(order[1].id(), out.id());
    }

    #[test]
    fn backward_on_leaf_seeds_only() {
        let a = Value::new(7.0);
        backward(&a);
        assert_eq!(a.grad(), 1.0);
    }

    #[test]
    fn repeated_backward_accumulates() {
        let a = Value::new(2.0);
        let b = Value::new(3.0);
        let out = &a * &b;

        backward(&out);
        assert_eq!(a.grad(), 3.0);
        assert_eq!(b.grad(), 2.0);

        // No reset in between: contributions sum, gradients double.
        backward(&out);
        assert_eq!(a.grad(), 6.0);
        assert_eq!(b.grad(), 4.0);

        a.zero_grad();
        b.zero_grad();
        out.zero_grad();
        backward(&out);
        assert_eq!(a.grad(), 3.0);
        assert_eq!(b.grad(), 2.0);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        // 200k stacked negations would blow a recursive traversal.
        let leaf = Value::new(1.0);
        let mut node = leaf.clone();
        for _ in 0..200_000 {
            node = -&node;
        }

        backward(&node);
        assert_eq!(leaf.grad(), 1.0); // (-1)^200000
    }
}
