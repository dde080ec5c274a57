//! # sg_viz - Computation Graph Rendering
//!
//! Renders an [`sg_core`] computation graph as Graphviz DOT text. Each
//! value becomes a record-shaped box showing its label, forward value, and
//! gradient; each non-leaf value gets a small operation box wired between
//! it and its operands.
//!
//! The renderer only reads the graph: identity, label, value, gradient,
//! operation tag, and operands. Pipe the output through `dot -Tsvg` to get
//! a picture.

use std::collections::HashSet;

use sg_core::{NodeId, Value};

/// Collect the distinct nodes and operand edges reachable from `root`.
///
/// Nodes and edges are deduplicated by [`NodeId`], so a value reused on
/// several paths (or in both slots of one operation) appears once.
pub fn trace(root: &Value) -> (Vec<Value>, Vec<(Value, Value)>) {
    let mut seen_nodes: HashSet<NodeId> = HashSet::new();
    let mut seen_edges: HashSet<(NodeId, NodeId)> = HashSet::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if !seen_nodes.insert(node.id()) {
            continue;
        }
        for operand in node.operands() {
            if seen_edges.insert((operand.id(), node.id())) {
                edges.push((operand.clone(), node.clone()));
            }
            stack.push(operand.clone());
        }
        nodes.push(node);
    }

    (nodes, edges)
}

/// Render the graph rooted at `root` as a DOT digraph, laid out
/// left-to-right so data flows the way the expression reads.
pub fn to_dot(root: &Value) -> String {
    let (nodes, edges) = trace(root);

    let mut dot = String::from("digraph {\n    rankdir=LR;\n");

    for node in &nodes {
        let label = node.label().unwrap_or_default();
        dot.push_str(&format!(
            "    n{} [shape=record, label=\"{{ {} | value {:.4} | grad {:.4} }}\"];\n",
            node.id(),
            label,
            node.value(),
            node.grad()
        ));
        if !node.is_leaf() {
            // The operation box sits between a node and its operands.
            dot.push_str(&format!(
                "    n{id}_op [label=\"{}\"];\n    n{id}_op -> n{id};\n",
                node.op().symbol(),
                id = node.id()
            ));
        }
    }

    for (operand, consumer) in &edges {
        dot.push_str(&format!(
            "    n{} -> n{}_op;\n",
            operand.id(),
            consumer.id()
        ));
    }

    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_dedupes_shared_operands() {
        let a = Value::new(3.0);
        let out = &a * &a;

        let (nodes, edges) = trace(&out);
        assert_eq!(nodes.len(), 2);
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn dot_contains_labels_and_ops() {
        let a = Value::with_label(2.0, "a");
        let b = Value::with_label(-3.0, "b");
        let f = (&a * &b).tanh();
        f.set_label("f");

        let dot = to_dot(&f);
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("rankdir=LR"));
        assert!(dot.contains("| value 2.0000 |"));
        assert!(dot.contains("[label=\"*\"]"));
        assert!(dot.contains("[label=\"tanh\"]"));
        assert!(dot.contains("{ f |"));
    }

    #[test]
    fn one_record_per_distinct_node() {
        let a = Value::new(1.0);
        let b = Value::new(2.0);
        // Diamond: a and b both feed two intermediate nodes.
        let f = &(&a + &b) * &(&a - &b);

        let dot = to_dot(&f);
        // a, b, a+b, -b, a+(-b), product: 6 records.
        assert_eq!(dot.matches("shape=record").count(), 6);
    }

    #[test]
    fn gradients_show_after_backward() {
        let a = Value::with_label(2.0, "a");
        let out = a.exp();
        out.backward();

        let dot = to_dot(&out);
        assert!(dot.contains(&format!("grad {:.4}", 2.0_f64.exp())));
    }
}
