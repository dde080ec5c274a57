//! Core data structures for the computation graph.
//!
//! A graph is built from [`Value`] handles, which are reference-counted
//! pointers to internal `Node` structures. Cloning a `Value` is cheap and
//! lets the same subexpression appear as an operand of many downstream
//! nodes without copying it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::EngineError;

/// Global counter for generating unique node IDs.
static NODE_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_node_id() -> u64 {
    NODE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Unique identifier for a node in the computation graph.
///
/// IDs are process-unique and give every node a stable identity, used for
/// visited sets during traversal and for deduplication when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The operation that produced a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// An input node with no operands.
    Leaf,
    /// operands[0] + operands[1]
    Add,
    /// operands[0] * operands[1]
    Mul,
    /// operands[0] / operands[1]
    Div,
    /// -operands[0]
    Neg,
    /// operands[0]^exponent, for a fixed real exponent
    Pow { exponent: f64 },
    /// exp(operands[0])
    Exp,
    /// tanh(operands[0])
    Tanh,
}

impl Op {
    /// Whether this tag marks an input node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Op::Leaf)
    }

    /// Short symbol for diagnostics and graph rendering.
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Leaf => "",
            Op::Add => "+",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Neg => "neg",
            Op::Pow { .. } => "^",
            Op::Exp => "exp",
            Op::Tanh => "tanh",
        }
    }
}

/// Internal node: one scalar in the graph, plus its gradient accumulator.
///
/// Everything but `grad` and `label` is fixed at construction. `grad` only
/// mutates during backward passes, `label` only through the diagnostic
/// setters.
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) value: f64,
    pub(crate) grad: Cell<f64>,
    pub(crate) op: Op,
    pub(crate) operands: Vec<Value>,
    pub(crate) label: RefCell<Option<String>>,
}

// Long chains (e.g. one node per training step in a host loop) would
// overflow the stack under the default recursive drop, so uniquely-owned
// subgraphs are torn down with an explicit worklist instead.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.operands);
        while let Some(operand) = stack.pop() {
            if let Ok(mut node) = Rc::try_unwrap(operand.0) {
                stack.append(&mut node.operands);
            }
        }
    }
}

/// A scalar value in the computation graph.
///
/// `Value` is a reference-counted handle to a graph node. Cloning is O(1)
/// and shares the underlying node, so a single value can feed into any
/// number of downstream operations; the multivariate chain rule is honored
/// by summing gradient contributions from every consumer.
///
/// The operand relation is acyclic by construction: operations can only
/// reference values that already exist.
#[derive(Clone)]
pub struct Value(pub(crate) Rc<Node>);

impl Value {
    /// Create a leaf node from a raw scalar.
    pub fn new(value: f64) -> Self {
        Value::from_op(value, Op::Leaf, vec![])
    }

    /// Create a labeled leaf node. The label is diagnostic only and has no
    /// effect on computation.
    pub fn with_label(value: f64, label: &str) -> Self {
        let v = Value::new(value);
        v.set_label(label);
        v
    }

    pub(crate) fn from_op(value: f64, op: Op, operands: Vec<Value>) -> Self {
        Value(Rc::new(Node {
            id: NodeId(next_node_id()),
            value,
            grad: Cell::new(0.0),
            op,
            operands,
            label: RefCell::new(None),
        }))
    }

    /// The unique ID of this value's node.
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// The forward-computed scalar.
    pub fn value(&self) -> f64 {
        self.0.value
    }

    /// The accumulated gradient d(root)/d(self) after a backward pass from
    /// some root. Zero until a backward pass has run.
    pub fn grad(&self) -> f64 {
        self.0.grad.get()
    }

    /// Reset the gradient accumulator to zero.
    ///
    /// Backward passes only ever add into `grad`; callers reusing a node
    /// across independent passes must reset it themselves.
    pub fn zero_grad(&self) {
        self.0.grad.set(0.0);
    }

    pub(crate) fn seed_grad(&self, g: f64) {
        self.0.grad.set(g);
    }

    pub(crate) fn accumulate_grad(&self, g: f64) {
        self.0.grad.set(self.0.grad.get() + g);
    }

    /// The operation that produced this value.
    pub fn op(&self) -> Op {
        self.0.op
    }

    /// The ordered direct predecessors of this value. Empty for a leaf.
    pub fn operands(&self) -> &[Value] {
        &self.0.operands
    }

    /// Whether this value is an input node (no operands).
    pub fn is_leaf(&self) -> bool {
        self.0.op.is_leaf()
    }

    /// The diagnostic label, if one was set.
    pub fn label(&self) -> Option<String> {
        self.0.label.borrow().clone()
    }

    /// Set the diagnostic label.
    pub fn set_label(&self, label: &str) {
        *self.0.label.borrow_mut() = Some(label.to_string());
    }

    // === Unary operations ===

    /// The exponential: e^self.
    pub fn exp(&self) -> Value {
        Value::from_op(self.value().exp(), Op::Exp, vec![self.clone()])
    }

    /// The hyperbolic tangent: (e^(2x) - 1) / (e^(2x) + 1).
    pub fn tanh(&self) -> Value {
        Value::from_op(self.value().tanh(), Op::Tanh, vec![self.clone()])
    }

    /// Raise to a power: self^exponent.
    ///
    /// The exponent must be a plain numeric constant. Passing a graph node
    /// fails with [`EngineError::UnsupportedOperation`]: the exponent is not
    /// differentiated, so wiring it into the graph would silently drop its
    /// gradient.
    pub fn pow(&self, exponent: impl Into<Exponent>) -> Result<Value, EngineError> {
        match exponent.into() {
            Exponent::Constant(e) => Ok(Value::from_op(
                self.value().powf(e),
                Op::Pow { exponent: e },
                vec![self.clone()],
            )),
            Exponent::Value(v) => Err(EngineError::UnsupportedOperation(format!(
                "pow requires a plain numeric exponent, got graph node {} (value {})",
                v.id(),
                v.value()
            ))),
        }
    }

    /// Run a backward pass from this value. See [`crate::backward`].
    pub fn backward(&self) {
        crate::backward::backward(self)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("id", &self.0.id)
            .field("value", &self.0.value)
            .field("grad", &self.0.grad.get())
            .field("op", &self.0.op)
            .finish()
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::new(value)
    }
}

/// Exponent argument for [`Value::pow`].
///
/// Only [`Exponent::Constant`] is differentiable; a [`Exponent::Value`]
/// exponent is rejected at construction time.
pub enum Exponent {
    Constant(f64),
    Value(Value),
}

impl From<f64> for Exponent {
    fn from(e: f64) -> Self {
        Exponent::Constant(e)
    }
}

impl From<i32> for Exponent {
    fn from(e: i32) -> Self {
        Exponent::Constant(e as f64)
    }
}

impl From<&Value> for Exponent {
    fn from(v: &Value) -> Self {
        Exponent::Value(v.clone())
    }
}

impl From<Value> for Exponent {
    fn from(v: Value) -> Self {
        Exponent::Value(v)
    }
}

// === Operator overloads ===
//
// Each binary operator is provided for all four reference combinations so
// expressions read naturally whether the caller owns the values or not.

fn add(lhs: &Value, rhs: &Value) -> Value {
    Value::from_op(lhs.value() + rhs.value(), Op::Add, vec![lhs.clone(), rhs.clone()])
}

fn mul(lhs: &Value, rhs: &Value) -> Value {
    Value::from_op(lhs.value() * rhs.value(), Op::Mul, vec![lhs.clone(), rhs.clone()])
}

fn div(lhs: &Value, rhs: &Value) -> Value {
    // A zero divisor is not special-cased: IEEE-754 infinities and NaNs
    // propagate through the graph and the backward pass.
    Value::from_op(lhs.value() / rhs.value(), Op::Div, vec![lhs.clone(), rhs.clone()])
}

fn neg(operand: &Value) -> Value {
    Value::from_op(-operand.value(), Op::Neg, vec![operand.clone()])
}

impl std::ops::Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        neg(self)
    }
}

impl std::ops::Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        neg(&self)
    }
}

impl std::ops::Add for &Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        add(self, rhs)
    }
}

impl std::ops::Add<Value> for &Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        add(self, &rhs)
    }
}

impl std::ops::Add<&Value> for Value {
    type Output = Value;

    fn add(self, rhs: &Value) -> Value {
        add(&self, rhs)
    }
}

impl std::ops::Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        add(&self, &rhs)
    }
}

// Subtraction has no operation tag of its own: a - b is built as a + (-b).

impl std::ops::Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        add(self, &neg(rhs))
    }
}

impl std::ops::Sub<Value> for &Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        add(self, &neg(&rhs))
    }
}

impl std::ops::Sub<&Value> for Value {
    type Output = Value;

    fn sub(self, rhs: &Value) -> Value {
        add(&self, &neg(rhs))
    }
}

impl std::ops::Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        add(&self, &neg(&rhs))
    }
}

impl std::ops::Mul for &Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        mul(self, rhs)
    }
}

impl std::ops::Mul<Value> for &Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        mul(self, &rhs)
    }
}

impl std::ops::Mul<&Value> for Value {
    type Output = Value;

    fn mul(self, rhs: &Value) -> Value {
        mul(&self, rhs)
    }
}

impl std::ops::Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        mul(&self, &rhs)
    }
}

impl std::ops::Div for &Value {
    type Output = Value;

    fn div(self, rhs: &Value) -> Value {
        div(self, rhs)
    }
}

impl std::ops::Div<Value> for &Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        div(self, &rhs)
    }
}

impl std::ops::Div<&Value> for Value {
    type Output = Value;

    fn div(self, rhs: &Value) -> Value {
        div(&self, rhs)
    }
}

impl std::ops::Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        div(&self, &rhs)
    }
}
