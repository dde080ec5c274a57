//! Demo for the scalar autodiff workspace.
//!
//! Builds a small expression graph, runs the backward pass, validates the
//! gradients against finite differences, pushes an input through a tiny
//! MLP, and dumps the first graph as Graphviz DOT.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sg_core::{finite_diff_grad, max_grad_error, Value};
use sg_nn::Mlp;
use sg_viz::to_dot;

fn main() {
    println!("=== Scalar Autodiff Demo ===\n");

    // f = tanh(a*b + c)
    let a = Value::with_label(2.0, "a");
    let b = Value::with_label(-3.0, "b");
    let c = Value::with_label(10.0, "c");

    let e = &a * &b;
    e.set_label("e");
    let d = &e + &c;
    d.set_label("d");
    let f = d.tanh();
    f.set_label("f");

    println!("Expression: f = tanh(a*b + c)");
    println!("At point:   a = 2, b = -3, c = 10");
    println!("Value:      f = {:.10}\n", f.value());

    f.backward();
    println!("Autodiff gradients:");
    println!("  df/da = {:.10}", a.grad());
    println!("  df/db = {:.10}", b.grad());
    println!("  df/dc = {:.10}\n", c.grad());

    // Validate against central finite differences.
    let rebuild = |vals: &[f64]| {
        let a = Value::new(vals[0]);
        let b = Value::new(vals[1]);
        let c = Value::new(vals[2]);
        (&(&a * &b) + &c).tanh().value()
    };
    let numeric = finite_diff_grad(rebuild, &[2.0, -3.0, 10.0], 1e-7);
    let analytic = [a.grad(), b.grad(), c.grad()];

    println!("Finite difference gradients (eps=1e-7):");
    println!("  df/da = {:.10}", numeric[0]);
    println!("  df/db = {:.10}", numeric[1]);
    println!("  df/dc = {:.10}\n", numeric[2]);

    let max_err = max_grad_error(&analytic, &numeric);
    let tolerance = 1e-5;
    println!("Max absolute error: {:.2e}", max_err);
    if max_err < tolerance {
        println!("PASS: max error < {:.0e}\n", tolerance);
    } else {
        println!("FAIL: max error >= {:.0e}\n", tolerance);
        std::process::exit(1);
    }

    // Gradient accumulation through reuse: g = x*x, dg/dx = 2x.
    println!("Reuse: g = x*x at x = 3");
    let x = Value::with_label(3.0, "x");
    let g = &x * &x;
    g.backward();
    println!("  dg/dx = {} (expected 2x = 6)\n", x.grad());

    // One forward/backward through a small network.
    println!("MLP 3-4-4-1, seeded init:");
    let mut rng = StdRng::seed_from_u64(1337);
    let mlp = Mlp::new(3, &[4, 4, 1], &mut rng);
    let input = [Value::new(2.0), Value::new(3.0), Value::new(-1.0)];
    let out = mlp.forward(&input);
    out[0].backward();

    let params = mlp.parameters();
    let grad_norm: f64 = params.iter().map(|p| p.grad() * p.grad()).sum::<f64>().sqrt();
    println!("  output             = {:.6}", out[0].value());
    println!("  parameters         = {}", params.len());
    println!("  parameter grad L2  = {:.6}\n", grad_norm);

    println!("DOT rendering of f = tanh(a*b + c):\n");
    println!("{}", to_dot(&f));
}
