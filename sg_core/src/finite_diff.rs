//! Numerical gradient checking.
//!
//! Central finite differences give an approximation to compare the engine's
//! analytic gradients against in tests and demos.

/// Approximate the gradient of `f` at `point` by central differences.
///
/// `f` maps a slice of input values to a scalar; the result holds one
/// partial derivative per input, in input order. `eps` is the perturbation
/// step (1e-7 to 1e-5 works well for f64).
///
/// # Example
/// ```
/// use sg_core::finite_diff_grad;
///
/// // f(x, y) = x * y, so df/dx = y and df/dy = x.
/// let grads = finite_diff_grad(|v| v[0] * v[1], &[2.0, -3.0], 1e-7);
/// assert!((grads[0] - (-3.0)).abs() < 1e-5);
/// assert!((grads[1] - 2.0).abs() < 1e-5);
/// ```
pub fn finite_diff_grad<F>(f: F, point: &[f64], eps: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut probe = point.to_vec();
    let mut grads = Vec::with_capacity(point.len());

    for i in 0..point.len() {
        probe[i] = point[i] + eps;
        let plus = f(&probe);

        probe[i] = point[i] - eps;
        let minus = f(&probe);

        probe[i] = point[i];
        grads.push((plus - minus) / (2.0 * eps));
    }

    grads
}

/// Largest absolute componentwise difference between two gradient vectors.
pub fn max_grad_error(analytic: &[f64], numeric: &[f64]) -> f64 {
    assert_eq!(analytic.len(), numeric.len());
    analytic
        .iter()
        .zip(numeric)
        .map(|(a, n)| (a - n).abs())
        .fold(0.0, f64::max)
}
