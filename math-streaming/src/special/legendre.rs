//! Legendre polynomials
//!
//! Only what the Gauss–Legendre node generator needs: P_n(x) and P'_n(x)
//! at a single abscissa.

/// Compute Legendre polynomials P_k(x) for k = 0, 1, ..., order-1
///
/// Uses the stable three-term recurrence relation:
/// ```text
/// (n+1) P_{n+1}(x) = (2n+1) x P_n(x) - n P_{n-1}(x)
/// ```
///
/// # Example
/// ```
/// use math_streaming::special::legendre_polynomials;
/// let p = legendre_polynomials(5, 0.5);
/// assert!((p[0] - 1.0).abs() < 1e-10);
/// assert!((p[1] - 0.5).abs() < 1e-10);
/// ```
pub fn legendre_polynomials(order: usize, x: f64) -> Vec<f64> {
    assert!(order >= 1, "Order must be at least 1");

    let mut result = vec![0.0; order];
    result[0] = 1.0;

    if order == 1 {
        return result;
    }

    result[1] = x;

    for n in 2..order {
        let n_f64 = n as f64;
        result[n] =
            ((2.0 * n_f64 - 1.0) * x * result[n - 1] - (n_f64 - 1.0) * result[n - 2]) / n_f64;
    }

    result
}

/// P_n(x) together with its derivative P'_n(x)
///
/// The derivative comes from
/// ```text
/// (x² - 1) P'_n(x) = n (x P_n(x) - P_{n-1}(x))
/// ```
/// with P'_n(±1) = (±1)^{n+1} n(n+1)/2 at the endpoints.
pub fn legendre_p_with_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    let p = legendre_polynomials(n + 1, x);
    let n_f64 = n as f64;
    let x2_minus_1 = x * x - 1.0;

    let dp = if x2_minus_1.abs() < 1e-14 {
        let sign: f64 = if x > 0.0 { 1.0 } else { -1.0 };
        sign.powi(n as i32 + 1) * n_f64 * (n_f64 + 1.0) / 2.0
    } else {
        n_f64 * (x * p[n] - p[n - 1]) / x2_minus_1
    };

    (p[n], dp)
}
