//! Cumulative and semi-infinite radial integrals
//!
//! The tail integral ∫_r^∞ f(s) ds is split at the last sample r_max:
//!
//! ```text
//! ∫_r^{r_max} f(s) ds = ∫_{1/r_max}^{1/r} f(1/u) u⁻² du      (trapezoid in u)
//! ∫_{r_max}^∞ f(s) ds = ∫_{-1}^{1} f(t) 2 r_max/(x+1)² dx    (Gauss-Legendre)
//! ```
//!
//! with t = 2 r_max / (x + 1). The Jacobian vanishes as x → -1 only for
//! integrands decaying at least like 1/t², which holds for every forcing
//! in this crate; the point x = -1 itself contributes zero.
//!
//! The damped variants carry a factor e^{ik|r - s|} (Im k ≥ 0) through the
//! same trapezoid rules one interval at a time. Kernels that grow like
//! e^{Im k·r} can then be integrated against decaying ones without ever
//! forming either factor on its own.

use super::quadgauss;
use crate::error::{Result, StreamingError};
use crate::numeric::{Scalar, validate_increasing};
use ndarray::{Array1, ArrayView1, Zip, s};
use num_complex::Complex64;

/// Largest allowed distance of the first head sample from r = 1
const SURFACE_TOLERANCE: f64 = 1e-12;

/// Cumulative trapezoidal integral of `g` over `x`
///
/// `result[0] = 0` and `result[i] = Σ_{k<i} ½ (x[k+1] - x[k]) (g[k+1] + g[k])`.
/// Abscissas are taken as given, so a decreasing `x` integrates backwards;
/// only the lengths are checked.
pub fn cumint<T: Scalar>(g: ArrayView1<'_, T>, x: ArrayView1<'_, f64>) -> Result<Array1<T>> {
    if g.len() != x.len() {
        return Err(StreamingError::LengthMismatch {
            left: g.len(),
            right: x.len(),
        });
    }
    if g.is_empty() {
        return Err(StreamingError::EmptySamples { got: 0, need: 1 });
    }

    let mut out = Array1::from_elem(g.len(), T::zero());
    let mut acc = T::zero();
    for i in 1..g.len() {
        acc = acc + (g[i] + g[i - 1]) * (0.5 * (x[i] - x[i - 1]));
        out[i] = acc;
    }
    Ok(out)
}

/// ∫_{r_i}^∞ f0(s) ds at every radial sample
///
/// `f0` is evaluated once on the samples and once on the quadrature
/// abscissas beyond `r_max`; it must return one value per input point.
///
/// # Errors
/// Empty, non-positive or non-increasing samples.
///
/// # Example
/// ```
/// use math_streaming::quadrature::tail_to_infinity;
/// use ndarray::{Array1, array};
///
/// let r = array![1.0, 2.0, 5.0, 10.0];
/// let tail = tail_to_infinity(&r, |s: &Array1<f64>| s.mapv(|v| 1.0 / (v * v))).unwrap();
/// assert!((tail[1] - 0.5).abs() < 1e-10);
/// ```
pub fn tail_to_infinity<T, F>(r: &Array1<f64>, f0: F) -> Result<Array1<T>>
where
    T: Scalar,
    F: Fn(&Array1<f64>) -> Array1<T>,
{
    validate_positive_radii(r)?;
    let n = r.len();
    let r_max = r[n - 1];

    let f = f0(r);
    check_len(&f, n)?;

    // g(u) = f(1/u) / u² = f(r) r²
    let g = Zip::from(&f).and(r).map_collect(|&v, &ri| v * (ri * ri));
    let u = r.mapv(|ri| 1.0 / ri);
    let inner = cumint(g.slice(s![..;-1]), u.slice(s![..;-1]))?;

    let tail: T = quadgauss(|x: &Array1<f64>| {
        let t = x.mapv(|xi| if xi <= -1.0 { r_max } else { 2.0 * r_max / (xi + 1.0) });
        let jacobian = x.mapv(|xi| {
            if xi <= -1.0 {
                0.0
            } else {
                2.0 * r_max / ((xi + 1.0) * (xi + 1.0))
            }
        });
        let values = f0(&t);
        Zip::from(&values)
            .and(&jacobian)
            .map_collect(|&v, &j| if j == 0.0 { T::zero() } else { v * j })
    });

    Ok(Array1::from_shape_fn(n, |i| inner[n - 1 - i] + tail))
}

/// ∫_1^{r_i} f0(s) ds at every radial sample
///
/// # Errors
/// Invalid samples as for [`tail_to_infinity`], and `SurfaceMismatch`
/// unless the first sample is the cylinder surface r = 1.
pub fn head_from_one<T, F>(r: &Array1<f64>, f0: F) -> Result<Array1<T>>
where
    T: Scalar,
    F: Fn(&Array1<f64>) -> Array1<T>,
{
    validate_head_radii(r)?;
    let f = f0(r);
    check_len(&f, r.len())?;
    cumint(f.view(), r.view())
}

/// ∫_{r_i}^∞ e^{ik(s - r_i)} f0(s) ds at every radial sample
///
/// The interior uses the trapezoid in u = 1/r of [`tail_to_infinity`], the
/// part beyond `r_max` the same Gauss-Legendre map. With k = 0 both
/// transforms agree. `k` must satisfy Im k ≥ 0.
pub fn damped_tail_to_infinity<F>(
    r: &Array1<f64>,
    k: Complex64,
    f0: F,
) -> Result<Array1<Complex64>>
where
    F: Fn(&Array1<f64>) -> Array1<Complex64>,
{
    validate_positive_radii(r)?;
    let n = r.len();
    let r_max = r[n - 1];

    let f = f0(r);
    check_len(&f, n)?;
    let i_k = Complex64::i() * k;

    let tail: Complex64 = quadgauss(|x: &Array1<f64>| {
        let t = x.mapv(|xi| if xi <= -1.0 { r_max } else { 2.0 * r_max / (xi + 1.0) });
        let values = f0(&t);
        Zip::from(&values).and(&t).and(x).map_collect(|&v, &ti, &xi| {
            if xi <= -1.0 {
                Complex64::new(0.0, 0.0)
            } else {
                let jacobian = 2.0 * r_max / ((xi + 1.0) * (xi + 1.0));
                v * (i_k * (ti - r_max)).exp() * jacobian
            }
        })
    });

    let mut out = Array1::from_elem(n, tail);
    for i in (0..n - 1).rev() {
        let phase = (i_k * (r[i + 1] - r[i])).exp();
        let du = 1.0 / r[i] - 1.0 / r[i + 1];
        let g_i = f[i] * (r[i] * r[i]);
        let g_next = f[i + 1] * (r[i + 1] * r[i + 1]);
        out[i] = phase * out[i + 1] + (g_i + phase * g_next) * (0.5 * du);
    }
    Ok(out)
}

/// ∫_1^{r_i} e^{ik(r_i - s)} f0(s) ds at every radial sample
///
/// Trapezoid on each interval, as [`head_from_one`]; with k = 0 the two
/// agree. `k` must satisfy Im k ≥ 0.
///
/// # Errors
/// Same conditions as [`head_from_one`].
pub fn damped_head_from_one<F>(r: &Array1<f64>, k: Complex64, f0: F) -> Result<Array1<Complex64>>
where
    F: Fn(&Array1<f64>) -> Array1<Complex64>,
{
    validate_head_radii(r)?;
    let f = f0(r);
    check_len(&f, r.len())?;
    let i_k = Complex64::i() * k;

    let mut out = Array1::from_elem(r.len(), Complex64::new(0.0, 0.0));
    for i in 1..r.len() {
        let h = r[i] - r[i - 1];
        let phase = (i_k * h).exp();
        out[i] = phase * out[i - 1] + (phase * f[i - 1] + f[i]) * (0.5 * h);
    }
    Ok(out)
}

fn validate_head_radii(r: &Array1<f64>) -> Result<()> {
    validate_positive_radii(r)?;
    if (r[0] - 1.0).abs() > SURFACE_TOLERANCE {
        return Err(StreamingError::SurfaceMismatch { first: r[0] });
    }
    Ok(())
}

fn validate_positive_radii(r: &Array1<f64>) -> Result<()> {
    for (index, &ri) in r.iter().enumerate() {
        if ri == 0.0 {
            return Err(StreamingError::ZeroRadius { index });
        }
        if !ri.is_finite() || ri < 0.0 {
            return Err(StreamingError::NonPositiveRadius { index, r: ri });
        }
    }
    validate_increasing(r.view(), 1)
}

fn check_len<T>(values: &Array1<T>, n: usize) -> Result<()> {
    if values.len() != n {
        return Err(StreamingError::LengthMismatch {
            left: values.len(),
            right: n,
        });
    }
    Ok(())
}
