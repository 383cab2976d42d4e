//! Derivative of sampled data
//!
//! Second-order central differences in the interior, valid on non-uniform
//! spacing, and first-order one-sided differences at both ends:
//!
//! ```text
//! f'(x_i) ≈ (h₋² f_{i+1} + (h₊² - h₋²) f_i - h₊² f_{i-1}) / (h₋ h₊ (h₋ + h₊))
//! ```
//!
//! with h₋ = x_i - x_{i-1} and h₊ = x_{i+1} - x_i.

use super::Scalar;
use crate::error::{Result, StreamingError};
use ndarray::{Array1, ArrayView1};

/// df/dx at every sample of `f`
///
/// # Errors
/// Fewer than two samples or mismatched lengths.
pub fn gradient<T: Scalar>(f: ArrayView1<'_, T>, x: ArrayView1<'_, f64>) -> Result<Array1<T>> {
    if f.len() != x.len() {
        return Err(StreamingError::LengthMismatch {
            left: f.len(),
            right: x.len(),
        });
    }
    let n = f.len();
    if n < 2 {
        return Err(StreamingError::EmptySamples { got: n, need: 2 });
    }

    let mut df = Array1::from_elem(n, T::zero());
    df[0] = (f[1] - f[0]) * (1.0 / (x[1] - x[0]));
    df[n - 1] = (f[n - 1] - f[n - 2]) * (1.0 / (x[n - 1] - x[n - 2]));

    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        let scale = 1.0 / (hs * hd * (hs + hd));
        df[i] = (f[i + 1] * (hs * hs) + f[i] * (hd * hd - hs * hs) - f[i - 1] * (hd * hd)) * scale;
    }

    Ok(df)
}
