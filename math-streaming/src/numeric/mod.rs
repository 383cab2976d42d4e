//! Numeric helpers shared by the radial operators and the evaluator
//!
//! - [`gradient`]: derivative of sampled data on a non-uniform mesh
//! - [`LinearInterpolator`]: piecewise-linear lookup on sorted abscissas

mod gradient;
mod interpolation;

pub use gradient::*;
pub use interpolation::*;

use crate::error::{Result, StreamingError};
use ndarray::ArrayView1;
use num_traits::Zero;
use std::ops::{Mul, Sub};

/// Field values carried through quadrature, differentiation and
/// interpolation: `f64` and `Complex64`
pub trait Scalar:
    Copy + Zero + Sub<Output = Self> + Mul<f64, Output = Self> + Send + Sync
{
}

impl<T> Scalar for T where
    T: Copy + Zero + Sub<Output = T> + Mul<f64, Output = T> + Send + Sync
{
}

/// Check that `x` has at least `min_len` finite, strictly increasing entries
pub fn validate_increasing(x: ArrayView1<'_, f64>, min_len: usize) -> Result<()> {
    if x.len() < min_len {
        return Err(StreamingError::EmptySamples {
            got: x.len(),
            need: min_len,
        });
    }
    for i in 1..x.len() {
        if x[i].is_nan() || x[i] <= x[i - 1] {
            return Err(StreamingError::NonMonotonic { index: i });
        }
    }
    Ok(())
}
