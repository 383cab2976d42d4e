//! Piecewise-linear interpolation on strictly increasing abscissas
//!
//! Queries outside the sampled range are errors. A query within a relative
//! 1e-12 of either end is snapped onto it, so radii rebuilt from Cartesian
//! coordinates still land on the cylinder surface.

use super::{Scalar, validate_increasing};
use crate::error::{Result, StreamingError};
use ndarray::{Array1, ArrayView1};

const SNAP_TOLERANCE: f64 = 1e-12;

/// Location of a query between two samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Index of the left sample
    pub index: usize,
    /// Weight of the right sample, in [0, 1]
    pub weight: f64,
}

impl Bracket {
    /// Blend the two bracketing entries of `y`
    #[inline]
    pub fn apply<T: Scalar>(&self, y: ArrayView1<'_, T>) -> T {
        if self.weight == 0.0 {
            return y[self.index];
        }
        y[self.index] * (1.0 - self.weight) + y[self.index + 1] * self.weight
    }
}

/// Linear interpolator over borrowed abscissas
///
/// One interpolator locates a query once; the resulting [`Bracket`] is then
/// applied to any number of value arrays sampled on the same abscissas.
#[derive(Debug, Clone, Copy)]
pub struct LinearInterpolator<'a> {
    x: ArrayView1<'a, f64>,
}

impl<'a> LinearInterpolator<'a> {
    /// Wrap sorted abscissas (at least two, strictly increasing)
    pub fn new(x: ArrayView1<'a, f64>) -> Result<Self> {
        validate_increasing(x, 2)?;
        Ok(Self { x })
    }

    /// Smallest sampled abscissa
    pub fn min(&self) -> f64 {
        self.x[0]
    }

    /// Largest sampled abscissa
    pub fn max(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// Find the sample interval containing `xq`
    pub fn locate(&self, xq: f64) -> Result<Bracket> {
        let (min, max) = (self.min(), self.max());
        let tol = SNAP_TOLERANCE * min.abs().max(max.abs()).max(1.0);

        if xq.is_nan() || xq < min - tol || xq > max + tol {
            return Err(StreamingError::OutOfRange { x: xq, min, max });
        }
        let xq = xq.clamp(min, max);

        let n = self.x.len();
        let idx = match self.x.as_slice() {
            Some(xs) => xs.partition_point(|v| *v <= xq),
            None => self.x.iter().take_while(|v| **v <= xq).count(),
        };
        let index = idx.saturating_sub(1).min(n - 2);
        let (x0, x1) = (self.x[index], self.x[index + 1]);

        Ok(Bracket {
            index,
            weight: ((xq - x0) / (x1 - x0)).clamp(0.0, 1.0),
        })
    }

    /// Interpolate `y` at a single point
    pub fn value<T: Scalar>(&self, y: ArrayView1<'_, T>, xq: f64) -> Result<T> {
        if y.len() != self.x.len() {
            return Err(StreamingError::LengthMismatch {
                left: y.len(),
                right: self.x.len(),
            });
        }
        Ok(self.locate(xq)?.apply(y))
    }
}

/// Interpolate `y(x)` at every query point
///
/// # Example
/// ```
/// use math_streaming::numeric::interp;
/// use ndarray::array;
///
/// let x = array![1.0, 2.0, 4.0];
/// let y = array![0.0, 1.0, 5.0];
/// let v = interp(array![1.5, 3.0].view(), x.view(), y.view()).unwrap();
/// assert!((v[0] - 0.5).abs() < 1e-12 && (v[1] - 3.0).abs() < 1e-12);
/// ```
pub fn interp<T: Scalar>(
    xq: ArrayView1<'_, f64>,
    x: ArrayView1<'_, f64>,
    y: ArrayView1<'_, T>,
) -> Result<Array1<T>> {
    let interpolator = LinearInterpolator::new(x)?;
    let values = xq
        .iter()
        .map(|&q| interpolator.value(y, q))
        .collect::<Result<Vec<T>>>()?;
    Ok(Array1::from(values))
}
