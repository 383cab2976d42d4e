//! Order-by-order solvers of the matched asymptotic expansion
//!
//! | Solver | K | Content |
//! |---|---|---|
//! | [`FirstOrder`] | 1 | O(ε) oscillatory Stokes-layer flow, closed form |
//! | [`SecondOrderMean`] | 2 | O(ε²) steady streaming, integral transform |
//! | [`SecondOrder`] | 2 | O(ε²) second-harmonic flow, Hankel Green's functions |
//!
//! Each solver implements [`AmplitudeSolver`] for its harmonic order;
//! [`Order`] dispatches on a runtime tag.

mod first_order;
mod second_order;
mod second_order_mean;
mod solution;

pub use first_order::FirstOrder;
pub use second_order::SecondOrder;
pub use second_order_mean::SecondOrderMean;
pub use solution::StreamingSolution;

use crate::amplitude::ComplexAmplitude;
use crate::error::{Result, StreamingError};
use crate::numeric::validate_increasing;
use crate::params::StreamingParams;
use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest allowed distance of the first radial sample from r = 1
const SURFACE_TOLERANCE: f64 = 1e-12;

/// A solver producing the harmonic-K amplitude of one expansion order
pub trait AmplitudeSolver<const K: usize> {
    /// Short name used in logs and error stages
    fn name(&self) -> &'static str;

    /// Complex streamfunction profile ψ₀ on the radial samples `r`
    ///
    /// `r` must start at the surface r = 1 and increase strictly.
    fn streamfunction(&self, params: &StreamingParams, r: &Array1<f64>) -> Result<Array1<Complex64>>;

    /// Solve and wrap as a [`ComplexAmplitude`]
    fn solve(&self, params: &StreamingParams, r: &Array1<f64>) -> Result<ComplexAmplitude<K>> {
        let psi = self.streamfunction(params, r)?;
        ensure_finite(&psi, self.name())?;
        log::debug!(
            "{}: {} samples on [{}, {}]",
            self.name(),
            r.len(),
            r[0],
            r[r.len() - 1]
        );
        ComplexAmplitude::new(r.clone(), psi)
    }
}

/// Expansion order tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// O(ε), K = 1
    First,
    /// O(ε²) steady part, K = 2
    SecondMean,
    /// O(ε²) oscillatory part, K = 2
    Second,
}

impl Order {
    /// All orders in expansion order
    pub const ALL: [Order; 3] = [Order::First, Order::SecondMean, Order::Second];

    /// Azimuthal and temporal harmonic K
    pub fn harmonic(self) -> usize {
        match self {
            Order::First => 1,
            Order::SecondMean | Order::Second => 2,
        }
    }

    /// Power of ε multiplying this order in the composite field
    pub fn power(self) -> i32 {
        match self {
            Order::First => 1,
            Order::SecondMean | Order::Second => 2,
        }
    }

    /// `true` for the time-independent part
    pub fn is_steady(self) -> bool {
        matches!(self, Order::SecondMean)
    }

    /// Streamfunction profile from the solver of this order
    pub fn streamfunction(self, params: &StreamingParams, r: &Array1<f64>) -> Result<Array1<Complex64>> {
        match self {
            Order::First => FirstOrder.streamfunction(params, r),
            Order::SecondMean => SecondOrderMean.streamfunction(params, r),
            Order::Second => SecondOrder.streamfunction(params, r),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::First => "first order",
            Order::SecondMean => "second order (mean)",
            Order::Second => "second order (oscillatory)",
        };
        write!(f, "{}", name)
    }
}

/// Check that radial samples start on the surface, stay outside the
/// cylinder and increase strictly
pub fn validate_radial(r: &Array1<f64>) -> Result<()> {
    for (index, &ri) in r.iter().enumerate() {
        if ri == 0.0 {
            return Err(StreamingError::ZeroRadius { index });
        }
        if !ri.is_finite() || ri < 1.0 - SURFACE_TOLERANCE {
            return Err(StreamingError::RadiusBelowSurface { index, r: ri });
        }
    }
    validate_increasing(r.view(), 2)?;
    if (r[0] - 1.0).abs() > SURFACE_TOLERANCE {
        return Err(StreamingError::SurfaceMismatch { first: r[0] });
    }
    Ok(())
}

pub(crate) fn ensure_finite(values: &Array1<Complex64>, stage: &'static str) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(StreamingError::NonFinite { stage })
    }
}

/// 1/r² at every sample
pub(crate) fn inverse_square(r: &Array1<f64>) -> Array1<f64> {
    r.mapv(|v| 1.0 / (v * v))
}

/// -½i (-C/r² + Z(r)), shared by both second-order solvers; vanishes at r = 1
pub(crate) fn surface_correction(params: &StreamingParams, r: &Array1<f64>) -> Array1<Complex64> {
    let c = params.c();
    let half_i = Complex64::new(0.0, 0.5);
    r.mapv(|ri| -half_i * (-c / (ri * ri) + params.z().eval(ri)))
}
