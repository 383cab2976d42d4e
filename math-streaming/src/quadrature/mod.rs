//! Quadrature core
//!
//! - a fixed 100-point Gauss–Legendre rule on [-1, 1], built once per process
//! - cumulative trapezoidal integration over ordered samples
//! - the semi-infinite transform ∫_r^∞ used by every forcing term of the
//!   second-order solvers, and its finite counterpart ∫_1^r

mod gauss;
mod transform;

pub use gauss::*;
pub use transform::*;
