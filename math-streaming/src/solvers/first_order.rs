use super::{AmplitudeSolver, validate_radial};
use crate::error::Result;
use crate::params::StreamingParams;
use ndarray::{Array1, Zip};
use num_complex::Complex64;

/// O(ε) solution: the cylinder oscillating as e^{-it} in fluid at rest
///
/// ```text
/// ψ₀(r) = -(C/r - 2 Y(r)/γ)
/// ```
///
/// A potential dipole plus the decaying Stokes-layer correction; ψ₀(1) = 1
/// and ψ₀'(1) = 1 (no slip in the cylinder frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstOrder;

impl AmplitudeSolver<1> for FirstOrder {
    fn name(&self) -> &'static str {
        "first order"
    }

    fn streamfunction(&self, params: &StreamingParams, r: &Array1<f64>) -> Result<Array1<Complex64>> {
        validate_radial(r)?;

        let c = params.c();
        let two_over_gamma = 2.0 / params.gamma();
        let y = params.y().eval_array(r);

        Ok(Zip::from(r)
            .and(&y)
            .map_collect(|&ri, &yi| -(c / ri - yi * two_over_gamma)))
    }
}
