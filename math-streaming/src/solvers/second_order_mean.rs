use super::{AmplitudeSolver, inverse_square, surface_correction, validate_radial};
use crate::error::Result;
use crate::params::StreamingParams;
use crate::quadrature::{head_from_one, tail_to_infinity};
use ndarray::{Array1, Zip};
use num_complex::Complex64;

/// O(ε²) steady streaming
///
/// The time-averaged Reynolds stress of the first-order flow drives
/// D²₂D²₂ψ = f₀ with
///
/// ```text
/// f₀(r) = Re² [ ½ Im(C X̄)/r² - Im(Z X̄) + ½ Im(Z) ]
/// ```
///
/// The biharmonic Green's function gives the particular solution
///
/// ```text
/// ψ_p = -r⁴/48 I⁻¹ + r²/16 I¹ + 1/16 I³ - 1/(48 r²) I⁵
/// I⁻¹ = ∫_r^∞ f₀/s,  I¹ = ∫_r^∞ f₀ s,  I³ = ∫_1^r f₀ s³,  I⁵ = ∫_1^r f₀ s⁵
/// ```
///
/// and α + β/r² restores ψ̃(1) = ψ̃'(1) = 0 while keeping ψ̃ bounded by r²
/// at infinity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondOrderMean;

impl SecondOrderMean {
    /// Forcing f₀ at every radius of `r`
    pub fn forcing(params: &StreamingParams, r: &Array1<f64>) -> Array1<f64> {
        let re2 = params.reynolds() * params.reynolds();
        let c = params.c();
        let x = params.x().eval_array(r);
        let z = params.z().eval_array(r);

        Zip::from(r).and(&x).and(&z).map_collect(|&ri, &xi, &zi| {
            let xc = xi.conj();
            re2 * (0.5 * (c * xc).im / (ri * ri) - (zi * xc).im + 0.5 * zi.im)
        })
    }

    /// ψ̃: particular solution plus the homogeneous terms fixing r = 1
    fn reduced_streamfunction(params: &StreamingParams, r: &Array1<f64>) -> Result<Array1<f64>> {
        let f0 = |s: &Array1<f64>| Self::forcing(params, s);

        let i_m1 = tail_to_infinity(r, |s: &Array1<f64>| f0(s) / s)?;
        let i_1 = tail_to_infinity(r, |s: &Array1<f64>| f0(s) * s)?;
        let i_3 = head_from_one(r, |s: &Array1<f64>| f0(s) * &s.mapv(|v| v.powi(3)))?;
        let i_5 = head_from_one(r, |s: &Array1<f64>| f0(s) * &s.mapv(|v| v.powi(5)))?;

        let (a, b) = (i_m1[0], i_1[0]);
        let beta = -a / 24.0 + b / 16.0;
        let alpha = a / 48.0 - b / 16.0 - beta;

        log::debug!(
            "second order (mean): I-1(1)={:.6e}, I1(1)={:.6e}, alpha={:.6e}, beta={:.6e}",
            a,
            b,
            alpha,
            beta
        );

        let mut psi = Array1::zeros(r.len());
        for (i, &ri) in r.iter().enumerate() {
            let r2 = ri * ri;
            let particular = -r2 * r2 / 48.0 * i_m1[i] + r2 / 16.0 * i_1[i] + i_3[i] / 16.0
                - i_5[i] / (48.0 * r2);
            psi[i] = particular + alpha + beta / r2;
        }
        Ok(psi)
    }
}

impl AmplitudeSolver<2> for SecondOrderMean {
    fn name(&self) -> &'static str {
        "second order (mean)"
    }

    fn streamfunction(&self, params: &StreamingParams, r: &Array1<f64>) -> Result<Array1<Complex64>> {
        validate_radial(r)?;

        let reduced = Self::reduced_streamfunction(params, r)?;
        let correction = surface_correction(params, r);
        let c_over_r2 = inverse_square(r).mapv(|v| params.c() * v);
        let x = params.x().eval_array(r);
        let z = params.z().eval_array(r);

        let mut psi = Array1::zeros(r.len());
        Zip::from(&mut psi)
            .and(&reduced)
            .and(&correction)
            .and(&c_over_r2)
            .and(&x)
            .and(&z)
            .for_each(|p, &red, &corr, &cr, &xi, &zi| {
                let stress = -0.5 * ((-xi.conj()) * (cr - zi)).im;
                *p = Complex64::new(red + stress, 0.0) + corr;
            });
        Ok(psi)
    }
}
