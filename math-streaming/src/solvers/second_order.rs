use super::{AmplitudeSolver, inverse_square, surface_correction, validate_radial};
use crate::error::{Result, StreamingError};
use crate::params::{BesselRatio, StreamingParams};
use crate::quadrature::{
    damped_head_from_one, damped_tail_to_infinity, head_from_one, tail_to_infinity,
};
use crate::special::HankelKind;
use ndarray::{Array1, Zip};
use num_complex::Complex64;
use std::f64::consts::PI;

/// O(ε²) oscillatory flow at twice the forcing frequency
///
/// Solves D²₂(D²₂ + λ²)ψ = g₀ with λ = √2γ and
///
/// ```text
/// g₀(r) = ½ γ² Re (C X(r)/r² - Z(r))
/// ```
///
/// by splitting 1/(D²(D² + λ²)) = (1/D² - 1/(D² + λ²))/λ². The first part
/// uses the r^±2 Green's function, the second the Hankel pair
/// H21 = H₂⁽¹⁾(λr)/H₀⁽¹⁾(λ), H22 = H₂⁽²⁾(λr)/H₀⁽²⁾(λ) through the kernel
///
/// ```text
/// Kλ(r) = H11(1) H22(r) - H12(1) H21(r)
/// ```
///
/// which satisfies (r² Kλ)'(1) = 0. The homogeneous terms α/r² + β H21(r)
/// restore ψ̃(1) = ψ̃'(1) = 0 and decay at infinity. H22 is only ever
/// evaluated with its e^{Im λ (r-1)} growth divided out, so large Re
/// stays finite.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondOrder;

/// Hankel-ratio helpers of the second harmonic
#[derive(Debug, Clone, Copy)]
struct SecondHarmonicBasis {
    lambda: Complex64,
    h11: BesselRatio,
    h12: BesselRatio,
    h21: BesselRatio,
    h22: BesselRatio,
}

impl SecondHarmonicBasis {
    fn new(lambda: Complex64) -> Self {
        Self {
            lambda,
            h11: BesselRatio::new(HankelKind::First, 1, lambda, 0),
            h12: BesselRatio::new(HankelKind::Second, 1, lambda, 0),
            h21: BesselRatio::new(HankelKind::First, 2, lambda, 0),
            h22: BesselRatio::new(HankelKind::Second, 2, lambda, 0),
        }
    }

    /// Kλ(r)·e^{iλ(r-1)} at every radius
    ///
    /// H22 grows like e^{Im λ (r-1)}, so Kλ itself overflows for large
    /// Re·r; the scaled kernel stays bounded.
    fn kernel_scaled(&self, r: &Array1<f64>) -> Array1<Complex64> {
        let a1 = self.h11.eval(1.0);
        let a2 = self.h12.eval(1.0);
        let two_i_lambda = Complex64::new(0.0, 2.0) * self.lambda;
        r.mapv(|ri| {
            a1 * self.h22.eval_scaled(ri)
                - a2 * self.h21.eval_scaled(ri) * (two_i_lambda * (ri - 1.0)).exp()
        })
    }

    /// Inverse Wronskian factor c = iπ H₀⁽¹⁾(λ) H₀⁽²⁾(λ) / 4
    fn wronskian_factor(&self) -> Complex64 {
        Complex64::new(0.0, PI / 4.0) * self.h21.norm() * self.h22.norm()
    }
}

impl SecondOrder {
    /// Forcing g₀ at every radius of `r`
    pub fn forcing(params: &StreamingParams, r: &Array1<f64>) -> Array1<Complex64> {
        let scale = params.gamma2() * (0.5 * params.reynolds());
        let c = params.c();
        let x = params.x().eval_array(r);
        let z = params.z().eval_array(r);

        Zip::from(r)
            .and(&x)
            .and(&z)
            .map_collect(|&ri, &xi, &zi| scale * (c * xi / (ri * ri) - zi))
    }

    /// ψ̃: particular solution plus the homogeneous terms fixing r = 1
    ///
    /// The Hankel products Kλ(r)·∫_r^∞ H21 g s ds and H21(r)·∫_1^r Kλ g s ds
    /// are formed with the scaled kernels and the damped transforms, so
    /// their exponentials cancel inside each integral.
    fn reduced_streamfunction(params: &StreamingParams, r: &Array1<f64>) -> Result<Array1<Complex64>> {
        let lambda = params.lambda();
        let lambda2 = params.lambda2();
        let basis = SecondHarmonicBasis::new(lambda);
        let g0 = |s: &Array1<f64>| Self::forcing(params, s);

        let ikgr = damped_head_from_one(r, lambda, |s: &Array1<f64>| {
            let k = basis.kernel_scaled(s);
            let g = g0(s);
            Zip::from(s).and(&k).and(&g).map_collect(|&si, &ki, &gi| ki * gi * si)
        })?;
        let ih21gr = damped_tail_to_infinity(r, lambda, |s: &Array1<f64>| {
            let h21 = basis.h21.eval_scaled_array(s);
            let g = g0(s);
            Zip::from(s).and(&h21).and(&g).map_collect(|&si, &hi, &gi| hi * gi * si)
        })?;
        let igr_m1 = tail_to_infinity(r, |s: &Array1<f64>| {
            Zip::from(s).and(&g0(s)).map_collect(|&si, &gi| gi / si)
        })?;
        let igr_3 = head_from_one(r, |s: &Array1<f64>| {
            Zip::from(s).and(&g0(s)).map_collect(|&si, &gi| gi * si.powi(3))
        })?;

        let a1 = basis.h11.eval(1.0);
        let c = basis.wronskian_factor();
        let coef = c / (a1 * lambda2);
        let kernel = basis.kernel_scaled(r);
        let h21_scaled = basis.h21.eval_scaled_array(r);
        let h21 = basis.h21.eval_array(r);

        let psi_p_surface = (-igr_m1[0] / 4.0 + c / a1 * kernel[0] * ih21gr[0]) / lambda2;
        let beta = igr_m1[0] / (lambda2 * lambda * a1);
        let alpha = -psi_p_surface - beta * h21[0];

        if !(alpha.is_finite() && beta.is_finite()) {
            return Err(StreamingError::NonFinite {
                stage: "second order boundary constants",
            });
        }
        log::debug!(
            "second order (oscillatory): alpha={:.6e}, beta={:.6e}",
            alpha,
            beta
        );

        let inv_r2 = inverse_square(r);
        let mut psi = Array1::zeros(r.len());
        for i in 0..r.len() {
            let r2 = r[i] * r[i];
            let term1 = -igr_m1[i] * (r2 / 4.0) / lambda2;
            let term2 = -igr_3[i] * (inv_r2[i] / 4.0) / lambda2;
            let term3 = coef * kernel[i] * ih21gr[i];
            let term4 = coef * h21_scaled[i] * ikgr[i];
            psi[i] = term1 + term2 + term3 + term4 + alpha * inv_r2[i] + beta * h21[i];
        }
        Ok(psi)
    }
}

impl AmplitudeSolver<2> for SecondOrder {
    fn name(&self) -> &'static str {
        "second order (oscillatory)"
    }

    fn streamfunction(&self, params: &StreamingParams, r: &Array1<f64>) -> Result<Array1<Complex64>> {
        validate_radial(r)?;
        let reduced = Self::reduced_streamfunction(params, r)?;
        Ok(reduced + surface_correction(params, r))
    }
}
