//! Physical parameters and the Hankel-ratio basis
//!
//! The first-order Stokes layer around the cylinder is built from the
//! outgoing waves H_n^(1)(γr) with
//!
//! ```text
//! γ² = i·Re,   γ = √(i·Re)  (principal root),   λ = √2·γ
//! X(r) = H_0(γr)/H_0(γ),  Y(r) = H_1(γr)/H_0(γ),  Z(r) = H_2(γr)/H_0(γ)
//! C    = H_2(γ)/H_0(γ)
//! ```
//!
//! Every quantity is fixed at construction; a [`StreamingParams`] is never
//! mutated afterwards.

use crate::error::{Result, StreamingError};
use crate::special::{HankelKind, hankel, hankel_scaled};
use ndarray::Array1;
use num_complex::Complex64;

/// Bound ratio r ↦ H_n^(kind)(k·r) / H_m^(kind)(k)
///
/// A small evaluator object standing in for a closure over (k, H_m(k)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BesselRatio {
    kind: HankelKind,
    order: u32,
    wavenumber: Complex64,
    norm: Complex64,
    scaled_norm: Complex64,
}

impl BesselRatio {
    /// Ratio of order `order` normalised by order `norm_order` at r = 1
    pub fn new(kind: HankelKind, order: u32, wavenumber: Complex64, norm_order: u32) -> Self {
        Self {
            kind,
            order,
            wavenumber,
            norm: hankel(kind, norm_order, wavenumber),
            scaled_norm: hankel_scaled(kind, norm_order, wavenumber),
        }
    }

    /// Hankel order n of the numerator
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Kind shared by numerator and denominator
    pub fn kind(&self) -> HankelKind {
        self.kind
    }

    /// Normalising value H_m(k)
    pub fn norm(&self) -> Complex64 {
        self.norm
    }

    /// Value at radius `r`
    #[inline]
    pub fn eval(&self, r: f64) -> Complex64 {
        hankel(self.kind, self.order, self.wavenumber * r) / self.norm
    }

    /// Values at every radius of `r`
    pub fn eval_array(&self, r: &Array1<f64>) -> Array1<Complex64> {
        r.mapv(|ri| self.eval(ri))
    }

    /// Value at `r` with the exponential factor of the kind removed:
    /// `eval(r)·e^{-ik(r-1)}` for the first kind, `eval(r)·e^{ik(r-1)}`
    /// for the second
    ///
    /// Finite for any r where the growing second kind would overflow.
    #[inline]
    pub fn eval_scaled(&self, r: f64) -> Complex64 {
        hankel_scaled(self.kind, self.order, self.wavenumber * r) / self.scaled_norm
    }

    /// Scaled values at every radius of `r`
    pub fn eval_scaled_array(&self, r: &Array1<f64>) -> Array1<Complex64> {
        r.mapv(|ri| self.eval_scaled(ri))
    }
}

/// Parameter bundle for one physical configuration (ε, Re)
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingParams {
    epsilon: f64,
    reynolds: f64,
    gamma2: Complex64,
    gamma: Complex64,
    lambda: Complex64,
    lambda2: Complex64,
    h0: Complex64,
    c: Complex64,
    x: BesselRatio,
    y: BesselRatio,
    z: BesselRatio,
}

impl StreamingParams {
    /// Build the bundle for amplitude `epsilon` and scaled Reynolds number
    /// `reynolds`
    ///
    /// # Errors
    /// `InvalidAmplitude` for a non-finite ε, `DegenerateReynolds` unless
    /// Re is finite and strictly positive.
    ///
    /// # Example
    /// ```
    /// use math_streaming::params::StreamingParams;
    ///
    /// let params = StreamingParams::new(0.1, 10.0).unwrap();
    /// assert!((params.gamma2().im - 10.0).abs() < 1e-12);
    /// assert!(StreamingParams::new(0.1, 0.0).is_err());
    /// ```
    pub fn new(epsilon: f64, reynolds: f64) -> Result<Self> {
        if !epsilon.is_finite() {
            return Err(StreamingError::InvalidAmplitude { epsilon });
        }
        if !reynolds.is_finite() || reynolds <= 0.0 {
            return Err(StreamingError::DegenerateReynolds { reynolds });
        }

        let gamma2 = Complex64::new(0.0, reynolds);
        let gamma = gamma2.sqrt();
        let lambda = gamma * std::f64::consts::SQRT_2;
        let lambda2 = lambda * lambda;

        let x = BesselRatio::new(HankelKind::First, 0, gamma, 0);
        let y = BesselRatio::new(HankelKind::First, 1, gamma, 0);
        let z = BesselRatio::new(HankelKind::First, 2, gamma, 0);
        let h0 = x.norm();
        let c = z.eval(1.0);

        if !(h0.is_finite() && c.is_finite()) || h0 == Complex64::new(0.0, 0.0) {
            return Err(StreamingError::NonFinite {
                stage: "parameter bundle",
            });
        }

        log::debug!(
            "Streaming parameters: eps={}, Re={}, gamma={:.6}, C={:.6}",
            epsilon,
            reynolds,
            gamma,
            c
        );

        Ok(Self {
            epsilon,
            reynolds,
            gamma2,
            gamma,
            lambda,
            lambda2,
            h0,
            c,
            x,
            y,
            z,
        })
    }

    /// Oscillation amplitude ε
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Scaled Reynolds number Re
    pub fn reynolds(&self) -> f64 {
        self.reynolds
    }

    /// γ² = i·Re
    pub fn gamma2(&self) -> Complex64 {
        self.gamma2
    }

    /// γ, principal square root of γ²
    pub fn gamma(&self) -> Complex64 {
        self.gamma
    }

    /// λ = √2·γ, wavenumber of the second harmonic
    pub fn lambda(&self) -> Complex64 {
        self.lambda
    }

    /// λ² = 2γ²
    pub fn lambda2(&self) -> Complex64 {
        self.lambda2
    }

    /// H_0^(1)(γ)
    pub fn h0(&self) -> Complex64 {
        self.h0
    }

    /// C = H_2^(1)(γ)/H_0^(1)(γ)
    pub fn c(&self) -> Complex64 {
        self.c
    }

    /// X(r) = H_0^(1)(γr)/H_0^(1)(γ)
    pub fn x(&self) -> &BesselRatio {
        &self.x
    }

    /// Y(r) = H_1^(1)(γr)/H_0^(1)(γ)
    pub fn y(&self) -> &BesselRatio {
        &self.y
    }

    /// Z(r) = H_2^(1)(γr)/H_0^(1)(γ)
    pub fn z(&self) -> &BesselRatio {
        &self.z
    }

    /// Stokes-layer thickness 1/Im(γ) = √(2/Re), in cylinder radii
    pub fn stokes_layer_thickness(&self) -> f64 {
        1.0 / self.gamma.im
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_derived_constants() {
        let params = StreamingParams::new(0.2, 8.0).unwrap();
        assert_abs_diff_eq!(params.gamma().re, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(params.gamma().im, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(params.lambda2().re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(params.lambda2().im, 16.0, epsilon = 1e-12);
        assert_abs_diff_eq!(params.stokes_layer_thickness(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_ratios_at_surface() {
        let params = StreamingParams::new(0.1, 5.0).unwrap();
        let x1 = params.x().eval(1.0);
        assert_abs_diff_eq!(x1.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x1.im, 0.0, epsilon = 1e-12);

        let z1 = params.z().eval(1.0);
        assert_abs_diff_eq!(z1.re, params.c().re, epsilon = 1e-14);
        assert_abs_diff_eq!(z1.im, params.c().im, epsilon = 1e-14);
    }

    #[test]
    fn test_recurrence_links_c_and_y() {
        // H_2(γ) = (2/γ) H_1(γ) - H_0(γ)  =>  C = 2 Y(1)/γ - 1
        let params = StreamingParams::new(0.1, 12.0).unwrap();
        let expected = params.y().eval(1.0) * 2.0 / params.gamma() - 1.0;
        assert_abs_diff_eq!(params.c().re, expected.re, epsilon = 1e-9);
        assert_abs_diff_eq!(params.c().im, expected.im, epsilon = 1e-9);
    }

    #[test]
    fn test_ratios_decay() {
        let params = StreamingParams::new(0.1, 10.0).unwrap();
        assert!(params.x().eval(10.0).norm() < 1e-6);
        assert!(params.z().eval(10.0).norm() < 1e-6);
    }

    #[test]
    fn test_scaled_ratio_removes_exponential() {
        let lambda = StreamingParams::new(0.1, 6.0).unwrap().lambda();
        let i = Complex64::i();
        for r in [1.0, 1.7, 4.0] {
            let first = BesselRatio::new(HankelKind::First, 2, lambda, 0);
            let second = BesselRatio::new(HankelKind::Second, 2, lambda, 0);
            let back1 = first.eval_scaled(r) * (i * lambda * (r - 1.0)).exp();
            let back2 = second.eval_scaled(r) * (-i * lambda * (r - 1.0)).exp();
            assert!((back1 - first.eval(r)).norm() < 1e-9 * first.eval(r).norm());
            assert!((back2 - second.eval(r)).norm() < 1e-9 * second.eval(r).norm());
        }
    }

    #[test]
    fn test_rejects_degenerate() {
        assert!(matches!(
            StreamingParams::new(0.1, 0.0),
            Err(StreamingError::DegenerateReynolds { .. })
        ));
        assert!(matches!(
            StreamingParams::new(0.1, -3.0),
            Err(StreamingError::DegenerateReynolds { .. })
        ));
        assert!(matches!(
            StreamingParams::new(f64::NAN, 1.0),
            Err(StreamingError::InvalidAmplitude { .. })
        ));
    }
}
