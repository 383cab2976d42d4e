//! Cylindrical Bessel and Hankel functions of complex argument
//!
//! The streaming solutions are built from outgoing waves H_n^(1)(γr) with
//! γ = √(i·Re), so every argument lies on the ray arg z = π/4 where the
//! first-kind functions decay and the second-kind ones grow. Each regime
//! uses the evaluation that is stable there:
//!
//! | Region | H^(1) | H^(2) |
//! |---|---|---|
//! | \|z\| ≥ 17 | Hankel asymptotic expansion | Hankel asymptotic expansion |
//! | Im z ≥ 0.5, away from the real axis | integral of K_n | 2·J_n − H^(1) |
//! | otherwise | J_n + i·Y_n (power series) | J_n − i·Y_n (power series) |
//!
//! The lower half plane is reduced to the upper one through
//! H^(1)_n(z̄) = conj(H^(2)_n(z)).
//!
//! ## Definitions
//!
//! ```text
//! H_n^(1)(z) = J_n(z) + i Y_n(z)
//! H_n^(2)(z) = J_n(z) - i Y_n(z)
//! H_n^(1)(z) = (2 / iπ) e^{-inπ/2} K_n(-iz)
//! K_n(w)     = ∫₀^∞ exp(-w cosh t) cosh(nt) dt,   Re w > 0
//! ```

use num_complex::Complex64;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Euler–Mascheroni constant
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Modulus above which the asymptotic expansion is used (error ~ e^{-2|z|})
const ASYMPTOTIC_RADIUS: f64 = 17.0;

/// Smallest Im z for which the K_n integral is used
const INTEGRAL_MIN_IMAG: f64 = 0.5;

/// Smallest analyticity half-width (radians) of the K_n integrand
const INTEGRAL_MIN_STRIP: f64 = 0.2;

/// Maximum number of power-series terms
const MAX_SERIES_TERMS: usize = 400;

/// Kind of Hankel function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HankelKind {
    /// H^(1) = J + iY, outgoing for e^{-iωt}
    First,
    /// H^(2) = J - iY
    Second,
}

/// Hankel function H_n^(kind)(z) of integer order
///
/// # Arguments
/// * `kind` - First or second kind
/// * `order` - Non-negative integer order n
/// * `z` - Complex argument, non-zero and off the negative real axis
///
/// # Example
/// ```
/// use math_streaming::special::{hankel, HankelKind};
/// use num_complex::Complex64;
///
/// let h = hankel(HankelKind::First, 0, Complex64::new(1.0, 0.0));
/// assert!((h.re - 0.7651976865579666).abs() < 1e-12);
/// assert!((h.im - 0.0882569642156769).abs() < 1e-12);
/// ```
pub fn hankel(kind: HankelKind, order: u32, z: Complex64) -> Complex64 {
    match kind {
        HankelKind::First => hankel1(order, z),
        HankelKind::Second => hankel2(order, z),
    }
}

/// Hankel function of the first kind H_n^(1)(z)
pub fn hankel1(order: u32, z: Complex64) -> Complex64 {
    debug_assert!(z.norm() > 0.0, "Hankel functions are singular at z = 0");

    if z.im < 0.0 {
        return hankel2(order, z.conj()).conj();
    }

    if z.norm() >= ASYMPTOTIC_RADIUS {
        return hankel_asymptotic(HankelKind::First, order, z);
    }

    if z.im >= INTEGRAL_MIN_IMAG && strip_half_width(z) >= INTEGRAL_MIN_STRIP {
        return hankel1_integral(order, z);
    }

    bessel_j(order, z) + Complex64::i() * bessel_y(order, z)
}

/// Hankel function of the second kind H_n^(2)(z)
pub fn hankel2(order: u32, z: Complex64) -> Complex64 {
    debug_assert!(z.norm() > 0.0, "Hankel functions are singular at z = 0");

    if z.im < 0.0 {
        return hankel1(order, z.conj()).conj();
    }

    if z.norm() >= ASYMPTOTIC_RADIUS {
        return hankel_asymptotic(HankelKind::Second, order, z);
    }

    if z.im >= INTEGRAL_MIN_IMAG && strip_half_width(z) >= INTEGRAL_MIN_STRIP {
        // J grows like e^{Im z} here, so the subtraction is benign
        return bessel_j(order, z) * 2.0 - hankel1_integral(order, z);
    }

    bessel_j(order, z) - Complex64::i() * bessel_y(order, z)
}

/// Exponentially scaled Hankel function
///
/// ```text
/// H_n^(1)(z) e^{-iz},   H_n^(2)(z) e^{iz}
/// ```
///
/// These stay O(|z|^{-1/2}) for large |z| off the real axis, where the
/// unscaled second kind overflows (|Im z| beyond ~700).
pub fn hankel_scaled(kind: HankelKind, order: u32, z: Complex64) -> Complex64 {
    debug_assert!(z.norm() > 0.0, "Hankel functions are singular at z = 0");

    if z.norm() >= ASYMPTOTIC_RADIUS {
        return hankel_asymptotic_scaled(kind, order, z);
    }

    let unscale = match kind {
        HankelKind::First => (-Complex64::i() * z).exp(),
        HankelKind::Second => (Complex64::i() * z).exp(),
    };
    hankel(kind, order, z) * unscale
}

/// Bessel function of the first kind J_n(z) by its power series
///
/// ```text
/// J_n(z) = Σ_k (-1)^k (z/2)^{2k+n} / (k! (n+k)!)
/// ```
///
/// Accurate while |z| stays moderate; the terms grow like e^{|z|} before
/// they converge.
pub fn bessel_j(order: u32, z: Complex64) -> Complex64 {
    let n = order as usize;
    let half = z * 0.5;
    let q = -(half * half);

    let mut term = half.powu(order) / factorial(n);
    let mut sum = term;

    for k in 1..MAX_SERIES_TERMS {
        term = term * q / ((k * (k + n)) as f64);
        sum += term;
        if term.norm() <= 1e-18 * sum.norm() {
            break;
        }
    }

    sum
}

/// Bessel function of the second kind Y_n(z) by its power series
///
/// ```text
/// Y_n(z) = -(1/π) Σ_{k<n} (n-k-1)!/k! (z/2)^{2k-n}
///          + (2/π) ln(z/2) J_n(z)
///          - (1/π) Σ_k (ψ(k+1) + ψ(n+k+1)) (-z²/4)^k (z/2)^n / (k! (n+k)!)
/// ```
pub fn bessel_y(order: u32, z: Complex64) -> Complex64 {
    let n = order as usize;
    let half = z * 0.5;
    let q = -(half * half);

    let mut singular = Complex64::new(0.0, 0.0);
    for k in 0..n {
        let power = 2 * k as i32 - n as i32;
        singular += half.powi(power) * (factorial(n - k - 1) / factorial(k));
    }

    // digamma at integers: ψ(1) = -γ, ψ(m+1) = ψ(m) + 1/m
    let mut psi_k = -EULER_GAMMA;
    let mut psi_nk = -EULER_GAMMA + (1..=n).map(|j| 1.0 / j as f64).sum::<f64>();

    let mut term = half.powu(order) / factorial(n);
    let mut series = term * (psi_k + psi_nk);

    for k in 1..MAX_SERIES_TERMS {
        term = term * q / ((k * (k + n)) as f64);
        psi_k += 1.0 / k as f64;
        psi_nk += 1.0 / (k + n) as f64;
        series += term * (psi_k + psi_nk);
        if term.norm() <= 1e-18 * series.norm() {
            break;
        }
    }

    half.ln() * bessel_j(order, z) * (2.0 / PI) - (singular + series) / PI
}

/// Half-width of the strip in which the K_n integrand decays
///
/// For w = -iz this is π/2 - |arg w| = min(arg z, π - arg z).
fn strip_half_width(z: Complex64) -> f64 {
    let arg = z.arg();
    arg.min(PI - arg)
}

/// H_n^(1)(z) = -(2i/π) (-i)^n K_n(-iz) for Im z > 0
fn hankel1_integral(order: u32, z: Complex64) -> Complex64 {
    let w = Complex64::new(z.im, -z.re);
    let step = strip_half_width(z) / 6.0;
    let k = bessel_k_integral(order, w, step);

    let rotation = match order % 4 {
        0 => Complex64::new(1.0, 0.0),
        1 => Complex64::new(0.0, -1.0),
        2 => Complex64::new(-1.0, 0.0),
        _ => Complex64::new(0.0, 1.0),
    };

    Complex64::new(0.0, -2.0 / PI) * rotation * k
}

/// K_n(w) = ∫₀^∞ exp(-w cosh t) cosh(nt) dt by the trapezoidal rule
///
/// The integrand is analytic and decays doubly exponentially, so the
/// trapezoidal rule converges geometrically in 1/step.
fn bessel_k_integral(order: u32, w: Complex64, step: f64) -> Complex64 {
    let n = order as f64;
    let decay = w.re;

    // truncate once the integrand is e^{-50} below its value at t = 0
    let mut t_max: f64 = 1.0;
    while decay * (t_max.cosh() - 1.0) - n * t_max < 50.0 && t_max < 40.0 {
        t_max += 0.5;
    }

    let steps = (t_max / step).ceil() as usize;
    let h = t_max / steps as f64;

    let mut sum = (-w).exp() * 0.5;
    for j in 1..=steps {
        let t = j as f64 * h;
        sum += (-w * t.cosh()).exp() * (n * t).cosh();
    }

    sum * h
}

/// Hankel asymptotic expansion for large |z|
///
/// ```text
/// H_n^(1,2)(z) ~ √(2/πz) e^{±i(z - nπ/2 - π/4)} Σ_k (±i)^k a_k(n) / z^k
/// a_k(n) = (4n² - 1)(4n² - 9)...(4n² - (2k-1)²) / (k! 8^k)
/// ```
///
/// The series is summed up to its smallest term.
fn hankel_asymptotic(kind: HankelKind, order: u32, z: Complex64) -> Complex64 {
    let rotation = match kind {
        HankelKind::First => Complex64::i(),
        HankelKind::Second => -Complex64::i(),
    };
    hankel_asymptotic_scaled(kind, order, z) * (rotation * z).exp()
}

/// [`hankel_asymptotic`] without the e^{±iz} factor
fn hankel_asymptotic_scaled(kind: HankelKind, order: u32, z: Complex64) -> Complex64 {
    let n = order as f64;
    let mu = 4.0 * n * n;
    let rotation = match kind {
        HankelKind::First => Complex64::i(),
        HankelKind::Second => -Complex64::i(),
    };

    let mut term = Complex64::new(1.0, 0.0);
    let mut sum = term;

    for k in 1..MAX_SERIES_TERMS {
        let kf = k as f64;
        let odd = 2.0 * kf - 1.0;
        let next = term * rotation * ((mu - odd * odd) / (8.0 * kf)) / z;
        if next.norm() >= term.norm() {
            break;
        }
        term = next;
        sum += term;
        if term.norm() <= 1e-18 * sum.norm() {
            break;
        }
    }

    let phase = -n * FRAC_PI_2 - FRAC_PI_4;
    let prefactor = (Complex64::new(2.0 / PI, 0.0) / z).sqrt();

    prefactor * (rotation * phase).exp() * sum
}

fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_close(a: Complex64, b: Complex64, tol: f64) {
        let scale = b.norm().max(1e-300);
        assert!(
            (a - b).norm() / scale < tol,
            "{} vs {} (relative error {:e})",
            a,
            b,
            (a - b).norm() / scale
        );
    }

    #[test]
    fn test_real_axis_values() {
        let one = Complex64::new(1.0, 0.0);

        // J_0(1), Y_0(1)
        assert_abs_diff_eq!(bessel_j(0, one).re, 0.7651976865579666, epsilon = 1e-13);
        assert_abs_diff_eq!(bessel_y(0, one).re, 0.08825696421567696, epsilon = 1e-13);

        // J_1(1), Y_1(2), J_2(3)
        assert_abs_diff_eq!(bessel_j(1, one).re, 0.4400505857449335, epsilon = 1e-13);
        assert_abs_diff_eq!(
            bessel_y(1, Complex64::new(2.0, 0.0)).re,
            -0.10703243154093754,
            epsilon = 1e-13
        );
        assert_abs_diff_eq!(
            bessel_j(2, Complex64::new(3.0, 0.0)).re,
            0.48609126058589103,
            epsilon = 1e-13
        );

        let h = hankel1(0, one);
        assert_abs_diff_eq!(h.re, 0.7651976865579666, epsilon = 1e-13);
        assert_abs_diff_eq!(h.im, 0.08825696421567696, epsilon = 1e-13);
    }

    #[test]
    fn test_wronskian_complex() {
        // J_1 Y_0 - J_0 Y_1 = 2 / (π z)
        for &z in &[
            Complex64::new(0.7, 0.7),
            Complex64::new(2.0, 1.5),
            Complex64::new(3.0, -0.5),
        ] {
            let w = bessel_j(1, z) * bessel_y(0, z) - bessel_j(0, z) * bessel_y(1, z);
            assert_close(w, Complex64::new(2.0 / PI, 0.0) / z, 1e-11);
        }
    }

    #[test]
    fn test_integral_matches_series() {
        // moderate |z|: the series is still accurate for H^(1)
        let z = Complex64::new(1.0, 1.0);
        for order in 0..3 {
            let series = bessel_j(order, z) + Complex64::i() * bessel_y(order, z);
            assert_close(hankel1_integral(order, z), series, 1e-10);
        }
    }

    #[test]
    fn test_asymptotic_matches_integral() {
        let z = Complex64::from_polar(16.5, FRAC_PI_4);
        for order in 0..3 {
            let asym = hankel_asymptotic(HankelKind::First, order, z);
            assert_close(hankel1_integral(order, z), asym, 1e-10);
        }
    }

    #[test]
    fn test_second_kind_continuity() {
        // both sides of the asymptotic switch on the streaming ray
        let inner = Complex64::from_polar(16.9, FRAC_PI_4);
        for order in 0..3 {
            let direct = hankel2(order, inner);
            let asym = hankel_asymptotic(HankelKind::Second, order, inner);
            assert_close(direct, asym, 1e-9);
        }
    }

    #[test]
    fn test_conjugate_symmetry() {
        let z = Complex64::new(2.0, 1.0);
        for order in 0..3 {
            assert_close(hankel2(order, z), hankel1(order, z.conj()).conj(), 1e-12);
        }
    }

    #[test]
    fn test_recurrence_on_streaming_ray() {
        // H_0 + H_2 = (2/z) H_1 for both kinds
        for &modulus in &[0.3, 2.0, 8.0, 25.0] {
            let z = Complex64::from_polar(modulus, FRAC_PI_4);
            for kind in [HankelKind::First, HankelKind::Second] {
                let lhs = hankel(kind, 0, z) + hankel(kind, 2, z);
                let rhs = hankel(kind, 1, z) * 2.0 / z;
                assert_close(lhs, rhs, 1e-9);
            }
        }
    }

    #[test]
    fn test_scaled_matches_unscaled() {
        for &modulus in &[0.5, 6.0, 16.0, 30.0] {
            let z = Complex64::from_polar(modulus, FRAC_PI_4);
            let h1 = hankel_scaled(HankelKind::First, 2, z) * (Complex64::i() * z).exp();
            let h2 = hankel_scaled(HankelKind::Second, 2, z) * (-Complex64::i() * z).exp();
            assert_close(h1, hankel1(2, z), 1e-9);
            assert_close(h2, hankel2(2, z), 1e-9);
        }
    }

    #[test]
    fn test_scaled_second_kind_stays_finite() {
        // |Im z| = 1500 overflows H^(2) itself
        let z = Complex64::from_polar(1500.0 * std::f64::consts::SQRT_2, FRAC_PI_4);
        assert!(!hankel2(2, z).is_finite());
        let scaled = hankel_scaled(HankelKind::Second, 2, z);
        assert!(scaled.is_finite());
        let leading = (2.0 / (PI * z.norm())).sqrt();
        assert_abs_diff_eq!(scaled.norm(), leading, epsilon = 2e-3 * leading);
    }

    #[test]
    fn test_first_kind_decays() {
        let near = hankel1(0, Complex64::from_polar(2.0, FRAC_PI_4));
        let far = hankel1(0, Complex64::from_polar(20.0, FRAC_PI_4));
        assert!(far.norm() < near.norm() * 1e-4);
    }
}
