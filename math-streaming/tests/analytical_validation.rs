//! End-to-end checks of the streaming pipeline against closed-form results
//!
//! The quadrature and radial operators are compared to integrals and
//! derivatives known in closed form. The solvers are checked against the
//! no-slip conditions at the cylinder surface, and the evaluation layer
//! against the linear algebra of the Soln type.

use approx::assert_abs_diff_eq;
use math_streaming::config::StreamingConfig;
use math_streaming::numeric::interp;
use math_streaming::quadrature::{cumint, head_from_one, quadgauss, tail_to_infinity};
use math_streaming::radial::{curl, d2};
use math_streaming::special::{bessel_j, bessel_y, hankel1, hankel2};
use math_streaming::{
    CartesianVelocity, ComplexAmplitude, Grid, Order, Soln, SolnTime, StreamingError,
    StreamingParams, StreamingSolution, from_cartesian, to_cartesian,
};
use ndarray::{Array1, Array2, array};
use num_complex::Complex64;
use std::f64::consts::PI;

fn geomspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    Array1::linspace(start.ln(), end.ln(), n).mapv(f64::exp)
}

/// Test the 100-point rule on a constant and an even polynomial
#[test]
fn test_quadgauss_exact_polynomials() {
    let two: f64 = quadgauss(|x: &Array1<f64>| x.mapv(|_| 1.0));
    assert_abs_diff_eq!(two, 2.0, epsilon = 1e-13);

    let quartic: f64 = quadgauss(|x: &Array1<f64>| x.mapv(|v| v.powi(4)));
    assert_abs_diff_eq!(quartic, 0.4, epsilon = 1e-13);

    let odd: Complex64 = quadgauss(|x: &Array1<f64>| x.mapv(|v| Complex64::new(v, v.powi(3))));
    assert_abs_diff_eq!(odd.norm(), 0.0, epsilon = 1e-13);
}

/// ∫_r^∞ s⁻² ds = 1/r
#[test]
fn test_tail_of_inverse_square() {
    let r = array![1.0, 2.0, 5.0, 10.0];
    let tail = tail_to_infinity(&r, |s: &Array1<f64>| s.mapv(|v| 1.0 / (v * v))).unwrap();
    for (t, ri) in tail.iter().zip(r.iter()) {
        assert_abs_diff_eq!(*t, 1.0 / ri, epsilon = 1e-10);
    }
}

/// ∫_r^∞ s⁻⁴ ds = 1/(3r³) on a dense geometric grid
#[test]
fn test_tail_dense_grid() {
    let r = geomspace(1.0, 30.0, 2000);
    let tail = tail_to_infinity(&r, |s: &Array1<f64>| s.mapv(|v| v.powi(-4))).unwrap();
    for i in (0..r.len()).step_by(97) {
        let exact = 1.0 / (3.0 * r[i].powi(3));
        assert_abs_diff_eq!(tail[i], exact, epsilon = 5e-6);
    }
}

/// ∫_1^5 s² ds = 124/3 up to the O(h²) trapezoid error
#[test]
fn test_head_from_surface() {
    let r = Array1::linspace(1.0, 5.0, 1000);
    let head = head_from_one(&r, |s: &Array1<f64>| s.mapv(|v| v * v)).unwrap();
    assert_eq!(head[0], 0.0);
    let last = r.len() - 1;
    let exact = (125.0 - 1.0) / 3.0;
    assert_abs_diff_eq!(head[last], exact, epsilon = 1e-4);
}

#[test]
fn test_cumint_starts_at_zero_and_is_deterministic() {
    let x = Array1::linspace(0.0, 3.0, 301);
    let g = x.mapv(|v: f64| Complex64::new(v.cos(), v.sin()));
    let first = cumint(g.view(), x.view()).unwrap();
    let second = cumint(g.view(), x.view()).unwrap();
    assert_eq!(first[0], Complex64::new(0.0, 0.0));
    assert_eq!(first, second);

    // ∫ e^{is} ds = -i (e^{ix} - 1)
    let exact = Complex64::new(0.0, -1.0) * (Complex64::new(0.0, 3.0).exp() - 1.0);
    assert_abs_diff_eq!((first[300] - exact).norm(), 0.0, epsilon = 1e-4);
}

#[test]
fn test_d2_annihilates_power_modes() {
    let r: Array1<f64> = Array1::linspace(1.0, 4.0, 3001);
    for k in [1usize, 2] {
        let kf = k as f64;
        for psi in [r.mapv(|v| v.powf(kf)), r.mapv(|v| v.powf(-kf))] {
            let out = d2(&psi, &r, k).unwrap();
            for i in 2..r.len() - 2 {
                assert_abs_diff_eq!(out[i], 0.0, epsilon = 1e-3);
            }
        }
    }
}

/// Uniform flow ψ = r sin Θ has u_r = cos Θ and u_Θ = -sin Θ
#[test]
fn test_curl_of_uniform_stream() {
    let r = Array1::linspace(1.0, 3.0, 201);
    let psi = r.mapv(|v| Complex64::new(v, 0.0));
    let (ur, utheta) = curl(&psi, &r, 1).unwrap();
    for i in 0..r.len() {
        assert_abs_diff_eq!(ur[i].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(utheta[i].re, -1.0, epsilon = 1e-10);
    }
}

#[test]
fn test_amplitude_is_reproducible() {
    let r = Array1::linspace(1.0, 6.0, 500);
    let psi = r.mapv(|v| Complex64::new(1.0 / v, -0.25 / (v * v)));
    let a = ComplexAmplitude::<2>::new(r.clone(), psi.clone()).unwrap();
    let b = ComplexAmplitude::<2>::new(r, psi).unwrap();
    assert_eq!(a.omega(), b.omega());
    assert_eq!(a.ur(), b.ur());
    assert_eq!(a.utheta(), b.utheta());
    assert_eq!(a.harmonic(), 2);
}

#[test]
fn test_amplitude_length_mismatch() {
    let r = Array1::linspace(1.0, 6.0, 10);
    let psi = Array1::from_elem(9, Complex64::new(1.0, 0.0));
    assert!(matches!(
        ComplexAmplitude::<1>::new(r, psi),
        Err(StreamingError::LengthMismatch { .. })
    ));
}

#[test]
fn test_soln_linear_algebra() {
    let field = |offset: f64| Array2::from_shape_fn((3, 4), |(i, j)| offset + (i * 4 + j) as f64);
    let a = Soln::new(
        SolnTime::Instant(0.5),
        field(0.0),
        field(1.0),
        field(2.0),
        field(3.0),
    )
    .unwrap();
    let b = a.scale(-2.0);
    let sum = a.combine(&b).unwrap();
    for (s, v) in sum.psi().iter().zip(a.psi().iter()) {
        assert_abs_diff_eq!(*s, -v, epsilon = 1e-14);
    }
    assert_eq!(sum.t(), a.t());
    assert_eq!(b.shape(), &[3, 4]);
}

#[test]
fn test_zero_angle_kills_sine_fields() {
    let params = StreamingParams::new(0.1, 8.0).unwrap();
    let r = geomspace(1.0, 10.0, 800);
    let solution = StreamingSolution::solve(&params, &r).unwrap();
    let grid = Grid::polar(&array![1.2, 2.0, 5.0], &array![0.0, PI]).unwrap();

    for t in [0.0, 0.9, 2.4] {
        let s = solution.evaluate(t, &grid).unwrap();
        for v in s.psi().iter().chain(s.omega()).chain(s.utheta()) {
            assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_zero_amplitude_composite() {
    let params = StreamingParams::new(0.0, 8.0).unwrap();
    let r = geomspace(1.0, 10.0, 600);
    let solution = StreamingSolution::solve(&params, &r).unwrap();
    let grid = Grid::polar(&array![1.0, 3.0], &array![0.4, 1.1, 2.5]).unwrap();
    let s = solution.evaluate(1.3, &grid).unwrap();
    for v in s.psi().iter().chain(s.omega()).chain(s.ur()).chain(s.utheta()) {
        assert_eq!(*v, 0.0);
    }
}

/// The first order moves with the cylinder: at t = 0 the surface velocity
/// amplitude is the unit x vector (the one-sided radial derivative limits
/// the accuracy of u_Θ)
#[test]
fn test_surface_velocity_is_rigid_translation() {
    let eps = 0.05;
    let params = StreamingParams::new(eps, 20.0).unwrap();
    let r = geomspace(1.0, 15.0, 3000);
    let solution = StreamingSolution::solve(&params, &r).unwrap();
    let thetas = Array1::linspace(0.1, 3.0, 7);
    let grid = Grid::polar(&array![1.0], &thetas).unwrap();

    let s = evaluate_first_order_only(&solution, &grid, 0.0);
    let velocity = to_cartesian(&s, &grid).unwrap();
    for (ux, uy) in velocity.ux.iter().zip(velocity.uy.iter()) {
        assert_abs_diff_eq!(*ux, 1.0, epsilon = 1e-2);
        assert_abs_diff_eq!(*uy, 0.0, epsilon = 1e-2);
    }
}

fn evaluate_first_order_only(
    solution: &StreamingSolution,
    grid: &Grid<ndarray::Ix2>,
    t: f64,
) -> Soln<ndarray::Ix2> {
    math_streaming::evaluate(t, grid, solution.first()).unwrap()
}

#[test]
fn test_cartesian_round_trip_on_history() {
    let params = StreamingParams::new(0.2, 6.0).unwrap();
    let r = geomspace(1.0, 8.0, 500);
    let solution = StreamingSolution::solve(&params, &r).unwrap();
    let grid = Grid::polar(&array![1.5, 2.5, 4.0], &array![-2.0, 0.3, 1.7, 3.0]).unwrap();
    let times = [0.0, 1.0, 2.0];
    let history = solution.sweep(&times, &grid).unwrap();

    let velocity: CartesianVelocity<_> = to_cartesian(&history, &grid).unwrap();
    let (ur, utheta) = from_cartesian(&velocity, &grid).unwrap();
    for (a, b) in ur.iter().zip(history.ur().iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
    for (a, b) in utheta.iter().zip(history.utheta().iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn test_sweep_slices_match_evaluate() {
    let params = StreamingParams::new(0.15, 12.0).unwrap();
    let r = geomspace(1.0, 10.0, 1000);
    let solution = StreamingSolution::solve(&params, &r).unwrap();
    let grid = Grid::polar(&array![1.1, 2.0], &array![0.5, 2.0, 4.0]).unwrap();
    let times: Vec<f64> = (0..5).map(|k| k as f64 * 0.4).collect();

    let history = solution.sweep(&times, &grid).unwrap();
    assert_eq!(history.shape(), &[2, 3, 5]);
    assert_eq!(history.t().times(), times);

    for (k, &t) in times.iter().enumerate() {
        let single = solution.evaluate(t, &grid).unwrap();
        for ((i, j), v) in single.psi().indexed_iter() {
            assert_abs_diff_eq!(history.psi()[[i, j, k]], *v, epsilon = 1e-14);
        }
    }
}

/// Over one period the oscillating parts average out and only ε² times the
/// steady streaming remains
#[test]
fn test_period_average_isolates_mean_flow() {
    let eps = 0.1;
    let params = StreamingParams::new(eps, 15.0).unwrap();
    let r = geomspace(1.0, 12.0, 1500);
    let solution = StreamingSolution::solve(&params, &r).unwrap();
    let grid = Grid::polar(&array![1.3, 2.5], &array![0.7, 2.2]).unwrap();

    let n = 8;
    let times: Vec<f64> = (0..n).map(|k| 2.0 * PI * k as f64 / n as f64).collect();
    let history = solution.sweep(&times, &grid).unwrap();
    let mean = math_streaming::evaluate(0.0, &grid, solution.second_mean())
        .unwrap()
        .scale(eps * eps);

    for ((i, j), expected) in mean.psi().indexed_iter() {
        let average: f64 = (0..n).map(|k| history.psi()[[i, j, k]]).sum::<f64>() / n as f64;
        assert_abs_diff_eq!(average, *expected, epsilon = 1e-12);
    }
}

#[test]
fn test_hankel_reference_values() {
    let one = Complex64::new(1.0, 0.0);
    let h0 = hankel1(0, one);
    assert_abs_diff_eq!(h0.re, 0.765_197_686_557_966_6, epsilon = 1e-10);
    assert_abs_diff_eq!(h0.im, 0.088_256_964_215_676_96, epsilon = 1e-10);

    let h1 = hankel1(1, one);
    assert_abs_diff_eq!(h1.re, 0.440_050_585_744_933_5, epsilon = 1e-10);
    assert_abs_diff_eq!(h1.im, -0.781_212_821_300_288_7, epsilon = 1e-10);
}

/// J₁Y₀ - J₀Y₁ = 2/(πz) also off the real axis
#[test]
fn test_bessel_wronskian_complex_argument() {
    for z in [
        Complex64::new(0.7, 0.7),
        Complex64::new(2.0, 2.0),
        Complex64::new(5.0, 1.0),
    ] {
        let w = bessel_j(1, z) * bessel_y(0, z) - bessel_j(0, z) * bessel_y(1, z);
        let exact = 2.0 / (PI * z);
        assert_abs_diff_eq!((w - exact).norm() / exact.norm(), 0.0, epsilon = 1e-9);

        let h2 = hankel2(1, z);
        let mirrored = hankel1(1, z.conj()).conj();
        assert_abs_diff_eq!((h2 - mirrored).norm(), 0.0, epsilon = 1e-10);
    }
}

#[test]
fn test_error_surfaces() {
    assert!(matches!(
        StreamingParams::new(0.1, 0.0),
        Err(StreamingError::DegenerateReynolds { .. })
    ));
    assert!(matches!(
        Grid::from_points(&[(0.0, 0.0)]),
        Err(StreamingError::UndefinedAngle { .. })
    ));

    let x = array![1.0, 2.0, 3.0];
    let y = array![1.0, 4.0, 9.0];
    assert!(matches!(
        interp(array![3.5].view(), x.view(), y.view()),
        Err(StreamingError::OutOfRange { .. })
    ));

    let params = StreamingParams::new(0.1, 5.0).unwrap();
    let shifted = Array1::linspace(1.5, 5.0, 100);
    assert!(StreamingSolution::solve(&params, &shifted).is_err());
}

#[test]
fn test_orders_have_expected_harmonics() {
    assert_eq!(Order::ALL.map(|o| o.harmonic()), [1, 2, 2]);
    assert_eq!(Order::ALL.map(|o| o.power()), [1, 2, 2]);
    assert_eq!(Order::ALL.map(|o| o.is_steady()), [false, true, false]);
}

#[test]
fn test_config_round_trip() {
    let config = StreamingConfig::default_config();
    let path = std::env::temp_dir().join(format!("streaming_config_{}.json", std::process::id()));
    config.to_file(&path).unwrap();
    let loaded = StreamingConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.flow.epsilon, config.flow.epsilon);
    assert_eq!(loaded.flow.reynolds, config.flow.reynolds);
    assert_eq!(loaded.radial.samples, config.radial.samples);
    assert_eq!(loaded.time.steps, config.time.steps);
}
