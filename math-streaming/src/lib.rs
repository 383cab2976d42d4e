//! Steady streaming around an oscillating circular cylinder
//!
//! This crate computes the matched-asymptotic solution for the flow around a
//! circular cylinder oscillating with small amplitude ε in a viscous fluid,
//! to second order in ε.
//!
//! # Features
//!
//! - **Quadrature core**: 100-point Gauss–Legendre rule, cumulative
//!   trapezoid, semi-infinite integral transform
//! - **Order solvers**: first-order Stokes layer, steady streaming and the
//!   second harmonic, each as a complex radial amplitude
//! - **Evaluation**: interpolation on 1D/2D/ND grids, angular modulation,
//!   time projection and parallel time sweeps
//! - **Special functions**: complex-argument Hankel functions, Legendre
//!   polynomials
//!
//! # Example
//!
//! ```rust
//! use math_streaming::{Grid, StreamingParams, StreamingSolution};
//! use ndarray::{Array1, array};
//!
//! let params = StreamingParams::new(0.1, 10.0).unwrap();
//! let r = Array1::linspace(1.0, 10.0, 800);
//! let solution = StreamingSolution::solve(&params, &r).unwrap();
//!
//! let grid = Grid::polar(&array![1.0, 2.0, 4.0], &array![0.3, 1.2]).unwrap();
//! let soln = solution.evaluate(0.5, &grid).unwrap();
//! assert_eq!(soln.shape(), &[3, 2]);
//! ```

pub mod amplitude;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod grid;
pub mod numeric;
pub mod output;
pub mod params;
pub mod quadrature;
pub mod radial;
pub mod soln;
pub mod solvers;
pub mod special;

// Re-export main types at crate root
pub use amplitude::ComplexAmplitude;
pub use error::{Result, StreamingError};
pub use evaluate::{HarmonicField, evaluate, evaluate_composite, evaluate_sweep, realize};
pub use grid::Grid;
pub use params::StreamingParams;
pub use soln::{CartesianVelocity, Soln, SolnTime, from_cartesian, to_cartesian};
pub use solvers::{AmplitudeSolver, FirstOrder, Order, SecondOrder, SecondOrderMean, StreamingSolution};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
