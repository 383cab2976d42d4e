//! Projection of complex radial amplitudes onto a grid and in time
//!
//! Evaluation runs in two stages:
//! 1. [`HarmonicField::project`] interpolates the four radial profiles at
//!    every grid radius and applies the angular factor (sin KΘ for ψ, ω and
//!    u_Θ, cos KΘ for u_r). This is done once per amplitude and grid.
//! 2. [`realize`] takes the physical instant Re[field · e^{-iKt}].
//!
//! A time sweep therefore interpolates once and only repeats stage 2.

use crate::amplitude::ComplexAmplitude;
use crate::error::{Result, StreamingError};
use crate::grid::Grid;
use crate::numeric::LinearInterpolator;
use crate::params::StreamingParams;
use crate::soln::{Soln, SolnTime};
use ndarray::{Array, Dimension, RemoveAxis};
use num_complex::Complex64;
use rayon::prelude::*;
use std::time::Instant;

/// Angle-modulated complex fields of one harmonic on one grid
#[derive(Debug, Clone)]
pub struct HarmonicField<D: Dimension> {
    harmonic: usize,
    psi: Array<Complex64, D>,
    omega: Array<Complex64, D>,
    ur: Array<Complex64, D>,
    utheta: Array<Complex64, D>,
}

impl<D: Dimension> HarmonicField<D> {
    /// Interpolate `amplitude` on `grid` and apply the angular factors
    ///
    /// # Errors
    /// `OutOfRange` for a grid radius outside the amplitude's radial samples.
    pub fn project<const K: usize>(grid: &Grid<D>, amplitude: &ComplexAmplitude<K>) -> Result<Self> {
        let interpolator = LinearInterpolator::new(amplitude.r().view())?;
        let kf = K as f64;
        let n = grid.len();

        let mut psi = Vec::with_capacity(n);
        let mut omega = Vec::with_capacity(n);
        let mut ur = Vec::with_capacity(n);
        let mut utheta = Vec::with_capacity(n);

        for (&r, &theta) in grid.r().iter().zip(grid.theta().iter()) {
            let bracket = interpolator.locate(r)?;
            let (sin, cos) = (kf * theta).sin_cos();
            psi.push(bracket.apply(amplitude.psi().view()) * sin);
            omega.push(bracket.apply(amplitude.omega().view()) * sin);
            ur.push(bracket.apply(amplitude.ur().view()) * cos);
            utheta.push(bracket.apply(amplitude.utheta().view()) * sin);
        }

        let dim = grid.r().raw_dim();
        let shaped = |values: Vec<Complex64>| {
            Array::from_shape_vec(dim.clone(), values).map_err(|_| StreamingError::ShapeMismatch {
                left: grid.shape().to_vec(),
                right: vec![n],
            })
        };

        Ok(Self {
            harmonic: K,
            psi: shaped(psi)?,
            omega: shaped(omega)?,
            ur: shaped(ur)?,
            utheta: shaped(utheta)?,
        })
    }

    /// Harmonic order K
    pub fn harmonic(&self) -> usize {
        self.harmonic
    }

    /// Complex ψ · sin KΘ
    pub fn psi(&self) -> &Array<Complex64, D> {
        &self.psi
    }

    /// Physical fields at time `t`
    pub fn realize(&self, t: f64) -> Soln<D> {
        realize(t, &self.psi, &self.omega, &self.ur, &self.utheta, self.harmonic)
    }
}

/// Re[field · e^{-iKt}] on all four fields
pub fn realize<D: Dimension>(
    t: f64,
    psi: &Array<Complex64, D>,
    omega: &Array<Complex64, D>,
    ur: &Array<Complex64, D>,
    utheta: &Array<Complex64, D>,
    harmonic: usize,
) -> Soln<D> {
    let phase = Complex64::from_polar(1.0, -(harmonic as f64) * t);
    let project = |field: &Array<Complex64, D>| field.mapv(|v| (v * phase).re);
    Soln::from_parts(
        SolnTime::Instant(t),
        project(psi),
        project(omega),
        project(ur),
        project(utheta),
    )
}

/// Physical fields of one amplitude on `grid` at time `t`
pub fn evaluate<D: Dimension, const K: usize>(
    t: f64,
    grid: &Grid<D>,
    amplitude: &ComplexAmplitude<K>,
) -> Result<Soln<D>> {
    Ok(HarmonicField::project(grid, amplitude)?.realize(t))
}

/// The three expansion orders projected on one grid
#[derive(Debug, Clone)]
pub struct CompositeField<D: Dimension> {
    epsilon: f64,
    first: HarmonicField<D>,
    second_mean: HarmonicField<D>,
    second: HarmonicField<D>,
}

impl<D: Dimension> CompositeField<D> {
    /// Project all three amplitudes on `grid`
    pub fn project(
        params: &StreamingParams,
        grid: &Grid<D>,
        s1: &ComplexAmplitude<1>,
        s2mean: &ComplexAmplitude<2>,
        s2: &ComplexAmplitude<2>,
    ) -> Result<Self> {
        Ok(Self {
            epsilon: params.epsilon(),
            first: HarmonicField::project(grid, s1)?,
            second_mean: HarmonicField::project(grid, s2mean)?,
            second: HarmonicField::project(grid, s2)?,
        })
    }

    /// ε·s1(t) + ε²·(s2mean(0) + s2(t))
    pub fn realize(&self, t: f64) -> Result<Soln<D>> {
        let eps = self.epsilon;
        let second = self
            .second_mean
            .realize(0.0)
            .combine(&self.second.realize(t))?
            .scale(eps * eps);
        self.first.realize(t).scale(eps).combine(&second)
    }
}

/// Composite field ε·s1 + ε²·(s2mean + s2) at time `t`
pub fn evaluate_composite<D: Dimension>(
    t: f64,
    params: &StreamingParams,
    grid: &Grid<D>,
    s1: &ComplexAmplitude<1>,
    s2mean: &ComplexAmplitude<2>,
    s2: &ComplexAmplitude<2>,
) -> Result<Soln<D>> {
    CompositeField::project(params, grid, s1, s2mean, s2)?.realize(t)
}

/// Composite field at every time of `times`, stacked along a trailing axis
///
/// Times are evaluated in parallel; the first failure aborts the sweep and
/// no partial history is returned.
pub fn evaluate_sweep<D>(
    times: &[f64],
    params: &StreamingParams,
    grid: &Grid<D>,
    s1: &ComplexAmplitude<1>,
    s2mean: &ComplexAmplitude<2>,
    s2: &ComplexAmplitude<2>,
) -> Result<Soln<D::Larger>>
where
    D: Dimension,
    D::Larger: RemoveAxis,
{
    if times.is_empty() {
        return Err(StreamingError::EmptySamples { got: 0, need: 1 });
    }

    let start = Instant::now();
    let composite = CompositeField::project(params, grid, s1, s2mean, s2)?;
    let snapshots = times
        .par_iter()
        .map(|&t| composite.realize(t))
        .collect::<Result<Vec<_>>>()?;
    let history = Soln::stack_history(times, &snapshots)?;

    log::info!(
        "Sweep: {} times on {} grid points in {:.2?}",
        times.len(),
        grid.len(),
        start.elapsed()
    );
    Ok(history)
}
