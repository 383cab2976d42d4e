use super::{AmplitudeSolver, FirstOrder, Order, SecondOrder, SecondOrderMean};
use crate::amplitude::ComplexAmplitude;
use crate::error::Result;
use crate::evaluate::{CompositeField, evaluate_sweep};
use crate::grid::Grid;
use crate::params::StreamingParams;
use crate::soln::Soln;
use ndarray::{Array1, Dimension, RemoveAxis};
use std::time::Instant;

/// All three expansion orders for one parameter bundle
#[derive(Debug, Clone)]
pub struct StreamingSolution {
    params: StreamingParams,
    first: ComplexAmplitude<1>,
    second_mean: ComplexAmplitude<2>,
    second: ComplexAmplitude<2>,
}

impl StreamingSolution {
    /// Solve every order on the radial samples `r`
    ///
    /// # Example
    /// ```
    /// use math_streaming::params::StreamingParams;
    /// use math_streaming::solvers::StreamingSolution;
    /// use ndarray::Array1;
    ///
    /// let params = StreamingParams::new(0.1, 10.0).unwrap();
    /// let r = Array1::linspace(1.0, 10.0, 500);
    /// let solution = StreamingSolution::solve(&params, &r).unwrap();
    /// assert_eq!(solution.first().harmonic(), 1);
    /// ```
    pub fn solve(params: &StreamingParams, r: &Array1<f64>) -> Result<Self> {
        let start = Instant::now();

        let first = FirstOrder.solve(params, r)?;
        let second_mean = SecondOrderMean.solve(params, r)?;
        let second = SecondOrder.solve(params, r)?;

        log::info!(
            "Solved eps={}, Re={} on {} radial samples in {:.2?}",
            params.epsilon(),
            params.reynolds(),
            r.len(),
            start.elapsed()
        );

        Ok(Self {
            params: params.clone(),
            first,
            second_mean,
            second,
        })
    }

    /// Parameter bundle the orders were solved for
    pub fn params(&self) -> &StreamingParams {
        &self.params
    }

    /// O(ε) amplitude
    pub fn first(&self) -> &ComplexAmplitude<1> {
        &self.first
    }

    /// O(ε²) steady amplitude
    pub fn second_mean(&self) -> &ComplexAmplitude<2> {
        &self.second_mean
    }

    /// O(ε²) oscillatory amplitude
    pub fn second(&self) -> &ComplexAmplitude<2> {
        &self.second
    }

    /// Largest |ψ| of the amplitude of `order`
    pub fn max_abs_psi(&self, order: Order) -> f64 {
        match order {
            Order::First => self.first.max_abs_psi(),
            Order::SecondMean => self.second_mean.max_abs_psi(),
            Order::Second => self.second.max_abs_psi(),
        }
    }

    /// Composite field on `grid` at time `t`
    pub fn evaluate<D: Dimension>(&self, t: f64, grid: &Grid<D>) -> Result<Soln<D>> {
        self.project(grid)?.realize(t)
    }

    /// Composite fields on `grid` over `times`, time as the trailing axis
    pub fn sweep<D>(&self, times: &[f64], grid: &Grid<D>) -> Result<Soln<D::Larger>>
    where
        D: Dimension,
        D::Larger: RemoveAxis,
    {
        evaluate_sweep(
            times,
            &self.params,
            grid,
            &self.first,
            &self.second_mean,
            &self.second,
        )
    }

    /// Interpolated composite field, reusable for many times
    pub fn project<D: Dimension>(&self, grid: &Grid<D>) -> Result<CompositeField<D>> {
        CompositeField::project(
            &self.params,
            grid,
            &self.first,
            &self.second_mean,
            &self.second,
        )
    }
}
