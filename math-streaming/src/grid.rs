//! Evaluation grids
//!
//! A [`Grid`] stores Cartesian coordinates of any ndarray dimension and the
//! polar coordinates derived from them. The polar pair is never set on its
//! own, so (r, Θ) always agrees with (x, y).

use crate::error::{Result, StreamingError};
use ndarray::{Array, Array1, Array2, Dimension, Ix1, Ix2, Zip};

/// Cartesian evaluation points with derived r = √(x² + y²), Θ = atan2(y, x)
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<D: Dimension> {
    x: Array<f64, D>,
    y: Array<f64, D>,
    r: Array<f64, D>,
    theta: Array<f64, D>,
}

impl<D: Dimension> Grid<D> {
    /// Build a grid from matching coordinate arrays
    ///
    /// # Errors
    /// `ShapeMismatch` if the shapes differ, `UndefinedAngle` at the origin.
    pub fn new(x: Array<f64, D>, y: Array<f64, D>) -> Result<Self> {
        if x.shape() != y.shape() {
            return Err(StreamingError::ShapeMismatch {
                left: x.shape().to_vec(),
                right: y.shape().to_vec(),
            });
        }

        let r = Zip::from(&x).and(&y).map_collect(|&a, &b| a.hypot(b));
        if let Some(index) = r.iter().position(|&v| v == 0.0) {
            return Err(StreamingError::UndefinedAngle { index });
        }
        let theta = Zip::from(&x).and(&y).map_collect(|&a, &b| b.atan2(a));

        Ok(Self { x, y, r, theta })
    }

    /// Cartesian x
    pub fn x(&self) -> &Array<f64, D> {
        &self.x
    }

    /// Cartesian y
    pub fn y(&self) -> &Array<f64, D> {
        &self.y
    }

    /// Radius
    pub fn r(&self) -> &Array<f64, D> {
        &self.r
    }

    /// Polar angle in (-π, π]
    pub fn theta(&self) -> &Array<f64, D> {
        &self.theta
    }

    /// Array shape shared by all coordinate arrays
    pub fn shape(&self) -> &[usize] {
        self.x.shape()
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// `true` for a grid without points
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Smallest and largest radius, `None` for an empty grid
    pub fn radius_range(&self) -> Option<(f64, f64)> {
        if self.r.is_empty() {
            return None;
        }
        Some(
            self.r
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                }),
        )
    }
}

impl Grid<Ix1> {
    /// Scattered points
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let x = points.iter().map(|p| p.0).collect::<Array1<f64>>();
        let y = points.iter().map(|p| p.1).collect::<Array1<f64>>();
        Self::new(x, y)
    }
}

impl Grid<Ix2> {
    /// Tensor grid with `ij` indexing: `x[[i, j]] = xs[i]`, `y[[i, j]] = ys[j]`
    pub fn meshgrid(xs: &Array1<f64>, ys: &Array1<f64>) -> Result<Self> {
        let shape = (xs.len(), ys.len());
        let x = Array2::from_shape_fn(shape, |(i, _)| xs[i]);
        let y = Array2::from_shape_fn(shape, |(_, j)| ys[j]);
        Self::new(x, y)
    }

    /// Polar tensor grid: axis 0 runs over `rs`, axis 1 over `thetas`
    pub fn polar(rs: &Array1<f64>, thetas: &Array1<f64>) -> Result<Self> {
        let shape = (rs.len(), thetas.len());
        let x = Array2::from_shape_fn(shape, |(i, j)| rs[i] * thetas[j].cos());
        let y = Array2::from_shape_fn(shape, |(i, j)| rs[i] * thetas[j].sin());
        Self::new(x, y)
    }
}
