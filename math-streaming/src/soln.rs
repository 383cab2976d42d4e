//! Real, time-tagged solution fields and their algebra
//!
//! A [`Soln`] carries ψ, ω, u_r and u_Θ on some grid shape. Superposition
//! of expansion orders goes through [`Soln::scale`] and [`Soln::combine`],
//! which always return new values.

use crate::error::{Result, StreamingError};
use crate::grid::Grid;
use ndarray::{Array, ArrayView, Axis, Dimension, IxDyn, RemoveAxis, Zip};

/// Time tag of a solution
#[derive(Debug, Clone, PartialEq)]
pub enum SolnTime {
    /// Single instant
    Instant(f64),
    /// Ordered sequence; fields carry a trailing time axis
    History(Vec<f64>),
}

impl SolnTime {
    /// The instant, `None` for a history
    pub fn instant(&self) -> Option<f64> {
        match self {
            SolnTime::Instant(t) => Some(*t),
            SolnTime::History(_) => None,
        }
    }

    /// All times covered
    pub fn times(&self) -> Vec<f64> {
        match self {
            SolnTime::Instant(t) => vec![*t],
            SolnTime::History(ts) => ts.clone(),
        }
    }
}

/// Physical solution {t, ψ, ω, u_r, u_Θ}
#[derive(Debug, Clone, PartialEq)]
pub struct Soln<D: Dimension> {
    t: SolnTime,
    psi: Array<f64, D>,
    omega: Array<f64, D>,
    ur: Array<f64, D>,
    utheta: Array<f64, D>,
}

impl<D: Dimension> Soln<D> {
    /// Assemble a solution from four fields of equal shape
    pub fn new(
        t: SolnTime,
        psi: Array<f64, D>,
        omega: Array<f64, D>,
        ur: Array<f64, D>,
        utheta: Array<f64, D>,
    ) -> Result<Self> {
        for field in [&omega, &ur, &utheta] {
            check_shape(psi.shape(), field.shape())?;
        }
        Ok(Self::from_parts(t, psi, omega, ur, utheta))
    }

    pub(crate) fn from_parts(
        t: SolnTime,
        psi: Array<f64, D>,
        omega: Array<f64, D>,
        ur: Array<f64, D>,
        utheta: Array<f64, D>,
    ) -> Self {
        Self {
            t,
            psi,
            omega,
            ur,
            utheta,
        }
    }

    /// Time tag
    pub fn t(&self) -> &SolnTime {
        &self.t
    }

    /// Streamfunction
    pub fn psi(&self) -> &Array<f64, D> {
        &self.psi
    }

    /// Vorticity
    pub fn omega(&self) -> &Array<f64, D> {
        &self.omega
    }

    /// Radial velocity
    pub fn ur(&self) -> &Array<f64, D> {
        &self.ur
    }

    /// Azimuthal velocity
    pub fn utheta(&self) -> &Array<f64, D> {
        &self.utheta
    }

    /// Field shape
    pub fn shape(&self) -> &[usize] {
        self.psi.shape()
    }

    /// a·self on every field; the time tag is kept
    pub fn scale(&self, a: f64) -> Self {
        Self::from_parts(
            self.t.clone(),
            self.psi.mapv(|v| a * v),
            self.omega.mapv(|v| a * v),
            self.ur.mapv(|v| a * v),
            self.utheta.mapv(|v| a * v),
        )
    }

    /// self + other on every field; the time tag of `self` is kept
    ///
    /// # Errors
    /// `ShapeMismatch` unless both operands share the same sampling.
    pub fn combine(&self, other: &Self) -> Result<Self> {
        check_shape(self.shape(), other.shape())?;
        Ok(Self::from_parts(
            self.t.clone(),
            &self.psi + &other.psi,
            &self.omega + &other.omega,
            &self.ur + &other.ur,
            &self.utheta + &other.utheta,
        ))
    }

    /// Stack single-instant solutions along a new trailing time axis
    ///
    /// # Errors
    /// `EmptySamples` for no snapshots, `LengthMismatch` if `times` and
    /// `snapshots` differ in length, `ShapeMismatch` for unequal shapes.
    pub fn stack_history(times: &[f64], snapshots: &[Self]) -> Result<Soln<D::Larger>>
    where
        D::Larger: RemoveAxis,
    {
        if snapshots.is_empty() {
            return Err(StreamingError::EmptySamples { got: 0, need: 1 });
        }
        if times.len() != snapshots.len() {
            return Err(StreamingError::LengthMismatch {
                left: times.len(),
                right: snapshots.len(),
            });
        }
        let shape = snapshots[0].shape().to_vec();
        for s in &snapshots[1..] {
            check_shape(&shape, s.shape())?;
        }

        let axis = Axis(shape.len());
        let psi = snapshots.iter().map(|s| s.psi.view()).collect::<Vec<_>>();
        let omega = snapshots.iter().map(|s| s.omega.view()).collect::<Vec<_>>();
        let ur = snapshots.iter().map(|s| s.ur.view()).collect::<Vec<_>>();
        let utheta = snapshots.iter().map(|s| s.utheta.view()).collect::<Vec<_>>();

        Ok(Soln::from_parts(
            SolnTime::History(times.to_vec()),
            stack_views(axis, &psi)?,
            stack_views(axis, &omega)?,
            stack_views(axis, &ur)?,
            stack_views(axis, &utheta)?,
        ))
    }
}

fn stack_views<D>(axis: Axis, views: &[ArrayView<'_, f64, D>]) -> Result<Array<f64, D::Larger>>
where
    D: Dimension,
    D::Larger: RemoveAxis,
{
    ndarray::stack(axis, views).map_err(|_| StreamingError::ShapeMismatch {
        left: views.first().map(|v| v.shape().to_vec()).unwrap_or_default(),
        right: views.last().map(|v| v.shape().to_vec()).unwrap_or_default(),
    })
}

fn check_shape(left: &[usize], right: &[usize]) -> Result<()> {
    if left != right {
        return Err(StreamingError::ShapeMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        });
    }
    Ok(())
}

/// Cartesian velocity components
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianVelocity<E: Dimension> {
    /// x component
    pub ux: Array<f64, E>,
    /// y component
    pub uy: Array<f64, E>,
}

/// cos Θ and sin Θ of `grid`, broadcast over the trailing axes of `target`
fn angle_terms<D: Dimension, E: Dimension>(
    grid: &Grid<D>,
    target: &[usize],
) -> Result<(Array<f64, E>, Array<f64, E>)> {
    let mismatch = || StreamingError::ShapeMismatch {
        left: grid.shape().to_vec(),
        right: target.to_vec(),
    };

    let mut theta = grid.theta().view().into_dyn();
    while theta.ndim() < target.len() {
        let axis = Axis(theta.ndim());
        theta = theta.insert_axis(axis);
    }
    let theta = theta.broadcast(IxDyn(target)).ok_or_else(mismatch)?;

    let cos = theta
        .mapv(f64::cos)
        .into_dimensionality::<E>()
        .map_err(|_| mismatch())?;
    let sin = theta
        .mapv(f64::sin)
        .into_dimensionality::<E>()
        .map_err(|_| mismatch())?;
    Ok((cos, sin))
}

/// Rotate (u_r, u_Θ) into (u_x, u_y) with the local polar angle
///
/// History solutions are rotated slice by slice: Θ is broadcast along the
/// trailing time axis.
pub fn to_cartesian<D: Dimension, E: Dimension>(
    soln: &Soln<E>,
    grid: &Grid<D>,
) -> Result<CartesianVelocity<E>> {
    let (cos, sin) = angle_terms::<D, E>(grid, soln.shape())?;
    let ux = Zip::from(&soln.ur)
        .and(&soln.utheta)
        .and(&cos)
        .and(&sin)
        .map_collect(|&ur, &ut, &c, &s| ur * c - ut * s);
    let uy = Zip::from(&soln.ur)
        .and(&soln.utheta)
        .and(&cos)
        .and(&sin)
        .map_collect(|&ur, &ut, &c, &s| ur * s + ut * c);
    Ok(CartesianVelocity { ux, uy })
}

/// Inverse of [`to_cartesian`]: (u_x, u_y) back to (u_r, u_Θ)
pub fn from_cartesian<D: Dimension, E: Dimension>(
    velocity: &CartesianVelocity<E>,
    grid: &Grid<D>,
) -> Result<(Array<f64, E>, Array<f64, E>)> {
    check_shape(velocity.ux.shape(), velocity.uy.shape())?;
    let (cos, sin) = angle_terms::<D, E>(grid, velocity.ux.shape())?;
    let ur = Zip::from(&velocity.ux)
        .and(&velocity.uy)
        .and(&cos)
        .and(&sin)
        .map_collect(|&ux, &uy, &c, &s| ux * c + uy * s);
    let utheta = Zip::from(&velocity.ux)
        .and(&velocity.uy)
        .and(&cos)
        .and(&sin)
        .map_collect(|&ux, &uy, &c, &s| -ux * s + uy * c);
    Ok((ur, utheta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, array};

    fn sample(t: f64, offset: f64) -> Soln<ndarray::Ix2> {
        let base = Array2::from_shape_fn((2, 3), |(i, j)| offset + (i * 3 + j) as f64);
        Soln::new(
            SolnTime::Instant(t),
            base.clone(),
            base.mapv(|v| 2.0 * v),
            base.mapv(|v| -v),
            base.mapv(|v| v * v),
        )
        .unwrap()
    }

    #[test]
    fn test_linear_combination() {
        let s1 = sample(0.5, 1.0);
        let s2 = sample(1.5, -2.0);
        let (a, b) = (0.3, -1.7);
        let c = s1.scale(a).combine(&s2.scale(b)).unwrap();

        assert_eq!(c.t(), &SolnTime::Instant(0.5));
        for (field, f1, f2) in [
            (c.psi(), s1.psi(), s2.psi()),
            (c.omega(), s1.omega(), s2.omega()),
            (c.ur(), s1.ur(), s2.ur()),
            (c.utheta(), s1.utheta(), s2.utheta()),
        ] {
            for ((v, x1), x2) in field.iter().zip(f1.iter()).zip(f2.iter()) {
                assert_abs_diff_eq!(*v, a * x1 + b * x2, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_scale_keeps_time() {
        let s = sample(2.0, 0.0).scale(0.0);
        assert_eq!(s.t().instant(), Some(2.0));
        assert!(s.psi().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_combine_shape_mismatch() {
        let s1 = sample(0.0, 0.0);
        let z = Array2::zeros((3, 3));
        let s2 = Soln::new(SolnTime::Instant(0.0), z.clone(), z.clone(), z.clone(), z).unwrap();
        assert!(matches!(
            s1.combine(&s2),
            Err(StreamingError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_stack_history() {
        let snaps = vec![sample(0.0, 0.0), sample(1.0, 10.0)];
        let history = Soln::stack_history(&[0.0, 1.0], &snaps).unwrap();
        assert_eq!(history.shape(), &[2, 3, 2]);
        assert_eq!(history.t().times(), vec![0.0, 1.0]);
        assert_eq!(history.psi()[[1, 2, 1]], snaps[1].psi()[[1, 2]]);
    }

    #[test]
    fn test_cartesian_round_trip() {
        let grid = Grid::polar(&array![1.0, 2.0], &array![0.1, 1.2, -2.5]).unwrap();
        let s = sample(0.0, 0.5);
        let v = to_cartesian(&s, &grid).unwrap();
        let (ur, ut) = from_cartesian(&v, &grid).unwrap();
        for (a, b) in ur.iter().zip(s.ur().iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
        for (a, b) in ut.iter().zip(s.utheta().iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cartesian_history_broadcast() {
        let grid = Grid::polar(&array![1.0, 2.0], &array![0.0, 1.0, 2.0]).unwrap();
        let snaps = vec![sample(0.0, 0.0), sample(1.0, 1.0), sample(2.0, 2.0)];
        let history = Soln::stack_history(&[0.0, 1.0, 2.0], &snaps).unwrap();
        let v = to_cartesian(&history, &grid).unwrap();
        let single = to_cartesian(&snaps[2], &grid).unwrap();
        assert_abs_diff_eq!(v.ux[[1, 1, 2]], single.ux[[1, 1]], epsilon = 1e-14);
        assert_abs_diff_eq!(v.uy[[0, 2, 2]], single.uy[[0, 2]], epsilon = 1e-14);
    }
}
