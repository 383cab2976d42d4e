//! Radial operators for a single azimuthal mode
//!
//! For a streamfunction ψ(r) sin(KΘ) the polar Laplacian reduces to
//!
//! ```text
//! D²_K ψ = (1/r) d/dr (r dψ/dr) - K² ψ / r²
//! ```
//!
//! and the velocity u = curl(ψ ẑ) has the radial profiles
//! u_r = K ψ / r (multiplying cos(KΘ)) and u_Θ = -dψ/dr (multiplying sin(KΘ)).
//! Derivatives are taken numerically with [`gradient`].

use crate::error::{Result, StreamingError};
use crate::numeric::{Scalar, gradient};
use ndarray::{Array1, Zip};

/// D²_K ψ sampled on `r`
///
/// # Errors
/// Fewer than two samples, mismatched lengths or a zero radius.
pub fn d2<T: Scalar>(psi: &Array1<T>, r: &Array1<f64>, k: usize) -> Result<Array1<T>> {
    check_nonzero(r)?;
    let k2 = (k * k) as f64;

    let dpsi = gradient(psi.view(), r.view())?;
    let r_dpsi = Zip::from(&dpsi).and(r).map_collect(|&d, &ri| d * ri);
    let outer = gradient(r_dpsi.view(), r.view())?;

    Ok(Zip::from(&outer)
        .and(psi)
        .and(r)
        .map_collect(|&o, &p, &ri| o * (1.0 / ri) - p * (k2 / (ri * ri))))
}

/// Radial profiles (u_r, u_Θ) of curl(ψ ẑ) for mode K
///
/// # Errors
/// Same conditions as [`d2`].
pub fn curl<T: Scalar>(psi: &Array1<T>, r: &Array1<f64>, k: usize) -> Result<(Array1<T>, Array1<T>)> {
    check_nonzero(r)?;
    let kf = k as f64;

    let dpsi = gradient(psi.view(), r.view())?;
    let ur = Zip::from(psi).and(r).map_collect(|&p, &ri| p * (kf / ri));
    let utheta = dpsi.mapv(|d| T::zero() - d);

    Ok((ur, utheta))
}

fn check_nonzero(r: &Array1<f64>) -> Result<()> {
    match r.iter().position(|&ri| ri == 0.0) {
        Some(index) => Err(StreamingError::ZeroRadius { index }),
        None => Ok(()),
    }
}
