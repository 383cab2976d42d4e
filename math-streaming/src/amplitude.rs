//! Complex radial amplitude of one harmonic
//!
//! A `ComplexAmplitude<K>` holds the complex streamfunction profile ψ(r) of
//! the mode ψ(r) sin(KΘ) e^{-iKt} together with the fields derived from it.
//! The vorticity ω = -D²_K ψ and the velocity (u_r, u_Θ) = curl_K ψ are
//! always recomputed from (r, ψ, K) at construction.

use crate::error::{Result, StreamingError};
use crate::radial::{curl, d2};
use ndarray::Array1;
use num_complex::Complex64;

/// Harmonic-order-K radial solution (ψ, ω, u_r, u_Θ)
#[derive(Debug, Clone)]
pub struct ComplexAmplitude<const K: usize> {
    r: Array1<f64>,
    psi: Array1<Complex64>,
    omega: Array1<Complex64>,
    ur: Array1<Complex64>,
    utheta: Array1<Complex64>,
}

impl<const K: usize> ComplexAmplitude<K> {
    /// Harmonic order of this amplitude
    pub const HARMONIC: usize = K;

    /// Wrap a streamfunction profile and derive ω, u_r and u_Θ
    ///
    /// # Errors
    /// Mismatched lengths, fewer than two samples or a zero radius.
    pub fn new(r: Array1<f64>, psi: Array1<Complex64>) -> Result<Self> {
        if r.len() != psi.len() {
            return Err(StreamingError::LengthMismatch {
                left: r.len(),
                right: psi.len(),
            });
        }

        let omega = d2(&psi, &r, K)?.mapv(|v| -v);
        let (ur, utheta) = curl(&psi, &r, K)?;

        Ok(Self {
            r,
            psi,
            omega,
            ur,
            utheta,
        })
    }

    /// Harmonic order K
    pub fn harmonic(&self) -> usize {
        K
    }

    /// Radial samples
    pub fn r(&self) -> &Array1<f64> {
        &self.r
    }

    /// Streamfunction ψ(r)
    pub fn psi(&self) -> &Array1<Complex64> {
        &self.psi
    }

    /// Vorticity ω(r) = -D²_K ψ
    pub fn omega(&self) -> &Array1<Complex64> {
        &self.omega
    }

    /// Radial velocity profile K ψ / r
    pub fn ur(&self) -> &Array1<Complex64> {
        &self.ur
    }

    /// Azimuthal velocity profile -dψ/dr
    pub fn utheta(&self) -> &Array1<Complex64> {
        &self.utheta
    }

    /// Number of radial samples
    pub fn len(&self) -> usize {
        self.r.len()
    }

    /// `true` when there are no samples (never the case after `new`)
    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    /// Largest |ψ| over the samples
    pub fn max_abs_psi(&self) -> f64 {
        self.psi.iter().fold(0.0, |m, v| m.max(v.norm()))
    }
}
