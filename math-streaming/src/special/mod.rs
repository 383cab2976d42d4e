//! Special mathematical functions for the streaming solutions
//!
//! This module provides:
//!
//! - Cylindrical Hankel functions H_n^(1), H_n^(2) of complex argument
//! - Bessel functions J_n, Y_n of complex argument (power series)
//! - Legendre polynomials P_n and their derivatives
//!
//! The Hankel functions build the Bessel-ratio basis of every order
//! solver; the Legendre polynomials seed the Gauss–Legendre rule.

mod hankel;
mod legendre;

pub use hankel::*;
pub use legendre::*;
