//! Topology Module: Simplicial Complexes and Their Differentials
//!
//! Implements the chain-level structures that feed a persistent homology
//! computation:
//! - Simplicial complexes stored skeleton by skeleton
//! - Vietoris-Rips filtration (simplices with entry radii)
//! - Boundary matrices with coefficients mod p
//!
//! ## Mathematical Background
//!
//! For a complex C the chain group C_d has the d-simplices as basis and
//! ∂_d : C_d → C_{d-1} sends a simplex to the alternating sum of its faces.
//! Consecutive differentials compose to zero, ∂_{d-1} ∂_d = 0, which is
//! the property every output of this module satisfies mod p.

mod complex;
mod differentials;
mod vietoris_rips;

pub use complex::{Simplex, SimplicialComplex};
pub use differentials::{
    complex_differentials,
    complex_differentials_with,
    compose_mod,
    Differentials,
};
pub use vietoris_rips::{FilteredComplex, VietorisRips};
