//! # Barcode Algebra
//!
//! Barcode bases and simplicial differentials for persistent homology
//! and spectral-sequence computations.
//!
//! ## Overview
//!
//! A persistence module over a filtration is described by a barcode: a
//! list of lifetime intervals [birth, death), one per generator. This
//! crate provides the linear-algebra bookkeeping on such bases that a
//! spectral-sequence driver relies on:
//!
//! 1. **Barcode bases**: construction with the well-definedness filter,
//!    coordinates over a parent basis, the standard sort order, and
//!    queries for generators alive or dying at a radius
//!
//! 2. **Broken differentials**: repair of coordinate matrices when
//!    generators die before a differential is exact
//!
//! 3. **Boundary matrices**: mod-p differentials of a simplicial complex,
//!    with a Vietoris-Rips builder to produce filtered complexes
//!
//! ## Example
//!
//! ```
//! use barcode_algebra::BarcodeBasis;
//!
//! let mut basis = BarcodeBasis::new([(1.0, 2.0), (1.0, 4.0), (-0.25, 5.0), (0.1, 1.0)]);
//! basis.sort(7);
//! assert_eq!(basis.active(1.1).unwrap(), vec![0, 2, 3]);
//! assert_eq!(basis.death(4.0).unwrap(), vec![2]);
//! ```
//!
//! ## References
//!
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Torras-Casas, "Distributing Persistent Homology via Spectral Sequences" (2019)

pub mod config;
pub mod error;
pub mod persistence;
pub mod topology;

pub use config::{AlgebraConfig, DEFAULT_PRECISION, MAX_PRECISION};
pub use error::{BarcodeError, Result};

// Re-exports from persistence
pub use persistence::{
    invert_permutation,
    BarcodeBasis,
    BarcodeBasisBuilder,
    LifetimeInterval,
    Lineage,
    Repair,
};

// Re-exports from topology
pub use topology::{
    complex_differentials,
    complex_differentials_with,
    compose_mod,
    Differentials,
    FilteredComplex,
    Simplex,
    SimplicialComplex,
    VietorisRips,
};
