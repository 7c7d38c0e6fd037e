//! Persistence Module: Barcode Bases and Their Algebra
//!
//! Implements the bookkeeping a spectral-sequence driver needs when it
//! works with persistence modules given by barcodes:
//! - Lifetime intervals and the well-definedness filter
//! - Barcode bases expressed over a parent basis
//! - Active-generator queries at a filtration radius
//! - Broken-differential repair as generators die
//!
//! ## Conventions
//!
//! Generators live on half-open intervals [birth, death). Coordinates are
//! stored column-wise: column i of a coordinate matrix is the i-th
//! generator written in the parent basis.

mod barcode_basis;
mod interval;

pub use barcode_basis::{BarcodeBasis, BarcodeBasisBuilder, Lineage, Repair};
pub use interval::{invert_permutation, LifetimeInterval};
