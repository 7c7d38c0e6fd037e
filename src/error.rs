//! Error types for barcode bases and simplicial differentials
//!
//! All failures are local usage or construction errors: they surface
//! immediately to the caller and no operation returns a partial result.

use thiserror::Error;

/// Errors raised by barcode-basis algebra and boundary construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BarcodeError {
    /// Coordinate matrix row count differs from the parent dimension
    #[error("shape mismatch with parent basis: coordinates have {rows} rows, parent has dimension {parent_dim}")]
    ParentShapeMismatch { rows: usize, parent_dim: usize },

    /// Coordinate matrix column count differs from the number of input intervals
    #[error("interval/coordinate count mismatch: given {intervals} intervals but {columns} coordinates")]
    CoordinateCountMismatch { intervals: usize, columns: usize },

    /// Broken differential is not a `dim × dim` matrix
    #[error("malformed broken differential: expected {dim}x{dim}, found {rows}x{cols}")]
    MalformedBrokenDifferential { dim: usize, rows: usize, cols: usize },

    /// Any other vector/matrix whose length does not match the basis
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Generator window outside `[0, dim]`
    #[error("index window out of range: start {start}, end {end}, dim {dim}")]
    Range { start: usize, end: usize, dim: usize },

    /// Operation not defined for this kind of basis
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Simplex that is not a strictly increasing tuple of valid vertices
    #[error("malformed {dimension}-simplex at position {index}")]
    MalformedSimplex { dimension: usize, index: usize },

    /// Modulus below 2
    #[error("invalid modulus {0}: coefficients need a prime p >= 2")]
    InvalidPrime(u64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, BarcodeError>;
