//! Simplicial Complexes
//!
//! A complex is stored skeleton by skeleton: the vertex count, then for
//! each dimension d >= 1 the ordered list of d-simplices. The order of each
//! list fixes the basis of the chain group used by the differentials.

use crate::error::{BarcodeError, Result};

/// Sorted vertex tuple
pub type Simplex = Vec<usize>;

/// Simplicial complex without filtration values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplicialComplex {
    n_vertices: usize,
    /// skeleta[d - 1] holds the d-simplices
    skeleta: Vec<Vec<Simplex>>,
}

impl SimplicialComplex {
    /// Build from the vertex count and the d-simplices for d = 1, 2, ...
    ///
    /// Each d-simplex must have d + 1 strictly increasing vertices below
    /// `n_vertices`.
    pub fn new(n_vertices: usize, skeleta: Vec<Vec<Simplex>>) -> Result<Self> {
        for (offset, simplices) in skeleta.iter().enumerate() {
            let dimension = offset + 1;
            for (index, simplex) in simplices.iter().enumerate() {
                let well_formed = simplex.len() == dimension + 1
                    && simplex.windows(2).all(|pair| pair[0] < pair[1])
                    && simplex.last().map_or(false, |&v| v < n_vertices);
                if !well_formed {
                    return Err(BarcodeError::MalformedSimplex { dimension, index });
                }
            }
        }
        Ok(Self { n_vertices, skeleta })
    }

    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    /// Highest dimension stored (0 for a bare vertex set)
    pub fn dimension(&self) -> usize {
        self.skeleta.len()
    }

    /// Number of d-simplices
    pub fn count(&self, d: usize) -> usize {
        match d {
            0 => self.n_vertices,
            _ => self.skeleta.get(d - 1).map_or(0, Vec::len),
        }
    }

    /// The d-simplices for d >= 1; vertices are only counted, so d = 0
    /// yields an empty slice
    pub fn simplices(&self, d: usize) -> &[Simplex] {
        match d {
            0 => &[],
            _ => self.skeleta.get(d - 1).map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}
