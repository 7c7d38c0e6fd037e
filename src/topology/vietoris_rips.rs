//! Vietoris-Rips Complex Construction
//!
//! The Vietoris-Rips complex VR_ε(X) is a simplicial complex where:
//! - 0-simplices are the points in X
//! - A k-simplex [v₀, ..., vₖ] exists iff d(vᵢ, vⱼ) ≤ ε for all i,j
//!
//! Every simplex enters the filtration at the length of its longest edge.
//! The builder returns the complex together with these radii; the
//! differentials only ever see the complex.

use ndarray::Array2;
use tracing::debug;

use super::complex::{Simplex, SimplicialComplex};
use crate::config::AlgebraConfig;
use crate::error::{BarcodeError, Result};

/// Vietoris-Rips filtration builder
pub struct VietorisRips {
    /// Distance matrix (precomputed)
    distances: Array2<f64>,
    /// Maximum filtration value
    max_radius: f64,
    /// Maximum simplex dimension
    max_dim: usize,
}

/// A simplex with the radius where it appears
#[derive(Debug, Clone)]
struct FilteredSimplex {
    vertices: Simplex,
    radius: f64,
}

/// Simplicial complex with the entry radius of every simplex
#[derive(Debug, Clone)]
pub struct FilteredComplex {
    pub complex: SimplicialComplex,
    /// radii[d - 1][i] is the radius of the i-th d-simplex
    pub radii: Vec<Vec<f64>>,
}

impl FilteredComplex {
    /// Entry radii of the d-simplices (empty for d = 0: points enter at 0)
    pub fn radii(&self, d: usize) -> &[f64] {
        match d {
            0 => &[],
            _ => self.radii.get(d - 1).map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}

impl VietorisRips {
    /// Create from a precomputed distance matrix
    pub fn from_distance_matrix(distances: Array2<f64>, max_radius: f64, max_dim: usize) -> Self {
        Self {
            distances,
            max_radius,
            max_dim,
        }
    }

    /// Create from point cloud (computes distance matrix)
    pub fn from_points(points: &Array2<f64>, max_radius: f64, max_dim: usize) -> Self {
        Self::from_distance_matrix(Self::compute_distance_matrix(points), max_radius, max_dim)
    }

    /// Limits taken from a validated configuration
    pub fn from_config(distances: Array2<f64>, config: &AlgebraConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_distance_matrix(distances, config.max_radius, config.max_dim))
    }

    /// Compute Euclidean distance matrix
    fn compute_distance_matrix(points: &Array2<f64>) -> Array2<f64> {
        let n = points.nrows();
        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i + 1..n {
                let diff = &points.row(i) - &points.row(j);
                let dist = diff.dot(&diff).sqrt();
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        dm
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.distances.nrows()
    }

    /// Build all simplices up to `max_dim` with diameter ≤ `max_radius`.
    ///
    /// Within a dimension simplices are ordered by radius, then
    /// lexicographically by vertices.
    pub fn build(&self) -> Result<FilteredComplex> {
        if self.max_radius.is_nan() || self.max_radius < 0.0 {
            return Err(BarcodeError::InvalidConfig("max_radius must be a non-negative number"));
        }
        let n = self.n_points();
        if self.distances.ncols() != n {
            return Err(BarcodeError::LengthMismatch {
                what: "distance matrix columns",
                expected: n,
                found: self.distances.ncols(),
            });
        }

        let mut current: Vec<FilteredSimplex> = (0..n)
            .map(|v| FilteredSimplex { vertices: vec![v], radius: 0.0 })
            .collect();
        let mut skeleta = Vec::with_capacity(self.max_dim);
        let mut radii = Vec::with_capacity(self.max_dim);

        for d in 1..=self.max_dim {
            let mut next = self.cofaces(&current);
            next.sort_by(|a, b| {
                a.radius
                    .total_cmp(&b.radius)
                    .then_with(|| a.vertices.cmp(&b.vertices))
            });
            debug!(dimension = d, simplices = next.len(), "vietoris-rips skeleton");

            skeleta.push(next.iter().map(|s| s.vertices.clone()).collect());
            radii.push(next.iter().map(|s| s.radius).collect());
            current = next;
        }

        Ok(FilteredComplex {
            complex: SimplicialComplex::new(n, skeleta)?,
            radii,
        })
    }

    /// Extend every simplex by one larger vertex within range of all of
    /// its vertices
    fn cofaces(&self, simplices: &[FilteredSimplex]) -> Vec<FilteredSimplex> {
        let n = self.n_points();
        let mut cofaces = Vec::new();

        for simplex in simplices {
            let last = simplex.vertices[simplex.vertices.len() - 1];
            'candidates: for v in last + 1..n {
                let mut radius = simplex.radius;
                for &u in &simplex.vertices {
                    let d = self.distances[[u, v]];
                    if d > self.max_radius {
                        continue 'candidates;
                    }
                    radius = radius.max(d);
                }
                let mut vertices = simplex.vertices.clone();
                vertices.push(v);
                cofaces.push(FilteredSimplex { vertices, radius });
            }
        }

        cofaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_triangle() {
        // Equilateral triangle with side 1
        let points = array![
            [0.0, 0.0],
            [1.0, 0.0],
            [0.5, 0.866]
        ];

        let below = VietorisRips::from_points(&points, 0.9, 2).build().unwrap();
        assert_eq!(below.complex.count(1), 0);
        assert_eq!(below.complex.count(2), 0);

        let above = VietorisRips::from_points(&points, 1.1, 2).build().unwrap();
        assert_eq!(above.complex.count(1), 3);
        assert_eq!(above.complex.simplices(2).to_vec(), vec![vec![0, 1, 2]]);
        assert!((above.radii(2)[0] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_square_filtration_order() {
        // Square: sides 1, diagonals sqrt(2)
        let s2 = 2.0_f64.sqrt();
        let dm = array![
            [0.0, 1.0, s2,  1.0],
            [1.0, 0.0, 1.0, s2 ],
            [s2,  1.0, 0.0, 1.0],
            [1.0, s2,  1.0, 0.0]
        ];

        let cycle = VietorisRips::from_distance_matrix(dm.clone(), 1.2, 3).build().unwrap();
        assert_eq!(cycle.complex.count(1), 4);
        assert_eq!(cycle.complex.count(2), 0);

        let full = VietorisRips::from_distance_matrix(dm, 2.0, 3).build().unwrap();
        assert_eq!(full.complex.count(1), 6);
        assert_eq!(full.complex.count(2), 4);
        assert_eq!(full.complex.simplices(3).to_vec(), vec![vec![0, 1, 2, 3]]);

        // sides before diagonals
        assert_eq!(
            full.complex.simplices(1).to_vec(),
            vec![vec![0, 1], vec![0, 3], vec![1, 2], vec![2, 3], vec![0, 2], vec![1, 3]]
        );
        assert!(full.radii(1).windows(2).all(|w| w[0] <= w[1]));
        assert!(full.radii(2).iter().all(|&r| (r - s2).abs() < 1e-12));
    }

    #[test]
    fn test_from_config() {
        let dm = array![[0.0, 1.0], [1.0, 0.0]];
        let config = AlgebraConfig { max_radius: 1.5, max_dim: 1, ..AlgebraConfig::default() };
        let filtered = VietorisRips::from_config(dm.clone(), &config).unwrap().build().unwrap();
        assert_eq!(filtered.complex.dimension(), 1);
        assert_eq!(filtered.complex.count(1), 1);

        let config = AlgebraConfig { max_dim: 0, ..AlgebraConfig::default() };
        assert!(VietorisRips::from_config(dm, &config).is_err());
    }

    #[test]
    fn test_rejects_nan_radius() {
        let dm = array![[0.0, 1.0], [1.0, 0.0]];
        assert_eq!(
            VietorisRips::from_distance_matrix(dm, f64::NAN, 1).build().unwrap_err(),
            BarcodeError::InvalidConfig("max_radius must be a non-negative number")
        );

        let points = array![[0.0, 0.0], [3.0, 4.0]];
        assert!(VietorisRips::from_points(&points, -1.0, 1).build().is_err());
    }

    #[test]
    fn test_rejects_non_square_distances() {
        let dm = Array2::<f64>::zeros((2, 3));
        assert!(VietorisRips::from_distance_matrix(dm, 1.0, 1).build().is_err());
    }
}
