//! Simplicial Differentials mod p
//!
//! For a complex C the d-th differential maps d-simplices to their
//! (d-1)-faces with alternating signs:
//!
//!   ∂[v₀, ..., v_d] = Σₖ (-1)ᵏ [v₀, ..., v̂ₖ, ..., v_d]
//!
//! Edges use the opposite orientation, ∂[u, v] = u - v. Flipping the
//! sign of ∂₁ globally keeps ∂₁∂₂ = 0, so every pair of consecutive
//! matrices still composes to zero mod p.
//!
//! Entries are stored as representatives in [0, p). Each dimension is
//! independent of the others and is built in parallel.

use std::collections::HashMap;

use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

use super::complex::SimplicialComplex;
use crate::config::AlgebraConfig;
use crate::error::{BarcodeError, Result};

/// Boundary matrices of a complex with coefficients in Z/p
#[derive(Debug, Clone)]
pub struct Differentials {
    n_vertices: usize,
    prime: u64,
    /// boundaries[d - 1] is |C[d-1]| × |C[d]|
    boundaries: Vec<Array2<i64>>,
}

impl Differentials {
    pub fn n_vertices(&self) -> usize {
        self.n_vertices
    }

    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Highest dimension with a differential
    pub fn dimension(&self) -> usize {
        self.boundaries.len()
    }

    /// Differential from d-chains to (d-1)-chains, d >= 1
    pub fn boundary(&self, d: usize) -> Option<&Array2<i64>> {
        d.checked_sub(1).and_then(|i| self.boundaries.get(i))
    }

    /// ∂_{d-1} ∂_d ≡ 0 (mod p) for every d
    pub fn is_chain_complex(&self) -> bool {
        self.boundaries
            .windows(2)
            .all(|pair| compose_mod(&pair[0], &pair[1], self.prime).iter().all(|&x| x == 0))
    }
}

/// Product `a · b` reduced to [0, p).
///
/// Every product and every partial sum is reduced mod p in i128, so any
/// modulus up to `i64::MAX` is safe. Panics if the inner dimensions
/// differ, as `dot` does.
pub fn compose_mod(a: &Array2<i64>, b: &Array2<i64>, p: u64) -> Array2<i64> {
    assert_eq!(a.ncols(), b.nrows(), "inner dimensions must agree");
    let p = i128::from(p);
    Array2::from_shape_fn((a.nrows(), b.ncols()), |(i, j)| {
        let residue = a
            .row(i)
            .iter()
            .zip(b.column(j))
            .fold(0i128, |acc, (&x, &y)| {
                (acc + (i128::from(x) * i128::from(y)).rem_euclid(p)) % p
            });
        // residue lies in [0, p) and p <= i64::MAX
        residue as i64
    })
}

/// Boundary matrices of `complex` mod `p`.
///
/// `p` is assumed prime; only `p >= 2` is checked.
pub fn complex_differentials(complex: &SimplicialComplex, p: u64) -> Result<Differentials> {
    let modulus = i64::try_from(p)
        .ok()
        .filter(|&m| m >= 2)
        .ok_or(BarcodeError::InvalidPrime(p))?;

    let boundaries: Vec<Array2<i64>> = (1..=complex.dimension())
        .into_par_iter()
        .map(|d| boundary_matrix(complex, d, modulus))
        .collect();

    debug!(
        dimension = boundaries.len(),
        prime = p,
        "built simplicial differentials"
    );

    Ok(Differentials {
        n_vertices: complex.n_vertices(),
        prime: p,
        boundaries,
    })
}

/// `complex_differentials` with the configured prime
pub fn complex_differentials_with(
    complex: &SimplicialComplex,
    config: &AlgebraConfig,
) -> Result<Differentials> {
    config.validate()?;
    complex_differentials(complex, config.prime)
}

fn boundary_matrix(complex: &SimplicialComplex, d: usize, p: i64) -> Array2<i64> {
    let simplices = complex.simplices(d);
    let minus_one = p - 1;

    if d == 1 {
        let mut matrix = Array2::zeros((complex.n_vertices(), simplices.len()));
        for (i, edge) in simplices.iter().enumerate() {
            matrix[[edge[0], i]] = 1;
            matrix[[edge[1], i]] = minus_one;
        }
        return matrix;
    }

    let faces = complex.simplices(d - 1);
    let face_index: HashMap<&[usize], usize> = faces
        .iter()
        .enumerate()
        .map(|(j, face)| (face.as_slice(), j))
        .collect();

    let mut matrix = Array2::zeros((faces.len(), simplices.len()));
    let mut face = Vec::with_capacity(d);
    for (i, simplex) in simplices.iter().enumerate() {
        // dropping the vertex at position k gives sign (-1)^k
        for k in 0..simplex.len() {
            face.clear();
            face.extend_from_slice(&simplex[..k]);
            face.extend_from_slice(&simplex[k + 1..]);
            if let Some(&j) = face_index.get(face.as_slice()) {
                matrix[[j, i]] = if k % 2 == 0 { 1 } else { minus_one };
            }
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::VietorisRips;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn triangle() -> SimplicialComplex {
        SimplicialComplex::new(
            3,
            vec![vec![vec![0, 1], vec![0, 2], vec![1, 2]], vec![vec![0, 1, 2]]],
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_boundaries() {
        let diff = complex_differentials(&triangle(), 5).unwrap();
        assert_eq!(diff.dimension(), 2);
        assert_eq!(diff.n_vertices(), 3);

        let d1 = diff.boundary(1).unwrap();
        assert_eq!(d1, &array![[1, 1, 0], [4, 0, 1], [0, 4, 4]]);

        let d2 = diff.boundary(2).unwrap();
        assert_eq!(d2, &array![[1], [4], [1]]);

        assert_eq!(compose_mod(d1, d2, 5), Array2::<i64>::zeros((3, 1)));
        assert!(diff.is_chain_complex());
        assert!(diff.boundary(0).is_none());
        assert!(diff.boundary(3).is_none());
    }

    #[test]
    fn test_mod_two_signs_collapse() {
        let diff = complex_differentials(&triangle(), 2).unwrap();
        assert_eq!(diff.boundary(1).unwrap(), &array![[1, 1, 0], [1, 0, 1], [0, 1, 1]]);
        assert_eq!(diff.boundary(2).unwrap(), &array![[1], [1], [1]]);
        assert!(diff.is_chain_complex());
    }

    #[test]
    fn test_rips_complex_is_chain_complex() {
        let points = array![
            [1.91580552, 0.57418571],
            [-0.72993636, 1.86203999],
            [1.97700111, 0.30243449],
            [1.99699445, 0.10960461],
            [-1.58839255, 1.21532264]
        ];
        let filtered = VietorisRips::from_points(&points, 3.0, 4).build().unwrap();
        let diff = complex_differentials(&filtered.complex, 5).unwrap();

        assert_eq!(diff.dimension(), 4);
        for d in 2..=4 {
            let lower = diff.boundary(d - 1).unwrap();
            let upper = diff.boundary(d).unwrap();
            assert_eq!(lower.ncols(), upper.nrows());
            assert_eq!(upper.ncols(), filtered.complex.count(d));
            let composite = compose_mod(lower, upper, 5);
            assert!(composite.iter().all(|&x| x == 0), "d{} d{} != 0", d - 1, d);
        }
        // every 2-simplex has three faces
        let d2 = diff.boundary(2).unwrap();
        for column in d2.columns() {
            assert_eq!(column.iter().filter(|&&x| x != 0).count(), 3);
        }
    }

    #[test]
    fn test_random_clouds_are_chain_complexes() {
        let mut rng = StdRng::seed_from_u64(17);
        let normal = Normal::new(0.0, 1.0).unwrap();

        for &p in &[2u64, 3, 5, 7, 11] {
            let points = Array2::from_shape_fn((8, 3), |_| normal.sample(&mut rng));
            let filtered = VietorisRips::from_points(&points, 2.0, 3).build().unwrap();
            let diff = complex_differentials(&filtered.complex, p).unwrap();
            assert!(diff.is_chain_complex(), "p = {}", p);
            assert!(diff.boundary(1).unwrap().iter().all(|&x| x >= 0 && (x as u64) < p));
        }
    }

    #[test]
    fn test_compose_mod_large_prime() {
        // largest prime below 2^63; (p-1)^2 summed three times exceeds i128
        let p: u64 = 9_223_372_036_854_775_783;
        let m = (p - 1) as i64;
        let a = Array2::from_elem((1, 3), m);
        let b = Array2::from_elem((3, 1), m);
        // (p-1)^2 ≡ 1, three terms
        assert_eq!(compose_mod(&a, &b, p), array![[3]]);

        let diff = complex_differentials(&triangle(), p).unwrap();
        assert_eq!(diff.boundary(1).unwrap()[[1, 0]], m);
        assert!(diff.is_chain_complex());
    }

    #[test]
    fn test_empty_skeleta() {
        let complex = SimplicialComplex::new(2, vec![vec![], vec![]]).unwrap();
        let diff = complex_differentials(&complex, 3).unwrap();
        assert_eq!(diff.boundary(1).unwrap().dim(), (2, 0));
        assert_eq!(diff.boundary(2).unwrap().dim(), (0, 0));
        assert!(diff.is_chain_complex());
    }

    #[test]
    fn test_invalid_prime() {
        assert_eq!(
            complex_differentials(&triangle(), 1).unwrap_err(),
            BarcodeError::InvalidPrime(1)
        );
        assert!(complex_differentials(&triangle(), u64::MAX).is_err());
        assert!(complex_differentials_with(&triangle(), &AlgebraConfig::with_prime(0)).is_err());

        let diff = complex_differentials_with(&triangle(), &AlgebraConfig::with_prime(3)).unwrap();
        assert_eq!(diff.prime(), 3);
    }
}
