//! Lifetime Intervals
//!
//! A generator of a persistence module lives on the half-open interval
//! [birth, death) of filtration values. Intervals with birth >= death
//! describe nothing and are filtered out when a basis is built.

use crate::config::MAX_PRECISION;

/// Half-open lifetime interval [birth, death)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifetimeInterval {
    pub birth: f64,
    pub death: f64,
}

impl LifetimeInterval {
    pub fn new(birth: f64, death: f64) -> Self {
        Self { birth, death }
    }

    /// birth < death strictly
    pub fn is_well_defined(&self) -> bool {
        self.birth < self.death
    }

    /// Generator is alive at `rad`: birth <= rad < death
    pub fn is_alive_at(&self, rad: f64) -> bool {
        self.birth <= rad && rad < self.death
    }

    /// Endpoints rounded to `precision` decimal digits
    pub(crate) fn rounded(&self, precision: u32) -> (f64, f64) {
        (round_to(self.birth, precision), round_to(self.death, precision))
    }
}

impl From<(f64, f64)> for LifetimeInterval {
    fn from((birth, death): (f64, f64)) -> Self {
        Self::new(birth, death)
    }
}

impl From<[f64; 2]> for LifetimeInterval {
    fn from([birth, death]: [f64; 2]) -> Self {
        Self::new(birth, death)
    }
}

/// Round to `precision` decimal digits; infinite values pass through.
/// Precision is capped at `MAX_PRECISION`, beyond which f64 has no digits left.
pub(crate) fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * scale).round() / scale
}

/// Inverse of a permutation: `perm[inv[i]] == i`
pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; perm.len()];
    for (position, &index) in perm.iter().enumerate() {
        inverse[index] = position;
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_defined() {
        assert!(LifetimeInterval::new(0.0, 1.0).is_well_defined());
        assert!(LifetimeInterval::new(0.5, f64::INFINITY).is_well_defined());
        assert!(!LifetimeInterval::new(1.0, 1.0).is_well_defined());
        assert!(!LifetimeInterval::new(2.0, 1.0).is_well_defined());
    }

    #[test]
    fn test_half_open() {
        let bar = LifetimeInterval::from((1.0, 2.0));
        assert!(bar.is_alive_at(1.0));
        assert!(bar.is_alive_at(1.5));
        assert!(!bar.is_alive_at(2.0));
        assert!(!bar.is_alive_at(0.9));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(0.123456789, 3), 0.123);
        assert_eq!(round_to(1.00000001, 7), 1.0);
        assert_eq!(round_to(f64::INFINITY, 7), f64::INFINITY);
        assert_eq!(round_to(0.0, 400), 0.0);
        assert_eq!(round_to(0.25, u32::MAX), 0.25);

        let (b, d) = LifetimeInterval::from([0.30000000004, 0.7]).rounded(7);
        assert_eq!(b, 0.3);
        assert_eq!(d, 0.7);
    }

    #[test]
    fn test_invert_permutation() {
        let perm = vec![2, 3, 1, 0];
        let inverse = invert_permutation(&perm);
        assert_eq!(inverse, vec![3, 2, 0, 1]);

        let recovered: Vec<usize> = inverse.iter().map(|&i| perm[i]).collect();
        assert_eq!(recovered, vec![0, 1, 2, 3]);
    }
}
