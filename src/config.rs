//! Shared numeric settings for sorting, coefficients and Rips filtrations

use crate::error::{BarcodeError, Result};

/// Decimal digits used when comparing interval endpoints in `sort`
pub const DEFAULT_PRECISION: u32 = 7;

/// Largest meaningful rounding precision for f64 endpoints
pub const MAX_PRECISION: u32 = 15;

/// Configuration for barcode sorting and complex construction
#[derive(Debug, Clone)]
pub struct AlgebraConfig {
    /// Rounding precision (decimal digits) for endpoint ties
    pub precision: u32,
    /// Coefficient modulus, assumed prime
    pub prime: u64,
    /// Maximum filtration radius for Rips complexes
    pub max_radius: f64,
    /// Maximum simplex dimension for Rips complexes
    pub max_dim: usize,
}

impl Default for AlgebraConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            prime: 2,
            max_radius: 1.0,
            max_dim: 2,
        }
    }
}

impl AlgebraConfig {
    /// Configuration for coefficients in Z/p
    pub fn with_prime(prime: u64) -> Self {
        Self {
            prime,
            ..Self::default()
        }
    }

    /// Check the settings before they reach any computation.
    ///
    /// Primality of `prime` is not tested; only `prime >= 2` is enforced.
    pub fn validate(&self) -> Result<()> {
        if self.prime < 2 {
            return Err(BarcodeError::InvalidPrime(self.prime));
        }
        if self.precision > MAX_PRECISION {
            return Err(BarcodeError::InvalidConfig("precision above 15 decimal digits"));
        }
        if self.max_radius.is_nan() || self.max_radius < 0.0 {
            return Err(BarcodeError::InvalidConfig("max_radius must be a non-negative number"));
        }
        if self.max_dim == 0 {
            return Err(BarcodeError::InvalidConfig("max_dim must be at least 1"));
        }
        Ok(())
    }
}
