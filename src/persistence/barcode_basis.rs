//! Barcode Bases
//!
//! A barcode basis is an ordered basis of a filtered vector space in which
//! every generator carries a lifetime interval [birth, death). A basis can
//! be expressed in coordinates over a parent basis (one coordinate column
//! per generator) and can carry a "broken differential": a square matrix
//! used to fold the contribution of dying generators back into the
//! survivors while a spectral sequence is being computed.
//!
//! ## Structure
//!
//! ```text
//!            Lineage                      Repair
//!   ┌────────────────────────┐   ┌──────────────────────────┐
//!   │ Root                   │ × │ Intact                   │
//!   │ Derived{parent, coords}│   │ Broken{differential}     │
//!   └────────────────────────┘   └──────────────────────────┘
//!   coords: parent.dim × dim      differential: dim × dim
//! ```
//!
//! `sort` reorders intervals, coordinate columns and both axes of the
//! broken differential with one permutation, so the relation to the parent
//! and the self-map stay consistent.

use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayView1, Axis};
use tracing::{debug, trace};

use super::interval::LifetimeInterval;
use crate::config::AlgebraConfig;
use crate::error::{BarcodeError, Result};

/// Position of a basis relative to previously built bases
#[derive(Debug, Clone)]
pub enum Lineage {
    Root,
    /// Column i of `coordinates` expresses generator i in `parent`
    Derived {
        parent: Arc<BarcodeBasis>,
        coordinates: Array2<f64>,
    },
}

/// Broken-differential state of a basis
#[derive(Debug, Clone)]
pub enum Repair {
    Intact,
    Broken { differential: Array2<f64> },
}

/// Ordered set of lifetime intervals forming a basis
#[derive(Debug, Clone)]
pub struct BarcodeBasis {
    intervals: Vec<LifetimeInterval>,
    lineage: Lineage,
    repair: Repair,
    /// Survival mask over the input intervals, if requested
    well_defined: Option<Vec<bool>>,
    sorted: bool,
}

/// Builder collecting the optional parts of a basis before validation
#[derive(Debug, Clone)]
pub struct BarcodeBasisBuilder {
    intervals: Vec<LifetimeInterval>,
    parent: Option<(Arc<BarcodeBasis>, Array2<f64>)>,
    broken: Option<Array2<f64>>,
    store_well_defined: bool,
}

impl BarcodeBasisBuilder {
    /// Express the basis over `parent`; `coordinates` is
    /// parent.dim × (number of input intervals)
    pub fn parent(mut self, parent: Arc<BarcodeBasis>, coordinates: Array2<f64>) -> Self {
        self.parent = Some((parent, coordinates));
        self
    }

    /// Mark the basis as broken; `differential` must be dim × dim after
    /// ill-defined intervals are dropped
    pub fn broken(mut self, differential: Array2<f64>) -> Self {
        self.broken = Some(differential);
        self
    }

    /// Keep the survival mask of the input intervals
    pub fn store_well_defined(mut self) -> Self {
        self.store_well_defined = true;
        self
    }

    pub fn build(self) -> Result<BarcodeBasis> {
        let n_input = self.intervals.len();
        let mask: Vec<bool> = self.intervals.iter().map(|bar| bar.is_well_defined()).collect();
        let survivors: Vec<usize> = (0..n_input).filter(|&i| mask[i]).collect();
        let intervals: Vec<LifetimeInterval> =
            survivors.iter().map(|&i| self.intervals[i]).collect();
        let dim = intervals.len();

        if dim < n_input {
            debug!(dropped = n_input - dim, kept = dim, "dropped ill-defined intervals");
        }

        let lineage = match self.parent {
            None => Lineage::Root,
            Some((parent, coordinates)) => {
                if coordinates.nrows() != parent.dim() {
                    return Err(BarcodeError::ParentShapeMismatch {
                        rows: coordinates.nrows(),
                        parent_dim: parent.dim(),
                    });
                }
                if coordinates.ncols() != n_input {
                    return Err(BarcodeError::CoordinateCountMismatch {
                        intervals: n_input,
                        columns: coordinates.ncols(),
                    });
                }
                let coordinates = if dim < n_input {
                    coordinates.select(Axis(1), &survivors)
                } else {
                    coordinates
                };
                Lineage::Derived { parent, coordinates }
            }
        };

        let repair = match self.broken {
            None => Repair::Intact,
            Some(differential) => {
                let (rows, cols) = differential.dim();
                if rows != dim || cols != dim {
                    return Err(BarcodeError::MalformedBrokenDifferential { dim, rows, cols });
                }
                Repair::Broken { differential }
            }
        };

        Ok(BarcodeBasis {
            intervals,
            lineage,
            repair,
            well_defined: self.store_well_defined.then_some(mask),
            sorted: false,
        })
    }
}

impl BarcodeBasis {
    /// Root basis without broken differential
    pub fn new<I, T>(intervals: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<LifetimeInterval>,
    {
        let intervals = intervals
            .into_iter()
            .map(Into::into)
            .filter(LifetimeInterval::is_well_defined)
            .collect();
        Self {
            intervals,
            lineage: Lineage::Root,
            repair: Repair::Intact,
            well_defined: None,
            sorted: false,
        }
    }

    pub fn builder<I, T>(intervals: I) -> BarcodeBasisBuilder
    where
        I: IntoIterator<Item = T>,
        T: Into<LifetimeInterval>,
    {
        BarcodeBasisBuilder {
            intervals: intervals.into_iter().map(Into::into).collect(),
            parent: None,
            broken: None,
            store_well_defined: false,
        }
    }

    pub fn dim(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> &[LifetimeInterval] {
        &self.intervals
    }

    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    pub fn repair(&self) -> &Repair {
        &self.repair
    }

    pub fn parent(&self) -> Option<&Arc<BarcodeBasis>> {
        match &self.lineage {
            Lineage::Root => None,
            Lineage::Derived { parent, .. } => Some(parent),
        }
    }

    pub fn coordinates(&self) -> Option<&Array2<f64>> {
        match &self.lineage {
            Lineage::Root => None,
            Lineage::Derived { coordinates, .. } => Some(coordinates),
        }
    }

    pub fn broken_differential(&self) -> Option<&Array2<f64>> {
        match &self.repair {
            Repair::Intact => None,
            Repair::Broken { differential } => Some(differential),
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(self.repair, Repair::Broken { .. })
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Survival mask over the input intervals (only if requested at build).
    /// Indexes the input order and is not affected by `sort`.
    pub fn well_defined(&self) -> Option<&[bool]> {
        self.well_defined.as_deref()
    }

    /// Sort by ascending birth, ties by descending death, comparing
    /// endpoints rounded to `precision` decimals. Returns the permutation:
    /// position k of the sorted basis holds old generator `perm[k]`.
    /// Precision above `MAX_PRECISION` is treated as `MAX_PRECISION`.
    pub fn sort(&mut self, precision: u32) -> Vec<usize> {
        let keys: Vec<(f64, f64)> = self.intervals.iter().map(|bar| bar.rounded(precision)).collect();
        let mut order: Vec<usize> = (0..self.dim()).collect();
        order.sort_by(|&a, &b| {
            keys[a].0
                .total_cmp(&keys[b].0)
                .then(keys[b].1.total_cmp(&keys[a].1))
        });

        self.permute(&order);
        self.sorted = true;
        trace!(dim = self.dim(), precision, "sorted barcode basis");
        order
    }

    /// `sort` with the configured precision
    pub fn sort_with(&mut self, config: &AlgebraConfig) -> Vec<usize> {
        self.sort(config.precision)
    }

    // Every array indexed by generators is reordered here and nowhere else.
    fn permute(&mut self, order: &[usize]) {
        self.intervals = order.iter().map(|&i| self.intervals[i]).collect();

        if let Lineage::Derived { coordinates, .. } = &mut self.lineage {
            *coordinates = coordinates.select(Axis(1), order);
        }
        if let Repair::Broken { differential } = &mut self.repair {
            *differential = differential.select(Axis(0), order).select(Axis(1), order);
        }
    }

    /// Sorted, deduplicated birth and death values
    pub fn changes_list(&self) -> Vec<f64> {
        let mut changes: Vec<f64> = self
            .intervals
            .iter()
            .flat_map(|bar| [bar.birth, bar.death])
            .collect();
        changes.sort_by(f64::total_cmp);
        changes.dedup();
        changes
    }

    /// Indices of generators alive at `rad`
    pub fn active(&self, rad: f64) -> Result<Vec<usize>> {
        self.active_in(rad, 0, self.dim())
    }

    /// Active indices among generators `start..dim`, relative to `start`
    pub fn active_from(&self, rad: f64, start: usize) -> Result<Vec<usize>> {
        self.active_in(rad, start, self.dim())
    }

    /// Active indices among generators `start..end`, relative to `start`
    pub fn active_in(&self, rad: f64, start: usize, end: usize) -> Result<Vec<usize>> {
        let dim = self.dim();
        if start >= dim || end > dim || end < start {
            return Err(BarcodeError::Range { start, end, dim });
        }
        Ok(self.intervals[start..end]
            .iter()
            .enumerate()
            .filter(|(_, bar)| bar.is_alive_at(rad))
            .map(|(i, _)| i)
            .collect())
    }

    /// Indices of generators whose death equals `rad` exactly.
    ///
    /// No tolerance is applied: `rad` must be rounded the same way the
    /// barcode endpoints were.
    pub fn death(&self, rad: f64) -> Result<Vec<usize>> {
        self.death_from(rad, 0)
    }

    /// Dying indices among generators `start..dim`, relative to `start`
    pub fn death_from(&self, rad: f64, start: usize) -> Result<Vec<usize>> {
        let dim = self.dim();
        if start >= dim {
            return Err(BarcodeError::Range { start, end: dim, dim });
        }
        Ok(self.intervals[start..]
            .iter()
            .enumerate()
            .filter(|(_, bar)| bar.death == rad)
            .map(|(i, _)| i)
            .collect())
    }

    /// Scatter coordinates over the active generators at `rad` into a
    /// dense vector over the whole basis
    pub fn trans_active_coord(&self, coord: ArrayView1<f64>, rad: f64) -> Result<Array1<f64>> {
        self.trans_active_coord_from(coord, rad, 0)
    }

    /// As `trans_active_coord`, restricted to generators `start..dim`
    pub fn trans_active_coord_from(
        &self,
        coord: ArrayView1<f64>,
        rad: f64,
        start: usize,
    ) -> Result<Array1<f64>> {
        let active = self.active_from(rad, start)?;
        if coord.len() != active.len() {
            return Err(BarcodeError::LengthMismatch {
                what: "active coordinate vector",
                expected: active.len(),
                found: coord.len(),
            });
        }
        let mut dense = Array1::zeros(self.dim() - start);
        for (&index, &value) in active.iter().zip(coord.iter()) {
            dense[index] = value;
        }
        Ok(dense)
    }

    /// Earliest birth among generators with nonzero coordinate, NaN for zero
    pub fn birth_radius(&self, coord: ArrayView1<f64>) -> Result<f64> {
        Ok(self
            .support(coord)?
            .into_iter()
            .map(|i| self.intervals[i].birth)
            .fold(f64::NAN, f64::min))
    }

    /// Latest death among generators with nonzero coordinate, NaN for zero
    pub fn death_radius(&self, coord: ArrayView1<f64>) -> Result<f64> {
        Ok(self
            .support(coord)?
            .into_iter()
            .map(|i| self.intervals[i].death)
            .fold(f64::NAN, f64::max))
    }

    /// Indices of the nonzero entries of a coordinate vector over this basis
    fn support(&self, coord: ArrayView1<f64>) -> Result<Vec<usize>> {
        if coord.len() != self.dim() {
            return Err(BarcodeError::LengthMismatch {
                what: "coordinate vector",
                expected: self.dim(),
                found: coord.len(),
            });
        }
        Ok(coord
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != 0.0)
            .map(|(i, _)| i)
            .collect())
    }

    /// Sub-basis of the generators where `mask` is true.
    ///
    /// The result keeps the parent and the selected coordinate columns.
    /// A broken differential has no meaning on a sub-basis, so selecting
    /// from a broken basis is an error.
    pub fn bool_select(&self, mask: &[bool]) -> Result<BarcodeBasis> {
        if self.is_broken() {
            return Err(BarcodeError::Unsupported("bool_select on a broken basis"));
        }
        if mask.len() != self.dim() {
            return Err(BarcodeError::LengthMismatch {
                what: "selection mask",
                expected: self.dim(),
                found: mask.len(),
            });
        }
        let selected: Vec<usize> = (0..mask.len()).filter(|&i| mask[i]).collect();
        let lineage = match &self.lineage {
            Lineage::Root => Lineage::Root,
            Lineage::Derived { parent, coordinates } => Lineage::Derived {
                parent: Arc::clone(parent),
                coordinates: coordinates.select(Axis(1), &selected),
            },
        };
        Ok(BarcodeBasis {
            intervals: selected.iter().map(|&i| self.intervals[i]).collect(),
            lineage,
            repair: Repair::Intact,
            well_defined: None,
            // a subsequence of a sorted basis is sorted
            sorted: self.sorted,
        })
    }

    /// Coordinate columns of the generators active at `rad`
    pub fn active_domain(&self, rad: f64) -> Result<Array2<f64>> {
        let (_, coordinates) = self.derived("active_domain on a root basis")?;
        if self.dim() == 0 {
            return Ok(coordinates.clone());
        }
        Ok(coordinates.select(Axis(1), &self.active(rad)?))
    }

    /// Change-of-basis block between the active generators of this basis
    /// and the active generators of the parent at `rad`
    pub fn active_coordinates(&self, rad: f64) -> Result<Array2<f64>> {
        let (parent, _) = self.derived("active_coordinates on a root basis")?;
        let domain = self.active_domain(rad)?;
        if parent.dim() == 0 {
            return Ok(domain);
        }
        Ok(domain.select(Axis(0), &parent.active(rad)?))
    }

    fn derived(&self, operation: &'static str) -> Result<(&Arc<BarcodeBasis>, &Array2<f64>)> {
        match &self.lineage {
            Lineage::Root => Err(BarcodeError::Unsupported(operation)),
            Lineage::Derived { parent, coordinates } => Ok((parent, coordinates)),
        }
    }

    /// Fold the rows of generators dying at `rad` into the survivors using
    /// the broken differential.
    ///
    /// Columns of `a` are coordinate vectors over this basis. Every row gets
    /// `differential[:, dying] · a[dying, :]` added and the dying rows are
    /// cleared. Without dying generators `a` comes back unchanged.
    pub fn update_broken(&self, mut a: Array2<f64>, rad: f64) -> Result<Array2<f64>> {
        let differential = match &self.repair {
            Repair::Intact => return Err(BarcodeError::Unsupported("update_broken on an intact basis")),
            Repair::Broken { differential } => differential,
        };
        if a.nrows() != self.dim() {
            return Err(BarcodeError::LengthMismatch {
                what: "broken update matrix rows",
                expected: self.dim(),
                found: a.nrows(),
            });
        }
        if self.dim() == 0 {
            return Ok(a);
        }

        let dying = self.death(rad)?;
        if dying.is_empty() {
            return Ok(a);
        }
        debug!(rad, dying = dying.len(), "repairing broken differential");

        let update = differential
            .select(Axis(1), &dying)
            .dot(&a.select(Axis(0), &dying));
        for &row in &dying {
            a.row_mut(row).fill(0.0);
        }
        a += &update;
        Ok(a)
    }
}
