//! Fractional sub-site offsets within one primitive cell.

use crate::error::CrystalError;
use nalgebra::DVector;
use trellis_lattice::{IndexIteratorRectangular, LatticeError};

/// Ordered list of fractional coordinates, in units of the primitive
/// vectors, of the sites inside one cell. The length is fixed once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Basis {
    offsets: Vec<DVector<f64>>,
}

impl Basis {
    /// A basis from explicit fractional offsets.
    ///
    /// Needs at least one offset; all offsets must share one dimension and
    /// be finite.
    pub fn new(offsets: Vec<DVector<f64>>) -> Result<Self, CrystalError> {
        let d = match offsets.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                return Err(CrystalError::DimensionMismatch {
                    what: "basis",
                    expected: 1,
                    got: 0,
                })
            }
        };
        for offset in &offsets {
            if offset.len() != d {
                return Err(CrystalError::DimensionMismatch {
                    what: "basis offset",
                    expected: d,
                    got: offset.len(),
                });
            }
            if let Some(&x) = offset.iter().find(|x| !x.is_finite()) {
                return Err(CrystalError::InvalidParameter {
                    name: "basis offset",
                    value: x,
                    reason: "must be finite",
                });
            }
        }
        Ok(Self { offsets })
    }

    /// A single site at the cell origin.
    pub fn monatomic(d: usize) -> Result<Self, CrystalError> {
        Self::new(vec![DVector::zeros(d)])
    }

    /// Two sites of the conventional BCC cube: `(0,0,0)`, `(½,½,½)`.
    pub fn cubic_bcc() -> Self {
        Self::fixed(&[[0.0, 0.0, 0.0], [0.5, 0.5, 0.5]])
    }

    /// Four sites of the conventional FCC cube:
    /// `(0,0,0)`, `(0,½,½)`, `(½,0,½)`, `(½,½,0)`.
    pub fn cubic_fcc() -> Self {
        Self::fixed(&FCC)
    }

    /// Two sites of the HCP cell on a 120° hexagonal primitive:
    /// `(0,0,0)`, `(⅓,⅔,½)`.
    pub fn hcp() -> Self {
        Self::fixed(&[[0.0, 0.0, 0.0], [1.0 / 3.0, 2.0 / 3.0, 0.5]])
    }

    /// Eight sites of the conventional diamond cube: the FCC sites and the
    /// same sites shifted by `(¼,¼,¼)`.
    pub fn diamond() -> Self {
        let shifted = FCC.map(|[x, y, z]| [x + 0.25, y + 0.25, z + 0.25]);
        let mut sites = FCC.to_vec();
        sites.extend_from_slice(&shifted);
        Self::fixed(&sites)
    }

    /// `basis` replicated over a block of `cells[i]` cells per axis, in the
    /// fractional units of the enlarged cell.
    ///
    /// Cells are taken in row-major order and each cell lists the sites of
    /// `basis` in order.
    pub fn big_cell(basis: &Basis, cells: &[u32]) -> Result<Self, CrystalError> {
        let d = basis.d();
        if cells.len() != d {
            return Err(CrystalError::DimensionMismatch {
                what: "cells",
                expected: d,
                got: cells.len(),
            });
        }
        if let Some(axis) = cells.iter().position(|&n| n == 0) {
            return Err(LatticeError::EmptyAxis { axis }.into());
        }
        let scale = DVector::from_iterator(d, cells.iter().map(|&n| f64::from(n)));
        let mut offsets = Vec::new();
        for cell in IndexIteratorRectangular::new(cells)? {
            let origin = DVector::from_iterator(d, cell.iter().map(|&i| f64::from(i)));
            for offset in &basis.offsets {
                offsets.push((&origin + offset).component_div(&scale));
            }
        }
        Self::new(offsets)
    }

    /// [`monatomic`](Self::monatomic) for a dimension known to be non-zero.
    pub(crate) fn origin(d: usize) -> Self {
        debug_assert!(d > 0);
        Self {
            offsets: vec![DVector::zeros(d)],
        }
    }

    fn fixed<const N: usize>(sites: &[[f64; N]]) -> Self {
        Self {
            offsets: sites
                .iter()
                .map(|s| DVector::from_column_slice(s))
                .collect(),
        }
    }

    /// Number of dimensions.
    pub fn d(&self) -> usize {
        self.offsets[0].len()
    }

    /// Number of sites per cell.
    pub fn site_count(&self) -> usize {
        self.offsets.len()
    }

    /// Fractional offset of site `k`, if any.
    pub fn offset(&self, k: usize) -> Option<&DVector<f64>> {
        self.offsets.get(k)
    }

    /// All fractional offsets.
    pub fn offsets(&self) -> &[DVector<f64>] {
        &self.offsets
    }
}

const FCC: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.5, 0.5],
    [0.5, 0.0, 0.5],
    [0.5, 0.5, 0.0],
];
