//! A finite block of crystal cells with cached positions.

use crate::basis::Basis;
use crate::error::CrystalError;
use crate::lattice_crystal::LatticeCrystal;
use crate::primitive::Primitive;
use log::debug;
use nalgebra::DVector;
use smallvec::SmallVec;
use trellis_lattice::{LatticeError, LatticeShape, RectangularLattice};

/// `cells[i]` cells per axis of a [`LatticeCrystal`], with every site
/// position stored in a `D + 1`-dimensional [`RectangularLattice`].
///
/// Changing the crystal or the block size marks the positions dirty. The
/// next call to [`positions`](Self::positions) rebuilds the whole lattice.
///
/// # Examples
///
/// ```
/// use trellis_crystal::{CrystalBlock, CrystalKind};
///
/// let crystal = CrystalKind::Fcc.build(1.0, None).unwrap();
/// let mut block = CrystalBlock::new(crystal, &[2, 2, 2]).unwrap();
/// assert_eq!(block.site_count(), 32);
///
/// let positions = block.positions().unwrap();
/// assert_eq!(positions.size(), &[2, 2, 2, 4]);
/// assert_eq!(positions.site(&[1, 0, 1, 2]).as_slice(), &[1.5, 0.0, 1.5]);
/// ```
#[derive(Debug)]
pub struct CrystalBlock {
    crystal: LatticeCrystal,
    cells: SmallVec<[u32; 4]>,
    positions: Option<RectangularLattice<DVector<f64>>>,
}

impl CrystalBlock {
    /// A block of `cells[i]` cells along each axis of `crystal`.
    pub fn new(crystal: LatticeCrystal, cells: &[u32]) -> Result<Self, CrystalError> {
        let cells = SmallVec::from_slice(cells);
        block_size(&crystal, &cells)?;
        Ok(Self {
            crystal,
            cells,
            positions: None,
        })
    }

    /// The crystal the block is cut from.
    pub fn crystal(&self) -> &LatticeCrystal {
        &self.crystal
    }

    /// Cells along each axis.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Number of sites: cells times basis sites.
    pub fn site_count(&self) -> usize {
        let cells: usize = self.cells.iter().map(|&n| n as usize).product();
        cells * self.crystal.basis().site_count()
    }

    /// `true` if the next [`positions`](Self::positions) call rebuilds.
    pub fn is_dirty(&self) -> bool {
        self.positions.is_none()
    }

    /// Change the number of cells per axis.
    pub fn set_cells(&mut self, cells: &[u32]) -> Result<(), CrystalError> {
        let cells = SmallVec::from_slice(cells);
        block_size(&self.crystal, &cells)?;
        self.cells = cells;
        self.positions = None;
        Ok(())
    }

    /// Mutate the primitive; see [`LatticeCrystal::update_primitive`].
    pub fn update_primitive<F>(&mut self, update: F) -> Result<(), CrystalError>
    where
        F: FnOnce(&mut Primitive) -> Result<(), CrystalError>,
    {
        self.crystal.update_primitive(update)?;
        self.positions = None;
        Ok(())
    }

    /// Replace the basis; see [`LatticeCrystal::set_basis`].
    pub fn set_basis(&mut self, basis: Basis) -> Result<(), CrystalError> {
        let mut crystal = self.crystal.clone();
        crystal.set_basis(basis)?;
        block_size(&crystal, &self.cells)?;
        self.crystal = crystal;
        self.positions = None;
        Ok(())
    }

    /// Positions of every site, indexed `[cell..., basis]`, rebuilt if dirty.
    pub fn positions(&mut self) -> Result<&RectangularLattice<DVector<f64>>, CrystalError> {
        let lattice = match self.positions.take() {
            Some(lattice) => lattice,
            None => self.build()?,
        };
        Ok(self.positions.insert(lattice))
    }

    /// Position of the site at `index`, checked against the block.
    pub fn position(&mut self, index: &[i32]) -> Result<&DVector<f64>, CrystalError> {
        Ok(self.positions()?.site_checked(index)?)
    }

    fn build(&self) -> Result<RectangularLattice<DVector<f64>>, CrystalError> {
        let size = block_size(&self.crystal, &self.cells)?;
        let crystal = self.crystal.clone();
        let mut lattice =
            RectangularLattice::new(size.len(), move |_: &LatticeShape, idx: &[i32]| {
                crystal.resolve(idx)
            })?;
        lattice.set_size(&size)?;
        debug!(
            "built crystal block {:?}: {} positions",
            self.cells.as_slice(),
            lattice.site_count()
        );
        Ok(lattice)
    }
}

/// Size vector of the position lattice, validated against `crystal`.
fn block_size(crystal: &LatticeCrystal, cells: &[u32]) -> Result<SmallVec<[u32; 4]>, CrystalError> {
    if cells.len() != crystal.d() {
        return Err(CrystalError::DimensionMismatch {
            what: "cells",
            expected: crystal.d(),
            got: cells.len(),
        });
    }
    let sites = crystal.basis().site_count();
    let per_cell = u32::try_from(sites).map_err(|_| LatticeError::SizeOverflow {
        size: cells.to_vec(),
    })?;
    let mut size: SmallVec<[u32; 4]> = SmallVec::from_slice(cells);
    size.push(per_cell);
    LatticeShape::new(&size)?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrystalKind;
    use approx::assert_relative_eq;

    fn fcc_block(cells: &[u32]) -> CrystalBlock {
        CrystalBlock::new(CrystalKind::Fcc.build(2.0, None).unwrap(), cells).unwrap()
    }

    #[test]
    fn positions_cover_every_site() {
        let mut block = fcc_block(&[2, 3, 1]);
        assert!(block.is_dirty());
        let positions = block.positions().unwrap();
        assert_eq!(positions.site_count(), 2 * 3 * 4);
        assert!(!block.is_dirty());
    }

    #[test]
    fn invalid_cells_rejected() {
        let crystal = CrystalKind::Bcc.build(1.0, None).unwrap();
        assert!(matches!(
            CrystalBlock::new(crystal.clone(), &[2, 2]),
            Err(CrystalError::DimensionMismatch { .. })
        ));
        assert_eq!(
            CrystalBlock::new(crystal, &[2, 0, 2]).unwrap_err(),
            CrystalError::Lattice(LatticeError::EmptyAxis { axis: 1 })
        );
    }

    #[test]
    fn rescale_marks_dirty_and_rebuilds() {
        let mut block = fcc_block(&[2, 2, 2]);
        let before = block.position(&[1, 1, 0, 1]).unwrap().clone();
        block.update_primitive(|p| p.scale(1.5)).unwrap();
        assert!(block.is_dirty());
        let after = block.position(&[1, 1, 0, 1]).unwrap().clone();
        assert_relative_eq!(after, before * 1.5, epsilon = 1e-12);
    }

    #[test]
    fn failed_update_keeps_cache() {
        let mut block = fcc_block(&[1, 1, 1]);
        block.positions().unwrap();
        assert!(block.update_primitive(|p| p.scale(-1.0)).is_err());
        assert!(!block.is_dirty());
    }

    #[test]
    fn out_of_block_index_rejected() {
        let mut block = fcc_block(&[1, 1, 1]);
        assert!(matches!(
            block.position(&[1, 0, 0, 0]),
            Err(CrystalError::Lattice(LatticeError::IndexOutOfBounds { .. }))
        ));
    }

    #[test]
    fn set_basis_and_cells_resize_the_block() {
        let mut block = fcc_block(&[1, 1, 1]);
        block.set_basis(Basis::diamond()).unwrap();
        block.set_cells(&[2, 1, 1]).unwrap();
        assert_eq!(block.positions().unwrap().size(), &[2, 1, 1, 8]);
        assert_eq!(block.site_count(), 16);
    }
}
