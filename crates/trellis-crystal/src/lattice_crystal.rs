//! Resolution of `(cell, basis site)` indices to cartesian positions.

use crate::basis::Basis;
use crate::crystal::Crystal;
use crate::error::CrystalError;
use crate::primitive::Primitive;
use log::debug;
use nalgebra::DVector;

/// A [`Crystal`] addressed by `D + 1`-component indices: the first `D`
/// components pick a cell, the last picks a basis site within it.
///
/// The cartesian offset of every basis site is cached. Replacing the
/// primitive or the basis recomputes all of them; a failed update leaves
/// the crystal untouched.
///
/// # Examples
///
/// ```
/// use trellis_crystal::{Basis, Crystal, LatticeCrystal, Primitive};
///
/// let crystal = Crystal::new(Primitive::cubic(3, 2.0).unwrap(), Basis::cubic_fcc()).unwrap();
/// let mut fcc = LatticeCrystal::new(crystal);
/// assert_eq!(fcc.site(&[1, 0, 0, 3]).unwrap().as_slice(), &[3.0, 1.0, 0.0]);
///
/// fcc.update_primitive(|p| p.scale(0.5)).unwrap();
/// assert_eq!(fcc.site(&[1, 0, 0, 3]).unwrap().as_slice(), &[1.5, 0.5, 0.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeCrystal {
    crystal: Crystal,
    offsets: Vec<DVector<f64>>,
}

impl LatticeCrystal {
    /// Resolve positions of `crystal`.
    pub fn new(crystal: Crystal) -> Self {
        let offsets = cartesian_offsets(crystal.primitive(), crystal.basis());
        Self { crystal, offsets }
    }

    /// Number of spatial dimensions; indices have one more component.
    pub fn d(&self) -> usize {
        self.crystal.d()
    }

    /// The underlying crystal.
    pub fn crystal(&self) -> &Crystal {
        &self.crystal
    }

    /// The primitive vectors.
    pub fn primitive(&self) -> &Primitive {
        self.crystal.primitive()
    }

    /// The basis.
    pub fn basis(&self) -> &Basis {
        self.crystal.basis()
    }

    /// Cartesian offset of each basis site from its cell origin.
    pub fn basis_offsets(&self) -> &[DVector<f64>] {
        &self.offsets
    }

    /// Position of basis site `index[D]` in cell `index[..D]`.
    pub fn site(&self, index: &[i32]) -> Result<DVector<f64>, CrystalError> {
        let d = self.d();
        if index.len() != d + 1 {
            return Err(CrystalError::DimensionMismatch {
                what: "crystal index",
                expected: d + 1,
                got: index.len(),
            });
        }
        let k = index[d];
        let offset = usize::try_from(k)
            .ok()
            .and_then(|k| self.offsets.get(k))
            .ok_or(CrystalError::BasisIndexOutOfRange {
                index: k,
                count: self.offsets.len(),
            })?;
        Ok(self.primitive().position(&index[..d])? + offset)
    }

    /// [`site`](Self::site) for an index already known to be valid.
    pub(crate) fn resolve(&self, index: &[i32]) -> DVector<f64> {
        let d = self.d();
        let cell = DVector::from_iterator(d, index[..d].iter().map(|&i| f64::from(i)));
        self.primitive().matrix() * cell + &self.offsets[index[d] as usize]
    }

    /// Mutate a copy of the primitive with `update` and adopt it on success.
    ///
    /// The dimension must not change. On any error the crystal is unchanged.
    pub fn update_primitive<F>(&mut self, update: F) -> Result<(), CrystalError>
    where
        F: FnOnce(&mut Primitive) -> Result<(), CrystalError>,
    {
        let mut primitive = self.primitive().clone();
        update(&mut primitive)?;
        self.set_primitive(primitive)
    }

    /// Replace the primitive, keeping the basis.
    pub fn set_primitive(&mut self, primitive: Primitive) -> Result<(), CrystalError> {
        let crystal = Crystal::new(primitive, self.basis().clone())?;
        self.adopt(crystal);
        Ok(())
    }

    /// Replace the basis, keeping the primitive.
    pub fn set_basis(&mut self, basis: Basis) -> Result<(), CrystalError> {
        let crystal = Crystal::new(self.primitive().clone(), basis)?;
        self.adopt(crystal);
        Ok(())
    }

    fn adopt(&mut self, crystal: Crystal) {
        self.offsets = cartesian_offsets(crystal.primitive(), crystal.basis());
        debug!(
            "recomputed {} basis offsets for {} primitive (volume {:.6})",
            self.offsets.len(),
            crystal.primitive().kind().name(),
            crystal.primitive().cell_volume()
        );
        self.crystal = crystal;
    }
}

impl From<Crystal> for LatticeCrystal {
    fn from(crystal: Crystal) -> Self {
        Self::new(crystal)
    }
}

fn cartesian_offsets(primitive: &Primitive, basis: &Basis) -> Vec<DVector<f64>> {
    basis
        .offsets()
        .iter()
        .map(|frac| primitive.matrix() * frac)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(xs: &[f64]) -> DVector<f64> {
        DVector::from_column_slice(xs)
    }

    fn cubic(basis: Basis, a: f64) -> LatticeCrystal {
        LatticeCrystal::new(Crystal::new(Primitive::cubic(3, a).unwrap(), basis).unwrap())
    }

    #[test]
    fn bcc_sites() {
        let c = cubic(Basis::cubic_bcc(), 2.0);
        assert_eq!(c.site(&[0, 0, 0, 0]).unwrap(), v(&[0.0, 0.0, 0.0]));
        assert_eq!(c.site(&[0, 0, 0, 1]).unwrap(), v(&[1.0, 1.0, 1.0]));
        assert_eq!(c.site(&[1, -1, 2, 1]).unwrap(), v(&[3.0, -1.0, 5.0]));
    }

    #[test]
    fn index_length_checked() {
        let c = cubic(Basis::cubic_bcc(), 1.0);
        assert!(matches!(
            c.site(&[0, 0, 0]),
            Err(CrystalError::DimensionMismatch { expected: 4, .. })
        ));
    }

    #[test]
    fn basis_index_checked() {
        let c = cubic(Basis::cubic_bcc(), 1.0);
        assert_eq!(
            c.site(&[0, 0, 0, 2]),
            Err(CrystalError::BasisIndexOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(
            c.site(&[0, 0, 0, -1]),
            Err(CrystalError::BasisIndexOutOfRange { index: -1, count: 2 })
        );
    }

    #[test]
    fn resolve_matches_site() {
        let c = cubic(Basis::diamond(), 3.5);
        for idx in [[0, 0, 0, 0], [1, 2, 3, 7], [-1, 0, 4, 5]] {
            assert_relative_eq!(c.resolve(&idx), c.site(&idx).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn failed_update_changes_nothing() {
        let mut c = cubic(Basis::cubic_fcc(), 1.0);
        let before = c.clone();
        let err = c.update_primitive(|p| {
            p.scale(2.0)?;
            p.set_angles(&[1.0])
        });
        assert!(err.is_err());
        assert_eq!(c, before);
    }

    #[test]
    fn dimension_change_rejected() {
        let mut c = cubic(Basis::cubic_fcc(), 1.0);
        assert!(matches!(
            c.update_primitive(|p| {
                *p = Primitive::cubic(2, 1.0)?;
                Ok(())
            }),
            Err(CrystalError::DimensionMismatch { .. })
        ));
        assert_eq!(c.d(), 3);
    }

    #[test]
    fn set_basis_recomputes_offsets() {
        let mut c = cubic(Basis::cubic_bcc(), 2.0);
        c.set_basis(Basis::cubic_fcc()).unwrap();
        assert_eq!(c.basis_offsets().len(), 4);
        assert_eq!(c.basis_offsets()[2], v(&[1.0, 0.0, 1.0]));
    }
}
