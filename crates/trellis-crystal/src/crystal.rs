//! A primitive paired with a basis, and the bare Bravais lattice.

use crate::basis::Basis;
use crate::error::CrystalError;
use crate::primitive::Primitive;
use nalgebra::DVector;
use trellis_core::Coord;

/// An immutable pairing of one [`Primitive`] and one [`Basis`] of the same
/// dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Crystal {
    primitive: Primitive,
    basis: Basis,
}

impl Crystal {
    /// Pair `primitive` with `basis`. Their dimensions must agree.
    pub fn new(primitive: Primitive, basis: Basis) -> Result<Self, CrystalError> {
        if primitive.d() != basis.d() {
            return Err(CrystalError::DimensionMismatch {
                what: "basis",
                expected: primitive.d(),
                got: basis.d(),
            });
        }
        Ok(Self { primitive, basis })
    }

    /// Number of dimensions.
    pub fn d(&self) -> usize {
        self.primitive.d()
    }

    /// The primitive vectors.
    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// The sites of one cell.
    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Split into primitive and basis.
    pub fn into_parts(self) -> (Primitive, Basis) {
        (self.primitive, self.basis)
    }
}

/// A crystal with one site per cell at the cell origin.
#[derive(Clone, Debug, PartialEq)]
pub struct BravaisLattice {
    primitive: Primitive,
}

impl BravaisLattice {
    /// The lattice generated by `primitive`.
    pub fn new(primitive: Primitive) -> Self {
        Self { primitive }
    }

    /// Number of dimensions.
    pub fn d(&self) -> usize {
        self.primitive.d()
    }

    /// The primitive vectors.
    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Mutable access for rescaling or reshaping the cell.
    pub fn primitive_mut(&mut self) -> &mut Primitive {
        &mut self.primitive
    }

    /// Position of site `index`: `Σ index[i] * a[i]`.
    pub fn site(&self, index: &[i32]) -> Result<DVector<f64>, CrystalError> {
        self.primitive.position(index)
    }

    /// Index of the site whose cell contains `position`.
    pub fn lattice_index(&self, position: &DVector<f64>) -> Result<Coord, CrystalError> {
        self.primitive.lattice_index(position)
    }
}

impl From<BravaisLattice> for Crystal {
    fn from(lattice: BravaisLattice) -> Self {
        Self {
            basis: Basis::origin(lattice.d()),
            primitive: lattice.primitive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn dimension_mismatch_rejected() {
        let p = Primitive::cubic(2, 1.0).unwrap();
        assert_eq!(
            Crystal::new(p, Basis::cubic_fcc()),
            Err(CrystalError::DimensionMismatch {
                what: "basis",
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn bravais_site_is_integer_combination() {
        let b = BravaisLattice::new(Primitive::hexagonal(2.0, 3.0).unwrap());
        let pos = b.site(&[1, 1, -1]).unwrap();
        assert_relative_eq!(
            pos,
            DVector::from_column_slice(&[1.0, 3f64.sqrt(), -3.0]),
            epsilon = 1e-12
        );
        assert_eq!(b.lattice_index(&pos).unwrap().as_slice(), &[1, 1, -1]);
    }

    #[test]
    fn bravais_into_monatomic_crystal() {
        let c: Crystal = BravaisLattice::new(Primitive::cubic(3, 1.0).unwrap()).into();
        assert_eq!(c.basis().site_count(), 1);
        assert_eq!(c.d(), 3);
    }
}
