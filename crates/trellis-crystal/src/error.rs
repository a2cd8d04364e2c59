//! Error types for primitive, basis and crystal construction.

use std::error::Error;
use std::fmt;
use trellis_lattice::LatticeError;

/// Errors arising from building or mutating crystal descriptions.
#[derive(Clone, Debug, PartialEq)]
pub enum CrystalError {
    /// A vector or index does not match the dimension of the crystal.
    DimensionMismatch {
        /// What was being checked.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Length that was passed.
        got: usize,
    },
    /// A cell parameter violates the constraints of its symmetry.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The constraint it violates.
        reason: &'static str,
    },
    /// The primitive vectors are linearly dependent.
    SingularPrimitive,
    /// A basis index is past the end of the basis.
    BasisIndexOutOfRange {
        /// The requested basis index.
        index: i32,
        /// Number of basis sites.
        count: usize,
    },
    /// A lattice operation failed.
    Lattice(LatticeError),
}

impl fmt::Display for CrystalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                what,
                expected,
                got,
            } => write!(f, "{what}: expected dimension {expected}, got {got}"),
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid {name} = {value}: {reason}"),
            Self::SingularPrimitive => write!(f, "primitive vectors are linearly dependent"),
            Self::BasisIndexOutOfRange { index, count } => {
                write!(f, "basis index {index} out of range for {count} basis sites")
            }
            Self::Lattice(e) => write!(f, "lattice error: {e}"),
        }
    }
}

impl Error for CrystalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LatticeError> for CrystalError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}
