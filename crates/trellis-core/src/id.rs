//! Strongly-typed identifiers and the [`Coord`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Rebuild counter for a lattice.
///
/// Every lattice starts at [`Generation::INITIAL`] and advances by one each
/// time its site array is rebuilt. Views that cache flat offsets (neighbour
/// lists, position tables) record the generation they were computed against
/// and compare it before dereferencing anything.
///
/// The counter is owned by the lattice instance; there is no process-wide
/// allocator behind it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// Generation of a lattice that has never been sized.
    pub const INITIAL: Generation = Generation(0);

    /// The generation that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Generation {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A lattice index tuple: one integer per lattice dimension.
///
/// Uses `SmallVec<[i32; 4]>` to avoid heap allocation for lattices up to
/// four dimensions, which covers the 1D–3D cell lattices and the 4D
/// `(cell, basis)` indices of 3D crystals. Higher-dimensional tuples spill
/// to the heap transparently.
///
/// Components are signed so that the same type carries index offsets,
/// neighbour ranges and image shifts as well as plain indices.
pub type Coord = SmallVec<[i32; 4]>;

/// Product of the components of `extents`, or `None` on overflow.
///
/// The empty product is 1.
pub fn coord_product(extents: &[u32]) -> Option<usize> {
    extents
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n as usize))
}
