//! Row-major index arithmetic for rectangular lattices.

use crate::error::LatticeError;
use crate::index::odometer_increment;
use smallvec::SmallVec;
use trellis_core::{coord_product, Coord, Generation};

// Example of the internal ordering for size = {2, 2, 3}, jumps = {6, 3, 1}:
//   0     1     2     3     4     5     6     7     8     9    10    11   flat
// (000) (001) (002) (010) (011) (012) (100) (101) (102) (110) (111) (112) index

/// Extents, jump counts and generation of a rectangular lattice.
///
/// `jumps[i]` is the number of flat slots skipped when index component `i`
/// is incremented by one: `jumps[D-1] = 1` and `jumps[i-1] = jumps[i] * size[i]`.
/// The flat offset of an index is `Σ index[i] * jumps[i]`.
///
/// A shape is cheap to clone. Neighbour iterators keep a copy so they can
/// compute offsets without borrowing the lattice, and compare generations
/// before resolving sites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LatticeShape {
    size: SmallVec<[u32; 4]>,
    jumps: SmallVec<[usize; 4]>,
    site_count: usize,
    generation: Generation,
}

impl LatticeShape {
    /// A `d`-dimensional shape with no sites, as held by a lattice before
    /// its first [`set_size`](crate::RectangularLattice::set_size).
    pub fn empty(d: usize) -> Result<Self, LatticeError> {
        if d == 0 {
            return Err(LatticeError::ZeroDimension);
        }
        let mut jumps: SmallVec<[usize; 4]> = SmallVec::from_elem(0, d);
        jumps[d - 1] = 1;
        Ok(Self {
            size: SmallVec::from_elem(0, d),
            jumps,
            site_count: 0,
            generation: Generation::INITIAL,
        })
    }

    /// A shape with the given extents, one generation past [`Generation::INITIAL`].
    ///
    /// Returns `Err(LatticeError::ZeroDimension)` for an empty size vector,
    /// `Err(LatticeError::EmptyAxis)` if any extent is zero, or
    /// `Err(LatticeError::SizeOverflow)` if the site count overflows `usize`.
    pub fn new(size: &[u32]) -> Result<Self, LatticeError> {
        Self::empty(size.len())?.resized(size)
    }

    /// A copy of this shape with new extents and the next generation.
    pub fn resized(&self, size: &[u32]) -> Result<Self, LatticeError> {
        self.check_len("size", size.len())?;
        if let Some(axis) = size.iter().position(|&n| n == 0) {
            return Err(LatticeError::EmptyAxis { axis });
        }
        let site_count = coord_product(size).ok_or_else(|| LatticeError::SizeOverflow {
            size: size.to_vec(),
        })?;
        if site_count > i32::MAX as usize {
            // Lattice indices and flat offsets are converted to i32 coordinates.
            return Err(LatticeError::SizeOverflow {
                size: size.to_vec(),
            });
        }

        let d = size.len();
        let mut jumps: SmallVec<[usize; 4]> = SmallVec::from_elem(1, d);
        for i in (1..d).rev() {
            jumps[i - 1] = jumps[i] * size[i] as usize;
        }

        Ok(Self {
            size: SmallVec::from_slice(size),
            jumps,
            site_count,
            generation: self.generation.next(),
        })
    }

    /// Number of dimensions.
    pub fn d(&self) -> usize {
        self.size.len()
    }

    /// Extent along each axis.
    pub fn size(&self) -> &[u32] {
        &self.size
    }

    /// Jump count for each axis.
    pub fn jumps(&self) -> &[usize] {
        &self.jumps
    }

    /// Total number of sites, `∏ size[i]`.
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    /// Rebuild generation this shape belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Flat offset of `index`.
    ///
    /// No bounds checking is performed: an out-of-range component yields an
    /// offset belonging to some other site, or one past the end of the site
    /// array. Use [`checked_array_index`](Self::checked_array_index) when the
    /// index is untrusted.
    #[inline]
    pub fn array_index(&self, index: &[i32]) -> usize {
        debug_assert_eq!(index.len(), self.d(), "index has wrong dimension");
        index
            .iter()
            .zip(&self.jumps)
            .fold(0usize, |acc, (&i, &jump)| {
                acc.wrapping_add((i as usize).wrapping_mul(jump))
            })
    }

    /// Flat offset of `index`, after verifying it lies inside the lattice.
    pub fn checked_array_index(&self, index: &[i32]) -> Result<usize, LatticeError> {
        self.check_index(index)?;
        Ok(self.array_index(index))
    }

    /// Lattice index of flat offset `flat`; inverse of [`array_index`](Self::array_index).
    ///
    /// Each component is recovered by successive integer division by the
    /// jump counts.
    pub fn lattice_index(&self, flat: usize) -> Coord {
        let mut rest = flat;
        self.jumps
            .iter()
            .map(|&jump| {
                let component = rest / jump;
                rest -= component * jump;
                component as i32
            })
            .collect()
    }

    /// `true` if `index` has the right dimension and every component is in range.
    pub fn contains(&self, index: &[i32]) -> bool {
        index.len() == self.d()
            && index
                .iter()
                .zip(&self.size)
                .all(|(&i, &n)| i >= 0 && (i as u32) < n)
    }

    /// `Ok(())` if [`contains`](Self::contains) holds, otherwise a descriptive error.
    pub fn check_index(&self, index: &[i32]) -> Result<(), LatticeError> {
        self.check_len("index", index.len())?;
        if self.contains(index) {
            Ok(())
        } else {
            Err(LatticeError::IndexOutOfBounds {
                index: SmallVec::from_slice(index),
                bounds: self.describe_bounds(),
            })
        }
    }

    /// `Ok(())` if an array of length `len` has one entry per dimension.
    pub fn check_len(&self, what: &'static str, len: usize) -> Result<(), LatticeError> {
        if len == self.d() {
            Ok(())
        } else {
            Err(LatticeError::DimensionMismatch {
                what,
                expected: self.d(),
                got: len,
            })
        }
    }

    /// Advance `index` to the next tuple in row-major order.
    ///
    /// Returns `false` once the last tuple has been passed.
    pub(crate) fn increment(&self, index: &mut [i32]) -> bool {
        odometer_increment(index, &self.size)
    }

    fn describe_bounds(&self) -> String {
        let parts: Vec<String> = self.size.iter().map(|n| format!("[0, {n})")).collect();
        parts.join(" x ")
    }
}
