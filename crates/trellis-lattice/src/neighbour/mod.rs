//! Neighbour enumeration over a [`RectangularLattice`](crate::RectangularLattice).
//!
//! [`SquareNeighbourIterator`] lists every site inside an axis-aligned box
//! around a central site, wrapping across periodic edges and recording the
//! periodic image each neighbour was reached through.

mod image;
mod square;

pub use image::MAX_IMAGE_AXES;
pub use square::SquareNeighbourIterator;

/// One entry of a neighbour list.
///
/// `flat` addresses the site in the lattice's flat array. `image` is the
/// base-3 image code of the wrap taken on each axis; decode it with
/// [`SquareNeighbourIterator::image_shift`] or turn it into a displacement
/// with [`SquareNeighbourIterator::nearest_image_vector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Neighbour {
    /// Flat offset of the neighbouring site.
    pub flat: usize,
    /// Packed per-axis image shifts.
    pub image: u64,
}
