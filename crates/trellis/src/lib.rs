//! Trellis: N-dimensional lattice indexing, periodic neighbour lists and
//! crystal structures.
//!
//! This is the facade crate that re-exports the public API of the Trellis
//! sub-crates. Adding `trellis` as a single dependency is enough for most
//! users.
//!
//! # Quick start
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! // A 6×6×6 lattice whose sites remember their flat offset.
//! let mut lattice = RectangularLattice::new(3, |shape: &LatticeShape, idx: &[i32]| {
//!     shape.array_index(idx)
//! })
//! .unwrap();
//! lattice.set_size(&[6, 6, 6]).unwrap();
//!
//! // Every site within one step along each axis, wrapping at the edges.
//! let mut neighbours = SquareNeighbourIterator::new(&lattice).unwrap();
//! neighbours.configure(&NeighbourConfig::cubic(3, 1)).unwrap();
//! neighbours.set_site(&[0, 0, 0]).unwrap();
//! neighbours.reset().unwrap();
//! assert_eq!(neighbours.neighbour_count(), 26);
//!
//! // Positions of an FCC crystal with cube edge 1.
//! let fcc = CrystalKind::Fcc.build(1.0, None).unwrap();
//! assert_eq!(fcc.site(&[0, 1, 0, 1]).unwrap().as_slice(), &[0.0, 1.5, 0.5]);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `trellis-core` | Index tuples, generations, directions |
//! | [`lattice`] | `trellis-lattice` | Index iterators, rectangular lattices, neighbour iteration |
//! | [`crystal`] | `trellis-crystal` | Primitives, bases, crystals and crystal blocks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Index tuples, generation stamps and directions (`trellis-core`).
pub use trellis_core as types;

/// Rectangular lattices and neighbour enumeration (`trellis-lattice`).
///
/// Provides [`lattice::RectangularLattice`], the
/// [`lattice::SquareNeighbourIterator`] and the index iterators in
/// [`lattice::index`].
pub use trellis_lattice as lattice;

/// Crystal structures (`trellis-crystal`).
///
/// [`crystal::Primitive`] and [`crystal::Basis`] describe one cell;
/// [`crystal::LatticeCrystal`] and [`crystal::CrystalBlock`] resolve
/// positions.
pub use trellis_crystal as crystal;

/// Common imports for typical Trellis usage.
///
/// ```rust
/// use trellis::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use trellis_core::{Coord, Direction, Generation};

    // Lattices and neighbours
    pub use trellis_lattice::{
        EdgeBehavior, IndexIterator, IndexIteratorRectangular, IndexIteratorTriangular,
        LatticeShape, Neighbour, NeighbourConfig, RectangularLattice, SquareNeighbourIterator,
    };

    // Crystals
    pub use trellis_crystal::{
        Basis, BravaisLattice, Crystal, CrystalBlock, CrystalConfig, CrystalKind, LatticeCrystal,
        Primitive, PrimitiveKind,
    };

    // Errors
    pub use trellis_crystal::CrystalError;
    pub use trellis_lattice::LatticeError;
}
