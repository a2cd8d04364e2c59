//! Rectangular lattices and neighbour enumeration for Trellis.
//!
//! A [`RectangularLattice`] stores one site per `D`-dimensional index in a
//! flat row-major array and converts between lattice indices and flat
//! offsets through its [`LatticeShape`]. A [`SquareNeighbourIterator`]
//! lists the sites inside an axis-aligned box around a central site,
//! wrapping across periodic edges and recording minimum-image shifts.
//!
//! # Index iterators
//!
//! The [`index`] module provides lazy generators of integer tuples:
//! rectangular products, non-increasing (triangular) sequences, and
//! reflecting, permuting and shell-expanding variants.
//!
//! # Edges
//!
//! Each axis either wraps ([`EdgeBehavior::Wrap`]) or truncates the
//! neighbour box ([`EdgeBehavior::Absorb`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod edge;
pub mod error;
pub mod index;
pub mod lattice;
pub mod neighbour;
pub mod shape;

#[cfg(test)]
pub(crate) mod compliance;

pub use config::NeighbourConfig;
pub use edge::EdgeBehavior;
pub use error::LatticeError;
pub use index::{
    IndexIterator, IndexIteratorPermuting, IndexIteratorRectangular, IndexIteratorReflecting,
    IndexIteratorShell, IndexIteratorTriangular, MAX_REFLECT_AXES,
};
pub use lattice::{RectangularLattice, SiteFactory, Sites};
pub use neighbour::{Neighbour, SquareNeighbourIterator, MAX_IMAGE_AXES};
pub use shape::LatticeShape;
pub use trellis_core::{Coord, Direction, Generation};
