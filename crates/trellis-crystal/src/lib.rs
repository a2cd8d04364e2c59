//! Crystal structures for Trellis: primitive cells, bases and positions.
//!
//! A [`Primitive`] defines the `D` vectors of a Bravais lattice under one
//! of the symmetry families of [`PrimitiveKind`]. A [`Basis`] lists the
//! fractional positions of the sites inside one cell, and a [`Crystal`]
//! pairs the two. [`LatticeCrystal`] resolves `(cell, basis site)` indices
//! to cartesian positions, and [`CrystalBlock`] caches the positions of a
//! finite block of cells in a [`RectangularLattice`](trellis_lattice::RectangularLattice).
//!
//! The common structures (simple cubic, BCC, FCC, HCP, diamond) are
//! available through [`CrystalKind`] and [`CrystalConfig`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod basis;
pub mod block;
pub mod config;
pub mod crystal;
pub mod error;
pub mod lattice_crystal;
pub mod primitive;

pub use basis::Basis;
pub use block::CrystalBlock;
pub use config::{CrystalConfig, CrystalKind, IDEAL_HCP_C_OVER_A};
pub use crystal::{BravaisLattice, Crystal};
pub use error::CrystalError;
pub use lattice_crystal::LatticeCrystal;
pub use primitive::{Primitive, PrimitiveKind};
