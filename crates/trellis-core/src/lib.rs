//! Core types for the Trellis lattice framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the small vocabulary shared by every other crate in the workspace:
//! the [`Coord`] index tuple, the [`Generation`] stamp used to detect
//! stale lattice views, and the neighbour-list [`Direction`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod id;

pub use direction::Direction;
pub use id::{coord_product, Coord, Generation};
