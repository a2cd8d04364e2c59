//! Error types for lattice construction and neighbour configuration.

use std::fmt;
use trellis_core::{Coord, Generation};

/// Errors arising from lattice construction, indexing or neighbour-list
/// configuration.
///
/// Every variant describes a caller programming error. They are reported
/// by the call that introduced the inconsistency and are never retried.
#[derive(Clone, Debug, PartialEq)]
pub enum LatticeError {
    /// An array argument does not have one entry per lattice dimension.
    DimensionMismatch {
        /// What was being configured.
        what: &'static str,
        /// Dimension of the lattice or iterator.
        expected: usize,
        /// Length of the array that was passed.
        got: usize,
    },
    /// A lattice must have at least one dimension.
    ZeroDimension,
    /// A size vector contains a zero extent.
    EmptyAxis {
        /// The offending axis.
        axis: usize,
    },
    /// The total site count does not fit in `usize`.
    SizeOverflow {
        /// The requested size vector.
        size: Vec<u32>,
    },
    /// A neighbour half-range component is negative.
    NegativeRange {
        /// The offending axis.
        axis: usize,
        /// The requested half-range.
        range: i32,
    },
    /// A neighbour box is wider than the lattice along some axis.
    RangeTooLarge {
        /// The offending axis.
        axis: usize,
        /// The requested half-range.
        range: i32,
        /// Extent of the lattice along `axis`.
        size: u32,
    },
    /// An index lies outside the lattice.
    IndexOutOfBounds {
        /// The offending index.
        index: Coord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A neighbour iterator was reset before its central site was set.
    NotConfigured {
        /// What is missing.
        reason: &'static str,
    },
    /// A neighbour iterator was used with a lattice that has been rebuilt
    /// since the iterator was synced.
    StaleLattice {
        /// Generation the iterator was synced with.
        synced: Generation,
        /// Current generation of the lattice.
        current: Generation,
    },
    /// Bit-packed per-axis state (periodic image codes, reflection
    /// masks) cannot represent this many axes.
    TooManyAxes {
        /// Requested dimension.
        d: usize,
        /// Largest supported dimension.
        max: usize,
    },
    /// A periodic image length is not finite and positive.
    InvalidPeriod {
        /// The offending axis.
        axis: usize,
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch {
                what,
                expected,
                got,
            } => {
                write!(f, "{what}: expected {expected} components, got {got}")
            }
            Self::ZeroDimension => write!(f, "lattice dimension must be at least 1"),
            Self::EmptyAxis { axis } => write!(f, "lattice size along axis {axis} is zero"),
            Self::SizeOverflow { size } => {
                write!(f, "lattice size {size:?} overflows the site count")
            }
            Self::NegativeRange { axis, range } => {
                write!(f, "neighbour range {range} on axis {axis} is negative")
            }
            Self::RangeTooLarge { axis, range, size } => write!(
                f,
                "neighbour range {range} on axis {axis} needs {} sites but the lattice has {size}",
                2 * i64::from(*range) + 1
            ),
            Self::IndexOutOfBounds { index, bounds } => {
                write!(f, "index {index:?} out of bounds: {bounds}")
            }
            Self::NotConfigured { reason } => write!(f, "neighbour iterator not configured: {reason}"),
            Self::StaleLattice { synced, current } => write!(
                f,
                "lattice was rebuilt (generation {current}) after the iterator synced (generation {synced})"
            ),
            Self::TooManyAxes { d, max } => {
                write!(f, "at most {max} axes supported, got {d}")
            }
            Self::InvalidPeriod { axis, value } => {
                write!(f, "period {value} on axis {axis} must be finite and positive")
            }
        }
    }
}

impl std::error::Error for LatticeError {}

