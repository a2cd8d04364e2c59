//! Neighbour-list configuration.

use crate::edge::EdgeBehavior;
use crate::error::LatticeError;
use smallvec::SmallVec;
use trellis_core::Direction;

// ── NeighbourConfig ────────────────────────────────────────────────

/// Everything a [`SquareNeighbourIterator`](crate::SquareNeighbourIterator)
/// needs besides the lattice and the central site.
///
/// Applied in one validated step with
/// [`configure`](crate::SquareNeighbourIterator::configure).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeighbourConfig {
    /// Box half-width per axis. Must have one entry per lattice dimension.
    pub range: Vec<i32>,
    /// Which half of the box to list. Default: [`Direction::Both`].
    pub direction: Direction,
    /// Edge behaviour per axis. `None` = wrap on every axis.
    pub edges: Option<Vec<EdgeBehavior>>,
    /// Period per axis for nearest-image vectors. `None` = `1.0` on every axis.
    pub period: Option<Vec<f64>>,
}

impl NeighbourConfig {
    /// A fully periodic configuration with the same half-width `r` on each
    /// of `d` axes.
    pub fn cubic(d: usize, r: i32) -> Self {
        Self {
            range: vec![r; d],
            ..Self::default()
        }
    }

    /// Check the parts that do not depend on a lattice.
    ///
    /// Lattice-dependent limits (range against size, array lengths against
    /// dimension) are checked when the config is applied.
    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.range.is_empty() {
            return Err(LatticeError::ZeroDimension);
        }
        if let Some((axis, &range)) = self.range.iter().enumerate().find(|(_, r)| **r < 0) {
            return Err(LatticeError::NegativeRange { axis, range });
        }
        if let Some(period) = &self.period {
            if let Some((axis, &value)) = period
                .iter()
                .enumerate()
                .find(|(_, p)| !p.is_finite() || **p <= 0.0)
            {
                return Err(LatticeError::InvalidPeriod { axis, value });
            }
        }
        Ok(())
    }

    pub(crate) fn edges_for(&self, d: usize) -> SmallVec<[EdgeBehavior; 4]> {
        match &self.edges {
            Some(edges) => SmallVec::from_slice(edges),
            None => SmallVec::from_elem(EdgeBehavior::Wrap, d),
        }
    }

    pub(crate) fn period_for(&self, d: usize) -> SmallVec<[f64; 4]> {
        match &self.period {
            Some(period) => SmallVec::from_slice(period),
            None => SmallVec::from_elem(1.0, d),
        }
    }
}
