//! Site payloads for lattice tests.

use trellis_core::Coord;

/// A site that remembers where it was built.
///
/// Lets tests check that a lattice hands out the site whose index and flat
/// offset match the lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexSite {
    pub index: Coord,
    pub flat: usize,
}

impl IndexSite {
    pub fn new(index: &[i32], flat: usize) -> Self {
        Self {
            index: index.iter().copied().collect(),
            flat,
        }
    }
}
