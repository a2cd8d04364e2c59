//! Lattice and neighbour-iterator compliance test helpers.
//!
//! Invariants every lattice layout and neighbour configuration must
//! satisfy. Reused by the unit tests of each module.

use crate::lattice::RectangularLattice;
use crate::neighbour::SquareNeighbourIterator;
use indexmap::IndexSet;
use trellis_core::{Coord, Direction};

/// Assert `array_index(lattice_index(k)) == k` for every flat offset.
pub fn assert_flat_round_trip<S>(lattice: &RectangularLattice<S>) {
    for k in 0..lattice.site_count() {
        let idx = lattice.lattice_index(k);
        assert!(lattice.shape().contains(&idx), "lattice_index({k}) = {idx:?} out of bounds");
        assert_eq!(lattice.array_index(&idx), k, "round trip failed for {idx:?}");
    }
}

/// Assert `iter()` visits `site_count` unique indices, last axis fastest.
pub fn assert_iteration_complete<S>(lattice: &RectangularLattice<S>) {
    let visited: IndexSet<Coord> = lattice.iter().map(|(idx, _)| idx).collect();
    assert_eq!(
        visited.len(),
        lattice.site_count(),
        "iter() visited duplicate or missing indices"
    );
    for (k, idx) in visited.iter().enumerate() {
        assert_eq!(lattice.array_index(idx), k, "iter() out of flat order at {idx:?}");
    }
}

/// Assert the site count is the product of the extents.
pub fn assert_site_count<S>(lattice: &RectangularLattice<S>) {
    let expected: usize = lattice.size().iter().map(|&n| n as usize).product();
    assert_eq!(lattice.site_count(), expected);
}

/// Run all lattice compliance checks.
pub fn run_lattice_compliance<S>(lattice: &RectangularLattice<S>) {
    assert_site_count(lattice);
    assert_flat_round_trip(lattice);
    assert_iteration_complete(lattice);
}

/// Assert the current neighbour list has no duplicates and omits the centre.
pub fn assert_neighbours_unique(it: &SquareNeighbourIterator) {
    let flats: IndexSet<usize> = it.neighbours().iter().map(|n| n.flat).collect();
    assert_eq!(flats.len(), it.neighbour_count(), "duplicate neighbours");
    if let Some(centre) = it.site() {
        let centre = it.shape().array_index(centre);
        assert!(!flats.contains(&centre), "centre listed as its own neighbour");
    }
}

/// Assert the UP and DOWN lists are disjoint and together equal BOTH.
///
/// Leaves the iterator configured for [`Direction::Both`].
pub fn assert_direction_partition(it: &mut SquareNeighbourIterator) {
    fn collect(it: &mut SquareNeighbourIterator, direction: Direction) -> IndexSet<usize> {
        it.set_direction(direction);
        it.reset().expect("neighbour iterator should be configured");
        assert_neighbours_unique(it);
        it.neighbours().iter().map(|n| n.flat).collect()
    }
    let up = collect(it, Direction::Up);
    let down = collect(it, Direction::Down);
    let both = collect(it, Direction::Both);

    assert!(up.is_disjoint(&down), "UP and DOWN lists overlap");
    let union: IndexSet<usize> = down.union(&up).copied().collect();
    assert_eq!(union, both, "UP and DOWN do not cover BOTH");
}
