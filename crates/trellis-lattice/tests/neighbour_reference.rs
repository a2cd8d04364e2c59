use trellis_core::Direction;
use trellis_lattice::{
    EdgeBehavior, IndexIterator, IndexIteratorRectangular, LatticeShape, NeighbourConfig,
    RectangularLattice, SquareNeighbourIterator,
};
use trellis_test_utils::{reference_box_neighbours, IndexSite};

fn index_lattice(size: &[u32]) -> RectangularLattice<IndexSite> {
    let mut lattice = RectangularLattice::new(size.len(), |shape: &LatticeShape, idx: &[i32]| {
        IndexSite::new(idx, shape.array_index(idx))
    })
    .unwrap();
    lattice.set_size(size).unwrap();
    lattice
}

fn check_every_centre(size: &[u32], range: &[i32], periodic: &[bool], direction: Direction) {
    let lattice = index_lattice(size);
    let mut it = SquareNeighbourIterator::new(&lattice).unwrap();
    it.set_range(range).unwrap();
    it.set_periodicity(periodic).unwrap();
    it.set_direction(direction);

    let mut centres = IndexIteratorRectangular::new(size).unwrap();
    centres.reset();
    for centre in centres {
        it.set_site(&centre).unwrap();
        it.reset().unwrap();

        let expected = reference_box_neighbours(size, &centre, range, periodic, direction);
        assert_eq!(it.neighbour_count(), expected.len(), "count at {centre:?}");
        for ((site, n), (index, shift)) in it.sites(&lattice).unwrap().zip(&expected) {
            assert_eq!(&site.index, index, "neighbour of {centre:?}");
            assert_eq!(site.flat, n.flat);
            assert_eq!(&it.image_shift(&n), shift, "image of {index:?} from {centre:?}");
        }
    }
}

#[test]
fn two_d_mixed_edges_match_reference() {
    for direction in [Direction::Both, Direction::Up, Direction::Down] {
        check_every_centre(&[5, 7], &[2, 3], &[true, false], direction);
        check_every_centre(&[5, 7], &[1, 2], &[false, true], direction);
    }
}

#[test]
fn three_d_periodic_matches_reference() {
    for direction in [Direction::Both, Direction::Up, Direction::Down] {
        check_every_centre(&[3, 4, 5], &[1, 1, 2], &[true, true, true], direction);
    }
}

#[test]
fn four_d_partial_periodicity_matches_reference() {
    check_every_centre(&[3, 3, 4, 2], &[1, 1, 1, 0], &[true, false, true, false], Direction::Both);
}

#[test]
fn one_d_full_width_box() {
    check_every_centre(&[9], &[4], &[true], Direction::Both);
    check_every_centre(&[9], &[4], &[false], Direction::Up);
}

#[test]
fn configure_then_iterate_from_index_lattice() {
    let lattice = index_lattice(&[6, 6, 6]);
    let mut it = SquareNeighbourIterator::new(&lattice).unwrap();
    it.configure(&NeighbourConfig {
        range: vec![1, 1, 1],
        direction: Direction::Both,
        edges: Some(vec![EdgeBehavior::Wrap, EdgeBehavior::Wrap, EdgeBehavior::Absorb]),
        period: Some(vec![6.0, 6.0, 6.0]),
    })
    .unwrap();
    it.set_site(&[0, 5, 0]).unwrap();
    it.reset().unwrap();
    assert_eq!(it.neighbour_count(), 3 * 3 * 2 - 1);

    let wrapped: Vec<_> = it
        .neighbours()
        .iter()
        .filter_map(|n| it.nearest_image_vector(n))
        .collect();
    assert!(wrapped.iter().all(|v| v[2] == 0.0));
    assert!(wrapped.iter().any(|v| v[0] == 6.0 && v[1] == -6.0));
}
