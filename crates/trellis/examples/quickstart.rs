//! Build a periodic lattice, list the neighbours of a corner site, and lay
//! out an HCP crystal block.
//!
//! Run with `RUST_LOG=debug` to see lattice and neighbour-list rebuilds.

use log::info;
use trellis::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut lattice = RectangularLattice::new(2, |shape: &LatticeShape, idx: &[i32]| {
        shape.array_index(idx)
    })?;
    lattice.set_size(&[5, 5])?;

    let mut neighbours = SquareNeighbourIterator::new(&lattice)?;
    neighbours.configure(&NeighbourConfig {
        range: vec![1, 1],
        direction: Direction::Both,
        edges: Some(vec![EdgeBehavior::Wrap, EdgeBehavior::Absorb]),
        period: Some(vec![5.0, 5.0]),
    })?;
    neighbours.set_site(&[0, 0])?;
    neighbours.reset()?;

    for (&flat, n) in neighbours.sites(&lattice)? {
        let index = neighbours.lattice_index(&n);
        match neighbours.nearest_image_vector(&n) {
            Some(image) => info!("site {flat} at {index:?}, nearest-image correction {image:?}"),
            None => info!("site {flat} at {index:?}"),
        }
    }
    println!(
        "corner of a 5x5 lattice (x periodic, y absorbing): {} neighbours",
        neighbours.neighbour_count()
    );

    let hcp = CrystalConfig {
        kind: CrystalKind::Hcp,
        lattice_constant: 1.0,
        c_over_a: None,
    }
    .build()?;
    let mut block = CrystalBlock::new(hcp, &[2, 2, 2])?;
    let positions = block.positions()?;
    println!("hcp block of {} sites", positions.site_count());
    for (index, pos) in positions.iter().take(4) {
        println!("  {index:?} -> ({:.3}, {:.3}, {:.3})", pos[0], pos[1], pos[2]);
    }
    Ok(())
}
