//! Benchmark fixtures for the Trellis crates.
//!
//! - [`flat_lattice`]: a lattice whose sites store their own flat offset
//! - [`sample_centres`]: deterministic central sites spread over a lattice

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use trellis_core::Coord;
use trellis_lattice::{LatticeError, LatticeShape, RectangularLattice};

/// A lattice of `size` whose sites hold their flat offset.
pub fn flat_lattice(size: &[u32]) -> Result<RectangularLattice<usize>, LatticeError> {
    let mut lattice = RectangularLattice::new(size.len(), |shape: &LatticeShape, idx: &[i32]| {
        shape.array_index(idx)
    })?;
    lattice.set_size(size)?;
    Ok(lattice)
}

/// `count` lattice indices picked by a fixed multiplicative hash, so that
/// edge, corner and interior sites all appear.
pub fn sample_centres(shape: &LatticeShape, count: usize) -> Vec<Coord> {
    let n = shape.site_count() as u64;
    if n == 0 {
        return Vec::new();
    }
    (0..count as u64)
        .map(|i| {
            let flat = i.wrapping_mul(6364136223846793007).wrapping_add(1442695040888963407) % n;
            shape.lattice_index(flat as usize)
        })
        .collect()
}
