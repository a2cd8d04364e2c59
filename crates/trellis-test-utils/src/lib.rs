//! Test utilities for Trellis development.
//!
//! Provides a brute-force reference for neighbour-box enumeration
//! ([`reference_box_neighbours`]) to check the recursive implementation
//! against, and simple site payloads in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::IndexSite;

use smallvec::SmallVec;
use trellis_core::{Coord, Direction};

/// Every site in the box `[centre[i] - range[i], centre[i] + range[i]]`,
/// excluding the centre, by walking the box offsets directly.
///
/// Offsets are visited in row-major order, last axis fastest. An offset
/// that leaves the lattice along a periodic axis is wrapped and gets shift
/// `-1` (below index 0) or `+1` (past the end) on that axis; along a
/// non-periodic axis it is dropped. `Direction::Down` keeps offsets
/// lexicographically below zero, `Direction::Up` those above.
///
/// Returns `(lattice index, per-axis shift)` pairs.
pub fn reference_box_neighbours(
    size: &[u32],
    centre: &[i32],
    range: &[i32],
    periodic: &[bool],
    direction: Direction,
) -> Vec<(Coord, Coord)> {
    let d = size.len();
    assert!(d > 0, "reference needs at least one axis");
    assert_eq!(centre.len(), d);
    assert_eq!(range.len(), d);
    assert_eq!(periodic.len(), d);

    let mut out = Vec::new();
    let mut offset: Coord = range.iter().map(|&r| -r).collect();
    loop {
        let keep = match first_nonzero_sign(&offset) {
            0 => false,
            s if s < 0 => direction.includes_down(),
            _ => direction.includes_up(),
        };
        if keep {
            if let Some(hit) = resolve(size, centre, &offset, periodic) {
                out.push(hit);
            }
        }
        if !step(&mut offset, range) {
            return out;
        }
    }
}

fn first_nonzero_sign(offset: &[i32]) -> i32 {
    offset
        .iter()
        .find(|&&o| o != 0)
        .map_or(0, |&o| o.signum())
}

fn resolve(size: &[u32], centre: &[i32], offset: &[i32], periodic: &[bool]) -> Option<(Coord, Coord)> {
    let mut index = SmallVec::with_capacity(size.len());
    let mut shift = SmallVec::with_capacity(size.len());
    for axis in 0..size.len() {
        let n = size[axis] as i32;
        let raw = centre[axis] + offset[axis];
        let (i, s) = if raw < 0 {
            (raw + n, -1)
        } else if raw >= n {
            (raw - n, 1)
        } else {
            (raw, 0)
        };
        if s != 0 && !periodic[axis] {
            return None;
        }
        index.push(i);
        shift.push(s);
    }
    Some((index, shift))
}

/// Advance `offset` through `[-range, range]` per axis. `false` when done.
fn step(offset: &mut [i32], range: &[i32]) -> bool {
    for axis in (0..offset.len()).rev() {
        if offset[axis] < range[axis] {
            offset[axis] += 1;
            return true;
        }
        offset[axis] = -range[axis];
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_count() {
        let all = reference_box_neighbours(&[5, 5], &[0, 0], &[1, 2], &[true, true], Direction::Both);
        assert_eq!(all.len(), 3 * 5 - 1);
    }

    #[test]
    fn halves_split_the_box() {
        let up = reference_box_neighbours(&[5, 5], &[2, 2], &[1, 1], &[true, true], Direction::Up);
        let down = reference_box_neighbours(&[5, 5], &[2, 2], &[1, 1], &[true, true], Direction::Down);
        assert_eq!(up.len(), 4);
        assert_eq!(down.len(), 4);
        assert_eq!(down[0].0.as_slice(), &[1, 1]);
        assert_eq!(up[3].0.as_slice(), &[3, 3]);
    }

    #[test]
    fn non_periodic_axis_drops_wrapped_offsets() {
        let hits = reference_box_neighbours(&[4], &[0], &[1], &[false], Direction::Both);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.as_slice(), &[1]);
        let hits = reference_box_neighbours(&[4], &[0], &[1], &[true], Direction::Both);
        assert_eq!(hits[0].0.as_slice(), &[3]);
        assert_eq!(hits[0].1.as_slice(), &[-1]);
    }
}
