//! Lazy generators of integer index tuples.
//!
//! Every generator implements [`IndexIterator`]: a restartable
//! [`Iterator`] over [`Coord`] values of fixed dimension.
//!
//! - [`IndexIteratorRectangular`]: every tuple inside a size vector, row-major.
//! - [`IndexIteratorTriangular`]: non-increasing tuples `i0 >= i1 >= ... >= 0`.
//! - [`IndexIteratorReflecting`]: every sign reflection of an inner iterator's tuples.
//! - [`IndexIteratorPermuting`]: every distinct permutation of an inner iterator's tuples.
//! - [`IndexIteratorShell`]: signed tuples on successive Chebyshev shells.

mod permuting;
mod rectangular;
mod reflecting;
mod shell;
mod triangular;

pub use permuting::IndexIteratorPermuting;
pub use rectangular::IndexIteratorRectangular;
pub use reflecting::{IndexIteratorReflecting, MAX_REFLECT_AXES};
pub use shell::IndexIteratorShell;
pub use triangular::IndexIteratorTriangular;

use trellis_core::Coord;

/// A restartable generator of `D`-tuples.
pub trait IndexIterator: Iterator<Item = Coord> {
    /// Length of every generated tuple.
    fn d(&self) -> usize;

    /// Rewind to before the first tuple.
    fn reset(&mut self);

    /// `true` if [`next`](Iterator::next) will return another tuple.
    fn has_next(&self) -> bool;
}

/// Odometer increment of `index` within `bounds`, last component fastest.
///
/// Carries overflow leftwards. Returns `false` when the first component
/// runs past its bound, i.e. after the last tuple.
pub(crate) fn odometer_increment(index: &mut [i32], bounds: &[u32]) -> bool {
    debug_assert_eq!(index.len(), bounds.len());
    let mut d = index.len() - 1;
    index[d] += 1;
    while index[d] as u32 == bounds[d] && d > 0 {
        index[d] = 0;
        d -= 1;
        index[d] += 1;
    }
    (index[0] as u32) < bounds[0]
}
