use super::{odometer_increment, IndexIterator};
use crate::error::LatticeError;
use smallvec::SmallVec;
use trellis_core::{coord_product, Coord};

/// Every tuple of a rectangular size vector, in row-major order.
///
/// Size `{2, 3}` yields `(0,0), (0,1), (0,2), (1,0), (1,1), (1,2)`: the last
/// component varies fastest. The sequence is finite (`∏ size[i]` tuples) and
/// restartable with [`reset`](IndexIterator::reset).
///
/// ```
/// use trellis_lattice::{IndexIterator, IndexIteratorRectangular};
///
/// let mut it = IndexIteratorRectangular::new(&[2, 3]).unwrap();
/// assert_eq!(it.size(), 6);
/// assert_eq!(it.next().unwrap().as_slice(), &[0, 0]);
/// assert_eq!(it.nth(2).unwrap().as_slice(), &[1, 0]);
/// it.reset();
/// assert_eq!(it.count(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct IndexIteratorRectangular {
    size: SmallVec<[u32; 4]>,
    index: Coord,
    count: usize,
    cursor: usize,
}

impl IndexIteratorRectangular {
    /// An iterator over every index inside `size`.
    ///
    /// A zero extent on any axis produces an empty sequence.
    pub fn new(size: &[u32]) -> Result<Self, LatticeError> {
        if size.is_empty() {
            return Err(LatticeError::ZeroDimension);
        }
        let count = coord_product(size).ok_or_else(|| LatticeError::SizeOverflow {
            size: size.to_vec(),
        })?;
        Ok(Self {
            size: SmallVec::from_slice(size),
            index: SmallVec::from_elem(0, size.len()),
            count,
            cursor: 0,
        })
    }

    /// The `edge^d` cube, or `None` if its tuple count overflows.
    pub(crate) fn hypercube(d: usize, edge: u32) -> Option<Self> {
        Self::new(&SmallVec::<[u32; 4]>::from_elem(edge, d)).ok()
    }

    /// Replace the size vector and rewind.
    pub fn set_size(&mut self, size: &[u32]) -> Result<(), LatticeError> {
        if size.len() != self.d() {
            return Err(LatticeError::DimensionMismatch {
                what: "size",
                expected: self.d(),
                got: size.len(),
            });
        }
        *self = Self::new(size)?;
        Ok(())
    }

    /// Extent along each axis.
    pub fn bounds(&self) -> &[u32] {
        &self.size
    }

    /// Total number of tuples in one pass.
    pub fn size(&self) -> usize {
        self.count
    }
}

impl Iterator for IndexIteratorRectangular {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.cursor >= self.count {
            return None;
        }
        if self.cursor == 0 {
            self.index.iter_mut().for_each(|i| *i = 0);
        } else {
            odometer_increment(&mut self.index, &self.size);
        }
        self.cursor += 1;
        Some(self.index.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.cursor.min(self.count);
        (left, Some(left))
    }
}

impl ExactSizeIterator for IndexIteratorRectangular {}

impl IndexIterator for IndexIteratorRectangular {
    fn d(&self) -> usize {
        self.size.len()
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn has_next(&self) -> bool {
        self.cursor < self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;
    use proptest::prelude::*;

    #[test]
    fn two_by_three_order() {
        let got: Vec<Vec<i32>> = IndexIteratorRectangular::new(&[2, 3])
            .unwrap()
            .map(|c| c.to_vec())
            .collect();
        assert_eq!(
            got,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2]
            ]
        );
    }

    #[test]
    fn reset_restarts() {
        let mut it = IndexIteratorRectangular::new(&[3]).unwrap();
        assert_eq!(it.by_ref().count(), 3);
        assert!(!it.has_next());
        assert!(it.next().is_none());
        it.reset();
        assert!(it.has_next());
        assert_eq!(it.next().unwrap().as_slice(), &[0]);
    }

    #[test]
    fn zero_extent_is_empty() {
        let mut it = IndexIteratorRectangular::new(&[3, 0]).unwrap();
        assert!(!it.has_next());
        assert!(it.next().is_none());
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            IndexIteratorRectangular::new(&[]).unwrap_err(),
            LatticeError::ZeroDimension
        );
    }

    #[test]
    fn set_size_checks_dimension() {
        let mut it = IndexIteratorRectangular::new(&[2, 2]).unwrap();
        assert!(it.set_size(&[2]).is_err());
        it.set_size(&[1, 4]).unwrap();
        assert_eq!(it.size(), 4);
        assert_eq!(it.bounds(), &[1, 4]);
    }

    proptest! {
        #[test]
        fn yields_every_tuple_once_last_axis_fastest(
            size in proptest::collection::vec(1u32..5, 1..5),
        ) {
            let it = IndexIteratorRectangular::new(&size).unwrap();
            let expected: usize = size.iter().map(|&s| s as usize).product();
            prop_assert_eq!(it.len(), expected);
            let all: Vec<Coord> = it.collect();
            prop_assert_eq!(all.len(), expected);
            let unique: IndexSet<&Coord> = all.iter().collect();
            prop_assert_eq!(unique.len(), expected);
            // Row-major: tuples are strictly increasing lexicographically.
            for w in all.windows(2) {
                prop_assert!(w[0] < w[1]);
            }
        }
    }
}
