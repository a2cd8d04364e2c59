use super::IndexIterator;
use crate::error::LatticeError;
use smallvec::SmallVec;
use trellis_core::Coord;

/// Non-increasing tuples `index[0] >= index[1] >= ... >= index[D-1] >= 0`.
///
/// Enumerates one representative of every set of lattice vectors related
/// by permutation, so symmetric shells can be visited without duplicate
/// reflections. The sequence is unbounded unless capped with
/// [`set_max_iterates`](Self::set_max_iterates) or
/// [`set_max_element`](Self::set_max_element).
///
/// ```
/// use trellis_lattice::IndexIteratorTriangular;
///
/// let mut it = IndexIteratorTriangular::new(2).unwrap();
/// it.set_max_iterates(Some(5));
/// let got: Vec<Vec<i32>> = it.map(|c| c.to_vec()).collect();
/// assert_eq!(got, vec![vec![0, 0], vec![1, 0], vec![1, 1], vec![2, 0], vec![2, 1]]);
/// ```
#[derive(Clone, Debug)]
pub struct IndexIteratorTriangular {
    index: Coord,
    produced: usize,
    max_iterates: Option<usize>,
    max_element: Option<u32>,
}

impl IndexIteratorTriangular {
    /// An unbounded triangular iterator over `d`-tuples.
    ///
    /// Returns `Err(LatticeError::ZeroDimension)` if `d == 0`.
    pub fn new(d: usize) -> Result<Self, LatticeError> {
        if d == 0 {
            return Err(LatticeError::ZeroDimension);
        }
        Ok(Self {
            index: SmallVec::from_elem(0, d),
            produced: 0,
            max_iterates: None,
            max_element: None,
        })
    }

    /// Stop after `max` tuples per pass (`None` for no limit). Rewinds.
    pub fn set_max_iterates(&mut self, max: Option<usize>) {
        self.max_iterates = max;
        self.reset();
    }

    /// Stop once the leading component would exceed `max` (`None` for no
    /// limit). Rewinds.
    pub fn set_max_element(&mut self, max: Option<u32>) {
        self.max_element = max;
        self.reset();
    }

    /// Number of tuples returned since the last reset.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Bump the last component; whenever a component exceeds its left
    /// neighbour it is zeroed and the neighbour is bumped instead.
    fn increment(&mut self) {
        let mut d = self.index.len() - 1;
        self.index[d] += 1;
        while d > 0 && self.index[d] > self.index[d - 1] {
            self.index[d] = 0;
            d -= 1;
            self.index[d] += 1;
        }
    }
}

impl Iterator for IndexIteratorTriangular {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if !self.has_next() {
            return None;
        }
        if self.produced > 0 {
            self.increment();
        }
        self.produced += 1;
        Some(self.index.clone())
    }
}

impl IndexIterator for IndexIteratorTriangular {
    fn d(&self) -> usize {
        self.index.len()
    }

    fn reset(&mut self) {
        self.index.iter_mut().for_each(|i| *i = 0);
        self.produced = 0;
    }

    fn has_next(&self) -> bool {
        if self.max_iterates.is_some_and(|m| self.produced >= m) {
            return false;
        }
        match self.max_element {
            None => true,
            Some(_) if self.produced == 0 => true,
            Some(max) => {
                // The next tuple leaves the cap only when every component is
                // already at the leading value and the leading value is max.
                let lead = self.index[0];
                !(lead as u32 >= max && self.index.iter().all(|&i| i == lead))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_non_increasing(c: &[i32]) -> bool {
        c.windows(2).all(|w| w[0] >= w[1]) && c.iter().all(|&i| i >= 0)
    }

    #[test]
    fn three_d_prefix() {
        let mut it = IndexIteratorTriangular::new(3).unwrap();
        it.set_max_iterates(Some(5));
        let got: Vec<Vec<i32>> = it.map(|c| c.to_vec()).collect();
        assert_eq!(
            got,
            vec![
                vec![0, 0, 0],
                vec![1, 0, 0],
                vec![1, 1, 0],
                vec![1, 1, 1],
                vec![2, 0, 0]
            ]
        );
    }

    #[test]
    fn one_d_counts_up() {
        let mut it = IndexIteratorTriangular::new(1).unwrap();
        it.set_max_iterates(Some(4));
        let got: Vec<i32> = it.map(|c| c[0]).collect();
        assert_eq!(got, vec![0, 1, 2, 3]);
    }

    #[test]
    fn every_tuple_is_non_increasing_and_unique() {
        let mut it = IndexIteratorTriangular::new(4).unwrap();
        it.set_max_iterates(Some(500));
        let all: Vec<Coord> = it.collect();
        assert_eq!(all.len(), 500);
        assert!(all.iter().all(|c| is_non_increasing(c)));
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 500);
    }

    #[test]
    fn max_element_bounds_the_sequence() {
        // Non-increasing pairs with entries in 0..=3: C(3 + 2, 2) = 10.
        let mut it = IndexIteratorTriangular::new(2).unwrap();
        it.set_max_element(Some(3));
        let all: Vec<Coord> = it.by_ref().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(all.last().unwrap().as_slice(), &[3, 3]);
        assert!(!it.has_next());
        it.reset();
        assert_eq!(it.next().unwrap().as_slice(), &[0, 0]);
    }

    #[test]
    fn max_element_zero_yields_origin_only() {
        let mut it = IndexIteratorTriangular::new(3).unwrap();
        it.set_max_element(Some(0));
        assert_eq!(it.count(), 1);
    }

    #[test]
    fn zero_dimension_rejected() {
        assert_eq!(
            IndexIteratorTriangular::new(0).unwrap_err(),
            LatticeError::ZeroDimension
        );
    }
}
