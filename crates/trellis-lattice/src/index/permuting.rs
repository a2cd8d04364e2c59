use super::IndexIterator;
use trellis_core::Coord;

/// Every distinct permutation of the tuples produced by an inner iterator.
///
/// Permutations of each inner tuple are generated in lexicographic order,
/// starting from its sorted (ascending) arrangement. Repeated components
/// produce each distinct arrangement once.
///
/// ```
/// use trellis_lattice::{IndexIteratorPermuting, IndexIteratorTriangular};
///
/// let mut tri = IndexIteratorTriangular::new(2).unwrap();
/// tri.set_max_iterates(Some(2));
/// let got: Vec<Vec<i32>> = IndexIteratorPermuting::new(tri).map(|c| c.to_vec()).collect();
/// assert_eq!(got, vec![vec![0, 0], vec![0, 1], vec![1, 0]]);
/// ```
#[derive(Clone, Debug)]
pub struct IndexIteratorPermuting<I> {
    inner: I,
    current: Option<Coord>,
}

impl<I: IndexIterator> IndexIteratorPermuting<I> {
    /// Permute the tuples of `inner`. `inner` is rewound.
    pub fn new(mut inner: I) -> Self {
        inner.reset();
        Self {
            inner,
            current: None,
        }
    }

    /// The wrapped iterator.
    pub fn inner(&self) -> &I {
        &self.inner
    }
}

/// Rearrange `c` into its lexicographic successor. Returns `false` (leaving
/// `c` untouched) when `c` is already the last arrangement.
fn next_permutation(c: &mut [i32]) -> bool {
    if c.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..c.len() - 1).rev().find(|&i| c[i] < c[i + 1]) else {
        return false;
    };
    let successor = (pivot + 1..c.len())
        .rev()
        .find(|&j| c[j] > c[pivot])
        .unwrap_or(pivot + 1);
    c.swap(pivot, successor);
    c[pivot + 1..].reverse();
    true
}

impl<I: IndexIterator> Iterator for IndexIteratorPermuting<I> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if let Some(cur) = self.current.as_mut() {
            if next_permutation(cur) {
                return Some(cur.clone());
            }
        }
        let mut fresh = self.inner.next()?;
        fresh.sort_unstable();
        self.current = Some(fresh.clone());
        Some(fresh)
    }
}

impl<I: IndexIterator> IndexIterator for IndexIteratorPermuting<I> {
    fn d(&self) -> usize {
        self.inner.d()
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.current = None;
    }

    fn has_next(&self) -> bool {
        if let Some(cur) = &self.current {
            if cur.windows(2).any(|w| w[0] < w[1]) {
                return true;
            }
        }
        self.inner.has_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexIteratorTriangular;
    use smallvec::smallvec;

    #[test]
    fn next_permutation_handles_repeats() {
        let mut c: Coord = smallvec![0, 1, 1];
        let mut seen = vec![c.to_vec()];
        while next_permutation(&mut c) {
            seen.push(c.to_vec());
        }
        assert_eq!(seen, vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]);
    }

    #[test]
    fn distinct_permutations_of_two_one_zero() {
        let mut tri = IndexIteratorTriangular::new(3).unwrap();
        tri.set_max_element(Some(2));
        let all: Vec<Coord> = IndexIteratorPermuting::new(tri).collect();
        // Every tuple in {0,1,2}^3 exactly once.
        assert_eq!(all.len(), 27);
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 27);
    }

    #[test]
    fn has_next_tracks_pending_permutations() {
        let mut tri = IndexIteratorTriangular::new(2).unwrap();
        tri.set_max_iterates(Some(2));
        let mut it = IndexIteratorPermuting::new(tri);
        assert_eq!(it.next().unwrap().as_slice(), &[0, 0]);
        assert_eq!(it.next().unwrap().as_slice(), &[0, 1]);
        assert!(it.has_next());
        assert_eq!(it.next().unwrap().as_slice(), &[1, 0]);
        assert!(!it.has_next());
        it.reset();
        assert!(it.has_next());
    }
}
