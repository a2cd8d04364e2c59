use super::IndexIterator;
use crate::error::LatticeError;
use smallvec::SmallVec;
use trellis_core::Coord;

/// Every sign reflection of the tuples produced by an inner iterator.
///
/// For each inner tuple with `k` non-zero components, yields the `2^k`
/// tuples obtained by negating any subset of them, starting with the tuple
/// itself. Zero components are not reflected, so no tuple is repeated.
///
/// ```
/// use trellis_lattice::{IndexIteratorRectangular, IndexIteratorReflecting};
///
/// let inner = IndexIteratorRectangular::new(&[2]).unwrap();
/// let got: Vec<i32> = IndexIteratorReflecting::new(inner).unwrap().map(|c| c[0]).collect();
/// assert_eq!(got, vec![0, 1, -1]);
/// ```
#[derive(Clone, Debug)]
pub struct IndexIteratorReflecting<I> {
    inner: I,
    base: Coord,
    nonzero: SmallVec<[usize; 4]>,
    mask: u64,
    pending: bool,
}

/// Largest dimension whose reflections fit the `u64` sign mask.
pub const MAX_REFLECT_AXES: usize = 63;

impl<I: IndexIterator> IndexIteratorReflecting<I> {
    /// Reflect the tuples of `inner`. `inner` is rewound.
    ///
    /// Returns `Err(LatticeError::TooManyAxes)` if `inner` produces tuples
    /// longer than [`MAX_REFLECT_AXES`].
    pub fn new(mut inner: I) -> Result<Self, LatticeError> {
        if inner.d() > MAX_REFLECT_AXES {
            return Err(LatticeError::TooManyAxes {
                d: inner.d(),
                max: MAX_REFLECT_AXES,
            });
        }
        inner.reset();
        Ok(Self {
            inner,
            base: Coord::new(),
            nonzero: SmallVec::new(),
            mask: 0,
            pending: false,
        })
    }

    /// The wrapped iterator.
    pub fn inner(&self) -> &I {
        &self.inner
    }

    fn load(&mut self, base: Coord) {
        self.nonzero = base
            .iter()
            .enumerate()
            .filter(|(_, &x)| x != 0)
            .map(|(i, _)| i)
            .collect();
        debug_assert!(self.nonzero.len() <= MAX_REFLECT_AXES);
        self.base = base;
        self.mask = 0;
        self.pending = true;
    }
}

impl<I: IndexIterator> Iterator for IndexIteratorReflecting<I> {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if !self.pending {
            let base = self.inner.next()?;
            self.load(base);
        }
        let mut out = self.base.clone();
        for (bit, &axis) in self.nonzero.iter().enumerate() {
            if self.mask & (1 << bit) != 0 {
                out[axis] = -out[axis];
            }
        }
        self.mask += 1;
        if self.mask == 1u64 << self.nonzero.len() {
            self.pending = false;
        }
        Some(out)
    }
}

impl<I: IndexIterator> IndexIterator for IndexIteratorReflecting<I> {
    fn d(&self) -> usize {
        self.inner.d()
    }

    fn reset(&mut self) {
        self.inner.reset();
        self.pending = false;
    }

    fn has_next(&self) -> bool {
        self.pending || self.inner.has_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexIteratorRectangular, IndexIteratorTriangular};

    #[test]
    fn reflects_nonzero_components_only() {
        let inner = IndexIteratorRectangular::new(&[1, 3]).unwrap();
        let got: Vec<Vec<i32>> = IndexIteratorReflecting::new(inner)
            .unwrap()
            .map(|c| c.to_vec())
            .collect();
        assert_eq!(
            got,
            vec![vec![0, 0], vec![0, 1], vec![0, -1], vec![0, 2], vec![0, -2]]
        );
    }

    #[test]
    fn full_reflection_of_positive_octant_is_a_cube() {
        let inner = IndexIteratorRectangular::new(&[3, 3, 3]).unwrap();
        let all: Vec<Coord> = IndexIteratorReflecting::new(inner).unwrap().collect();
        assert_eq!(all.len(), 125);
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 125);
    }

    #[test]
    fn reset_rewinds_mid_reflection() {
        let inner = IndexIteratorRectangular::new(&[2, 2]).unwrap();
        let mut it = IndexIteratorReflecting::new(inner).unwrap();
        let first: Vec<Coord> = it.by_ref().take(3).collect();
        assert!(it.has_next());
        it.reset();
        let again: Vec<Coord> = it.by_ref().take(3).collect();
        assert_eq!(first, again);
        assert_eq!(it.d(), 2);
    }

    #[test]
    fn dimension_bounded_by_sign_mask() {
        let wide = IndexIteratorTriangular::new(MAX_REFLECT_AXES + 1).unwrap();
        assert_eq!(
            IndexIteratorReflecting::new(wide).unwrap_err(),
            LatticeError::TooManyAxes {
                d: MAX_REFLECT_AXES + 1,
                max: MAX_REFLECT_AXES
            }
        );

        let widest = IndexIteratorTriangular::new(MAX_REFLECT_AXES).unwrap();
        let firsts: Vec<i32> = IndexIteratorReflecting::new(widest)
            .unwrap()
            .take(3)
            .map(|c| c[0])
            .collect();
        assert_eq!(firsts, vec![0, 1, -1]);
    }
}
