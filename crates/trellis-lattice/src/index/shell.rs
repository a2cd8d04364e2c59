use super::{IndexIterator, IndexIteratorRectangular};
use crate::error::LatticeError;
use trellis_core::Coord;

/// Signed `D`-tuples on successive Chebyshev shells.
///
/// Shell `s` holds the tuples whose largest absolute component equals `s`;
/// shell 0 is the origin alone and shell `s > 0` holds `(2s+1)^D - (2s-1)^D`
/// tuples. Within a shell the order is row-major over offsets `-s..=s`.
/// The sequence stops after `max_shell`, or never if no cap is set.
///
/// ```
/// use trellis_lattice::IndexIteratorShell;
///
/// let mut it = IndexIteratorShell::new(2).unwrap();
/// it.set_max_shell(Some(1));
/// assert_eq!(it.count(), 9);
/// ```
#[derive(Clone, Debug)]
pub struct IndexIteratorShell {
    d: usize,
    shell: u32,
    max_shell: Option<u32>,
    cube: Option<IndexIteratorRectangular>,
    lookahead: Option<Coord>,
}

impl IndexIteratorShell {
    /// An uncapped shell iterator over `d`-tuples.
    pub fn new(d: usize) -> Result<Self, LatticeError> {
        if d == 0 {
            return Err(LatticeError::ZeroDimension);
        }
        let mut it = Self {
            d,
            shell: 0,
            max_shell: None,
            cube: None,
            lookahead: None,
        };
        it.reset();
        Ok(it)
    }

    /// Stop after shell `max` (`None` for no limit). Rewinds.
    pub fn set_max_shell(&mut self, max: Option<u32>) {
        self.max_shell = max;
        self.reset();
    }

    /// Shell of the tuple the next call to `next` returns.
    pub fn shell(&self) -> u32 {
        self.shell
    }

    /// Fetch the next tuple on or beyond the current shell.
    ///
    /// Scans the `(2s+1)^D` cube of the current shell and keeps only its
    /// surface; the interior belongs to earlier shells.
    fn advance(&mut self) -> Option<Coord> {
        loop {
            if self.max_shell.is_some_and(|m| self.shell > m) {
                return None;
            }
            let s = self.shell as i32;
            if self.cube.is_none() {
                let edge = self.shell.checked_mul(2)?.checked_add(1)?;
                self.cube = IndexIteratorRectangular::hypercube(self.d, edge);
            }
            let cube = self.cube.as_mut()?;
            for c in cube.by_ref() {
                if c.iter().any(|&x| x == 0 || x == 2 * s) {
                    return Some(c.iter().map(|&x| x - s).collect());
                }
            }
            self.shell = self.shell.checked_add(1)?;
            self.cube = None;
        }
    }
}

impl Iterator for IndexIteratorShell {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        let out = self.lookahead.take()?;
        self.lookahead = self.advance();
        Some(out)
    }
}

impl IndexIterator for IndexIteratorShell {
    fn d(&self) -> usize {
        self.d
    }

    fn reset(&mut self) {
        self.shell = 0;
        self.cube = None;
        self.lookahead = self.advance();
    }

    fn has_next(&self) -> bool {
        self.lookahead.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_sizes_in_three_d() {
        let mut it = IndexIteratorShell::new(3).unwrap();
        it.set_max_shell(Some(2));
        let all: Vec<Coord> = it.collect();
        let count = |s: i32| {
            all.iter()
                .filter(|c| c.iter().map(|x| x.abs()).max() == Some(s))
                .count()
        };
        assert_eq!(count(0), 1);
        assert_eq!(count(1), 26);
        assert_eq!(count(2), 98);
        assert_eq!(all.len(), 125);
    }

    #[test]
    fn shells_are_visited_in_order() {
        let mut it = IndexIteratorShell::new(2).unwrap();
        it.set_max_shell(Some(3));
        let radii: Vec<i32> = it
            .map(|c| c.iter().map(|x| x.abs()).max().unwrap())
            .collect();
        assert!(radii.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(radii.len(), 49);
    }

    #[test]
    fn uncapped_iterator_keeps_going() {
        let it = IndexIteratorShell::new(1).unwrap();
        let got: Vec<i32> = it.take(7).map(|c| c[0]).collect();
        assert_eq!(got, vec![0, -1, 1, -2, 2, -3, 3]);
    }

    #[test]
    fn reset_rewinds() {
        let mut it = IndexIteratorShell::new(2).unwrap();
        it.set_max_shell(Some(1));
        assert_eq!(it.by_ref().count(), 9);
        assert!(!it.has_next());
        it.reset();
        assert_eq!(it.next().unwrap().as_slice(), &[0, 0]);
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(IndexIteratorShell::new(0).is_err());
    }
}
