//! Per-axis boundary behaviour for neighbour enumeration.

/// How a neighbour box is treated where it crosses the edge of the lattice.
///
/// # Examples
///
/// ```
/// use trellis_lattice::{EdgeBehavior, LatticeShape, RectangularLattice, SquareNeighbourIterator};
///
/// let mut lattice = RectangularLattice::new(1, |_: &LatticeShape, _: &[i32]| ()).unwrap();
/// lattice.set_size(&[5]).unwrap();
/// let mut it = SquareNeighbourIterator::new(&lattice).unwrap();
/// it.set_range(&[1]).unwrap();
/// it.set_site(&[0]).unwrap();
///
/// // Wrap: the end site has a neighbour on each side.
/// it.reset().unwrap();
/// assert_eq!(it.neighbour_count(), 2);
///
/// // Absorb: the box is truncated at the edge.
/// it.set_edges(&[EdgeBehavior::Absorb]).unwrap();
/// it.reset().unwrap();
/// assert_eq!(it.neighbour_count(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds neighbours wrap to the opposite side (periodic).
    #[default]
    Wrap,
    /// Out-of-bounds neighbours are omitted (fewer neighbours at edges).
    Absorb,
}

impl EdgeBehavior {
    /// `Wrap` for `true`, `Absorb` for `false`.
    pub fn from_periodic(periodic: bool) -> Self {
        if periodic {
            EdgeBehavior::Wrap
        } else {
            EdgeBehavior::Absorb
        }
    }

    /// `true` for [`EdgeBehavior::Wrap`].
    pub fn is_periodic(self) -> bool {
        self == EdgeBehavior::Wrap
    }
}

impl From<bool> for EdgeBehavior {
    fn from(periodic: bool) -> Self {
        Self::from_periodic(periodic)
    }
}
