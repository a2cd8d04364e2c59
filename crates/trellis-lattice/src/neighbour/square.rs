use super::image::{ImageWeights, MAX_IMAGE_AXES};
use super::Neighbour;
use crate::config::NeighbourConfig;
use crate::edge::EdgeBehavior;
use crate::error::LatticeError;
use crate::lattice::RectangularLattice;
use crate::shape::LatticeShape;
use log::{debug, trace};
use smallvec::SmallVec;
use trellis_core::{Coord, Direction, Generation};

/// Lists every site in the box `[c[i] - r[i], c[i] + r[i]]` around a central
/// site `c`, excluding the centre itself.
///
/// The iterator copies the shape of the lattice it was built from and
/// enumerates flat offsets; resolve them against the lattice with
/// [`sites`](Self::sites), which refuses to run if the lattice was resized
/// after the iterator last synced with [`set_lattice`](Self::set_lattice).
///
/// Every setter marks the neighbour list dirty and empties the iteration;
/// [`reset`](Self::reset) recomputes the list and rewinds.
///
/// Along a periodic ([`EdgeBehavior::Wrap`]) axis the box wraps to the far
/// side of the lattice and the neighbour's image shift on that axis is `-1`
/// (wrapped below index 0) or `+1` (wrapped past the last index). Along an
/// [`EdgeBehavior::Absorb`] axis the box is truncated, so sites near that
/// edge have fewer neighbours.
///
/// With [`Direction::Down`] only neighbours preceding the centre in the box's
/// row-major order are listed, with [`Direction::Up`] only those following
/// it. When nothing wraps this is the flat order of the lattice.
///
/// # Examples
///
/// ```
/// use trellis_core::Direction;
/// use trellis_lattice::{LatticeShape, RectangularLattice, SquareNeighbourIterator};
///
/// let mut lattice = RectangularLattice::new(2, |shape: &LatticeShape, idx: &[i32]| {
///     shape.array_index(idx)
/// })
/// .unwrap();
/// lattice.set_size(&[4, 4]).unwrap();
///
/// let mut it = SquareNeighbourIterator::new(&lattice).unwrap();
/// it.set_range(&[1, 1]).unwrap();
/// it.set_site(&[0, 0]).unwrap();
/// it.reset().unwrap();
/// assert_eq!(it.neighbour_count(), 8);
///
/// it.set_direction(Direction::Up);
/// it.reset().unwrap();
/// let up: Vec<usize> = it.map(|n| n.flat).collect();
/// // (0, 1), then the next row: (1, -1) wraps to (1, 3), (1, 0), (1, 1).
/// assert_eq!(up, vec![1, 7, 4, 5]);
/// ```
#[derive(Clone, Debug)]
pub struct SquareNeighbourIterator {
    shape: LatticeShape,
    weights: ImageWeights,
    range: Coord,
    edges: SmallVec<[EdgeBehavior; 4]>,
    period: SmallVec<[f64; 4]>,
    direction: Direction,
    centre: Option<Coord>,
    half_neighbour_count: usize,
    furthest_neighbour_delta: usize,
    neighbours: Vec<Neighbour>,
    cursor: usize,
    dirty: bool,
}

/// A contiguous stretch of one axis inside the neighbour box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Run {
    start: usize,
    len: usize,
    shift: i8,
    side: Side,
}

/// Position of a run relative to the central row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Low,
    Centre,
    High,
}

/// Which part of a sub-box a gather call collects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Part {
    Full,
    Down,
    Up,
}

impl SquareNeighbourIterator {
    /// An iterator over the neighbours of sites of `lattice`.
    ///
    /// The range starts at zero on every axis, every axis wraps and the
    /// period is `1.0`. The central site must be set before
    /// [`reset`](Self::reset).
    pub fn new<S>(lattice: &RectangularLattice<S>) -> Result<Self, LatticeError> {
        Self::for_shape(lattice.shape().clone())
    }

    /// Like [`new`](Self::new), from a shape alone.
    pub fn for_shape(shape: LatticeShape) -> Result<Self, LatticeError> {
        let d = shape.d();
        if d > MAX_IMAGE_AXES {
            return Err(LatticeError::TooManyAxes {
                d,
                max: MAX_IMAGE_AXES,
            });
        }
        Ok(Self {
            weights: ImageWeights::new(d),
            range: SmallVec::from_elem(0, d),
            edges: SmallVec::from_elem(EdgeBehavior::Wrap, d),
            period: SmallVec::from_elem(1.0, d),
            direction: Direction::Both,
            centre: None,
            half_neighbour_count: 0,
            furthest_neighbour_delta: 0,
            neighbours: Vec::new(),
            cursor: 0,
            dirty: true,
            shape,
        })
    }

    /// Number of dimensions.
    pub fn d(&self) -> usize {
        self.shape.d()
    }

    /// The lattice shape the iterator is synced with.
    pub fn shape(&self) -> &LatticeShape {
        &self.shape
    }

    /// Generation of the lattice when the iterator last synced.
    pub fn generation(&self) -> Generation {
        self.shape.generation()
    }

    /// Re-sync with `lattice`, typically after it was resized.
    ///
    /// Fails if the dimension differs or the current range no longer fits
    /// the lattice size; the iterator is unchanged on error.
    pub fn set_lattice<S>(&mut self, lattice: &RectangularLattice<S>) -> Result<(), LatticeError> {
        let shape = lattice.shape();
        self.shape.check_len("lattice dimension", shape.d())?;
        check_range(shape, &self.range)?;
        self.shape = shape.clone();
        self.furthest_neighbour_delta = shape.array_index(&self.range);
        self.invalidate();
        Ok(())
    }

    /// Set the half-width of the neighbour box along each axis.
    ///
    /// Each component must be non-negative and satisfy
    /// `2 * range[i] + 1 <= size[i]`, so the box never overlaps itself
    /// across a periodic edge.
    pub fn set_range(&mut self, range: &[i32]) -> Result<(), LatticeError> {
        check_range(&self.shape, range)?;
        self.range = SmallVec::from_slice(range);
        self.half_neighbour_count = half_count(range);
        self.furthest_neighbour_delta = self.shape.array_index(range);
        self.invalidate();
        Ok(())
    }

    /// Which half of the neighbour box to list.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.invalidate();
    }

    /// Per-axis periodicity; `true` wraps, `false` absorbs.
    pub fn set_periodicity(&mut self, periodic: &[bool]) -> Result<(), LatticeError> {
        let edges: SmallVec<[EdgeBehavior; 4]> =
            periodic.iter().map(|&p| EdgeBehavior::from_periodic(p)).collect();
        self.set_edges(&edges)
    }

    /// Per-axis edge behaviour.
    pub fn set_edges(&mut self, edges: &[EdgeBehavior]) -> Result<(), LatticeError> {
        self.shape.check_len("edges", edges.len())?;
        self.edges = SmallVec::from_slice(edges);
        self.invalidate();
        Ok(())
    }

    /// Set the central site.
    pub fn set_site(&mut self, index: &[i32]) -> Result<(), LatticeError> {
        self.shape.check_index(index)?;
        self.centre = Some(SmallVec::from_slice(index));
        self.invalidate();
        Ok(())
    }

    /// Per-axis length of the periodic box.
    ///
    /// Only scales the vectors returned by
    /// [`nearest_image_vector`](Self::nearest_image_vector); the neighbour
    /// list itself is unaffected.
    pub fn set_period(&mut self, period: &[f64]) -> Result<(), LatticeError> {
        check_period(&self.shape, period)?;
        self.period = SmallVec::from_slice(period);
        Ok(())
    }

    /// Apply range, direction, edges and period together.
    ///
    /// Everything is validated before anything changes.
    pub fn configure(&mut self, config: &NeighbourConfig) -> Result<(), LatticeError> {
        config.validate()?;
        check_range(&self.shape, &config.range)?;
        let edges = config.edges_for(self.d());
        self.shape.check_len("edges", edges.len())?;
        let period = config.period_for(self.d());
        check_period(&self.shape, &period)?;

        self.range = SmallVec::from_slice(&config.range);
        self.half_neighbour_count = half_count(&config.range);
        self.furthest_neighbour_delta = self.shape.array_index(&config.range);
        self.edges = edges;
        self.period = period;
        self.direction = config.direction;
        self.invalidate();
        Ok(())
    }

    /// Neighbour box half-widths.
    pub fn range(&self) -> &[i32] {
        &self.range
    }

    /// Current direction filter.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Per-axis edge behaviour.
    pub fn edges(&self) -> &[EdgeBehavior] {
        &self.edges
    }

    /// Per-axis period.
    pub fn period(&self) -> &[f64] {
        &self.period
    }

    /// Central site, if set.
    pub fn site(&self) -> Option<&[i32]> {
        self.centre.as_deref()
    }

    /// Neighbours on one side of the centre in a fully periodic box,
    /// `(∏(2 r[i] + 1) - 1) / 2`.
    pub fn half_neighbour_count(&self) -> usize {
        self.half_neighbour_count
    }

    /// Flat offset of the range vector, i.e. the distance in the flat array
    /// from the centre back to the first down neighbour of an interior site.
    pub fn furthest_neighbour_delta(&self) -> usize {
        self.furthest_neighbour_delta
    }

    /// Recompute the neighbour list if any setting changed, and rewind.
    ///
    /// Fails with [`LatticeError::NotConfigured`] if no central site was
    /// set, or [`LatticeError::IndexOutOfBounds`] if the centre no longer
    /// lies inside a resized lattice.
    pub fn reset(&mut self) -> Result<(), LatticeError> {
        if self.dirty {
            self.rebuild()?;
        }
        self.cursor = 0;
        Ok(())
    }

    /// `true` if [`next`](Iterator::next) will return another neighbour.
    pub fn has_next(&self) -> bool {
        !self.dirty && self.cursor < self.neighbours.len()
    }

    /// Length of the neighbour list computed by the last [`reset`](Self::reset).
    pub fn neighbour_count(&self) -> usize {
        self.neighbours.len()
    }

    /// The whole neighbour list, independent of the iteration cursor.
    pub fn neighbours(&self) -> &[Neighbour] {
        &self.neighbours
    }

    /// Lattice index of `neighbour`.
    pub fn lattice_index(&self, neighbour: &Neighbour) -> Coord {
        self.shape.lattice_index(neighbour.flat)
    }

    /// Per-axis image shift of `neighbour`, each in `{-1, 0, +1}`.
    pub fn image_shift(&self, neighbour: &Neighbour) -> Coord {
        self.weights.decode(neighbour.image)
    }

    /// `true` if `neighbour` was reached by wrapping along some axis.
    pub fn is_wrapped(&self, neighbour: &Neighbour) -> bool {
        neighbour.image != self.weights.unwrapped()
    }

    /// Correction to add to the separation `centre - neighbour` to get the
    /// separation from the neighbour's image nearest the centre, or `None`
    /// if it did not wrap.
    ///
    /// Per axis this is `-shift[i] * period[i]`: a neighbour reached by
    /// wrapping below index 0 gets `+period[i]`, one reached by wrapping
    /// past the last index gets `-period[i]`. The nearest image itself sits
    /// at `position - vector`.
    pub fn nearest_image_vector(&self, neighbour: &Neighbour) -> Option<SmallVec<[f64; 4]>> {
        if !self.is_wrapped(neighbour) {
            return None;
        }
        Some(
            self.image_shift(neighbour)
                .iter()
                .zip(&self.period)
                .map(|(&s, &p)| -f64::from(s) * p)
                .collect(),
        )
    }

    /// Resolve the neighbour list against `lattice`.
    ///
    /// Fails with [`LatticeError::StaleLattice`] if `lattice` does not have
    /// the shape the iterator is synced with, and with
    /// [`LatticeError::NotConfigured`] if the list is out of date.
    pub fn sites<'a, S>(
        &'a self,
        lattice: &'a RectangularLattice<S>,
    ) -> Result<impl Iterator<Item = (&'a S, Neighbour)> + 'a, LatticeError> {
        if lattice.shape() != &self.shape {
            return Err(LatticeError::StaleLattice {
                synced: self.shape.generation(),
                current: lattice.generation(),
            });
        }
        if self.dirty {
            return Err(LatticeError::NotConfigured {
                reason: "neighbour list is out of date; call reset",
            });
        }
        let sites = lattice.sites();
        Ok(self.neighbours.iter().map(move |&n| (&sites[n.flat], n)))
    }

    fn invalidate(&mut self) {
        self.dirty = true;
        self.cursor = self.neighbours.len();
    }

    fn rebuild(&mut self) -> Result<(), LatticeError> {
        let centre = self.centre.as_ref().ok_or(LatticeError::NotConfigured {
            reason: "central site not set",
        })?;
        self.shape.check_index(centre)?;

        let runs: SmallVec<[SmallVec<[Run; 5]>; 4]> = (0..self.d())
            .map(|axis| {
                let runs = axis_runs(
                    centre[axis],
                    self.range[axis],
                    self.shape.size()[axis],
                    self.edges[axis],
                );
                trace!("axis {axis}: runs {runs:?}");
                runs
            })
            .collect();

        self.neighbours.clear();
        let mut gather = Gather {
            runs: &runs,
            jumps: self.shape.jumps(),
            weights: &self.weights,
            out: &mut self.neighbours,
        };
        if self.direction.includes_down() {
            gather.collect(0, 0, 0, Part::Down);
        }
        if self.direction.includes_up() {
            gather.collect(0, 0, 0, Part::Up);
        }

        debug!(
            "neighbour list for {:?}: range {:?}, {} ({}) neighbours",
            centre,
            self.range.as_slice(),
            self.neighbours.len(),
            self.direction
        );
        self.dirty = false;
        Ok(())
    }
}

impl Iterator for SquareNeighbourIterator {
    type Item = Neighbour;

    fn next(&mut self) -> Option<Neighbour> {
        if !self.has_next() {
            return None;
        }
        let n = self.neighbours[self.cursor];
        self.cursor += 1;
        Some(n)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.dirty {
            0
        } else {
            self.neighbours.len() - self.cursor
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for SquareNeighbourIterator {}

/// Recursive collector over the per-axis runs of one box.
struct Gather<'a> {
    runs: &'a [SmallVec<[Run; 5]>],
    jumps: &'a [usize],
    weights: &'a ImageWeights,
    out: &'a mut Vec<Neighbour>,
}

impl Gather<'_> {
    /// Collect `part` of the sub-box spanned by axes `axis..D`, whose first
    /// site is at flat offset `base` with image code `code` so far.
    fn collect(&mut self, axis: usize, base: usize, code: u64, part: Part) {
        let runs = self.runs;
        let last = axis + 1 == runs.len();
        let jump = self.jumps[axis];
        let weight = self.weights.weight(axis);

        for run in &runs[axis] {
            let sub = match (part, run.side) {
                (Part::Full, _) => Part::Full,
                (Part::Down, Side::Low) | (Part::Up, Side::High) => Part::Full,
                (Part::Down | Part::Up, Side::Centre) if !last => part,
                _ => continue,
            };
            let code = code + (run.shift + 1) as u64 * weight;
            let first = base + run.start * jump;
            if last {
                self.out.extend((0..run.len).map(|k| Neighbour {
                    flat: first + k,
                    image: code,
                }));
            } else {
                for k in 0..run.len {
                    self.collect(axis + 1, first + k * jump, code, sub);
                }
            }
        }
    }
}

/// Split one axis of the box around `centre` into contiguous runs, in
/// ascending offset order.
fn axis_runs(centre: i32, range: i32, size: u32, edge: EdgeBehavior) -> SmallVec<[Run; 5]> {
    let (c, r, n) = (centre as usize, range as usize, size as usize);
    let wrap = edge.is_periodic();
    let mut runs = SmallVec::new();

    if r > c && wrap {
        runs.push(Run {
            start: n - (r - c),
            len: r - c,
            shift: -1,
            side: Side::Low,
        });
    }
    let lo = c.saturating_sub(r);
    if c > lo {
        runs.push(Run {
            start: lo,
            len: c - lo,
            shift: 0,
            side: Side::Low,
        });
    }
    runs.push(Run {
        start: c,
        len: 1,
        shift: 0,
        side: Side::Centre,
    });
    let hi = (c + r).min(n - 1);
    if hi > c {
        runs.push(Run {
            start: c + 1,
            len: hi - c,
            shift: 0,
            side: Side::High,
        });
    }
    if c + r >= n && wrap {
        runs.push(Run {
            start: 0,
            len: c + r + 1 - n,
            shift: 1,
            side: Side::High,
        });
    }
    runs
}

fn check_range(shape: &LatticeShape, range: &[i32]) -> Result<(), LatticeError> {
    shape.check_len("range", range.len())?;
    for (axis, (&r, &size)) in range.iter().zip(shape.size()).enumerate() {
        if r < 0 {
            return Err(LatticeError::NegativeRange { axis, range: r });
        }
        if 2 * i64::from(r) + 1 > i64::from(size) {
            return Err(LatticeError::RangeTooLarge {
                axis,
                range: r,
                size,
            });
        }
    }
    Ok(())
}

fn check_period(shape: &LatticeShape, period: &[f64]) -> Result<(), LatticeError> {
    shape.check_len("period", period.len())?;
    match period
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        Some((axis, &value)) => Err(LatticeError::InvalidPeriod { axis, value }),
        None => Ok(()),
    }
}

/// `(∏(2 r[i] + 1) - 1) / 2` for a range already checked against a shape.
fn half_count(range: &[i32]) -> usize {
    let boxed: usize = range.iter().map(|&r| 2 * r as usize + 1).product();
    (boxed - 1) / 2
}
