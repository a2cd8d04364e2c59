//! Flat-array rectangular lattice of arbitrary dimension.

use crate::error::LatticeError;
use crate::shape::LatticeShape;
use log::debug;
use smallvec::SmallVec;
use std::fmt;
use trellis_core::{Coord, Generation};

/// Builds the site stored at each lattice index.
///
/// Called once per slot, in row-major order, every time the lattice is
/// resized. Implemented for every `FnMut(&LatticeShape, &[i32]) -> S`
/// closure; implement it on a struct when the factory carries state that
/// callers want to inspect afterwards.
pub trait SiteFactory<S> {
    /// Make the site for `index` of a lattice with the given `shape`.
    fn make_site(&mut self, shape: &LatticeShape, index: &[i32]) -> S;
}

impl<S, F> SiteFactory<S> for F
where
    F: FnMut(&LatticeShape, &[i32]) -> S,
{
    fn make_site(&mut self, shape: &LatticeShape, index: &[i32]) -> S {
        self(shape, index)
    }
}

/// A rectangular lattice of arbitrary dimension `D`, storing one site of
/// type `S` per index in a flat row-major array.
///
/// The lattice is constructed empty; [`set_size`](Self::set_size) allocates
/// the sites, invoking the [`SiteFactory`] once per slot. Every resize
/// discards the previous sites and advances the lattice
/// [`generation`](Self::generation).
///
/// # Examples
///
/// ```
/// use trellis_lattice::{LatticeShape, RectangularLattice};
///
/// let mut lattice = RectangularLattice::new(3, |shape: &LatticeShape, idx: &[i32]| {
///     shape.array_index(idx)
/// })
/// .unwrap();
/// lattice.set_size(&[2, 2, 3]).unwrap();
///
/// assert_eq!(lattice.site_count(), 12);
/// assert_eq!(*lattice.site(&[1, 0, 2]), 8);
/// assert_eq!(lattice.lattice_index(8).as_slice(), &[1, 0, 2]);
/// ```
pub struct RectangularLattice<S> {
    shape: LatticeShape,
    sites: Vec<S>,
    factory: Box<dyn SiteFactory<S> + Send>,
}

impl<S> fmt::Debug for RectangularLattice<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RectangularLattice")
            .field("size", &self.shape.size())
            .field("jumps", &self.shape.jumps())
            .field("site_count", &self.sites.len())
            .field("generation", &self.shape.generation())
            .finish()
    }
}

impl<S> RectangularLattice<S> {
    /// An empty `d`-dimensional lattice whose sites will be built by `factory`.
    ///
    /// Returns `Err(LatticeError::ZeroDimension)` if `d == 0`.
    pub fn new<F>(d: usize, factory: F) -> Result<Self, LatticeError>
    where
        F: FnMut(&LatticeShape, &[i32]) -> S + Send + 'static,
    {
        Self::from_factory(d, factory)
    }

    /// Like [`new`](Self::new), for any [`SiteFactory`] implementation.
    pub fn from_factory<F>(d: usize, factory: F) -> Result<Self, LatticeError>
    where
        F: SiteFactory<S> + Send + 'static,
    {
        Ok(Self {
            shape: LatticeShape::empty(d)?,
            sites: Vec::new(),
            factory: Box::new(factory),
        })
    }

    /// Number of dimensions.
    pub fn d(&self) -> usize {
        self.shape.d()
    }

    /// Extent along each axis. All zero before the first resize.
    pub fn size(&self) -> &[u32] {
        self.shape.size()
    }

    /// Total number of sites.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Index arithmetic and generation of the current layout.
    pub fn shape(&self) -> &LatticeShape {
        &self.shape
    }

    /// Rebuild counter; advances on every [`set_size`](Self::set_size).
    pub fn generation(&self) -> Generation {
        self.shape.generation()
    }

    /// Resize the lattice and rebuild every site.
    ///
    /// Validates `new_size` (one non-zero extent per dimension, site count
    /// fitting in `usize`), recomputes the jump counts, allocates a fresh
    /// array and calls the site factory once per slot in row-major order.
    /// On error the lattice is left unchanged. Runs in O(N) time and space.
    pub fn set_size(&mut self, new_size: &[u32]) -> Result<(), LatticeError> {
        let shape = self.shape.resized(new_size)?;
        let count = shape.site_count();

        let mut sites = Vec::with_capacity(count);
        let mut idx: Coord = SmallVec::from_elem(0, shape.d());
        for _ in 0..count {
            sites.push(self.factory.make_site(&shape, &idx));
            shape.increment(&mut idx);
        }

        debug!(
            "rebuilt {}-D lattice: size {:?}, {} sites, generation {}",
            shape.d(),
            shape.size(),
            count,
            shape.generation()
        );
        self.shape = shape;
        self.sites = sites;
        Ok(())
    }

    /// The site at `index`.
    ///
    /// O(1) and unchecked beyond the array bound: an out-of-range component
    /// may address a different site. Panics if the computed offset lies past
    /// the end of the array. Use [`site_checked`](Self::site_checked) for
    /// untrusted indices.
    #[inline]
    pub fn site(&self, index: &[i32]) -> &S {
        &self.sites[self.shape.array_index(index)]
    }

    /// Mutable access to the site at `index`; unchecked like [`site`](Self::site).
    #[inline]
    pub fn site_mut(&mut self, index: &[i32]) -> &mut S {
        let flat = self.shape.array_index(index);
        &mut self.sites[flat]
    }

    /// The site at `index`, verifying every component is in range.
    pub fn site_checked(&self, index: &[i32]) -> Result<&S, LatticeError> {
        let flat = self.shape.checked_array_index(index)?;
        Ok(&self.sites[flat])
    }

    /// The site at flat offset `flat`, if any.
    pub fn site_at(&self, flat: usize) -> Option<&S> {
        self.sites.get(flat)
    }

    /// All sites in flat (row-major) order.
    pub fn sites(&self) -> &[S] {
        &self.sites
    }

    /// Mutable view of all sites in flat order.
    pub fn sites_mut(&mut self) -> &mut [S] {
        &mut self.sites
    }

    /// Flat offset of `index`. See [`LatticeShape::array_index`].
    #[inline]
    pub fn array_index(&self, index: &[i32]) -> usize {
        self.shape.array_index(index)
    }

    /// Lattice index of flat offset `flat`. See [`LatticeShape::lattice_index`].
    pub fn lattice_index(&self, flat: usize) -> Coord {
        self.shape.lattice_index(flat)
    }

    /// Iterate over `(index, site)` pairs in flat order.
    pub fn iter(&self) -> Sites<'_, S> {
        Sites {
            shape: &self.shape,
            inner: self.sites.iter(),
            index: SmallVec::from_elem(0, self.shape.d()),
            started: false,
        }
    }
}

impl<'a, S> IntoIterator for &'a RectangularLattice<S> {
    type Item = (Coord, &'a S);
    type IntoIter = Sites<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the sites of a [`RectangularLattice`] with their indices.
///
/// Created by [`RectangularLattice::iter`]. The index is advanced with the
/// same odometer used to build the lattice, so no division is performed.
pub struct Sites<'a, S> {
    shape: &'a LatticeShape,
    inner: std::slice::Iter<'a, S>,
    index: Coord,
    started: bool,
}

impl<'a, S> Iterator for Sites<'a, S> {
    type Item = (Coord, &'a S);

    fn next(&mut self) -> Option<Self::Item> {
        let site = self.inner.next()?;
        if self.started {
            self.shape.increment(&mut self.index);
        }
        self.started = true;
        Some((self.index.clone(), site))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S> ExactSizeIterator for Sites<'_, S> {}
