//! Fixed-shape N-dimensional arrays built by nesting [`Vector`]s.
//!
//! A `Hypercube<T, 3>` is a vector of `Hypercube<T, 2>`, which is a vector
//! of `Hypercube<T, 1>`, which is a vector of `T`. Every axis has the same
//! extent, fixed at construction.
//!
//! ```
//! use hypervec::Hypercube;
//!
//! let mut cube: Hypercube<i32, 3> = Hypercube::with_side(4);
//! cube[1][2][3] = 7;
//! assert_eq!(cube[1][2][3], 7);
//! assert!(cube[1][2].get(4).is_err());
//! ```
//!
//! Indexing short of the last axis yields an [`Axis`], which is unsized and
//! so cannot be assigned over, swapped or taken:
//!
//! ```compile_fail
//! use hypervec::Hypercube;
//!
//! let mut cube: Hypercube<i32, 2> = Hypercube::with_side(3);
//! cube[0] = Hypercube::with_side(7);
//! ```
//!
//! ```compile_fail
//! use hypervec::Hypercube;
//!
//! let mut cube: Hypercube<i32, 2> = Hypercube::with_side(3);
//! let _row = std::mem::take(&mut cube[1]);
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{OutOfRange, Result};
use crate::vector::Vector;

/// Largest dimension with a [`Dimension`] impl.
pub const MAX_DIMENSION: usize = 12;

/// Type-level dimension count. Only `Dim<1>` through `Dim<MAX_DIMENSION>`
/// implement [`Dimension`], so `Hypercube<T, 0>` does not type-check.
pub struct Dim<const N: usize>;

/// Maps a dimension count to what its cells are and what one index step
/// hands out.
pub trait Dimension {
    /// Stored cell: `T` for one dimension, the next smaller cube otherwise.
    type Cell<T>;
    /// Borrowed view of a cell: `T` itself, or the smaller cube's [`Axis`].
    type Slot<T>: ?Sized;

    /// A cell for a cube with `side` slots per axis, defaults all the way down.
    fn cell<T: Default>(side: usize) -> Self::Cell<T>;
    fn slot<'a, T: 'a>(cell: &'a Self::Cell<T>) -> &'a Self::Slot<T>;
    fn slot_mut<'a, T: 'a>(cell: &'a mut Self::Cell<T>) -> &'a mut Self::Slot<T>;
}

impl Dimension for Dim<1> {
    type Cell<T> = T;
    type Slot<T> = T;

    fn cell<T: Default>(_side: usize) -> T {
        T::default()
    }

    fn slot<'a, T: 'a>(cell: &'a T) -> &'a T {
        cell
    }

    fn slot_mut<'a, T: 'a>(cell: &'a mut T) -> &'a mut T {
        cell
    }
}

macro_rules! nested_dimension {
    ($($dim:literal => $inner:literal),+ $(,)?) => {$(
        impl Dimension for Dim<$dim> {
            type Cell<T> = Hypercube<T, $inner>;
            type Slot<T> = Axis<T, $inner>;

            fn cell<T: Default>(side: usize) -> Hypercube<T, $inner> {
                Hypercube::with_side(side)
            }

            fn slot<'a, T: 'a>(cell: &'a Hypercube<T, $inner>) -> &'a Axis<T, $inner> {
                cell.as_axis()
            }

            fn slot_mut<'a, T: 'a>(
                cell: &'a mut Hypercube<T, $inner>,
            ) -> &'a mut Axis<T, $inner> {
                cell.as_axis_mut()
            }
        }
    )+};
}

nested_dimension! {
    2 => 1,
    3 => 2,
    4 => 3,
    5 => 4,
    6 => 5,
    7 => 6,
    8 => 7,
    9 => 8,
    10 => 9,
    11 => 10,
    12 => 11,
}

/// An equal-sided `DIM`-dimensional array addressed by chained indexing.
///
/// Only indexing is exposed. The backing vector stays private, and every
/// step short of the last axis hands out an unsized [`Axis`], so no axis
/// can be grown, shrunk, replaced or cleared after construction. Only the
/// scalar cells are writable.
pub struct Hypercube<T, const DIM: usize>
where
    Dim<DIM>: Dimension,
{
    cells: Vector<<Dim<DIM> as Dimension>::Cell<T>>,
}

impl<T, const DIM: usize> Hypercube<T, DIM>
where
    Dim<DIM>: Dimension,
{
    /// An empty cube; every index is out of range.
    pub fn new() -> Self {
        Self {
            cells: Vector::new(),
        }
    }

    /// A cube with `side` slots on every axis, each scalar `T::default()`.
    ///
    /// Every sub-cube is built on its own, so no two cells share storage.
    pub fn with_side(side: usize) -> Self
    where
        T: Default,
    {
        Self {
            cells: Vector::from_fn(side, |_| <Dim<DIM> as Dimension>::cell::<T>(side)),
        }
    }

    pub fn get(&self, index: usize) -> Result<&<Dim<DIM> as Dimension>::Slot<T>> {
        self.as_axis().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut <Dim<DIM> as Dimension>::Slot<T>> {
        self.as_axis_mut().get_mut(index)
    }

    pub(crate) fn as_axis(&self) -> &Axis<T, DIM> {
        Axis::from_cells(self.cells.as_slice())
    }

    pub(crate) fn as_axis_mut(&mut self) -> &mut Axis<T, DIM> {
        Axis::from_cells_mut(self.cells.as_mut_slice())
    }
}

impl<T, const DIM: usize> Default for Hypercube<T, DIM>
where
    Dim<DIM>: Dimension,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const DIM: usize> Index<usize> for Hypercube<T, DIM>
where
    Dim<DIM>: Dimension,
{
    type Output = <Dim<DIM> as Dimension>::Slot<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_axis()[index]
    }
}

impl<T, const DIM: usize> IndexMut<usize> for Hypercube<T, DIM>
where
    Dim<DIM>: Dimension,
{
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_axis_mut()[index]
    }
}

impl<T, const DIM: usize> Clone for Hypercube<T, DIM>
where
    Dim<DIM>: Dimension,
    <Dim<DIM> as Dimension>::Cell<T>: Clone,
{
    fn clone(&self) -> Self {
        Self {
            cells: self.cells.clone(),
        }
    }
}

impl<T, const DIM: usize> PartialEq for Hypercube<T, DIM>
where
    Dim<DIM>: Dimension,
    <Dim<DIM> as Dimension>::Cell<T>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl<T, const DIM: usize> fmt::Debug for Hypercube<T, DIM>
where
    Dim<DIM>: Dimension,
    <Dim<DIM> as Dimension>::Cell<T>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.cells, f)
    }
}

/// Borrowed view of one `DIM`-dimensional cube inside a larger one.
///
/// Unsized like `str`, so a `&mut Axis` can index into its cells but can
/// never be overwritten, swapped or taken as a whole.
#[repr(transparent)]
pub struct Axis<T, const DIM: usize>
where
    Dim<DIM>: Dimension,
{
    cells: [<Dim<DIM> as Dimension>::Cell<T>],
}

impl<T, const DIM: usize> Axis<T, DIM>
where
    Dim<DIM>: Dimension,
{
    fn from_cells(cells: &[<Dim<DIM> as Dimension>::Cell<T>]) -> &Self {
        // SAFETY: Axis is a transparent wrapper around the slice.
        unsafe { &*(cells as *const [<Dim<DIM> as Dimension>::Cell<T>] as *const Self) }
    }

    fn from_cells_mut(cells: &mut [<Dim<DIM> as Dimension>::Cell<T>]) -> &mut Self {
        // SAFETY: as above; the unique borrow carries over.
        unsafe { &mut *(cells as *mut [<Dim<DIM> as Dimension>::Cell<T>] as *mut Self) }
    }

    pub fn get(&self, index: usize) -> Result<&<Dim<DIM> as Dimension>::Slot<T>> {
        let len = self.cells.len();
        match self.cells.get(index) {
            Some(cell) => Ok(<Dim<DIM> as Dimension>::slot(cell)),
            None => Err(out_of_range(index, len)),
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut <Dim<DIM> as Dimension>::Slot<T>> {
        let len = self.cells.len();
        match self.cells.get_mut(index) {
            Some(cell) => Ok(<Dim<DIM> as Dimension>::slot_mut(cell)),
            None => Err(out_of_range(index, len)),
        }
    }
}

fn out_of_range(index: usize, len: usize) -> OutOfRange {
    tracing::debug!(index, len, "hypercube index out of range");
    OutOfRange { index, len }
}

impl<T, const DIM: usize> Index<usize> for Axis<T, DIM>
where
    Dim<DIM>: Dimension,
{
    type Output = <Dim<DIM> as Dimension>::Slot<T>;

    /// # Panics
    ///
    /// Panics with the [`OutOfRange`] message when `index` is past the side.
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(slot) => slot,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const DIM: usize> IndexMut<usize> for Axis<T, DIM>
where
    Dim<DIM>: Dimension,
{
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(slot) => slot,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const DIM: usize> PartialEq for Axis<T, DIM>
where
    Dim<DIM>: Dimension,
    <Dim<DIM> as Dimension>::Cell<T>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl<T, const DIM: usize> fmt::Debug for Axis<T, DIM>
where
    Dim<DIM>: Dimension,
    <Dim<DIM> as Dimension>::Cell<T>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.cells, f)
    }
}
