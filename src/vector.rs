use std::alloc::{self, Layout};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};

use crate::error::{OutOfRange, Result};

/// A growable, exclusively owned array with bounds-checked access.
///
/// Elements live in one contiguous heap buffer of `capacity()` slots, of
/// which the first `size()` are initialized. Appending past the end
/// reallocates to `2 * size + 1` slots, so a run of `push_back` calls is
/// amortized O(1).
///
/// Any borrow into the vector (from `get`, indexing, `iter`, `find`, ...)
/// must end before a call that can reallocate or shift elements
/// (`push_back`, `insert`, `erase`, `clear`, `take`). The borrow checker
/// enforces this.
pub struct Vector<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    _marker: PhantomData<T>,
}

// SAFETY: Vector<T> owns its elements outright, like Box<[T]>.
unsafe impl<T: Send> Send for Vector<T> {}
// SAFETY: shared access only ever hands out &T.
unsafe impl<T: Sync> Sync for Vector<T> {}

impl<T> Vector<T> {
    /// Creates an empty vector. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a vector of `len` default values; capacity equals `len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_fn(len, |_| T::default())
    }

    /// Creates a vector holding `len` independent clones of `value`.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(len, |_| value.clone())
    }

    /// Copies `items` in order into a vector whose capacity equals its size.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_fn(items.len(), |i| items[i].clone())
    }

    /// Builds exactly `len` elements, calling `f` with each index in turn.
    ///
    /// If `f` panics, the elements built so far are dropped with the
    /// partial vector.
    pub(crate) fn from_fn(len: usize, mut f: impl FnMut(usize) -> T) -> Self {
        let mut out = Self::with_capacity(len);
        for i in 0..len {
            out.push_back(f(i));
        }
        out
    }

    fn with_capacity(cap: usize) -> Self {
        Self {
            ptr: Self::allocate(cap),
            cap,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Number of live elements.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.check(index)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { &*self.ptr.as_ptr().add(index) })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check(index)?;
        // SAFETY: index < len, and &mut self guarantees uniqueness.
        Ok(unsafe { &mut *self.ptr.as_ptr().add(index) })
    }

    /// Appends `value`, growing the buffer to `2 * size + 1` slots when full.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.cap {
            self.grow();
        }

        // SAFETY: len < cap after growing, so the slot is allocated and free.
        unsafe {
            ptr::write(self.ptr.as_ptr().add(self.len), value);
        }
        // Only count the element once it is written.
        self.len += 1;
    }

    /// Inserts `value` at `index`, shifting everything from `index` on one
    /// slot to the right. `index == size()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index == self.len {
            self.push_back(value);
            return Ok(());
        }
        self.check(index)?;

        if self.len == self.cap {
            self.grow();
        }

        unsafe {
            // SAFETY: index < len < cap, so [index, len] is inside the buffer.
            let p = self.ptr.as_ptr().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    pub fn erase(&mut self, index: usize) -> Result<T> {
        self.check(index)?;

        unsafe {
            self.len -= 1;
            // SAFETY: index was < the old len, so p is initialized; the
            // bitwise move out is followed by closing the gap over it.
            let p = self.ptr.as_ptr().add(index);
            let removed = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - index);
            Ok(removed)
        }
    }

    /// Drops every element and swaps in a fresh buffer of the same capacity.
    ///
    /// Unlike dropping the vector, the capacity survives: a cleared vector
    /// can take `capacity()` pushes before it reallocates again.
    pub fn clear(&mut self) {
        let len = self.len;
        // Zero first so a panicking destructor cannot lead to a double drop.
        self.len = 0;
        unsafe {
            // SAFETY: the first `len` slots were initialized and are no
            // longer reachable through `self`.
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len));
        }

        let fresh = Self::allocate(self.cap);
        // SAFETY: the old buffer holds no live elements any more.
        unsafe { Self::deallocate(self.ptr, self.cap) };
        self.ptr = fresh;
        tracing::trace!(capacity = self.cap, "vector storage renewed by clear");
    }

    /// Overwrites every live element with `T::default()`.
    pub fn reset(&mut self)
    where
        T: Default,
    {
        for slot in self.iter_mut() {
            *slot = T::default();
        }
    }

    /// First element equal to `value`, or `None` when the scan reaches the end.
    pub fn find(&self, value: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.iter().find(|x| *x == value)
    }

    pub fn find_mut(&mut self, value: &T) -> Option<&mut T>
    where
        T: PartialEq,
    {
        self.iter_mut().find(|x| **x == *value)
    }

    /// Index of the first element equal to `value`, or `end()` if absent.
    pub fn position(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.iter().position(|x| x == value).unwrap_or(self.end())
    }

    /// One past the last live index.
    pub fn end(&self) -> usize {
        self.len
    }

    /// Moves the contents out, leaving `self` empty and without a buffer.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first len slots are initialized; ptr is non-null and
        // aligned even when nothing is allocated.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, plus &mut self guarantees uniqueness.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Prints the live elements to stdout, each followed by a space.
    pub fn print(&self)
    where
        T: fmt::Display,
    {
        print!("{self}");
    }

    /// Hands the buffer over to the caller without dropping anything.
    pub(crate) fn into_raw_parts(self) -> (NonNull<T>, usize, usize) {
        let this = ManuallyDrop::new(self);
        (this.ptr, this.len, this.cap)
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            tracing::debug!(index, len = self.len, "index out of range");
            Err(OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    fn grow(&mut self) {
        let new_cap = self
            .len
            .checked_mul(2)
            .and_then(|c| c.checked_add(1))
            .unwrap_or_else(|| capacity_overflow());
        self.reallocate(new_cap);
    }

    fn reallocate(&mut self, new_cap: usize) {
        debug_assert!(new_cap > self.cap);
        let old_layout = Self::layout(self.cap);
        let new_layout = Self::layout(new_cap);

        self.ptr = if old_layout.size() == 0 {
            Self::allocate(new_cap)
        } else {
            // SAFETY: the old buffer was allocated with old_layout, and the
            // new size is non-zero because it exceeds the old one.
            let raw = unsafe {
                alloc::realloc(self.ptr.as_ptr() as *mut u8, old_layout, new_layout.size())
            };
            match NonNull::new(raw as *mut T) {
                Some(p) => p,
                None => alloc::handle_alloc_error(new_layout),
            }
        };
        tracing::trace!(
            old_capacity = self.cap,
            new_capacity = new_cap,
            "vector storage reallocated"
        );
        self.cap = new_cap;
    }

    fn layout(cap: usize) -> Layout {
        match Layout::array::<T>(cap) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        }
    }

    /// Zero-sized layouts get a dangling pointer instead of an allocation.
    fn allocate(cap: usize) -> NonNull<T> {
        let layout = Self::layout(cap);
        if layout.size() == 0 {
            return NonNull::dangling();
        }

        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw as *mut T) {
            Some(p) => p,
            None => alloc::handle_alloc_error(layout),
        }
    }

    /// # Safety
    ///
    /// `ptr` must come from `allocate`/`reallocate` with exactly `cap` slots
    /// and must not be used afterwards. Elements are not dropped.
    pub(crate) unsafe fn deallocate(ptr: NonNull<T>, cap: usize) {
        let layout = Self::layout(cap);
        if layout.size() != 0 {
            // SAFETY: guaranteed by the caller.
            unsafe { alloc::dealloc(ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        unsafe {
            // SAFETY: exactly the first len slots are live.
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
            Self::deallocate(self.ptr, self.cap);
        }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy. The copy's capacity is the source's size, not its capacity.
impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics with the [`OutOfRange`] message when `index >= size()`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Space-separated live elements; a debugging aid, not a stable format.
impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self {
            write!(f, "{item} ")?;
        }
        Ok(())
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vector<U>> for Vector<T> {
    fn eq(&self, other: &Vector<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(items: [T; N]) -> Self {
        let mut out = Self::with_capacity(N);
        for item in items {
            out.push_back(item);
        }
        out
    }
}

impl<T: Clone> From<&[T]> for Vector<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T> From<Vec<T>> for Vector<T> {
    fn from(items: Vec<T>) -> Self {
        let mut out = Self::with_capacity(items.len());
        for item in items {
            out.push_back(item);
        }
        out
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for item in iter {
            out.push_back(item);
        }
        out
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Builds a [`Vector`] from a literal list, or `n` clones of one value.
///
/// ```
/// use hypervec::vector;
///
/// let v = vector![1, 2, 3];
/// assert_eq!(v.size(), 3);
/// assert_eq!(v.capacity(), 3);
///
/// let zeros = vector![0u8; 4];
/// assert_eq!(zeros.as_slice(), &[0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! vector {
    () => {
        $crate::Vector::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::Vector::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Vector::from([$($x),+])
    };
}
