use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use crate::vector::Vector;

/// Owning iterator over the elements of a [`Vector`].
///
/// Takes over the vector's buffer; elements not yielded are dropped with
/// the iterator.
pub struct IntoIter<T> {
    buf: NonNull<T>,
    cap: usize,
    head: usize,
    tail: usize,
    _marker: PhantomData<T>,
}

// SAFETY: same ownership story as Vector<T>.
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [head, tail) are initialized and owned by the iterator.
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr().add(self.head), self.tail - self.head) }
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (buf, len, cap) = self.into_raw_parts();
        IntoIter {
            buf,
            cap,
            head: 0,
            tail: len,
            _marker: PhantomData,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        // SAFETY: head < tail, so the slot is live; advancing head gives
        // up ownership of it.
        let item = unsafe { ptr::read(self.buf.as_ptr().add(self.head)) };
        self.head += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        // SAFETY: the old tail - 1 was live and is now outside [head, tail).
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.tail)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        unsafe {
            // 1. drop whatever was not consumed
            let rest = self.buf.as_ptr().add(self.head);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(rest, self.tail - self.head));
            // 2. release the buffer
            Vector::<T>::deallocate(self.buf, self.cap);
        }
    }
}
