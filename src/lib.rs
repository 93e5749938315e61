//! A growable owned array with bounds-checked access, and a fixed-shape
//! hypercube built on top of it.
//!
//! ```
//! use hypervec::vector;
//!
//! let mut v = vector![1, 2, 3];
//! v.insert(1, 9).unwrap();
//! assert_eq!(v.as_slice(), &[1, 9, 2, 3]);
//! v.erase(0).unwrap();
//! assert_eq!(v.as_slice(), &[9, 2, 3]);
//! assert_eq!(v.find(&2), Some(&2));
//! assert_eq!(v.position(&99), v.end());
//! ```

pub mod error;
pub mod hypercube;
pub mod iter;
pub mod vector;

pub use error::{OutOfRange, Result};
pub use hypercube::{Axis, Dim, Dimension, Hypercube, MAX_DIMENSION};
pub use iter::IntoIter;
pub use vector::Vector;

#[cfg(test)]
mod tests;
