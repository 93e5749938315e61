use thiserror::Error;

/// An index fell outside the valid range of the array it was applied to.
///
/// For reads, writes and `erase` the valid range is `0..len`; `insert`
/// additionally admits `len` itself as the append position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} is out of range for length {len}")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

pub type Result<T, E = OutOfRange> = std::result::Result<T, E>;
