//! Error types for FencedMem

use std::io;
use thiserror::Error;

/// Result type for FencedMem operations
pub type Result<T> = std::result::Result<T, FencedError>;

/// Errors that can occur outside the raw fenced accessor
#[derive(Debug, Error)]
pub enum FencedError {
    /// Null pointer handed to a register constructor
    #[error("Null register address")]
    NullAddress,

    /// Pointer not aligned for a 32-bit access
    #[error("Misaligned register address 0x{address:X}: requires {align}-byte alignment")]
    Misaligned { address: usize, align: usize },

    /// Word index past the end of a region
    #[error("Word index {index} out of bounds for region of {words} words")]
    OutOfBounds { index: usize, words: usize },

    /// Failed to create shared memory
    #[error("Failed to create shared memory '{name}': {source}")]
    ShmCreate {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Failed to open shared memory
    #[error("Failed to open shared memory '{name}': {source}")]
    ShmOpen {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Failed to map memory
    #[error("Failed to map memory: {0}")]
    Mmap(#[source] io::Error),

    /// Failed to truncate shared memory
    #[error("Failed to set shared memory size: {0}")]
    Truncate(#[source] io::Error),

    /// Namespace too long
    #[error("Namespace too long: max {max} chars, got {got}")]
    NamespaceTooLong { max: usize, got: usize },

    /// Region size is zero or not a whole number of 32-bit words
    #[error("Invalid region size: {0} bytes")]
    InvalidRegionSize(usize),

    /// Word count whose byte size does not fit in usize
    #[error("Region of {0} words is too large to map")]
    RegionTooLarge(usize),

    /// Region name contains a NUL byte
    #[error("Invalid region name '{0}'")]
    InvalidName(String),
}
