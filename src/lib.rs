//! FencedMem - fully fenced 32-bit memory access
//!
//! A single 32-bit load or store bracketed by sequentially-consistent fences,
//! for memory-mapped registers and memory shared between execution contexts.
//!
//! # The primitive
//!
//! - [`fence`]: the raw `write`/`read` pair on `*mut u32` / `*const u32`.
//!   Everything else in the crate is built on these two functions.
//! - [`bindings`]: the same pair exported with a C ABI
//!
//! # Conveniences
//!
//! - [`register`]: a checked handle that borrows one slot
//! - [`shm`]: POSIX shared memory mapped as words, handing out registers
//!
//! None of these make the access atomic. Concurrent writers to one address
//! must be serialized by the caller.

pub mod error;
pub mod fence;
pub mod register;
pub mod shm;
pub mod bindings;

pub use error::{FencedError, Result};
pub use fence::{read, write};
pub use register::Register;
pub use shm::{RegionConfig, SharedRegion};
