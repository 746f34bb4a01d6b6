//! Fenced 32-bit memory access
//!
//! Each access is bracketed by a sequentially-consistent fence on both sides,
//! so it can neither move before earlier memory operations nor after later
//! ones issued by the same execution context.
//!
//! The load/store itself is a plain volatile access, not an atomic one. It
//! is therefore *not* atomic with respect to another context writing the same
//! slot: concurrent writers must be serialized by the caller.

use std::sync::atomic::{fence, Ordering};

/// Store `value` into the 32-bit slot at `address` with full fences before
/// and after the store.
///
/// # Safety
/// - `address` must be valid for writes of 4 bytes for the duration of the call
/// - `address` must be 4-byte aligned
/// - No other context may access the slot concurrently without external
///   synchronization
#[inline]
pub unsafe fn write(address: *mut u32, value: u32) {
    fence(Ordering::SeqCst);
    std::ptr::write_volatile(address, value);
    fence(Ordering::SeqCst);
}

/// Load the 32-bit slot at `address` with full fences before and after the
/// load.
///
/// # Safety
/// Same contract as [`write`], for reads.
#[inline]
pub unsafe fn read(address: *const u32) -> u32 {
    fence(Ordering::SeqCst);
    let value = std::ptr::read_volatile(address);
    fence(Ordering::SeqCst);
    value
}
