//! Typed handle to a single 32-bit slot accessed through the fenced accessor

use crate::error::{FencedError, Result};
use crate::fence;
use std::cell::UnsafeCell;
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Required alignment of a register slot
pub const REGISTER_ALIGN: usize = std::mem::align_of::<u32>();

/// Borrowed handle to a 32-bit slot
///
/// Null and misaligned addresses are rejected at construction. Every
/// `read`/`write` is fully fenced. The handle borrows the slot for `'a`, so
/// it cannot outlive the memory it points at:
///
/// ```compile_fail
/// use fenced_mem::Register;
///
/// let reg = {
///     let mut slot = 0u32;
///     Register::from_mut(&mut slot)
/// };
/// reg.read();
/// ```
///
/// It is neither `Send` nor `Sync`. Copies stay on one thread, so safe code
/// cannot race two non-atomic writes on the slot:
///
/// ```compile_fail
/// use fenced_mem::Register;
///
/// let mut slot = 0u32;
/// let reg = Register::from_mut(&mut slot);
/// std::thread::scope(|s| {
///     s.spawn(move || reg.write(1));
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register<'a> {
    addr: NonNull<u32>,
    _slot: PhantomData<&'a UnsafeCell<u32>>,
}

impl<'a> Register<'a> {
    /// Create a handle from a raw pointer
    ///
    /// # Safety
    /// - The memory behind `ptr` must stay valid for 32-bit reads and writes
    ///   for the whole of `'a`
    /// - No other thread or process may write the slot during `'a` unless
    ///   the caller serializes those writes with this handle's accesses
    pub unsafe fn new(ptr: *mut u32) -> Result<Self> {
        let addr = NonNull::new(ptr).ok_or(FencedError::NullAddress)?;
        if (ptr as usize) % REGISTER_ALIGN != 0 {
            return Err(FencedError::Misaligned {
                address: ptr as usize,
                align: REGISTER_ALIGN,
            });
        }
        Ok(Self {
            addr,
            _slot: PhantomData,
        })
    }

    /// Create a handle that borrows `slot` exclusively
    pub fn from_mut(slot: &'a mut u32) -> Self {
        Self {
            addr: NonNull::from(slot),
            _slot: PhantomData,
        }
    }

    /// Fenced load of the slot
    #[inline(always)]
    pub fn read(&self) -> u32 {
        unsafe { fence::read(self.addr.as_ptr()) }
    }

    /// Fenced store to the slot
    #[inline(always)]
    pub fn write(&self, value: u32) {
        unsafe { fence::write(self.addr.as_ptr(), value) }
    }

    /// Get the raw pointer
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut u32 {
        self.addr.as_ptr()
    }

    /// Get the numeric address
    #[inline(always)]
    pub fn address(&self) -> usize {
        self.addr.as_ptr() as usize
    }
}
