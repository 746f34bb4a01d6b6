//! C Bindings for FencedMem
//!
//! Exports the fenced accessor as a C-callable pair:
//!
//! ```c
//! void fenced_mem_write(void *address, uint32_t value);
//! uint32_t fenced_mem_read(const void *address);
//! ```

use crate::fence;
use std::os::raw::c_void;

/// Fenced 32-bit store
///
/// # Safety
/// address must be valid, writable and 4-byte aligned
#[no_mangle]
pub unsafe extern "C" fn fenced_mem_write(address: *mut c_void, value: u32) {
    fence::write(address.cast::<u32>(), value);
}

/// Fenced 32-bit load
///
/// # Safety
/// address must be valid, readable and 4-byte aligned
#[no_mangle]
pub unsafe extern "C" fn fenced_mem_read(address: *const c_void) -> u32 {
    fence::read(address.cast::<u32>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_abi_round_trip() {
        let mut buf: u32 = 0;
        let ptr = &mut buf as *mut u32 as *mut c_void;

        unsafe {
            fenced_mem_write(ptr, 0xCAFE_F00D);
            assert_eq!(fenced_mem_read(ptr as *const c_void), 0xCAFE_F00D);
        }
    }
}
