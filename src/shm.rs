//! Shared memory mapped as an array of 32-bit words
//!
//! Words are reached only through [`Register`] handles that borrow the
//! mapping, so no handle survives the `munmap` in `Drop`:
//!
//! ```compile_fail
//! use fenced_mem::{RegionConfig, SharedRegion};
//!
//! let reg = {
//!     let region = unsafe { SharedRegion::create("doc_region", RegionConfig { words: 4 }) }.unwrap();
//!     region.register(0).unwrap()
//! };
//! reg.read();
//! ```
//!
//! Another mapping of the same object, in this process or another one, can
//! write any word at any time. That is why `create` and `open` are `unsafe`.

use crate::error::{FencedError, Result};
use crate::register::Register;
use rustix::fd::OwnedFd;
use rustix::mm::{mmap, munmap, MapFlags, ProtFlags};
use rustix::shm::{shm_open, shm_unlink, Mode, ShmOFlags};
use std::ffi::CString;
use std::io;
use std::ptr::NonNull;

const FENCED_SHM_PREFIX: &str = "/fenced_mem_";
const MAX_NAME_LEN: usize = 255 - FENCED_SHM_PREFIX.len();

const WORD_SIZE: usize = std::mem::size_of::<u32>();

/// Default region size: one 4KB page of words
const DEFAULT_WORDS: usize = 1024;

/// Region configuration
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// Number of 32-bit words in the region
    pub words: usize,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS,
        }
    }
}

fn object_name(name: &str) -> Result<CString> {
    if name.len() > MAX_NAME_LEN {
        return Err(FencedError::NamespaceTooLong {
            max: MAX_NAME_LEN,
            got: name.len(),
        });
    }
    CString::new(format!("{FENCED_SHM_PREFIX}{name}"))
        .map_err(|_| FencedError::InvalidName(name.to_string()))
}

/// Map `bytes` of `fd` shared and writable. The mapping keeps the object
/// alive on its own, so callers close `fd` once this returns.
fn map_words(fd: &OwnedFd, bytes: usize) -> Result<NonNull<u32>> {
    let addr = unsafe {
        mmap(
            std::ptr::null_mut(),
            bytes,
            ProtFlags::READ | ProtFlags::WRITE,
            MapFlags::SHARED,
            fd,
            0,
        )
    }
    .map_err(|e| FencedError::Mmap(e.into()))?;

    NonNull::new(addr.cast::<u32>())
        .ok_or_else(|| FencedError::Mmap(io::Error::other("mmap returned null")))
}

/// A mapped shared memory object of 32-bit words
///
/// The handle that created the object owns its name and unlinks it on drop.
/// Handles from [`SharedRegion::open`] only unmap. The region is `Send` but
/// not `Sync`: a second thread gets its own mapping through `open`.
#[derive(Debug)]
pub struct SharedRegion {
    base: NonNull<u32>,
    words: usize,
    name: String,
    is_owner: bool,
}

// SAFETY: the mapping is process-wide and not tied to the creating thread
unsafe impl Send for SharedRegion {}

impl SharedRegion {
    /// Create a new zero-filled region named "/fenced_mem_<name>"
    ///
    /// Fails with `ShmCreate` if the name is already taken; the existing
    /// object is left untouched.
    ///
    /// # Safety
    /// Any other mapping of this object may write its words. The caller must
    /// serialize writers to a given word across all mappings, and order
    /// every read after the write it observes (a flag, a lock, or a protocol
    /// outside this crate).
    pub unsafe fn create(name: &str, config: RegionConfig) -> Result<Self> {
        let words = config.words;
        if words == 0 {
            return Err(FencedError::InvalidRegionSize(0));
        }
        let bytes = words
            .checked_mul(WORD_SIZE)
            .ok_or(FencedError::RegionTooLarge(words))?;
        let c_name = object_name(name)?;

        let fd = shm_open(
            c_name.as_c_str(),
            ShmOFlags::CREATE | ShmOFlags::EXCL | ShmOFlags::RDWR,
            Mode::RUSR | Mode::WUSR | Mode::RGRP | Mode::WGRP,
        )
        .map_err(|e| FencedError::ShmCreate {
            name: name.to_string(),
            source: e.into(),
        })?;

        // A freshly created object grows with zero bytes
        let mapped = rustix::fs::ftruncate(&fd, bytes as u64)
            .map_err(|e| FencedError::Truncate(e.into()))
            .and_then(|()| map_words(&fd, bytes));
        let base = match mapped {
            Ok(base) => base,
            Err(e) => {
                let _ = shm_unlink(c_name.as_c_str());
                return Err(e);
            }
        };

        Ok(Self {
            base,
            words,
            name: name.to_string(),
            is_owner: true,
        })
    }

    /// Map an existing region
    ///
    /// # Safety
    /// Same contract as [`SharedRegion::create`].
    pub unsafe fn open(name: &str) -> Result<Self> {
        let open_err = |source: io::Error| FencedError::ShmOpen {
            name: name.to_string(),
            source,
        };

        let c_name = object_name(name)?;
        let fd = shm_open(c_name.as_c_str(), ShmOFlags::RDWR, Mode::empty())
            .map_err(|e| open_err(e.into()))?;

        let bytes = rustix::fs::fstat(&fd).map_err(|e| open_err(e.into()))?.st_size as usize;
        if bytes == 0 || bytes % WORD_SIZE != 0 {
            return Err(FencedError::InvalidRegionSize(bytes));
        }

        Ok(Self {
            base: map_words(&fd, bytes)?,
            words: bytes / WORD_SIZE,
            name: name.to_string(),
            is_owner: false,
        })
    }

    /// Remove a region name left behind by a process that did not drop its
    /// owner handle. Live mappings are unaffected.
    pub fn remove(name: &str) -> Result<()> {
        let c_name = object_name(name)?;
        shm_unlink(c_name.as_c_str()).map_err(|e| FencedError::ShmOpen {
            name: name.to_string(),
            source: e.into(),
        })
    }

    /// Fenced handle to the word at `index`, borrowing this mapping
    pub fn register(&self, index: usize) -> Result<Register<'_>> {
        if index >= self.words {
            return Err(FencedError::OutOfBounds {
                index,
                words: self.words,
            });
        }
        // Page-aligned base, so every word is 4-byte aligned
        unsafe { Register::new(self.base.as_ptr().add(index)) }
    }

    /// Raw pointer to word 0
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut u32 {
        self.base.as_ptr()
    }

    #[inline(always)]
    pub fn words(&self) -> usize {
        self.words
    }

    /// Size in bytes
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.words * WORD_SIZE
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn is_owner(&self) -> bool {
        self.is_owner
    }
}

impl Drop for SharedRegion {
    fn drop(&mut self) {
        unsafe {
            let _ = munmap(self.base.as_ptr().cast(), self.size());
        }
        if self.is_owner {
            let _ = Self::remove(&self.name);
        }
    }
}
