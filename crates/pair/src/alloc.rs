//! Non-zeroing allocation for record buffers.
//!
//! The encoder writes every byte of a record, so zero-filling the buffer
//! first is wasted work on large pairs. [`RawBuf`] hands out uninitialized
//! memory and only yields a usable pointer once it has been filled
//! completely; uninitialized bytes are never reachable from outside.

use std::mem::MaybeUninit;
use std::ptr::{self, NonNull};

/// An uninitialized record buffer that is filled front to back.
pub(crate) struct RawBuf {
    buf: Box<[MaybeUninit<u8>]>,
    filled: usize,
}

impl RawBuf {
    /// Allocates `len` bytes without initializing them.
    pub(crate) fn alloc_uninit(len: usize) -> Self {
        Self {
            buf: Box::new_uninit_slice(len),
            filled: 0,
        }
    }

    /// Appends `bytes` after everything written so far.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` would run past the end of the buffer.
    pub(crate) fn put(&mut self, bytes: &[u8]) {
        let end = self.filled + bytes.len();
        assert!(end <= self.buf.len(), "record buffer overflow");
        // SAFETY: `filled..end` is in bounds (checked above) and the source
        // is a live slice that cannot overlap a fresh allocation.
        unsafe {
            ptr::copy_nonoverlapping(
                bytes.as_ptr(),
                self.buf.as_mut_ptr().add(self.filled).cast::<u8>(),
                bytes.len(),
            );
        }
        self.filled = end;
    }

    /// Gives up ownership of the filled buffer and returns its address.
    ///
    /// The memory stays allocated until passed to [`dealloc`].
    ///
    /// # Panics
    ///
    /// Panics if any byte is still unwritten.
    pub(crate) fn finish(self) -> NonNull<u8> {
        assert_eq!(
            self.filled,
            self.buf.len(),
            "record buffer not fully written"
        );
        // SAFETY: every byte in `0..len` was written by `put`.
        let buf = unsafe { self.buf.assume_init() };
        NonNull::from(Box::leak(buf)).cast::<u8>()
    }
}

/// Frees a buffer returned by [`RawBuf::finish`].
///
/// # Safety
///
/// `ptr` must come from [`RawBuf::finish`] on a buffer of exactly `len`
/// bytes, and must not have been freed already.
pub(crate) unsafe fn dealloc(ptr: NonNull<u8>, len: usize) {
    drop(Box::<[u8]>::from_raw(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len)));
}
