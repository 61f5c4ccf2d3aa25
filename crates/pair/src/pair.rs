use std::fmt;
use std::ptr::{self, NonNull};
use std::slice;

use crate::alloc::{self, RawBuf};
use crate::error::PairError;
use crate::extent::Extent;
use crate::header::MAX_HEADER_WIDTH;
use crate::view::PairRef;

/// A key/value pair packed into a single heap allocation.
///
/// `Pair` is one machine word: a pointer to the encoded record, or null for
/// the zero pair. It is `Copy` and does **not** free its buffer when dropped;
/// whoever owns the record releases it explicitly (see [`Pair::release`]).
///
/// The record is never modified after [`Pair::new`] returns, so copies of a
/// `Pair` may be read from any number of threads at once.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pair {
    data: Option<NonNull<u8>>,
}

// SAFETY: the record behind `data` is immutable once built; sharing or
// sending the pointer only ever allows reads.
unsafe impl Send for Pair {}
unsafe impl Sync for Pair {}

impl Pair {
    /// The zero pair: no backing buffer, empty key and value, size 0.
    pub const ZERO: Pair = Pair { data: None };

    /// Encodes `key` and `value` into a freshly allocated record.
    ///
    /// Both slices are copied; later changes to them do not affect the pair.
    /// The returned pair is never zero, even when both inputs are empty.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::OversizedInput`] if either slice is longer than
    /// [`MAX_LEN`](crate::MAX_LEN). Nothing is allocated in that case.
    pub fn new(key: &[u8], value: &[u8]) -> Result<Self, PairError> {
        let extent = Extent::for_lens(key.len(), value.len())?;

        let mut buf = RawBuf::alloc_uninit(extent.encoded_len());
        let mut scratch = [0u8; MAX_HEADER_WIDTH];
        buf.put(extent.key_header().encode(&mut scratch));
        buf.put(extent.value_header().encode(&mut scratch));
        buf.put(key);
        buf.put(value);

        Ok(Self {
            data: Some(buf.finish()),
        })
    }

    /// Wraps a raw record pointer, typically one previously returned by
    /// [`as_ptr`](Self::as_ptr). A null pointer gives the zero pair.
    ///
    /// No validation is performed.
    ///
    /// # Safety
    ///
    /// `raw` must be null or point at a well-formed record that stays alive
    /// and unmodified for as long as the returned pair (or any copy of it, or
    /// any view borrowed from it) is used.
    #[must_use]
    pub unsafe fn from_ptr(raw: *const u8) -> Self {
        Self {
            data: NonNull::new(raw as *mut u8),
        }
    }

    /// Rebuilds a pair from the integer produced by [`to_bits`](Self::to_bits).
    ///
    /// # Safety
    ///
    /// Same contract as [`from_ptr`](Self::from_ptr).
    #[must_use]
    pub unsafe fn from_bits(bits: usize) -> Self {
        Self::from_ptr(bits as *const u8)
    }

    /// The raw record pointer, or null for the zero pair.
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        match self.data {
            Some(ptr) => ptr.as_ptr() as *const u8,
            None => ptr::null(),
        }
    }

    /// The record address as an integer, for storage in a word-sized slot.
    /// The zero pair maps to 0.
    #[must_use]
    pub fn to_bits(&self) -> usize {
        self.as_ptr() as usize
    }

    /// Returns `true` for the zero pair. Never touches the buffer.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.data.is_none()
    }

    /// Decoded layout of the record, or `None` for the zero pair.
    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        // SAFETY: a non-null `data` points at a live record (constructor
        // and `from_ptr` contracts).
        self.data.map(|ptr| unsafe { Extent::decode(ptr) })
    }

    // The encoded bytes together with their layout.
    fn record(&self) -> Option<(&[u8], Extent)> {
        let ptr = self.data?;
        // SAFETY: the record is live (constructor and `from_ptr` contracts)
        // and exactly `encoded_len` bytes long.
        unsafe {
            let extent = Extent::decode(ptr);
            let bytes = slice::from_raw_parts(ptr.as_ptr() as *const u8, extent.encoded_len());
            Some((bytes, extent))
        }
    }

    /// Both halves of the record from a single decode.
    #[must_use]
    pub fn view(&self) -> PairRef<'_> {
        match self.record() {
            Some((bytes, extent)) => PairRef::split(bytes, &extent),
            None => PairRef::default(),
        }
    }

    /// Zero-copy view of the key. Empty for the zero pair.
    #[must_use]
    pub fn key(&self) -> &[u8] {
        self.view().key()
    }

    /// Zero-copy view of the value. Empty for the zero pair.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        self.view().value()
    }

    /// Allocation footprint rounded up to [`ALIGN`](crate::ALIGN), for
    /// memory accounting. 0 for the zero pair.
    #[must_use]
    pub fn size(&self) -> usize {
        self.extent().map_or(0, |extent| extent.padded_len())
    }

    /// Exact encoded length without padding. 0 for the zero pair.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.extent().map_or(0, |extent| extent.encoded_len())
    }

    /// The whole encoded record, headers included. Empty for the zero pair.
    ///
    /// The bytes can be copied elsewhere and read back with
    /// [`PairRef::parse`].
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self.record() {
            Some((bytes, _)) => bytes,
            None => &[],
        }
    }

    /// Frees the record. Releasing the zero pair is a no-op.
    ///
    /// # Safety
    ///
    /// The record must have been allocated by [`Pair::new`] and not released
    /// before. No copy of this pair, and no view borrowed from one, may be
    /// used afterwards.
    pub unsafe fn release(self) {
        if let Some(ptr) = self.data {
            let len = Extent::decode(ptr).encoded_len();
            alloc::dealloc(ptr, len);
        }
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.extent() {
            Some(extent) => f
                .debug_struct("Pair")
                .field("ptr", &self.as_ptr())
                .field("key_len", &extent.key_len())
                .field("value_len", &extent.value_len())
                .field("size", &extent.padded_len())
                .finish(),
            None => f.write_str("Pair(zero)"),
        }
    }
}
