//! Record geometry.
//!
//! All offset arithmetic for a pair record lives here. Both the zero-copy
//! accessors on [`Pair`](crate::Pair) and the checked slice parser go
//! through [`Extent`], so the layout is decoded in exactly one place.

use std::mem;
use std::ops::Range;
use std::ptr::NonNull;

use crate::error::{Field, PairError};
use crate::header::Header;

/// Alignment used when reporting a record's allocation size: the platform
/// pointer width.
pub const ALIGN: usize = mem::size_of::<usize>();

/// Rounds `n` up to the next multiple of [`ALIGN`].
#[inline]
#[must_use]
pub fn align_up(n: usize) -> usize {
    n.next_multiple_of(ALIGN)
}

/// Decoded layout of one record: both headers and the regions they imply.
///
/// ```text
/// 0            kw           kw+vw            kw+vw+klen        end
/// [key header ][value header][key bytes ...  ][value bytes ...  ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    key_header: Header,
    value_header: Header,
}

impl Extent {
    pub(crate) fn new(key_header: Header, value_header: Header) -> Self {
        Self {
            key_header,
            value_header,
        }
    }

    /// Layout of the record that would hold a `key_len`-byte key and a
    /// `value_len`-byte value.
    ///
    /// # Errors
    ///
    /// Returns [`PairError::OversizedInput`] if either length exceeds
    /// [`MAX_LEN`](crate::MAX_LEN).
    pub fn for_lens(key_len: usize, value_len: usize) -> Result<Self, PairError> {
        let key_header = Header::for_len(key_len).ok_or(PairError::OversizedInput {
            field: Field::Key,
            len: key_len,
        })?;
        let value_header = Header::for_len(value_len).ok_or(PairError::OversizedInput {
            field: Field::Value,
            len: value_len,
        })?;
        Ok(Self::new(key_header, value_header))
    }

    /// Decodes the headers of the record at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must point at a live, well-formed record.
    #[inline]
    pub(crate) unsafe fn decode(ptr: NonNull<u8>) -> Self {
        let base = ptr.as_ptr() as *const u8;
        let key_header = Header::read_raw(base);
        let value_header = Header::read_raw(base.add(key_header.width()));
        Self::new(key_header, value_header)
    }

    /// Decodes the headers at the start of `buf` and checks that the whole
    /// record fits inside it. Bytes past the record end are ignored.
    pub fn parse(buf: &[u8]) -> Result<Self, PairError> {
        let key_header = Header::read_at(buf, 0)?;
        let value_header = Header::read_at(buf, key_header.width())?;
        let extent = Self::new(key_header, value_header);
        // Two maximal lengths overflow a 32-bit usize.
        let needed = extent
            .headers_len()
            .checked_add(extent.key_len())
            .and_then(|n| n.checked_add(extent.value_len()))
            .unwrap_or(usize::MAX);
        if buf.len() < needed {
            return Err(PairError::Truncated {
                needed,
                available: buf.len(),
            });
        }
        Ok(extent)
    }

    /// The key-length header.
    #[must_use]
    pub fn key_header(&self) -> Header {
        self.key_header
    }

    /// The value-length header.
    #[must_use]
    pub fn value_header(&self) -> Header {
        self.value_header
    }

    #[must_use]
    pub fn key_len(&self) -> usize {
        self.key_header.len()
    }

    #[must_use]
    pub fn value_len(&self) -> usize {
        self.value_header.len()
    }

    /// Combined width of both headers; also the offset of the key.
    #[must_use]
    pub fn headers_len(&self) -> usize {
        self.key_header.width() + self.value_header.width()
    }

    /// Byte range of the key within the record.
    #[must_use]
    pub fn key_range(&self) -> Range<usize> {
        let start = self.headers_len();
        start..start + self.key_len()
    }

    /// Byte range of the value within the record.
    #[must_use]
    pub fn value_range(&self) -> Range<usize> {
        let start = self.key_range().end;
        start..start + self.value_len()
    }

    /// Exact number of bytes the record occupies.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.value_range().end
    }

    /// [`encoded_len`](Self::encoded_len) rounded up to [`ALIGN`].
    #[must_use]
    pub fn padded_len(&self) -> usize {
        align_up(self.encoded_len())
    }
}
