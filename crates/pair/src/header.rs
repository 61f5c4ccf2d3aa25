//! Variable-width length headers.
//!
//! Every payload in a pair record is preceded by a header whose first byte
//! (the *marker*) tells how wide the header is:
//!
//! ```text
//! marker 0x00..=0xFD   [len: u8]                      1 byte
//! marker 0xFE          [0xFE][len: u16 LE]            3 bytes
//! marker 0xFF          [0xFF][len: u32 LE]            5 bytes
//! ```
//!
//! The encoder always picks the narrowest form that fits. Lengths above
//! [`MAX_LEN`] cannot be encoded.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::PairError;

/// Largest length that fits in the single marker byte.
pub const MAX_INLINE: usize = 0xFD;

/// Marker for a header carrying a 2-byte little-endian length.
pub const MARKER_U16: u8 = 0xFE;

/// Marker for a header carrying a 4-byte little-endian length.
pub const MARKER_U32: u8 = 0xFF;

/// Largest encodable payload length (2^31 - 1).
pub const MAX_LEN: usize = 0x7FFF_FFFF;

/// Widest possible header: marker + u32.
pub const MAX_HEADER_WIDTH: usize = 1 + 4;

/// A decoded (or to-be-encoded) length header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Length stored directly in the marker byte (0..=253).
    Inline(u8),
    /// `0xFE` followed by a u16 length (254..=65535).
    Short(u16),
    /// `0xFF` followed by a u32 length (65536..=2^31-1).
    Long(u32),
}

impl Header {
    /// Returns the narrowest header for a payload of `len` bytes, or `None`
    /// when `len` exceeds [`MAX_LEN`].
    #[must_use]
    pub fn for_len(len: usize) -> Option<Self> {
        if len <= MAX_INLINE {
            Some(Header::Inline(len as u8))
        } else if len <= u16::MAX as usize {
            Some(Header::Short(len as u16))
        } else if len <= MAX_LEN {
            Some(Header::Long(len as u32))
        } else {
            None
        }
    }

    /// Payload length described by this header.
    #[must_use]
    pub fn len(&self) -> usize {
        match *self {
            Header::Inline(n) => n as usize,
            Header::Short(n) => n as usize,
            Header::Long(n) => n as usize,
        }
    }

    /// Returns `true` if the described payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes the header occupies, marker included.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Header::Inline(_) => 1,
            Header::Short(_) => 1 + 2,
            Header::Long(_) => 1 + 4,
        }
    }

    /// The first byte of the encoded header.
    #[must_use]
    pub fn marker(&self) -> u8 {
        match *self {
            Header::Inline(n) => n,
            Header::Short(_) => MARKER_U16,
            Header::Long(_) => MARKER_U32,
        }
    }

    /// Encodes the header into `scratch` and returns the written prefix.
    pub fn encode<'a>(&self, scratch: &'a mut [u8; MAX_HEADER_WIDTH]) -> &'a [u8] {
        scratch[0] = self.marker();
        match *self {
            Header::Inline(_) => {}
            Header::Short(n) => LittleEndian::write_u16(&mut scratch[1..3], n),
            Header::Long(n) => LittleEndian::write_u32(&mut scratch[1..5], n),
        }
        &scratch[..self.width()]
    }

    /// Reads the header starting at `buf[at]`, checking that every header
    /// byte is present and that the length is at most [`MAX_LEN`].
    ///
    /// Errors report absolute positions within `buf`.
    pub fn read_at(buf: &[u8], at: usize) -> Result<Self, PairError> {
        let marker = *buf.get(at).ok_or(PairError::Truncated {
            needed: at.saturating_add(1),
            available: buf.len(),
        })?;
        let end = at.saturating_add(width_for_marker(marker));
        if buf.len() < end {
            return Err(PairError::Truncated {
                needed: end,
                available: buf.len(),
            });
        }
        let header = Self::decode(&buf[at..end]);
        if header.len() > MAX_LEN {
            return Err(PairError::InvalidLength {
                at,
                len: header.len(),
            });
        }
        Ok(header)
    }

    /// Reads a header directly from memory.
    ///
    /// # Safety
    ///
    /// `ptr` must point at a well-formed header: the marker byte and the
    /// length bytes it announces must all be readable.
    pub(crate) unsafe fn read_raw(ptr: *const u8) -> Self {
        let width = width_for_marker(*ptr);
        Self::decode(std::slice::from_raw_parts(ptr, width))
    }

    // `bytes` holds at least the width announced by its marker.
    fn decode(bytes: &[u8]) -> Self {
        match bytes[0] {
            MARKER_U16 => Header::Short(LittleEndian::read_u16(&bytes[1..3])),
            MARKER_U32 => Header::Long(LittleEndian::read_u32(&bytes[1..5])),
            n => Header::Inline(n),
        }
    }
}

/// Header width announced by a marker byte: 1, 3 or 5.
#[must_use]
pub fn width_for_marker(marker: u8) -> usize {
    match marker {
        MARKER_U16 => 1 + 2,
        MARKER_U32 => 1 + 4,
        _ => 1,
    }
}
