use crate::error::PairError;
use crate::extent::Extent;

/// Borrowed key and value of one record.
///
/// Produced by [`Pair::view`](crate::Pair::view) for owned records, or by
/// [`PairRef::parse`] for an encoded record sitting in any byte slice (a
/// shared-memory segment, a page read from disk, a copy made with
/// [`Pair::as_bytes`](crate::Pair::as_bytes)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairRef<'a> {
    key: &'a [u8],
    value: &'a [u8],
}

impl<'a> PairRef<'a> {
    /// Parses the record at the start of `buf` without copying.
    ///
    /// Unlike [`Pair::from_ptr`](crate::Pair::from_ptr) this validates that
    /// every byte the headers announce is present.
    ///
    /// # Errors
    ///
    /// [`PairError::Truncated`] if `buf` ends early, or
    /// [`PairError::InvalidLength`] if a header claims more than
    /// [`MAX_LEN`](crate::MAX_LEN) bytes.
    pub fn parse(buf: &'a [u8]) -> Result<Self, PairError> {
        let extent = Extent::parse(buf)?;
        Ok(Self::split(buf, &extent))
    }

    // `record` must hold at least `extent.encoded_len()` bytes.
    pub(crate) fn split(record: &'a [u8], extent: &Extent) -> Self {
        Self {
            key: &record[extent.key_range()],
            value: &record[extent.value_range()],
        }
    }

    #[must_use]
    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    #[must_use]
    pub fn value(&self) -> &'a [u8] {
        self.value
    }
}
