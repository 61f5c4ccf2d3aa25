use std::fmt;

use thiserror::Error;

/// Which half of a pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key,
    Value,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Key => f.write_str("key"),
            Field::Value => f.write_str("value"),
        }
    }
}

/// Errors produced while encoding or parsing a pair record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PairError {
    /// A key or value is longer than the 2^31 - 1 bytes a header can describe.
    #[error("{field} too large: {len} bytes (max 2147483647)")]
    OversizedInput {
        /// The offending half.
        field: Field,
        /// Its length in bytes.
        len: usize,
    },

    /// A byte slice ends before the record its headers describe.
    #[error("truncated pair record: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required by the headers read so far.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// A `0xFF` header carries a length above 2^31 - 1.
    #[error("invalid pair header at byte {at}: length {len} exceeds 2147483647")]
    InvalidLength {
        /// Offset of the header's marker byte.
        at: usize,
        /// The length the header claims.
        len: usize,
    },
}
