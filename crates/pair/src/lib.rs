//! # Pair - packed key/value records
//!
//! A [`Pair`] stores one key and one value in a single heap allocation and
//! is itself only one machine word wide. It is meant for storage and cache
//! structures that hold millions of small records: one allocation per record
//! instead of two, and no length fields kept outside the record.
//!
//! ## Record layout
//!
//! ```text
//! ┌──────────────────┬────────────────────┬───────────┬─────────────┐
//! │ key-len header   │ value-len header   │ key bytes │ value bytes │
//! │ 1, 3 or 5 bytes  │ 1, 3 or 5 bytes    │ key_len   │ value_len   │
//! └──────────────────┴────────────────────┴───────────┴─────────────┘
//! ```
//!
//! Each header is self-describing by its first byte:
//!
//! | Marker        | Width | Length range       | Encoding                 |
//! |---------------|-------|--------------------|--------------------------|
//! | `0x00`–`0xFD` | 1 B   | 0 – 253            | the marker is the length |
//! | `0xFE`        | 3 B   | 254 – 65 535       | marker + `u16` LE        |
//! | `0xFF`        | 5 B   | 65 536 – 2^31 − 1  | marker + `u32` LE        |
//!
//! [`Pair::size`] reports the record length rounded up to the pointer width
//! ([`ALIGN`]), which is what memory-budget accounting should use.
//!
//! ## Ownership
//!
//! A `Pair` never frees its record on its own. The record stays alive until
//! its owner calls [`Pair::release`]; owners may also keep only the raw
//! pointer ([`Pair::as_ptr`] / [`Pair::to_bits`]) and rebuild the pair later
//! with [`Pair::from_ptr`]. The `arena` crate provides an owner that frees
//! everything it holds.
//!
//! ## Example
//!
//! ```rust
//! use pair::Pair;
//!
//! let p = Pair::new(b"hello", b"world").unwrap();
//! assert_eq!(p.key(), b"hello");
//! assert_eq!(p.value(), b"world");
//! assert_eq!(p.size(), pair::align_up(2 + 10));
//!
//! let q = unsafe { Pair::from_ptr(p.as_ptr()) };
//! assert_eq!(q.key(), b"hello");
//!
//! unsafe { p.release() };
//! ```

mod alloc;
mod error;
mod extent;
pub mod header;
mod pair;
mod view;

pub use error::{Field, PairError};
pub use extent::{align_up, Extent, ALIGN};
pub use header::{Header, MAX_LEN};
pub use pair::Pair;
pub use view::PairRef;
