//! # Arena - owner for packed pairs
//!
//! [`pair::Pair`] never frees its own record. `PairArena` is the owner that
//! does: every pair it creates (or adopts) lives until it is removed, the
//! arena is cleared, or the arena is dropped.
//!
//! Each slot is a single [`Pair`], i.e. one machine word. Callers address
//! records through [`PairId`] index handles and read them through borrowed
//! [`PairRef`] views, so a view can never outlive the record it points into.
//! Removed slots revert to the zero pair and are reused by later inserts.
//!
//! ## Memory budget
//!
//! The arena keeps a running total of [`Pair::size`] over its live records.
//! With a byte budget configured ([`ArenaConfig::byte_budget`]) an insert that
//! would push the total past the budget is rejected before anything is
//! allocated.
//!
//! ## Example
//!
//! ```rust
//! use arena::PairArena;
//!
//! let mut arena = PairArena::new();
//! let id = arena.insert(b"hello", b"world").unwrap();
//! assert_eq!(arena.get(id).unwrap().value(), b"world");
//! assert!(arena.remove(id));
//! assert!(arena.get(id).is_none());
//! ```

mod config;

use std::mem;

use pair::{Extent, Pair, PairError, PairRef};
use thiserror::Error;
use tracing::{debug, trace};

pub use config::{ArenaConfig, DEFAULT_INITIAL_SLOTS};

/// Handle to a record stored in a [`PairArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(usize);

impl PairId {
    /// Slot index inside the arena.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Errors that can occur while adding records to an arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    /// The key or value could not be encoded.
    #[error(transparent)]
    Pair(#[from] PairError),

    /// Storing the record would exceed the configured byte budget.
    #[error("byte budget exceeded: need {requested} bytes, {available} available")]
    BudgetExceeded {
        /// Reported size of the rejected record.
        requested: usize,
        /// Budget left before the insert.
        available: usize,
    },
}

/// Owns a set of [`Pair`] records and frees them.
pub struct PairArena {
    /// One word per slot; the zero pair marks an empty slot.
    slots: Vec<Pair>,
    /// Indices of empty slots, reused LIFO.
    free: Vec<usize>,
    live: usize,
    approx_size: usize,
    byte_budget: Option<usize>,
}

impl PairArena {
    /// Creates an arena with the default configuration (no budget).
    pub fn new() -> Self {
        Self::with_config(&ArenaConfig::default())
    }

    /// Creates an arena sized and budgeted by `config`.
    pub fn with_config(config: &ArenaConfig) -> Self {
        Self {
            slots: Vec::with_capacity(config.initial_slots),
            free: Vec::new(),
            live: 0,
            approx_size: 0,
            byte_budget: config.byte_budget,
        }
    }

    /// Encodes `key`/`value` into a new record owned by the arena.
    ///
    /// # Errors
    ///
    /// [`ArenaError::Pair`] if either input is too large to encode, or
    /// [`ArenaError::BudgetExceeded`] if the record does not fit the budget.
    /// Nothing is allocated on error.
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<PairId, ArenaError> {
        let requested = Extent::for_lens(key.len(), value.len())?.padded_len();
        self.check_budget(requested)?;
        let pair = Pair::new(key, value)?;
        Ok(self.store(pair))
    }

    /// Takes ownership of a record built elsewhere with [`Pair::new`].
    ///
    /// On error the caller keeps ownership of `pair`.
    ///
    /// # Safety
    ///
    /// `pair` must be a live, non-released record allocated by [`Pair::new`],
    /// and nothing else may release it or use it once the arena owns it.
    ///
    /// # Panics
    ///
    /// Panics if `pair` is the zero pair.
    pub unsafe fn adopt(&mut self, pair: Pair) -> Result<PairId, ArenaError> {
        assert!(!pair.is_zero(), "cannot adopt the zero pair");
        self.check_budget(pair.size())?;
        Ok(self.store(pair))
    }

    /// Borrowed view of a live record.
    #[must_use]
    pub fn get(&self, id: PairId) -> Option<PairRef<'_>> {
        self.slot(id).map(Pair::view)
    }

    /// Zero-copy key of a live record.
    #[must_use]
    pub fn key(&self, id: PairId) -> Option<&[u8]> {
        self.slot(id).map(Pair::key)
    }

    /// Zero-copy value of a live record.
    #[must_use]
    pub fn value(&self, id: PairId) -> Option<&[u8]> {
        self.slot(id).map(Pair::value)
    }

    /// Reported (aligned) size of a live record.
    #[must_use]
    pub fn size_of(&self, id: PairId) -> Option<usize> {
        self.slot(id).map(Pair::size)
    }

    /// Raw record pointer of a live record, for callers that keep their own
    /// word-sized references. Valid only until the record is removed.
    #[must_use]
    pub fn as_ptr(&self, id: PairId) -> Option<*const u8> {
        self.slot(id).map(Pair::as_ptr)
    }

    /// Frees a record. Returns `false` if `id` was not live.
    pub fn remove(&mut self, id: PairId) -> bool {
        match self.take(id) {
            Some(pair) => {
                // SAFETY: the arena owned this record and no borrowed view
                // can be alive while we hold `&mut self`.
                unsafe { pair.release() };
                true
            }
            None => false,
        }
    }

    /// Removes a record without freeing it and hands ownership back to the
    /// caller, who becomes responsible for [`Pair::release`].
    pub fn take(&mut self, id: PairId) -> Option<Pair> {
        let slot = self.slots.get_mut(id.0).filter(|p| !p.is_zero())?;
        let pair = mem::take(slot);
        self.approx_size = self.approx_size.saturating_sub(pair.size());
        self.live -= 1;
        self.free.push(id.0);
        Some(pair)
    }

    /// Iterator over live records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PairId, PairRef<'_>)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_zero())
            .map(|(i, p)| (PairId(i), p.view()))
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no record is live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Sum of [`Pair::size`] over live records.
    pub fn approx_size(&self) -> usize {
        self.approx_size
    }

    /// Configured byte budget, if any.
    pub fn byte_budget(&self) -> Option<usize> {
        self.byte_budget
    }

    /// Frees every record. Previously issued ids become invalid and slots
    /// are released.
    pub fn clear(&mut self) {
        let (pairs, bytes) = self.release_all();
        if pairs > 0 {
            debug!(pairs, bytes, "pair arena cleared");
        }
    }

    // ---- Internal helpers ----

    fn slot(&self, id: PairId) -> Option<&Pair> {
        self.slots.get(id.0).filter(|p| !p.is_zero())
    }

    fn check_budget(&self, requested: usize) -> Result<(), ArenaError> {
        let Some(budget) = self.byte_budget else {
            return Ok(());
        };
        let available = budget.saturating_sub(self.approx_size);
        if requested > available {
            trace!(requested, available, "pair arena budget rejection");
            return Err(ArenaError::BudgetExceeded {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn store(&mut self, pair: Pair) -> PairId {
        self.approx_size += pair.size();
        self.live += 1;
        match self.free.pop() {
            Some(i) => {
                self.slots[i] = pair;
                PairId(i)
            }
            None => {
                self.slots.push(pair);
                PairId(self.slots.len() - 1)
            }
        }
    }

    // Returns (records freed, bytes released).
    fn release_all(&mut self) -> (usize, usize) {
        let freed = (self.live, self.approx_size);
        for pair in self.slots.drain(..) {
            // SAFETY: every non-zero slot is a record the arena owns; releasing
            // the zero pair is a no-op.
            unsafe { pair.release() };
        }
        self.free.clear();
        self.live = 0;
        self.approx_size = 0;
        freed
    }
}

impl Default for PairArena {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PairArena {
    fn drop(&mut self) {
        let (pairs, bytes) = self.release_all();
        if pairs > 0 {
            debug!(pairs, bytes, "pair arena dropped");
        }
    }
}

impl std::fmt::Debug for PairArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairArena")
            .field("live", &self.live)
            .field("slots", &self.slots.len())
            .field("approx_size", &self.approx_size)
            .field("byte_budget", &self.byte_budget)
            .finish()
    }
}
