//! Arena configuration.
//!
//! Settings can be read from environment variables:
//!
//! ```text
//! PAIRKV_ARENA_SLOTS      Initial slot capacity          (default: 1024)
//! PAIRKV_ARENA_BUDGET_KB  Byte budget in KiB             (default: 0 = unlimited;
//!                         values overflowing usize bytes are unlimited too)
//! ```

/// Default number of slots reserved up front.
pub const DEFAULT_INITIAL_SLOTS: usize = 1024;

/// Construction-time settings for a [`PairArena`](crate::PairArena).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Slots reserved when the arena is created.
    pub initial_slots: usize,
    /// Upper bound on the summed [`Pair::size`](pair::Pair::size) of live
    /// records. `None` disables the check.
    pub byte_budget: Option<usize>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            initial_slots: DEFAULT_INITIAL_SLOTS,
            byte_budget: None,
        }
    }
}

impl ArenaConfig {
    /// Reads the configuration from the process environment, falling back to
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let initial_slots: usize = env_or("PAIRKV_ARENA_SLOTS", "1024")
            .parse()
            .unwrap_or(DEFAULT_INITIAL_SLOTS);
        let budget_kb: usize = env_or("PAIRKV_ARENA_BUDGET_KB", "0").parse().unwrap_or(0);

        Self {
            initial_slots,
            // A budget too large to express in bytes is no limit at all.
            byte_budget: budget_kb.checked_mul(1024).filter(|&bytes| bytes > 0),
        }
    }

    /// Sets the byte budget.
    #[must_use]
    pub fn with_byte_budget(mut self, bytes: usize) -> Self {
        self.byte_budget = Some(bytes);
        self
    }
}
