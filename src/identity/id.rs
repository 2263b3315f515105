//! Process-unique sequential identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter behind [`Identifier::next`]. Starts at zero; the first minted
/// identifier has value 1.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Opaque, process-unique, monotonically increasing token.
///
/// Minting is a single atomic increment: no randomness, no locking, no
/// blocking. Values are never reused within a process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identifier(u64);

impl Identifier {
    /// Mint the next identifier.
    pub fn next() -> Self {
        Identifier(SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// The raw counter value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
