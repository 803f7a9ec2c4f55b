//! Arena index identifying a pool inside a snapshot.

use core::fmt;

/// Identifier of a pool within one [`PoolSnapshot`](crate::pool::PoolSnapshot).
///
/// Pools are stored in a flat vector and referenced by this integer index,
/// so the "deep copy for simulation" the splitter performs is a cheap clone
/// of a flat array rather than recursive structural cloning. Ids are
/// assigned positionally when the snapshot is built and are only meaningful
/// relative to that snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolId(u32);

impl PoolId {
    /// Creates a pool id from a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the index as `usize` for vector access.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}
