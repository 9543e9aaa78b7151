//! Partitioning of the candidate space by residue class.

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

/// One worker's share of an enumeration: every index `i` with
/// `i % size == rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shard {
    rank: u64,
    size: u64,
}

impl Shard {
    /// Create a shard, rejecting `size == 0` and `rank >= size`.
    pub fn new(rank: u64, size: u64) -> SearchResult<Self> {
        if size == 0 || rank >= size {
            return Err(SearchError::InvalidShard { rank, size });
        }
        Ok(Self { rank, size })
    }

    /// The whole space on one worker.
    pub const fn single() -> Self {
        Self { rank: 0, size: 1 }
    }

    /// Every shard of a `size`-worker layout, in rank order.
    pub fn all(size: u64) -> SearchResult<Vec<Shard>> {
        if size == 0 {
            return Err(SearchError::InvalidShard { rank: 0, size });
        }
        Ok((0..size).map(|rank| Self { rank, size }).collect())
    }

    /// Worker index.
    #[inline]
    pub fn rank(&self) -> u64 {
        self.rank
    }

    /// Worker count.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether candidate `index` belongs to this shard.
    #[inline]
    pub fn owns(&self, index: u64) -> bool {
        index % self.size == self.rank
    }

    /// The owned indices below `total`, ascending.
    pub fn indices(&self, total: u64) -> impl Iterator<Item = u64> + use<> {
        let step = usize::try_from(self.size).unwrap_or(usize::MAX);
        (self.rank..total).step_by(step)
    }

    /// Number of owned indices below `total`.
    pub fn count(&self, total: u64) -> u64 {
        if self.rank >= total {
            0
        } else {
            (total - self.rank - 1) / self.size + 1
        }
    }
}

impl Default for Shard {
    fn default() -> Self {
        Self::single()
    }
}

impl std::fmt::Display for Shard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.rank, self.size)
    }
}
