//! Mock implementations of [crate::Ledger] and [crate::Reporter] for testing.

use crate::types::Activity;
use commonware_cryptography::sha256::{hash, Digest};
use commonware_utils::union;
use std::sync::{Arc, Mutex};

struct Chain {
    blocks: Vec<Digest>,
    retention: u64,
    forks: u64,
}

/// In-memory ledger that only remembers the hashes of its most recent blocks.
///
/// Block hashes are derived from the height and the number of reorgs performed so far, so a
/// reorged block never has the same hash as the block it replaced.
#[derive(Clone)]
pub struct Ledger {
    chain: Arc<Mutex<Chain>>,
}

impl Ledger {
    /// Create a ledger holding only a genesis block (at height `0`).
    ///
    /// Hashes are available for the latest block and the `retention` blocks before it.
    pub fn new(retention: u64) -> Self {
        let mut chain = Chain {
            blocks: Vec::new(),
            retention,
            forks: 0,
        };
        chain.blocks.push(Self::block(0, 0));
        Self {
            chain: Arc::new(Mutex::new(chain)),
        }
    }

    fn block(height: u64, fork: u64) -> Digest {
        hash(&union(&height.to_be_bytes(), &fork.to_be_bytes()))
    }

    /// Append `count` blocks.
    pub fn mine(&self, count: u64) {
        let mut chain = self.chain.lock().unwrap();
        for _ in 0..count {
            let height = chain.blocks.len() as u64;
            let block = Self::block(height, chain.forks);
            chain.blocks.push(block);
        }
    }

    /// Mine blocks until the ledger reaches `height`.
    pub fn mine_to(&self, height: u64) {
        let current = crate::Ledger::height(self);
        if height > current {
            self.mine(height - current);
        }
    }

    /// Replace the latest `depth` blocks with blocks from a new fork (keeping the height).
    pub fn reorg(&self, depth: u64) {
        let mut chain = self.chain.lock().unwrap();
        chain.forks += 1;
        let length = chain.blocks.len() as u64;
        let start = length.saturating_sub(depth).max(1);
        for height in start..length {
            let block = Self::block(height, chain.forks);
            chain.blocks[height as usize] = block;
        }
    }
}

impl crate::Ledger for Ledger {
    fn height(&self) -> u64 {
        let chain = self.chain.lock().unwrap();
        chain.blocks.len() as u64 - 1
    }

    fn block_hash(&self, height: u64) -> Option<Digest> {
        let chain = self.chain.lock().unwrap();
        let latest = chain.blocks.len() as u64 - 1;
        if height > latest || latest - height > chain.retention {
            return None;
        }
        chain.blocks.get(height as usize).copied()
    }
}

/// Reporter that records all [Activity] it receives.
#[derive(Clone, Default)]
pub struct Reporter {
    activities: Arc<Mutex<Vec<Activity>>>,
}

impl Reporter {
    /// Create a new [Reporter].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all [Activity] reported so far.
    pub fn activities(&self) -> Vec<Activity> {
        self.activities.lock().unwrap().clone()
    }

    /// Returns the number of [Activity::Vote]s reported so far.
    pub fn votes(&self) -> usize {
        self.activities
            .lock()
            .unwrap()
            .iter()
            .filter(|activity| matches!(activity, Activity::Vote { .. }))
            .count()
    }

    /// Returns the number of [Activity::Checkpoint]s reported so far.
    pub fn checkpoints(&self) -> usize {
        self.activities
            .lock()
            .unwrap()
            .iter()
            .filter(|activity| matches!(activity, Activity::Checkpoint(_)))
            .count()
    }
}

impl crate::Reporter for Reporter {
    fn report(&mut self, activity: Activity) {
        self.activities.lock().unwrap().push(activity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ledger as _;

    #[test]
    fn test_ledger_retention() {
        let ledger = Ledger::new(4);
        assert_eq!(ledger.height(), 0);
        assert!(ledger.block_hash(0).is_some());
        assert!(ledger.block_hash(1).is_none());

        ledger.mine_to(10);
        assert_eq!(ledger.height(), 10);
        assert!(ledger.block_hash(10).is_some());
        assert!(ledger.block_hash(6).is_some());
        assert!(ledger.block_hash(5).is_none());
        assert!(ledger.block_hash(11).is_none());
    }

    #[test]
    fn test_ledger_reorg() {
        let ledger = Ledger::new(100);
        ledger.mine(10);
        let before: Vec<_> = (0..=10).map(|h| ledger.block_hash(h).unwrap()).collect();
        ledger.reorg(3);
        assert_eq!(ledger.height(), 10);
        for height in 0..=7 {
            assert_eq!(ledger.block_hash(height), Some(before[height as usize]));
        }
        for height in 8..=10 {
            assert_ne!(ledger.block_hash(height), Some(before[height as usize]));
        }

        // The genesis block is never replaced
        ledger.reorg(100);
        assert_eq!(ledger.block_hash(0), Some(before[0]));
        assert_ne!(ledger.block_hash(1), Some(before[1]));
    }
}
