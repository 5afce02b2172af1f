//! Holder of the latest accepted [Checkpoint] and the oracle's static [Parameters].

use crate::{types::Checkpoint, Error};

/// Static parameters of an oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameters {
    /// Number of ledger blocks per checkpoint section.
    pub section_size: u64,
    /// Number of blocks that must be confirmed after a section closes before it may be attested.
    pub process_confirms: u64,
    /// Minimum number of distinct administrator votes required to accept a checkpoint.
    pub threshold: u32,
}

impl Parameters {
    /// Check that the [Parameters] are usable with a committee of `committee` administrators.
    pub fn validate(&self, committee: usize) -> Result<(), Error> {
        if self.section_size == 0 {
            return Err(Error::ZeroSectionSize);
        }
        if self.threshold == 0 {
            return Err(Error::ZeroThreshold);
        }
        if self.threshold as usize > committee {
            return Err(Error::ThresholdTooHigh(self.threshold, committee));
        }
        Ok(())
    }

    /// Returns the first ledger height at which a checkpoint may follow one accepted at
    /// `accepted_at`, or `None` if that height cannot be represented.
    pub fn mature_at(&self, accepted_at: u64) -> Option<u64> {
        accepted_at
            .checked_add(self.section_size)?
            .checked_add(self.process_confirms)
    }
}

/// Holds the latest accepted [Checkpoint].
///
/// The [Store] performs no validation: [Store::advance] is only reachable from
/// [crate::engine::Oracle] once a submission has passed every check.
#[derive(Clone, Debug)]
pub struct Store {
    parameters: Parameters,
    latest: Checkpoint,
}

impl Store {
    /// Create a new [Store] with no accepted checkpoint.
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            latest: Checkpoint::default(),
        }
    }

    /// Returns the latest accepted [Checkpoint].
    pub fn latest(&self) -> &Checkpoint {
        &self.latest
    }

    /// Returns the static [Parameters].
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Replace the latest [Checkpoint].
    pub(crate) fn advance(&mut self, checkpoint: Checkpoint) {
        self.latest = checkpoint;
    }
}
