//! Count the distinct administrators that voted for a [Submission].
//!
//! # Algorithm
//!
//! Every vote in a [Submission] signs the same prehash ([Submission::prehash]). For each vote, in
//! order, the [Validator]:
//!
//! 1. Recovers the signer's [Address]. If recovery fails, the vote is skipped.
//! 2. Compares the signer to the last signer recovered from the batch. The signer must be strictly
//!    greater: an equal signer is a duplicate and a lesser signer is out of order. Either way the
//!    vote is skipped and the comparison base is left where it was.
//! 3. Checks the signer is in the [Committee]. Non-members are skipped (but still move the
//!    comparison base, as ordering is defined over every recovered signer).
//! 4. Reports [Activity::Vote] and counts the vote.
//!
//! Requiring strictly ascending signers makes it impossible to count the same administrator twice
//! without having to track who has already voted.

use crate::{
    committee::Committee,
    types::{Activity, Address, Submission},
    Reporter,
};
use tracing::trace;

/// Why a vote was not counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discard {
    /// No signer could be recovered from the vote.
    Unrecoverable,
    /// The signer already voted earlier in the batch.
    Duplicate,
    /// The signer sorts before the previous signer in the batch.
    Unordered,
    /// The signer is not an administrator.
    Unknown,
}

/// Outcome of validating the votes of a [Submission].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Administrators whose votes counted, in ascending order.
    pub signers: Vec<Address>,
    /// Votes that were not counted (by position in the batch).
    pub discarded: Vec<(usize, Discard)>,
}

impl Tally {
    /// Returns the number of distinct administrators that voted.
    pub fn approvals(&self) -> usize {
        self.signers.len()
    }

    /// Returns the number of votes discarded for `reason`.
    pub fn discarded(&self, reason: Discard) -> usize {
        self.discarded
            .iter()
            .filter(|(_, discard)| *discard == reason)
            .count()
    }
}

/// Validates votes against a [Committee] under a fixed namespace.
pub struct Validator<'a> {
    committee: &'a Committee,
    namespace: &'a [u8],
}

impl<'a> Validator<'a> {
    /// Create a new [Validator].
    pub fn new(committee: &'a Committee, namespace: &'a [u8]) -> Self {
        Self {
            committee,
            namespace,
        }
    }

    /// Count the distinct administrators that voted for `submission`, reporting each counted vote
    /// to `reporter`.
    ///
    /// Invalid votes never abort the batch. They are recorded in [Tally::discarded] and skipped.
    pub fn tally(&self, submission: &Submission, reporter: &mut impl Reporter) -> Tally {
        let prehash = submission.prehash(self.namespace);
        let mut tally = Tally::default();
        let mut last: Option<Address> = None;
        for (index, vote) in submission.votes.iter().enumerate() {
            let Some(signer) = crate::secp256r1::recover(&prehash, vote) else {
                trace!(index, "unrecoverable vote");
                tally.discarded.push((index, Discard::Unrecoverable));
                continue;
            };
            if let Some(last) = last {
                if signer == last {
                    trace!(index, ?signer, "duplicate vote");
                    tally.discarded.push((index, Discard::Duplicate));
                    continue;
                }
                if signer < last {
                    trace!(index, ?signer, ?last, "unordered vote");
                    tally.discarded.push((index, Discard::Unordered));
                    continue;
                }
            }
            last = Some(signer);
            if !self.committee.is_member(&signer) {
                trace!(index, ?signer, "vote from unknown signer");
                tally.discarded.push((index, Discard::Unknown));
                continue;
            }
            reporter.report(Activity::Vote {
                section_index: submission.section_index,
                candidate: submission.candidate,
                vote: *vote,
            });
            tally.signers.push(signer);
        }
        tally
    }
}
