use super::{
    metrics::{Metrics, Outcome},
    Config,
};
use crate::{
    committee::Committee,
    store::{Parameters, Store},
    types::{empty_hash, Activity, Address, Checkpoint, Submission},
    validator::Validator,
    Error, Ledger, Reporter,
};
use commonware_runtime::Metrics as RuntimeMetrics;
use thiserror::Error as ThisError;
use tracing::{debug, info};

/// Reason a [Submission] was rejected.
#[derive(ThisError, Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    #[error("anchor unavailable at height {0}")]
    UnknownAnchor(u64),
    #[error("anchor mismatch at height {0}")]
    AnchorMismatch(u64),
    #[error("immature: height {0} < {1}")]
    Immature(u64, u64),
    #[error("maturity overflow")]
    MaturityOverflow,
    #[error("out of sequence: latest section {0}, got {1}")]
    OutOfSequence(u64, u64),
    #[error("empty candidate")]
    EmptyCandidate,
    #[error("empty batch")]
    EmptyBatch,
    #[error("insufficient votes: {0} < {1}")]
    InsufficientVotes(usize, u32),
}

impl From<Rejection> for Outcome {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::UnknownAnchor(_) => Outcome::UnknownAnchor,
            Rejection::AnchorMismatch(_) => Outcome::AnchorMismatch,
            Rejection::Immature(_, _) | Rejection::MaturityOverflow => Outcome::Immature,
            Rejection::OutOfSequence(_, _) => Outcome::OutOfSequence,
            Rejection::EmptyCandidate => Outcome::EmptyCandidate,
            Rejection::EmptyBatch => Outcome::EmptyBatch,
            Rejection::InsufficientVotes(_, _) => Outcome::InsufficientVotes,
        }
    }
}

/// Accepts checkpoints attested to by a quorum of administrators.
///
/// The [Oracle] holds the only copy of its [Store]. [Oracle::set_checkpoint] takes `&mut self`, so
/// every check and the resulting update observe (and modify) a single consistent state. To share
/// an [Oracle] between tasks, wrap it in a [super::Actor].
pub struct Oracle<L: Ledger, R: Reporter> {
    ledger: L,
    reporter: R,
    namespace: Vec<u8>,

    committee: Committee,
    store: Store,

    metrics: Metrics,
}

impl<L: Ledger, R: Reporter> Oracle<L, R> {
    /// Create a new [Oracle] with no accepted checkpoint.
    ///
    /// Returns an error if the committee is empty or contains duplicates, or if the threshold is
    /// zero or larger than the committee.
    pub fn new(context: impl RuntimeMetrics, cfg: Config<L, R>) -> Result<Self, Error> {
        let committee = Committee::new(cfg.admins)?;
        let parameters = Parameters {
            section_size: cfg.section_size,
            process_confirms: cfg.process_confirms,
            threshold: cfg.threshold,
        };
        parameters.validate(committee.len())?;
        debug!(
            admins = committee.len(),
            section_size = parameters.section_size,
            process_confirms = parameters.process_confirms,
            threshold = parameters.threshold,
            "initialized oracle"
        );

        Ok(Self {
            ledger: cfg.ledger,
            reporter: cfg.reporter,
            namespace: cfg.namespace,

            committee,
            store: Store::new(parameters),

            metrics: Metrics::init(context),
        })
    }

    /// Returns all administrators, in the order they were supplied at construction.
    pub fn admins(&self) -> &[Address] {
        self.committee.all()
    }

    /// Returns the latest accepted [Checkpoint].
    pub fn latest(&self) -> Checkpoint {
        *self.store.latest()
    }

    /// Returns the static [Parameters] of the oracle.
    pub fn parameters(&self) -> &Parameters {
        self.store.parameters()
    }

    /// Attempt to advance the oracle with `submission`.
    ///
    /// Returns `true` if the submission was accepted (and the latest checkpoint replaced). If any
    /// check fails, no state is modified and `false` is returned. Votes that counted toward the
    /// submission are reported even if it is rejected for lack of votes.
    pub fn set_checkpoint(&mut self, submission: Submission) -> bool {
        match self.process(&submission) {
            Ok(checkpoint) => {
                info!(
                    section = checkpoint.section_index,
                    hash = ?checkpoint.hash,
                    height = checkpoint.accepted_at,
                    "accepted checkpoint"
                );
                self.metrics.submission(Outcome::Accepted);
                self.metrics
                    .section
                    .set(i64::try_from(checkpoint.section_index).unwrap_or(i64::MAX));
                self.reporter.report(Activity::Checkpoint(checkpoint));
                true
            }
            Err(rejection) => {
                debug!(
                    section = submission.section_index,
                    candidate = ?submission.candidate,
                    reason = %rejection,
                    "rejected checkpoint"
                );
                self.metrics.submission(rejection.into());
                false
            }
        }
    }

    /// Run every check against `submission` and, if all pass, advance the [Store].
    fn process(&mut self, submission: &Submission) -> Result<Checkpoint, Rejection> {
        // Ensure the signers observed the canonical ledger (prevents replay on forks)
        match self.ledger.block_hash(submission.recent_height) {
            Some(hash) if hash == submission.recent_hash => {}
            Some(_) => return Err(Rejection::AnchorMismatch(submission.recent_height)),
            None => return Err(Rejection::UnknownAnchor(submission.recent_height)),
        }

        // Ensure enough blocks have elapsed since the last acceptance
        let height = self.ledger.height();
        let latest = *self.store.latest();
        let parameters = *self.store.parameters();
        let mature_at = parameters
            .mature_at(latest.accepted_at)
            .ok_or(Rejection::MaturityOverflow)?;
        if height < mature_at {
            return Err(Rejection::Immature(height, mature_at));
        }

        // Ensure the submission targets the next section
        if latest.section_index.checked_add(1) != Some(submission.section_index) {
            return Err(Rejection::OutOfSequence(
                latest.section_index,
                submission.section_index,
            ));
        }

        // Ensure the submission is not empty
        if submission.candidate == empty_hash() {
            return Err(Rejection::EmptyCandidate);
        }
        if submission.votes.is_empty() {
            return Err(Rejection::EmptyBatch);
        }

        // Count votes
        let tally = Validator::new(&self.committee, &self.namespace)
            .tally(submission, &mut self.reporter);
        self.metrics.tally(&tally);
        if tally.approvals() < parameters.threshold as usize {
            return Err(Rejection::InsufficientVotes(
                tally.approvals(),
                parameters.threshold,
            ));
        }

        // Accept
        let checkpoint = Checkpoint {
            section_index: submission.section_index,
            hash: submission.candidate,
            accepted_at: height,
        };
        self.store.advance(checkpoint);
        Ok(checkpoint)
    }
}
