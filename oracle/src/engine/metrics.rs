use crate::validator::{Discard, Tally};
use commonware_runtime::Metrics as RuntimeMetrics;
use prometheus_client::{
    encoding::{EncodeLabelSet, EncodeLabelValue},
    metrics::{counter::Counter, family::Family, gauge::Gauge},
};

/// Outcome of a submission.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Outcome {
    Accepted,
    UnknownAnchor,
    AnchorMismatch,
    Immature,
    OutOfSequence,
    EmptyCandidate,
    EmptyBatch,
    InsufficientVotes,
}

/// Submission labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Submission {
    pub outcome: Outcome,
}

/// Status of a vote.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Counted,
    Unrecoverable,
    Duplicate,
    Unordered,
    Unknown,
}

impl From<Discard> for Status {
    fn from(discard: Discard) -> Self {
        match discard {
            Discard::Unrecoverable => Status::Unrecoverable,
            Discard::Duplicate => Status::Duplicate,
            Discard::Unordered => Status::Unordered,
            Discard::Unknown => Status::Unknown,
        }
    }
}

/// Vote labels.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Vote {
    pub status: Status,
}

/// Metrics for the [super::Oracle].
pub struct Metrics {
    /// Number of submissions processed by outcome
    pub submissions: Family<Submission, Counter>,
    /// Number of votes processed by status
    pub votes: Family<Vote, Counter>,
    /// Index of the latest accepted section
    pub section: Gauge,
}

impl Metrics {
    /// Create and return a new set of metrics, registered with the given context.
    pub fn init<E: RuntimeMetrics>(context: E) -> Self {
        let submissions = Family::<Submission, Counter>::default();
        context.register(
            "submissions",
            "Number of submissions processed by outcome",
            submissions.clone(),
        );
        let votes = Family::<Vote, Counter>::default();
        context.register(
            "votes",
            "Number of votes processed by status",
            votes.clone(),
        );
        let section = Gauge::default();
        context.register(
            "section",
            "Index of the latest accepted section",
            section.clone(),
        );
        Self {
            submissions,
            votes,
            section,
        }
    }

    /// Record the outcome of a submission.
    pub fn submission(&self, outcome: Outcome) {
        self.submissions.get_or_create(&Submission { outcome }).inc();
    }

    /// Record the status of every vote in a [Tally].
    pub fn tally(&self, tally: &Tally) {
        if tally.approvals() > 0 {
            self.votes
                .get_or_create(&Vote {
                    status: Status::Counted,
                })
                .inc_by(tally.approvals() as u64);
        }
        for (_, discard) in &tally.discarded {
            self.votes
                .get_or_create(&Vote {
                    status: (*discard).into(),
                })
                .inc();
        }
    }
}
