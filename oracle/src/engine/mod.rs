//! Accept checkpoints signed by a threshold of administrators.
//!
//! # Usage
//!
//! [Oracle] is a synchronous state machine: callers that already serialize access to it (for
//! example, a block executor applying transactions one at a time) can call
//! [Oracle::set_checkpoint] directly. Everyone else should wrap it in an [Actor] and interact with
//! it through the returned [Mailbox].
//!
//! # Metrics
//!
//! * `submissions`: Number of submissions processed, labeled by outcome.
//! * `votes`: Number of votes inspected while tallying, labeled by status.
//! * `section`: Index of the latest accepted section.

use crate::{types::Address, Ledger, Reporter};

mod actor;
pub use actor::Actor;
mod ingress;
pub use ingress::{Mailbox, Message};
mod metrics;
mod oracle;
pub use oracle::Oracle;

/// Configuration for the [Oracle].
pub struct Config<L: Ledger, R: Reporter> {
    /// Host ledger submissions are anchored to.
    pub ledger: L,

    /// Receives votes and checkpoints as they are accepted.
    pub reporter: R,

    /// Namespace votes are signed under.
    pub namespace: Vec<u8>,

    /// Administrators allowed to vote. Fixed for the lifetime of the [Oracle].
    pub admins: Vec<Address>,

    /// Number of ledger blocks per checkpoint section.
    pub section_size: u64,

    /// Number of blocks that must be confirmed after a section closes before it may be attested.
    pub process_confirms: u64,

    /// Minimum number of distinct administrator votes required to accept a checkpoint.
    pub threshold: u32,

    /// Number of messages to hold in the [Actor]'s backlog before blocking.
    pub mailbox_size: usize,
}
