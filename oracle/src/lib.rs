//! Attest to ledger checkpoints with a fixed committee of administrators.
//!
//! A checkpoint oracle lets a fixed committee of administrators jointly attest to periodic
//! commitments over an append-only ledger (one per fixed-size section of blocks) so that a light
//! client can bootstrap trust without replaying history.
//!
//! # Overview
//!
//! Each attempt to advance the oracle carries a batch of recoverable secp256r1 signatures over a
//! message binding the target section, the candidate checkpoint hash, and a recent block of the
//! host ledger (the anchor). The [engine::Oracle] accepts the batch if and only if:
//!
//! 1. The anchor matches the host ledger (the batch was not collected on an orphaned fork).
//! 2. Enough blocks have elapsed since the previous acceptance (the maturity window).
//! 3. The batch targets exactly the section after the latest accepted one.
//! 4. The candidate hash is non-empty and the batch carries at least one vote.
//! 5. At least `threshold` distinct administrators signed it.
//!
//! Votes must be sorted by the [types::Address] of their signer. A vote that cannot be recovered,
//! repeats a signer, breaks the ordering, or was cast by a non-administrator is skipped rather than
//! failing the batch.
//!
//! Every vote that counts is reported to a [Reporter] as [types::Activity::Vote] (whether or not the
//! batch ultimately reaches the threshold) and every accepted checkpoint as
//! [types::Activity::Checkpoint].
//!
//! # Status
//!
//! `commonware-oracle` is **ALPHA** software and is not yet recommended for production use. Developers should
//! expect breaking changes and occasional instability.

#![doc(
    html_logo_url = "https://commonware.xyz/imgs/rustdoc_logo.svg",
    html_favicon_url = "https://commonware.xyz/favicon.ico"
)]

use commonware_cryptography::sha256::Digest;
use thiserror::Error;

pub mod committee;
pub mod engine;
#[cfg(test)]
pub mod mocks;
pub mod secp256r1;
pub mod store;
pub mod types;
pub mod validator;

use types::{Activity, Address};

/// Errors that can occur when constructing an oracle or its inputs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("committee is empty")]
    EmptyCommittee,
    #[error("duplicate admin: {0}")]
    DuplicateAdmin(Address),
    #[error("threshold must be at least 1")]
    ZeroThreshold,
    #[error("threshold {0} exceeds committee size {1}")]
    ThresholdTooHigh(u32, usize),
    #[error("section size must be at least 1")]
    ZeroSectionSize,
    #[error("signature components differ in length: v={0}, r={1}, s={2}")]
    LengthMismatch(usize, usize, usize),
}

/// View of the host ledger the oracle anchors submissions to.
///
/// Lookups must be synchronous and cheap: they are performed while the oracle holds exclusive
/// access to its state.
pub trait Ledger: Send + Sync + 'static {
    /// Returns the height of the latest block.
    fn height(&self) -> u64;

    /// Returns the hash of the block at `height`.
    ///
    /// Returns `None` if the block is not (or no longer) available, for example because `height`
    /// is in the future or has fallen out of the ledger's retention window.
    fn block_hash(&self, height: u64) -> Option<Digest>;
}

/// Receives [Activity] produced while processing submissions.
///
/// Reporting is fire-and-forget. Activity is reported for every vote that counts toward a
/// submission, even if that submission is ultimately rejected.
pub trait Reporter: Send + 'static {
    /// Report some activity observed by the oracle.
    fn report(&mut self, activity: Activity);
}

/// An implementation of [Reporter] for an optional [Reporter].
///
/// Reporting is a no-op if the [Reporter] is `None`.
impl<R: Reporter> Reporter for Option<R> {
    fn report(&mut self, activity: Activity) {
        let Some(reporter) = self else {
            return;
        };
        reporter.report(activity);
    }
}
