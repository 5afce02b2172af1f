//! Types exchanged with the [crate::engine].

use crate::Error;
use bytes::{Buf, BufMut};
use commonware_codec::{
    EncodeSize, Error as CodecError, FixedSize, Read, ReadExt, ReadRangeExt, Write,
};
use commonware_cryptography::sha256::{hash, Digest};
use commonware_utils::{hex, union, union_unique};
use std::fmt::{Debug, Display};

/// Length of an [Address] in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Length of each signature scalar (`r` and `s`) in bytes.
pub const SCALAR_LENGTH: usize = 32;

/// Suffix appended to the oracle namespace when signing votes.
const VOTE_SUFFIX: &[u8] = b"_CHECKPOINT_VOTE";

/// Returns the namespace administrators sign votes under.
///
/// Suffixing the deployment namespace keeps vote signatures from being reused for any other
/// message the committee signs under the same namespace.
#[inline]
pub fn vote_namespace(namespace: &[u8]) -> Vec<u8> {
    union(namespace, VOTE_SUFFIX)
}

/// Returns the hash that represents an empty (invalid) checkpoint.
#[inline]
pub fn empty_hash() -> Digest {
    Digest::from([0u8; 32])
}

/// Identity of an administrator, derived from its public key.
///
/// Addresses are compared by their big-endian bytes. Batches of votes must be sorted in strictly
/// ascending [Address] order.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Create an [Address] from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(value: [u8; ADDRESS_LENGTH]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.0))
    }
}

impl Write for Address {
    fn write(&self, writer: &mut impl BufMut) {
        self.0.write(writer);
    }
}

impl Read for Address {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &()) -> Result<Self, CodecError> {
        Ok(Self(<[u8; ADDRESS_LENGTH]>::read(reader)?))
    }
}

impl FixedSize for Address {
    const SIZE: usize = ADDRESS_LENGTH;
}

/// A recoverable signature over a [Submission] by a single administrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vote {
    /// Recovery id (`0..=3`) selecting which curve point `r` refers to.
    pub recovery_id: u8,
    /// The `r` scalar (big-endian).
    pub r: [u8; SCALAR_LENGTH],
    /// The `s` scalar (big-endian).
    pub s: [u8; SCALAR_LENGTH],
}

impl Write for Vote {
    fn write(&self, writer: &mut impl BufMut) {
        self.recovery_id.write(writer);
        self.r.write(writer);
        self.s.write(writer);
    }
}

impl Read for Vote {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &()) -> Result<Self, CodecError> {
        let recovery_id = u8::read(reader)?;
        let r = <[u8; SCALAR_LENGTH]>::read(reader)?;
        let s = <[u8; SCALAR_LENGTH]>::read(reader)?;
        Ok(Self { recovery_id, r, s })
    }
}

impl FixedSize for Vote {
    const SIZE: usize = u8::SIZE + SCALAR_LENGTH + SCALAR_LENGTH;
}

/// The latest checkpoint accepted by the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Checkpoint {
    /// Index of the attested section (`0` if nothing has been accepted yet).
    pub section_index: u64,
    /// Commitment to the ledger state as of the end of the section.
    pub hash: Digest,
    /// Height of the host ledger when the checkpoint was accepted.
    ///
    /// This is not the height the checkpoint commits to. It only anchors the maturity window of
    /// the next acceptance.
    pub accepted_at: u64,
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self {
            section_index: 0,
            hash: empty_hash(),
            accepted_at: 0,
        }
    }
}

impl Write for Checkpoint {
    fn write(&self, writer: &mut impl BufMut) {
        self.section_index.write(writer);
        self.hash.write(writer);
        self.accepted_at.write(writer);
    }
}

impl Read for Checkpoint {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &()) -> Result<Self, CodecError> {
        let section_index = u64::read(reader)?;
        let hash = Digest::read(reader)?;
        let accepted_at = u64::read(reader)?;
        Ok(Self {
            section_index,
            hash,
            accepted_at,
        })
    }
}

impl FixedSize for Checkpoint {
    const SIZE: usize = u64::SIZE + Digest::SIZE + u64::SIZE;
}

/// A request to advance the oracle to `section_index` with `candidate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// Height of a recent block on the host ledger.
    pub recent_height: u64,
    /// Hash of the block at `recent_height`, as observed by the signers.
    pub recent_hash: Digest,
    /// Proposed checkpoint hash.
    pub candidate: Digest,
    /// Section the candidate attests to.
    pub section_index: u64,
    /// Votes, sorted by the [Address] of their signer.
    pub votes: Vec<Vote>,
}

impl Submission {
    /// Assemble a [Submission] from parallel arrays of signature components.
    ///
    /// Returns [Error::LengthMismatch] if the arrays are not all the same length.
    pub fn from_parallel(
        recent_height: u64,
        recent_hash: Digest,
        candidate: Digest,
        section_index: u64,
        v: &[u8],
        r: &[[u8; SCALAR_LENGTH]],
        s: &[[u8; SCALAR_LENGTH]],
    ) -> Result<Self, Error> {
        if v.len() != r.len() || v.len() != s.len() {
            return Err(Error::LengthMismatch(v.len(), r.len(), s.len()));
        }
        let votes = v
            .iter()
            .zip(r)
            .zip(s)
            .map(|((&recovery_id, &r), &s)| Vote { recovery_id, r, s })
            .collect();
        Ok(Self {
            recent_height,
            recent_hash,
            candidate,
            section_index,
            votes,
        })
    }

    /// Returns the message every vote in this submission signs (excluding the namespace).
    pub fn payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(u64::SIZE * 2 + Digest::SIZE * 2);
        self.section_index.write(&mut payload);
        self.candidate.write(&mut payload);
        self.recent_height.write(&mut payload);
        self.recent_hash.write(&mut payload);
        payload
    }

    /// Returns the digest every vote in this submission signs.
    pub fn prehash(&self, namespace: &[u8]) -> Digest {
        hash(&union_unique(&vote_namespace(namespace), &self.payload()))
    }
}

impl Write for Submission {
    fn write(&self, writer: &mut impl BufMut) {
        self.recent_height.write(writer);
        self.recent_hash.write(writer);
        self.candidate.write(writer);
        self.section_index.write(writer);
        self.votes.write(writer);
    }
}

impl Read for Submission {
    /// The maximum number of votes to accept.
    type Cfg = usize;

    fn read_cfg(reader: &mut impl Buf, max_votes: &usize) -> Result<Self, CodecError> {
        let recent_height = u64::read(reader)?;
        let recent_hash = Digest::read(reader)?;
        let candidate = Digest::read(reader)?;
        let section_index = u64::read(reader)?;
        let votes = Vec::<Vote>::read_range(reader, ..=*max_votes)?;
        Ok(Self {
            recent_height,
            recent_hash,
            candidate,
            section_index,
            votes,
        })
    }
}

impl EncodeSize for Submission {
    fn encode_size(&self) -> usize {
        self.recent_height.encode_size()
            + self.recent_hash.encode_size()
            + self.candidate.encode_size()
            + self.section_index.encode_size()
            + self.votes.encode_size()
    }
}

/// Activity reported by the oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activity {
    /// A vote from an administrator that counted toward a submission.
    Vote {
        section_index: u64,
        candidate: Digest,
        vote: Vote,
    },
    /// A checkpoint that was accepted.
    Checkpoint(Checkpoint),
}

impl Write for Activity {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Activity::Vote {
                section_index,
                candidate,
                vote,
            } => {
                0u8.write(writer);
                section_index.write(writer);
                candidate.write(writer);
                vote.write(writer);
            }
            Activity::Checkpoint(checkpoint) => {
                1u8.write(writer);
                checkpoint.write(writer);
            }
        }
    }
}

impl Read for Activity {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &()) -> Result<Self, CodecError> {
        match u8::read(reader)? {
            0 => {
                let section_index = u64::read(reader)?;
                let candidate = Digest::read(reader)?;
                let vote = Vote::read(reader)?;
                Ok(Activity::Vote {
                    section_index,
                    candidate,
                    vote,
                })
            }
            1 => Ok(Activity::Checkpoint(Checkpoint::read(reader)?)),
            i => Err(CodecError::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for Activity {
    fn encode_size(&self) -> usize {
        1 + match self {
            Activity::Vote { .. } => u64::SIZE + Digest::SIZE + Vote::SIZE,
            Activity::Checkpoint(_) => Checkpoint::SIZE,
        }
    }
}
