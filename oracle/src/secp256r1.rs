//! Recoverable secp256r1 signatures over checkpoint votes.
//!
//! Administrators sign the 32-byte prehash returned by [crate::types::Submission::prehash] and
//! publish `(recovery_id, r, s)`. Anyone can then recover the signer's public key (and from it the
//! signer's [Address]) without being told who signed.
//!
//! Signatures are normalized according to [BIP 62](https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki#low-s-values-in-signatures)
//! and recovery rejects any signature with an `s` value in the upper half of the curve order.
//!
//! # Example
//! ```rust
//! use commonware_cryptography::sha256::hash;
//! use commonware_oracle::secp256r1::{recover, PrivateKey};
//!
//! let signer = PrivateKey::from_seed(0);
//! let prehash = hash(b"hello, world!");
//! let vote = signer.sign(&prehash);
//! assert_eq!(recover(&prehash, &vote), Some(signer.address()));
//! ```

use crate::types::{Address, Vote, ADDRESS_LENGTH};
use commonware_cryptography::sha256::{hash, Digest};
use ecdsa::RecoveryId;
use p256::{
    ecdsa::{Signature, SigningKey, VerifyingKey},
    elliptic_curve::scalar::IsHigh,
    FieldBytes,
};
use rand::{rngs::StdRng, CryptoRng, Rng, SeedableRng};

/// Secp256r1 key held by an administrator.
#[derive(Clone)]
pub struct PrivateKey {
    signer: SigningKey,
}

impl PrivateKey {
    /// Create a fresh [PrivateKey] using the supplied RNG.
    pub fn from_rng<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self {
            signer: SigningKey::random(rng),
        }
    }

    /// Create a [PrivateKey] from a seed.
    ///
    /// # Warning
    ///
    /// This function is insecure and should only be used for examples
    /// and testing.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_rng(&mut rng)
    }

    /// Returns the public key corresponding to this [PrivateKey].
    pub fn public_key(&self) -> VerifyingKey {
        self.signer.verifying_key().to_owned()
    }

    /// Returns the [Address] of this [PrivateKey].
    pub fn address(&self) -> Address {
        address(self.signer.verifying_key())
    }

    /// Sign a 32-byte prehash, producing a normalized, recoverable [Vote].
    pub fn sign(&self, prehash: &Digest) -> Vote {
        let (signature, recovery_id) = self
            .signer
            .sign_prehash_recoverable(prehash.as_ref())
            .expect("prehash is a valid field element");

        // Negating `s` mirrors the recovered point, so the parity bit must flip with it.
        let r: FieldBytes = signature.r().into();
        let (s, recovery_id): (FieldBytes, RecoveryId) = if signature.s().is_high().into() {
            (
                (-signature.s()).into(),
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            )
        } else {
            (signature.s().into(), recovery_id)
        };
        Vote {
            recovery_id: recovery_id.to_byte(),
            r: r.into(),
            s: s.into(),
        }
    }
}

/// Derive the [Address] of a public key.
///
/// The address is the first 20 bytes of the SHA-256 digest of the compressed SEC1 encoding
/// (`Y-Parity || X`) of the key.
pub fn address(public_key: &VerifyingKey) -> Address {
    let digest = hash(public_key.to_encoded_point(true).as_bytes());
    let mut address = [0u8; ADDRESS_LENGTH];
    address.copy_from_slice(&digest.as_ref()[..ADDRESS_LENGTH]);
    Address::from(address)
}

/// Recover the [Address] that produced `vote` over `prehash`.
///
/// Returns `None` if the recovery id is out of range, either scalar is zero or not reduced, `s`
/// is not normalized, or no public key can be recovered.
pub fn recover(prehash: &Digest, vote: &Vote) -> Option<Address> {
    let recovery_id = RecoveryId::from_byte(vote.recovery_id)?;
    let signature = Signature::from_scalars(
        *FieldBytes::from_slice(&vote.r),
        *FieldBytes::from_slice(&vote.s),
    )
    .ok()?;
    if signature.s().is_high().into() {
        return None;
    }
    let public_key =
        VerifyingKey::recover_from_prehash(prehash.as_ref(), &signature, recovery_id).ok()?;
    Some(address(&public_key))
}
