// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Schnorr Public Key generation,

use crate::context::ProofContext;
use crate::errors::ProofError;
use crate::keys::SecretKey;
use crate::tools::ChallengeHash;
use core::ops::Add;
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    traits::Identity,
};
use std::fmt::Debug;

/// The length of a Ristretto Schnorr `PublicKey`, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// An Schnorr public key.
#[derive(Copy, Clone)]
pub struct PublicKey(pub(crate) RistrettoPoint);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "PublicKey( {:?} )", self.0.compress())
    }
}

impl Default for PublicKey {
    fn default() -> PublicKey {
        PublicKey(RistrettoPoint::identity())
    }
}

impl PublicKey {
    const DESCRIPTION: &'static str =
        "A Schnorr public key as a 32 byte compressed Ristretto point.";

    /// Access the compressed Ristretto form
    pub fn compress(&self) -> CompressedRistretto {
        self.0.compress()
    }

    /// Access the point form
    pub fn as_point(&self) -> &RistrettoPoint {
        &self.0
    }

    /// Extract the point form
    pub fn into_point(self) -> RistrettoPoint {
        self.0
    }

    /// Decompress into the `PublicKey` format.
    pub fn from_compressed(compressed: CompressedRistretto) -> Result<PublicKey, ProofError> {
        match compressed.decompress() {
            None => Err(ProofError::PointDecompressionError),
            Some(kosher) => Ok(PublicKey(kosher)),
        }
    }

    /// Wrap a point as a `PublicKey`.
    pub fn from_point(point: RistrettoPoint) -> PublicKey {
        PublicKey(point)
    }

    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.compress().to_bytes()
    }

    /// Construct a `PublicKey` from a slice of bytes.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an Schnorr `PublicKey` or whose error value
    /// is an `ProofError` describing the error that occurred.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, ProofError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(ProofError::BytesLengthError {
                name: "PublicKey",
                length: PUBLIC_KEY_LENGTH,
            });
        }
        let mut bits = [0u8; PUBLIC_KEY_LENGTH];
        bits.copy_from_slice(bytes);

        PublicKey::from_compressed(CompressedRistretto(bits))
    }

    /// Derive this public key from its corresponding `SecretKey`.
    pub fn from_secret<C: ChallengeHash>(
        ctx: &ProofContext<C>,
        secret_key: &SecretKey,
    ) -> PublicKey {
        PublicKey(ctx.mul_base(secret_key.as_scalar()))
    }

    /// The naive combined key `X_1 + X_2 + ... + X_n`.
    ///
    /// Signatures by each holder over the same message, made against this
    /// combined key, add up to a signature that verifies under it. There is
    /// no delinearization, so a participant who picks its key after seeing
    /// the others can cancel them out. Only combine keys from mutually
    /// trusting parties.
    pub fn combine(keys: &[PublicKey]) -> PublicKey {
        PublicKey(keys.iter().map(|k| k.0).sum())
    }
}

impl Add for PublicKey {
    type Output = PublicKey;

    fn add(self, other: PublicKey) -> PublicKey {
        PublicKey(self.0 + other.0)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &PublicKey) -> bool {
        // expanded point comparison is an equal time comparision
        self.as_point() == other.as_point()
    }
}

impl Eq for PublicKey {}

serde_boilerplate!(PublicKey);

#[cfg(test)]
mod test {
    use super::*;
    use curve25519_dalek::scalar::Scalar;

    #[test]
    fn combined_key_is_sum_of_secrets() {
        let ctx = ProofContext::sha256();
        let a = SecretKey::from_scalar(Scalar::from(11u64));
        let b = SecretKey::from_scalar(Scalar::from(31u64));
        let pa = PublicKey::from_secret(&ctx, &a);
        let pb = PublicKey::from_secret(&ctx, &b);

        let sum = SecretKey::from_scalar(a.as_scalar() + b.as_scalar());
        assert_eq!(PublicKey::combine(&[pa, pb]), PublicKey::from_secret(&ctx, &sum));
        assert_eq!(pa + pb, PublicKey::combine(&[pb, pa]));
    }

    #[test]
    fn public_key_bytes() {
        let ctx = ProofContext::sha256();
        let pk = PublicKey::from_point(ctx.mul_base(&Scalar::from(3u64)));
        assert_eq!(PublicKey::from_bytes(&pk.to_bytes()), Ok(pk));
        assert_eq!(
            PublicKey::from_bytes(&[0xffu8; 32]),
            Err(ProofError::PointDecompressionError)
        );
    }
}
