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

//! A Rust implementation of Schnorr signing with naive aggregation

use crate::context::ProofContext;
use crate::errors::ProofError;
use crate::keys::{PublicKey, SecretKey};
use crate::scalar::{random_scalar, scalar_from_bytes};
use crate::tools::ChallengeHash;
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::Identity,
};
use core::iter::Sum;
use log::debug;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt::Debug;
use zeroize::Zeroizing;

/// The length of a Ristretto Schnorr `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An Schnorr signature.
///
/// # Note
///
/// These signatures are "detached": they do **not** include a copy
/// of the message which has been signed.
///
/// The challenge covers the message and public key but not `R`, which is
/// what lets partial signatures under a combined key add up.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R = k·G` for the nonce `k`.
    pub(crate) R: RistrettoPoint,

    /// `s = k - e·x` where `e = H(m || X)`.
    ///
    /// - `x` is the signing secret key
    /// - `X` is the public key the signature verifies under
    /// - `m` is the message digest
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R.compress(), &self.s)
    }
}

impl Default for Signature {
    fn default() -> Signature {
        Signature {
            R: RistrettoPoint::identity(),
            s: Scalar::ZERO,
        }
    }
}

impl Signature {
    const DESCRIPTION: &'static str =
        "A 64 byte Schnorr signature: a compressed Ristretto point and a canonical scalar.";

    /// Sign the message digest `message` with `secret_key`.
    ///
    /// `public_key` is hashed into the challenge. A lone signer passes its
    /// own public key. Co-signers of an aggregate each pass the combined
    /// key from [`PublicKey::combine`], so their partial signatures add up.
    ///
    /// # Examples
    ///
    /// ```
    /// use confidential::*;
    /// use rand::rngs::OsRng;
    ///
    /// let ctx = ProofContext::sha256();
    /// let keypair = Keypair::generate(&ctx, &mut OsRng).unwrap();
    /// let message = ctx.message_digest(b"All I want is to pet all of the dogs.");
    ///
    /// let sig = Signature::sign(&ctx, &keypair.secret, &keypair.public, &message, &mut OsRng)
    ///     .unwrap();
    /// assert!(sig.verify(&ctx, &keypair.public, &message).is_ok());
    /// ```
    #[allow(non_snake_case)]
    pub fn sign<C, T>(
        ctx: &ProofContext<C>,
        secret_key: &SecretKey,
        public_key: &PublicKey,
        message: &Scalar,
        rng: &mut T,
    ) -> Result<Signature, ProofError>
    where
        C: ChallengeHash,
        T: RngCore + CryptoRng,
    {
        let k = Zeroizing::new(random_scalar(rng)?);
        let R = ctx.mul_base(&k);
        let e = challenge(ctx, public_key, message);

        Ok(Signature {
            R,
            s: *k - e * secret_key.as_scalar(),
        })
    }

    /// Verify a signature on the message digest `message` under `public_key`.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if `s·G + e·X == R`, and `Err` otherwise.
    pub fn verify<C: ChallengeHash>(
        &self,
        ctx: &ProofContext<C>,
        public_key: &PublicKey,
        message: &Scalar,
    ) -> Result<(), ProofError> {
        let e = challenge(ctx, public_key, message);

        if ctx.mul_base(&self.s) + e * public_key.as_point() != self.R {
            debug!("schnorr signature rejected");
            return Err(ProofError::SignatureInvalid);
        }
        Ok(())
    }

    /// Add two partial signatures into one: `(R_a + R_b, s_a + s_b)`.
    ///
    /// The result verifies under the combined key only when both parts
    /// were made over the same message against that combined key.
    pub fn aggregate(&self, other: &Signature) -> Signature {
        Signature {
            R: self.R + other.R,
            s: self.s + other.s,
        }
    }

    /// Convert this `Signature` to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        bytes[..32].copy_from_slice(self.R.compress().as_bytes());
        bytes[32..].copy_from_slice(self.s.as_bytes());
        bytes
    }

    /// Construct a `Signature` from a slice of bytes.
    #[inline]
    #[allow(non_snake_case)]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, ProofError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(ProofError::BytesLengthError {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            });
        }
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        let R = CompressedRistretto(lower)
            .decompress()
            .ok_or(ProofError::PointDecompressionError)?;
        let s = scalar_from_bytes(upper)?;

        Ok(Signature { R, s })
    }
}

impl<'a> Sum<&'a Signature> for Signature {
    fn sum<I: Iterator<Item = &'a Signature>>(iter: I) -> Signature {
        iter.fold(Signature::default(), |acc, sig| acc.aggregate(sig))
    }
}

serde_boilerplate!(Signature);

// e = H(m || X)
fn challenge<C: ChallengeHash>(
    ctx: &ProofContext<C>,
    public_key: &PublicKey,
    message: &Scalar,
) -> Scalar {
    let key = public_key.compress();
    ctx.hash_to_scalar(b"schnorr", &[message.as_bytes(), key.as_bytes()])
}

/// Sign `message` under the default context.
pub fn sign_schnorr(
    secret_key: &SecretKey,
    public_key: &PublicKey,
    message: &Scalar,
) -> Result<Signature, ProofError> {
    Signature::sign(&ProofContext::sha256(), secret_key, public_key, message, &mut OsRng)
}

/// Verify a signature under the default context.
pub fn verify_schnorr(
    signature: &Signature,
    public_key: &PublicKey,
    message: &Scalar,
) -> Result<(), ProofError> {
    signature.verify(&ProofContext::sha256(), public_key, message)
}

/// Naively aggregate two partial signatures.
pub fn aggregate_schnorr(a: &Signature, b: &Signature) -> Signature {
    a.aggregate(b)
}
