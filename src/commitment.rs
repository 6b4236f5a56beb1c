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

//! Pedersen Commitments
//!
//! `C = a·H + r·G` hides `a` behind the blinding factor `r` and binds the
//! committer to `(a, r)` as long as nobody knows `log_G(H)`. The second
//! generator `H` is always supplied by the caller.
//!
//! Commitments are additively homomorphic:
//! `Com(a1, r1) + Com(a2, r2) == Com(a1 + a2, r1 + r2)`.

use core::fmt::Debug;
use core::iter::Sum;
use core::ops::{Add, Sub};

use crate::context::ProofContext;
use crate::errors::ProofError;
use crate::scalar::{random_scalar, scalar_from_bytes};
use crate::tools::ChallengeHash;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::Identity;
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// The length of a compressed `Commitment`, in bytes.
pub const COMMITMENT_LENGTH: usize = 32;

/// The length of a `BlindingFactor`, in bytes.
pub const BLINDING_LENGTH: usize = 32;

/// A Pedersen commitment `a·H + r·G`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Commitment(pub(crate) RistrettoPoint);

impl Debug for Commitment {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Commitment( {:?} )", self.0.compress())
    }
}

impl Default for Commitment {
    fn default() -> Commitment {
        Commitment(RistrettoPoint::identity())
    }
}

impl Commitment {
    const DESCRIPTION: &'static str =
        "A Pedersen commitment as a 32 byte compressed Ristretto point.";

    /// Commit to `value` under `blinding`: `value·H + blinding·G`.
    pub fn new<C: ChallengeHash>(
        ctx: &ProofContext<C>,
        h: &RistrettoPoint,
        value: &Scalar,
        blinding: &Scalar,
    ) -> Commitment {
        Commitment(value * h + ctx.mul_base(blinding))
    }

    /// Check that `(value, blinding)` opens this commitment.
    pub fn opens_to<C: ChallengeHash>(
        &self,
        ctx: &ProofContext<C>,
        h: &RistrettoPoint,
        value: &Scalar,
        blinding: &BlindingFactor,
    ) -> bool {
        Commitment::new(ctx, h, value, blinding.as_scalar()) == *self
    }

    /// Wrap a group element that is already a commitment.
    pub fn from_point(point: RistrettoPoint) -> Commitment {
        Commitment(point)
    }

    /// Access the point form
    pub fn as_point(&self) -> &RistrettoPoint {
        &self.0
    }

    /// Extract the point form
    pub fn into_point(self) -> RistrettoPoint {
        self.0
    }

    /// Compress into the canonical encoding.
    pub fn compress(&self) -> CompressedRistretto {
        self.0.compress()
    }

    /// Convert this commitment to a byte array.
    pub fn to_bytes(&self) -> [u8; COMMITMENT_LENGTH] {
        self.0.compress().to_bytes()
    }

    /// Construct a `Commitment` from a slice of bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Commitment, ProofError> {
        if bytes.len() != COMMITMENT_LENGTH {
            return Err(ProofError::BytesLengthError {
                name: "Commitment",
                length: COMMITMENT_LENGTH,
            });
        }
        let mut bits = [0u8; COMMITMENT_LENGTH];
        bits.copy_from_slice(bytes);

        CompressedRistretto(bits)
            .decompress()
            .map(Commitment)
            .ok_or(ProofError::PointDecompressionError)
    }
}

impl Add for Commitment {
    type Output = Commitment;

    fn add(self, other: Commitment) -> Commitment {
        Commitment(self.0 + other.0)
    }
}

impl Sub for Commitment {
    type Output = Commitment;

    fn sub(self, other: Commitment) -> Commitment {
        Commitment(self.0 - other.0)
    }
}

impl<'a> Sum<&'a Commitment> for Commitment {
    fn sum<I: Iterator<Item = &'a Commitment>>(iter: I) -> Commitment {
        Commitment(iter.map(|c| c.0).sum())
    }
}

serde_boilerplate!(Commitment);

/// The secret scalar masking a committed value.
///
/// Wiped when it goes out of scope.
#[derive(Clone, Default)]
pub struct BlindingFactor(pub(crate) Scalar);

impl Debug for BlindingFactor {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "BlindingFactor( .. )")
    }
}

impl Eq for BlindingFactor {}
impl PartialEq for BlindingFactor {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}
impl ConstantTimeEq for BlindingFactor {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Zeroize for BlindingFactor {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Overwrite secret key material with null bytes when it goes out of scope.
impl Drop for BlindingFactor {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl BlindingFactor {
    /// Sample a fresh blinding factor.
    pub fn random<R>(csprng: &mut R) -> Result<BlindingFactor, ProofError>
    where
        R: CryptoRng + RngCore,
    {
        Ok(BlindingFactor(random_scalar(csprng)?))
    }

    /// Wrap an existing scalar.
    pub fn from_scalar(s: Scalar) -> BlindingFactor {
        BlindingFactor(s)
    }

    /// View this blinding factor as a scalar.
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }

    /// Convert this blinding factor to a byte array.
    pub fn to_bytes(&self) -> [u8; BLINDING_LENGTH] {
        self.0.to_bytes()
    }

    /// Construct a `BlindingFactor` from a canonical scalar encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<BlindingFactor, ProofError> {
        if bytes.len() != BLINDING_LENGTH {
            return Err(ProofError::BytesLengthError {
                name: "BlindingFactor",
                length: BLINDING_LENGTH,
            });
        }
        let mut bits = [0u8; BLINDING_LENGTH];
        bits.copy_from_slice(bytes);
        let parsed = scalar_from_bytes(bits);
        bits.zeroize();

        Ok(BlindingFactor(parsed?))
    }
}

impl<'a> Add<&'a BlindingFactor> for &'a BlindingFactor {
    type Output = BlindingFactor;

    fn add(self, other: &'a BlindingFactor) -> BlindingFactor {
        BlindingFactor(self.0 + other.0)
    }
}

/// `value·H + blinding·G` under the default context.
pub fn create_commitment(h: &RistrettoPoint, value: &Scalar, blinding: &Scalar) -> Commitment {
    Commitment::new(&ProofContext::sha256(), h, value, blinding)
}
