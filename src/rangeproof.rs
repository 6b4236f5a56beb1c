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

//! Borromean Range Proofs
//!
//! Proves that `C = v·H + r·G` commits to some `v` in `[0, 2^n - 1]`
//! without revealing `v` or `r`.
//!
//! The value is split into bits `b_i` and each bit gets its own commitment
//! `C_i`, to either `0` or `2^i`, with `Σ C_i = C`. For every bit the prover
//! shows a one-of-two ring signature: it knows the discrete log of either
//! `C_i` or `C_i - 2^i·H` with respect to `G`. All `n` rings close over one
//! shared challenge
//!
//! ```text
//! e0 = H(R_0 || R_1 || ... || R_{n-1})
//! ```
//!
//! so no single ring can be forged without controlling the joint hash.
//!
//! Each ring has two links. For a set bit the prover starts the ring at the
//! `2^i` side with `R_i = H(k_i·G)·C_i` and closes it with
//! `s_i = k_i + e0·r_i`. For an unset bit the prover starts from `R_i = k_i·G`
//! and can only fix `C_i` once `e0` is known, by simulating the `2^i` link
//! with a fresh nonce `k_i'`:
//!
//! ```text
//! e_i = H(e0·2^i·H + k_i'·G)
//! C_i = R_i / e_i
//! s_i = k_i' + k_i·e0 / e_i
//! ```
//!
//! A verifier recomputes
//!
//! ```text
//! e_i  = H(s_i·G - e0·(C_i - 2^i·H))
//! R_i' = e_i·C_i
//! ```
//!
//! and accepts iff `H(R_0' || ... || R_{n-1}') == e0` and `Σ C_i == C`.

use core::fmt::Debug;

use crate::commitment::{BlindingFactor, Commitment};
use crate::context::ProofContext;
use crate::errors::ProofError;
use crate::scalar::{decompose, pow2, random_scalar, MAX_BIT_WIDTH};
use crate::tools::ChallengeHash;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use log::{debug, trace};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

// Challenge labels
const RING_LABEL: &[u8] = b"rangeproof ring";
const JOINT_LABEL: &[u8] = b"rangeproof e0";

/// A range proof over `bits` bits.
///
/// Holds the joint challenge `e0`, one commitment per bit and one response
/// per bit. Both vectors have exactly `bits` entries, least significant
/// bit first.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProof {
    pub(crate) e0: Scalar,
    pub(crate) commitments: Vec<RistrettoPoint>,
    pub(crate) responses: Vec<Scalar>,
    pub(crate) bits: usize,
}

impl Debug for RangeProof {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "RangeProof( bits: {}, e0: {:?} )", self.bits, &self.e0)
    }
}

/// What the prover holds for one bit between the two rounds.
enum BitWitness {
    /// Set bit: `C_i` commits to `2^i` under `blinding`, the ring started
    /// with `nonce`.
    Known {
        commitment: RistrettoPoint,
        blinding: Scalar,
        nonce: Scalar,
    },
    /// Unset bit: `C_i` is resolved from `nonce_point = nonce·G` once the
    /// joint challenge exists.
    Deferred {
        nonce_point: RistrettoPoint,
        nonce: Scalar,
    },
}

impl Zeroize for BitWitness {
    fn zeroize(&mut self) {
        match self {
            BitWitness::Known { blinding, nonce, .. } => {
                blinding.zeroize();
                nonce.zeroize();
            }
            BitWitness::Deferred { nonce, .. } => nonce.zeroize(),
        }
    }
}

impl Drop for BitWitness {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl BitWitness {
    /// First round for bit `i`. Returns the ring start `R_i` and what is
    /// needed to close the ring later.
    fn start<C, R>(
        ctx: &ProofContext<C>,
        h: &RistrettoPoint,
        i: usize,
        bit: bool,
        rng: &mut R,
    ) -> Result<(RistrettoPoint, BitWitness), ProofError>
    where
        C: ChallengeHash,
        R: RngCore + CryptoRng,
    {
        if bit {
            let blinding = Zeroizing::new(random_scalar(rng)?);
            let commitment = Commitment::new(ctx, h, &pow2(i), &blinding).into_point();

            let nonce = Zeroizing::new(random_scalar(rng)?);
            let e_i = ctx.hash_points(RING_LABEL, &[ctx.mul_base(&nonce)]);

            let witness = BitWitness::Known {
                commitment,
                blinding: *blinding,
                nonce: *nonce,
            };
            return Ok((e_i * commitment, witness));
        }

        let nonce = Zeroizing::new(random_scalar(rng)?);
        let nonce_point = ctx.mul_base(&nonce);

        Ok((
            nonce_point,
            BitWitness::Deferred {
                nonce_point,
                nonce: *nonce,
            },
        ))
    }

    /// Second round for bit `i` under the joint challenge `e0`. Returns the
    /// bit commitment `C_i`, the response `s_i` and this bit's share of the
    /// overall blinding factor.
    fn close<C, R>(
        &self,
        ctx: &ProofContext<C>,
        h: &RistrettoPoint,
        i: usize,
        e0: &Scalar,
        rng: &mut R,
    ) -> Result<(RistrettoPoint, Scalar, Zeroizing<Scalar>), ProofError>
    where
        C: ChallengeHash,
        R: RngCore + CryptoRng,
    {
        match self {
            BitWitness::Known {
                commitment,
                blinding,
                nonce,
            } => {
                let s_i = nonce + e0 * blinding;
                Ok((*commitment, s_i, Zeroizing::new(*blinding)))
            }
            BitWitness::Deferred { nonce_point, nonce } => {
                let fresh = Zeroizing::new(random_scalar(rng)?);
                let shifted = Commitment::new(ctx, h, &(e0 * pow2(i)), &fresh);
                let e_inv = ctx.hash_points(RING_LABEL, &[shifted.into_point()]).invert();

                let commitment = nonce_point * e_inv;
                let s_i = *fresh + nonce * e0 * e_inv;
                Ok((commitment, s_i, Zeroizing::new(nonce * e_inv)))
            }
        }
    }
}

impl RangeProof {
    /// Commit to `value` and prove it lies in `[0, 2^bits - 1]`.
    ///
    /// Returns the proof, the commitment `Σ C_i` and the blinding factor `r`
    /// with `Σ C_i = value·H + r·G`. Fails with `RangeExceeded` before any
    /// randomness is drawn if `value` does not fit, and with
    /// `RandomnessError` if `rng` runs dry. No partial proof is ever
    /// returned.
    pub fn prove<C, R>(
        ctx: &ProofContext<C>,
        h: &RistrettoPoint,
        value: u64,
        bits: usize,
        rng: &mut R,
    ) -> Result<(RangeProof, Commitment, BlindingFactor), ProofError>
    where
        C: ChallengeHash,
        R: RngCore + CryptoRng,
    {
        let decomposed = decompose(value, bits)?;
        trace!("proving {} bit range", bits);

        let mut nonce_points = Vec::with_capacity(bits);
        let mut witnesses = Vec::with_capacity(bits);
        for (i, bit) in decomposed.into_iter().enumerate() {
            let (nonce_point, witness) = BitWitness::start(ctx, h, i, bit, rng)?;
            nonce_points.push(nonce_point);
            witnesses.push(witness);
        }

        // Every ring start is fixed before the joint challenge is drawn.
        let e0 = ctx.hash_points(JOINT_LABEL, &nonce_points);

        let mut blinding = Zeroizing::new(Scalar::ZERO);
        let mut commitments = Vec::with_capacity(bits);
        let mut responses = Vec::with_capacity(bits);
        for (i, witness) in witnesses.iter().enumerate() {
            let (c_i, s_i, r_i) = witness.close(ctx, h, i, &e0, rng)?;
            *blinding += *r_i;
            commitments.push(c_i);
            responses.push(s_i);
        }

        let commitment = Commitment(commitments.iter().sum());
        let proof = RangeProof {
            e0,
            commitments,
            responses,
            bits,
        };

        Ok((proof, commitment, BlindingFactor::from_scalar(*blinding)))
    }

    /// Check that `commitment` opens to a value in `[0, 2^bits - 1]`.
    ///
    /// Reports `ChallengeMismatch` when the rings do not close over `e0`,
    /// and `CommitmentMismatch` when the bit commitments do not add up to
    /// `commitment`.
    pub fn verify<C: ChallengeHash>(
        &self,
        ctx: &ProofContext<C>,
        h: &RistrettoPoint,
        commitment: &Commitment,
    ) -> Result<(), ProofError> {
        self.check_shape()?;

        let neg_e0 = -self.e0;
        let nonce_points: Vec<RistrettoPoint> = self
            .commitments
            .iter()
            .zip(self.responses.iter())
            .enumerate()
            .map(|(i, (c_i, s_i))| {
                let shifted = ctx.mul_base(s_i) + neg_e0 * (c_i - pow2(i) * h);
                let e_i = ctx.hash_points(RING_LABEL, &[shifted]);
                e_i * c_i
            })
            .collect();

        if ctx.hash_points(JOINT_LABEL, &nonce_points) != self.e0 {
            debug!("range proof rejected: challenge mismatch over {} bits", self.bits);
            return Err(ProofError::ChallengeMismatch);
        }

        let sum: RistrettoPoint = self.commitments.iter().sum();
        if sum != commitment.0 {
            debug!("range proof rejected: bit commitments do not sum to commitment");
            return Err(ProofError::CommitmentMismatch);
        }

        Ok(())
    }

    fn check_shape(&self) -> Result<(), ProofError> {
        let consistent = self.commitments.len() == self.bits && self.responses.len() == self.bits;
        if !consistent {
            return Err(ProofError::MalformedProof {
                bits: self.bits,
                commitments: self.commitments.len(),
                responses: self.responses.len(),
            });
        }
        if self.bits == 0 || self.bits > MAX_BIT_WIDTH {
            return Err(ProofError::InvalidBitWidth(self.bits));
        }
        Ok(())
    }

    /// The joint challenge `e0`.
    pub fn challenge(&self) -> &Scalar {
        &self.e0
    }

    /// The per-bit commitments, least significant bit first.
    pub fn bit_commitments(&self) -> &[RistrettoPoint] {
        &self.commitments
    }

    /// The per-bit responses, least significant bit first.
    pub fn responses(&self) -> &[Scalar] {
        &self.responses
    }

    /// Number of bits the proof covers.
    pub fn bit_width(&self) -> usize {
        self.bits
    }
}

/// Prove `value` fits in `bits` bits under the default context, drawing
/// randomness from the operating system.
pub fn create_range_proof(
    h: &RistrettoPoint,
    value: u64,
    bits: usize,
) -> Result<(RangeProof, Commitment, BlindingFactor), ProofError> {
    RangeProof::prove(&ProofContext::sha256(), h, value, bits, &mut OsRng)
}

/// Verify `proof` for `commitment` under the default context.
pub fn verify_range_proof(
    h: &RistrettoPoint,
    commitment: &Commitment,
    proof: &RangeProof,
) -> Result<(), ProofError> {
    proof.verify(&ProofContext::sha256(), h, commitment)
}
