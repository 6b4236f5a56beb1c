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

//! Proof of opening, bound to a message.
//!
//! Shows knowledge of `(r, a)` with `C = a·H + r·G` without revealing
//! either, as a signature on the message digest `m`:
//!
//! ```text
//! R = k2·H + k1·G
//! e = H(R || C || m)
//! u = k1 + e·r
//! v = k2 + e·a
//! ```
//!
//! and a verifier checks `v·H + u·G == e·C + R`.
//!
//! The nonces are drawn fresh on every call. Two signatures over different
//! messages with the same `(k1, k2)` reveal `r` and `a`.

use crate::commitment::{BlindingFactor, Commitment};
use crate::context::ProofContext;
use crate::errors::ProofError;
use crate::scalar::random_scalar;
use crate::tools::ChallengeHash;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;
use log::debug;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Signature proving knowledge of a commitment's opening.
///
/// Carries the message digest `m` it was made over.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningSignature {
    /// Nonce commitment `k2·H + k1·G`
    pub(crate) R: RistrettoPoint,
    /// Response for the blinding factor
    pub(crate) u: Scalar,
    /// Response for the value
    pub(crate) v: Scalar,
    /// Message digest
    pub(crate) m: Scalar,
}

impl OpeningSignature {
    /// Sign `message` with the opening `(blinding, value)` of `commitment`.
    #[allow(non_snake_case)]
    pub fn sign<C, T>(
        ctx: &ProofContext<C>,
        blinding: &BlindingFactor,
        value: &Scalar,
        message: &Scalar,
        h: &RistrettoPoint,
        commitment: &Commitment,
        rng: &mut T,
    ) -> Result<OpeningSignature, ProofError>
    where
        C: ChallengeHash,
        T: RngCore + CryptoRng,
    {
        let k1 = Zeroizing::new(random_scalar(rng)?);
        let k2 = Zeroizing::new(random_scalar(rng)?);

        let R = Commitment::new(ctx, h, &k2, &k1).into_point();
        let e = challenge(ctx, &R, commitment, message);

        Ok(OpeningSignature {
            R,
            u: *k1 + e * blinding.as_scalar(),
            v: *k2 + e * value,
            m: *message,
        })
    }

    /// Verify this signature against `commitment`.
    pub fn verify<C: ChallengeHash>(
        &self,
        ctx: &ProofContext<C>,
        h: &RistrettoPoint,
        commitment: &Commitment,
    ) -> Result<(), ProofError> {
        let e = challenge(ctx, &self.R, commitment, &self.m);
        let lhs = Commitment::new(ctx, h, &self.v, &self.u);

        if lhs.0 != e * commitment.0 + self.R {
            debug!("opening signature rejected");
            return Err(ProofError::SignatureInvalid);
        }
        Ok(())
    }

    /// The message digest this signature was made over.
    pub fn message(&self) -> &Scalar {
        &self.m
    }
}

#[allow(non_snake_case)]
fn challenge<C: ChallengeHash>(
    ctx: &ProofContext<C>,
    R: &RistrettoPoint,
    commitment: &Commitment,
    message: &Scalar,
) -> Scalar {
    let r_bytes = R.compress();
    let c_bytes = commitment.compress();
    ctx.hash_to_scalar(b"opening", &[r_bytes.as_bytes(), c_bytes.as_bytes(), message.as_bytes()])
}

/// Sign `message` with the opening of `commitment` under the default context.
pub fn sign_opening(
    blinding: &BlindingFactor,
    value: &Scalar,
    message: &Scalar,
    h: &RistrettoPoint,
    commitment: &Commitment,
) -> Result<OpeningSignature, ProofError> {
    OpeningSignature::sign(
        &ProofContext::sha256(),
        blinding,
        value,
        message,
        h,
        commitment,
        &mut OsRng,
    )
}

/// Verify an opening signature under the default context.
pub fn verify_opening(
    signature: &OpeningSignature,
    h: &RistrettoPoint,
    commitment: &Commitment,
) -> Result<(), ProofError> {
    signature.verify(&ProofContext::sha256(), h, commitment)
}
