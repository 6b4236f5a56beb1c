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

//
// Confidential values via ristretto
//

//! Pedersen commitments to hidden amounts, Borromean range proofs that a
//! committed amount lies in `[0, 2^n - 1]`, signatures proving knowledge of
//! a commitment's opening, and Schnorr signatures with naive aggregation.
//!
//! Every operation takes a [`ProofContext`] fixing the base point `G` and
//! the Fiat-Shamir hash. The second generator `H` is supplied by the caller
//! and must have no known discrete log with respect to `G`.
//!
//! ```
//! use confidential::*;
//! use curve25519_dalek::scalar::Scalar;
//!
//! let ctx = ProofContext::sha256();
//! let h = ctx.mul_base(&Scalar::from(123456u64));
//!
//! let (proof, commitment, blinding) = create_range_proof(&h, 10, 5).unwrap();
//! assert!(verify_range_proof(&h, &commitment, &proof).is_ok());
//!
//! let message = ctx.message_digest(b"12345");
//! let sig = sign_opening(&blinding, &Scalar::from(10u64), &message, &h, &commitment).unwrap();
//! assert!(verify_opening(&sig, &h, &commitment).is_ok());
//! ```

// Useful links:
// https://github.com/Blockstream/borromean_paper
// https://www.elementsproject.org/features/confidential-transactions/investigation

#[macro_use]
mod ser;

mod errors;
pub use errors::ProofError;
pub mod tools;
pub mod context;
pub mod scalar;
pub mod commitment;
pub mod rangeproof;
pub mod opening;
pub mod keys;
pub mod signature;

pub use crate::context::ProofContext;
pub use crate::tools::{ChallengeHash, DigestHash, Sha256Hash, TranscriptHash};

pub use crate::commitment::{create_commitment, BlindingFactor, Commitment};
pub use crate::rangeproof::{create_range_proof, verify_range_proof, RangeProof};
pub use crate::opening::{sign_opening, verify_opening, OpeningSignature};

pub use crate::keys::*;
pub use crate::signature::{
    aggregate_schnorr,
    sign_schnorr,
    verify_schnorr,
    Signature,
    SIGNATURE_LENGTH,
};
