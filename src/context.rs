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

//! Proof Context
//!
//! The fixed parameters every protocol in this crate runs under: the base
//! point `G` and the hash-to-scalar function. A context is built once and
//! only ever borrowed afterwards.

use crate::tools::{ChallengeHash, Sha256Hash};
use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::RistrettoPoint;
use curve25519_dalek::scalar::Scalar;

/// Curve parameters and Fiat-Shamir hash shared by all protocols.
#[derive(Clone, Debug)]
pub struct ProofContext<C = Sha256Hash> {
    basepoint: RistrettoPoint,
    hasher: C,
}

impl ProofContext<Sha256Hash> {
    /// Ristretto base point with SHA-256 challenges.
    pub fn sha256() -> Self {
        ProofContext {
            basepoint: RISTRETTO_BASEPOINT_POINT,
            hasher: Sha256Hash::new(),
        }
    }
}

impl Default for ProofContext<Sha256Hash> {
    fn default() -> Self {
        ProofContext::sha256()
    }
}

impl<C: ChallengeHash> ProofContext<C> {
    /// Build a context from an explicit base point and challenge hash.
    pub fn new(basepoint: RistrettoPoint, hasher: C) -> Self {
        ProofContext { basepoint, hasher }
    }

    /// Ristretto base point with a custom challenge hash.
    pub fn with_hasher(hasher: C) -> Self {
        ProofContext::new(RISTRETTO_BASEPOINT_POINT, hasher)
    }

    /// The base point `G`.
    pub fn basepoint(&self) -> &RistrettoPoint {
        &self.basepoint
    }

    /// `s·G`
    pub fn mul_base(&self, s: &Scalar) -> RistrettoPoint {
        s * self.basepoint
    }

    /// Hash an ordered list of byte strings into the challenge named `label`.
    pub fn hash_to_scalar(&self, label: &'static [u8], chunks: &[&[u8]]) -> Scalar {
        self.hasher.hash_to_scalar(label, chunks)
    }

    /// Hash the canonical encodings of `points`, in order, into the
    /// challenge named `label`.
    pub fn hash_points(&self, label: &'static [u8], points: &[RistrettoPoint]) -> Scalar {
        let encoded: Vec<[u8; 32]> = points.iter().map(|p| p.compress().to_bytes()).collect();
        let chunks: Vec<&[u8]> = encoded.iter().map(|e| &e[..]).collect();
        self.hash_to_scalar(label, &chunks)
    }

    /// Reduce an arbitrary message to the scalar digest that signatures bind to.
    pub fn message_digest(&self, message: &[u8]) -> Scalar {
        self.hash_to_scalar(b"message", &[message])
    }
}
