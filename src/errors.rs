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

//! Errors which may occur when building or checking commitments, range proofs
//! and signatures, or when parsing them from bytes.

use thiserror::Error;

/// Represents an error in proof construction, verification or decoding.
///
/// Verification failures are ordinary values and always name the check
/// that failed.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ProofError {
    /// The value does not fit in the requested bit width.
    #[error("Value {value} does not fit in {bits} bits")]
    RangeExceeded {
        /// The value that was asked to be proven
        value: u64,
        /// The requested bit width
        bits: usize,
    },

    /// The bit width is zero or wider than a `u64`.
    #[error("Bit width {0} is outside 1..=64")]
    InvalidBitWidth(usize),

    /// The entropy source failed to produce randomness.
    #[error("Entropy source failure: {0}")]
    RandomnessError(String),

    /// The recomputed joint challenge differs from the one in the proof.
    #[error("Range proof challenge e0 does not match")]
    ChallengeMismatch,

    /// The per-bit commitments do not sum to the claimed commitment.
    #[error("Commitment is not the sum of the per-bit commitments")]
    CommitmentMismatch,

    /// The proof vectors disagree with its bit width.
    #[error("Range proof over {bits} bits has {commitments} commitments, {responses} responses")]
    MalformedProof {
        /// Declared bit width
        bits: usize,
        /// Number of per-bit commitments
        commitments: usize,
        /// Number of per-bit responses
        responses: usize,
    },

    /// The verification equation of a signature wasn't satisfied.
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// Invalid point provided.
    #[error("Cannot decompress Ristretto point")]
    PointDecompressionError,

    /// Invalid scalar provided.
    #[error("Cannot use non-canonical scalar")]
    ScalarFormatError,

    /// An input had the wrong length.
    #[error("{name} must be {length} bytes in length")]
    BytesLengthError {
        /// Identifies the type returning the error
        name: &'static str,
        /// The expected length of the data
        length: usize,
    },
}

/// Convert `ProofError` into `::serde::de::Error` aka `SerdeError`
///
/// We should do this with `From` but right now the orphan rules prohibit
/// `impl From<ProofError> for E where E: ::serde::de::Error`.
pub(crate) fn serde_error_from_proof_error<E>(err: ProofError) -> E
where
    E: ::serde::de::Error,
{
    match err {
        ProofError::PointDecompressionError => E::custom("Ristretto point decompression failed"),
        ProofError::ScalarFormatError => E::custom("improper scalar is not canonical"),
        ProofError::BytesLengthError { name, length } => {
            E::custom(format_args!("{} must be {} bytes", name, length))
        }
        other => E::custom(other),
    }
}

impl From<rand::Error> for ProofError {
    fn from(err: rand::Error) -> ProofError {
        ProofError::RandomnessError(err.to_string())
    }
}
