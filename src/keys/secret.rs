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

//! Schnorr Secret Key generation

use crate::errors::ProofError;
use crate::scalar::{random_scalar, scalar_from_bytes};
use core::fmt::Debug;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// The length of a Ristretto Schnorr `SecretKey`, in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// An Schnorr secret key.
///
/// Never serialized. Export goes through `to_bytes` explicitly.
#[derive(Default, Clone)]
pub struct SecretKey(pub(crate) Scalar);

impl Debug for SecretKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "SecretKey( .. )")
    }
}

impl Eq for SecretKey {}
impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}
impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Overwrite secret key material with null bytes when it goes out of scope.
impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    /// Convert this secret key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Construct a `SecretKey` from a slice of bytes.
    ///
    /// The bytes must be the canonical encoding of a scalar mod ℓ.
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is an Schnorr `SecretKey` or whose error value
    /// is an `ProofError` describing the error that occurred.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, ProofError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(ProofError::BytesLengthError {
                name: "SecretKey",
                length: SECRET_KEY_LENGTH,
            });
        }

        let mut bits: [u8; 32] = [0u8; 32];
        bits.copy_from_slice(&bytes[..32]);
        let parsed = scalar_from_bytes(bits);
        bits.zeroize();

        Ok(SecretKey(parsed?))
    }

    /// Generate a `SecretKey` from a `csprng`.
    ///
    /// # Input
    ///
    /// A CSPRNG with a `try_fill_bytes()` method, e.g. `rand::rngs::OsRng`.
    pub fn generate<T>(csprng: &mut T) -> Result<SecretKey, ProofError>
    where
        T: CryptoRng + RngCore,
    {
        Ok(SecretKey(random_scalar(csprng)?))
    }

    /// View this scalar as a byte array.
    #[inline]
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }

    ///Helper Method to Convert Scalar to Key
    pub fn from_scalar(s: Scalar) -> SecretKey {
        SecretKey(s)
    }
}
