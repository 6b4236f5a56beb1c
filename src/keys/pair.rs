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

//! A Rust implementation of Schnorr key generation,

use crate::context::ProofContext;
use crate::errors::ProofError;
use crate::keys::{PublicKey, SecretKey};
use crate::tools::ChallengeHash;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// An Schnorr keypair.
///
/// Held in memory only; there is no byte or serde encoding.
#[derive(Debug, Default, Clone)]
pub struct Keypair {
    /// The secret half of this keypair.
    pub secret: SecretKey,
    /// The public half of this keypair.
    pub public: PublicKey,
}

impl ::zeroize::Zeroize for Keypair {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Keypair {
    /// Generate a Schnorr keypair.
    ///
    /// # Input
    ///
    /// The proof context fixing the base point, and a CSPRNG such as
    /// `rand::rngs::OsRng`.
    pub fn generate<C, R>(ctx: &ProofContext<C>, csprng: &mut R) -> Result<Keypair, ProofError>
    where
        C: ChallengeHash,
        R: CryptoRng + RngCore,
    {
        let sk: SecretKey = SecretKey::generate(csprng)?;
        let pk: PublicKey = PublicKey::from_secret(ctx, &sk);

        Ok(Keypair {
            public: pk,
            secret: sk,
        })
    }

    /// Derive the `PublicKey` corresponding to this `SecretKey`.
    pub fn from_secret<C: ChallengeHash>(ctx: &ProofContext<C>, s: &SecretKey) -> Keypair {
        Keypair {
            secret: s.clone(),
            public: PublicKey::from_secret(ctx, s),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keypair_zeroize_clears_secret() {
        let ctx = ProofContext::sha256();
        let mut keypair: Keypair = Keypair::generate(&ctx, &mut rand::thread_rng()).unwrap();
        let public = keypair.public;

        keypair.zeroize();

        assert!(keypair.secret.as_bytes().iter().all(|x| *x == 0u8));
        assert_eq!(keypair.public, public);
    }

    #[test]
    fn keypair_from_secret_matches_generated() {
        let ctx = ProofContext::sha256();
        let keypair = Keypair::generate(&ctx, &mut rand::thread_rng()).unwrap();
        let rebuilt = Keypair::from_secret(&ctx, &keypair.secret);

        assert_eq!(rebuilt.secret, keypair.secret);
        assert_eq!(rebuilt.public, keypair.public);
    }
}
