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

//! The Extra Sauce
//!
//! Fiat-Shamir hashing of ordered byte sequences into scalars. The protocols
//! only ever see the `ChallengeHash` trait, so the primitive underneath can
//! be swapped without touching any of them.

use core::fmt::Debug;
use core::marker::PhantomData;
use curve25519_dalek::digest::Digest;
use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;
use sha2::Sha256;

/// A random oracle from an ordered list of byte strings to a scalar mod ℓ.
pub trait ChallengeHash {
    /// Hash the concatenation of `chunks`, in order, into a scalar.
    ///
    /// `label` names the challenge being drawn. Implementations that keep a
    /// transcript bind it in as a domain separator.
    fn hash_to_scalar(&self, label: &'static [u8], chunks: &[&[u8]]) -> Scalar;
}

/// Challenge hash over any RustCrypto `Digest`.
///
/// The digest is read as a little-endian integer and reduced mod ℓ. Output
/// wider than 512 bits is truncated to its first 64 bytes. Labels are not
/// hashed: the challenge is the plain digest of the concatenated chunks.
pub struct DigestHash<D>(PhantomData<D>);

/// The default challenge hash.
pub type Sha256Hash = DigestHash<Sha256>;

impl<D> DigestHash<D> {
    /// Create a challenge hash for the digest `D`.
    pub fn new() -> Self {
        DigestHash(PhantomData)
    }
}

impl<D> Default for DigestHash<D> {
    fn default() -> Self {
        DigestHash::new()
    }
}

impl<D> Clone for DigestHash<D> {
    fn clone(&self) -> Self {
        DigestHash::new()
    }
}

impl<D> Copy for DigestHash<D> {}

impl<D> Debug for DigestHash<D> {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "DigestHash( {} )", core::any::type_name::<D>())
    }
}

impl<D: Digest> ChallengeHash for DigestHash<D> {
    fn hash_to_scalar(&self, _label: &'static [u8], chunks: &[&[u8]]) -> Scalar {
        let mut hasher = D::new();
        for chunk in chunks {
            hasher.update(chunk);
        }
        let digest = hasher.finalize();

        let mut wide = [0u8; 64];
        let len = digest.len().min(64);
        wide[..len].copy_from_slice(&digest[..len]);
        Scalar::from_bytes_mod_order_wide(&wide)
    }
}

/// Challenge hash backed by a Merlin transcript.
///
/// Initialize from a static byte string that identifies the role of the
/// challenges in the larger protocol. Every challenge appends its own label
/// first, then each chunk as a framed message, so both the kind of challenge
/// and the chunk boundaries are bound in.
#[derive(Clone)]
pub struct TranscriptHash(Transcript);

impl TranscriptHash {
    /// Initialize a transcript hash with a domain separation label.
    pub fn new(label: &'static [u8]) -> TranscriptHash {
        TranscriptHash(Transcript::new(label))
    }
}

impl ChallengeHash for TranscriptHash {
    fn hash_to_scalar(&self, label: &'static [u8], chunks: &[&[u8]]) -> Scalar {
        let mut t = self.0.clone();
        t.append_message(b"dom-sep", label);
        t.append_u64(b"n", chunks.len() as u64);
        for chunk in chunks {
            t.append_message(b"chunk", chunk);
        }
        let mut buf = [0u8; 64];
        t.challenge_bytes(b"e", &mut buf);
        Scalar::from_bytes_mod_order_wide(&buf)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sha2::Sha512;

    #[test]
    fn digest_hash_is_order_sensitive() {
        let h = Sha256Hash::new();
        let a = h.hash_to_scalar(b"test", &[b"alpha", b"beta"]);
        let b = h.hash_to_scalar(b"test", &[b"beta", b"alpha"]);
        assert_ne!(a, b);
        assert_eq!(a, h.hash_to_scalar(b"test", &[b"alpha", b"beta"]));
    }

    #[test]
    fn digest_hash_concatenates() {
        // Plain concatenation: chunk boundaries are not framed.
        let h = Sha256Hash::new();
        assert_eq!(
            h.hash_to_scalar(b"test", &[b"ab", b"c"]),
            h.hash_to_scalar(b"test", &[b"abc"])
        );
    }

    #[test]
    fn digest_hash_matches_raw_sha256() {
        // SHA-256("abc")
        let raw = hex::decode("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
            .unwrap();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&raw);
        assert_eq!(&Sha256::digest(b"abc")[..], &bytes[..]);
        assert_eq!(
            Sha256Hash::new().hash_to_scalar(b"test", &[b"abc"]),
            Scalar::from_bytes_mod_order(bytes)
        );
    }

    #[test]
    fn wide_digest_reduces() {
        let h = DigestHash::<Sha512>::new();
        let raw = Sha512::digest(b"hello");
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&raw);
        assert_eq!(
            h.hash_to_scalar(b"test", &[b"hello"]),
            Scalar::from_bytes_mod_order_wide(&bytes)
        );
    }

    #[test]
    fn transcript_hash_separates_domains() {
        let a = TranscriptHash::new(b"domain a");
        let b = TranscriptHash::new(b"domain b");
        let m: &[&[u8]] = &[b"m"];
        assert_ne!(a.hash_to_scalar(b"test", m), b.hash_to_scalar(b"test", m));
        assert_eq!(a.hash_to_scalar(b"test", m), a.hash_to_scalar(b"test", m));
        assert_ne!(
            a.hash_to_scalar(b"test", &[b"ab", b"c"]),
            a.hash_to_scalar(b"test", &[b"abc"])
        );
    }

    #[test]
    fn transcript_hash_binds_label() {
        let t = TranscriptHash::new(b"confidential");
        let chunks: &[&[u8]] = &[b"same", b"input"];
        assert_ne!(t.hash_to_scalar(b"schnorr", chunks), t.hash_to_scalar(b"opening", chunks));
        assert_eq!(t.hash_to_scalar(b"schnorr", chunks), t.hash_to_scalar(b"schnorr", chunks));
    }

    #[test]
    fn digest_hash_ignores_label() {
        let h = Sha256Hash::new();
        let chunks: &[&[u8]] = &[b"same", b"input"];
        assert_eq!(h.hash_to_scalar(b"schnorr", chunks), h.hash_to_scalar(b"opening", chunks));
    }
}
