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

//! Serde Support
//!
//! Fixed size types serialize as a byte string through their
//! `to_bytes`/`from_bytes` pair and name themselves with `DESCRIPTION`.

macro_rules! serde_boilerplate { ($t:ty) => {
    impl ::serde::Serialize for $t {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: ::serde::Serializer,
        {
            serializer.serialize_bytes(&self.to_bytes()[..])
        }
    }

    impl<'d> ::serde::Deserialize<'d> for $t {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: ::serde::Deserializer<'d>,
        {
            struct MyVisitor;

            impl<'d> ::serde::de::Visitor<'d> for MyVisitor {
                type Value = $t;

                fn expecting(
                    &self,
                    formatter: &mut ::core::fmt::Formatter<'_>,
                ) -> ::core::fmt::Result {
                    formatter.write_str(<$t>::DESCRIPTION)
                }

                fn visit_bytes<E>(self, bytes: &[u8]) -> Result<$t, E> where E: ::serde::de::Error {
                    <$t>::from_bytes(bytes).map_err(crate::errors::serde_error_from_proof_error)
                }
            }
            deserializer.deserialize_bytes(MyVisitor)
        }
    }
} } // macro_rules! serde_boilerplate

#[cfg(test)]
mod test {
    use bincode::{deserialize, serialize};
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use crate::*;
    use curve25519_dalek::scalar::Scalar;

    #[test]
    fn serialize_deserialize_signature() {
        let ctx = ProofContext::sha256();
        let mut csprng = ChaChaRng::from_seed([0u8; 32]);
        let keypair = Keypair::generate(&ctx, &mut csprng).unwrap();
        let message = ctx.message_digest(b"All I want is to pet all of the dogs.");
        let signature =
            Signature::sign(&ctx, &keypair.secret, &keypair.public, &message, &mut csprng).unwrap();

        let encoded_signature: Vec<u8> = serialize(&signature).unwrap();
        let decoded_signature: Signature = deserialize(&encoded_signature).unwrap();

        assert_eq!(signature, decoded_signature);
    }

    #[test]
    fn serialize_deserialize_public_key() {
        let ctx = ProofContext::sha256();
        let public_key = PublicKey::from_point(ctx.mul_base(&Scalar::from(42u64)));
        let encoded_public_key: Vec<u8> = serialize(&public_key).unwrap();
        let decoded_public_key: PublicKey = deserialize(&encoded_public_key).unwrap();

        assert_eq!(public_key, decoded_public_key);
    }

    #[test]
    fn serialize_deserialize_range_proof() {
        let ctx = ProofContext::sha256();
        let h = ctx.mul_base(&Scalar::from(123456u64));
        let mut csprng = ChaChaRng::from_seed([7u8; 32]);
        let (proof, commitment, _) = RangeProof::prove(&ctx, &h, 10, 5, &mut csprng).unwrap();

        let decoded_proof: RangeProof = deserialize(&serialize(&proof).unwrap()).unwrap();
        let decoded_commitment: Commitment = deserialize(&serialize(&commitment).unwrap()).unwrap();

        assert_eq!(proof, decoded_proof);
        assert!(decoded_proof.verify(&ctx, &h, &decoded_commitment).is_ok());
    }

    #[test]
    fn serialize_deserialize_opening_signature() {
        let ctx = ProofContext::sha256();
        let h = ctx.mul_base(&Scalar::from(123456u64));
        let mut csprng = ChaChaRng::from_seed([8u8; 32]);
        let (_, commitment, blinding) = RangeProof::prove(&ctx, &h, 10, 5, &mut csprng).unwrap();
        let message = ctx.message_digest(b"12345");
        let value = Scalar::from(10u64);
        let sig =
            OpeningSignature::sign(&ctx, &blinding, &value, &message, &h, &commitment, &mut csprng)
                .unwrap();

        let decoded: OpeningSignature = deserialize(&serialize(&sig).unwrap()).unwrap();
        assert_eq!(sig, decoded);
        assert!(decoded.verify(&ctx, &h, &commitment).is_ok());
    }

    #[test]
    fn reject_bad_point_bytes() {
        let encoded: Vec<u8> = serialize(&[0xffu8; 32].to_vec()).unwrap();
        assert!(deserialize::<PublicKey>(&encoded).is_err());
    }
}
