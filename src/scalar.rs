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

//! Scalar helpers on top of the dalek field arithmetic.
//!
//! `Scalar` addition, multiplication, negation and inversion always return
//! the canonical residue mod ℓ, so nothing here reduces by hand.

use crate::errors::ProofError;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Widest range a proof can cover, the width of a `u64` value.
pub const MAX_BIT_WIDTH: usize = 64;

/// `2^i mod ℓ`
pub fn pow2(i: usize) -> Scalar {
    if i < 128 {
        return Scalar::from(1u128 << i);
    }
    (0..i).fold(Scalar::ONE, |acc, _| acc + acc)
}

/// Sample a scalar uniformly from `[0, ℓ)`.
///
/// Draws 512 bits with `try_fill_bytes` and reduces them, so the bias is
/// negligible. A failing entropy source is reported, never papered over.
pub fn random_scalar<R>(rng: &mut R) -> Result<Scalar, ProofError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut wide = [0u8; 64];
    let filled = rng.try_fill_bytes(&mut wide);
    let scalar = Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    filled?;
    Ok(scalar)
}

/// Little-endian bits of `value`, zero padded to `width`.
pub(crate) fn decompose(value: u64, width: usize) -> Result<Vec<bool>, ProofError> {
    if width == 0 || width > MAX_BIT_WIDTH {
        return Err(ProofError::InvalidBitWidth(width));
    }
    if width < MAX_BIT_WIDTH && value >> width != 0 {
        return Err(ProofError::RangeExceeded { value, bits: width });
    }
    Ok((0..width).map(|i| (value >> i) & 1 == 1).collect())
}

/// Parse a canonical scalar.
pub(crate) fn scalar_from_bytes(bytes: [u8; 32]) -> Result<Scalar, ProofError> {
    Option::from(Scalar::from_canonical_bytes(bytes)).ok_or(ProofError::ScalarFormatError)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use rand::thread_rng;

    /// An entropy source that is always empty.
    pub(crate) struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.iter_mut().for_each(|b| *b = 0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn pow2_matches_repeated_doubling() {
        for i in [0usize, 1, 5, 63, 64, 127, 128, 200, 252] {
            let slow = (0..i).fold(Scalar::ONE, |acc, _| acc + acc);
            assert_eq!(pow2(i), slow, "2^{}", i);
        }
        assert_eq!(pow2(10), Scalar::from(1024u64));
    }

    #[test]
    fn negation_is_canonical() {
        let mut csprng = thread_rng();
        for _ in 0..16 {
            let x = random_scalar(&mut csprng).unwrap();
            let neg = -x;
            assert_eq!(neg + x, Scalar::ZERO);
            assert!(bool::from(Scalar::from_canonical_bytes(neg.to_bytes()).is_some()));
        }
        assert_eq!(-Scalar::ZERO, Scalar::ZERO);
    }

    #[test]
    fn inverse_round_trips() {
        let x = random_scalar(&mut thread_rng()).unwrap();
        assert_eq!(x * x.invert(), Scalar::ONE);
    }

    #[test]
    fn failing_entropy_is_reported() {
        match random_scalar(&mut FailingRng) {
            Err(ProofError::RandomnessError(_)) => {}
            other => panic!("expected RandomnessError, got {:?}", other),
        }
    }

    #[test]
    fn decompose_pads_lsb_first() {
        assert_eq!(
            decompose(10, 5).unwrap(),
            vec![false, true, false, true, false]
        );
        assert_eq!(decompose(u64::MAX, 64).unwrap(), vec![true; 64]);
        assert_eq!(decompose(0, 3).unwrap(), vec![false; 3]);
    }

    #[test]
    fn decompose_rejects_out_of_range() {
        assert_eq!(
            decompose(128, 5),
            Err(ProofError::RangeExceeded { value: 128, bits: 5 })
        );
        assert_eq!(
            decompose(32, 5),
            Err(ProofError::RangeExceeded { value: 32, bits: 5 })
        );
        assert!(decompose(31, 5).is_ok());
        assert_eq!(decompose(1, 0), Err(ProofError::InvalidBitWidth(0)));
        assert_eq!(decompose(1, 65), Err(ProofError::InvalidBitWidth(65)));
    }

    #[test]
    fn non_canonical_scalar_is_rejected() {
        assert_eq!(scalar_from_bytes([0xff; 32]), Err(ProofError::ScalarFormatError));
        assert_eq!(scalar_from_bytes(Scalar::ONE.to_bytes()), Ok(Scalar::ONE));
    }
}
