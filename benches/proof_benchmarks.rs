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

#[macro_use]
extern crate criterion;

mod range_benches {
    use confidential::*;
    use criterion::{BenchmarkId, Criterion};
    use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
    use rand::rngs::OsRng;

    static BIT_WIDTHS: [usize; 4] = [8, 16, 32, 64];

    fn generator_h(ctx: &ProofContext) -> RistrettoPoint {
        ctx.mul_base(&Scalar::from(123456u64))
    }

    fn prove(c: &mut Criterion) {
        let ctx = ProofContext::sha256();
        let h = generator_h(&ctx);
        let mut group = c.benchmark_group("Range proof creation");

        for bits in BIT_WIDTHS.iter() {
            let value = u64::MAX >> (64 - bits);
            group.bench_with_input(BenchmarkId::from_parameter(bits), bits, |b, &bits| {
                b.iter(|| RangeProof::prove(&ctx, &h, value, bits, &mut OsRng))
            });
        }
        group.finish();
    }

    fn verify(c: &mut Criterion) {
        let ctx = ProofContext::sha256();
        let h = generator_h(&ctx);
        let mut group = c.benchmark_group("Range proof verification");

        for bits in BIT_WIDTHS.iter() {
            let value = u64::MAX >> (64 - bits);
            let (proof, commitment, _) =
                RangeProof::prove(&ctx, &h, value, *bits, &mut OsRng).unwrap();
            group.bench_with_input(BenchmarkId::from_parameter(bits), bits, |b, _| {
                b.iter(|| proof.verify(&ctx, &h, &commitment))
            });
        }
        group.finish();
    }

    criterion_group! {
        name = range_benches;
        config = Criterion::default().sample_size(20);
        targets =
            prove,
            verify,
    }
}

mod signature_benches {
    use confidential::*;
    use criterion::Criterion;
    use curve25519_dalek::scalar::Scalar;
    use rand::rngs::OsRng;

    fn opening(c: &mut Criterion) {
        let ctx = ProofContext::sha256();
        let h = ctx.mul_base(&Scalar::from(123456u64));
        let (_, commitment, blinding) = RangeProof::prove(&ctx, &h, 10, 5, &mut OsRng).unwrap();
        let value = Scalar::from(10u64);
        let message = ctx.message_digest(b"yummy");

        c.bench_function("Opening signing", |b| {
            b.iter(|| {
                let rng = &mut OsRng;
                OpeningSignature::sign(&ctx, &blinding, &value, &message, &h, &commitment, rng)
            })
        });

        let sig =
            OpeningSignature::sign(&ctx, &blinding, &value, &message, &h, &commitment, &mut OsRng)
                .unwrap();
        c.bench_function("Opening verification", |b| b.iter(|| sig.verify(&ctx, &h, &commitment)));
    }

    fn schnorr(c: &mut Criterion) {
        let ctx = ProofContext::sha256();
        let keypair: Keypair = Keypair::generate(&ctx, &mut OsRng).unwrap();
        let message = ctx.message_digest(b"yummy");

        c.bench_function("Schnorr signing", |b| {
            b.iter(|| Signature::sign(&ctx, &keypair.secret, &keypair.public, &message, &mut OsRng))
        });

        let sig =
            Signature::sign(&ctx, &keypair.secret, &keypair.public, &message, &mut OsRng).unwrap();
        c.bench_function("Schnorr signature verification", |b| {
            b.iter(|| sig.verify(&ctx, &keypair.public, &message))
        });
    }

    criterion_group! {
        name = signature_benches;
        config = Criterion::default();
        targets =
            opening,
            schnorr,
    }
}

criterion_main!(range_benches::range_benches, signature_benches::signature_benches);
