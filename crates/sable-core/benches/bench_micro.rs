use criterion::{criterion_group, criterion_main, Criterion};
use sable_core::rng::SecretRng;
use sable_core::types::*;
use sable_core::{curve, hash};

fn bench_keygen(c: &mut Criterion) {
    sable_core::init().unwrap();
    let mut rng = SecretRng::from_seed(b"bench-keygen");
    c.bench_function("curve/keygen", |b| {
        b.iter(|| {
            let scalar = curve::random_scalar(&mut rng).unwrap();
            curve::base_mul(&scalar).unwrap()
        })
    });
}

fn bench_double_mul(c: &mut Criterion) {
    sable_core::init().unwrap();
    let mut rng = SecretRng::from_seed(b"bench-double");
    let a = curve::random_scalar(&mut rng).unwrap();
    let b_scalar = curve::random_scalar(&mut rng).unwrap();
    let p = curve::base_mul(&curve::random_scalar(&mut rng).unwrap()).unwrap();
    let q = curve::base_mul(&curve::random_scalar(&mut rng).unwrap()).unwrap();

    c.bench_function("curve/double_mul", |b| {
        b.iter(|| curve::double_mul(&a, &p, &b_scalar, &q).unwrap())
    });
}

fn bench_elligator(c: &mut Criterion) {
    sable_core::init().unwrap();
    let seed = [0x5Au8; MASK_SEED_LENGTH];
    c.bench_function("curve/elligator", |b| {
        b.iter(|| curve::elligator(&seed).unwrap())
    });
}

fn bench_rng_fill(c: &mut Criterion) {
    sable_core::init().unwrap();
    let mut rng = SecretRng::from_seed(b"bench-rng");
    let mut out = [0u8; 64];
    c.bench_function("rng/fill_64", |b| {
        b.iter(|| rng.fill(&mut out).unwrap())
    });
}

fn bench_transcript_digest(c: &mut Criterion) {
    sable_core::init().unwrap();
    let part = [0x42u8; POINT_LENGTH];
    c.bench_function("hash/transcript_digest64", |b| {
        b.iter(|| hash::digest64(&[&part, &part, &part, &part, &part]))
    });
}

criterion_group!(
    benches,
    bench_keygen,
    bench_double_mul,
    bench_elligator,
    bench_rng_fill,
    bench_transcript_digest
);
criterion_main!(benches);
