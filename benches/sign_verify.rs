//! Sign/verify micro-benchmarks for the HMAC fast path

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jwtforge::{Algorithm, JwtBuilder, Verification};

fn builder() -> JwtBuilder {
    JwtBuilder::new()
        .with_issuer("https://issuer.example.com")
        .with_subject("user-1234")
        .with_audience(&["api.example.com"])
        .with_claim("admin", true)
}

fn bench_hs256_sign(c: &mut Criterion) {
    let algorithm = Algorithm::hs256("bench-secret");
    c.bench_function("hs256_sign", |b| {
        b.iter(|| builder().sign(black_box(&algorithm)).unwrap())
    });
}

fn bench_hs256_verify(c: &mut Criterion) {
    let algorithm = Algorithm::hs256("bench-secret");
    let token = builder().sign(&algorithm).unwrap();
    let verifier = Verification::with_algorithm(algorithm)
        .require_issuer("https://issuer.example.com")
        .require_audience("api.example.com")
        .build();

    c.bench_function("hs256_verify", |b| {
        b.iter(|| verifier.verify(black_box(&token)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let token = builder().sign(&Algorithm::hs256("bench-secret")).unwrap();
    c.bench_function("decode", |b| {
        b.iter(|| jwtforge::DecodedToken::decode(black_box(&token)).unwrap())
    });
}

criterion_group!(benches, bench_hs256_sign, bench_hs256_verify, bench_decode);
criterion_main!(benches);
