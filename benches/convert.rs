//! Encode/decode throughput benchmarks

use audio64::{Decoder, Encoder, MimeType, SourceFile};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn source_1mib() -> SourceFile {
    SourceFile::from_bytes(
        "bench.wav",
        MimeType::parse("audio/wav"),
        vec![0x5Au8; 1024 * 1024],
    )
}

fn bench_encode(c: &mut Criterion) {
    let source = source_1mib();
    let encoder = Encoder::new();

    c.bench_function("encode_1mib", |b| {
        b.iter(|| encoder.encode(black_box(&source)).unwrap())
    });
}

fn bench_decode(c: &mut Criterion) {
    let uri = Encoder::new().encode(&source_1mib()).unwrap().into_string();

    c.bench_function("decode_1mib", |b| {
        b.iter(|| {
            let mut decoder = Decoder::new();
            decoder.decode(black_box(&uri)).unwrap().len()
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    let uri = Encoder::new().encode(&source_1mib()).unwrap().into_string();

    c.bench_function("validate_1mib", |b| {
        b.iter(|| Decoder::inspect(black_box(&uri)).unwrap().decoded_bytes)
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_validate);
criterion_main!(benches);
