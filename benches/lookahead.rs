use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lookahead::{LookaheadReader, PeekRead};
use std::hint::black_box;
use std::io::{BufRead, BufReader, Read};

const SIZE: usize = 1 << 20;

fn make_data() -> Vec<u8> {
    (0..=255u8).cycle().take(SIZE).collect()
}

fn bench_read_byte(c: &mut Criterion) {
    let data = make_data();
    let mut group = c.benchmark_group("read_byte");
    group.throughput(Throughput::Bytes(SIZE as u64));

    group.bench_function("std-bufreader", |b| {
        b.iter(|| {
            let mut reader = BufReader::new(data.as_slice());
            let mut sum = 0u64;
            loop {
                let buf = reader.fill_buf().unwrap();
                let Some(&byte) = buf.first() else { break };
                sum += u64::from(byte);
                reader.consume(1);
            }
            black_box(sum)
        })
    });

    group.bench_function("lookahead", |b| {
        b.iter(|| {
            let mut reader = LookaheadReader::new(data.as_slice());
            let mut sum = 0u64;
            while let Ok(byte) = reader.read_byte() {
                sum += u64::from(byte);
            }
            black_box(sum)
        })
    });
    group.finish();
}

fn bench_peek_then_read(c: &mut Criterion) {
    let data = make_data();
    let mut group = c.benchmark_group("peek-then-read");
    group.throughput(Throughput::Bytes(SIZE as u64));

    for peek in [4, 512, 64 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(peek), &peek, |b, &peek| {
            b.iter(|| {
                let mut reader = LookaheadReader::new(data.as_slice());
                black_box(reader.peek(peek).unwrap());
                let mut out = Vec::with_capacity(SIZE);
                reader.read_to_end(&mut out).unwrap();
                black_box(out)
            })
        });
    }
    group.finish();
}

fn bench_growing_peek(c: &mut Criterion) {
    let data = make_data();
    let mut group = c.benchmark_group("growing-peek");

    for fill_size in [1, 4096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(fill_size),
            &fill_size,
            |b, &fill_size| {
                b.iter(|| {
                    let mut reader = LookaheadReader::builder(data.as_slice())
                        .fill_size(fill_size)
                        .build();
                    for size in 1..=4096 {
                        black_box(reader.peek(size).unwrap());
                    }
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_read_byte,
    bench_peek_then_read,
    bench_growing_peek
);
criterion_main!(benches);
