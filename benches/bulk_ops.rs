use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flatline::memory::mem8;
use flatline::simd;

fn bench_memxor(c: &mut Criterion) {
    let mut group = c.benchmark_group("memxor");
    for size in [64usize, 1024, 16384] {
        let src = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &size, |bencher, _| {
            let mut dst = vec![0x5Au8; size];
            bencher.iter(|| mem8::memxor(black_box(&mut dst), black_box(&src)));
        });

        group.bench_with_input(BenchmarkId::new("auto", size), &size, |bencher, _| {
            let mut dst = vec![0x5Au8; size];
            bencher.iter(|| simd::memxor_auto(black_box(&mut dst), black_box(&src)));
        });
    }
    group.finish();
}

fn bench_memcpy_when(c: &mut Criterion) {
    let mut group = c.benchmark_group("memcpy_when");
    for size in [64usize, 1024, 16384] {
        let src = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("scalar", size), &size, |bencher, _| {
            let mut dst = vec![0x5Au8; size];
            bencher.iter(|| mem8::memcpy_when(black_box(1), black_box(&mut dst), black_box(&src)));
        });

        group.bench_with_input(BenchmarkId::new("auto", size), &size, |bencher, _| {
            let mut dst = vec![0x5Au8; size];
            bencher.iter(|| {
                simd::memcpy_when_auto(black_box(1), black_box(&mut dst), black_box(&src))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_memxor, bench_memcpy_when);
criterion_main!(benches);
