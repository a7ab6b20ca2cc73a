use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flatline::scan::{mem_cmp, mem_eq, pkcs7_unpad_ct, zeropad_data_len};

fn bench_mem_eq(c: &mut Criterion) {
    let mut group = c.benchmark_group("mem_eq");
    for size in [16usize, 64, 256, 4096] {
        let a = vec![0x42u8; size];
        let b = vec![0x42u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| mem_eq(black_box(&a), black_box(&b)));
        });
    }
    group.finish();
}

fn bench_mem_cmp(c: &mut Criterion) {
    let mut group = c.benchmark_group("mem_cmp");
    for size in [16usize, 64, 256, 4096] {
        let a = vec![0x42u8; size];
        let mut b = vec![0x42u8; size];
        b[size - 1] = 0x43;
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| mem_cmp(black_box(&a), black_box(&b)));
        });
    }
    group.finish();
}

fn bench_zeropad(c: &mut Criterion) {
    let mut group = c.benchmark_group("zeropad_data_len");
    for size in [16usize, 64, 256, 4096] {
        let mut buf = vec![0u8; size];
        buf[size / 2] = 1;
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| zeropad_data_len(black_box(&buf)));
        });
    }
    group.finish();
}

fn bench_pkcs7(c: &mut Criterion) {
    let mut buf = vec![0x41u8; 64];
    let pad = 4u8;
    let n = buf.len();
    for b in buf[n - pad as usize..].iter_mut() {
        *b = pad;
    }
    c.bench_function("pkcs7_unpad_ct/64", |bencher| {
        bencher.iter(|| pkcs7_unpad_ct(black_box(&buf), black_box(16)));
    });
}

criterion_group!(benches, bench_mem_eq, bench_mem_cmp, bench_zeropad, bench_pkcs7);
criterion_main!(benches);
