use bidivec::BidiVec;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::collections::VecDeque;
use std::hint::black_box;

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");

    for &size in &[100usize, 10_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("bidivec", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = BidiVec::new();
                for i in 0..n {
                    v.push_back(black_box(i));
                }
                black_box(v)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n {
                    v.push(black_box(i));
                }
                black_box(v)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_deque", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = VecDeque::new();
                for i in 0..n {
                    v.push_back(black_box(i));
                }
                black_box(v)
            });
        });
    }

    group.finish();
}

fn bench_push_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_front");

    for &size in &[100usize, 10_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("bidivec", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = BidiVec::new();
                for i in 0..n {
                    v.push_front(black_box(i));
                }
                black_box(v)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_deque", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = VecDeque::new();
                for i in 0..n {
                    v.push_front(black_box(i));
                }
                black_box(v)
            });
        });
    }

    group.finish();
}

fn bench_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_middle");

    for &size in &[100usize, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("bidivec", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = BidiVec::new();
                for i in 0..n {
                    v.insert(v.len() / 2, black_box(i));
                }
                black_box(v)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n {
                    v.insert(v.len() / 2, black_box(i));
                }
                black_box(v)
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_deque", size), &size, |b, &n| {
            b.iter(|| {
                let mut v = VecDeque::new();
                for i in 0..n {
                    v.insert(v.len() / 2, black_box(i));
                }
                black_box(v)
            });
        });
    }

    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");
    let size = 100_000usize;
    fastrand::seed(42);
    let indices: Vec<usize> = (0..size).map(|_| fastrand::usize(0..size)).collect();

    let mut bidi = BidiVec::new();
    let mut deque = VecDeque::new();
    for i in 0..size {
        if i % 2 == 0 {
            bidi.push_front(i);
            deque.push_front(i);
        } else {
            bidi.push_back(i);
            deque.push_back(i);
        }
    }

    group.throughput(Throughput::Elements(size as u64));
    group.bench_function("bidivec", |b| {
        b.iter(|| indices.iter().map(|&i| bidi[i]).sum::<usize>())
    });
    group.bench_function("vec_deque", |b| {
        b.iter(|| indices.iter().map(|&i| deque[i]).sum::<usize>())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_front,
    bench_insert_middle,
    bench_random_access
);
criterion_main!(benches);
