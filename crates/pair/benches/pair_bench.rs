use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pair::Pair;

/// Total payload sizes (key + value) for the encode benchmarks.
const NEW_SIZES: [usize; 8] = [2, 6, 14, 62, 126, 256, 1024, 0xFFFF];

/// Total payload sizes for the read benchmarks.
const GET_SIZES: [usize; 2] = [62, 1024];

const N_PAIRS: usize = 10_000;

fn new_benchmark(c: &mut Criterion) {
    for total in NEW_SIZES {
        let half = vec![b'*'; total / 2];
        c.bench_function(&format!("pair_new_{}", total), |b| {
            // Pairs never free themselves, so each one is released inside
            // the timed loop.
            b.iter(|| {
                let p = Pair::new(black_box(&half), black_box(&half)).unwrap();
                unsafe { p.release() };
            });
        });
    }
}

fn get_benchmark(c: &mut Criterion) {
    for total in GET_SIZES {
        let half = vec![b'*'; total / 2];
        let pairs: Vec<Pair> = (0..N_PAIRS)
            .map(|_| Pair::new(&half, &half).unwrap())
            .collect();

        c.bench_function(&format!("pair_get_{}_x10k", total), |b| {
            b.iter(|| {
                for p in &pairs {
                    black_box(p.key());
                    black_box(p.value());
                }
            });
        });

        for p in pairs {
            unsafe { p.release() };
        }
    }
}

criterion_group!(benches, new_benchmark, get_benchmark);
criterion_main!(benches);
