//! Replacement policy throughput on a synthetic trace.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vmsim::{Access, Algorithm, Mmu, PageId};

/// Mostly-local references with occasional far jumps.
fn synthetic_trace(len: usize) -> Vec<Access> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut page = 0u64;
    (0..len)
        .map(|_| {
            page = if rng.gen_bool(0.9) {
                page.wrapping_add(rng.gen_range(0..4))
            } else {
                rng.gen_range(0..4096)
            };
            if rng.gen_bool(0.3) {
                Access::write(PageId::new(page))
            } else {
                Access::read(PageId::new(page))
            }
        })
        .collect()
}

fn bench_replacers(c: &mut Criterion) {
    let trace = synthetic_trace(100_000);
    let mut group = c.benchmark_group("replay");

    for alg in Algorithm::ALL {
        for frames in [16usize, 128] {
            group.bench_with_input(
                BenchmarkId::new(alg.as_str(), frames),
                &frames,
                |b, &frames| {
                    b.iter(|| {
                        let mut mmu = Mmu::with_seed(alg, frames, 1).unwrap();
                        for &access in &trace {
                            mmu.access(access);
                        }
                        black_box(mmu.get_total_page_faults())
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_replacers);
criterion_main!(benches);
