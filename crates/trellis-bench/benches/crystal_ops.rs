//! Criterion micro-benchmarks for crystal position lookup.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use trellis_crystal::{CrystalBlock, CrystalKind};

/// Benchmark: resolve every site of a 10³-cell diamond block one by one.
fn bench_lattice_crystal_site_8k(c: &mut Criterion) {
    let crystal = CrystalKind::Diamond.build(3.57, None).unwrap();

    c.bench_function("lattice_crystal_site_8k", |b| {
        b.iter(|| {
            for i in 0..10 {
                for j in 0..10 {
                    for k in 0..10 {
                        for s in 0..8 {
                            black_box(crystal.site(&[i, j, k, s]).unwrap());
                        }
                    }
                }
            }
        });
    });
}

/// Benchmark: rescale an FCC block and rebuild its 4000 cached positions.
fn bench_block_rescale_rebuild(c: &mut Criterion) {
    let crystal = CrystalKind::Fcc.build(1.0, None).unwrap();
    let mut block = CrystalBlock::new(crystal, &[10, 10, 10]).unwrap();

    c.bench_function("block_rescale_rebuild", |b| {
        b.iter(|| {
            block.update_primitive(|p| p.scale(black_box(1.0))).unwrap();
            black_box(block.positions().unwrap().site_count());
        });
    });
}

criterion_group!(
    benches,
    bench_lattice_crystal_site_8k,
    bench_block_rescale_rebuild
);
criterion_main!(benches);
