//! Benchmarks for the 3D predicates on random and nearly degenerate inputs.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use geometry_predicates::{insphere as gp_insphere, orient3d as gp_orient3d};
use geompreds::{Coord3, insphere, insphere_fast, orient3d, orient3d_fast};
use std::hint::black_box;

const LCG_A: u64 = 6364136223846793005;
const LCG_C: u64 = 1;

type Orient3dCases = Vec<(Coord3, Coord3, Coord3, Coord3)>;
type InsphereCases = Vec<(Coord3, Coord3, Coord3, Coord3, Coord3)>;

fn point(state: &mut u64) -> Coord3 {
    Coord3::new(lcg(state), lcg(state), lcg(state))
}

fn generate_orient3d_cases(count: usize) -> Orient3dCases {
    let mut state = 0x1234_5678_9abc_def0u64;
    (0..count)
        .map(|_| {
            (
                point(&mut state),
                point(&mut state),
                point(&mut state),
                point(&mut state),
            )
        })
        .collect()
}

/// `d` is an affine combination of `a`, `b`, `c` rounded to floating point.
fn generate_coplanar_cases(count: usize) -> Orient3dCases {
    let mut state = 0x0fed_cba9_8765_4321u64;
    (0..count)
        .map(|_| {
            let a = point(&mut state);
            let b = point(&mut state);
            let c = point(&mut state);
            let s = lcg(&mut state) / 1000.0;
            let t = lcg(&mut state) / 1000.0;
            let d = Coord3::new(
                a.x + s * (b.x - a.x) + t * (c.x - a.x),
                a.y + s * (b.y - a.y) + t * (c.y - a.y),
                a.z + s * (b.z - a.z) + t * (c.z - a.z),
            );
            (a, b, c, d)
        })
        .collect()
}

fn generate_insphere_cases(count: usize) -> InsphereCases {
    let mut state = 0x5555_aaaa_5555_aaaau64;
    (0..count)
        .map(|_| {
            (
                point(&mut state),
                point(&mut state),
                point(&mut state),
                point(&mut state),
                point(&mut state),
            )
        })
        .collect()
}

/// Five points on the unit sphere; their coordinates round, so most cases
/// escalate.
fn generate_cospherical_cases(count: usize) -> InsphereCases {
    let mut state = 0xdead_beef_0bad_f00du64;
    let mut on_sphere = move || loop {
        let p = point(&mut state);
        let norm = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
        if norm > 1.0 {
            break Coord3::new(p.x / norm, p.y / norm, p.z / norm);
        }
    };
    (0..count)
        .map(|_| {
            (
                on_sphere(),
                on_sphere(),
                on_sphere(),
                on_sphere(),
                on_sphere(),
            )
        })
        .collect()
}

fn bench_orient3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("orient3d");
    let batch_size = BatchSize::SmallInput;

    let random_cases = generate_orient3d_cases(100);
    let coplanar_cases = generate_coplanar_cases(100);

    let make_setup = |cases: Orient3dCases| {
        let mut idx = 0usize;
        move || {
            let sample = cases[idx % cases.len()];
            idx = idx.wrapping_add(1);
            sample
        }
    };

    group.bench_function("fast_random", |bencher| {
        bencher.iter_batched(
            make_setup(random_cases.clone()),
            |(a, b, c, d)| black_box(orient3d_fast(&a, &b, &c, &d)),
            batch_size,
        )
    });

    group.bench_function("adaptive_random", |bencher| {
        bencher.iter_batched(
            make_setup(random_cases.clone()),
            |(a, b, c, d)| black_box(orient3d(&a, &b, &c, &d)),
            batch_size,
        )
    });

    group.bench_function("adaptive_coplanar", |bencher| {
        bencher.iter_batched(
            make_setup(coplanar_cases.clone()),
            |(a, b, c, d)| black_box(orient3d(&a, &b, &c, &d)),
            batch_size,
        )
    });

    group.bench_function("geometry_predicates_coplanar", |bencher| {
        bencher.iter_batched(
            make_setup(coplanar_cases.clone()),
            |(a, b, c, d)| {
                black_box(gp_orient3d(
                    [a.x, a.y, a.z],
                    [b.x, b.y, b.z],
                    [c.x, c.y, c.z],
                    [d.x, d.y, d.z],
                ))
            },
            batch_size,
        )
    });

    group.finish();
}

fn bench_insphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("insphere");
    let batch_size = BatchSize::SmallInput;

    let random_cases = generate_insphere_cases(100);
    let cospherical_cases = generate_cospherical_cases(100);

    let make_setup = |cases: InsphereCases| {
        let mut idx = 0usize;
        move || {
            let sample = cases[idx % cases.len()];
            idx = idx.wrapping_add(1);
            sample
        }
    };

    group.bench_function("fast_random", |bencher| {
        bencher.iter_batched(
            make_setup(random_cases.clone()),
            |(a, b, c, d, e)| black_box(insphere_fast(&a, &b, &c, &d, &e)),
            batch_size,
        )
    });

    group.bench_function("adaptive_random", |bencher| {
        bencher.iter_batched(
            make_setup(random_cases.clone()),
            |(a, b, c, d, e)| black_box(insphere(&a, &b, &c, &d, &e)),
            batch_size,
        )
    });

    group.bench_function("adaptive_cospherical", |bencher| {
        bencher.iter_batched(
            make_setup(cospherical_cases.clone()),
            |(a, b, c, d, e)| black_box(insphere(&a, &b, &c, &d, &e)),
            batch_size,
        )
    });

    group.bench_function("robust_cospherical", |bencher| {
        bencher.iter_batched(
            make_setup(cospherical_cases.clone()),
            |(a, b, c, d, e)| {
                let coord = |p: &Coord3| robust::Coord3D {
                    x: p.x,
                    y: p.y,
                    z: p.z,
                };
                black_box(robust::insphere(
                    coord(&a),
                    coord(&b),
                    coord(&c),
                    coord(&d),
                    coord(&e),
                ))
            },
            batch_size,
        )
    });

    group.bench_function("geometry_predicates_cospherical", |bencher| {
        bencher.iter_batched(
            make_setup(cospherical_cases.clone()),
            |(a, b, c, d, e)| {
                black_box(gp_insphere(
                    [a.x, a.y, a.z],
                    [b.x, b.y, b.z],
                    [c.x, c.y, c.z],
                    [d.x, d.y, d.z],
                    [e.x, e.y, e.z],
                ))
            },
            batch_size,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_orient3d, bench_insphere);
criterion_main!(benches);

fn lcg(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(LCG_A).wrapping_add(LCG_C);
    let val = ((*state >> 32) as f64) / (u32::MAX as f64);
    (val * 2000.0) - 1000.0
}
