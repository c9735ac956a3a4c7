use criterion::{Criterion, criterion_group, criterion_main};
use pcc_driver::{ContainmentOracle, RayCastOracle, TranscodeConfig, Transcoder};
use pcc_tests::golden;

fn bench_ray_cast(c: &mut Criterion) {
    let shape = Transcoder::new(TranscodeConfig::default())
        .load_boundary(&golden("cube.ply")[..])
        .unwrap();

    c.bench_function("ray_cast_inside", |b| {
        b.iter(|| RayCastOracle.contains(&shape, std::hint::black_box([0.4, 0.6, 0.5])));
    });
    c.bench_function("ray_cast_outside_bounds", |b| {
        b.iter(|| RayCastOracle.contains(&shape, std::hint::black_box([2.0, 0.5, 0.5])));
    });
}

criterion_group!(benches, bench_ray_cast);
criterion_main!(benches);
