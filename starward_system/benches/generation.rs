use criterion::{Criterion, black_box, criterion_group, criterion_main};
use starward_system::{FixedClock, SystemGenerator};

fn bench_generate_for_hex(c: &mut Criterion) {
    let mut generator = SystemGenerator::with_seed("bench").with_clock(FixedClock(0));
    c.bench_function("generate_for_hex G2", |b| {
        b.iter(|| generator.generate_for_hex(black_box("0101"), black_box("G2"), None))
    });

    let mut hex = 0u32;
    c.bench_function("generate_for_hex sweep", |b| {
        b.iter(|| {
            hex = (hex + 1) % 3200;
            generator.generate_for_hex(&format!("{hex:04}"), "M4", None)
        })
    });
}

criterion_group!(benches, bench_generate_for_hex);
criterion_main!(benches);
