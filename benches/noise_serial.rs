use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use noise_bench::{
    CPU, GroupSize, NoiseDevice, NoiseParams,
    noise::{noise_serial, turbulence},
};

pub fn bench_turbulence(c: &mut Criterion) {
    c.bench_function("turbulence 8 octaves", |bench| {
        bench.iter(|| turbulence(black_box(3.7), black_box(-1.2), 0.6, 8))
    });
}

pub fn bench_noise_serial(c: &mut Criterion) {
    let params = NoiseParams::default();
    let mut out = vec![0.; params.len()];

    c.bench_function("noise serial 768x768", |bench| {
        bench.iter(|| noise_serial(black_box(&params), &mut out).unwrap())
    });
}

pub fn bench_cpu_launch(c: &mut Criterion) {
    let device = CPU::new();
    let params = NoiseParams::default();
    let mut buf = device.alloc_shared(params.len()).unwrap();

    for (gx, gy) in [(1, 1), (16, 16)] {
        c.bench_function(&format!("cpu launch 768x768 on {gx} * {gy}"), |bench| {
            bench.iter(|| {
                device
                    .launch_noise(&params, GroupSize::new(gx, gy), &mut buf)
                    .unwrap()
            })
        });
    }
}

criterion_group!(benches, bench_turbulence, bench_noise_serial, bench_cpu_launch);
criterion_main!(benches);
