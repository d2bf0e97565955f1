use noise_bench::{
    CPU, DeviceError, ErrorKind, GroupSize, NoiseDevice, NoiseParams,
    check::Verdict,
    cpu::CPU_MAX_GROUP_THREADS,
    harness::{BenchConfig, run},
    noise::reference,
};

#[test]
fn test_default_run_passes() -> noise_bench::Result<()> {
    let outcome = run(&CPU::new(), &BenchConfig::default())?;

    assert!(outcome.passed());
    assert!(matches!(outcome.verdict, Some(Verdict::Passed { .. })));
    assert_eq!(outcome.result, reference(&NoiseParams::default())?);
    Ok(())
}

#[test]
fn test_group_shapes_cover_the_image() -> noise_bench::Result<()> {
    let params = NoiseParams::with_size(100, 37);
    let gold = reference(&params)?;

    for (gx, gy) in [(1, 1), (3, 7), (16, 16), (64, 1), (1, 64), (32, 32)] {
        for threads in [1, 3, 8] {
            let config = BenchConfig {
                params,
                group: GroupSize::new(gx, gy),
                ..Default::default()
            };
            let outcome = run(&CPU::with_threads(threads), &config)?;
            assert!(outcome.passed(), "group {gx} * {gy} on {threads} threads");
            assert_eq!(outcome.result, gold);
        }
    }
    Ok(())
}

#[test]
fn test_repeated_dispatches_are_idempotent() -> noise_bench::Result<()> {
    let config = BenchConfig {
        params: NoiseParams::with_size(48, 48),
        group: GroupSize::new(4, 4),
        iterations: 5,
        verify: true,
    };
    let outcome = run(&CPU::with_threads(4), &config)?;

    assert!(outcome.passed());
    assert!(outcome.timings.kernel <= outcome.timings.total);
    Ok(())
}

#[test]
fn test_timing_run_is_not_verified() -> noise_bench::Result<()> {
    let config = BenchConfig {
        params: NoiseParams::with_size(32, 32),
        iterations: 3,
        ..Default::default()
    };
    let outcome = run(&CPU::with_threads(2), &config)?;
    assert_eq!(outcome.verdict, None);
    assert!(outcome.passed());
    Ok(())
}

#[test]
fn test_group_larger_than_device_limit() {
    let device = CPU::with_threads(2);
    assert_eq!(device.max_group_threads(), CPU_MAX_GROUP_THREADS);

    let config = BenchConfig {
        params: NoiseParams::with_size(16, 16),
        group: GroupSize::new(64, 32),
        ..Default::default()
    };
    let err = run(&device, &config).unwrap_err();
    assert_eq!(err.kind(), Some(&DeviceError::GroupSizeExceedsDevice));
}

#[test]
fn test_zero_group_dimension() {
    let config = BenchConfig {
        group: GroupSize::new(0, 8),
        ..Default::default()
    };
    let err = run(&CPU::with_threads(1), &config).unwrap_err();
    assert_eq!(err.kind(), Some(&DeviceError::InvalidGroupSize));
}
