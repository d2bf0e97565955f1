use noise_bench::{
    DeviceError, ErrorKind, GroupSize, NoiseDevice, NoiseParams, OpenCL,
    check::{CORRECTNESS_THRESHOLD, compare},
    harness::{BenchConfig, run},
    noise::reference,
    opencl::api::OCLErrorKind,
};

#[test]
fn test_invalid_device_idx() {
    let err = OpenCL::new(1_000_000).unwrap_err();
    assert_eq!(err.kind(), Some(&OCLErrorKind::InvalidDeviceIdx));
}

#[test]
fn test_noise_matches_reference() -> noise_bench::Result<()> {
    let device = OpenCL::from_env()?;
    let params = NoiseParams::default();

    let mut buf = device.alloc_shared(params.len())?;
    device.fill(&mut buf, -1.)?;
    device.launch_noise(&params, GroupSize::new(8, 8), &mut buf)?;
    device.synchronize()?;

    let mut out = vec![0.; params.len()];
    device.read(&buf, &mut out)?;
    device.synchronize()?;

    let verdict = compare(&out, &reference(&params)?, CORRECTNESS_THRESHOLD)?;
    assert!(verdict.passed(), "{verdict}");
    Ok(())
}

#[test]
fn test_repeated_runs_reuse_device() -> noise_bench::Result<()> {
    let device = OpenCL::from_env()?;
    let config = BenchConfig {
        params: NoiseParams::with_size(64, 64),
        group: GroupSize::new(4, 4),
        iterations: 10,
        verify: true,
    };
    let outcome = run(&device, &config)?;
    assert!(outcome.passed());

    let again = run(&device, &config)?;
    assert_eq!(again.result, outcome.result);
    Ok(())
}

#[test]
fn test_group_shapes() -> noise_bench::Result<()> {
    let device = OpenCL::from_env()?;
    let max = device.max_group_threads();

    for (gx, gy) in [(1, 1), (16, 1), (1, 16), (8, 4)] {
        if gx * gy > max {
            continue;
        }
        let config = BenchConfig {
            params: NoiseParams::with_size(128, 96),
            group: GroupSize::new(gx as u32, gy as u32),
            ..Default::default()
        };
        assert!(run(&device, &config)?.passed(), "group {gx} * {gy}");
    }
    Ok(())
}

#[test]
fn test_group_exceeding_axis_limit() -> noise_bench::Result<()> {
    let device = OpenCL::from_env()?;
    let [_, max_y] = device.max_group_dims();

    let config = BenchConfig {
        params: NoiseParams::with_size(32, 32),
        group: GroupSize::new(1, max_y as u32 + 1),
        ..Default::default()
    };
    let err = run(&device, &config).unwrap_err();
    assert_eq!(err.kind(), Some(&DeviceError::GroupSizeExceedsDevice));
    Ok(())
}

#[test]
fn test_debug_is_single_line() -> noise_bench::Result<()> {
    let device = OpenCL::from_env()?;
    let debug = format!("{device:?}");
    assert!(debug.starts_with("OpenCL {"), "{debug}");
    assert!(debug.contains("max_work_item_sizes"));
    assert!(!debug.contains('\n'));
    Ok(())
}
