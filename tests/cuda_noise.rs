use noise_bench::{
    CUDA, DeviceError, ErrorKind, GroupSize, NoiseDevice, NoiseParams,
    check::{CORRECTNESS_THRESHOLD, compare},
    cuda::api::CudaErrorKind,
    harness::{BenchConfig, run},
    noise::reference,
};

#[test]
fn test_invalid_device_idx() {
    let err = CUDA::new(1_000_000).unwrap_err();
    assert_eq!(err.kind(), Some(&CudaErrorKind::InvalidDeviceIdx));
}

#[test]
fn test_noise_matches_reference() -> noise_bench::Result<()> {
    let device = CUDA::from_env()?;
    let params = NoiseParams::default();

    let mut buf = device.alloc_shared(params.len())?;
    device.fill(&mut buf, -1.)?;
    device.launch_noise(&params, GroupSize::new(16, 16), &mut buf)?;
    device.synchronize()?;

    let mut out = vec![0.; params.len()];
    device.read(&buf, &mut out)?;

    let verdict = compare(&out, &reference(&params)?, CORRECTNESS_THRESHOLD)?;
    assert!(verdict.passed(), "{verdict}");
    Ok(())
}

#[test]
fn test_kernel_is_compiled_once() -> noise_bench::Result<()> {
    let device = CUDA::from_env()?;
    let config = BenchConfig {
        params: NoiseParams::with_size(64, 64),
        group: GroupSize::new(8, 8),
        iterations: 10,
        verify: true,
    };
    assert!(run(&device, &config)?.passed());
    assert!(run(&device, &config)?.passed());
    assert_eq!(device.kernel_cache.borrow().len(), 1);
    Ok(())
}

#[test]
fn test_block_exceeding_axis_limit() -> noise_bench::Result<()> {
    let device = CUDA::from_env()?;
    let [max_x, _] = device.max_group_dims();

    let config = BenchConfig {
        params: NoiseParams::with_size(32, 32),
        group: GroupSize::new(max_x as u32 + 1, 1),
        ..Default::default()
    };
    let err = run(&device, &config).unwrap_err();
    assert_eq!(err.kind(), Some(&DeviceError::GroupSizeExceedsDevice));
    Ok(())
}
