//! Runs the noise kernel on a device, times it and checks the image.

use std::time::Instant;

use crate::{
    DeviceError, GroupSize, NoiseDevice, NoiseParams, Result,
    check::{CORRECTNESS_THRESHOLD, Verdict, compare},
    noise::reference,
    timings::Timings,
};

/// Value the shared buffer holds before the kernel runs. Pixels left at it fail the check.
pub const UNWRITTEN: f32 = -1.;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchConfig {
    pub params: NoiseParams,
    pub group: GroupSize,
    pub iterations: u32,
    /// Verify even when running more than one iteration.
    pub verify: bool,
}

impl Default for BenchConfig {
    #[inline]
    fn default() -> Self {
        BenchConfig {
            params: NoiseParams::default(),
            group: GroupSize::default(),
            iterations: 1,
            verify: false,
        }
    }
}

impl BenchConfig {
    /// A single verified iteration runs by default, longer timing runs skip the check.
    #[inline]
    pub fn should_verify(&self) -> bool {
        self.iterations == 1 || self.verify
    }

    pub fn validate(&self, max_group_threads: usize, max_group_dims: [usize; 2]) -> Result<()> {
        self.params.validate()?;
        self.group.validate_shape(max_group_threads, max_group_dims)?;
        if self.iterations == 0 {
            return Err(DeviceError::NoIterations.into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub timings: Timings,
    /// `None` if the run was not verified.
    pub verdict: Option<Verdict>,
    /// The image copied back from the device, row major.
    pub result: Vec<f32>,
}

impl Outcome {
    /// True unless verification ran and failed.
    #[inline]
    pub fn passed(&self) -> bool {
        self.verdict.is_none_or(|verdict| verdict.passed())
    }
}

/// Computes the image `config.iterations` times on `device` and copies it back.
///
/// # Example
/// ```
/// use noise_bench::{harness::{run, BenchConfig}, GroupSize, NoiseParams, CPU};
///
/// let config = BenchConfig {
///     params: NoiseParams::with_size(64, 48),
///     group: GroupSize::new(4, 2),
///     ..Default::default()
/// };
/// let outcome = run(&CPU::with_threads(2), &config).unwrap();
/// assert!(outcome.passed());
/// assert_eq!(outcome.result.len(), 64 * 48);
/// ```
pub fn run<D: NoiseDevice>(device: &D, config: &BenchConfig) -> Result<Outcome> {
    config.validate(device.max_group_threads(), device.max_group_dims())?;
    let params = &config.params;

    let mut buf = device.alloc_shared(params.len())?;
    device.fill(&mut buf, UNWRITTEN)?;
    device.synchronize()?;
    tracing::debug!(device = %device.name(), len = params.len(), "allocated shared buffer");

    let start = Instant::now();
    for _ in 0..config.iterations {
        device.launch_noise(params, config.group, &mut buf)?;
    }
    device.synchronize()?;
    let kernel = start.elapsed();

    let mut result = vec![0f32; params.len()];
    device.read(&buf, &mut result)?;
    device.synchronize()?;
    let total = start.elapsed();

    drop(buf);

    let timings = Timings::new(kernel, total);
    tracing::info!(
        iterations = config.iterations,
        group = %config.group,
        kernel_ms = kernel.as_secs_f64() * 1e3,
        total_ms = total.as_secs_f64() * 1e3,
        "noise run finished"
    );

    let verdict = if config.should_verify() {
        let gold = reference(params)?;
        let verdict = compare(&result, &gold, CORRECTNESS_THRESHOLD)?;
        tracing::info!(passed = verdict.passed(), max_err = verdict.max_err(), "verified");
        Some(verdict)
    } else {
        None
    };

    Ok(Outcome {
        timings,
        verdict,
        result,
    })
}
