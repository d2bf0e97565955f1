use std::num::NonZeroUsize;

use rayon::prelude::*;

use super::CPUPtr;
use crate::{DeviceError, GroupSize, NoiseDevice, NoiseParams, Result, noise::noise_pixel};

/// The largest work-group accepted by the host device. Matches common GPU limits.
pub const CPU_MAX_GROUP_THREADS: usize = 1024;

/// Runs the noise kernel on the host CPU.
///
/// A launch runs on a rayon pool of `min(gx * gy, threads)` workers, one image row per task.
///
/// # Example
/// ```
/// use noise_bench::{CPU, GroupSize, NoiseDevice, NoiseParams};
///
/// fn main() -> noise_bench::Result<()> {
///     let device = CPU::new();
///     let params = NoiseParams::with_size(32, 32);
///
///     let mut buf = device.alloc_shared(params.len())?;
///     device.launch_noise(&params, GroupSize::new(4, 4), &mut buf)?;
///
///     let mut out = vec![0.; params.len()];
///     device.read(&buf, &mut out)?;
///     device.synchronize()?;
///
///     assert_eq!(out, noise_bench::noise::reference(&params)?);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CPU {
    threads: usize,
}

impl Default for CPU {
    fn default() -> Self {
        CPU::new()
    }
}

impl CPU {
    /// Uses `NOISE_CPU_THREADS` worker threads if set, otherwise the available parallelism.
    pub fn new() -> CPU {
        let threads = threads_from_env("NOISE_CPU_THREADS").unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        });
        CPU { threads }
    }

    pub fn with_threads(threads: usize) -> CPU {
        CPU {
            threads: threads.max(1),
        }
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl NoiseDevice for CPU {
    type Data = CPUPtr<f32>;

    fn name(&self) -> String {
        format!("host cpu ({} threads)", self.threads)
    }

    #[inline]
    fn max_group_threads(&self) -> usize {
        CPU_MAX_GROUP_THREADS
    }

    fn alloc_shared(&self, len: usize) -> Result<Self::Data> {
        CPUPtr::new_filled(len, 0.)
    }

    fn fill(&self, buf: &mut Self::Data, value: f32) -> Result<()> {
        buf.fill(value);
        Ok(())
    }

    fn launch_noise(
        &self,
        params: &NoiseParams,
        group: GroupSize,
        buf: &mut Self::Data,
    ) -> Result<()> {
        params.validate()?;
        group.validate_shape(self.max_group_threads(), self.max_group_dims())?;
        if buf.len() != params.len() {
            return Err(DeviceError::LengthMismatch.into());
        }

        let workers = group.threads().min(self.threads).max(1);
        let width = params.width as usize;
        tracing::debug!(workers, %group, "cpu launch");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|idx| format!("noise-cpu-{idx}"))
            .build()?;

        let image: &mut [f32] = buf;
        pool.install(|| {
            image
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(j, row)| {
                    for (i, value) in row.iter_mut().enumerate() {
                        *value = noise_pixel(params, i, j);
                    }
                })
        });
        Ok(())
    }

    fn read(&self, buf: &Self::Data, dst: &mut [f32]) -> Result<()> {
        if dst.len() != buf.len() {
            return Err(DeviceError::LengthMismatch.into());
        }
        dst.copy_from_slice(buf);
        Ok(())
    }

    #[inline]
    fn synchronize(&self) -> Result<()> {
        Ok(())
    }
}

/// Reads a positive thread count from `var`.
/// An unset variable yields `None`, as does an invalid value, which is logged.
pub fn threads_from_env(var: &str) -> Option<usize> {
    let value = std::env::var(var).ok()?;
    match value.trim().parse::<usize>() {
        Ok(threads) if threads > 0 => Some(threads),
        _ => {
            tracing::warn!(var, %value, "ignoring invalid thread count");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CPU, threads_from_env};
    use crate::{DeviceError, ErrorKind, GroupSize, NoiseDevice, NoiseParams, noise::reference};

    #[test]
    fn test_launch_matches_reference() -> crate::Result<()> {
        let params = NoiseParams::with_size(37, 11);
        let gold = reference(&params)?;

        for (threads, group) in [(1, (1, 1)), (4, (3, 5)), (8, (16, 16)), (3, (1, 32))] {
            let device = CPU::with_threads(threads);
            let mut buf = device.alloc_shared(params.len())?;
            device.fill(&mut buf, -1.)?;
            device.launch_noise(&params, GroupSize::new(group.0, group.1), &mut buf)?;
            assert_eq!(&*buf, gold.as_slice());
        }
        Ok(())
    }

    #[test]
    fn test_launch_rejects_wrong_buffer() -> crate::Result<()> {
        let device = CPU::with_threads(2);
        let mut buf = device.alloc_shared(10)?;
        let err = device
            .launch_noise(&NoiseParams::with_size(4, 4), GroupSize::default(), &mut buf)
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DeviceError::LengthMismatch));
        Ok(())
    }

    #[test]
    fn test_group_limit() -> crate::Result<()> {
        let device = CPU::with_threads(2);
        let params = NoiseParams::with_size(4, 4);
        let mut buf = device.alloc_shared(params.len())?;
        let err = device
            .launch_noise(&params, GroupSize::new(64, 32), &mut buf)
            .unwrap_err();
        assert_eq!(err.kind(), Some(&DeviceError::GroupSizeExceedsDevice));
        Ok(())
    }

    #[test]
    fn test_threads_from_env() {
        assert_eq!(threads_from_env("NOISE_TEST_UNSET_THREADS"), None);

        // SAFETY: no other test touches these variables
        unsafe {
            std::env::set_var("NOISE_TEST_THREADS", " 6 ");
            std::env::set_var("NOISE_TEST_ZERO_THREADS", "0");
            std::env::set_var("NOISE_TEST_BAD_THREADS", "many");
        }
        assert_eq!(threads_from_env("NOISE_TEST_THREADS"), Some(6));
        assert_eq!(threads_from_env("NOISE_TEST_ZERO_THREADS"), None);
        assert_eq!(threads_from_env("NOISE_TEST_BAD_THREADS"), None);
    }

    #[test]
    fn test_read_and_fill() -> crate::Result<()> {
        let device = CPU::with_threads(1);
        let mut buf = device.alloc_shared(6)?;
        device.fill(&mut buf, 2.5)?;

        let mut out = vec![0.; 6];
        device.read(&buf, &mut out)?;
        device.synchronize()?;
        assert_eq!(out, vec![2.5; 6]);

        let mut short = vec![0.; 5];
        assert!(device.read(&buf, &mut short).is_err());
        Ok(())
    }
}
