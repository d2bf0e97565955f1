//! The compute devices a noise run can be dispatched on.

#[cfg(feature = "cpu")]
pub mod cpu;

#[cfg(feature = "cuda")]
pub mod cuda;

#[cfg(feature = "opencl")]
pub mod opencl;

use core::str::FromStr;

use crate::{DeviceError, GroupSize, NoiseParams, Result};

/// The driver operations the harness sequences.
/// Enqueueing operations may return before the work is done; [`NoiseDevice::synchronize`] waits for it.
pub trait NoiseDevice {
    /// A host visible buffer. Dropping it frees the device memory.
    type Data;

    fn name(&self) -> String;

    /// Largest `gx * gy` accepted by [`NoiseDevice::launch_noise`].
    fn max_group_threads(&self) -> usize;

    /// Largest `[gx, gy]` per axis. Defaults to [`NoiseDevice::max_group_threads`] on both.
    fn max_group_dims(&self) -> [usize; 2] {
        let max = self.max_group_threads();
        [max, max]
    }

    fn alloc_shared(&self, len: usize) -> Result<Self::Data>;

    fn fill(&self, buf: &mut Self::Data, value: f32) -> Result<()>;

    /// Sets the kernel arguments and the group size, then enqueues one work-group ordered after earlier launches.
    fn launch_noise(
        &self,
        params: &NoiseParams,
        group: GroupSize,
        buf: &mut Self::Data,
    ) -> Result<()>;

    /// Copies the whole buffer into `dst` after all previously enqueued work on `buf` completed.
    fn read(&self, buf: &Self::Data, dst: &mut [f32]) -> Result<()>;

    fn synchronize(&self) -> Result<()>;
}

/// The backends this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceKind {
    #[default]
    Cpu,
    OpenCL,
    Cuda,
}

impl DeviceKind {
    /// Whether the backend was compiled in.
    pub fn is_enabled(&self) -> bool {
        match self {
            DeviceKind::Cpu => cfg!(feature = "cpu"),
            DeviceKind::OpenCL => cfg!(feature = "opencl"),
            DeviceKind::Cuda => cfg!(feature = "cuda"),
        }
    }
}

impl FromStr for DeviceKind {
    type Err = DeviceError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" | "host" => Ok(DeviceKind::Cpu),
            "opencl" | "cl" => Ok(DeviceKind::OpenCL),
            "cuda" | "cu" => Ok(DeviceKind::Cuda),
            _ => Err(DeviceError::UnknownDeviceKind),
        }
    }
}

impl core::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            DeviceKind::Cpu => "cpu",
            DeviceKind::OpenCL => "opencl",
            DeviceKind::Cuda => "cuda",
        };
        f.write_str(name)
    }
}

/// Reads a device index from the environment variable `var`. Defaults to 0.
pub fn env_device_idx(var: &str) -> Result<usize> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| DeviceError::InvalidDeviceIdx.into()),
        Err(_) => Ok(0),
    }
}

/// Reads the environment variable `NOISE_CL_DEVICE_IDX` and returns the value as a `usize`.
pub fn chosen_cl_idx() -> Result<usize> {
    env_device_idx("NOISE_CL_DEVICE_IDX")
}

/// Reads the environment variable `NOISE_CU_DEVICE_IDX` and returns the value as a `usize`.
pub fn chosen_cu_idx() -> Result<usize> {
    env_device_idx("NOISE_CU_DEVICE_IDX")
}

#[cfg(test)]
mod tests {
    use super::{DeviceKind, env_device_idx};
    use crate::{DeviceError, ErrorKind};

    #[test]
    fn test_parse_device_kind() {
        assert_eq!("cpu".parse::<DeviceKind>(), Ok(DeviceKind::Cpu));
        assert_eq!("OpenCL".parse::<DeviceKind>(), Ok(DeviceKind::OpenCL));
        assert_eq!("cl".parse::<DeviceKind>(), Ok(DeviceKind::OpenCL));
        assert_eq!("cu".parse::<DeviceKind>(), Ok(DeviceKind::Cuda));
        assert_eq!(
            "vulkan".parse::<DeviceKind>(),
            Err(DeviceError::UnknownDeviceKind)
        );
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [DeviceKind::Cpu, DeviceKind::OpenCL, DeviceKind::Cuda] {
            assert_eq!(kind.to_string().parse::<DeviceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unset_env_idx_defaults_to_zero() {
        assert_eq!(env_device_idx("NOISE_TEST_UNSET_DEVICE_IDX").unwrap(), 0);
    }

    #[test]
    fn test_invalid_env_idx() {
        // SAFETY: no other test touches this variable
        unsafe { std::env::set_var("NOISE_TEST_BAD_DEVICE_IDX", "gpu0") };
        let err = env_device_idx("NOISE_TEST_BAD_DEVICE_IDX").unwrap_err();
        assert_eq!(err.kind(), Some(&DeviceError::InvalidDeviceIdx));
    }
}
