//! Image rectangle and work-group shape of a noise run.

use crate::{DeviceError, Result};

/// Side length of the default image.
pub const DEFAULT_SIZE: u32 = 768;

/// The z coordinate every pixel is sampled at.
pub const NOISE_Z: f32 = 0.6;

/// Number of turbulence octaves.
pub const OCTAVES: u32 = 8;

/// The rectangle `[x0, x1) x [y0, y1)` sampled on a `width x height` grid.
///
/// # Example
/// ```
/// use noise_bench::NoiseParams;
///
/// let params = NoiseParams::default();
/// assert_eq!(params.len(), 768 * 768);
/// assert_eq!(params.dx(), 20. / 768.);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseParams {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for NoiseParams {
    #[inline]
    fn default() -> Self {
        NoiseParams {
            x0: -10.,
            y0: -10.,
            x1: 10.,
            y1: 10.,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }
}

impl NoiseParams {
    /// Default rectangle with a different resolution.
    #[inline]
    pub fn with_size(width: u32, height: u32) -> Self {
        NoiseParams {
            width,
            height,
            ..Default::default()
        }
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn dx(&self) -> f32 {
        (self.x1 - self.x0) / self.width as f32
    }

    #[inline]
    pub fn dy(&self) -> f32 {
        (self.y1 - self.y0) / self.height as f32
    }

    /// Width and height as passed to a kernel (`int`).
    pub fn kernel_dims(&self) -> Result<(i32, i32)> {
        self.validate()?;
        Ok((self.width as i32, self.height as i32))
    }

    /// Kernels index the image with a C `int`, so the pixel count has to fit one as well.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DeviceError::InvalidDimensions.into());
        }
        if self.width as u64 * self.height as u64 > i32::MAX as u64 {
            return Err(DeviceError::InvalidDimensions.into());
        }
        Ok(())
    }
}

/// Shape of the single dispatched work-group: `x * y * 1` work items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupSize {
    pub x: u32,
    pub y: u32,
}

impl Default for GroupSize {
    #[inline]
    fn default() -> Self {
        GroupSize { x: 1, y: 1 }
    }
}

impl GroupSize {
    #[inline]
    pub fn new(x: u32, y: u32) -> Self {
        GroupSize { x, y }
    }

    /// Number of work items in the group.
    #[inline]
    pub fn threads(&self) -> usize {
        self.x as usize * self.y as usize
    }

    /// Checks the group against the largest group a device accepts.
    pub fn validate(&self, max_threads: usize) -> Result<()> {
        if self.x == 0 || self.y == 0 {
            return Err(DeviceError::InvalidGroupSize.into());
        }
        if self.threads() > max_threads {
            return Err(DeviceError::GroupSizeExceedsDevice.into());
        }
        Ok(())
    }

    /// Like [`GroupSize::validate`], also checking each axis against `max_dims = [x, y]`.
    pub fn validate_shape(&self, max_threads: usize, max_dims: [usize; 2]) -> Result<()> {
        self.validate(max_threads)?;
        if self.x as usize > max_dims[0] || self.y as usize > max_dims[1] {
            return Err(DeviceError::GroupSizeExceedsDevice.into());
        }
        Ok(())
    }
}

impl core::fmt::Display for GroupSize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} * {}", self.x, self.y)
    }
}
