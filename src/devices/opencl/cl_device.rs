use core::ops::Deref;
use std::fmt::Debug;

use min_cl::{
    CLDevice,
    api::{OCLErrorKind, clFinish, enqueue_read_buffer, enqueue_write_buffer, wait_for_event},
};

use super::{
    cl_ptr::CLPtr,
    info::{device_name, max_work_group_size, max_work_item_sizes},
    kernel_enqueue::{AsClCvoidPtr, enqueue_kernel},
};
use crate::{
    DeviceError, GroupSize, NoiseDevice, NoiseParams, Result, devices::chosen_cl_idx,
    kernels::opencl_source,
};

/// Used to run the noise kernel on an OpenCL capable device.
/// # Example
/// ```no_run
/// use noise_bench::{OpenCL, GroupSize, NoiseDevice, NoiseParams};
///
/// fn main() -> noise_bench::Result<()> {
///     let device = OpenCL::new(0)?;
///     let params = NoiseParams::default();
///
///     let mut buf = device.alloc_shared(params.len())?;
///     device.launch_noise(&params, GroupSize::new(16, 16), &mut buf)?;
///
///     let mut out = vec![0.; params.len()];
///     device.read(&buf, &mut out)?;
///     device.synchronize()?;
///     Ok(())
/// }
/// ```
pub struct OpenCL {
    /// The underlying OpenCL device.
    pub device: CLDevice,
    src: String,
    name: String,
    max_work_group_size: usize,
    max_work_item_sizes: [usize; 2],
}

/// Short form for `OpenCL`
pub type CL = OpenCL;

impl Deref for OpenCL {
    type Target = CLDevice;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.device
    }
}

impl OpenCL {
    /// Returns an [OpenCL] device at the specified device index.
    /// # Errors
    /// - No device was found at the given device index
    /// - some other OpenCL related errors
    pub fn new(device_idx: usize) -> Result<OpenCL> {
        let device = CLDevice::new(device_idx)?;
        let name = device_name(&device)?;
        let max_work_group_size = max_work_group_size(&device)?;
        let max_work_item_sizes = max_work_item_sizes(&device)?;

        tracing::debug!(
            device_idx,
            %name,
            max_work_group_size,
            ?max_work_item_sizes,
            "opened OpenCL device"
        );

        Ok(OpenCL {
            device,
            src: opencl_source(),
            name,
            max_work_group_size,
            max_work_item_sizes,
        })
    }

    /// Opens the device selected by `NOISE_CL_DEVICE_IDX`.
    pub fn from_env() -> Result<OpenCL> {
        OpenCL::new(chosen_cl_idx()?)
    }

    /// Executes a cached OpenCL kernel.
    #[inline]
    pub fn launch_kernel(
        &self,
        src: &str,
        gws: [usize; 3],
        lws: Option<[usize; 3]>,
        args: &[&dyn AsClCvoidPtr],
    ) -> Result<()> {
        enqueue_kernel(self, src, gws, lws, args)
    }
}

impl NoiseDevice for OpenCL {
    type Data = CLPtr<f32>;

    fn name(&self) -> String {
        self.name.clone()
    }

    #[inline]
    fn max_group_threads(&self) -> usize {
        self.max_work_group_size
    }

    #[inline]
    fn max_group_dims(&self) -> [usize; 2] {
        self.max_work_item_sizes
    }

    fn alloc_shared(&self, len: usize) -> Result<Self::Data> {
        CLPtr::new_shared(&self.device, len)
    }

    fn fill(&self, buf: &mut Self::Data, value: f32) -> Result<()> {
        let data = vec![value; buf.len];
        let event = unsafe { enqueue_write_buffer(&self.queue(), buf.ptr, &data, true)? };
        wait_for_event(event)?;
        Ok(())
    }

    fn launch_noise(
        &self,
        params: &NoiseParams,
        group: GroupSize,
        buf: &mut Self::Data,
    ) -> Result<()> {
        let (width, height) = params.kernel_dims()?;
        group.validate_shape(self.max_group_threads(), self.max_group_dims())?;
        if buf.len != params.len() {
            return Err(DeviceError::LengthMismatch.into());
        }

        // one work-group: the global size equals the local size.
        // the queue is in order, so each launch completes before the next one starts
        let size = [group.x as usize, group.y as usize, 1];
        self.launch_kernel(
            &self.src,
            size,
            Some(size),
            &[
                &params.x0,
                &params.y0,
                &params.x1,
                &params.y1,
                &width,
                &height,
                &*buf,
            ],
        )
    }

    fn read(&self, buf: &Self::Data, dst: &mut [f32]) -> Result<()> {
        if dst.len() != buf.len {
            return Err(DeviceError::LengthMismatch.into());
        }
        // blocking, `dst` is borrowed only for this call
        let event = unsafe { enqueue_read_buffer(&self.queue(), buf.ptr, dst, true)? };
        wait_for_event(event)?;
        Ok(())
    }

    fn synchronize(&self) -> Result<()> {
        let value = unsafe { clFinish(self.queue().0) };
        if value != 0 {
            return Err(OCLErrorKind::from_value(value).into());
        }
        Ok(())
    }
}

impl Debug for OpenCL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenCL")
            .field("name", &self.name)
            .field("max_work_group_size", &self.max_work_group_size)
            .field("max_work_item_sizes", &self.max_work_item_sizes)
            .finish()
    }
}
