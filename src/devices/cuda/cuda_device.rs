use std::cell::RefCell;

use super::{
    AsCudaCvoidPtr, CUDAPtr, KernelCacheCU,
    api::{
        Context, CudaIntDevice, Stream, create_context, create_stream, cu_memset_d32_async,
        cu_read, cuinit, device,
    },
    launch_kernel,
};
use crate::{
    DeviceError, GroupSize, NoiseDevice, NoiseParams, Result,
    devices::chosen_cu_idx,
    kernels::{KERNEL_NAME, cuda_source},
};

/// Used to run the noise kernel on a CUDA capable device.
/// # Example
/// ```no_run
/// use noise_bench::{CUDA, GroupSize, NoiseDevice, NoiseParams};
///
/// fn main() -> noise_bench::Result<()> {
///     let device = CUDA::new(0)?;
///     let params = NoiseParams::default();
///
///     let mut buf = device.alloc_shared(params.len())?;
///     device.launch_noise(&params, GroupSize::new(16, 16), &mut buf)?;
///     device.synchronize()?;
///
///     let mut out = vec![0.; params.len()];
///     device.read(&buf, &mut out)?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct CUDA {
    // drop order: modules, stream, context
    pub kernel_cache: RefCell<KernelCacheCU>,
    stream: Stream,
    ctx: Context,
    device: CudaIntDevice,
    src: String,
    name: String,
    max_threads_per_block: usize,
    max_block_dims: [usize; 2],
}

impl CUDA {
    /// Returns a [CUDA] device at the specified device index.
    /// # Errors
    /// - No device was found at the given device index
    /// - some other CUDA related errors
    pub fn new(idx: usize) -> Result<CUDA> {
        cuinit(0)?;
        let ordinal = i32::try_from(idx).map_err(|_| DeviceError::InvalidDeviceIdx)?;
        let device = device(ordinal)?;
        let ctx = create_context(&device)?;
        let stream = create_stream()?;
        let name = device.name()?;
        let max_threads_per_block = device.max_threads_per_block()?;
        let max_block_dims = device.max_block_dims()?;

        tracing::debug!(
            idx,
            %name,
            max_threads_per_block,
            ?max_block_dims,
            "opened CUDA device"
        );

        Ok(CUDA {
            kernel_cache: RefCell::new(KernelCacheCU::default()),
            stream,
            ctx,
            device,
            src: cuda_source(),
            name,
            max_threads_per_block,
            max_block_dims,
        })
    }

    /// Opens the device selected by `NOISE_CU_DEVICE_IDX`.
    pub fn from_env() -> Result<CUDA> {
        CUDA::new(chosen_cu_idx()?)
    }

    #[inline]
    pub fn device(&self) -> &CudaIntDevice {
        &self.device
    }

    #[inline]
    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    #[inline]
    pub fn stream(&self) -> &Stream {
        &self.stream
    }

    /// Launches a cached CUDA kernel on the device's stream.
    #[inline]
    pub fn launch_kernel(
        &self,
        grid: [u32; 3],
        blocks: [u32; 3],
        src: &str,
        fn_name: &str,
        args: &[&dyn AsCudaCvoidPtr],
    ) -> Result<()> {
        launch_kernel(self, grid, blocks, src, fn_name, args)
    }
}

impl NoiseDevice for CUDA {
    type Data = CUDAPtr<f32>;

    fn name(&self) -> String {
        self.name.clone()
    }

    #[inline]
    fn max_group_threads(&self) -> usize {
        self.max_threads_per_block
    }

    #[inline]
    fn max_group_dims(&self) -> [usize; 2] {
        self.max_block_dims
    }

    fn alloc_shared(&self, len: usize) -> Result<Self::Data> {
        if len == 0 {
            return Err(DeviceError::InvalidDimensions.into());
        }
        CUDAPtr::new_managed(len)
    }

    fn fill(&self, buf: &mut Self::Data, value: f32) -> Result<()> {
        unsafe { cu_memset_d32_async(buf.ptr, value.to_bits(), buf.len, &self.stream)? };
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

        // a single block, launches on one stream run in order
        self.launch_kernel(
            [1, 1, 1],
            [group.x, group.y, 1],
            &self.src,
            KERNEL_NAME,
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
        self.stream.sync()?;
        unsafe { cu_read(dst, buf.ptr)? };
        Ok(())
    }

    fn synchronize(&self) -> Result<()> {
        self.stream.sync()?;
        Ok(())
    }
}
