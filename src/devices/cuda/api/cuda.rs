use super::{
    error::{CudaErrorKind, CudaResult, to_result},
    ffi::*,
};

use std::{
    ffi::{CString, c_void},
    os::raw::c_char,
    ptr::null_mut,
};

pub fn cuinit(flags: u32) -> CudaResult<()> {
    to_result(unsafe { cuInit(flags) })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CudaIntDevice(pub CUdevice);

impl CudaIntDevice {
    pub fn name(self) -> CudaResult<String> {
        let mut name = [0 as c_char; 256];
        to_result(unsafe { cuDeviceGetName(name.as_mut_ptr(), name.len() as i32, self.0) })?;
        let bytes = name
            .iter()
            .take_while(|c| **c != 0)
            .map(|c| *c as u8)
            .collect::<Vec<_>>();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn attribute(self, attrib: CUdevice_attribute) -> CudaResult<i32> {
        let mut value = 0;
        to_result(unsafe { cuDeviceGetAttribute(&mut value, attrib, self.0) })?;
        Ok(value)
    }

    pub fn max_threads_per_block(self) -> CudaResult<usize> {
        self.attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_THREADS_PER_BLOCK)
            .map(|threads| threads.max(0) as usize)
    }

    /// The largest block extent in x and y.
    pub fn max_block_dims(self) -> CudaResult<[usize; 2]> {
        let x = self.attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_BLOCK_DIM_X)?;
        let y = self.attribute(CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MAX_BLOCK_DIM_Y)?;
        Ok([x.max(0) as usize, y.max(0) as usize])
    }
}

pub fn device_count() -> CudaResult<i32> {
    let mut count = 0;
    to_result(unsafe { cuDeviceGetCount(&mut count as *mut i32) })?;
    Ok(count)
}

pub fn device(ordinal: i32) -> CudaResult<CudaIntDevice> {
    if ordinal < 0 || ordinal >= device_count()? {
        return Err(CudaErrorKind::InvalidDeviceIdx);
    }

    let mut device = CudaIntDevice(0);
    to_result(unsafe { cuDeviceGet(&mut device.0 as *mut i32, ordinal) })?;
    Ok(device)
}

#[derive(Debug)]
pub struct Context(pub CUcontext);

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { cuCtxDestroy_v2(self.0) };
    }
}

/// Creates a context and makes it current on the calling thread.
pub fn create_context(device: &CudaIntDevice) -> CudaResult<Context> {
    let mut context = Context(null_mut());
    to_result(unsafe { cuCtxCreate_v2(&mut context.0 as *mut CUcontext, 0, device.0) })?;
    Ok(context)
}

/// Allocates `len` elements of managed memory, addressable from host and device.
pub fn cumalloc_managed<T>(len: usize) -> CudaResult<CUdeviceptr> {
    let bytes = len * core::mem::size_of::<T>();

    if bytes == 0 {
        return Err(CudaErrorKind::InvalidAllocSize);
    }

    let mut ptr: CUdeviceptr = 0;
    to_result(unsafe { cuMemAllocManaged(&mut ptr, bytes, CU_MEM_ATTACH_GLOBAL) })?;
    Ok(ptr)
}

/// Free CUDA GPU memory
/// # Safety
/// FFI, `ptr` must be a valid pointer.
pub unsafe fn cufree(ptr: CUdeviceptr) -> CudaResult<()> {
    to_result(unsafe { cuMemFree_v2(ptr) })
}

/// Enqueues setting `len` 32 bit words at `dst` to `value`.
/// # Safety
/// `dst` must hold at least `len` 32 bit words.
pub unsafe fn cu_memset_d32_async(
    dst: CUdeviceptr,
    value: u32,
    len: usize,
    stream: &Stream,
) -> CudaResult<()> {
    to_result(unsafe { cuMemsetD32Async(dst, value, len, stream.0) })
}

/// Copies `dst_host.len()` elements from `src`. Waits for prior work in every stream.
/// # Safety
/// `src` must hold at least `dst_host.len()` elements.
pub unsafe fn cu_read<T>(dst_host: &mut [T], src: CUdeviceptr) -> CudaResult<()> {
    let bytes_to_copy = std::mem::size_of_val(dst_host);
    to_result(unsafe {
        cuMemcpyDtoH_v2(dst_host.as_mut_ptr() as *mut c_void, src, bytes_to_copy)
    })
}

#[derive(Debug)]
pub struct Module(pub CUmodule);

impl Module {
    pub fn function(&self, fn_name: &str) -> crate::Result<FnHandle> {
        module_get_fn(self, fn_name)
    }
}

impl Drop for Module {
    fn drop(&mut self) {
        unsafe { cuModuleUnload(self.0) };
    }
}

pub fn load_module_data(src: CString) -> CudaResult<Module> {
    let mut module = Module(null_mut());
    to_result(unsafe { cuModuleLoadData(&mut module.0, src.as_ptr() as *const c_void) })?;
    Ok(module)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FnHandle(pub CUfunction);

pub fn module_get_fn(module: &Module, fn_name: &str) -> crate::Result<FnHandle> {
    let fn_name = CString::new(fn_name)?;

    let mut handle = FnHandle(null_mut());
    to_result(unsafe { cuModuleGetFunction(&mut handle.0, module.0, fn_name.as_ptr()) })?;
    Ok(handle)
}

#[derive(Debug)]
pub struct Stream(pub CUstream);

impl Stream {
    pub fn sync(&self) -> CudaResult<()> {
        to_result(unsafe { cuStreamSynchronize(self.0) })
    }
}

impl Drop for Stream {
    fn drop(&mut self) {
        unsafe { cuStreamDestroy_v2(self.0) };
    }
}

pub fn create_stream() -> CudaResult<Stream> {
    let mut ph_stream = Stream(null_mut());
    to_result(unsafe { cuStreamCreate(&mut ph_stream.0, 0) })?;
    Ok(ph_stream)
}

/// Enqueues `f` on `stream`. `params` holds one pointer per kernel argument.
pub fn culaunch_kernel(
    f: &FnHandle,
    grid: [u32; 3],
    blocks: [u32; 3],
    shared_mem_bytes: u32,
    stream: &Stream,
    params: &[*mut c_void],
) -> CudaResult<()> {
    to_result(unsafe {
        cuLaunchKernel(
            f.0,
            grid[0],
            grid[1],
            grid[2],
            blocks[0],
            blocks[1],
            blocks[2],
            shared_mem_bytes,
            stream.0,
            params.as_ptr() as *mut _,
            null_mut(),
        )
    })
}
