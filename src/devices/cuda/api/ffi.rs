#![allow(dead_code)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::{ffi::c_void, os::raw::c_char};

pub type CUdevice = std::os::raw::c_int;

/// Type alias for `core::ffi::c_ulonglong`. Used for CUDA memory object pointers.
pub type CUdeviceptr = core::ffi::c_ulonglong;

/// A driver status code, `CUDA_SUCCESS` on success.
pub type CUresult = u32;

pub const CUDA_SUCCESS: CUresult = 0;

pub enum CUctx_st {}
pub type CUcontext = *mut CUctx_st;

pub enum CUmod_st {}
pub type CUmodule = *mut CUmod_st;

pub enum CUfunc_st {}
pub type CUfunction = *mut CUfunc_st;

pub enum CUstream_st {}
pub type CUstream = *mut CUstream_st;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CUdevice_attribute {
    CU_DEVICE_ATTRIBUTE_MAX_THREADS_PER_BLOCK = 1,
    CU_DEVICE_ATTRIBUTE_MAX_BLOCK_DIM_X = 2,
    CU_DEVICE_ATTRIBUTE_MAX_BLOCK_DIM_Y = 3,
    CU_DEVICE_ATTRIBUTE_MAX_BLOCK_DIM_Z = 4,
    CU_DEVICE_ATTRIBUTE_UNIFIED_ADDRESSING = 41,
    CU_DEVICE_ATTRIBUTE_MANAGED_MEMORY = 83,
}

/// `cuMemAllocManaged` flag: the allocation is accessible from any stream on any device.
pub const CU_MEM_ATTACH_GLOBAL: u32 = 0x1;

#[link(name = "cuda")]
unsafe extern "C" {
    pub fn cuInit(flags: u32) -> CUresult;
    pub fn cuDeviceGetCount(count: *mut i32) -> CUresult;
    pub fn cuDeviceGet(device: *mut CUdevice, ordinal: i32) -> CUresult;
    pub fn cuDeviceGetAttribute(
        pi: *mut i32,
        attrib: CUdevice_attribute,
        device: CUdevice,
    ) -> CUresult;
    pub fn cuDeviceGetName(name: *mut c_char, len: i32, device: CUdevice) -> CUresult;
    pub fn cuCtxCreate_v2(context: *mut CUcontext, flags: u32, device: CUdevice) -> CUresult;
    pub fn cuCtxDestroy_v2(context: CUcontext) -> CUresult;
    pub fn cuMemAllocManaged(dptr: *mut CUdeviceptr, bytesize: usize, flags: u32) -> CUresult;
    pub fn cuMemFree_v2(ptr: CUdeviceptr) -> CUresult;
    pub fn cuMemsetD32Async(dst: CUdeviceptr, ui: u32, n: usize, stream: CUstream) -> CUresult;
    pub fn cuMemcpyDtoH_v2(dst_host: *mut c_void, src_device: CUdeviceptr, bytes: usize)
    -> CUresult;
    pub fn cuModuleLoadData(module: *mut CUmodule, data: *const c_void) -> CUresult;
    pub fn cuModuleGetFunction(
        hfunc: *mut CUfunction,
        module: CUmodule,
        name: *const c_char,
    ) -> CUresult;
    pub fn cuModuleUnload(module: CUmodule) -> CUresult;
    pub fn cuLaunchKernel(
        f: CUfunction,
        gridDimX: u32,
        gridDimY: u32,
        gridDimZ: u32,
        blockDimX: u32,
        blockDimY: u32,
        blockDimZ: u32,
        sharedMemBytes: u32,
        hStream: CUstream,
        kernelParams: *mut *mut c_void,
        extra: *mut *mut c_void,
    ) -> CUresult;
    pub fn cuStreamCreate(ph_stream: *mut CUstream, flags: u32) -> CUresult;
    pub fn cuStreamDestroy_v2(hstream: CUstream) -> CUresult;
    pub fn cuStreamSynchronize(stream: CUstream) -> CUresult;
}
