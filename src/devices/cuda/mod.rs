//! The CUDA module provides the CUDA backend for the noise benchmark.
//!
//! Kernels are compiled at runtime with NVRTC. The image lives in managed memory.

pub mod api;

mod cuda_device;
mod cuda_ptr;
mod kernel_cache;
mod kernel_launch;
mod source;

pub use cuda_device::*;
pub use cuda_ptr::*;
pub use kernel_cache::*;
pub use kernel_launch::*;
pub use source::*;

/// Type alias for `core::ffi::c_ulonglong`. Used for CUDA memory object pointers.
pub use api::CUdeviceptr;
