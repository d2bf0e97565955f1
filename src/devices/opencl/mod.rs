//! The OpenCL module provides the OpenCL backend for the noise benchmark.
//!
//! The image buffer is allocated with `CL_MEM_ALLOC_HOST_PTR`, so drivers of integrated devices
//! can place it in memory shared with the host.

pub use cl_device::{CL, OpenCL};
pub use kernel_enqueue::*;

mod cl_device;
mod cl_ptr;
mod info;
mod kernel_enqueue;

pub use cl_ptr::*;
pub use info::*;

pub use min_cl::*;
