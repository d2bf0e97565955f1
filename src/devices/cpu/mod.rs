//! The CPU module provides the host backend.

mod cpu_device;
mod cpu_ptr;

pub use cpu_device::*;
pub use cpu_ptr::*;
