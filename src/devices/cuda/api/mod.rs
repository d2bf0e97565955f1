//! CUDA driver API

mod cuda;
mod error;
mod ffi;

pub(crate) mod nvrtc;

pub use cuda::*;
pub use error::*;
pub use ffi::*;
