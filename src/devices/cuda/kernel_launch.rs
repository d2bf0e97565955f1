use std::ffi::c_void;

use super::{CUDA, CUDAPtr, api::culaunch_kernel, fn_cache};
use crate::Result;

/// Converts `self` into the pointer `cuLaunchKernel` expects for one kernel argument.
pub trait AsCudaCvoidPtr {
    fn as_cvoid_ptr(&self) -> *mut c_void;
}

impl<T> AsCudaCvoidPtr for CUDAPtr<T> {
    #[inline]
    fn as_cvoid_ptr(&self) -> *mut c_void {
        &self.ptr as *const u64 as *mut c_void
    }
}

macro_rules! impl_as_cuda_cvoid_ptr {
    ($($t:ty),*) => {
        $(
            impl AsCudaCvoidPtr for $t {
                #[inline]
                fn as_cvoid_ptr(&self) -> *mut c_void {
                    self as *const $t as *mut c_void
                }
            }
        )*
    };
}

impl_as_cuda_cvoid_ptr!(f32, f64, i32, u32, i64, u64);

/// Launches the cached kernel `fn_name` of `src` on the device's stream.
pub fn launch_kernel(
    device: &CUDA,
    grid: [u32; 3],
    blocks: [u32; 3],
    src: &str,
    fn_name: &str,
    args: &[&dyn AsCudaCvoidPtr],
) -> Result<()> {
    let params = args
        .iter()
        .map(|arg| arg.as_cvoid_ptr())
        .collect::<Vec<_>>();

    let func = fn_cache(device, src, fn_name)?;
    culaunch_kernel(&func, grid, blocks, 0, device.stream(), &params)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::AsCudaCvoidPtr;

    #[test]
    fn test_scalar_args_point_at_the_value() {
        let width = 768i32;
        let x0 = -10f32;
        unsafe {
            assert_eq!(*(width.as_cvoid_ptr() as *const i32), 768);
            assert_eq!(*(x0.as_cvoid_ptr() as *const f32), -10.);
        }
    }
}
