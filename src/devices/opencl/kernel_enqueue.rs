use core::{ffi::c_void, mem::size_of};

use min_cl::api::{OCLErrorKind, enqueue_nd_range_kernel, set_kernel_arg};

use super::{cl_device::OpenCL, cl_ptr::CLPtr};
use crate::Result;

/// Converts `Self` to a *const c_void.
/// This enables taking [`CLPtr`]s and scalars in one OpenCL kernel argument list.
pub trait AsClCvoidPtr {
    fn as_cvoid_ptr(&self) -> *const c_void;
    #[inline]
    fn is_num(&self) -> bool {
        false
    }
    #[inline]
    fn ptr_size(&self) -> usize {
        size_of::<*const c_void>()
    }
}

impl<T> AsClCvoidPtr for CLPtr<T> {
    #[inline]
    fn as_cvoid_ptr(&self) -> *const c_void {
        self.ptr
    }
}

macro_rules! impl_as_cl_cvoid_ptr {
    ($($t:ty),*) => {
        $(
            impl AsClCvoidPtr for $t {
                #[inline]
                fn as_cvoid_ptr(&self) -> *const c_void {
                    self as *const $t as *const c_void
                }

                #[inline]
                fn ptr_size(&self) -> usize {
                    size_of::<$t>()
                }

                #[inline]
                fn is_num(&self) -> bool {
                    true
                }
            }
        )*
    };
}

impl_as_cl_cvoid_ptr!(f32, f64, i32, u32, i64, u64);

/// Work dimension of a global work size. Trailing zeros mark unused dimensions.
pub fn work_dim(gws: &[usize; 3]) -> Result<usize> {
    match gws {
        [0, _, _] => Err(OCLErrorKind::InvalidGlobalWorkSize.into()),
        [_, 0, _] => Ok(1),
        [_, _, 0] => Ok(2),
        _ => Ok(3),
    }
}

/// Sets `args` in order and enqueues the kernel of `src` (built once per device).
pub fn enqueue_kernel(
    device: &OpenCL,
    src: &str,
    gws: [usize; 3],
    lws: Option<[usize; 3]>,
    args: &[&dyn AsClCvoidPtr],
) -> Result<()> {
    let wd = work_dim(&gws)?;

    let mut binding = device.kernel_cache.borrow_mut();
    let kernel = binding.kernel_cache(&device.device, src)?;

    for (idx, arg) in args.iter().enumerate() {
        set_kernel_arg(
            &kernel,
            idx,
            arg.as_cvoid_ptr(),
            arg.ptr_size(),
            arg.is_num(),
        )?;
    }
    enqueue_nd_range_kernel(device.queue(), &kernel, wd, &gws, lws.as_ref(), None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AsClCvoidPtr, CLPtr, work_dim};

    #[test]
    fn test_work_dim() {
        assert_eq!(work_dim(&[16, 0, 0]).unwrap(), 1);
        assert_eq!(work_dim(&[16, 4, 0]).unwrap(), 2);
        assert_eq!(work_dim(&[16, 4, 2]).unwrap(), 3);
        assert!(work_dim(&[0, 4, 2]).is_err());
    }

    #[test]
    fn test_arg_sizes() {
        let width = 768i32;
        assert!(width.is_num());
        assert_eq!(width.ptr_size(), 4);
        assert_eq!(2.5f64.ptr_size(), 8);

        let buf = CLPtr::<f32>::default();
        assert!(!buf.is_num());
        assert_eq!(buf.ptr_size(), size_of::<*const core::ffi::c_void>());
    }
}
