use core::{
    alloc::Layout,
    mem::size_of,
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

use std::alloc::handle_alloc_error;

use crate::{DeviceError, Result};

/// Host allocations start on a page boundary, like the shared allocations of GPU drivers.
pub const PAGE_SIZE: usize = 4096;

/// Page aligned host memory used by the [`CPU`](super::CPU) device.
#[derive(Debug)]
pub struct CPUPtr<T> {
    /// The pointer to the data
    pub ptr: NonNull<T>,
    /// The length of the data
    pub len: usize,
}

unsafe impl<T: Send> Send for CPUPtr<T> {}
unsafe impl<T: Sync> Sync for CPUPtr<T> {}

impl<T: Copy> CPUPtr<T> {
    /// Allocates `len` elements, all set to `value`.
    ///
    /// # Example
    /// ```
    /// use noise_bench::cpu::CPUPtr;
    ///
    /// let ptr = CPUPtr::new_filled(10, -1f32).unwrap();
    /// assert_eq!(ptr.len, 10);
    /// assert_eq!(&*ptr, &[-1.; 10]);
    /// assert_eq!(ptr.ptr.as_ptr() as usize % 4096, 0);
    /// ```
    pub fn new_filled(len: usize, value: T) -> Result<CPUPtr<T>> {
        let layout = Self::layout(len)?;
        let ptr = unsafe { std::alloc::alloc(layout) };

        let Some(ptr) = NonNull::new(ptr.cast::<T>()) else {
            handle_alloc_error(layout);
        };

        // initialize block of memory
        for idx in 0..len {
            unsafe { ptr.as_ptr().add(idx).write(value) };
        }

        Ok(CPUPtr { ptr, len })
    }
}

impl<T> CPUPtr<T> {
    fn layout(len: usize) -> Result<Layout> {
        if len == 0 || size_of::<T>() == 0 {
            return Err(DeviceError::InvalidDimensions.into());
        }
        let bytes = len
            .checked_mul(size_of::<T>())
            .ok_or(DeviceError::InvalidDimensions)?;
        Ok(Layout::from_size_align(bytes, PAGE_SIZE)?)
    }
}

impl<T> Deref for CPUPtr<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for CPUPtr<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> Drop for CPUPtr<T> {
    fn drop(&mut self) {
        // the layout was valid when the memory was allocated
        if let Ok(layout) = Self::layout(self.len) {
            unsafe { std::alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}
