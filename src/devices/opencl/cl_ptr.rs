use core::{ffi::c_void, marker::PhantomData, ptr::null_mut};

use min_cl::{
    CLDevice,
    api::{MemFlags, create_buffer, release_mem_object},
};

use crate::{DeviceError, Result};

/// The pointer used for `OpenCL` allocations.
/// The memory object is created with `CL_MEM_ALLOC_HOST_PTR`, so the driver backs it with host visible memory.
#[derive(Debug, PartialEq, Eq)]
pub struct CLPtr<T> {
    /// The pointer to the OpenCL memory object
    pub ptr: *mut c_void,
    /// The number of elements allocated
    pub len: usize,
    p: PhantomData<T>,
}

impl<T> Default for CLPtr<T> {
    #[inline]
    fn default() -> Self {
        Self {
            ptr: null_mut(),
            len: 0,
            p: PhantomData,
        }
    }
}

impl<T> CLPtr<T> {
    pub fn new_shared(device: &CLDevice, len: usize) -> Result<CLPtr<T>> {
        if len == 0 {
            return Err(DeviceError::InvalidDimensions.into());
        }
        let ptr = create_buffer::<T>(
            device.ctx(),
            MemFlags::MemReadWrite | MemFlags::MemAllocHostPtr,
            len,
            None,
        )?;
        Ok(CLPtr {
            ptr,
            len,
            p: PhantomData,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Drop for CLPtr<T> {
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }
        if let Err(e) = unsafe { release_mem_object(self.ptr) } {
            tracing::warn!("failed to release OpenCL buffer: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CLPtr;

    #[test]
    fn test_default_ptr_is_empty() {
        // dropping a null pointer must not reach the driver
        let ptr = CLPtr::<f32>::default();
        assert!(ptr.is_empty());
        assert!(ptr.ptr.is_null());
    }
}
