use core::marker::PhantomData;

use super::api::{CUdeviceptr, cufree, cumalloc_managed};
use crate::Result;

/// The pointer used for `CUDA` allocations.
/// The memory is allocated with `cuMemAllocManaged`, so host and device share one address.
#[derive(Debug, PartialEq, Eq)]
pub struct CUDAPtr<T> {
    /// The pointer to the CUDA memory object.
    pub ptr: CUdeviceptr,
    /// The number of elements addressable
    pub len: usize,
    p: PhantomData<T>,
}

impl<T> CUDAPtr<T> {
    pub fn new_managed(len: usize) -> Result<CUDAPtr<T>> {
        let ptr = cumalloc_managed::<T>(len)?;
        Ok(CUDAPtr {
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

impl<T> Drop for CUDAPtr<T> {
    fn drop(&mut self) {
        if self.ptr == 0 {
            return;
        }
        if let Err(e) = unsafe { cufree(self.ptr) } {
            tracing::warn!("failed to free CUDA memory: {e}");
        }
    }
}
