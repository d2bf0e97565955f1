use std::collections::HashMap;

use super::{
    CUDA,
    api::{FnHandle, Module, load_module_data},
    compile_cuda_src_to_ptx,
};
use crate::Result;

/// This stores the previously compiled CUDA functions / kernels.
/// The loaded modules live as long as the cache.
#[derive(Debug, Default)]
pub struct KernelCacheCU {
    /// Uses the kernel source code and the kernel function to retrieve the corresponding `FnHandle`.
    pub kernels: HashMap<(String, String), FnHandle>,
    modules: Vec<Module>,
}

impl KernelCacheCU {
    /// Returns a cached kernel. If the kernel source code does not exist, a new kernel is created and cached.
    pub fn kernel(&mut self, src: &str, fn_name: &str) -> Result<FnHandle> {
        if let Some(kernel) = self.kernels.get(&(src.into(), fn_name.into())) {
            return Ok(*kernel);
        }

        tracing::debug!(kernel = fn_name, "compiling CUDA source with NVRTC");
        let ptx = compile_cuda_src_to_ptx(src, fn_name)?;
        let module = load_module_data(ptx)?;
        let function = module.function(fn_name)?;

        self.modules.push(module);
        self.kernels.insert((src.into(), fn_name.into()), function);
        Ok(function)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

/// Exactly like [`KernelCacheCU::kernel`], but with an immutable device using interior mutability.
pub fn fn_cache(device: &CUDA, src: &str, fn_name: &str) -> Result<FnHandle> {
    device.kernel_cache.borrow_mut().kernel(src, fn_name)
}
