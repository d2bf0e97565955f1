use std::ffi::CString;

use super::api::nvrtc::create_program;
use crate::Result;

/// Compiles CUDA C source to PTX with NVRTC. The program log is part of the error on failure.
pub fn compile_cuda_src_to_ptx(src: &str, name: &str) -> Result<CString> {
    let program = create_program(src, name)?;
    program.compile(&[])?;
    Ok(program.ptx()?)
}
