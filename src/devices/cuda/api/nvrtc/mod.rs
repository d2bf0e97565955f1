//! NVRTC ffi module

mod error;
mod ffi;

use std::{
    ffi::CString,
    os::raw::c_char,
    ptr::{null, null_mut},
};

pub use error::{NvrtcErrorKind, NvrtcResult};
pub use ffi::*;

use error::to_result;

/// A compileable nvrtc program. Dropping it destroys the program.
pub struct NvrtcProgram(pub nvrtcProgram);

impl NvrtcProgram {
    /// Compiles the nvrtc program.
    /// A failed compilation returns [`NvrtcErrorKind::Compilation`] carrying the program log.
    pub fn compile(&self, options: &[CString]) -> NvrtcResult<()> {
        compile_program(self, options)
    }

    /// Returns the runnable ptx
    pub fn ptx(&self) -> NvrtcResult<CString> {
        get_ptx(self)
    }

    pub fn log(&self) -> NvrtcResult<String> {
        get_log(self)
    }
}

impl Drop for NvrtcProgram {
    fn drop(&mut self) {
        unsafe { nvrtcDestroyProgram(&mut self.0) };
    }
}

/// creates a new compileable nvrtc program
pub fn create_program(src: &str, name: &str) -> crate::Result<NvrtcProgram> {
    let src = CString::new(src)?;
    let name = CString::new(name)?;

    let mut prog = NvrtcProgram(null_mut());
    to_result(unsafe {
        nvrtcCreateProgram(
            &mut prog.0,
            src.as_ptr(),
            name.as_ptr(),
            0,
            null(),
            null(),
        )
    })?;
    Ok(prog)
}

/// Compiles a nvrtc program
pub fn compile_program(prog: &NvrtcProgram, options: &[CString]) -> NvrtcResult<()> {
    let options = options
        .iter()
        .map(|option| option.as_ptr())
        .collect::<Vec<*const c_char>>();
    let value = unsafe { nvrtcCompileProgram(prog.0, options.len() as i32, options.as_ptr()) };

    if value == NVRTC_ERROR_COMPILATION {
        return Err(NvrtcErrorKind::Compilation(prog.log().unwrap_or_default()));
    }
    to_result(value)
}

fn nul_terminated(mut bytes: Vec<u8>) -> String {
    if let Some(end) = bytes.iter().position(|b| *b == 0) {
        bytes.truncate(end);
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Returns runnable ptx
pub fn get_ptx(prog: &NvrtcProgram) -> NvrtcResult<CString> {
    let mut ptx_size = 0;
    to_result(unsafe { nvrtcGetPTXSize(prog.0, &mut ptx_size) })?;

    let mut src: Vec<u8> = vec![0; ptx_size];
    to_result(unsafe { nvrtcGetPTX(prog.0, src.as_mut_ptr() as *mut c_char) })?;

    CString::new(nul_terminated(src)).map_err(|_| NvrtcErrorKind::InvalidProgram)
}

pub fn get_log(prog: &NvrtcProgram) -> NvrtcResult<String> {
    let mut log_size = 0;
    to_result(unsafe { nvrtcGetProgramLogSize(prog.0, &mut log_size) })?;

    let mut log: Vec<u8> = vec![0; log_size];
    to_result(unsafe { nvrtcGetProgramLog(prog.0, log.as_mut_ptr() as *mut c_char) })?;
    Ok(nul_terminated(log))
}

#[cfg(test)]
mod tests {
    use super::nul_terminated;

    #[test]
    fn test_nul_terminated() {
        assert_eq!(nul_terminated(b".version 7.0\n\0".to_vec()), ".version 7.0\n");
        assert_eq!(nul_terminated(b"log".to_vec()), "log");
    }
}
