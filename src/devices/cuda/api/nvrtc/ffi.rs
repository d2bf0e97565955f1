#![allow(dead_code)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::os::raw::c_char;

pub enum _nvrtcProgram {}
pub type nvrtcProgram = *mut _nvrtcProgram;

/// An NVRTC status code, `NVRTC_SUCCESS` on success.
pub type nvrtcResult = u32;

pub const NVRTC_SUCCESS: nvrtcResult = 0;
pub const NVRTC_ERROR_COMPILATION: nvrtcResult = 6;

#[link(name = "nvrtc")]
unsafe extern "C" {
    pub fn nvrtcCreateProgram(
        prog: *mut nvrtcProgram,
        src: *const c_char,
        name: *const c_char,
        numHeaders: i32,
        headers: *const *const c_char,
        includeNames: *const *const c_char,
    ) -> nvrtcResult;
    pub fn nvrtcCompileProgram(
        prog: nvrtcProgram,
        numOptions: i32,
        options: *const *const c_char,
    ) -> nvrtcResult;
    pub fn nvrtcDestroyProgram(prog: *mut nvrtcProgram) -> nvrtcResult;
    pub fn nvrtcGetPTX(prog: nvrtcProgram, ptx: *mut c_char) -> nvrtcResult;
    pub fn nvrtcGetPTXSize(prog: nvrtcProgram, ptx_size: *mut usize) -> nvrtcResult;
    pub fn nvrtcGetProgramLog(prog: nvrtcProgram, log: *mut c_char) -> nvrtcResult;
    pub fn nvrtcGetProgramLogSize(prog: nvrtcProgram, log_size: *mut usize) -> nvrtcResult;
}
