use super::ffi::{CUDA_SUCCESS, CUresult};

pub type CudaResult<T> = std::result::Result<T, CudaErrorKind>;

/// Converts a driver status code into a [`CudaResult`].
#[inline]
pub fn to_result(value: CUresult) -> CudaResult<()> {
    if value == CUDA_SUCCESS {
        return Ok(());
    }
    Err(CudaErrorKind::from(value))
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum CudaErrorKind {
    InvalidAllocSize,
    InvalidDeviceIdx,
    InvalidValue,
    OutOfMemory,
    NotInitialized,
    Deinitialized,
    NoDevice,
    InvalidDevice,
    InvalidImage,
    InvalidContext,
    NoBinaryForGPU,
    InvalidPTX,
    JITCompilerNotFound,
    InvalidSource,
    InvalidHandle,
    NotFound,
    NotReady,
    IllegalAddress,
    LaunchOutOfResources,
    LaunchTimeout,
    LaunchFailed,
    NotSupported,
    Unknown(u32),
}

impl CudaErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CudaErrorKind::InvalidAllocSize => "Cannot allocate zero bytes",
            CudaErrorKind::InvalidDeviceIdx => "Invalid device idx, specific CUDA device not found",
            CudaErrorKind::InvalidValue => "One or more parameters are out of range",
            CudaErrorKind::OutOfMemory => "The device ran out of memory",
            CudaErrorKind::NotInitialized => "The CUDA driver was not initialized",
            CudaErrorKind::Deinitialized => "The CUDA driver is shutting down",
            CudaErrorKind::NoDevice => "No CUDA capable device was found",
            CudaErrorKind::InvalidDevice => "Invalid CUDA device",
            CudaErrorKind::InvalidImage => "The module image is invalid",
            CudaErrorKind::InvalidContext => "No valid context is current",
            CudaErrorKind::NoBinaryForGPU => "No kernel image is available for the device",
            CudaErrorKind::InvalidPTX => "The PTX failed to compile",
            CudaErrorKind::JITCompilerNotFound => "The PTX JIT compiler library was not found",
            CudaErrorKind::InvalidSource => "The kernel source is invalid",
            CudaErrorKind::InvalidHandle => "Invalid resource handle",
            CudaErrorKind::NotFound => "A named symbol was not found",
            CudaErrorKind::NotReady => "Asynchronous work has not completed yet",
            CudaErrorKind::IllegalAddress => "The kernel accessed an illegal address",
            CudaErrorKind::LaunchOutOfResources => "Too many resources requested for launch",
            CudaErrorKind::LaunchTimeout => "The kernel launch timed out",
            CudaErrorKind::LaunchFailed => "The kernel launch failed",
            CudaErrorKind::NotSupported => "The operation is not supported on this device",
            CudaErrorKind::Unknown(_) => "Unknown CUDA error",
        }
    }
}

impl From<u32> for CudaErrorKind {
    fn from(value: u32) -> Self {
        match value {
            1 => CudaErrorKind::InvalidValue,
            2 => CudaErrorKind::OutOfMemory,
            3 => CudaErrorKind::NotInitialized,
            4 => CudaErrorKind::Deinitialized,
            100 => CudaErrorKind::NoDevice,
            101 => CudaErrorKind::InvalidDevice,
            200 => CudaErrorKind::InvalidImage,
            201 => CudaErrorKind::InvalidContext,
            209 => CudaErrorKind::NoBinaryForGPU,
            218 => CudaErrorKind::InvalidPTX,
            221 => CudaErrorKind::JITCompilerNotFound,
            300 => CudaErrorKind::InvalidSource,
            400 => CudaErrorKind::InvalidHandle,
            500 => CudaErrorKind::NotFound,
            600 => CudaErrorKind::NotReady,
            700 => CudaErrorKind::IllegalAddress,
            701 => CudaErrorKind::LaunchOutOfResources,
            702 => CudaErrorKind::LaunchTimeout,
            719 => CudaErrorKind::LaunchFailed,
            801 => CudaErrorKind::NotSupported,
            value => CudaErrorKind::Unknown(value),
        }
    }
}

impl core::fmt::Debug for CudaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl core::fmt::Display for CudaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CudaErrorKind::Unknown(code) => write!(f, "{} ({code})", self.as_str()),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

impl std::error::Error for CudaErrorKind {}
