use super::ffi::{NVRTC_SUCCESS, nvrtcResult};

pub type NvrtcResult<T> = std::result::Result<T, NvrtcErrorKind>;

#[inline]
pub fn to_result(value: nvrtcResult) -> NvrtcResult<()> {
    if value == NVRTC_SUCCESS {
        return Ok(());
    }
    Err(NvrtcErrorKind::from(value))
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum NvrtcErrorKind {
    OutOfMemory,
    ProgramCreationFailure,
    InvalidInput,
    InvalidProgram,
    InvalidOption,
    /// The program failed to compile. Holds the NVRTC program log.
    Compilation(String),
    BuiltinOperationFailure,
    InternalError,
    Unknown(u32),
}

impl NvrtcErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NvrtcErrorKind::OutOfMemory => "NVRTC ran out of memory",
            NvrtcErrorKind::ProgramCreationFailure => "Failed to create the NVRTC program",
            NvrtcErrorKind::InvalidInput => "Invalid input passed to NVRTC",
            NvrtcErrorKind::InvalidProgram => "Invalid NVRTC program",
            NvrtcErrorKind::InvalidOption => "Invalid NVRTC compile option",
            NvrtcErrorKind::Compilation(_) => "Failed to compile the CUDA source",
            NvrtcErrorKind::BuiltinOperationFailure => "An NVRTC builtin operation failed",
            NvrtcErrorKind::InternalError => "Internal NVRTC error",
            NvrtcErrorKind::Unknown(_) => "Unknown NVRTC error",
        }
    }
}

impl From<u32> for NvrtcErrorKind {
    fn from(value: u32) -> Self {
        match value {
            1 => NvrtcErrorKind::OutOfMemory,
            2 => NvrtcErrorKind::ProgramCreationFailure,
            3 => NvrtcErrorKind::InvalidInput,
            4 => NvrtcErrorKind::InvalidProgram,
            5 => NvrtcErrorKind::InvalidOption,
            6 => NvrtcErrorKind::Compilation(String::new()),
            7 => NvrtcErrorKind::BuiltinOperationFailure,
            11 => NvrtcErrorKind::InternalError,
            value => NvrtcErrorKind::Unknown(value),
        }
    }
}

impl core::fmt::Debug for NvrtcErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl core::fmt::Display for NvrtcErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NvrtcErrorKind::Compilation(log) if !log.is_empty() => {
                write!(f, "{}:\n{log}", self.as_str())
            }
            NvrtcErrorKind::Unknown(code) => write!(f, "{} ({code})", self.as_str()),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

impl std::error::Error for NvrtcErrorKind {}

#[cfg(test)]
mod tests {
    use super::{NvrtcErrorKind, to_result};

    #[test]
    fn test_codes() {
        assert!(to_result(0).is_ok());
        assert_eq!(to_result(5), Err(NvrtcErrorKind::InvalidOption));
        assert_eq!(to_result(77), Err(NvrtcErrorKind::Unknown(77)));
    }

    #[test]
    fn test_compilation_error_shows_log() {
        let err = NvrtcErrorKind::Compilation("error: expected a \";\"".into());
        assert!(err.to_string().ends_with("error: expected a \";\""));
    }
}
