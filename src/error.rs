pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = core::result::Result<T, Error>;

pub trait ErrorKind {
    fn kind<E: std::error::Error + PartialEq + 'static>(&self) -> Option<&E>;
}

impl ErrorKind for Error {
    fn kind<E: std::error::Error + PartialEq + 'static>(&self) -> Option<&E> {
        self.downcast_ref::<E>()
    }
}

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DeviceError {
    InvalidDimensions,
    InvalidGroupSize,
    GroupSizeExceedsDevice,
    NoIterations,
    LengthMismatch,
    InvalidDeviceIdx,
    UnknownDeviceKind,
    BackendNotEnabled,
}

impl DeviceError {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceError::InvalidDimensions => {
                "Width and height must be non-zero and fit into a C int."
            }
            DeviceError::InvalidGroupSize => "Both group dimensions must be non-zero.",
            DeviceError::GroupSizeExceedsDevice => {
                "The work-group holds more threads than the device supports."
            }
            DeviceError::NoIterations => "At least one iteration is required.",
            DeviceError::LengthMismatch => "Result and reference differ in length.",
            DeviceError::InvalidDeviceIdx => {
                "The device index environment variable does not contain a valid index."
            }
            DeviceError::UnknownDeviceKind => {
                "Unknown device kind. Expected one of: cpu, opencl, cuda."
            }
            DeviceError::BackendNotEnabled => {
                "This backend was not compiled in. Enable the matching cargo feature."
            }
        }
    }
}

impl core::fmt::Debug for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for DeviceError {}
