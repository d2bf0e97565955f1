//! Device queries `CLDevice` has no accessor for.

use core::{ffi::c_void, mem::size_of, ptr::null_mut};

use min_cl::{
    CLDevice,
    api::{OCLErrorKind, clGetDeviceInfo},
};

use crate::Result;

const CL_DEVICE_MAX_WORK_GROUP_SIZE: u32 = 0x1004;
const CL_DEVICE_MAX_WORK_ITEM_SIZES: u32 = 0x1005;
const CL_DEVICE_NAME: u32 = 0x102B;

const CL_INVALID_VALUE: i32 = -30;

/// The raw bytes of the device info `param`.
pub fn device_info(device: &CLDevice, param: u32) -> Result<Vec<u8>> {
    let mut size = 0;
    let value = unsafe { clGetDeviceInfo(device.device.0, param, 0, null_mut(), &mut size) };
    if value != 0 {
        return Err(OCLErrorKind::from_value(value).into());
    }

    let mut data = vec![0u8; size];
    let value = unsafe {
        clGetDeviceInfo(
            device.device.0,
            param,
            size,
            data.as_mut_ptr() as *mut c_void,
            null_mut(),
        )
    };
    if value != 0 {
        return Err(OCLErrorKind::from_value(value).into());
    }
    Ok(data)
}

/// Reads a `size_t[]` device info value.
pub fn usizes_from_ne_bytes(data: &[u8]) -> Vec<usize> {
    data.chunks_exact(size_of::<usize>())
        .map(|chunk| {
            let mut bytes = [0u8; size_of::<usize>()];
            bytes.copy_from_slice(chunk);
            usize::from_ne_bytes(bytes)
        })
        .collect()
}

pub fn device_name(device: &CLDevice) -> Result<String> {
    let data = device_info(device, CL_DEVICE_NAME)?;
    Ok(String::from_utf8_lossy(&data)
        .trim_end_matches('\0')
        .to_string())
}

/// `CL_DEVICE_MAX_WORK_GROUP_SIZE`
pub fn max_work_group_size(device: &CLDevice) -> Result<usize> {
    let data = device_info(device, CL_DEVICE_MAX_WORK_GROUP_SIZE)?;
    usizes_from_ne_bytes(&data)
        .first()
        .copied()
        .ok_or_else(|| OCLErrorKind::from_value(CL_INVALID_VALUE).into())
}

/// The first two entries of `CL_DEVICE_MAX_WORK_ITEM_SIZES`.
pub fn max_work_item_sizes(device: &CLDevice) -> Result<[usize; 2]> {
    let data = device_info(device, CL_DEVICE_MAX_WORK_ITEM_SIZES)?;
    match usizes_from_ne_bytes(&data)[..] {
        [x, y, ..] => Ok([x, y]),
        _ => Err(OCLErrorKind::from_value(CL_INVALID_VALUE).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::usizes_from_ne_bytes;

    #[test]
    fn test_usizes_from_ne_bytes() {
        let sizes = [1024usize, 1024, 64];
        let bytes: Vec<u8> = sizes.iter().flat_map(|s| s.to_ne_bytes()).collect();
        assert_eq!(usizes_from_ne_bytes(&bytes), sizes);
        assert!(usizes_from_ne_bytes(&bytes[..3]).is_empty());
    }
}
