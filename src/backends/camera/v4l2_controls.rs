// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 camera control interface
//!
//! Just enough of the V4L2 control ioctls to switch a camera into automatic
//! exposure and automatic focus after the capture format is negotiated.
//! Controls are reached through a separate file descriptor, which V4L2
//! permits alongside the streaming handle.

use super::types::{BackendError, BackendResult};
use std::fs::File;
use std::os::unix::io::AsRawFd;
use tracing::{debug, info, warn};

const V4L2_CTRL_CLASS_CAMERA: u32 = 0x009a0000;
const V4L2_CID_CAMERA_CLASS_BASE: u32 = V4L2_CTRL_CLASS_CAMERA | 0x900;

/// Exposure mode: Auto, Manual, Shutter Priority, Aperture Priority
pub const V4L2_CID_EXPOSURE_AUTO: u32 = V4L2_CID_CAMERA_CLASS_BASE + 1;
/// Auto focus enable
pub const V4L2_CID_FOCUS_AUTO: u32 = V4L2_CID_CAMERA_CLASS_BASE + 12;

/// Automatic exposure time and iris
pub const V4L2_EXPOSURE_AUTO: i32 = 0;
/// Auto exposure time, manual iris (the only auto mode most UVC cameras offer)
pub const V4L2_EXPOSURE_APERTURE_PRIORITY: i32 = 3;

const V4L2_CTRL_FLAG_DISABLED: u32 = 0x0001;

// Calculated as: (dir << 30) | (size << 16) | ('V' << 8) | nr
/// Set control value (v4l2_control: 8 bytes)
const VIDIOC_S_CTRL: libc::c_ulong = 0xC008561C;
/// Query control info (v4l2_queryctrl: 68 bytes)
const VIDIOC_QUERYCTRL: libc::c_ulong = 0xC0445624;

#[repr(C)]
struct V4l2Control {
    id: u32,
    value: i32,
}

#[repr(C)]
struct V4l2Queryctrl {
    id: u32,
    ctrl_type: u32,
    name: [u8; 32],
    minimum: i32,
    maximum: i32,
    step: i32,
    default_value: i32,
    flags: u32,
    reserved: [u32; 2],
}

/// Check if a control is available (present and not disabled) on the device
pub fn has_control(device_path: &str, control_id: u32) -> bool {
    let Ok(file) = File::open(device_path) else {
        return false;
    };

    let mut qctrl = V4l2Queryctrl {
        id: control_id,
        ctrl_type: 0,
        name: [0; 32],
        minimum: 0,
        maximum: 0,
        step: 0,
        default_value: 0,
        flags: 0,
        reserved: [0; 2],
    };

    let result = unsafe {
        libc::ioctl(
            file.as_raw_fd(),
            VIDIOC_QUERYCTRL as _,
            &mut qctrl as *mut V4l2Queryctrl,
        )
    };

    result >= 0 && qctrl.flags & V4L2_CTRL_FLAG_DISABLED == 0
}

/// Set value of a control
pub fn set_control(device_path: &str, control_id: u32, value: i32) -> BackendResult<()> {
    let file = File::open(device_path)?;

    let mut ctrl = V4l2Control {
        id: control_id,
        value,
    };

    let result = unsafe {
        libc::ioctl(
            file.as_raw_fd(),
            VIDIOC_S_CTRL as _,
            &mut ctrl as *mut V4l2Control,
        )
    };

    if result < 0 {
        let errno = std::io::Error::last_os_error();
        debug!(device_path, control_id, value, ?errno, "Failed to set V4L2 control");
        return Err(BackendError::IoError(errno.to_string()));
    }

    Ok(())
}

/// Switch the camera to automatic exposure
///
/// Tries full auto first, then aperture priority. Returns whether either
/// mode was accepted.
pub fn enable_auto_exposure(device_path: &str) -> bool {
    if !has_control(device_path, V4L2_CID_EXPOSURE_AUTO) {
        debug!(device_path, "Device has no exposure mode control");
        return false;
    }

    for mode in [V4L2_EXPOSURE_AUTO, V4L2_EXPOSURE_APERTURE_PRIORITY] {
        if set_control(device_path, V4L2_CID_EXPOSURE_AUTO, mode).is_ok() {
            info!(device_path, mode, "Automatic exposure enabled");
            return true;
        }
    }

    warn!(device_path, "Device rejected every automatic exposure mode");
    false
}

/// Switch the camera to continuous automatic focus
pub fn enable_auto_focus(device_path: &str) -> bool {
    if !has_control(device_path, V4L2_CID_FOCUS_AUTO) {
        debug!(device_path, "Device has no autofocus control");
        return false;
    }

    match set_control(device_path, V4L2_CID_FOCUS_AUTO, 1) {
        Ok(()) => {
            info!(device_path, "Automatic focus enabled");
            true
        }
        Err(e) => {
            warn!(device_path, error = %e, "Device rejected automatic focus");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_id_values() {
        assert_eq!(V4L2_CID_EXPOSURE_AUTO, 0x009a0901);
        assert_eq!(V4L2_CID_FOCUS_AUTO, 0x009a090c);
    }

    #[test]
    fn test_missing_device_has_no_controls() {
        assert!(!has_control("/nonexistent/video99", V4L2_CID_FOCUS_AUTO));
        assert!(!enable_auto_focus("/nonexistent/video99"));
    }
}
