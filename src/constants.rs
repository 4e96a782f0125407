// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use crate::backends::camera::{PixelFormat, Resolution};
use std::time::Duration;

/// Resolutions to probe, highest first
pub const RESOLUTION_CANDIDATES: [Resolution; 7] = [
    Resolution::new(3840, 2160),
    Resolution::new(2560, 1440),
    Resolution::new(1920, 1080),
    Resolution::new(1280, 720),
    Resolution::new(1280, 960),
    Resolution::new(800, 600),
    Resolution::new(640, 480),
];

/// Frame rates to probe, highest first
pub const FRAME_RATE_CANDIDATES: [f64; 7] = [60.0, 50.0, 30.0, 25.0, 24.0, 15.0, 10.0];

/// A frame rate read-back strictly closer than this to the request is accepted
pub const FRAME_RATE_TOLERANCE: f64 = 1.0;

/// Assumed frame size before probing
pub const DEFAULT_RESOLUTION: Resolution = Resolution::new(640, 480);

/// Assumed frame rate before probing, and the pump rate when the device
/// reports none
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Pixel formats the capture session accepts, most preferred first
pub const PREFERRED_PIXEL_FORMATS: [PixelFormat; 4] = [
    PixelFormat::Mjpeg,
    PixelFormat::Yuyv,
    PixelFormat::Bgr24,
    PixelFormat::Rgb24,
];

/// Camera opened at startup (`/dev/video0`)
pub const DEFAULT_DEVICE_INDEX: usize = 0;

/// Number of mmap buffers queued with the driver
pub const CAPTURE_BUFFER_COUNT: u32 = 4;

/// Log pump statistics once every this many frames
pub const FRAME_LOG_INTERVAL: u64 = 30;

/// Snapshot file name prefix, followed by Unix seconds
pub const SNAPSHOT_PREFIX: &str = "screenshot_";

/// Snapshot file extension
pub const SNAPSHOT_EXTENSION: &str = "png";

/// Process exit code when the camera cannot be opened at startup
pub const EXIT_CAMERA_UNAVAILABLE: u8 = 2;

/// Frame interval for a given rate, falling back to [`DEFAULT_FRAME_RATE`]
/// when the rate is zero or not finite
pub fn frame_interval(fps: f64) -> Duration {
    let fps = if fps.is_finite() && fps > 0.0 {
        fps
    } else {
        DEFAULT_FRAME_RATE
    };
    Duration::from_secs_f64(1.0 / fps)
}

/// UI layout constants
pub mod ui {
    /// Height of the control bar below the preview
    pub const CONTROL_BAR_HEIGHT: f32 = 30.0;

    /// Snapshot button width
    pub const SNAPSHOT_BUTTON_WIDTH: f32 = 100.0;

    /// Snapshot button height, fits inside the control bar
    pub const SNAPSHOT_BUTTON_HEIGHT: f32 = 25.0;

    /// Smallest window the layout still works in
    pub const MIN_WINDOW_WIDTH: f32 = 320.0;
    pub const MIN_WINDOW_HEIGHT: f32 = 240.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_from_rate() {
        assert_eq!(frame_interval(50.0), Duration::from_millis(20));
    }

    #[test]
    fn test_frame_interval_ignores_bogus_rate() {
        let fallback = frame_interval(DEFAULT_FRAME_RATE);
        assert_eq!(frame_interval(0.0), fallback);
        assert_eq!(frame_interval(f64::NAN), fallback);
        assert_eq!(frame_interval(-5.0), fallback);
    }
}
