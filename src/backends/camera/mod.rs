// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! A capture session is anything implementing [`CaptureDevice`]. The
//! application drives it in two phases:
//!
//! ```text
//! ┌──────────────────────┐
//! │  probe::negotiate()  │  ← request / read back, one candidate at a time
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐
//! │  grab() + retrieve() │  ← once per preview tick
//! └──────────────────────┘
//! ```
//!
//! Requests are advisory: a device may silently substitute the nearest mode
//! it supports, so callers always read the applied value back.

pub mod format_converters;
pub mod probe;
pub mod types;
pub mod v4l2;
pub mod v4l2_controls;

pub use probe::NegotiatedFormat;
pub use types::*;
pub use v4l2::V4l2Camera;

/// Which automatic controls the device accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoControls {
    pub exposure: bool,
    pub focus: bool,
}

/// An open capture session with one physical device
///
/// Dropping the session releases the device.
pub trait CaptureDevice: Send {
    /// Human-readable device name for logs
    fn name(&self) -> &str;

    /// Ask the device for a frame size. The device may substitute another.
    fn request_resolution(&mut self, resolution: Resolution);

    /// Frame size the device is currently configured for
    fn resolution(&self) -> Resolution;

    /// Ask the device for a frame rate. The device may substitute another.
    fn request_frame_rate(&mut self, fps: f64);

    /// Frame rate the device is currently configured for
    fn frame_rate(&self) -> f64;

    /// Turn on automatic exposure and focus where the device has them
    fn enable_auto_controls(&mut self) -> AutoControls {
        AutoControls::default()
    }

    /// Latch the next frame from the device
    fn grab(&mut self) -> BackendResult<()>;

    /// Decode the most recently latched frame
    fn retrieve(&mut self) -> BackendResult<RawFrame>;
}
