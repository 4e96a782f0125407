// SPDX-License-Identifier: GPL-3.0-only

//! Live preview frame pump
//!
//! [`CaptureContext`] owns the capture session and every frame buffer. Each
//! timer tick calls [`CaptureContext::pump`], which runs one frame through
//! latch, decode, resize and colour conversion, then copies the result into
//! the [`DisplayBuffer`]. A latch or decode failure stops the pump for good;
//! the display buffer keeps the last good frame.

use crate::backends::camera::format_converters::packed_to_rgba_into;
use crate::backends::camera::{
    BackendError, BackendResult, CaptureDevice, NegotiatedFormat, RawFrame, Resolution,
};
use crate::constants::FRAME_LOG_INTERVAL;
use crate::errors::CameraError;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// The frame currently shown, as RGBA at the negotiated resolution
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    resolution: Resolution,
    pixels: Vec<u8>,
    filled: bool,
}

impl DisplayBuffer {
    /// Allocate a blank buffer for `resolution`
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            pixels: vec![0; resolution.pixel_count() * 4],
            filled: false,
        }
    }

    /// True until the first frame has been copied in
    pub fn is_empty(&self) -> bool {
        !self.filled
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn copy_from(&mut self, rgba: &[u8]) {
        self.pixels.copy_from_slice(rgba);
        self.filled = true;
    }
}

/// What a single pump call did
#[derive(Debug)]
pub enum TickOutcome {
    /// A new frame is in the display buffer
    Rendered,
    /// The pump was already stopped; nothing happened
    Skipped,
    /// This tick failed and the pump is now stopped
    Stopped(CameraError),
}

/// Capture session plus the buffers the pump works through
pub struct CaptureContext {
    device: Option<Box<dyn CaptureDevice>>,
    format: NegotiatedFormat,
    /// Last decoded frame in device channel order
    raw: Option<RawFrame>,
    /// RGBA conversion target, copied into `display` once complete
    staging: Vec<u8>,
    display: DisplayBuffer,
    stopped: bool,
    frames: u64,
    started_at: Option<Instant>,
}

impl CaptureContext {
    /// Take ownership of an open session that negotiated `format`
    pub fn new(device: Box<dyn CaptureDevice>, format: NegotiatedFormat) -> Self {
        Self {
            device: Some(device),
            format,
            raw: None,
            staging: Vec::with_capacity(format.resolution.pixel_count() * 4),
            display: DisplayBuffer::new(format.resolution),
            stopped: false,
            frames: 0,
            started_at: None,
        }
    }

    /// A context without a session; it starts out stopped
    pub fn detached(format: NegotiatedFormat) -> Self {
        Self {
            device: None,
            format,
            raw: None,
            staging: Vec::new(),
            display: DisplayBuffer::new(format.resolution),
            stopped: true,
            frames: 0,
            started_at: None,
        }
    }

    pub fn format(&self) -> NegotiatedFormat {
        self.format
    }

    pub fn frame_interval(&self) -> Duration {
        self.format.frame_interval()
    }

    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Most recently decoded frame, before resizing
    pub fn raw_frame(&self) -> Option<&RawFrame> {
        self.raw.as_ref()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn has_session(&self) -> bool {
        self.device.is_some()
    }

    /// Frames rendered so far
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Run one frame through the pipeline
    pub fn pump(&mut self) -> TickOutcome {
        if self.stopped {
            return TickOutcome::Skipped;
        }

        let Some(device) = self.device.as_mut() else {
            return self.stop_with(CameraError::Capture(BackendError::Released));
        };

        if let Err(e) = device.grab() {
            return self.stop_with(CameraError::Capture(e));
        }

        let frame = match device.retrieve() {
            Ok(frame) => frame,
            Err(e) => return self.stop_with(CameraError::Decode(e)),
        };

        if let Err(e) = self.render(frame) {
            return self.stop_with(CameraError::Decode(e));
        }

        self.frames += 1;
        let started_at = *self.started_at.get_or_insert_with(Instant::now);
        if self.frames.is_multiple_of(FRAME_LOG_INTERVAL) {
            let elapsed = started_at.elapsed().as_secs_f64().max(f64::EPSILON);
            info!(
                frames = self.frames,
                fps = self.frames as f64 / elapsed,
                "Preview running"
            );
        }

        TickOutcome::Rendered
    }

    /// Resize and convert a decoded frame, then publish it to the display
    fn render(&mut self, frame: RawFrame) -> BackendResult<()> {
        if !frame.is_well_formed() {
            return Err(BackendError::DecodeFailed(format!(
                "{} frame carries {} bytes",
                frame.resolution(),
                frame.data.len()
            )));
        }

        let target = self.format.resolution;
        let order = frame.order;
        let frame = self.raw.insert(frame);

        if frame.resolution() == target {
            packed_to_rgba_into(&frame.data, order, &mut self.staging);
        } else {
            let source: ImageBuffer<Rgb<u8>, &[u8]> =
                ImageBuffer::from_raw(frame.width, frame.height, frame.data.as_slice())
                    .ok_or_else(|| {
                        BackendError::DecodeFailed("frame buffer too small".to_string())
                    })?;
            let resized = imageops::resize(&source, target.width, target.height, FilterType::Triangle);
            packed_to_rgba_into(resized.as_raw(), order, &mut self.staging);
        }

        self.display.copy_from(&self.staging);
        Ok(())
    }

    fn stop_with(&mut self, err: CameraError) -> TickOutcome {
        error!(error = %err, frames = self.frames, "Frame pump stopped");
        self.stopped = true;
        TickOutcome::Stopped(err)
    }

    /// Stop the pump without releasing the session
    pub fn stop(&mut self) {
        if !self.stopped {
            debug!(frames = self.frames, "Frame pump stopped");
        }
        self.stopped = true;
    }

    /// Stop the pump and release the session
    ///
    /// Returns whether a session was released; later calls return `false`.
    pub fn shutdown(&mut self) -> bool {
        self.stop();
        match self.device.take() {
            Some(device) => {
                info!(device = device.name(), "Releasing capture session");
                drop(device);
                true
            }
            None => false,
        }
    }
}
