// SPDX-License-Identifier: MPL-2.0

//! Scripted in-memory camera shared by the integration tests
#![allow(dead_code)]

use camview::backends::camera::{
    BackendError, BackendResult, CaptureDevice, ChannelOrder, RawFrame, Resolution,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Call counters that stay readable after the camera is boxed away
#[derive(Debug, Clone, Default)]
pub struct Counters {
    grabs: Arc<AtomicUsize>,
    retrieves: Arc<AtomicUsize>,
    drops: Arc<AtomicUsize>,
}

impl Counters {
    pub fn grabs(&self) -> usize {
        self.grabs.load(Ordering::SeqCst)
    }

    pub fn retrieves(&self) -> usize {
        self.retrieves.load(Ordering::SeqCst)
    }

    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

/// Camera whose mode negotiation and frame delivery follow a script
pub struct ScriptedCamera {
    resolution: Resolution,
    fps: f64,
    resolution_rule: Box<dyn Fn(Resolution) -> Option<Resolution> + Send>,
    fps_rule: Box<dyn Fn(f64) -> Option<f64> + Send>,
    /// Size of delivered frames; defaults to the configured resolution
    frame_size: Option<Resolution>,
    pixel: [u8; 3],
    order: ChannelOrder,
    /// Ticks that succeed before grab or retrieve starts failing
    grab_budget: Option<usize>,
    retrieve_budget: Option<usize>,
    pub requested_resolutions: Vec<Resolution>,
    pub requested_rates: Vec<f64>,
    counters: Counters,
}

impl ScriptedCamera {
    /// Starts at 640x480 @ 30 and accepts every request as-is
    pub fn new() -> Self {
        Self {
            resolution: Resolution::new(640, 480),
            fps: 30.0,
            resolution_rule: Box::new(|r: Resolution| Some(r)),
            fps_rule: Box::new(|fps: f64| Some(fps)),
            frame_size: None,
            pixel: [0, 0, 255],
            order: ChannelOrder::Bgr,
            grab_budget: None,
            retrieve_budget: None,
            requested_resolutions: Vec::new(),
            requested_rates: Vec::new(),
            counters: Counters::default(),
        }
    }

    /// Apply only the listed resolutions; other requests leave the mode as is
    pub fn supporting_resolutions(mut self, supported: &[Resolution]) -> Self {
        let supported = supported.to_vec();
        self.resolution_rule = Box::new(move |r: Resolution| supported.contains(&r).then_some(r));
        self
    }

    /// Map each requested resolution to the one the device applies
    pub fn with_resolution_rule(
        mut self,
        rule: impl Fn(Resolution) -> Option<Resolution> + Send + 'static,
    ) -> Self {
        self.resolution_rule = Box::new(rule);
        self
    }

    /// Map each requested frame rate to the one the device reports
    pub fn with_fps_rule(mut self, rule: impl Fn(f64) -> Option<f64> + Send + 'static) -> Self {
        self.fps_rule = Box::new(rule);
        self
    }

    /// Deliver frames of a fixed size regardless of the configured mode
    pub fn with_frame_size(mut self, size: Resolution) -> Self {
        self.frame_size = Some(size);
        self
    }

    pub fn with_pixel(mut self, pixel: [u8; 3], order: ChannelOrder) -> Self {
        self.pixel = pixel;
        self.order = order;
        self
    }

    /// Let `ok` grabs succeed, fail every one after
    pub fn failing_grab_after(mut self, ok: usize) -> Self {
        self.grab_budget = Some(ok);
        self
    }

    /// Let `ok` decodes succeed, fail every one after
    pub fn failing_retrieve_after(mut self, ok: usize) -> Self {
        self.retrieve_budget = Some(ok);
        self
    }

    pub fn counters(&self) -> Counters {
        self.counters.clone()
    }
}

impl Drop for ScriptedCamera {
    fn drop(&mut self) {
        self.counters.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl CaptureDevice for ScriptedCamera {
    fn name(&self) -> &str {
        "scripted"
    }

    fn request_resolution(&mut self, resolution: Resolution) {
        self.requested_resolutions.push(resolution);
        if let Some(applied) = (self.resolution_rule)(resolution) {
            self.resolution = applied;
        }
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }

    fn request_frame_rate(&mut self, fps: f64) {
        self.requested_rates.push(fps);
        if let Some(applied) = (self.fps_rule)(fps) {
            self.fps = applied;
        }
    }

    fn frame_rate(&self) -> f64 {
        self.fps
    }

    fn grab(&mut self) -> BackendResult<()> {
        let n = self.counters.grabs.fetch_add(1, Ordering::SeqCst);
        match self.grab_budget {
            Some(ok) if n >= ok => Err(BackendError::CaptureFailed("device unplugged".to_string())),
            _ => Ok(()),
        }
    }

    fn retrieve(&mut self) -> BackendResult<RawFrame> {
        let n = self.counters.retrieves.fetch_add(1, Ordering::SeqCst);
        if matches!(self.retrieve_budget, Some(ok) if n >= ok) {
            return Err(BackendError::DecodeFailed("corrupt frame".to_string()));
        }

        let size = self.frame_size.unwrap_or(self.resolution);
        let data = self.pixel.repeat(size.pixel_count());
        Ok(RawFrame::new(size.width, size.height, self.order, data))
    }
}
