// SPDX-License-Identifier: GPL-3.0-only

//! Capability probing
//!
//! Cameras rarely report a usable list of modes, so the prober asks for each
//! candidate in turn and keeps the first one the device actually applies.
//! Every request leaves the device in the requested (or substituted) mode;
//! when nothing matches, whatever the last request produced stays in effect.

use super::{CaptureDevice, Resolution};
use crate::config::Config;
use crate::constants::{self, DEFAULT_FRAME_RATE, DEFAULT_RESOLUTION};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Resolution and frame rate a session settled on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegotiatedFormat {
    pub resolution: Resolution,
    pub fps: f64,
}

impl NegotiatedFormat {
    /// Delay between two preview ticks
    pub fn frame_interval(&self) -> Duration {
        constants::frame_interval(self.fps)
    }
}

impl Default for NegotiatedFormat {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            fps: DEFAULT_FRAME_RATE,
        }
    }
}

/// Find the largest candidate resolution the device applies exactly
///
/// Returns the device's read-back after the last request when no candidate
/// matches.
pub fn probe_resolution<D>(device: &mut D, candidates: &[Resolution]) -> Resolution
where
    D: CaptureDevice + ?Sized,
{
    let mut reported = device.resolution();

    for &candidate in candidates {
        device.request_resolution(candidate);
        reported = device.resolution();

        if reported == candidate {
            info!(device = device.name(), resolution = %reported, "Resolution negotiated");
            return reported;
        }
        debug!(requested = %candidate, %reported, "Resolution not applied exactly");
    }

    warn!(
        device = device.name(),
        resolution = %reported,
        "No candidate resolution matched, keeping device setting"
    );
    reported
}

/// Find the highest candidate frame rate the device applies within `tolerance`
///
/// The accepted value is the device's read-back, not the request. Returns
/// the current device rate when no candidate matches.
pub fn probe_frame_rate<D>(device: &mut D, candidates: &[f64], tolerance: f64) -> f64
where
    D: CaptureDevice + ?Sized,
{
    for &candidate in candidates {
        device.request_frame_rate(candidate);
        let reported = device.frame_rate();

        if (reported - candidate).abs() < tolerance {
            info!(device = device.name(), requested = candidate, fps = reported, "Frame rate negotiated");
            return reported;
        }
        debug!(requested = candidate, reported, "Frame rate not within tolerance");
    }

    let current = device.frame_rate();
    warn!(
        device = device.name(),
        fps = current,
        "No candidate frame rate matched, keeping device setting"
    );
    current
}

/// Probe resolution first, then frame rate
///
/// Order matters: drivers commonly reset the frame interval on a format
/// change.
pub fn negotiate<D>(device: &mut D, config: &Config) -> NegotiatedFormat
where
    D: CaptureDevice + ?Sized,
{
    let resolution = probe_resolution(device, &config.resolution_candidates);
    let fps = probe_frame_rate(
        device,
        &config.frame_rate_candidates,
        config.frame_rate_tolerance,
    );
    NegotiatedFormat { resolution, fps }
}
