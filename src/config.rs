// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::{PixelFormat, Resolution};
use crate::constants::{self, ui};
use std::path::PathBuf;

/// Tunables gathered in one place
///
/// There is no config file; `main` builds the default and hands it to the
/// application through its launch flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Index `N` of `/dev/videoN`
    pub device_index: usize,
    /// Resolutions to probe, highest first
    pub resolution_candidates: Vec<Resolution>,
    /// Frame rates to probe, highest first
    pub frame_rate_candidates: Vec<f64>,
    /// Largest accepted gap between a requested and a reported frame rate
    pub frame_rate_tolerance: f64,
    /// Pixel formats to negotiate, most preferred first
    pub preferred_formats: Vec<PixelFormat>,
    /// Height of the control bar added below the preview
    pub control_bar_height: f32,
    /// Directory snapshots are written to
    pub snapshot_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_index: constants::DEFAULT_DEVICE_INDEX,
            resolution_candidates: constants::RESOLUTION_CANDIDATES.to_vec(),
            frame_rate_candidates: constants::FRAME_RATE_CANDIDATES.to_vec(),
            frame_rate_tolerance: constants::FRAME_RATE_TOLERANCE,
            preferred_formats: constants::PREFERRED_PIXEL_FORMATS.to_vec(),
            control_bar_height: ui::CONTROL_BAR_HEIGHT,
            // Working directory
            snapshot_dir: PathBuf::from("."),
        }
    }
}
