// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot export
//!
//! Writes the display buffer as it stood after its last completed update to
//! `screenshot_<unix_seconds>.png`. One attempt per request, no retry.

use super::preview::DisplayBuffer;
use crate::backends::camera::format_converters::rgba_to_rgb;
use crate::constants::{SNAPSHOT_EXTENSION, SNAPSHOT_PREFIX};
use crate::errors::SnapshotError;
use image::{ExtendedColorType, ImageFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// A snapshot that made it to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    /// Bare file name, e.g. `screenshot_1700000000.png`
    pub filename: String,
    /// Full path the file was written to
    pub path: PathBuf,
}

/// Saves display frames as PNG files into one directory
#[derive(Debug, Clone)]
pub struct SnapshotExporter {
    output_dir: PathBuf,
}

impl SnapshotExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name for a snapshot taken at `unix_secs`
    pub fn file_name(unix_secs: i64) -> String {
        format!("{}{}.{}", SNAPSHOT_PREFIX, unix_secs, SNAPSHOT_EXTENSION)
    }

    /// Save `display` stamped with the current wall-clock time
    pub fn export(&self, display: &DisplayBuffer) -> Result<SavedSnapshot, SnapshotError> {
        self.export_at(display, chrono::Utc::now().timestamp())
    }

    /// Save `display` stamped with `unix_secs`
    pub fn export_at(
        &self,
        display: &DisplayBuffer,
        unix_secs: i64,
    ) -> Result<SavedSnapshot, SnapshotError> {
        if display.is_empty() {
            debug!("Snapshot requested before the first frame");
            return Err(SnapshotError::NoFrameAvailable);
        }

        let filename = Self::file_name(unix_secs);
        let path = self.output_dir.join(&filename);
        let resolution = display.resolution();

        // The PNG encoder takes packed RGB8
        let rgb = rgba_to_rgb(display.pixels());
        image::save_buffer_with_format(
            &path,
            &rgb,
            resolution.width,
            resolution.height,
            ExtendedColorType::Rgb8,
            ImageFormat::Png,
        )
        .map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to save snapshot");
            SnapshotError::from(e)
        })?;

        info!(path = %path.display(), %resolution, "Snapshot saved");
        Ok(SavedSnapshot { filename, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_uses_unix_seconds() {
        assert_eq!(
            SnapshotExporter::file_name(1_700_000_000),
            "screenshot_1700000000.png"
        );
    }

    #[test]
    fn test_empty_display_is_rejected() {
        let exporter = SnapshotExporter::new("/nonexistent/dir");
        let display = DisplayBuffer::new(crate::backends::camera::Resolution::new(2, 2));
        assert_eq!(
            exporter.export_at(&display, 1),
            Err(SnapshotError::NoFrameAvailable)
        );
    }
}
