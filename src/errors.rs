// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera viewer

use crate::backends::camera::BackendError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera backend errors (opening, configuring)
    Backend(BackendError),
    /// Per-tick frame pump errors
    Camera(CameraError),
    /// Snapshot export errors
    Snapshot(SnapshotError),
    /// Generic error with message
    Other(String),
}

/// Errors that stop the frame pump
#[derive(Debug, Clone)]
pub enum CameraError {
    /// The device could not latch the next frame
    Capture(BackendError),
    /// The latched frame could not be decoded
    Decode(BackendError),
}

/// Snapshot export errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// No frame has been rendered yet
    NoFrameAvailable,
    /// Encoding or writing the file failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Backend(e) => write!(f, "Camera backend error: {}", e),
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Snapshot(e) => write!(f, "Snapshot error: {}", e),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Capture(e) => write!(f, "Could not capture frame: {}", e),
            CameraError::Decode(e) => write!(f, "Could not decode frame: {}", e),
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NoFrameAvailable => write!(f, "No image data to save"),
            SnapshotError::SaveFailed(_) => write!(f, "could not save file"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for SnapshotError {}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Backend(err)
    }
}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        AppError::Snapshot(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<image::ImageError> for SnapshotError {
    fn from(err: image::ImageError) -> Self {
        SnapshotError::SaveFailed(err.to_string())
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::SaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_failure_displays_fixed_reason() {
        // The dialog text never leaks the OS error string
        let err = SnapshotError::SaveFailed("Permission denied (os error 13)".to_string());
        assert_eq!(err.to_string(), "could not save file");
    }

    #[test]
    fn camera_error_wraps_backend_reason() {
        let err = CameraError::Decode(BackendError::DecodeFailed("truncated JPEG".to_string()));
        assert!(err.to_string().contains("truncated JPEG"));
    }
}
