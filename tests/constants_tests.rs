// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use camview::constants::{
    self, DEFAULT_FRAME_RATE, DEFAULT_RESOLUTION, EXIT_CAMERA_UNAVAILABLE, SNAPSHOT_EXTENSION,
    SNAPSHOT_PREFIX,
};
use std::time::Duration;

#[test]
fn test_defaults_before_probing() {
    assert_eq!(DEFAULT_RESOLUTION.width, 640);
    assert_eq!(DEFAULT_RESOLUTION.height, 480);
    assert_eq!(DEFAULT_FRAME_RATE, 30.0);
}

#[test]
fn test_frame_interval() {
    assert_eq!(constants::frame_interval(10.0), Duration::from_millis(100));
    assert_eq!(
        constants::frame_interval(0.0),
        constants::frame_interval(DEFAULT_FRAME_RATE),
        "A device reporting no rate should pump at the default rate"
    );
}

#[test]
fn test_snapshot_naming() {
    assert_eq!(SNAPSHOT_PREFIX, "screenshot_");
    assert_eq!(SNAPSHOT_EXTENSION, "png");
}

#[test]
fn test_exit_code() {
    assert_eq!(EXIT_CAMERA_UNAVAILABLE, 2);
}
