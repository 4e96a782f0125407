// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the frame pump

mod common;

use camview::Config;
use camview::backends::camera::{ChannelOrder, NegotiatedFormat, Resolution, probe};
use camview::errors::CameraError;
use camview::pipelines::{CaptureContext, TickOutcome};
use common::ScriptedCamera;

fn format(width: u32, height: u32) -> NegotiatedFormat {
    NegotiatedFormat {
        resolution: Resolution::new(width, height),
        fps: 30.0,
    }
}

#[test]
fn test_latch_failure_skips_decode_and_stops() {
    let camera = ScriptedCamera::new().failing_grab_after(0);
    let counters = camera.counters();
    let mut ctx = CaptureContext::new(Box::new(camera), format(640, 480));

    let outcome = ctx.pump();

    assert!(matches!(outcome, TickOutcome::Stopped(CameraError::Capture(_))));
    assert!(ctx.is_stopped());
    assert_eq!(counters.grabs(), 1);
    assert_eq!(counters.retrieves(), 0, "Decode must not follow a failed latch");
}

#[test]
fn test_decode_failure_keeps_previous_frame() {
    let camera = ScriptedCamera::new()
        .with_pixel([10, 20, 30], ChannelOrder::Rgb)
        .failing_retrieve_after(1);
    let mut ctx = CaptureContext::new(Box::new(camera), format(640, 480));

    assert!(matches!(ctx.pump(), TickOutcome::Rendered));
    let before = ctx.display().pixels().to_vec();

    let outcome = ctx.pump();

    assert!(matches!(outcome, TickOutcome::Stopped(CameraError::Decode(_))));
    assert!(ctx.is_stopped());
    assert_eq!(ctx.display().pixels(), before.as_slice());
    assert!(!ctx.display().is_empty());
}

#[test]
fn test_ticks_after_stop_do_nothing() {
    let camera = ScriptedCamera::new().failing_grab_after(2);
    let counters = camera.counters();
    let mut ctx = CaptureContext::new(Box::new(camera), format(320, 240));

    assert!(matches!(ctx.pump(), TickOutcome::Rendered));
    assert!(matches!(ctx.pump(), TickOutcome::Rendered));
    assert!(matches!(ctx.pump(), TickOutcome::Stopped(_)));
    for _ in 0..5 {
        assert!(matches!(ctx.pump(), TickOutcome::Skipped));
    }

    assert_eq!(counters.grabs(), 3);
    assert_eq!(ctx.frames_rendered(), 2);
}

#[test]
fn test_bgr_frames_reach_display_as_rgba() {
    let camera = ScriptedCamera::new().with_pixel([0, 0, 255], ChannelOrder::Bgr);
    let mut ctx = CaptureContext::new(Box::new(camera), format(640, 480));

    assert!(matches!(ctx.pump(), TickOutcome::Rendered));

    let pixels = ctx.display().pixels();
    assert_eq!(&pixels[..4], &[255, 0, 0, 255], "Pure red after conversion");
    assert!(pixels.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));
}

#[test]
fn test_oversized_frames_are_resized() {
    let camera = ScriptedCamera::new().with_frame_size(Resolution::new(1280, 960));
    let mut ctx = CaptureContext::new(Box::new(camera), format(640, 480));

    assert!(matches!(ctx.pump(), TickOutcome::Rendered));
    assert_eq!(ctx.display().resolution(), Resolution::new(640, 480));
    assert_eq!(ctx.display().pixels().len(), 640 * 480 * 4);
}

#[test]
fn test_shutdown_releases_session_once() {
    let camera = ScriptedCamera::new();
    let counters = camera.counters();
    let mut ctx = CaptureContext::new(Box::new(camera), format(640, 480));

    assert!(ctx.shutdown());
    assert!(!ctx.shutdown());

    assert_eq!(counters.drops(), 1);
    assert!(ctx.is_stopped());
    assert!(!ctx.has_session());
    assert!(matches!(ctx.pump(), TickOutcome::Skipped));
}

#[test]
fn test_end_to_end_full_hd_first_frame() {
    let mut camera = ScriptedCamera::new()
        .supporting_resolutions(&[Resolution::new(1920, 1080)])
        .with_fps_rule(|fps| Some(if fps == 30.0 { 30.0 } else { 5.0 }));

    let negotiated = probe::negotiate(&mut camera, &Config::default());
    assert_eq!(negotiated.resolution, Resolution::new(1920, 1080));
    assert_eq!(negotiated.fps, 30.0);

    let mut ctx = CaptureContext::new(Box::new(camera), negotiated);
    assert!(matches!(ctx.pump(), TickOutcome::Rendered));

    let display = ctx.display();
    assert_eq!(display.resolution(), Resolution::new(1920, 1080));
    assert_eq!(display.pixels().len(), 1920 * 1080 * 4);
    assert_eq!(
        ctx.frame_interval(),
        std::time::Duration::from_secs_f64(1.0 / 30.0)
    );
}
