// SPDX-License-Identifier: GPL-3.0-only

use camview::app::{AppFlags, AppModel, DeviceSlot};
use camview::backends::camera::{CaptureDevice, V4l2Camera, probe};
use camview::constants::{EXIT_CAMERA_UNAVAILABLE, ui};
use camview::{AppError, Config, fl, i18n};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=camview=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    info!(version = env!("GIT_VERSION"), "Starting camview");

    let config = Config::default();

    let mut camera = match V4l2Camera::open(config.device_index, &config.preferred_formats) {
        Ok(camera) => camera,
        Err(e) => {
            error!(device_index = config.device_index, error = %e, "Cannot open camera");
            report_open_failure(&AppError::from(e));
            return Ok(ExitCode::from(EXIT_CAMERA_UNAVAILABLE));
        }
    };

    let format = probe::negotiate(&mut camera, &config);
    let auto = camera.enable_auto_controls();
    info!(
        resolution = %format.resolution,
        fps = format.fps,
        auto_exposure = auto.exposure,
        auto_focus = auto.focus,
        "Camera ready"
    );

    // Window fits the frame plus the control bar
    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(
            format.resolution.width as f32,
            format.resolution.height as f32 + config.control_bar_height,
        ))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(ui::MIN_WINDOW_WIDTH)
                .min_height(ui::MIN_WINDOW_HEIGHT),
        );

    let flags = AppFlags {
        config,
        format,
        device: DeviceSlot::new(Box::new(camera)),
    };

    // Starts the application's event loop; the camera moves into the app here.
    cosmic::app::run::<AppModel>(settings, flags)?;

    Ok(ExitCode::SUCCESS)
}

/// Native message box, shown before any window exists
fn report_open_failure(error: &AppError) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(fl!("camera-open-failed-title"))
        .set_description(fl!("camera-open-failed-body", reason = error.to_string()))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
