// SPDX-License-Identifier: MPL-2.0

//! Application shell for the camera viewer
//!
//! Owns the window and wires timer ticks and button presses to the frame
//! pump and the snapshot exporter.
//!
//! # Architecture
//!
//! - `state`: application state types (AppModel, Message, launch flags)
//! - `view`: preview, control bar and notice dialog
//! - `update`: message dispatch
//! - `handlers`: per-message behaviour

mod handlers;
mod state;
mod update;
mod view;

use crate::fl;
use crate::pipelines::{CaptureContext, SnapshotExporter};
use cosmic::iced::{Subscription, window};
use cosmic::{Element, Task};
pub use state::{AppFlags, AppModel, DeviceSlot, Message, Notice, PreviewSurface};
use std::collections::VecDeque;
use tracing::{error, info};

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = AppFlags;

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.camview.CamView";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Takes the camera out of the launch flags and schedules the first tick.
    fn init(core: cosmic::Core, flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let AppFlags {
            config,
            format,
            device,
        } = flags;

        let mut notices = VecDeque::new();
        let capture = match device.take() {
            Some(device) => {
                info!(
                    device = device.name(),
                    resolution = %format.resolution,
                    fps = format.fps,
                    "Starting preview"
                );
                CaptureContext::new(device, format)
            }
            None => {
                error!("No camera session was handed to the application");
                notices.push_back(Notice::new(
                    fl!("camera-error-title"),
                    fl!("session-missing-body"),
                ));
                CaptureContext::detached(format)
            }
        };

        let exporter = SnapshotExporter::new(config.snapshot_dir.clone());

        let mut app = AppModel {
            core,
            config,
            capture,
            exporter,
            surface: PreviewSurface::default(),
            notices,
        };

        let title_task = app.update_title();
        let first_tick = Task::done(cosmic::Action::App(Message::Tick));

        (app, Task::batch([title_task, first_tick]))
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        self.notice_dialog()
    }

    fn on_close_requested(&self, _id: window::Id) -> Option<Self::Message> {
        Some(Message::CloseRequested)
    }

    /// Ticks at the negotiated frame rate until the pump stops.
    fn subscription(&self) -> Subscription<Self::Message> {
        if self.capture.is_stopped() {
            return Subscription::none();
        }
        cosmic::iced::time::every(self.capture.frame_interval()).map(|_| Message::Tick)
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
