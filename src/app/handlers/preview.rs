// SPDX-License-Identifier: GPL-3.0-only

//! Preview handlers
//!
//! Pumps one frame per timer tick and republishes it to the preview surface.

use crate::app::state::{AppModel, Message, Notice};
use crate::errors::CameraError;
use crate::fl;
use crate::pipelines::TickOutcome;
use cosmic::Task;
use cosmic::widget::image::Handle;
use tracing::{debug, error};

impl AppModel {
    pub(crate) fn handle_tick(&mut self) -> Task<cosmic::Action<Message>> {
        match self.capture.pump() {
            TickOutcome::Rendered => {
                let display = self.capture.display();
                let resolution = display.resolution();
                let handle = Handle::from_rgba(
                    resolution.width,
                    resolution.height,
                    display.pixels().to_vec(),
                );
                // Previous image is released here
                drop(self.surface.replace(handle));
            }
            TickOutcome::Skipped => {
                debug!("Tick after pump stopped, ignoring");
            }
            TickOutcome::Stopped(err) => {
                error!(error = %err, "Preview stopped");
                let body = match (&err, self.capture.has_session()) {
                    (CameraError::Capture(_), false) => fl!("session-missing-body"),
                    (CameraError::Capture(_), true) => fl!("capture-failed-body"),
                    (CameraError::Decode(_), _) => fl!("decode-failed-body"),
                };
                self.push_notice(Notice::new(fl!("camera-error-title"), body));
            }
        }
        Task::none()
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        debug!(title = %notice.title, pending = self.notices.len(), "Queueing notice");
        self.notices.push_back(notice);
    }

    pub(crate) fn handle_dismiss_notice(&mut self) -> Task<cosmic::Action<Message>> {
        self.notices.pop_front();
        Task::none()
    }
}
