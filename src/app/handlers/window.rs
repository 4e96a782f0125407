// SPDX-License-Identifier: GPL-3.0-only

//! Window lifecycle handlers

use crate::app::state::{AppModel, Message};
use crate::fl;
use cosmic::{ApplicationExt, Task};
use tracing::{debug, info};

impl AppModel {
    /// Set header and window title to the localized app title
    pub(crate) fn update_title(&mut self) -> Task<cosmic::Action<Message>> {
        let title = fl!("window-title");
        self.set_header_title(title.clone());
        match self.core.main_window_id() {
            Some(id) => self.set_window_title(title, id),
            None => Task::none(),
        }
    }

    /// Stop the pump and release the camera and preview image
    ///
    /// The window closes afterwards; a second request finds nothing left to
    /// release.
    pub(crate) fn handle_close_requested(&mut self) -> Task<cosmic::Action<Message>> {
        if self.capture.shutdown() {
            info!(
                frames = self.capture.frames_rendered(),
                "Camera released on close"
            );
        } else {
            debug!("Close requested again, nothing to release");
        }

        if self.surface.release().is_some() {
            debug!("Preview image released");
        }
        self.notices.clear();
        Task::none()
    }
}
