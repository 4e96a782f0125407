// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot handler

use crate::app::state::{AppModel, Message, Notice};
use crate::errors::SnapshotError;
use crate::fl;
use cosmic::Task;
use tracing::{info, warn};

impl AppModel {
    pub(crate) fn handle_snapshot(&mut self) -> Task<cosmic::Action<Message>> {
        let notice = match self.exporter.export(self.capture.display()) {
            Ok(saved) => {
                info!(filename = %saved.filename, "Snapshot taken");
                Notice::new(
                    fl!("snapshot-saved-title"),
                    fl!("snapshot-saved-body", filename = saved.filename.as_str()),
                )
            }
            Err(SnapshotError::NoFrameAvailable) => {
                warn!("Snapshot requested before any frame was shown");
                Notice::new(fl!("snapshot-failed-title"), fl!("snapshot-no-frame-body"))
            }
            Err(SnapshotError::SaveFailed(reason)) => {
                warn!(%reason, "Snapshot could not be saved");
                Notice::new(fl!("snapshot-failed-title"), fl!("snapshot-save-failed-body"))
            }
        };
        self.push_notice(notice);
        Task::none()
    }
}
