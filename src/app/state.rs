// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::{CaptureDevice, NegotiatedFormat};
use crate::config::Config;
use crate::pipelines::{CaptureContext, SnapshotExporter};
use cosmic::widget::image::Handle;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One-shot handoff of the opened camera into `init`
///
/// The runtime may clone launch flags, so the session sits behind a shared
/// slot and whoever takes it first owns it.
#[derive(Clone)]
pub struct DeviceSlot(Arc<Mutex<Option<Box<dyn CaptureDevice>>>>);

impl DeviceSlot {
    pub fn new(device: Box<dyn CaptureDevice>) -> Self {
        Self(Arc::new(Mutex::new(Some(device))))
    }

    pub fn empty() -> Self {
        Self(Arc::new(Mutex::new(None)))
    }

    /// Take the session out; later calls return `None`
    pub fn take(&self) -> Option<Box<dyn CaptureDevice>> {
        match self.0.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl std::fmt::Debug for DeviceSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DeviceSlot")
    }
}

/// Data handed to the application at launch
#[derive(Debug, Clone)]
pub struct AppFlags {
    pub config: Config,
    /// What the capability prober settled on
    pub format: NegotiatedFormat,
    pub device: DeviceSlot,
}

/// A modal message waiting for the user to acknowledge it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Renderable copy of the display buffer
///
/// Holds at most one image; installing a new one hands back the old one so
/// it is released.
#[derive(Debug, Default)]
pub struct PreviewSurface {
    handle: Option<Handle>,
}

impl PreviewSurface {
    /// Install `handle`, returning the image it replaces
    pub fn replace(&mut self, handle: Handle) -> Option<Handle> {
        self.handle.replace(handle)
    }

    /// Drop the current image, returning it if there was one
    pub fn release(&mut self) -> Option<Handle> {
        self.handle.take()
    }

    pub fn handle(&self) -> Option<&Handle> {
        self.handle.as_ref()
    }
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    pub config: Config,
    /// Camera session and frame buffers
    pub capture: CaptureContext,
    pub exporter: SnapshotExporter,
    pub surface: PreviewSurface,
    /// Pending dialogs, front is shown
    pub notices: VecDeque<Notice>,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// Timer tick, pump one frame
    Tick,
    /// Snapshot button pressed
    Snapshot,
    /// OK pressed on the front notice
    DismissNotice,
    /// The window manager asked to close the main window
    CloseRequested,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::{BackendError, BackendResult, RawFrame, Resolution};

    struct IdleCamera;

    impl CaptureDevice for IdleCamera {
        fn name(&self) -> &str {
            "idle"
        }
        fn request_resolution(&mut self, _: Resolution) {}
        fn resolution(&self) -> Resolution {
            Resolution::new(640, 480)
        }
        fn request_frame_rate(&mut self, _: f64) {}
        fn frame_rate(&self) -> f64 {
            30.0
        }
        fn grab(&mut self) -> BackendResult<()> {
            Err(BackendError::Released)
        }
        fn retrieve(&mut self) -> BackendResult<RawFrame> {
            Err(BackendError::Released)
        }
    }

    #[test]
    fn test_device_slot_hands_out_once() {
        let slot = DeviceSlot::new(Box::new(IdleCamera));
        let clone = slot.clone();
        assert!(clone.take().is_some());
        assert!(slot.take().is_none());
        assert!(DeviceSlot::empty().take().is_none());
    }

    #[test]
    fn test_preview_surface_replaces_and_releases() {
        let mut surface = PreviewSurface::default();
        let first = Handle::from_rgba(1, 1, vec![1, 2, 3, 255]);
        let second = Handle::from_rgba(1, 1, vec![4, 5, 6, 255]);

        assert!(surface.replace(first.clone()).is_none());
        assert_eq!(surface.replace(second.clone()), Some(first));
        assert_eq!(surface.handle(), Some(&second));
        assert!(surface.release().is_some());
        assert!(surface.release().is_none());
    }
}
