// SPDX-License-Identifier: MPL-2.0

//! Frame pipelines between the camera and the window
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌────────────────┐
//! │ Capture      │ ──▶ │  Frame Pump       │ ──▶ │ Display Buffer │
//! │ session      │     │  - latch, decode  │     │   (RGBA)       │
//! │              │     │  - resize         │     │                │
//! │              │     │  - BGR/RGB→RGBA   │     │                │
//! └──────────────┘     └───────────────────┘     └───────┬────────┘
//!                                                        │
//!                      ┌───────────────────┐     ┌───────▼────────┐
//!                      │ screenshot_N.png  │ ◀── │ Snapshot       │
//!                      │                   │     │ Exporter       │
//!                      └───────────────────┘     └────────────────┘
//! ```
//!
//! Everything runs on the GUI thread, one frame per timer tick.
//!
//! # Modules
//!
//! - [`preview`]: capture context and the per-tick frame pump
//! - [`snapshot`]: PNG export of the last displayed frame

pub mod preview;
pub mod snapshot;

pub use preview::{CaptureContext, DisplayBuffer, TickOutcome};
pub use snapshot::{SavedSnapshot, SnapshotExporter};
