// SPDX-License-Identifier: MPL-2.0

//! CamView - a live camera viewer for the COSMIC desktop environment
//!
//! Opens a V4L2 camera, shows its feed in a window and saves the displayed
//! frame as a PNG on request.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Window, timer and button wiring
//! - [`backends`]: Capture session trait, V4L2 implementation, capability prober
//! - [`pipelines`]: Per-tick frame pump and snapshot exporter
//! - [`config`]: Tunables with their defaults
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // camview
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod pipelines;

// Re-export commonly used types
pub use app::{AppFlags, AppModel, Message};
pub use config::Config;
pub use errors::{AppError, AppResult};
