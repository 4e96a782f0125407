// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera capture
//!
//! - [`camera`]: capture session trait, the V4L2 implementation and the
//!   capability prober that negotiates a format with it
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                   │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │            ┌──────────────────┐             │
//! │            │     Camera       │             │
//! │            │      (V4L2)      │             │
//! │            └──────────────────┘             │
//! └─────────────────────────────────────────────┘
//! ```

pub mod camera;
