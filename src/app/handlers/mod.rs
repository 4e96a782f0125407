// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by what they act on.

pub mod preview;
pub mod snapshot;
pub mod window;
