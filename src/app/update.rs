// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! `update()` only dispatches; the handlers live in the `handlers`
//! submodules:
//!
//! - `handlers::preview`: timer ticks and notice queue
//! - `handlers::snapshot`: snapshot button
//! - `handlers::window`: title and close request

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            Message::Tick => self.handle_tick(),
            Message::Snapshot => self.handle_snapshot(),
            Message::DismissNotice => self.handle_dismiss_notice(),
            Message::CloseRequested => self.handle_close_requested(),
        }
    }
}
