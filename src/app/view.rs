// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! The preview fills the window above a fixed-height control bar holding
//! the snapshot button. Pending notices are drawn as a modal dialog.

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::alignment::{Horizontal, Vertical};
use cosmic::iced::{Background, Color, ContentFit, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        widget::column()
            .push(self.build_preview())
            .push(self.build_control_bar())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn build_preview(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match self.surface.handle() {
            Some(handle) => cosmic::iced::widget::image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::text(fl!("no-camera-feed")).size(16).into(),
        };

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                text_color: Some(Color::WHITE),
                ..Default::default()
            })
            .into()
    }

    fn build_control_bar(&self) -> Element<'_, Message> {
        let snapshot_button = widget::button::suggested(fl!("snapshot"))
            .on_press(Message::Snapshot)
            .width(Length::Fixed(ui::SNAPSHOT_BUTTON_WIDTH))
            .height(Length::Fixed(ui::SNAPSHOT_BUTTON_HEIGHT));

        widget::container(snapshot_button)
            .width(Length::Fill)
            .height(Length::Fixed(self.config.control_bar_height))
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into()
    }

    /// Modal dialog for the oldest pending notice
    pub fn notice_dialog(&self) -> Option<Element<'_, Message>> {
        let notice = self.notices.front()?;
        Some(
            widget::dialog()
                .title(notice.title.as_str())
                .body(notice.body.as_str())
                .primary_action(
                    widget::button::suggested(fl!("ok")).on_press(Message::DismissNotice),
                )
                .into(),
        )
    }
}
