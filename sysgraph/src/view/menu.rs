//! Series toggle buttons under a chart.

use iced::widget::{Row, button, text};
use iced::{Background, Border, Element, Theme};

use sysgraph_core::{Menu, MenuButton};

use super::theme::series_color;
use crate::message::{Message, PanelId};

/// Render one toggle button per series, in registration order.
pub fn menu_view(panel: PanelId, menu: &Menu) -> Element<'_, Message> {
    let buttons = menu
        .buttons()
        .iter()
        .map(|entry| render_button(panel, entry));

    Row::with_children(buttons).spacing(6).wrap().into()
}

fn render_button(panel: PanelId, entry: &MenuButton) -> Element<'_, Message> {
    let fill = series_color(entry.fill());
    let label = series_color(entry.text_color());

    button(text(&entry.title).size(12))
        .on_press(Message::ToggleSeries(panel, entry.series))
        .padding([3, 10])
        .style(move |_theme: &Theme, status| {
            let background = match status {
                button::Status::Hovered | button::Status::Pressed => iced::Color {
                    a: 0.85,
                    ..fill
                },
                _ => fill,
            };
            button::Style {
                background: Some(Background::Color(background)),
                text_color: label,
                border: Border::default().rounded(4),
                ..button::Style::default()
            }
        })
        .into()
}
