//! One chart panel: header, chart, scrollbar and series menu.

use iced::widget::{column, container, row, text};
use iced::{Alignment, Element, Length, Theme};

use sysgraph_core::ScrollbarFrame;

use super::chart::{PLOT_INSET, chart_view};
use super::formatting::{format_bytes, format_duration, format_value};
use super::menu::menu_view;
use super::scrollbar::scrollbar_view;
use crate::message::Message;
use crate::panel::Panel;

/// Render a panel.
pub fn panel_view(panel: &Panel) -> Element<'_, Message> {
    let chart = panel.chart();

    let title = text(panel.id().title()).size(16);

    let headline = match panel.headline() {
        Some((value, "B")) => format_bytes(value),
        Some((value, unit)) => format!("{} {}", format_value(value), unit),
        None => "-".to_string(),
    };
    let headline = text(headline).size(14);

    let window = format_duration(chart.end_time() - chart.start_time());
    let mode = if chart.is_following() {
        "live"
    } else {
        "paused"
    };
    let status = text(format!("{} window, {}", window, mode))
        .size(12)
        .style(|theme: &Theme| text::Style {
            color: Some(theme.extended_palette().background.weak.text),
        });

    let header = row![title, headline, status]
        .spacing(16)
        .align_y(Alignment::Center);

    let bar = panel
        .frame()
        .map(|frame| frame.scrollbar)
        .unwrap_or(ScrollbarFrame {
            range: chart.scrollbar().range(),
            position: chart.scrollbar().position(),
            width: chart.scrollbar().width(),
        });

    let content = column![
        header,
        chart_view(
            panel.id(),
            panel.frame(),
            &panel.cache,
            (chart.width(), chart.height()),
        ),
        scrollbar_view(panel.id(), bar, PLOT_INSET),
        menu_view(panel.id(), chart.menu()),
    ]
    .spacing(6);

    container(content).padding(10).width(Length::Fill).into()
}
