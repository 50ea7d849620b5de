//! Horizontal scrollbar under a chart.

use iced::mouse;
use iced::widget::canvas::{self, Canvas, Geometry, Path};
use iced::{Element, Length, Point, Rectangle, Renderer, Size, Theme};

use sysgraph_core::ScrollbarFrame;

use super::theme::colors;
use crate::message::{Message, PanelId};

const SCROLLBAR_HEIGHT: f32 = 10.0;

struct ScrollbarProgram {
    panel: PanelId,
    bar: ScrollbarFrame,
    /// Horizontal inset matching the chart's plot area.
    inset: (f32, f32),
}

/// Drag state.
#[derive(Debug, Clone, Default)]
pub struct ScrollbarInteraction {
    /// Cursor offset from the thumb's left edge when the drag started.
    grab: Option<f32>,
}

impl ScrollbarProgram {
    fn track(&self, bounds: Rectangle) -> (f32, f32) {
        let start = self.inset.0;
        let width = (bounds.width - self.inset.0 - self.inset.1).max(0.0);
        (start, width)
    }

    fn publish_thumb_at(&self, thumb_offset: f32, track_width: f32) -> canvas::Action<Message> {
        let position = self.bar.position_for_thumb(thumb_offset.max(0.0), track_width);
        canvas::Action::publish(Message::ScrollbarMoved(self.panel, position)).and_capture()
    }
}

impl canvas::Program<Message> for ScrollbarProgram {
    type State = ScrollbarInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let (track_start, track_width) = self.track(bounds);
        let (thumb_offset, thumb_length) = self.bar.thumb(track_width);

        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let pos = cursor.position_in(bounds)?;
                let x = pos.x - track_start;
                if x >= thumb_offset && x <= thumb_offset + thumb_length {
                    interaction.grab = Some(x - thumb_offset);
                    Some(canvas::Action::capture())
                } else if (0.0..=track_width).contains(&x) {
                    // Jump so the thumb centers on the click.
                    Some(self.publish_thumb_at(x - thumb_length / 2.0, track_width))
                } else {
                    None
                }
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                let grab = interaction.grab?;
                let x = position.x - bounds.x - track_start;
                Some(self.publish_thumb_at(x - grab, track_width))
            }
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                interaction.grab.take().map(|_| canvas::Action::capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        interaction: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let palette = colors(theme);
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let (track_start, track_width) = self.track(bounds);
        let (thumb_offset, thumb_length) = self.bar.thumb(track_width);

        frame.fill(
            &Path::rectangle(
                Point::new(track_start, 0.0),
                Size::new(track_width, bounds.height),
            ),
            palette.scrollbar_track(),
        );
        frame.fill(
            &Path::rounded_rectangle(
                Point::new(track_start + thumb_offset, 1.0),
                Size::new(thumb_length, bounds.height - 2.0),
                3.0.into(),
            ),
            palette.scrollbar_thumb(interaction.grab.is_some()),
        );

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.grab.is_some() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Create a scrollbar element aligned with a chart's plot area.
pub fn scrollbar_view(
    panel: PanelId,
    bar: ScrollbarFrame,
    inset: (f32, f32),
) -> Element<'static, Message> {
    Canvas::new(ScrollbarProgram { panel, bar, inset })
        .width(Length::Fill)
        .height(Length::Fixed(SCROLLBAR_HEIGHT))
        .into()
}
