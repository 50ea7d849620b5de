//! Line chart canvas.
//!
//! Draws a [`ChartFrame`] and turns wheel, drag and key input into
//! [`Gesture`]s for the panel's chart.

use iced::keyboard;
use iced::mouse;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use sysgraph_core::{AxisAlign, ChartFrame, Gesture};

use super::formatting::format_tick_time;
use super::theme::{colors, series_color};
use crate::message::{Message, PanelId};

/// Room for the left axis labels.
const LEFT_GUTTER: f32 = 64.0;
/// Room for the right axis labels.
const RIGHT_GUTTER: f32 = 64.0;
const TOP_GUTTER: f32 = 8.0;
/// Room for the time labels.
const BOTTOM_GUTTER: f32 = 20.0;

/// Horizontal insets of the plot area, for widgets aligned with it.
pub const PLOT_INSET: (f32, f32) = (LEFT_GUTTER, RIGHT_GUTTER);

/// Pixel wheel deltas per wheel notch.
const PIXELS_PER_NOTCH: f32 = 50.0;

/// Chart height in the panel layout.
pub const CHART_HEIGHT: f32 = 220.0;

/// Size of the plot area inside a canvas of `bounds` size.
pub fn plot_size(bounds: Size) -> Size {
    Size::new(
        (bounds.width - LEFT_GUTTER - RIGHT_GUTTER).max(0.0),
        (bounds.height - TOP_GUTTER - BOTTOM_GUTTER).max(0.0),
    )
}

/// Canvas program for one chart.
struct ChartProgram<'a> {
    panel: PanelId,
    frame: Option<&'a ChartFrame>,
    cache: &'a Cache,
    /// Plot size the chart was last laid out for.
    plot_size: Size,
}

/// Interaction state for the chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// Last cursor position while dragging.
    drag_from: Option<Point>,
    modifiers: keyboard::Modifiers,
}

impl<'a> canvas::Program<Message> for ChartProgram<'a> {
    type State = ChartInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let plot = plot_size(bounds.size());
        if plot != self.plot_size {
            return Some(canvas::Action::publish(Message::ChartResized(
                self.panel,
                plot.width,
                plot.height,
            )));
        }

        match event {
            canvas::Event::Mouse(mouse_event) => {
                self.handle_mouse(interaction, mouse_event, bounds, cursor)
            }
            canvas::Event::Keyboard(keyboard_event) => {
                self.handle_keyboard(interaction, keyboard_event, bounds, cursor)
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            self.draw_chart(frame, theme, bounds.size());
        });

        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.drag_from.is_some() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a> ChartProgram<'a> {
    fn gesture(&self, gesture: Gesture) -> Option<canvas::Action<Message>> {
        Some(canvas::Action::publish(Message::Gesture(self.panel, gesture)).and_capture())
    }

    /// Handle mouse events.
    fn handle_mouse(
        &self,
        interaction: &mut ChartInteraction,
        event: &mouse::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                if let Some(pos) = cursor.position_over(bounds) {
                    interaction.drag_from = Some(pos);
                    return Some(canvas::Action::capture());
                }
            }
            mouse::Event::CursorMoved { position } => {
                if let Some(last) = interaction.drag_from {
                    let dx = position.x - last.x;
                    interaction.drag_from = Some(*position);
                    if dx != 0.0 {
                        return self.gesture(Gesture::Drag { dx: dx as f64 });
                    }
                }
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                interaction.drag_from = None;
            }
            mouse::Event::WheelScrolled { delta } => {
                if cursor.is_over(bounds) {
                    let (dx, dy) = match delta {
                        mouse::ScrollDelta::Lines { x, y } => (*x, *y),
                        mouse::ScrollDelta::Pixels { x, y } => {
                            (*x / PIXELS_PER_NOTCH, *y / PIXELS_PER_NOTCH)
                        }
                    };
                    return self.gesture(Gesture::Wheel {
                        dx: dx as f64,
                        dy: dy as f64,
                        zoom: interaction.modifiers.command(),
                    });
                }
            }
            _ => {}
        }

        None
    }

    /// Handle keyboard events while the cursor is over the chart.
    fn handle_keyboard(
        &self,
        interaction: &mut ChartInteraction,
        event: &keyboard::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        use keyboard::{Event, Key, key::Named};

        match event {
            Event::ModifiersChanged(modifiers) => {
                interaction.modifiers = *modifiers;
                None
            }
            Event::KeyPressed { key, .. } if cursor.is_over(bounds) => {
                let zoom = |dy: f64| Gesture::Wheel {
                    dx: 0.0,
                    dy,
                    zoom: true,
                };
                let pan = |dx: f64| Gesture::Wheel {
                    dx,
                    dy: 0.0,
                    zoom: false,
                };
                match key.as_ref() {
                    Key::Character("+") | Key::Character("=") => self.gesture(zoom(1.0)),
                    Key::Character("-") => self.gesture(zoom(-1.0)),
                    Key::Named(Named::ArrowLeft) => self.gesture(pan(-1.0)),
                    Key::Named(Named::ArrowRight) => self.gesture(pan(1.0)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Draw the chart onto the frame.
    fn draw_chart(&self, frame: &mut Frame, theme: &Theme, size: Size) {
        let palette = colors(theme);
        let plot = plot_size(size);

        frame.fill(
            &Path::rectangle(Point::ORIGIN, size),
            palette.chart_outer_background(),
        );
        frame.fill(
            &Path::rectangle(Point::new(LEFT_GUTTER, TOP_GUTTER), plot),
            palette.chart_background(),
        );

        let Some(chart) = self.frame else {
            frame.fill_text(Text {
                content: "Waiting for samples...".to_string(),
                position: Point::new(size.width / 2.0 - 70.0, size.height / 2.0),
                color: palette.text_muted(),
                size: 14.0.into(),
                ..Text::default()
            });
            return;
        };

        let origin = Point::new(LEFT_GUTTER, TOP_GUTTER);
        let grid = Stroke::default()
            .with_color(palette.chart_grid())
            .with_width(1.0);
        let step_ms = chart
            .time_ticks
            .windows(2)
            .map(|w| w[1].time - w[0].time)
            .next()
            .unwrap_or(i64::MAX);

        // Vertical gridlines and time labels
        for tick in &chart.time_ticks {
            let x = origin.x + tick.x;
            frame.stroke(
                &Path::line(Point::new(x, origin.y), Point::new(x, origin.y + chart.height)),
                grid,
            );
            frame.fill_text(Text {
                content: format_tick_time(tick.time, step_ms),
                position: Point::new(x - 24.0, origin.y + chart.height + 4.0),
                color: palette.chart_label(),
                size: 11.0.into(),
                ..Text::default()
            });
        }

        // Horizontal gridlines follow the left axis, or the right one alone.
        let grid_axis = chart
            .axis(AxisAlign::Left)
            .or_else(|| chart.axis(AxisAlign::Right));
        if let Some(axis) = grid_axis {
            for label in &axis.labels {
                let y = origin.y + label.y;
                frame.stroke(
                    &Path::line(Point::new(origin.x, y), Point::new(origin.x + chart.width, y)),
                    grid,
                );
            }
        }

        for axis in &chart.axes {
            for label in &axis.labels {
                let x = match axis.align {
                    AxisAlign::Left => 4.0,
                    AxisAlign::Right => origin.x + chart.width + 6.0,
                };
                frame.fill_text(Text {
                    content: label.text.clone(),
                    position: Point::new(x, origin.y + label.y - 6.0),
                    color: palette.chart_label(),
                    size: 11.0.into(),
                    ..Text::default()
                });
            }

            for line in &axis.lines {
                let stroke = Stroke::default()
                    .with_color(series_color(line.color))
                    .with_width(1.5);
                for segment in line.segments() {
                    let path = polyline(origin, &segment);
                    frame.stroke(&path, stroke);
                }
            }
        }

        frame.stroke(
            &Path::rectangle(origin, Size::new(chart.width, chart.height)),
            Stroke::default()
                .with_color(Color {
                    a: 0.6,
                    ..palette.border()
                })
                .with_width(1.0),
        );
    }
}

/// Build a path through `points`, offset by `origin`.
fn polyline(origin: Point, points: &[(f32, f32)]) -> Path {
    let mut builder = canvas::path::Builder::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let point = Point::new(origin.x + x, origin.y + y);
        if i == 0 {
            builder.move_to(point);
        } else {
            builder.line_to(point);
        }
    }
    if let [(x, y)] = points {
        // A lone column still gets a visible dash.
        builder.line_to(Point::new(origin.x + x - 1.0, origin.y + y));
    }
    builder.build()
}

/// Create a chart element.
pub fn chart_view<'a>(
    panel: PanelId,
    frame: Option<&'a ChartFrame>,
    cache: &'a Cache,
    chart_size: (f64, f64),
) -> Element<'a, Message> {
    Canvas::new(ChartProgram {
        panel,
        frame,
        cache,
        plot_size: Size::new(chart_size.0 as f32, chart_size.1 as f32),
    })
    .width(Length::Fill)
    .height(Length::Fixed(CHART_HEIGHT))
    .into()
}
