//! Sysgraph Iced application.

use iced::widget::{Column, scrollable};
use iced::{Element, Length, Subscription, Task, Theme};

use crate::config::AppConfig;
use crate::message::{Message, PanelId};
use crate::panel::Panel;
use crate::subscription::sample_subscription;
use crate::view::panel::panel_view;

/// The main Sysgraph application.
pub struct Sysgraph {
    config: AppConfig,
    panels: Vec<Panel>,
}

impl Sysgraph {
    /// Create the application with one panel per [`PanelId`].
    pub fn new(config: AppConfig) -> Self {
        let panels = PanelId::ALL
            .iter()
            .filter_map(|&id| match Panel::new(id, config.chart.clone()) {
                Ok(panel) => Some(panel),
                Err(e) => {
                    tracing::error!(panel = %id, error = %e, "Failed to build panel");
                    None
                }
            })
            .collect();

        Self { config, panels }
    }

    /// Boot the Sysgraph application (called by iced::application).
    pub fn boot(config: AppConfig) -> (Self, Task<Message>) {
        (Self::new(config), Task::none())
    }

    /// Get the window title.
    pub fn title(&self) -> String {
        match self.panel(PanelId::Cpu).and_then(Panel::headline) {
            Some((cpu, _)) => format!("Sysgraph - CPU {:.0}%", cpu),
            None => "Sysgraph".to_string(),
        }
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id() == id)
    }

    fn panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.id() == id)
    }

    /// Handle incoming messages.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Sampled(snapshot) => {
                for panel in &mut self.panels {
                    panel.ingest(&snapshot);
                }
            }

            Message::Gesture(id, gesture) => {
                if let Some(panel) = self.panel_mut(id) {
                    panel.apply_gesture(gesture);
                }
            }

            Message::ToggleSeries(id, series) => {
                if let Some(panel) = self.panel_mut(id) {
                    panel.toggle_series(series);
                }
            }

            Message::ScrollbarMoved(id, offset) => {
                if let Some(panel) = self.panel_mut(id) {
                    panel.scroll_to(offset);
                }
            }

            Message::ChartResized(id, width, height) => {
                if let Some(panel) = self.panel_mut(id) {
                    panel.resize(width, height);
                }
            }
        }

        Task::none()
    }

    /// Sample the configured source.
    pub fn subscription(&self) -> Subscription<Message> {
        sample_subscription(self.config.source.clone())
    }

    /// Render the view.
    pub fn view(&self) -> Element<'_, Message> {
        let panels = self.panels.iter().map(panel_view);

        scrollable(Column::with_children(panels).spacing(8).padding(8))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Get the application theme.
    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoSimulator;

    #[test]
    fn test_new_builds_all_panels() {
        let app = Sysgraph::new(AppConfig::default());
        assert!(app.panel(PanelId::Cpu).is_some());
        assert!(app.panel(PanelId::Memory).is_some());
        assert_eq!(app.title(), "Sysgraph");
    }

    #[test]
    fn test_samples_reach_every_panel() {
        let mut app = Sysgraph::new(AppConfig::default());
        let mut sim = DemoSimulator::with_seed(5, 2);
        let _ = app.update(Message::Sampled(sim.tick(1000)));

        for id in PanelId::ALL {
            assert!(app.panel(id).unwrap().headline().is_some());
        }
        assert!(app.title().starts_with("Sysgraph - CPU "));
    }

    #[test]
    fn test_resize_then_gesture() {
        let mut app = Sysgraph::new(AppConfig::default());
        let mut sim = DemoSimulator::with_seed(6, 1);
        for i in 0..=300 {
            let _ = app.update(Message::Sampled(sim.tick(i * 1000)));
        }
        let _ = app.update(Message::ChartResized(PanelId::Cpu, 100.0, 80.0));
        let chart = app.panel(PanelId::Cpu).unwrap().chart();
        assert_eq!(chart.end_time(), 300_000);
        assert!(app.panel(PanelId::Cpu).unwrap().frame().is_some());

        let _ = app.update(Message::Gesture(
            PanelId::Cpu,
            sysgraph_core::Gesture::Drag { dx: 50.0 },
        ));
        let chart = app.panel(PanelId::Cpu).unwrap().chart();
        assert_eq!(chart.end_time(), 295_000);
        assert!(!chart.is_following());

        // The memory panel was never resized and is untouched.
        let memory = app.panel(PanelId::Memory).unwrap();
        assert!(memory.frame().is_none());
    }

    #[test]
    fn test_scrollbar_message_moves_window() {
        let mut app = Sysgraph::new(AppConfig::default());
        let mut sim = DemoSimulator::with_seed(8, 1);
        let _ = app.update(Message::ChartResized(PanelId::Memory, 100.0, 80.0));
        for i in 0..=30 {
            let _ = app.update(Message::Sampled(sim.tick(i * 1000)));
        }

        let _ = app.update(Message::ScrollbarMoved(PanelId::Memory, 0.0));
        let chart = app.panel(PanelId::Memory).unwrap().chart();
        assert_eq!(chart.start_time(), 0);
        assert_eq!(chart.end_time(), 10_000);
    }

    #[test]
    fn test_invalid_chart_config_builds_no_panels() {
        let mut config = AppConfig::default();
        config.chart.column_width = 0.0;
        let mut app = Sysgraph::new(config);
        assert!(app.panel(PanelId::Cpu).is_none());

        let mut sim = DemoSimulator::with_seed(3, 1);
        let _ = app.update(Message::Sampled(sim.tick(1000)));
        assert_eq!(app.title(), "Sysgraph");
    }
}
