use sysgraph_core::{Gesture, SeriesId};

use crate::collector::Snapshot;

/// Messages for the Sysgraph application.
#[derive(Debug, Clone)]
pub enum Message {
    /// A new snapshot from the sample source.
    Sampled(Snapshot),

    /// Zoom or scroll input over a chart.
    Gesture(PanelId, Gesture),

    /// User clicked a series' menu button.
    ToggleSeries(PanelId, SeriesId),

    /// User dragged a chart's scrollbar to this offset.
    ScrollbarMoved(PanelId, f64),

    /// A chart's plot area changed size.
    ChartResized(PanelId, f32, f32),
}

/// Identifies one chart panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Cpu,
    Memory,
}

impl PanelId {
    pub const ALL: [PanelId; 2] = [PanelId::Cpu, PanelId::Memory];

    pub fn title(&self) -> &'static str {
        match self {
            PanelId::Cpu => "CPU",
            PanelId::Memory => "Memory",
        }
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
