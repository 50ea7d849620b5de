//! Chart panels: which series each chart carries and how snapshots feed them.

use iced::widget::canvas::Cache;
use tracing::{debug, warn};

use sysgraph_core::{
    AxisAlign, ChartConfig, ChartFrame, DataSeries, Gesture, LineChart, Result, SeriesId,
};

use crate::collector::Snapshot;
use crate::message::PanelId;

/// Colors handed out to series in registration order.
const PALETTE: &[&str] = &[
    "#2196f3", "#f44336", "#4caf50", "#ff9800", "#9c27b0", "#00bcd4", "#ffeb3b", "#795548",
    "#e91e63", "#8bc34a", "#3f51b5", "#cddc39",
];

const BYTE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn units(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Series handles of a panel, by metric.
#[derive(Debug, Clone)]
enum PanelSeries {
    Cpu {
        total: SeriesId,
        load: SeriesId,
        /// Created on the first snapshot, once the core count is known.
        cores: Vec<SeriesId>,
    },
    Memory {
        used: SeriesId,
        available: SeriesId,
        free: SeriesId,
        swap: SeriesId,
    },
}

/// One chart with its cached render.
pub struct Panel {
    id: PanelId,
    chart: LineChart,
    series: PanelSeries,
    frame: Option<ChartFrame>,
    /// Latest reading of the headline series.
    latest: Option<f64>,
    pub(crate) cache: Cache,
}

impl Panel {
    /// Build the panel `id` with its axes and fixed series.
    pub fn new(id: PanelId, config: ChartConfig) -> Result<Self> {
        let mut chart = LineChart::new(config)?;
        let series = match id {
            PanelId::Cpu => {
                chart.set_sub_chart(AxisAlign::Left, units(&["%"]), 1000.0)?;
                chart.set_sub_chart(AxisAlign::Right, units(&["", "K"]), 1000.0)?;
                let total = chart.add_data_series(
                    AxisAlign::Left,
                    DataSeries::from_hex("Total", palette_color(0))?,
                )?;
                let load = chart.add_data_series(
                    AxisAlign::Right,
                    DataSeries::from_hex("Load", palette_color(1))?,
                )?;
                PanelSeries::Cpu {
                    total,
                    load,
                    cores: Vec::new(),
                }
            }
            PanelId::Memory => {
                chart.set_sub_chart(AxisAlign::Left, units(BYTE_UNITS), 1024.0)?;
                chart.set_sub_chart(AxisAlign::Right, units(BYTE_UNITS), 1024.0)?;
                let used = chart.add_data_series(
                    AxisAlign::Left,
                    DataSeries::from_hex("Used", palette_color(0))?,
                )?;
                let available = chart.add_data_series(
                    AxisAlign::Left,
                    DataSeries::from_hex("Available", palette_color(2))?,
                )?;
                let free = chart.add_data_series(
                    AxisAlign::Left,
                    DataSeries::from_hex("Free", palette_color(5))?,
                )?;
                let swap = chart.add_data_series(
                    AxisAlign::Right,
                    DataSeries::from_hex("Swap", palette_color(3))?,
                )?;
                PanelSeries::Memory {
                    used,
                    available,
                    free,
                    swap,
                }
            }
        };

        Ok(Self {
            id,
            chart,
            series,
            frame: None,
            latest: None,
            cache: Cache::new(),
        })
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn chart(&self) -> &LineChart {
        &self.chart
    }

    pub fn frame(&self) -> Option<&ChartFrame> {
        self.frame.as_ref()
    }

    /// Latest headline reading and its axis unit.
    pub fn headline(&self) -> Option<(f64, &'static str)> {
        let unit = match self.id {
            PanelId::Cpu => "%",
            PanelId::Memory => "B",
        };
        self.latest.map(|value| (value, unit))
    }

    /// Append every metric of `snapshot` to its series.
    pub fn ingest(&mut self, snapshot: &Snapshot) {
        let time = snapshot.time;
        let mut points: Vec<(SeriesId, f64)> = Vec::new();

        match &mut self.series {
            PanelSeries::Cpu { total, load, cores } => {
                while cores.len() < snapshot.cpu_cores.len() {
                    let index = cores.len();
                    let series = match DataSeries::from_hex(
                        format!("Core {}", index),
                        palette_color(index + 2),
                    ) {
                        Ok(series) => series,
                        Err(e) => {
                            warn!(error = %e, "Invalid series color");
                            break;
                        }
                    };
                    match self.chart.add_data_series(AxisAlign::Left, series) {
                        Ok(id) => cores.push(id),
                        Err(e) => {
                            warn!(error = %e, "Failed to add core series");
                            break;
                        }
                    }
                }
                debug!(cores = cores.len(), "CPU series ready");

                points.push((*total, snapshot.cpu_total));
                points.push((*load, snapshot.load_one));
                points.extend(cores.iter().copied().zip(snapshot.cpu_cores.iter().copied()));
                self.latest = Some(snapshot.cpu_total);
            }
            PanelSeries::Memory {
                used,
                available,
                free,
                swap,
            } => {
                points.push((*used, snapshot.memory_used));
                points.push((*available, snapshot.memory_available));
                points.push((*free, snapshot.memory_free));
                points.push((*swap, snapshot.swap_used));
                self.latest = Some(snapshot.memory_used);
            }
        }

        for (id, value) in points {
            if let Err(e) = self.chart.add_data_point(id, value, time) {
                warn!(panel = %self.id, series = %id, error = %e, "Rejected sample");
            }
        }
        self.chart.update_end_time(time);
        self.refresh();
    }

    pub fn apply_gesture(&mut self, gesture: Gesture) {
        self.chart.apply_gesture(gesture);
        self.refresh();
    }

    pub fn toggle_series(&mut self, id: SeriesId) {
        match self.chart.toggle_series(id) {
            Ok(_) => self.refresh(),
            Err(e) => warn!(panel = %self.id, error = %e, "Cannot toggle series"),
        }
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.chart.scroll_to(offset);
        self.refresh();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.chart.resize(width as f64, height as f64);
        self.refresh();
    }

    /// Re-render after a mutation.
    fn refresh(&mut self) {
        self.frame = self.chart.render();
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoSimulator;

    #[test]
    fn test_cpu_panel_adds_core_series_lazily() {
        let mut panel = Panel::new(PanelId::Cpu, ChartConfig::default()).unwrap();
        assert_eq!(panel.chart().menu().len(), 2);

        let mut sim = DemoSimulator::with_seed(1, 3);
        panel.ingest(&sim.tick(1000));
        assert_eq!(panel.chart().menu().len(), 5);

        panel.ingest(&sim.tick(2000));
        assert_eq!(panel.chart().menu().len(), 5);

        let titles: Vec<_> = panel
            .chart()
            .menu()
            .buttons()
            .iter()
            .map(|b| b.title.clone())
            .collect();
        assert_eq!(titles, vec!["Total", "Load", "Core 0", "Core 1", "Core 2"]);
    }

    #[test]
    fn test_memory_panel_renders_after_resize() {
        let mut panel = Panel::new(PanelId::Memory, ChartConfig::default()).unwrap();
        let mut sim = DemoSimulator::with_seed(9, 2);
        for i in 0..20 {
            panel.ingest(&sim.tick(i * 1000));
        }
        // No size yet, nothing to draw.
        assert!(panel.frame().is_none());

        panel.resize(200.0, 100.0);
        let frame = panel.frame().unwrap();
        assert_eq!(frame.axes.len(), 2);
        assert_eq!(frame.axis(AxisAlign::Left).unwrap().lines.len(), 3);
        assert_eq!(frame.axis(AxisAlign::Left).unwrap().unit, "GB");
        assert!(panel.headline().is_some());
    }

    #[test]
    fn test_stale_sample_is_rejected_not_fatal() {
        let mut panel = Panel::new(PanelId::Memory, ChartConfig::default()).unwrap();
        let mut sim = DemoSimulator::with_seed(2, 1);
        panel.ingest(&sim.tick(5000));
        panel.ingest(&sim.tick(1000));

        let PanelSeries::Memory { used, .. } = panel.series else {
            panic!("memory panel expected");
        };
        assert_eq!(panel.chart().series(used).unwrap().len(), 1);
    }

    #[test]
    fn test_toggle_hides_line() {
        let mut panel = Panel::new(PanelId::Memory, ChartConfig::default()).unwrap();
        panel.resize(100.0, 100.0);
        let mut sim = DemoSimulator::with_seed(4, 1);
        panel.ingest(&sim.tick(1000));

        let swap = panel.chart().menu().buttons()[3].series;
        panel.toggle_series(swap);
        let frame = panel.frame().unwrap();
        assert!(frame.axis(AxisAlign::Right).unwrap().lines.is_empty());
    }

    #[test]
    fn test_invalid_chart_config_fails_panel() {
        let config = ChartConfig {
            min_scale: 500.0,
            max_scale: 100.0,
            ..ChartConfig::default()
        };
        assert!(Panel::new(PanelId::Cpu, config).is_err());
    }
}
