//! The line chart: sub-charts, visible time window and rendering.
//!
//! The visible window is `[end_time - width * scale, end_time]`. Zooming
//! changes `scale` with the right edge anchored, scrolling shifts
//! `end_time`. Both are clamped to the data extent, which spans from the
//! oldest sample to the newer of the latest sample and the last reported
//! "now":
//!
//! - when the extent is narrower than the window, the window is anchored to
//!   the extent's right end;
//! - otherwise `end_time` stays within `[extent_start + window, extent_end]`.
//!
//! While the scrollbar sits at its right edge the chart follows new data;
//! panning away stops following until the user scrolls back.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ChartConfig;
use crate::data_series::DataSeries;
use crate::error::{Error, Result};
use crate::frame::{AxisFrame, AxisLabel, ChartFrame, ScrollbarFrame, SeriesLine, TimeTick};
use crate::menu::{Menu, MenuEvent};
use crate::scrollbar::Scrollbar;
use crate::unit_label::UnitLabel;

/// Which side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisAlign {
    Left,
    Right,
}

impl AxisAlign {
    pub const ALL: [AxisAlign; 2] = [AxisAlign::Left, AxisAlign::Right];

    fn index(self) -> usize {
        match self {
            AxisAlign::Left => 0,
            AxisAlign::Right => 1,
        }
    }
}

impl fmt::Display for AxisAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisAlign::Left => write!(f, "left"),
            AxisAlign::Right => write!(f, "right"),
        }
    }
}

/// Handle of a series attached to a [`LineChart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(pub(crate) u64);

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pre-decoded user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Wheel notches; positive `dy` is away from the user. With `zoom` set
    /// the vertical delta zooms, otherwise both deltas pan.
    Wheel { dx: f64, dy: f64, zoom: bool },
    /// Pointer drag by `dx` pixels; the content follows the pointer.
    Drag { dx: f64 },
    /// Pinch with the ratio of the new to the old finger distance.
    Pinch { ratio: f64 },
}

/// Smallest gridline interval at least `min_spacing_px` pixels wide.
///
/// Falls back to the largest interval of the ladder.
pub fn suitable_time_step(scale: f64, steps: &[i64], min_spacing_px: f64) -> i64 {
    steps
        .iter()
        .copied()
        .find(|&step| step as f64 / scale >= min_spacing_px)
        .or_else(|| steps.last().copied())
        .unwrap_or(1000)
}

/// One Y axis and its series.
#[derive(Debug, Clone)]
struct SubChart {
    label: UnitLabel,
    series: Vec<(SeriesId, DataSeries)>,
}

fn find_series_mut(
    sub_charts: &mut [Option<SubChart>; 2],
    id: SeriesId,
) -> Option<&mut DataSeries> {
    sub_charts
        .iter_mut()
        .flatten()
        .flat_map(|sub| sub.series.iter_mut())
        .find(|(series_id, _)| *series_id == id)
        .map(|(_, series)| series)
}

/// Interactive time-series chart with up to two Y axes.
#[derive(Debug, Clone)]
pub struct LineChart {
    config: ChartConfig,
    sub_charts: [Option<SubChart>; 2],
    menu: Menu,
    scrollbar: Scrollbar,
    scale: f64,
    end_time: i64,
    now: Option<i64>,
    width: f64,
    height: f64,
    next_series_id: u64,
}

impl LineChart {
    /// Create an empty chart; `config` is validated first.
    pub fn new(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let scale = config.clamp_scale(config.default_scale);
        Ok(Self {
            config,
            sub_charts: [None, None],
            menu: Menu::new(),
            scrollbar: Scrollbar::new(),
            scale,
            end_time: 0,
            now: None,
            width: 0.0,
            height: 0.0,
            next_series_id: 0,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Milliseconds per pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn start_time(&self) -> i64 {
        self.end_time - self.window_ms()
    }

    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    /// Whether the window tracks the newest data.
    pub fn is_following(&self) -> bool {
        self.scrollbar.is_scrolled_to_right_edge()
    }

    fn window_ms(&self) -> i64 {
        (self.width * self.scale).round() as i64
    }

    fn all_series(&self) -> impl Iterator<Item = &DataSeries> {
        self.sub_charts
            .iter()
            .flatten()
            .flat_map(|sub| sub.series.iter().map(|(_, series)| series))
    }

    /// Oldest sample time to the newer of the latest sample and "now".
    pub fn data_extent(&self) -> Option<(i64, i64)> {
        let first = self.all_series().filter_map(DataSeries::first_time).min();
        let last = self.all_series().filter_map(DataSeries::last_time).max();
        let end = match (last, self.now) {
            (Some(last), Some(now)) => last.max(now),
            (last, now) => last.or(now)?,
        };
        Some((first.unwrap_or(end).min(end), end))
    }

    fn clamp_end(&self, end: i64) -> i64 {
        let Some((lo, hi)) = self.data_extent() else {
            return end;
        };
        let window = self.window_ms();
        if hi - lo <= window {
            hi
        } else {
            end.clamp(lo + window, hi)
        }
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar.resize(self.width);
        match self.data_extent() {
            Some((lo, hi)) => {
                let extent_px = (hi - lo) as f64 / self.scale;
                self.scrollbar.set_range(extent_px - self.width);
                // Measured from the right edge so the rounded window length
                // never leaves a gap at `end_time == hi`.
                let from_right = (hi - self.end_time) as f64 / self.scale;
                self.scrollbar
                    .set_position(self.scrollbar.range() - from_right);
            }
            None => {
                self.scrollbar.set_range(0.0);
                self.scrollbar.set_position(0.0);
            }
        }
    }

    fn set_window_end(&mut self, end: i64) {
        self.end_time = self.clamp_end(end);
        self.sync_scrollbar();
    }

    /// Re-clamp after the extent or layout changed, jumping to the newest
    /// data if the chart was following before the change.
    fn refresh_window(&mut self, following: bool) {
        let end = match (following, self.data_extent()) {
            (true, Some((_, hi))) => hi,
            _ => self.end_time,
        };
        self.set_window_end(end);
    }

    /// Set the plot area size in pixels.
    pub fn resize(&mut self, width: f64, height: f64) {
        let following = self.is_following();
        self.width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        for sub in self.sub_charts.iter_mut().flatten() {
            sub.label.set_height(self.height);
        }
        self.refresh_window(following);
        debug!(width = self.width, height = self.height, "Chart resized");
    }

    /// Zoom by `factor`; above one zooms in. The right edge stays put.
    pub fn zoom(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            debug!(factor, "Ignoring invalid zoom factor");
            return;
        }
        self.set_scale(self.scale / factor);
    }

    /// Set the scale directly, clamped into the configured bounds.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        let scale = self.config.clamp_scale(scale);
        if scale == self.scale {
            return;
        }
        let following = self.is_following();
        self.scale = scale;
        self.refresh_window(following);
        debug!(scale = self.scale, "Chart zoomed");
    }

    /// Pan by `delta_pixels`; positive moves towards newer data.
    pub fn scroll(&mut self, delta_pixels: f64) {
        if !delta_pixels.is_finite() {
            return;
        }
        let shift = (delta_pixels * self.scale).round() as i64;
        self.set_window_end(self.end_time.saturating_add(shift));
        debug!(
            start = self.start_time(),
            end = self.end_time,
            following = self.is_following(),
            "Chart scrolled"
        );
    }

    /// Apply a scroll offset reported by the scrollbar widget.
    pub fn scroll_to(&mut self, offset: f64) {
        let Some(position) = self.scrollbar.sync_from_host(offset) else {
            return;
        };
        if let Some((_, hi)) = self.data_extent() {
            let from_right = ((self.scrollbar.range() - position) * self.scale).round() as i64;
            self.set_window_end(hi - from_right);
        }
    }

    /// Report the current time; the window follows it if it was following.
    pub fn update_end_time(&mut self, time: i64) {
        let following = self.is_following();
        self.now = Some(self.now.map_or(time, |now| now.max(time)));
        self.refresh_window(following);
    }

    /// Translate a gesture into zoom or scroll.
    pub fn apply_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Wheel { dy, zoom: true, .. } => self.zoom(self.config.zoom_rate.powf(dy)),
            Gesture::Wheel { dx, dy, zoom: false } => {
                self.scroll((dx - dy) * self.config.wheel_scroll_px)
            }
            Gesture::Drag { dx } => self.scroll(-dx * self.config.drag_rate),
            Gesture::Pinch { ratio } => self.zoom(ratio),
        }
    }

    /// Register (or replace) the unit ladder of an axis.
    ///
    /// Series already attached to the axis are kept.
    pub fn set_sub_chart(
        &mut self,
        align: AxisAlign,
        units: Vec<String>,
        unit_base: f64,
    ) -> Result<()> {
        let mut label = UnitLabel::new(units, unit_base)?.with_layout(self.config.label_layout());
        label.set_height(self.height);

        let slot = &mut self.sub_charts[align.index()];
        if let Some(sub) = slot {
            sub.label = label;
        } else {
            *slot = Some(SubChart {
                label,
                series: Vec::new(),
            });
        }
        debug!(%align, "Sub-chart registered");
        Ok(())
    }

    /// Attach a series to the axis `align`.
    ///
    /// The menu gains a button at the end. Its layout event is not
    /// forwarded: hosts rebuild the button row from [`Self::menu`] on every
    /// view.
    pub fn add_data_series(&mut self, align: AxisAlign, series: DataSeries) -> Result<SeriesId> {
        let following = self.is_following();
        let sub = self.sub_charts[align.index()]
            .as_mut()
            .ok_or(Error::MissingSubChart(align))?;

        let id = SeriesId(self.next_series_id);
        self.next_series_id += 1;

        self.menu.add_data_series(id, &series);
        debug!(series = %id, title = series.title(), %align, "Series attached");
        sub.series.push((id, series));

        self.refresh_window(following);
        Ok(id)
    }

    /// Detach a series and its menu button; `None` if it is not attached.
    pub fn remove_data_series(&mut self, id: SeriesId) -> Option<DataSeries> {
        let following = self.is_following();
        let removed = self.sub_charts.iter_mut().flatten().find_map(|sub| {
            let index = sub.series.iter().position(|(series_id, _)| *series_id == id)?;
            Some(sub.series.remove(index).1)
        })?;

        self.menu.remove_data_series(id);
        debug!(series = %id, "Series detached");
        self.refresh_window(following);
        Some(removed)
    }

    /// Append a sample to an attached series.
    pub fn add_data_point(&mut self, id: SeriesId, value: f64, time: i64) -> Result<()> {
        let following = self.is_following();
        find_series_mut(&mut self.sub_charts, id)
            .ok_or(Error::UnknownSeries(id))?
            .add_data_point(value, time)?;
        self.refresh_window(following);
        Ok(())
    }

    /// Flip a series' visibility through its menu button.
    pub fn toggle_series(&mut self, id: SeriesId) -> Result<MenuEvent> {
        let series = find_series_mut(&mut self.sub_charts, id).ok_or(Error::UnknownSeries(id))?;
        self.menu
            .toggle(id, series)
            .ok_or(Error::UnknownSeries(id))
    }

    pub fn series(&self, id: SeriesId) -> Option<&DataSeries> {
        self.sub_charts
            .iter()
            .flatten()
            .flat_map(|sub| sub.series.iter())
            .find(|(series_id, _)| *series_id == id)
            .map(|(_, series)| series)
    }

    /// Ids of the series attached to `align`, in insertion order.
    pub fn series_ids(&self, align: AxisAlign) -> Vec<SeriesId> {
        self.sub_charts[align.index()]
            .as_ref()
            .map(|sub| sub.series.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default()
    }

    pub fn unit_label(&self, align: AxisAlign) -> Option<&UnitLabel> {
        self.sub_charts[align.index()].as_ref().map(|sub| &sub.label)
    }

    /// True iff some axis has at least one series.
    pub fn should_render(&self) -> bool {
        self.sub_charts
            .iter()
            .flatten()
            .any(|sub| !sub.series.is_empty())
    }

    /// Sample every visible series for the current window.
    ///
    /// Returns `None` when there is nothing to draw.
    pub fn render(&mut self) -> Option<ChartFrame> {
        if !self.should_render() || self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }

        let width = self.width;
        let height = self.height;
        let column_width = self.config.column_width;
        let count = ((width / column_width).floor() as usize).max(1);
        let step = self.scale * column_width;
        let start = self.start_time();
        let end = self.end_time;
        // Column `i` is anchored at `start + i * step`.
        let last_anchor = (start as f64 + (count - 1) as f64 * step).round() as i64;

        let mut axes = Vec::new();
        for align in AxisAlign::ALL {
            let Some(sub) = self.sub_charts[align.index()].as_mut() else {
                continue;
            };
            if sub.series.is_empty() {
                continue;
            }

            let max_value = sub
                .series
                .iter()
                .filter(|(_, series)| series.is_visible())
                .filter_map(|(_, series)| series.max_value(last_anchor, step, count))
                .reduce(f64::max)
                .unwrap_or(0.0);
            sub.label.set_max_value(max_value);
            let y_scale = sub.label.scale();

            let lines: Vec<SeriesLine> = sub
                .series
                .iter()
                .filter(|(_, series)| series.is_visible())
                .map(|(id, series)| SeriesLine {
                    id: *id,
                    title: series.title().to_string(),
                    color: series.color(),
                    points: series
                        .values(last_anchor, step, count)
                        .into_iter()
                        .enumerate()
                        .map(|(i, value)| {
                            value.map(|v| {
                                let x = i as f64 * column_width;
                                (x as f32, (height - v * y_scale) as f32)
                            })
                        })
                        .collect(),
                })
                .collect();

            let texts = sub.label.labels();
            let spacing = if texts.len() > 1 {
                height / (texts.len() - 1) as f64
            } else {
                0.0
            };
            let labels = texts
                .iter()
                .enumerate()
                .map(|(i, text)| AxisLabel {
                    text: text.clone(),
                    y: (i as f64 * spacing) as f32,
                })
                .collect();

            axes.push(AxisFrame {
                align,
                unit: sub.label.unit().to_string(),
                labels,
                lines,
            });
        }

        let tick_step = suitable_time_step(
            self.scale,
            &self.config.time_steps_ms,
            self.config.min_time_label_spacing,
        );
        let mut tick = start.div_euclid(tick_step) * tick_step;
        if tick < start {
            tick += tick_step;
        }
        let mut time_ticks = Vec::new();
        while tick <= end {
            time_ticks.push(TimeTick {
                time: tick,
                x: ((tick - start) as f64 / self.scale) as f32,
            });
            tick += tick_step;
        }

        trace!(start, end, columns = count, axes = axes.len(), "Chart rendered");

        Some(ChartFrame {
            width: width as f32,
            height: height as f32,
            start_time: start,
            end_time: end,
            scale: self.scale,
            axes,
            time_ticks,
            scrollbar: ScrollbarFrame {
                range: self.scrollbar.range(),
                position: self.scrollbar.position(),
                width: self.scrollbar.width(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// 100x100 px chart at 100 ms/px (10s window) with one series sampled
    /// every second from 0 to 30s.
    fn chart_with_data() -> (LineChart, SeriesId) {
        let mut chart = LineChart::new(ChartConfig::default()).unwrap();
        chart.resize(100.0, 100.0);
        chart
            .set_sub_chart(AxisAlign::Left, units(&["%"]), 1000.0)
            .unwrap();
        let id = chart
            .add_data_series(
                AxisAlign::Left,
                DataSeries::from_hex("cpu", "#2196f3").unwrap(),
            )
            .unwrap();
        for i in 0..=30 {
            chart.add_data_point(id, 50.0, i * 1000).unwrap();
        }
        (chart, id)
    }

    #[test]
    fn test_should_render_requires_series() {
        let mut chart = LineChart::new(ChartConfig::default()).unwrap();
        chart.resize(100.0, 100.0);
        assert!(!chart.should_render());
        assert!(chart.render().is_none());

        chart
            .set_sub_chart(AxisAlign::Right, units(&["B", "KB"]), 1024.0)
            .unwrap();
        assert!(!chart.should_render());

        let id = chart
            .add_data_series(AxisAlign::Right, DataSeries::from_hex("x", "#000").unwrap())
            .unwrap();
        assert!(chart.should_render());

        chart.remove_data_series(id).unwrap();
        assert!(!chart.should_render());
        assert!(chart.menu().is_empty());
    }

    #[test]
    fn test_menu_follows_series_registry() {
        let (mut chart, cpu) = chart_with_data();
        let load = chart
            .add_data_series(AxisAlign::Left, DataSeries::from_hex("load", "#ff9800").unwrap())
            .unwrap();
        let ids: Vec<_> = chart.menu().buttons().iter().map(|b| b.series).collect();
        assert_eq!(ids, vec![cpu, load]);

        chart.remove_data_series(cpu).unwrap();
        let ids: Vec<_> = chart.menu().buttons().iter().map(|b| b.series).collect();
        assert_eq!(ids, vec![load]);
        assert!(chart.menu().button(cpu).is_none());
    }

    #[test]
    fn test_add_series_without_sub_chart() {
        let mut chart = LineChart::new(ChartConfig::default()).unwrap();
        let err = chart
            .add_data_series(AxisAlign::Left, DataSeries::from_hex("x", "#000").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::MissingSubChart(AxisAlign::Left)));
    }

    #[test]
    fn test_unknown_series() {
        let (mut chart, id) = chart_with_data();
        chart.remove_data_series(id);
        assert!(matches!(
            chart.add_data_point(id, 1.0, 40_000),
            Err(Error::UnknownSeries(_))
        ));
        assert!(chart.toggle_series(id).is_err());
        assert!(chart.remove_data_series(id).is_none());
    }

    #[test]
    fn test_follows_new_data() {
        let (mut chart, id) = chart_with_data();
        assert!(chart.is_following());
        assert_eq!(chart.end_time(), 30_000);
        assert_eq!(chart.start_time(), 20_000);

        chart.add_data_point(id, 50.0, 31_000).unwrap();
        assert_eq!(chart.end_time(), 31_000);

        chart.update_end_time(35_000);
        assert_eq!(chart.end_time(), 35_000);
    }

    #[test]
    fn test_manual_pan_stops_following() {
        let (mut chart, id) = chart_with_data();

        chart.scroll(-50.0);
        assert_eq!(chart.end_time(), 25_000);
        assert!(!chart.is_following());

        chart.add_data_point(id, 50.0, 31_000).unwrap();
        chart.update_end_time(32_000);
        assert_eq!(chart.end_time(), 25_000);

        chart.scroll(1000.0);
        assert_eq!(chart.end_time(), 32_000);
        assert!(chart.is_following());

        chart.update_end_time(40_000);
        assert_eq!(chart.end_time(), 40_000);
    }

    #[test]
    fn test_scroll_clamps_to_oldest_sample() {
        let (mut chart, _) = chart_with_data();
        chart.scroll(-1e6);
        assert_eq!(chart.start_time(), 0);
        assert_eq!(chart.end_time(), 10_000);
        assert_eq!(chart.scrollbar().position(), 0.0);
    }

    #[test]
    fn test_narrow_data_is_right_anchored() {
        let mut chart = LineChart::new(ChartConfig::default()).unwrap();
        chart.resize(100.0, 100.0);
        chart
            .set_sub_chart(AxisAlign::Left, units(&["%"]), 1000.0)
            .unwrap();
        let id = chart
            .add_data_series(AxisAlign::Left, DataSeries::from_hex("x", "#000").unwrap())
            .unwrap();
        for i in 0..=5 {
            chart.add_data_point(id, 1.0, i * 1000).unwrap();
        }
        assert_eq!(chart.end_time(), 5000);

        chart.scroll(-100.0);
        assert_eq!(chart.end_time(), 5000);
        chart.scroll(100.0);
        assert_eq!(chart.end_time(), 5000);
        assert_eq!(chart.scrollbar().range(), 0.0);
    }

    #[test]
    fn test_scroll_to_round_trips_through_scrollbar() {
        let (mut chart, _) = chart_with_data();
        assert_eq!(chart.scrollbar().range(), 200.0);
        assert_eq!(chart.scrollbar().position(), 200.0);

        chart.scroll_to(0.0);
        assert_eq!(chart.start_time(), 0);
        assert_eq!(chart.end_time(), 10_000);

        chart.scroll_to(1e6);
        assert_eq!(chart.scrollbar().position(), 200.0);
        assert_eq!(chart.end_time(), 30_000);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut chart = LineChart::new(ChartConfig::default()).unwrap();
        chart.zoom(1000.0);
        assert_eq!(chart.scale(), 10.0);
        chart.zoom(1e-9);
        assert_eq!(chart.scale(), 60_000.0);
    }

    #[test]
    fn test_zoom_round_trip() {
        let (mut chart, _) = chart_with_data();
        let scale = chart.scale();
        chart.zoom(2.0);
        assert_eq!(chart.scale(), 50.0);
        chart.zoom(0.5);
        assert_eq!(chart.scale(), scale);
    }

    #[test]
    fn test_zoom_keeps_right_edge() {
        let (mut chart, _) = chart_with_data();
        chart.zoom(2.0);
        assert_eq!(chart.end_time(), 30_000);
        assert_eq!(chart.start_time(), 25_000);
    }

    #[test]
    fn test_invalid_zoom_ignored() {
        let mut chart = LineChart::new(ChartConfig::default()).unwrap();
        chart.zoom(0.0);
        chart.zoom(-2.0);
        chart.zoom(f64::NAN);
        assert_eq!(chart.scale(), 100.0);
    }

    #[test]
    fn test_gestures() {
        let (mut chart, _) = chart_with_data();
        chart.apply_gesture(Gesture::Wheel {
            dx: 0.0,
            dy: 1.0,
            zoom: true,
        });
        assert_eq!(chart.scale(), 80.0);

        chart.apply_gesture(Gesture::Pinch { ratio: 0.5 });
        assert_eq!(chart.scale(), 160.0);

        chart.apply_gesture(Gesture::Drag { dx: 20.0 });
        assert_eq!(chart.end_time(), 26_800);

        chart.apply_gesture(Gesture::Wheel {
            dx: 0.0,
            dy: -1.0,
            zoom: false,
        });
        assert_eq!(chart.end_time(), 30_000);
    }

    #[test]
    fn test_suitable_time_step() {
        let steps = ChartConfig::default().time_steps_ms;
        assert_eq!(suitable_time_step(100.0, &steps, 80.0), 30_000);
        assert_eq!(suitable_time_step(10.0, &steps, 80.0), 1000);
        assert_eq!(suitable_time_step(60_000.0, &steps, 80.0), 5 * 3_600_000);
        assert_eq!(suitable_time_step(1e6, &steps, 80.0), 10 * 3_600_000);
    }

    #[test]
    fn test_render_frame() {
        let (mut chart, id) = chart_with_data();
        let frame = chart.render().unwrap();

        assert_eq!(frame.start_time, 20_000);
        assert_eq!(frame.end_time, 30_000);
        assert_eq!(frame.axes.len(), 1);

        let axis = frame.axis(AxisAlign::Left).unwrap();
        assert_eq!(axis.unit, "%");
        let texts: Vec<_> = axis.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["50 %", "40 %", "30 %", "20 %", "10 %", "0 %"]);
        assert_eq!(axis.labels[0].y, 0.0);
        assert_eq!(axis.labels[5].y, 100.0);

        let line = &axis.lines[0];
        assert_eq!(line.id, id);
        assert_eq!(line.points.len(), 100);
        assert_eq!(line.points[0], Some((0.0, 0.0)));
        assert_eq!(line.points[99], Some((99.0, 0.0)));
        assert!(line.points.iter().all(|p| p.is_some()));

        assert_eq!(frame.time_ticks.len(), 1);
        assert_eq!(frame.time_ticks[0].time, 30_000);
        assert_eq!(frame.time_ticks[0].x, 100.0);
    }

    #[test]
    fn test_hidden_series_are_not_drawn() {
        let (mut chart, id) = chart_with_data();
        assert_eq!(chart.toggle_series(id).unwrap(), MenuEvent::Redraw);
        assert!(!chart.series(id).unwrap().is_visible());

        let frame = chart.render().unwrap();
        assert!(frame.lines().next().is_none());
        assert!(!chart.menu().button(id).unwrap().visible);
    }

    #[test]
    fn test_render_two_axes() {
        let (mut chart, _) = chart_with_data();
        chart
            .set_sub_chart(
                AxisAlign::Right,
                units(&["B", "KB", "MB", "GB", "TB", "PB"]),
                1024.0,
            )
            .unwrap();
        let mem = chart
            .add_data_series(
                AxisAlign::Right,
                DataSeries::from_hex("memory", "#4caf50").unwrap(),
            )
            .unwrap();
        for time in [29_000, 30_000] {
            chart
                .add_data_point(mem, 3.0 * 1024.0 * 1024.0 * 1024.0, time)
                .unwrap();
        }

        let frame = chart.render().unwrap();
        assert_eq!(frame.axes.len(), 2);
        let right = frame.axis(AxisAlign::Right).unwrap();
        assert_eq!(right.unit, "GB");
        // Only the last second of the window holds memory data.
        let points = &right.lines[0].points;
        assert!(points[..90].iter().all(Option::is_none));
        assert!(points[90..].iter().all(Option::is_some));
    }

    #[test]
    fn test_columns_tile_the_window_from_its_start() {
        let mut chart = LineChart::new(ChartConfig::default()).unwrap();
        chart.resize(100.0, 100.0);
        chart
            .set_sub_chart(AxisAlign::Left, units(&["%"]), 1000.0)
            .unwrap();
        let id = chart
            .add_data_series(AxisAlign::Left, DataSeries::from_hex("x", "#000").unwrap())
            .unwrap();
        for i in 0..=30 {
            chart.add_data_point(id, i as f64, i * 1000).unwrap();
        }
        chart.scroll(-100.0);
        assert_eq!(chart.start_time(), 10_000);
        assert_eq!(chart.end_time(), 20_000);

        let frame = chart.render().unwrap();
        let axis = frame.axis(AxisAlign::Left).unwrap();
        assert_eq!(axis.labels[0].text, "20 %");
        let points = &axis.lines[0].points;
        // Column 0 holds the sample at the window start; later samples are
        // outside every column.
        assert_eq!(points[0], Some((0.0, 50.0)));
        assert_eq!(points[99].map(|(x, _)| x), Some(99.0));
    }

    #[test]
    fn test_sub_millisecond_scale_follows_new_data() {
        let config = ChartConfig {
            min_scale: 0.1,
            default_scale: 0.3,
            ..ChartConfig::default()
        };
        let mut chart = LineChart::new(config).unwrap();
        chart.resize(105.0, 50.0);
        chart
            .set_sub_chart(AxisAlign::Left, units(&["%"]), 1000.0)
            .unwrap();
        let id = chart
            .add_data_series(AxisAlign::Left, DataSeries::from_hex("x", "#000").unwrap())
            .unwrap();
        for time in 0..=100 {
            chart.add_data_point(id, 1.0, time).unwrap();
            chart.update_end_time(time);
            assert!(chart.is_following(), "lost the right edge at {time}");
        }
        assert_eq!(chart.end_time(), 100);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ChartConfig {
            min_scale: 500.0,
            max_scale: 100.0,
            ..ChartConfig::default()
        };
        assert!(matches!(LineChart::new(config), Err(Error::Config(_))));

        let config = ChartConfig {
            column_width: 0.0,
            ..ChartConfig::default()
        };
        assert!(LineChart::new(config).is_err());

        let config = ChartConfig {
            time_steps_ms: vec![0, 1000],
            ..ChartConfig::default()
        };
        assert!(LineChart::new(config).is_err());
    }
}
