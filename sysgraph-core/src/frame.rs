//! Renderer-agnostic description of one rendered chart frame.
//!
//! Coordinates are pixels relative to the top-left corner of the plot area;
//! `y` grows downwards.

use crate::color::Rgb;
use crate::line_chart::{AxisAlign, SeriesId};

/// Everything a renderer needs to draw the chart once.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub width: f32,
    pub height: f32,
    pub start_time: i64,
    pub end_time: i64,
    /// Milliseconds per pixel.
    pub scale: f64,
    pub axes: Vec<AxisFrame>,
    pub time_ticks: Vec<TimeTick>,
    pub scrollbar: ScrollbarFrame,
}

impl ChartFrame {
    pub fn axis(&self, align: AxisAlign) -> Option<&AxisFrame> {
        self.axes.iter().find(|axis| axis.align == align)
    }

    /// Iterate every drawn series line across axes.
    pub fn lines(&self) -> impl Iterator<Item = &SeriesLine> {
        self.axes.iter().flat_map(|axis| axis.lines.iter())
    }
}

/// One Y axis with its labels and series.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisFrame {
    pub align: AxisAlign,
    pub unit: String,
    pub labels: Vec<AxisLabel>,
    pub lines: Vec<SeriesLine>,
}

/// A Y-axis label and the height of its gridline.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub y: f32,
}

/// One visible series, one point per column.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLine {
    pub id: SeriesId,
    pub title: String,
    pub color: Rgb,
    /// `None` where the column has no data.
    pub points: Vec<Option<(f32, f32)>>,
}

impl SeriesLine {
    /// Contiguous runs of points, split at columns without data.
    pub fn segments(&self) -> Vec<Vec<(f32, f32)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point {
                Some(p) => current.push(*p),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// A vertical time gridline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeTick {
    /// Unix epoch milliseconds.
    pub time: i64,
    pub x: f32,
}

/// Scrollbar state at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarFrame {
    pub range: f64,
    pub position: f64,
    pub width: f64,
}

impl ScrollbarFrame {
    /// Thumb offset and length on a track `track_width` pixels wide.
    pub fn thumb(&self, track_width: f32) -> (f32, f32) {
        let content = self.width + self.range;
        if content <= 0.0 || self.range <= 0.0 {
            return (0.0, track_width);
        }
        let length = (track_width as f64 * self.width / content).max(8.0);
        let travel = (track_width as f64 - length).max(0.0);
        let offset = travel * self.position / self.range;
        (offset as f32, length as f32)
    }

    /// Scroll offset for a thumb dragged to `thumb_offset` on the track.
    pub fn position_for_thumb(&self, thumb_offset: f32, track_width: f32) -> f64 {
        let (_, length) = self.thumb(track_width);
        let travel = (track_width - length) as f64;
        if travel <= 0.0 {
            return 0.0;
        }
        thumb_offset as f64 / travel * self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_split_on_gaps() {
        let line = SeriesLine {
            id: SeriesId(0),
            title: "t".to_string(),
            color: Rgb::BLACK,
            points: vec![
                None,
                Some((0.0, 1.0)),
                Some((1.0, 2.0)),
                None,
                None,
                Some((4.0, 1.0)),
            ],
        };
        let segments = line.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(0.0, 1.0), (1.0, 2.0)]);
        assert_eq!(segments[1], vec![(4.0, 1.0)]);
    }

    #[test]
    fn test_thumb_geometry() {
        let bar = ScrollbarFrame {
            range: 300.0,
            position: 300.0,
            width: 100.0,
        };
        let (offset, length) = bar.thumb(400.0);
        assert_eq!(length, 100.0);
        assert_eq!(offset, 300.0);
        assert_eq!(bar.position_for_thumb(150.0, 400.0), 150.0);

        let full = ScrollbarFrame {
            range: 0.0,
            position: 0.0,
            width: 100.0,
        };
        assert_eq!(full.thumb(400.0), (0.0, 400.0));
    }
}
