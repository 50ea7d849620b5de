//! Time-series storage and per-column sampling.
//!
//! A [`DataSeries`] keeps its samples sorted by time. Every query starts
//! from a binary search ([`DataSeries::find_first_point_index`]) and then
//! walks forward, so callers that sweep a window from left to right can pass
//! the returned index hint back in and never rescan from zero.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{Error, Result};

/// One recorded measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Unix epoch milliseconds.
    pub time: i64,
    pub value: f64,
}

impl Sample {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Result of a point lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleValue {
    /// Value in effect at the queried time, `None` outside the recorded range.
    pub value: Option<f64>,
    /// Index of the first sample at or after the queried time. Pass it as the
    /// start index of the next, later lookup.
    pub next_index: usize,
}

/// Linear interpolation between two samples.
///
/// Returns `a.value` when both samples share a timestamp.
pub fn linear_interpolation(a: &Sample, b: &Sample, time: f64) -> f64 {
    if a.time == b.time {
        return a.value;
    }
    let ratio = (time - a.time as f64) / (b.time - a.time) as f64;
    a.value + (b.value - a.value) * ratio
}

/// A named, colored series of samples.
#[derive(Debug, Clone)]
pub struct DataSeries {
    title: String,
    color: Rgb,
    samples: Vec<Sample>,
    visible: bool,
}

/// Aggregate of the samples inside one column span.
#[derive(Debug, Clone, Copy)]
struct ColumnStats {
    sum: f64,
    count: usize,
    max: f64,
}

impl ColumnStats {
    fn single(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
            max: value,
        }
    }

    fn average(&self) -> f64 {
        self.sum / self.count as f64
    }
}

impl DataSeries {
    /// Create an empty, visible series.
    pub fn new(title: impl Into<String>, color: Rgb) -> Self {
        Self {
            title: title.into(),
            color,
            samples: Vec::new(),
            visible: true,
        }
    }

    /// Create a series from a `#rrggbb` color string.
    pub fn from_hex(title: impl Into<String>, color: &str) -> Result<Self> {
        Ok(Self::new(title, Rgb::parse(color)?))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the oldest sample.
    pub fn first_time(&self) -> Option<i64> {
        self.samples.first().map(|s| s.time)
    }

    /// Time of the newest sample.
    pub fn last_time(&self) -> Option<i64> {
        self.samples.last().map(|s| s.time)
    }

    /// Append a sample.
    ///
    /// Samples must arrive in non-decreasing time order; an older timestamp
    /// is rejected so the binary searches stay valid.
    pub fn add_data_point(&mut self, value: f64, time: i64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::NonFiniteValue(value));
        }
        match self.last_time() {
            Some(last) if time < last => return Err(Error::OutOfOrderSample { last, time }),
            _ => {}
        }
        self.samples.push(Sample::new(time, value));
        Ok(())
    }

    /// Index of the first sample with `sample.time >= time`, or `len()`.
    pub fn find_first_point_index(&self, time: i64) -> usize {
        self.samples.partition_point(|s| s.time < time)
    }

    /// Value in effect at `time`, searching from `start_index`.
    ///
    /// An exact timestamp match returns that sample. Otherwise the nearest
    /// earlier sample is held until the next one; no interpolation happens
    /// across the gap.
    pub fn sample_value(&self, start_index: usize, time: i64) -> SampleValue {
        let start = start_index.min(self.samples.len());
        let index = start + self.samples[start..].partition_point(|s| s.time < time);

        let value = match self.samples.get(index) {
            Some(sample) if sample.time == time => Some(sample.value),
            Some(_) if index > 0 => Some(self.samples[index - 1].value),
            _ => None,
        };

        SampleValue {
            value,
            next_index: index,
        }
    }

    /// One averaged value per column.
    ///
    /// Column `i` is anchored at `end_time - (count - 1 - i) * step` and
    /// covers `[anchor, anchor + step)`. Empty columns fall back to the
    /// interpolated value at the anchor, or `None` outside the data.
    pub fn values(&self, end_time: i64, step: f64, count: usize) -> Vec<Option<f64>> {
        self.columns(end_time, step, count)
            .map(|column| column.map(|stats| stats.average()))
            .collect()
    }

    /// Largest per-column value over the same columns as [`Self::values`].
    ///
    /// Columns without data are skipped; `None` if all of them are empty.
    pub fn max_value(&self, end_time: i64, step: f64, count: usize) -> Option<f64> {
        self.columns(end_time, step, count)
            .flatten()
            .map(|stats| stats.max)
            .reduce(f64::max)
    }

    fn columns(
        &self,
        end_time: i64,
        step: f64,
        count: usize,
    ) -> impl Iterator<Item = Option<ColumnStats>> + '_ {
        let mut index = 0;
        (0..count).map(move |i| {
            let anchor = end_time as f64 - (count - 1 - i) as f64 * step;
            let (stats, next_index) = self.column(index, anchor, step);
            index = next_index;
            stats
        })
    }

    fn column(&self, start_index: usize, anchor: f64, step: f64) -> (Option<ColumnStats>, usize) {
        let data = &self.samples;
        let start = start_index.min(data.len());
        let begin = start + data[start..].partition_point(|s| (s.time as f64) < anchor);

        let span_end = anchor + step;
        let mut end = begin;
        let mut stats: Option<ColumnStats> = None;
        while end < data.len() && (data[end].time as f64) < span_end {
            let value = data[end].value;
            stats = Some(match stats {
                Some(s) => ColumnStats {
                    sum: s.sum + value,
                    count: s.count + 1,
                    max: s.max.max(value),
                },
                None => ColumnStats::single(value),
            });
            end += 1;
        }

        if stats.is_none() && begin > 0 && begin < data.len() {
            let value = linear_interpolation(&data[begin - 1], &data[begin], anchor);
            stats = Some(ColumnStats::single(value));
        }

        (stats, end)
    }
}
