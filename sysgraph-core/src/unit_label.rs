//! Y-axis unit selection and labelling.
//!
//! Scaling happens in two independent stages: a unit is picked from the
//! ladder so the maximum value reads as a small number, then a round step
//! (`1`, `2` or `5` times a power of ten) is picked so the labels fit in the
//! available height.

use crate::error::{Error, Result};

/// A value expressed in a unit of the ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuitableUnit {
    /// The value divided by `base^unit_idx`.
    pub value: f64,
    /// Index into the unit ladder.
    pub unit_idx: usize,
}

/// Pick the largest unit whose scaled value is still at least one.
///
/// The index never exceeds the last unit of the ladder; bigger values are
/// expressed as large multiples of the last unit.
pub fn suitable_unit<T>(value: f64, units: &[T], unit_base: f64) -> SuitableUnit {
    let mut scaled = value;
    let mut unit_idx = 0;
    while unit_idx + 1 < units.len() && scaled >= unit_base {
        scaled /= unit_base;
        unit_idx += 1;
    }
    SuitableUnit {
        value: scaled,
        unit_idx,
    }
}

/// Number of `step`s needed to reach `value`, rounded up.
fn steps_to_cover(value: f64, step: f64) -> f64 {
    let mut steps = (value / step).ceil();
    if steps * step < value {
        steps += 1.0;
    }
    // 1.1 / 0.1 is 11.000000000000002 in floating point.
    if steps > 0.0 && (steps - 1.0) * step >= value {
        steps -= 1.0;
    }
    steps
}

/// Smallest round value that is a multiple of `step` and not below `value`.
pub fn top_label_value(value: f64, step: f64) -> f64 {
    steps_to_cover(value, step) * step
}

/// Smallest `{1, 2, 5} x 10^n` step that labels `[0, value]` with at most
/// `max_label_count` labels, zero included.
pub fn suitable_step_size(value: f64, max_label_count: usize) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }

    let max_intervals = max_label_count.saturating_sub(1).max(1) as f64;
    let mut magnitude = 10f64.powf((value / max_intervals).log10().floor());
    loop {
        for multiplier in [1.0, 2.0, 5.0] {
            let step = multiplier * magnitude;
            if steps_to_cover(value, step) <= max_intervals {
                return step;
            }
        }
        magnitude *= 10.0;
    }
}

/// Decimal places needed to print multiples of `step` exactly.
fn label_precision(step: f64) -> usize {
    if step >= 1.0 {
        0
    } else {
        (-step.log10() - 1e-9).ceil() as usize
    }
}

/// Font and spacing limits for axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    /// Height of one label in pixels.
    pub font_height: f64,
    /// Minimum gap between two labels in pixels.
    pub min_label_spacing: f64,
    /// Upper bound on the label count regardless of height.
    pub max_labels: usize,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            font_height: 12.0,
            min_label_spacing: 8.0,
            max_labels: 8,
        }
    }
}

/// Unit, step, labels and pixel scale for one axis.
#[derive(Debug, Clone)]
pub struct UnitLabel {
    units: Vec<String>,
    unit_base: f64,
    layout: LabelLayout,
    height: f64,
    max_label_count: usize,
    /// Last value given to `set_max_value`.
    max_value: Option<f64>,
    dirty: bool,
    unit_idx: usize,
    step_size: f64,
    top_value: f64,
    labels: Vec<String>,
    scale: f64,
}

impl UnitLabel {
    /// Create a label for the given unit ladder.
    pub fn new(units: Vec<String>, unit_base: f64) -> Result<Self> {
        if units.is_empty() {
            return Err(Error::EmptyUnitLadder);
        }
        if !unit_base.is_finite() || unit_base <= 1.0 {
            return Err(Error::InvalidUnitBase(unit_base));
        }

        Ok(Self {
            units,
            unit_base,
            layout: LabelLayout::default(),
            height: 0.0,
            max_label_count: 2,
            max_value: None,
            dirty: true,
            unit_idx: 0,
            step_size: 1.0,
            top_value: 1.0,
            labels: Vec::new(),
            scale: 0.0,
        })
    }

    /// Replace the label font/spacing limits.
    pub fn with_layout(mut self, layout: LabelLayout) -> Self {
        self.layout = layout;
        self.update_max_label_count();
        self
    }

    /// Set the pixel height available to the axis.
    pub fn set_height(&mut self, height: f64) {
        if self.height != height {
            self.height = height.max(0.0);
            self.update_max_label_count();
        }
    }

    fn update_max_label_count(&mut self) {
        let per_label = (self.layout.font_height + self.layout.min_label_spacing).max(1.0);
        let fitting = 1 + (self.height / per_label).floor() as usize;
        self.max_label_count = fitting.clamp(2, self.layout.max_labels.max(2));
        self.dirty = true;
    }

    /// Rescale the axis for a new maximum value.
    ///
    /// Negative or non-finite values count as zero.
    pub fn set_max_value(&mut self, value: f64) {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        if !self.dirty && self.max_value == Some(value) {
            return;
        }
        self.max_value = Some(value);
        self.dirty = false;

        let unit = suitable_unit(value, &self.units, self.unit_base);
        let step = suitable_step_size(unit.value, self.max_label_count);
        let steps = steps_to_cover(unit.value, step).max(1.0);

        self.unit_idx = unit.unit_idx;
        self.step_size = step;
        self.top_value = steps * step;

        let precision = label_precision(step);
        let unit_str = &self.units[self.unit_idx];
        self.labels = (0..=steps as usize)
            .rev()
            .map(|i| {
                let label = format!("{:.*} {}", precision, i as f64 * step, unit_str);
                label.trim_end().to_string()
            })
            .collect();

        let top_raw = self.top_value * self.unit_base.powi(self.unit_idx as i32);
        self.scale = if self.height > 0.0 {
            self.height / top_raw
        } else {
            0.0
        };
    }

    /// Labels from the top value down to zero.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Pixels per raw value unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Currently selected unit suffix.
    pub fn unit(&self) -> &str {
        &self.units[self.unit_idx]
    }

    pub fn unit_index(&self) -> usize {
        self.unit_idx
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn unit_base(&self) -> f64 {
        self.unit_base
    }

    /// Step between labels, in the current unit.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Value of the top label, in the current unit.
    pub fn top_value(&self) -> f64 {
        self.top_value
    }

    pub fn max_label_count(&self) -> usize {
        self.max_label_count
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
