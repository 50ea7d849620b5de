//! Horizontal scrollbar model.

/// Tolerance, in pixels, for "scrolled to the right edge".
const RIGHT_EDGE_TOLERANCE: f64 = 0.5;

/// Scroll range and position of the time window, in pixels.
///
/// `position` always lies in `[0, range]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scrollbar {
    range: f64,
    position: f64,
    width: f64,
}

impl Scrollbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum scroll offset.
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Current scroll offset.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Visible width of the scrolled content.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Set the maximum offset, pulling the position back if needed.
    pub fn set_range(&mut self, range: f64) {
        self.range = if range.is_finite() { range.max(0.0) } else { 0.0 };
        if self.position > self.range {
            self.position = self.range;
        }
    }

    /// Move to `position`, clamped into `[0, range]`.
    ///
    /// Returns whether the position changed.
    pub fn set_position(&mut self, position: f64) -> bool {
        let clamped = if position.is_nan() {
            self.position
        } else {
            position.clamp(0.0, self.range)
        };
        let changed = clamped != self.position;
        self.position = clamped;
        changed
    }

    pub fn resize(&mut self, width: f64) {
        self.width = width.max(0.0);
    }

    pub fn is_scrolled_to_right_edge(&self) -> bool {
        self.position >= self.range - RIGHT_EDGE_TOLERANCE
    }

    pub fn scroll_to_right_edge(&mut self) {
        self.position = self.range;
    }

    /// Apply an offset reported by the host widget.
    ///
    /// The offset goes through the same clamping as [`Self::set_position`];
    /// the clamped position is returned only when it changed.
    pub fn sync_from_host(&mut self, offset: f64) -> Option<f64> {
        self.set_position(offset).then_some(self.position)
    }

    /// Fraction of the content that is visible, in `(0, 1]`.
    pub fn thumb_ratio(&self) -> f64 {
        let content = self.width + self.range;
        if content <= 0.0 {
            1.0
        } else {
            self.width / content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamped_to_range() {
        let mut bar = Scrollbar::new();
        bar.set_range(100.0);
        bar.set_position(150.0);
        assert_eq!(bar.position(), 100.0);

        bar.set_range(50.0);
        assert_eq!(bar.position(), 50.0);

        bar.set_position(-10.0);
        assert_eq!(bar.position(), 0.0);
    }

    #[test]
    fn test_invariant_holds_for_any_sequence() {
        let mut bar = Scrollbar::new();
        let ops = [
            (true, 30.0),
            (false, 45.0),
            (true, -5.0),
            (false, 10.0),
            (true, 1e9),
            (false, f64::NAN),
            (false, 2e9),
            (true, 12.5),
            (true, f64::INFINITY),
            (false, 3.0),
        ];
        for (is_range, value) in ops {
            if is_range {
                bar.set_range(value);
            } else {
                bar.set_position(value);
            }
            assert!(bar.position() >= 0.0);
            assert!(bar.position() <= bar.range());
        }
    }

    #[test]
    fn test_right_edge() {
        let mut bar = Scrollbar::new();
        assert!(bar.is_scrolled_to_right_edge());

        bar.set_range(200.0);
        assert!(!bar.is_scrolled_to_right_edge());

        bar.scroll_to_right_edge();
        assert!(bar.is_scrolled_to_right_edge());
        assert_eq!(bar.position(), 200.0);

        bar.set_position(199.8);
        assert!(bar.is_scrolled_to_right_edge());
    }

    #[test]
    fn test_sync_from_host_reports_clamped_changes() {
        let mut bar = Scrollbar::new();
        bar.set_range(80.0);
        assert_eq!(bar.sync_from_host(500.0), Some(80.0));
        assert_eq!(bar.sync_from_host(90.0), None);
        assert_eq!(bar.sync_from_host(20.0), Some(20.0));
    }

    #[test]
    fn test_thumb_ratio() {
        let mut bar = Scrollbar::new();
        bar.resize(100.0);
        assert_eq!(bar.thumb_ratio(), 1.0);
        bar.set_range(300.0);
        assert_eq!(bar.thumb_ratio(), 0.25);
    }
}
