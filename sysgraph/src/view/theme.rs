//! Theme-aware color palette for Sysgraph.
//!
//! Semantic colors that follow the current light/dark theme. Series colors
//! come from the chart itself and go through [`series_color`].

use iced::{Color, Theme};

use sysgraph_core::Rgb;

/// Get colors from the theme's extended palette.
pub struct ThemeColors<'a> {
    theme: &'a Theme,
}

impl<'a> ThemeColors<'a> {
    /// Create a new ThemeColors from a theme reference.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    /// Muted/secondary text color.
    pub fn text_muted(&self) -> Color {
        self.palette().background.weak.text
    }

    /// Default border color.
    pub fn border(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.25, 0.25, 0.3)
        } else {
            Color::from_rgb(0.8, 0.8, 0.82)
        }
    }

    // ========================================================================
    // Chart Colors
    // ========================================================================

    /// Plot area background.
    pub fn chart_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.08, 0.08, 0.1)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Background around the plot area, behind the axis labels.
    pub fn chart_outer_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.1, 0.1, 0.12)
        } else {
            Color::from_rgb(0.95, 0.95, 0.96)
        }
    }

    /// Chart grid lines.
    pub fn chart_grid(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.2, 0.25)
        } else {
            Color::from_rgb(0.85, 0.85, 0.88)
        }
    }

    /// Chart axis labels.
    pub fn chart_label(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.5, 0.5, 0.5)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    /// Scrollbar track.
    pub fn scrollbar_track(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.13, 0.13, 0.15)
        } else {
            Color::from_rgb(0.92, 0.92, 0.94)
        }
    }

    /// Scrollbar thumb; brighter while dragged.
    pub fn scrollbar_thumb(&self, active: bool) -> Color {
        match (self.is_dark(), active) {
            (true, false) => Color::from_rgb(0.3, 0.3, 0.35),
            (true, true) => Color::from_rgb(0.45, 0.45, 0.5),
            (false, false) => Color::from_rgb(0.7, 0.7, 0.72),
            (false, true) => Color::from_rgb(0.55, 0.55, 0.6),
        }
    }

    /// Check if the current theme is dark.
    pub fn is_dark(&self) -> bool {
        self.palette().is_dark
    }
}

/// Convenience function to create ThemeColors.
pub fn colors(theme: &Theme) -> ThemeColors<'_> {
    ThemeColors::new(theme)
}

/// Convert a chart color into an iced color.
pub fn series_color(color: Rgb) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}
