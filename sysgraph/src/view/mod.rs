//! View components for the Sysgraph application.

pub mod chart;
pub mod formatting;
pub mod menu;
pub mod panel;
pub mod scrollbar;
pub mod theme;
