//! Sysgraph - Live CPU and memory line charts.
//!
//! This library exposes the core components for testing.

pub mod app;
pub mod collector;
pub mod config;
pub mod demo;
pub mod message;
pub mod panel;
pub mod subscription;
pub mod view;

// Re-export commonly used types
pub use app::Sysgraph;
pub use config::AppConfig;
pub use message::{Message, PanelId};
