//! UI tests using iced_test Simulator.
//!
//! These tests verify the UI behavior with the demo source instead of the
//! live machine.

use iced_test::simulator;

use sysgraph::app::Sysgraph;
use sysgraph::config::AppConfig;
use sysgraph::demo::DemoSimulator;
use sysgraph::message::{Message, PanelId};
use sysgraph::panel::Panel;
use sysgraph::view::menu::menu_view;
use sysgraph::view::panel::panel_view;
use sysgraph_core::ChartConfig;

/// Test that the menu shows one button per series.
#[test]
fn test_menu_lists_series() {
    let panel = Panel::new(PanelId::Memory, ChartConfig::default()).unwrap();
    let mut ui = simulator(menu_view(PanelId::Memory, panel.chart().menu()));

    for title in ["Used", "Available", "Free", "Swap"] {
        assert!(ui.find(title).is_ok(), "missing button {title}");
    }
}

/// Test clicking a menu button.
#[test]
fn test_menu_click_toggles_series() {
    let panel = Panel::new(PanelId::Memory, ChartConfig::default()).unwrap();
    let swap = panel.chart().menu().buttons()[3].series;
    let mut ui = simulator(menu_view(PanelId::Memory, panel.chart().menu()));

    let _ = ui.click("Swap");

    let messages: Vec<Message> = ui.into_messages().collect();
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, Message::ToggleSeries(PanelId::Memory, id) if *id == swap))
    );
}

/// Test that an empty panel renders its title.
#[test]
fn test_panel_without_samples() {
    let panel = Panel::new(PanelId::Cpu, ChartConfig::default()).unwrap();
    let mut ui = simulator(panel_view(&panel));

    assert!(ui.find("CPU").is_ok());
    assert!(ui.find("Total").is_ok());
    assert!(ui.find("Load").is_ok());
}

/// Test that a panel shows per-core buttons once samples arrive.
#[test]
fn test_panel_with_samples() {
    let mut panel = Panel::new(PanelId::Cpu, ChartConfig::default()).unwrap();
    let mut sim = DemoSimulator::with_seed(11, 2);
    panel.resize(400.0, 160.0);
    for i in 0..10 {
        panel.ingest(&sim.tick(i * 1000));
    }

    let mut ui = simulator(panel_view(&panel));
    assert!(ui.find("Core 0").is_ok());
    assert!(ui.find("Core 1").is_ok());
}

/// Test the whole application view.
#[test]
fn test_app_view_shows_both_panels() {
    let mut app = Sysgraph::new(AppConfig::default());
    let mut sim = DemoSimulator::with_seed(12, 1);
    let _ = app.update(Message::Sampled(sim.tick(1000)));

    let mut ui = simulator(app.view());
    assert!(ui.find("CPU").is_ok());
    assert!(ui.find("Memory").is_ok());
    assert!(ui.find("Swap").is_ok());
}
