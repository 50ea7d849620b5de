//! Series visibility menu.

use crate::color::Rgb;
use crate::data_series::DataSeries;
use crate::line_chart::SeriesId;

/// What the host has to do after a menu change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// A button was added or removed; the menu's size changed.
    LayoutChanged,
    /// A series changed visibility; the chart must be redrawn.
    Redraw,
}

/// One toggle button.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuButton {
    pub series: SeriesId,
    pub title: String,
    pub color: Rgb,
    pub visible: bool,
}

impl MenuButton {
    /// Button fill: the series color when visible, gray when hidden.
    pub fn fill(&self) -> Rgb {
        if self.visible { self.color } else { Rgb::GRAY }
    }

    /// Label color readable on top of [`Self::fill`].
    pub fn text_color(&self) -> Rgb {
        self.fill().contrast_text()
    }
}

/// Ordered list of toggle buttons, one per attached series.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    buttons: Vec<MenuButton>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> &[MenuButton] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Append a button for `series`.
    pub fn add_data_series(&mut self, id: SeriesId, series: &DataSeries) -> MenuEvent {
        self.buttons.push(MenuButton {
            series: id,
            title: series.title().to_string(),
            color: series.color(),
            visible: series.is_visible(),
        });
        MenuEvent::LayoutChanged
    }

    /// Remove the button bound to `id`; `None` if there is none.
    pub fn remove_data_series(&mut self, id: SeriesId) -> Option<MenuEvent> {
        let index = self.buttons.iter().position(|b| b.series == id)?;
        self.buttons.remove(index);
        Some(MenuEvent::LayoutChanged)
    }

    /// Flip the visibility of `series` through its button.
    pub fn toggle(&mut self, id: SeriesId, series: &mut DataSeries) -> Option<MenuEvent> {
        let button = self.buttons.iter_mut().find(|b| b.series == id)?;
        series.set_visible(!series.is_visible());
        button.visible = series.is_visible();
        Some(MenuEvent::Redraw)
    }

    pub fn button(&self, id: SeriesId) -> Option<&MenuButton> {
        self.buttons.iter().find(|b| b.series == id)
    }
}
