#![forbid(unsafe_code)]

//! Light and dark palettes.

use ftui::{PackedRgba, Style};
use ftui_refiners_core::ThemeVariant;

/// Colors used by the refiner panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinersPalette {
    pub text: PackedRgba,
    pub muted: PackedRgba,
    pub accent: PackedRgba,
    pub chip_fg: PackedRgba,
    pub chip_bg: PackedRgba,
    pub chip_focus_bg: PackedRgba,
    pub panel_bg: PackedRgba,
    pub border: PackedRgba,
    pub selection_fg: PackedRgba,
    pub selection_bg: PackedRgba,
}

impl RefinersPalette {
    pub const DARK: Self = Self {
        text: PackedRgba::rgb(220, 220, 225),
        muted: PackedRgba::rgb(130, 130, 145),
        accent: PackedRgba::rgb(95, 175, 255),
        chip_fg: PackedRgba::rgb(235, 235, 240),
        chip_bg: PackedRgba::rgb(50, 55, 70),
        chip_focus_bg: PackedRgba::rgb(60, 80, 120),
        panel_bg: PackedRgba::rgb(30, 30, 35),
        border: PackedRgba::rgb(80, 80, 100),
        selection_fg: PackedRgba::rgb(255, 255, 255),
        selection_bg: PackedRgba::rgb(60, 80, 120),
    };

    pub const LIGHT: Self = Self {
        text: PackedRgba::rgb(30, 30, 35),
        muted: PackedRgba::rgb(110, 110, 120),
        accent: PackedRgba::rgb(0, 90, 180),
        chip_fg: PackedRgba::rgb(30, 30, 35),
        chip_bg: PackedRgba::rgb(225, 228, 235),
        chip_focus_bg: PackedRgba::rgb(190, 210, 240),
        panel_bg: PackedRgba::rgb(250, 250, 252),
        border: PackedRgba::rgb(170, 170, 185),
        selection_fg: PackedRgba::rgb(0, 0, 0),
        selection_bg: PackedRgba::rgb(200, 220, 250),
    };

    #[must_use]
    pub const fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::DARK,
            ThemeVariant::Light => Self::LIGHT,
        }
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.panel_bg)
    }

    #[must_use]
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.panel_bg)
    }

    #[must_use]
    pub fn header(&self) -> Style {
        Style::default().fg(self.text).bg(self.panel_bg).bold()
    }

    #[must_use]
    pub fn link(&self) -> Style {
        Style::default().fg(self.accent).bg(self.panel_bg)
    }

    #[must_use]
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.panel_bg)
    }

    #[must_use]
    pub fn selection(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }

    #[must_use]
    pub fn chip(&self, focused: bool) -> Style {
        let bg = if focused { self.chip_focus_bg } else { self.chip_bg };
        Style::default().fg(self.chip_fg).bg(bg)
    }

    #[must_use]
    pub fn button(&self) -> Style {
        Style::default().fg(self.accent).bold()
    }
}

impl Default for RefinersPalette {
    fn default() -> Self {
        Self::DARK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_pick_distinct_palettes() {
        assert_eq!(RefinersPalette::for_variant(ThemeVariant::Dark), RefinersPalette::DARK);
        assert_eq!(RefinersPalette::for_variant(ThemeVariant::Light), RefinersPalette::LIGHT);
        assert_ne!(RefinersPalette::DARK.panel_bg, RefinersPalette::LIGHT.panel_bg);
    }

    #[test]
    fn focused_chip_is_highlighted() {
        for palette in [RefinersPalette::DARK, RefinersPalette::LIGHT] {
            assert_ne!(palette.chip_bg, palette.chip_focus_bg);
            assert_ne!(palette.text, palette.panel_bg);
        }
    }
}
