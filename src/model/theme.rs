//! Theme preference and the palette each theme resolves to
//!
//! The preference is a two-valued enum persisted in the config file, read
//! once at startup and flipped by the toggle shortcut. Components never
//! hardcode colors; they draw with the palette of the active theme.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label shown in the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "فاتح",
            Theme::Dark => "داكن",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette {
                text: Color::Black,
                dim: Color::DarkGray,
                accent: Color::Blue,
                border: Color::DarkGray,
                header: Color::Blue,
                selection_fg: Color::White,
                selection_bg: Color::Blue,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
                info: Color::Cyan,
            },
            Theme::Dark => Palette {
                text: Color::White,
                dim: Color::Gray,
                accent: Color::Cyan,
                border: Color::DarkGray,
                header: Color::Cyan,
                selection_fg: Color::Black,
                selection_bg: Color::Cyan,
                success: Color::LightGreen,
                warning: Color::LightYellow,
                error: Color::LightRed,
                info: Color::LightCyan,
            },
        }
    }
}

/// Resolved colors for the active theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub header: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}
