//! Theme-derived styling.
//!
//! [`Palette::for_theme`] is the only source of colours for the views. It is
//! a pure function of [`Theme`], so re-deriving the palette every frame keeps
//! every view consistent with the current theme.

use ratatui::style::{Color, Modifier, Style};

use crate::{catalog::Status, theme::Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub tag: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

const DARK: Palette = Palette {
    background: Color::Rgb(13, 17, 23),
    surface: Color::Rgb(22, 27, 34),
    text: Color::Rgb(230, 237, 243),
    dim: Color::Rgb(125, 133, 144),
    accent: Color::Rgb(88, 166, 255),
    accent_alt: Color::Rgb(188, 140, 255),
    border: Color::Rgb(48, 54, 61),
    border_focused: Color::Rgb(88, 166, 255),
    selection: Color::Rgb(33, 38, 45),
    tag: Color::Rgb(121, 192, 255),
    success: Color::Rgb(63, 185, 80),
    warning: Color::Rgb(210, 153, 34),
    error: Color::Rgb(248, 81, 73),
};

const LIGHT: Palette = Palette {
    background: Color::Rgb(255, 255, 255),
    surface: Color::Rgb(246, 248, 250),
    text: Color::Rgb(31, 35, 40),
    dim: Color::Rgb(101, 109, 118),
    accent: Color::Rgb(9, 105, 218),
    accent_alt: Color::Rgb(130, 80, 223),
    border: Color::Rgb(208, 215, 222),
    border_focused: Color::Rgb(9, 105, 218),
    selection: Color::Rgb(221, 244, 255),
    tag: Color::Rgb(5, 80, 174),
    success: Color::Rgb(26, 127, 55),
    warning: Color::Rgb(154, 103, 0),
    error: Color::Rgb(207, 34, 46),
};

impl Palette {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    pub const fn base(&self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }

    pub const fn dimmed(&self) -> Style {
        Style::new().fg(self.dim)
    }

    pub const fn heading(&self) -> Style {
        Style::new().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub const fn key(&self) -> Style {
        Style::new().fg(self.accent)
    }

    pub const fn tag(&self) -> Style {
        Style::new().fg(self.tag).bg(self.surface)
    }

    pub const fn border(&self, focused: bool) -> Style {
        if focused {
            Style::new().fg(self.border_focused)
        } else {
            Style::new().fg(self.border)
        }
    }

    /// Style for a line that belongs to the focused item.
    pub const fn focused(&self, is_focused: bool, fg: Color) -> Style {
        if is_focused {
            Style::new().bg(self.selection).fg(fg)
        } else {
            Style::new().fg(fg)
        }
    }

    pub const fn status(&self, status: Status) -> Color {
        match status {
            Status::LiveProduction => self.success,
            Status::BetaAccess => self.warning,
            Status::OpenSource => self.accent_alt,
            Status::InDevelopment => self.dim,
        }
    }
}

pub const fn focus_marker(is_focused: bool) -> &'static str {
    if is_focused {
        "▶ "
    } else {
        "  "
    }
}
