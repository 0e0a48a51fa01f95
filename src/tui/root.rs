//! Terminal default colours as the theme root.

use std::io::{self, Write};

use ratatui::style::Color;
use tracing::warn;

use super::widgets::theme::Palette;
use crate::theme::{Theme, ThemeRoot};

/// Sets the terminal's default background and foreground (OSC 11 / OSC 10)
/// so the area outside the rendered frame follows the theme. The defaults
/// are restored on drop.
pub struct TerminalRoot<W: Write> {
    out: W,
    applied: bool,
}

impl TerminalRoot<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRoot<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out,
            applied: false,
        }
    }

    fn write_colors(&mut self, theme: Theme) -> io::Result<()> {
        let palette = Palette::for_theme(theme);
        if let Some(bg) = hex(palette.background) {
            write!(self.out, "\x1b]11;{bg}\x07")?;
        }
        if let Some(fg) = hex(palette.text) {
            write!(self.out, "\x1b]10;{fg}\x07")?;
        }
        self.out.flush()
    }
}

impl<W: Write> ThemeRoot for TerminalRoot<W> {
    fn apply(&mut self, theme: Theme) {
        match self.write_colors(theme) {
            Ok(()) => self.applied = true,
            Err(e) => warn!("Could not set terminal colours: {e}"),
        }
    }
}

impl<W: Write> Drop for TerminalRoot<W> {
    fn drop(&mut self) {
        if self.applied {
            let _ = write!(self.out, "\x1b]111\x07\x1b]110\x07");
            let _ = self.out.flush();
        }
    }
}

fn hex(color: Color) -> Option<String> {
    match color {
        Color::Rgb(r, g, b) => Some(format!("#{r:02x}{g:02x}{b:02x}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_writes_palette_colors() {
        let mut root = TerminalRoot::new(Vec::new());
        root.apply(Theme::Light);
        let written = String::from_utf8(root.out.clone()).unwrap();
        assert_eq!(written, "\x1b]11;#ffffff\x07\x1b]10;#1f2328\x07");
    }

    #[test]
    fn test_untouched_root_restores_nothing() {
        let mut out = Vec::new();
        drop(TerminalRoot::new(&mut out));
        assert!(out.is_empty());

        let mut root = TerminalRoot::new(&mut out);
        root.apply(Theme::Dark);
        drop(root);
        assert!(String::from_utf8(out).unwrap().ends_with("\x1b]111\x07\x1b]110\x07"));
    }
}
