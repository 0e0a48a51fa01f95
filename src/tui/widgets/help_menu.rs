//! Help overlay listing the keybindings by context.

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};

use super::{render_helpers::centered, theme::Palette, InteractiveStatefulWidget, KeyEvent};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Page",
        &[
            ("Tab", "next item"),
            ("S-Tab", "previous item"),
            ("Enter", "open / activate"),
            ("j/k", "scroll"),
            ("1-5", "jump to section"),
            ("n", "new message"),
            ("C-u", "discard draft"),
        ],
    ),
    (
        "Project details",
        &[
            ("h/l", "previous / next image"),
            ("Space", "pause slideshow"),
            ("Esc", "close"),
        ],
    ),
    (
        "Anywhere",
        &[("t", "toggle theme"), ("?", "close help"), ("q", "quit")],
    ),
];

#[derive(Default)]
pub struct HelpMenu {
    visible: bool,
    palette: Option<Palette>,
}

impl HelpMenu {
    pub const fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

pub struct HelpMenuWidget;

impl HelpMenuWidget {
    fn lines(palette: &Palette) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, (title, bindings)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(*title, palette.heading())));
            lines.extend(bindings.iter().map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("{key:>7}"), palette.key()),
                    Span::styled(format!("  {desc}"), palette.base()),
                ])
            }));
        }
        lines
    }
}

impl StatefulWidget for HelpMenuWidget {
    type State = HelpMenu;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let (true, Some(palette)) = (state.visible, state.palette) else {
            return;
        };

        let lines = Self::lines(&palette);
        let popup = centered(area, 0, 0, 36, lines.len() as u16 + 2);
        Clear.render(popup, buf);
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" Keys ")
                    .border_style(palette.border(true))
                    .style(palette.base()),
            )
            .render(popup, buf);
    }
}

impl InteractiveStatefulWidget for HelpMenuWidget {
    type Input = Palette;
    type Event = KeyEvent;

    fn update_state(state: &mut Self::State, input: Self::Input) {
        state.palette = Some(input);
    }

    /// While visible, `?` and `Esc` close the overlay; other keys pass.
    fn handle_event(state: &mut Self::State, event: Self::Event) -> bool {
        if state.visible && matches!(event.code, KeyCode::Esc | KeyCode::Char('?')) {
            state.visible = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_escape_only_consumed_while_visible() {
        let mut menu = HelpMenu::default();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!HelpMenuWidget::handle_event(&mut menu, esc));

        menu.toggle();
        assert!(menu.is_visible());
        assert!(!HelpMenuWidget::handle_event(
            &mut menu,
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)
        ));
        assert!(HelpMenuWidget::handle_event(&mut menu, esc));
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_every_section_is_listed() {
        let lines = HelpMenuWidget::lines(&Palette::for_theme(Theme::Dark));
        let bindings: usize = SECTIONS.iter().map(|(_, b)| b.len()).sum();
        assert_eq!(lines.len(), bindings + SECTIONS.len() * 2 - 1);
    }
}
