//! Status bar with keybindings and the active theme.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use super::{theme::Palette, InteractiveStatefulWidget};
use crate::theme::Theme;

/// Input for updating status bar state.
pub struct StatusBarInput {
    pub palette: Palette,
    pub theme: Theme,
    pub keybindings: &'static [(&'static str, &'static str)],
}

/// State for the status bar widget.
#[derive(Default)]
pub struct StatusBar {
    palette: Option<Palette>,
    theme: Theme,
    keybindings: &'static [(&'static str, &'static str)],
}

/// Widget for rendering the status bar.
pub struct StatusBarWidget;

impl StatefulWidget for StatusBarWidget {
    type State = StatusBar;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        const GLOBAL_KEYBINDINGS: &[(&str, &str)] = &[("?", "help"), ("t", "theme"), ("q", "quit")];

        let Some(palette) = state.palette else {
            return;
        };
        let separator = Span::styled(" │ ", palette.dimmed());

        let global_spans = GLOBAL_KEYBINDINGS
            .iter()
            .enumerate()
            .flat_map(|(i, (key, desc))| {
                let prefix = (i > 0).then(|| separator.clone());
                prefix.into_iter().chain([
                    Span::styled(*key, palette.key()),
                    Span::raw(format!(": {desc}")),
                ])
            });

        let mode_spans = state.keybindings.iter().flat_map(|(key, desc)| {
            [
                separator.clone(),
                Span::styled(*key, palette.heading()),
                Span::raw(format!(": {desc}")),
            ]
        });

        let indicator = match state.theme {
            Theme::Dark => "☾ dark ",
            Theme::Light => "☀ light ",
        };
        let [keys_area, theme_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(indicator.chars().count() as u16),
        ])
        .areas(area);

        let spans: Vec<Span> = global_spans.chain(mode_spans).collect();
        Paragraph::new(Line::from(spans))
            .style(palette.base())
            .render(keys_area, buf);
        Paragraph::new(indicator)
            .alignment(Alignment::Right)
            .style(palette.base().fg(palette.dim))
            .render(theme_area, buf);
    }
}

impl InteractiveStatefulWidget for StatusBarWidget {
    type Input = StatusBarInput;
    type Event = ();

    fn update_state(state: &mut Self::State, input: Self::Input) {
        state.palette = Some(input.palette);
        state.theme = input.theme;
        state.keybindings = input.keybindings;
    }
}
