//! Terminal rendition of the portfolio.

pub mod app;
mod root;
mod ui;
mod widgets;

use std::{io::stdout, sync::Arc, time::Duration};

use app::App;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::{
    sync::mpsc,
    time::{sleep, Instant},
};
use tracing::info;

use crate::{
    config::Config,
    error::Result,
    gallery::TickSource,
    notify::NotificationSender,
    preferences::PreferenceStore,
    theme::{DetectedScheme, Theme, ThemeStore},
};

pub async fn run(
    config: Config,
    forced_theme: Option<Theme>,
    preferences: Box<dyn PreferenceStore>,
    sender: Arc<dyn NotificationSender>,
) -> Result<()> {
    let root = Box::new(root::TerminalRoot::stdout());
    let theme = match forced_theme {
        Some(theme) => ThemeStore::with_theme(theme, preferences, root),
        None => ThemeStore::new(preferences, &DetectedScheme, root),
    };

    let (ticks, mut tick_rx) = TickSource::channel();
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let mut app = App::new(&config, theme, sender, ticks, outcome_tx);

    enable_raw_mode()?;
    stdout()
        .execute(EnterAlternateScreen)?
        .execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut event_stream = EventStream::new();
    info!("TUI started");

    while !app.should_exit {
        app.update(Instant::now());
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            Some(tick) = tick_rx.recv() => {
                app.on_gallery_tick(tick);
            }
            Some(outcome) = outcome_rx.recv() => {
                app.on_submission(outcome);
            }
            Some(Ok(event)) = event_stream.next() => {
                app.handle_event(&event);
            }
            () = sleep(Duration::from_millis(50)) => {}
        }
    }

    disable_raw_mode()?;
    stdout()
        .execute(DisableMouseCapture)?
        .execute(LeaveAlternateScreen)?;
    drop(app);
    info!("TUI stopped");

    Ok(())
}
