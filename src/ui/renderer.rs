//! Terminal setup and the main event loop

use crate::config::Config;
use crate::logger::Logger;
use crate::session::{DemoSession, SessionBridge};
use crate::ui::app_component::AppComponent;
use crate::ui::core::{Component, EventHandler, EventType};
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Write};
use tokio::time::Duration;

/// Run the TUI until the user quits
pub async fn run_app(config: Config, logger: Logger) -> Result<()> {
    let source = DemoSession::from_config(&config.session)?;
    let activity = (config.session.activity_interval_ms > 0)
        .then(|| Duration::from_millis(config.session.activity_interval_ms));
    let bridge = SessionBridge::spawn(source, activity);

    // Setup terminal. From here on every exit path goes through the guard.
    enable_raw_mode().context("Failed to enable raw mode")?;
    let guard = TerminalGuard::new(config.ui.mouse_enabled);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if config.ui.mouse_enabled {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppComponent::new(&config, logger, bridge);
    let mut event_handler = EventHandler::new();
    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    let restored = guard.restore();
    app.shutdown().await;
    result?;
    restored
}

/// Undo raw mode, mouse capture and the alternate screen, and show the
/// cursor again. Safe to call on a terminal that was only partly set up.
pub fn restore_terminal<W: Write>(out: &mut W, mouse_enabled: bool) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    if mouse_enabled {
        execute!(out, DisableMouseCapture)?;
    }
    execute!(out, LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

/// Restores the terminal when dropped, unless already restored explicitly.
struct TerminalGuard {
    mouse_enabled: bool,
    active: bool,
}

impl TerminalGuard {
    fn new(mouse_enabled: bool) -> Self {
        Self {
            mouse_enabled,
            active: true,
        }
    }

    fn restore(mut self) -> Result<()> {
        self.active = false;
        restore_terminal(&mut io::stdout(), self.mouse_enabled)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Err(e) = restore_terminal(&mut io::stdout(), self.mouse_enabled) {
            log::error!("Failed to restore terminal: {:#}", e);
        }
    }
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> Result<()> {
    let mut needs_render = true;

    loop {
        // Session events are applied between frames
        if app.process_session_events() {
            needs_render = true;
        }

        if needs_render {
            terminal.draw(|f| app.render(f, f.area()))?;
            needs_render = false;
        }

        match event_handler.next_event().await? {
            EventType::Tick | EventType::Other => {}
            event => {
                app.handle_event(event)?;
                needs_render = true;
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
