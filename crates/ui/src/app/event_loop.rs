use super::{App, rendering};
use crate::event_handler::EventHandler;

use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Result;
use std::{panic, time::Duration};

/// Idle wait between terminal polls
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Globe redraw interval
const GLOBE_INTERVAL: Duration = Duration::from_millis(80);

pub async fn run(app: &mut App) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backend = CrosstermBackend::new(std::io::stdout());
        if let Ok(mut terminal) = Terminal::new(backend) {
            let _ = terminal.show_cursor();
        }
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    app.session_mut().set_screen(size.width, size.height);
    tracing::info!(width = size.width, height = size.height, "terminal session started");

    terminal.clear()?;
    terminal.hide_cursor()?;
    rendering::draw(app, &mut terminal)?;

    let mut globe_ticker = tokio::time::interval(GLOBE_INTERVAL);
    globe_ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    while !app.should_exit {
        let deadline = app.animation_deadline();
        let globe_active = app.session().globe_active();

        let tui_poll = async {
            tokio::time::sleep(POLL_INTERVAL).await;
            EventHandler::read()
        };

        tokio::select! {
            maybe_event = tui_poll => {
                if let Some(event) = maybe_event {
                    app.handle_event(event);
                    while let Some(event) = EventHandler::read() {
                        app.handle_event(event);
                    }
                    rendering::draw(app, &mut terminal)?;
                }
            }
            _ = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at).await,
                    None => std::future::pending().await,
                }
            } => {
                app.tick_animation();
                // zero-delay reveals keep this branch ready; drain input so Ctrl+C lands
                while let Some(event) = EventHandler::read() {
                    app.handle_event(event);
                }
                rendering::draw(app, &mut terminal)?;
            }
            _ = globe_ticker.tick(), if globe_active => {
                app.advance_globe();
                rendering::draw(app, &mut terminal)?;
            }
        }
    }

    tracing::info!("terminal session ended");

    terminal.show_cursor()?;
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}
