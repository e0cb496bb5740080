//! Interactive keypad in the terminal.
//!
//! Keys reach the keypad only while it holds focus. Clicking elsewhere in
//! the window, or the terminal losing focus, blurs it after the configured
//! grace delay; clicking the keypad focuses it again.

mod app;
mod buttons;
mod keys;
mod view;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use calc_core::Settings;
use crossterm::event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture};
use crossterm::execute;

use app::App;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run(settings: &Settings) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture, EnableFocusChange).context("enabling mouse capture")?;

    let result = event_loop(&mut terminal, App::new(settings));

    // Restore the terminal even if the loop failed
    let restored = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    restored.context("disabling mouse capture")?;
    result
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal
            .draw(|frame| view::draw(frame, &mut app))
            .context("drawing keypad")?;

        if event::poll(POLL_INTERVAL)? {
            let event = event::read()?;
            app.handle_event(event, Instant::now());
        }
        app.tick(Instant::now());
    }
    Ok(())
}
