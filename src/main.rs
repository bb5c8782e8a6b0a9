//! souq-tui - Terminal dashboard for an Arabic-language marketplace backend
//!
//! This is the main entry point for the souq-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod collate;
mod component;
mod components;
mod config;
mod debounce;
mod format;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use std::time::Duration;

fn main() -> Result<()> {
    let config_dir = Config::config_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine home directory"))?;
    logging::init(&config_dir)?;

    let config = Config::load().unwrap_or_default();

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Create app state and start the initial load
    let mut app = App::new(config);
    app.init()?;
    tracing::info!("souq dashboard initialized");

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Tear down timers and workers, then the terminal
    app.shutdown();
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("draw error: {e}");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                Event::FocusGained => Some(Action::FocusGained),
                Event::FocusLost => Some(Action::FocusLost),
                _ => None,
            };

            // Process the action
            if let Some(action) = action {
                // Action might produce a follow-up action
                let mut current_action = Some(action);
                while let Some(a) = current_action {
                    current_action = app.update(a)?;
                }
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
