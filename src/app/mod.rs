//! TUI Application module

mod async_ops;
mod events;
mod scenes;
mod state;
mod ui;

pub use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, spawn_worker};
pub use events::handle_key;
pub use scenes::{CategoryScenes, Scene, ShopSceneRenderer};
pub use state::{AppState, Mode, Screen};
pub use ui::render;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::api::ShopClient;
use crate::config::Config;
use crate::icons::NavIcons;

/// Run the TUI application
pub fn run() -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new()?;

    // Load config
    let config = Config::load()?;

    // Unknown icon keys are a configuration error, not a rendering fallback
    let icons = NavIcons::from_config(&config).context("Invalid navigation icon")?;

    let client = Arc::new(ShopClient::new(&config)?);

    // Spawn async worker
    let async_handle = rt.block_on(async { spawn_worker(client) });

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = AppState::new(config, icons);
    state.set_status("Loading...");

    // Main loop
    let result = run_app(&mut terminal, &mut state, async_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut async_handle: AsyncHandle,
) -> Result<()> {
    for cmd in state.initial_commands() {
        send(&async_handle, cmd);
    }

    loop {
        // Process any async results
        while let Ok(result) = async_handle.result_rx.try_recv() {
            state.apply_result(result);
        }

        for cmd in state.poll_commands() {
            send(&async_handle, cmd);
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            for cmd in events::handle_key(state, key) {
                send(&async_handle, cmd);
            }
        }

        // Tick for animations
        state.tick();

        if state.should_quit {
            // Shutdown async worker
            let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::Shutdown);
            break;
        }
    }

    state.close();

    // Save config on exit
    state.config.save()?;

    Ok(())
}

fn send(handle: &AsyncHandle, cmd: AsyncCommand) {
    if let Err(e) = handle.cmd_tx.blocking_send(cmd) {
        tracing::warn!("worker gone, dropping command: {e}");
    }
}
