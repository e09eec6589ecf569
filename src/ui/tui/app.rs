// Main application loop for the TUI

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::mdev::{catalog, CatalogSnapshot};
use crate::pci;

use super::input::handle_key_event;
use super::render::ui;
use super::state::{AppState, LogLevel};

/// Re-reads the whole catalog and replaces the app's snapshot.
///
/// Called on startup and after every create/delete; the renderer only
/// ever sees freshly read state.
pub(super) fn refresh_catalog(app: &mut AppState) {
    app.loading_message = Some("Scanning mdev catalog...".to_string());

    let address = match pci::resolve_graphics_device_address() {
        Ok(address) => address,
        Err(e) => {
            app.loading_message = None;
            app.catalog = None;
            app.details = None;
            app.add_log(&format!("{}", e), LogLevel::Error);
            app.add_log(
                "No usable graphics device; nothing in this tool can work without one.",
                LogLevel::Error,
            );
            return;
        }
    };

    let snapshot = match catalog::snapshot(&app.paths, &address) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            // Mode catalog unreadable (GVT-g likely not enabled); the
            // active-device list is still worth showing.
            app.add_log(&format!("{}", e), LogLevel::Warning);
            CatalogSnapshot {
                address: address.clone(),
                modes: Vec::new(),
                devices: catalog::list_devices(&app.paths),
            }
        }
    };

    app.loading_message = None;
    app.add_log(&format!("Graphics device: {}", snapshot.address), LogLevel::Info);
    app.add_log(
        &format!(
            "Found {} vGPU mode(s), {} active device(s)",
            snapshot.modes.len(),
            snapshot.devices.len()
        ),
        LogLevel::Success,
    );

    app.catalog = Some(snapshot);
    app.clamp_selection();
    refresh_details(app);
}

/// Re-reads the descriptor of the selected device into the details pane
pub(super) fn refresh_details(app: &mut AppState) {
    let identifier = match app.selected_device() {
        Some(identifier) => identifier.to_string(),
        None => {
            app.details = None;
            return;
        }
    };

    match catalog::inspect_device(&app.paths, &identifier) {
        Ok(details) => app.details = Some(details),
        Err(e) => {
            // Device may have been removed out from under us
            app.details = None;
            app.add_log(&format!("{}", e), LogLevel::Warning);
        }
    }
}

/// Run the ratatui app
pub fn run_app() -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = AppState::default();

    app.add_log("Welcome to vGPU Manager", LogLevel::Info);
    terminal.draw(|f| ui(f, &app))?; // Draw initial loading state
    refresh_catalog(&mut app);
    app.add_log(
        "Press 'n' to create a vGPU, 'd' to delete, 'c' for the QEMU flag, 'r' to refresh.",
        LogLevel::Info,
    );

    // Run main interactive loop
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // Draw UI
        terminal.draw(|f| ui(f, &app))?;

        // Handle timeout and input
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key_event(&mut app, key.code, key.modifiers);
            }
        }

        // Check if we need to quit
        if app.should_quit {
            break;
        }

        // Update tick rate
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
