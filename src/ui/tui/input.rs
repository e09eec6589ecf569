// Input handling for the TUI

use crossterm::event::{KeyCode, KeyModifiers};

use crate::mdev::lifecycle;

use super::app::{refresh_catalog, refresh_details};
use super::state::{AppState, LogLevel, WizardState};

/// Handles key events for the application
pub fn handle_key_event(app: &mut AppState, key_code: KeyCode, _modifiers: KeyModifiers) {
    if app.wizard.is_some() {
        handle_wizard_key(app, key_code);
        return;
    }

    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Up => {
            if app.device_count() > 0 {
                if app.selected_device_index > 0 {
                    app.selected_device_index -= 1;
                } else {
                    // Wrap around to the last device
                    app.selected_device_index = app.device_count() - 1;
                }
                refresh_details(app);
            }
        }
        KeyCode::Down => {
            if app.device_count() > 0 {
                if app.selected_device_index < app.device_count() - 1 {
                    app.selected_device_index += 1;
                } else {
                    // Wrap around to the first device
                    app.selected_device_index = 0;
                }
                refresh_details(app);
            }
        }
        KeyCode::Char('n') => {
            if app.mode_count() > 0 {
                app.wizard = Some(WizardState {
                    identifier: lifecycle::generate_identifier(),
                    selected_mode_index: 0,
                });
                app.add_log(
                    "Create wizard: type to edit the name, ↑/↓ to pick a mode, Enter to create, Esc to cancel.",
                    LogLevel::Info,
                );
            } else {
                app.add_log(
                    "No vGPU modes available. Is GVT-g enabled for this device?",
                    LogLevel::Warning,
                );
            }
        }
        KeyCode::Char('d') => delete_selected(app),
        KeyCode::Char('c') => {
            if let Some(identifier) = app.selected_device() {
                let flag = lifecycle::format_passthrough_flag(identifier);
                app.add_log(&format!("QEMU flag: {}", flag), LogLevel::Success);
            } else {
                app.add_log("Try selecting a vGPU first.", LogLevel::Warning);
            }
        }
        KeyCode::Char('r') => {
            app.add_log("Refreshing catalog...", LogLevel::Info);
            refresh_catalog(app);
        }
        _ => {} // Ignore other keys for now
    }
}

/// Key handling while the create wizard is open
fn handle_wizard_key(app: &mut AppState, key_code: KeyCode) {
    match key_code {
        KeyCode::Esc => {
            app.wizard = None;
            app.add_log("Create cancelled.", LogLevel::Info);
        }
        KeyCode::Up => {
            let mode_count = app.mode_count();
            if let Some(wizard) = app.wizard.as_mut() {
                if wizard.selected_mode_index > 0 {
                    wizard.selected_mode_index -= 1;
                } else if mode_count > 0 {
                    wizard.selected_mode_index = mode_count - 1;
                }
            }
        }
        KeyCode::Down => {
            let mode_count = app.mode_count();
            if let Some(wizard) = app.wizard.as_mut() {
                if wizard.selected_mode_index + 1 < mode_count {
                    wizard.selected_mode_index += 1;
                } else {
                    wizard.selected_mode_index = 0;
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(wizard) = app.wizard.as_mut() {
                wizard.identifier.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(wizard) = app.wizard.as_mut() {
                wizard.identifier.push(c);
            }
        }
        KeyCode::Enter => create_from_wizard(app),
        _ => {}
    }
}

/// Runs the create operation with the wizard's inputs
fn create_from_wizard(app: &mut AppState) {
    let (identifier, mode) = {
        let catalog = match app.catalog.as_ref() {
            Some(catalog) => catalog,
            None => return,
        };
        let wizard = match app.wizard.as_ref() {
            Some(wizard) => wizard,
            None => return,
        };
        let mode = match catalog.modes.get(wizard.selected_mode_index) {
            Some(entry) => entry.mode.clone(),
            None => return,
        };
        (wizard.identifier.clone(), mode)
    };

    let address = match app.catalog.as_ref() {
        Some(catalog) => catalog.address.clone(),
        None => return,
    };

    match lifecycle::create_device(&app.paths, &identifier, &mode, &address) {
        Ok(()) => {
            app.wizard = None;
            app.add_log(
                &format!("Created vGPU {} with mode {}.", identifier, mode),
                LogLevel::Success,
            );
            refresh_catalog(app);
        }
        Err(e) => {
            // Keep the wizard open so the input can be corrected
            app.add_log(&format!("{}", e), LogLevel::Error);
        }
    }
}

/// Runs the delete operation for the selected device
fn delete_selected(app: &mut AppState) {
    let identifier = match app.selected_device() {
        Some(identifier) => identifier.to_string(),
        None => {
            app.add_log("Try selecting a vGPU first.", LogLevel::Warning);
            return;
        }
    };

    match lifecycle::delete_device(&app.paths, &identifier) {
        Ok(()) => {
            app.add_log(&format!("Deleted vGPU {}.", identifier), LogLevel::Success);
            refresh_catalog(app);
        }
        Err(e) => {
            app.add_log(&format!("{}", e), LogLevel::Error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys_set_should_quit_regardless_of_modifiers() {
        for (key, modifiers) in [
            (KeyCode::Char('q'), KeyModifiers::NONE),
            (KeyCode::Char('q'), KeyModifiers::CONTROL),
            (KeyCode::Esc, KeyModifiers::NONE),
        ] {
            let mut app = AppState::default();
            handle_key_event(&mut app, key, modifiers);
            assert!(app.should_quit);
        }
    }

    #[test]
    fn escape_closes_the_wizard_instead_of_quitting() {
        let mut app = AppState::default();
        app.wizard = Some(WizardState {
            identifier: String::new(),
            selected_mode_index: 0,
        });
        handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.wizard.is_none());
        assert!(!app.should_quit);
    }
}
