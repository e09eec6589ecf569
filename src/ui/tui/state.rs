// Application state management for the TUI

use ratatui::style::Color;

use crate::mdev::{CatalogSnapshot, DeviceDetails, MdevPaths};

/// A styled log message for the console feed
#[derive(Clone)]
pub struct LogMessage {
    pub timestamp: String,
    pub text: String,
    pub level: LogLevel,
}

/// Log message levels with associated colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get the color for this log level
    pub fn color(&self) -> Color {
        match self {
            LogLevel::Info => Color::Rgb(204, 169, 221),    // Lavender
            LogLevel::Success => Color::Rgb(176, 224, 183), // Mint
            LogLevel::Warning => Color::Rgb(255, 218, 185), // Peach
            LogLevel::Error => Color::Rgb(255, 182, 193),   // Pink
        }
    }
}

/// State of the create-wizard overlay
pub struct WizardState {
    /// Proposed device identifier, editable by the user
    pub identifier: String,
    /// Index into the catalog's mode list
    pub selected_mode_index: usize,
}

/// Ratatui app state.
///
/// Catalog data is always a freshly read snapshot; every mutation goes
/// through a refresh before the next render.
pub struct AppState {
    pub title: String,
    pub should_quit: bool,
    pub paths: MdevPaths,
    pub catalog: Option<CatalogSnapshot>,
    pub selected_device_index: usize,
    pub details: Option<DeviceDetails>,
    pub wizard: Option<WizardState>,
    pub loading_message: Option<String>,
    pub log_messages: Vec<LogMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            title: "vGPU Manager".to_string(),
            should_quit: false,
            paths: MdevPaths::default(),
            catalog: None,
            selected_device_index: 0,
            details: None,
            wizard: None,
            loading_message: None,
            log_messages: Vec::new(),
        }
    }
}

impl AppState {
    /// Add a log message to the console feed
    pub fn add_log(&mut self, text: &str, level: LogLevel) {
        let now = chrono::Local::now();
        let timestamp = now.format("%H:%M:%S").to_string();

        self.log_messages.push(LogMessage {
            timestamp,
            text: text.to_string(),
            level,
        });

        // Keep log at reasonable size
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Identifier of the currently selected device, if any
    pub fn selected_device(&self) -> Option<&str> {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.devices.get(self.selected_device_index))
            .map(|identifier| identifier.as_str())
    }

    /// Number of devices in the current snapshot
    pub fn device_count(&self) -> usize {
        self.catalog.as_ref().map_or(0, |catalog| catalog.devices.len())
    }

    /// Number of modes in the current snapshot
    pub fn mode_count(&self) -> usize {
        self.catalog.as_ref().map_or(0, |catalog| catalog.modes.len())
    }

    /// Clamp the device selection after a refresh shrank the list
    pub fn clamp_selection(&mut self) {
        let count = self.device_count();
        if count == 0 {
            self.selected_device_index = 0;
        } else if self.selected_device_index >= count {
            self.selected_device_index = count - 1;
        }
    }
}
