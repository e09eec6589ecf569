// Terminal UI module for vGPU Manager
//
// A ratatui-based interface with a pastel palette: device list and
// details panels, a create wizard, and a console feed for operation
// results

pub mod colors;
pub mod tui;

use std::io;

/// Runs the ratatui-based UI
pub fn run_tui() -> io::Result<()> {
    tui::run_app()
}
