// UI rendering functions for the TUI

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::mdev::lifecycle;
use crate::ui::colors::{PastelColor, Theme};

use super::state::AppState;

/// Convert our custom PastelColor to ratatui Color
fn pastel_to_ratatui_color(color: PastelColor) -> Color {
    match color {
        PastelColor::Pink => Color::Rgb(255, 182, 193),     // Light pink
        PastelColor::Lavender => Color::Rgb(204, 169, 221), // Light purple
        PastelColor::Mint => Color::Rgb(176, 224, 183),     // Mint green
        PastelColor::SkyBlue => Color::Rgb(173, 216, 230),  // Light sky blue
        PastelColor::Peach => Color::Rgb(255, 218, 185),    // Peach
        PastelColor::White => Color::White,
        PastelColor::Gray => Color::Rgb(169, 169, 169),     // Light gray
    }
}

/// Main UI render function
pub fn ui(f: &mut Frame, app: &AppState) {
    let theme = Theme::default();

    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(8), // Console log
            Constraint::Length(3), // Footer
        ])
        .split(size);

    render_title(f, app, chunks[0], &theme);

    // Main content: device list on the left, details on the right
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_device_list(f, app, content[0], &theme);
    render_details(f, app, content[1], &theme);

    render_console(f, app, chunks[2], &theme);
    render_footer(f, app, chunks[3], &theme);

    if app.wizard.is_some() {
        render_wizard(f, app, &theme);
    }

    if let Some(message) = app.loading_message.as_ref() {
        render_loading_overlay(f, message, &theme);
    }
}

/// Render the title bar
fn render_title(f: &mut Frame, app: &AppState, area: Rect, theme: &Theme) {
    let title = format!(" ✨ {} ✨ ", app.title);

    let title_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            title,
            Style::default()
                .fg(pastel_to_ratatui_color(theme.primary))
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(pastel_to_ratatui_color(theme.primary)));

    f.render_widget(title_block, area);

    // Show the resolved graphics device as a subtitle
    let subtitle = match &app.catalog {
        Some(catalog) => format!("Mediated vGPU devices on {}", catalog.address),
        None => "No graphics device resolved".to_string(),
    };
    let subtitle_len = subtitle.len() as u16;
    let center_x = area.x + (area.width.saturating_sub(subtitle_len)) / 2;

    let subtitle_area = Rect::new(center_x, area.y + 1, subtitle_len.min(area.width), 1);

    let subtitle_text = Paragraph::new(Line::from(vec![Span::styled(
        subtitle,
        Style::default()
            .fg(pastel_to_ratatui_color(theme.accent))
            .add_modifier(Modifier::BOLD),
    )]));

    f.render_widget(subtitle_text, subtitle_area);
}

/// Render the active vGPU list panel
fn render_device_list(f: &mut Frame, app: &AppState, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " vGPUs ",
            Style::default()
                .fg(pastel_to_ratatui_color(theme.secondary))
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(pastel_to_ratatui_color(theme.secondary)));

    f.render_widget(block, area);

    let inner_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let devices = app.catalog.as_ref().map(|c| c.devices.as_slice()).unwrap_or(&[]);

    if devices.is_empty() {
        let text = vec![
            Line::from(Span::styled(
                "No vGPUs detected.",
                Style::default().fg(pastel_to_ratatui_color(theme.primary)),
            )),
            Line::from(""),
            Line::from("Press 'n' to create one."),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner_area);
        return;
    }

    let items: Vec<ListItem> = devices
        .iter()
        .enumerate()
        .map(|(i, identifier)| {
            let style = if i == app.selected_device_index {
                Style::default()
                    .fg(pastel_to_ratatui_color(theme.success))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(pastel_to_ratatui_color(theme.text))
            };
            let marker = if i == app.selected_device_index { "▸ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(identifier.clone(), style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items), inner_area);
}

/// Render the details panel for the selected device
fn render_details(f: &mut Frame, app: &AppState, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " Details ",
            Style::default()
                .fg(pastel_to_ratatui_color(theme.accent))
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(pastel_to_ratatui_color(theme.accent)));

    f.render_widget(block, area);

    let inner_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let label_style = Style::default()
        .fg(pastel_to_ratatui_color(theme.text))
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(pastel_to_ratatui_color(theme.text));

    if let Some(details) = &app.details {
        let mut info_lines = vec![
            Line::from(vec![
                Span::styled("UUID: ", label_style),
                Span::styled(details.identifier.clone(), value_style),
            ]),
            Line::from(vec![
                Span::styled("VRAM size: ", label_style),
                Span::styled(details.descriptor.capacity_label().to_string(), value_style),
            ]),
            Line::from(vec![
                Span::styled("Max resolution: ", label_style),
                Span::styled(details.descriptor.resolution_label().to_string(), value_style),
            ]),
            Line::from(vec![
                Span::styled("Device path: ", label_style),
                Span::styled(details.device_path.display().to_string(), value_style),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "QEMU flag ('c' to print to console):",
                Style::default()
                    .fg(pastel_to_ratatui_color(theme.primary))
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        info_lines.push(Line::from(Span::styled(
            lifecycle::format_passthrough_flag(&details.identifier),
            Style::default().fg(pastel_to_ratatui_color(PastelColor::Gray)),
        )));

        let paragraph = Paragraph::new(info_lines).wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner_area);
    } else {
        let text = vec![
            Line::from(Span::styled(
                "No vGPU selected.",
                Style::default().fg(pastel_to_ratatui_color(theme.primary)),
            )),
            Line::from(""),
            Line::from("Use ↑/↓ to select a device."),
        ];
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner_area);
    }
}

/// Render the create-wizard overlay
fn render_wizard(f: &mut Frame, app: &AppState, theme: &Theme) {
    let wizard = match &app.wizard {
        Some(wizard) => wizard,
        None => return,
    };

    let area = f.size();
    let overlay_width = area.width.saturating_sub(10).min(70);
    let overlay_height = 12.min(area.height);
    let x = area.width.saturating_sub(overlay_width) / 2;
    let y = area.height.saturating_sub(overlay_height) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " vGPU Setup Wizard ",
            Style::default()
                .fg(pastel_to_ratatui_color(theme.accent))
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(pastel_to_ratatui_color(theme.accent)));

    let label_style = Style::default()
        .fg(pastel_to_ratatui_color(theme.text))
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("vGPU Name: ", label_style),
            Span::styled(
                wizard.identifier.clone(),
                Style::default().fg(pastel_to_ratatui_color(theme.success)),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Select vGPU mode:", label_style)),
    ];

    if let Some(catalog) = &app.catalog {
        for (i, entry) in catalog.modes.iter().enumerate() {
            let style = if i == wizard.selected_mode_index {
                Style::default()
                    .fg(pastel_to_ratatui_color(theme.success))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(pastel_to_ratatui_color(theme.text))
            };
            let marker = if i == wizard.selected_mode_index { "▸ " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(entry.display_line(), style),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: create   Esc: cancel",
        Style::default().fg(pastel_to_ratatui_color(PastelColor::Gray)),
    )));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, overlay_area);
}

/// Render a loading overlay
fn render_loading_overlay(f: &mut Frame, message: &str, theme: &Theme) {
    let area = f.size();
    let overlay_height = 3;
    let overlay_width = message.len() as u16 + 10;

    let x = area.width.saturating_sub(overlay_width) / 2;
    let y = area.height.saturating_sub(overlay_height) / 2;

    let overlay_area = Rect::new(x, y, overlay_width.min(area.width), overlay_height);

    let overlay = Paragraph::new(Line::from(vec![Span::styled(
        message,
        Style::default()
            .fg(pastel_to_ratatui_color(theme.primary))
            .add_modifier(Modifier::BOLD),
    )]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(pastel_to_ratatui_color(theme.accent))),
    )
    .alignment(Alignment::Center);

    f.render_widget(overlay, overlay_area);
}

/// Render console log panel
fn render_console(f: &mut Frame, app: &AppState, area: Rect, _theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Console ")
        .border_style(Style::default().fg(pastel_to_ratatui_color(PastelColor::Gray)));

    f.render_widget(block, area);

    let inner_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };

    // Show the newest messages that fit
    let visible = inner_area.height as usize;
    let start = app.log_messages.len().saturating_sub(visible);

    let log_items: Vec<ListItem> = app.log_messages[start..]
        .iter()
        .map(|msg| {
            let color = msg.level.color();
            let time_style = Style::default().fg(pastel_to_ratatui_color(PastelColor::Gray));

            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", msg.timestamp), time_style),
                Span::styled(&msg.text, Style::default().fg(color)),
            ]))
        })
        .collect();

    f.render_widget(List::new(log_items), inner_area);
}

/// Render the footer
fn render_footer(f: &mut Frame, app: &AppState, area: Rect, theme: &Theme) {
    let key_style = Style::default()
        .fg(pastel_to_ratatui_color(theme.accent))
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(pastel_to_ratatui_color(theme.text));

    let mut help_text = vec![
        Span::styled("n", key_style),
        Span::styled("ew vGPU | ", text_style),
    ];

    if app.device_count() > 0 {
        help_text.extend(vec![
            Span::styled("↑/↓", key_style),
            Span::styled(" select | ", text_style),
            Span::styled("d", key_style),
            Span::styled("elete | ", text_style),
            Span::styled("c", key_style),
            Span::styled(" QEMU flag | ", text_style),
        ]);
    }

    help_text.extend(vec![
        Span::styled("r", key_style),
        Span::styled("efresh | ", text_style),
        Span::styled("q", key_style),
        Span::styled("uit", text_style),
    ]);

    let text = vec![Line::from(help_text)];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(pastel_to_ratatui_color(PastelColor::Gray))),
        )
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
