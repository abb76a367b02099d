//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, PromptKind};
use crate::config::{ControlsSettings, UiSettings};

const CONTROLS: [(&str, &str); 9] = [
    ("space/p", "play/pause"),
    ("h/l", "prev/next"),
    ("s", "shuffle"),
    ("j/k", "up/down"),
    ("g/G", "top/bottom"),
    ("enter", "play selected"),
    ("o", "open files"),
    ("O", "open folder"),
    ("q", "quit"),
];

/// Render the controls help text, incorporating the configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let mut parts: Vec<String> = CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect();
    // Keep the seek/speed hints next to the transport keys.
    parts.insert(2, format!("[H/L] seek -/+{}%", controls.seek_step_percent));
    parts.insert(3, format!("[-/+] speed -/+{}", controls.rate_step));
    parts.join(" | ")
}

fn prompt_text(app: &App) -> Option<String> {
    let prompt = app.prompt.as_ref()?;
    let label = match prompt.kind {
        PromptKind::Files => "files (separate with ;)",
        PromptKind::Folder => "folder",
    };
    Some(format!("{label}: {}_", prompt.input))
}

/// Status line: transport state, title, time, shuffle and speed.
fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    if app.title.is_empty() {
        parts.push(" No track loaded".to_string());
    } else {
        let state = if app.playing { "Playing" } else { "Paused" };
        parts.push(format!(" {state}"));
        parts.push(format!("Song: {} [{}]", app.title, app.time_text));
    }
    parts.push(format!("Shuffle: {}", app.shuffle_label));
    parts.push(format!("Speed: {}x", app.rate));

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" allegro ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = Paragraph::new(status_text(app))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Seek bar
    let ratio = (app.progress / 100.0).clamp(0.0, 1.0);
    let seek_bar = Gauge::default()
        .block(Block::bordered().title(" position "))
        .ratio(ratio)
        .label(app.time_text.as_str());
    frame.render_widget(seek_bar, chunks[2]);

    // Playlist
    {
        // Center the selected item when possible by creating a visible window.
        // Important: only build ListItems for the visible window (avoid allocating the entire list).
        let total = app.playlist.len();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = sel_pos.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = app.playlist[start..end]
            .iter()
            .enumerate()
            .map(|(offset, name)| {
                if app.current == Some(start + offset) {
                    ListItem::new(format!("♪ {name}")).bold()
                } else {
                    ListItem::new(format!("  {name}"))
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" playlist ({total}) ")),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Footer: the path prompt replaces the controls help while open.
    let (footer_title, footer_text) = match prompt_text(app) {
        Some(text) => (" open (enter loads, esc cancels) ", text),
        None => (" controls ", controls_text(controls_settings)),
    };
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(footer_title)
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
