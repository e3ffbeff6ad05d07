//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Input, Mode};
use crate::audio::PlaybackState;
use crate::config::{ControlsSettings, UiSettings};

const SIDEBAR_WIDTH: u16 = 26;

/// Key hints shown under the mode buttons.
fn controls_text(mode: Mode, controls: &ControlsSettings) -> Vec<String> {
    let mut lines = vec![
        "[tab] switch mode".to_string(),
        "[q] quit".to_string(),
        String::new(),
    ];
    match mode {
        Mode::Local => lines.extend([
            "[a] add music".to_string(),
            "[j/k] up/down".to_string(),
            "[gg/G] top/bottom".to_string(),
            "[enter] play selected".to_string(),
            "[space/p] play/pause".to_string(),
            "[h/l] prev/next".to_string(),
            format!("[H/L] seek -/+{}%", controls.seek_step_percent),
            "[0-9] seek to 0-90%".to_string(),
            "[+/-] volume".to_string(),
            "[m] mute".to_string(),
        ]),
        Mode::YouTube => lines.extend([
            "[i] edit link".to_string(),
            "[esc] stop editing".to_string(),
            "[ctrl-u] clear link".to_string(),
        ]),
    }
    lines
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn time_label(app: &App) -> String {
    match app.player.duration() {
        Some(total) => format!(
            "{} / {}",
            format_mmss(app.player.position().min(total)),
            format_mmss(total)
        ),
        None if app.player.state().is_loaded() => {
            format!("{} / --:--", format_mmss(app.player.position()))
        }
        None => "--:-- / --:--".to_string(),
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui: &UiSettings, controls: &ControlsSettings) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(frame.area());

    draw_sidebar(frame, app, ui, controls, columns[0]);

    let mut rows = vec![Constraint::Min(1)];
    if app.status.is_some() {
        rows.push(Constraint::Length(1));
    }
    // The footer exists in Local mode only.
    if app.mode == Mode::Local {
        rows.push(Constraint::Length(5));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows)
        .split(columns[1]);

    match app.mode {
        Mode::Local => draw_local(frame, app, chunks[0]),
        Mode::YouTube => draw_youtube(frame, app, ui, chunks[0]),
    }

    let mut next = 1;
    if let Some(status) = &app.status {
        let line = Paragraph::new(format!(" {status}")).style(Style::default().fg(Color::Yellow));
        frame.render_widget(line, chunks[next]);
        next += 1;
    }
    if app.mode == Mode::Local {
        draw_footer(frame, app, ui, chunks[next]);
    }
}

fn draw_sidebar(
    frame: &mut Frame,
    app: &App,
    ui: &UiSettings,
    controls: &ControlsSettings,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", ui.header_text))
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (key, mode) in [("F1", Mode::Local), ("F2", Mode::YouTube)] {
        let text = format!(" [{key}] {} ", mode.label());
        let span = if app.mode == mode {
            Span::styled(text, Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD))
        } else {
            Span::raw(text)
        };
        lines.push(Line::from(span));
    }
    lines.push(Line::default());
    lines.extend(
        controls_text(app.mode, controls)
            .into_iter()
            .map(|l| Line::from(l).dark_gray()),
    );

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn draw_local(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let prompt = match &app.input {
        Input::AddMusic(path) => Paragraph::new(format!("{path}▏"))
            .block(Block::bordered().title(" add music: enter to load, esc to cancel ")),
        _ => Paragraph::new("Press [a] to pick a file or folder")
            .dark_gray()
            .block(Block::bordered().title(" add music ")),
    };
    frame.render_widget(prompt, chunks[0]);

    let current = app.library.current_index();
    let items: Vec<ListItem> = app
        .library
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if Some(i) == current { "▶ " } else { "  " };
            let item = ListItem::new(format!("{marker}{}", track.display));
            if Some(i) == current {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let title = format!(" tracks ({}) ", app.library.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if !app.library.is_empty() {
        state.select(Some(app.cursor));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_youtube(frame: &mut Frame, app: &App, ui: &UiSettings, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let focused = app.input == Input::YoutubeUrl;
    let url = if app.youtube_url.is_empty() && !focused {
        Paragraph::new(ui.url_placeholder.as_str()).dark_gray()
    } else if focused {
        Paragraph::new(format!("{}▏", app.youtube_url))
    } else {
        Paragraph::new(app.youtube_url.as_str())
    };
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    frame.render_widget(
        url.block(Block::bordered().title(" link ").border_style(border)),
        chunks[0],
    );

    let address = app.embed_address();
    if address.is_empty() {
        return;
    }
    let embed = Paragraph::new(vec![
        Line::from(address).bold(),
        Line::default(),
        Line::from("Open this address in a browser to watch.").dark_gray(),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::bordered().title(" embed ").padding(Padding::uniform(1)));
    frame.render_widget(embed, chunks[1]);
}

fn draw_footer(frame: &mut Frame, app: &App, ui: &UiSettings, area: Rect) {
    let title = app.player.title().unwrap_or(ui.no_song_text.as_str());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let gauge = Gauge::default()
        .ratio((app.player.progress() / 100.0).clamp(0.0, 1.0))
        .label(time_label(app))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black));
    frame.render_widget(gauge, rows[0]);

    let active = Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
    let state = app.player.state();
    let glyph = |s: &'static str, on: bool| {
        if on {
            Span::styled(format!(" {s} "), active)
        } else {
            Span::raw(format!(" {s} "))
        }
    };
    let volume = if app.player.muted() {
        "🔇 muted".to_string()
    } else {
        format!("🔊 {:.0}%", app.player.volume() * 100.0)
    };
    let line = Line::from(vec![
        glyph("▶", state == PlaybackState::Playing),
        glyph("⏸", state == PlaybackState::Paused),
        glyph("⏭", false),
        Span::raw("   "),
        Span::raw(volume),
    ]);
    frame.render_widget(Paragraph::new(line), rows[1]);
}
