//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, now_playing_title};
use crate::audio::{NowPlaying, QueueEntry};
use crate::config::UiSettings;
use crate::library::AlbumRef;

const CONTROLS: [(&str, &str); 8] = [
    ("←/→", "browse albums"),
    ("0-9", "song number"),
    ("enter", "queue song"),
    ("esc", "clear number"),
    ("a-z", "jump to artist"),
    ("tab", "next song"),
    ("backspace", "stop"),
    ("F10/ctrl-c", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `m:ss`.
fn format_mss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Playback facts the now-playing panel shows, gathered once per frame.
#[derive(Debug, Default, Clone)]
pub struct PlaybackPanel {
    pub now: Option<NowPlaying>,
    /// Playtime of the current track, zero when unknown.
    pub total: Duration,
    pub queued: usize,
    pub next: Option<QueueEntry>,
}

fn album_lines(album: &AlbumRef, cover: Option<&str>) -> Vec<Line<'static>> {
    let cover = match cover {
        Some(name) => format!("[cover: {name}]"),
        None => "[no cover]".to_string(),
    };
    vec![
        Line::from(album.artist.clone()),
        Line::from(album.album.clone()),
        Line::from(format!("({})", album.kind)),
        Line::from(cover),
    ]
}

fn draw_carousel(frame: &mut Frame, app: &App, area: Rect) {
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(2, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    let (prev, next) = app.neighbours();
    for (album, panel) in [(prev, panels[0]), (next, panels[2])] {
        let lines = album.map(|a| album_lines(a, None)).unwrap_or_default();
        let side = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(side, panel);
    }

    let current = match &app.view {
        Some(view) => {
            let cover = view
                .cover
                .as_ref()
                .and_then(|c| c.file_name())
                .map(|n| n.to_string_lossy().into_owned());
            album_lines(&view.album, cover.as_deref())
        }
        None => vec![Line::from("No albums found")],
    };
    let counter = if app.has_albums() {
        format!(" {}/{} ", app.current + 1, app.albums.len())
    } else {
        String::new()
    };
    let front = Paragraph::new(current)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(counter)
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(front, panels[1]);
}

fn draw_tracks(frame: &mut Frame, app: &App, ui_settings: &UiSettings, area: Rect) {
    let title = if app.entry().is_empty() {
        " songs ".to_string()
    } else {
        format!(" songs [{}] ", app.entry())
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(view) = app.view.as_ref() else {
        return;
    };
    if view.tracks.is_empty() {
        frame.render_widget(Paragraph::new("This album has no songs"), inner);
        return;
    }

    let per_column = ui_settings.tracks_per_column.max(1);
    let columns: Vec<_> = view.tracks.chunks(per_column).collect();
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, columns.len() as u32);
            columns.len()
        ])
        .split(inner);

    let highlight = Style::default().bg(Color::Green).fg(Color::Black);
    for (rows, column_area) in columns.into_iter().zip(areas.iter()) {
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let item = ListItem::new(format!("{} ({})", row.name, format_mss(row.duration)));
                if app.entry_matches(row) {
                    item.style(highlight)
                } else {
                    item
                }
            })
            .collect();
        frame.render_widget(List::new(items), *column_area);
    }
}

fn now_playing_lines(panel: &PlaybackPanel) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match &panel.now {
        Some(now) => {
            let (artist, album) = now
                .context
                .as_ref()
                .map(|c| (c.artist.clone(), c.album.clone()))
                .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
            lines.push(Line::from(format!("Artist: {artist}")));
            lines.push(Line::from(format!("Album: {album}")));
            lines.push(Line::from(format!("Song: {}", now_playing_title(&now.track))));
            lines.push(Line::from(format!("Duration: {}", format_mss(panel.total))));
            lines.push(Line::from(format!("Elapsed: {}", format_mss(now.elapsed))));
        }
        None => lines.push(Line::from("Nothing playing")),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!("Queued: {}", panel.queued)));
    let next = match &panel.next {
        Some(entry) => now_playing_title(&entry.track),
        None => "random pick".to_string(),
    };
    lines.push(Line::from(format!("Next: {next}")));
    lines
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, playback: &PlaybackPanel, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
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
                .title(" rockola ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_carousel(frame, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(36)])
        .split(chunks[2]);
    draw_tracks(frame, app, ui_settings, body[0]);

    let now_playing = Paragraph::new(now_playing_lines(playback))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" now playing ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, body[1]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
