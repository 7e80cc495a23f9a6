use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::app::App;
use crate::audio::Jukebox;
use crate::config;
use crate::ui::{self, PlaybackPanel};

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Track whose playtime is cached in `total`.
    last_track: Option<PathBuf>,
    total: Duration,
}

impl EventLoopState {
    /// Gather what the now-playing panel needs, reading the track's
    /// playtime only when the track changes.
    fn playback_panel(&mut self, app: &App, jukebox: &Jukebox) -> PlaybackPanel {
        let now = jukebox.snapshot();
        let track = now.as_ref().map(|n| n.track.clone());
        if track != self.last_track {
            self.total = track
                .as_deref()
                .map(|t| app.duration_of(t))
                .unwrap_or_default();
            self.last_track = track;
        }
        PlaybackPanel {
            now,
            total: self.total,
            queued: jukebox.queue_len(),
            next: jukebox.next_pending(),
        }
    }
}

/// Main terminal event loop: handles input and draws the UI.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    jukebox: &Jukebox,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let refresh = settings.ui.refresh_interval();
    loop {
        let panel = state.playback_panel(app, jukebox);
        terminal.draw(|f| ui::draw(f, app, &panel, &settings.ui))?;

        if event::poll(refresh)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, jukebox) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::F(10) => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Apply one key press. Returns `true` when the user asked to quit.
fn handle_key_event(key: KeyEvent, app: &mut App, jukebox: &Jukebox) -> bool {
    if is_quit(&key) {
        info!("quit requested");
        return true;
    }

    match key.code {
        KeyCode::Left => app.scroll_left(),
        KeyCode::Right => app.scroll_right(),
        KeyCode::Char(c) if c.is_ascii_digit() => app.push_digit(c),
        KeyCode::Char(c) if c.is_alphabetic() => app.select_artist_by_letter(c),
        KeyCode::Enter => {
            if let Some(entry) = app.take_entry() {
                info!(track = %entry.track.display(), "requested");
                jukebox.enqueue(entry.track, entry.context);
            }
        }
        KeyCode::Esc => app.clear_entry(),
        KeyCode::Tab => jukebox.skip(),
        KeyCode::Backspace => {
            debug!("stop requested");
            jukebox.stop();
        }
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quits_on_f10_and_ctrl_c_only() {
        assert!(is_quit(&KeyEvent::new(KeyCode::F(10), KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }
}
