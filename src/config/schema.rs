use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/rockola/config.toml` or `~/.config/rockola/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ROCKOLA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            library: LibrarySettings::default(),
            playback: PlaybackSettings::default(),
            ui: UiSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Library root: one directory per artist below it.
    pub root: PathBuf,
    /// Folder name holding an artist's studio albums.
    pub studio_dir: String,
    /// Folder name holding an artist's live albums.
    pub live_dir: String,
    /// File extensions to treat as playable tracks (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// File extensions to treat as cover art (case-insensitive, without dot).
    pub cover_extensions: Vec<String>,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to follow symlinks while listing directories.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("Music"),
            studio_dir: "Álbumes de estudio".to_string(),
            live_dir: "Álbumes en vivo".to_string(),
            audio_extensions: vec!["mp3".into()],
            cover_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            include_hidden: false,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the background poller checks for a finished track (milliseconds).
    pub poll_interval_ms: u64,
    /// How many random candidates to try when tracks fail to load.
    pub max_skip_attempts: usize,
    /// Start a random track at launch when nothing was requested.
    pub autoplay_on_start: bool,
}

impl PlaybackSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_skip_attempts: 8,
            autoplay_on_start: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Redraw period of the terminal UI (milliseconds).
    pub refresh_ms: u64,
    /// Number of track rows per column in the album listing.
    pub tracks_per_column: usize,
    /// Number of digits that make up a track-number entry.
    pub entry_digits: usize,
}

impl UiSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Rockola ~ ".to_string(),
            refresh_ms: 250,
            tracks_per_column: 10,
            entry_digits: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Directory receiving the daily-rotated log files.
    pub directory: PathBuf,
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".logs"),
            filter: "rockola=info".to_string(),
        }
    }
}
