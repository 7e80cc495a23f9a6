//! Application model: the album carousel and the song-number entry.
//!
//! `App` holds a snapshot of the album list plus the listing of the album
//! in front. Track listings are re-read from disk whenever the selection
//! moves, so files added while browsing show up on the next visit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::audio::QueueEntry;
use crate::library::{AlbumContext, AlbumRef, Catalog, DurationLookup};

/// One line of the track listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub path: PathBuf,
    /// File stem, as shown to the user.
    pub name: String,
    pub duration: Duration,
}

/// The album currently in front of the carousel.
#[derive(Debug, Clone)]
pub struct AlbumView {
    pub album: AlbumRef,
    pub cover: Option<PathBuf>,
    pub tracks: Vec<TrackRow>,
}

pub struct App {
    catalog: Catalog,
    durations: Arc<dyn DurationLookup>,

    pub artists: Vec<String>,
    pub albums: Vec<AlbumRef>,
    pub current: usize,
    pub view: Option<AlbumView>,

    entry: String,
    entry_digits: usize,
    artist_presses: HashMap<char, usize>,
}

impl App {
    pub fn new(catalog: Catalog, durations: Arc<dyn DurationLookup>, entry_digits: usize) -> Self {
        let mut app = Self {
            catalog,
            durations,
            artists: Vec::new(),
            albums: Vec::new(),
            current: 0,
            view: None,
            entry: String::new(),
            entry_digits: entry_digits.max(1),
            artist_presses: HashMap::new(),
        };
        app.reload();
        app
    }

    /// Re-read artists and albums, keeping the selection on the same album when it still exists.
    pub fn reload(&mut self) {
        let previous = self.current_album().cloned();
        self.artists = self.catalog.list_artists();
        self.albums = self.catalog.all_albums();
        self.current = previous
            .and_then(|p| self.albums.iter().position(|a| *a == p))
            .unwrap_or(0);
        debug!(
            artists = self.artists.len(),
            albums = self.albums.len(),
            "catalog loaded"
        );
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        self.view = self.albums.get(self.current).cloned().map(|album| {
            let details = self.catalog.details_of(&album);
            let tracks = details
                .tracks
                .into_iter()
                .map(|path| TrackRow {
                    name: track_name(&path),
                    duration: self.durations.duration_or_zero(&path),
                    path,
                })
                .collect();
            AlbumView {
                album,
                cover: details.cover,
                tracks,
            }
        });
    }

    pub fn has_albums(&self) -> bool {
        !self.albums.is_empty()
    }

    pub fn current_album(&self) -> Option<&AlbumRef> {
        self.albums.get(self.current)
    }

    /// Albums either side of the current one, wrapping around.
    ///
    /// Both are `None` when fewer than two albums exist.
    pub fn neighbours(&self) -> (Option<&AlbumRef>, Option<&AlbumRef>) {
        let n = self.albums.len();
        if n < 2 {
            return (None, None);
        }
        let prev = (self.current + n - 1) % n;
        let next = (self.current + 1) % n;
        (self.albums.get(prev), self.albums.get(next))
    }

    fn select(&mut self, idx: usize) {
        self.current = idx;
        self.clear_entry();
        self.refresh_view();
    }

    pub fn scroll_left(&mut self) {
        let n = self.albums.len();
        if n == 0 {
            return;
        }
        self.select((self.current + n - 1) % n);
    }

    pub fn scroll_right(&mut self) {
        let n = self.albums.len();
        if n == 0 {
            return;
        }
        self.select((self.current + 1) % n);
    }

    /// Digits typed so far.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Whether the full song number has been typed.
    pub fn entry_armed(&self) -> bool {
        self.entry.len() == self.entry_digits
    }

    /// Append a digit. Typing past a complete number starts a new one.
    pub fn push_digit(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        if self.entry_armed() {
            self.entry.clear();
        }
        self.entry.push(c);
    }

    pub fn clear_entry(&mut self) {
        self.entry.clear();
    }

    /// Rows to highlight while a number is being typed.
    pub fn entry_matches(&self, row: &TrackRow) -> bool {
        !self.entry.is_empty() && row.name.starts_with(&self.entry)
    }

    /// Resolve the typed number to the first track of the current album
    /// whose file name starts with it. A complete entry is consumed whether
    /// or not anything matches.
    pub fn take_entry(&mut self) -> Option<QueueEntry> {
        if !self.entry_armed() {
            return None;
        }
        let number = std::mem::take(&mut self.entry);
        let view = self.view.as_ref()?;
        let row = view.tracks.iter().position(|r| {
            r.path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(|name| name.starts_with(&number))
        });
        match row {
            Some(row) => self.selected_entry(row),
            None => {
                debug!(number = %number, "no track with that number");
                None
            }
        }
    }

    /// The queue entry for `row` of the current album.
    pub fn selected_entry(&self, row: usize) -> Option<QueueEntry> {
        let view = self.view.as_ref()?;
        let track = view.tracks.get(row)?;
        Some(QueueEntry {
            track: track.path.clone(),
            context: AlbumContext::from(&view.album),
        })
    }

    /// Jump to the next artist starting with `letter`.
    ///
    /// Repeated presses of the same letter cycle through the matching
    /// artists. The carousel lands on that artist's first album.
    pub fn select_artist_by_letter(&mut self, letter: char) {
        let letter = letter.to_uppercase().next().unwrap_or(letter);
        let presses = self.artist_presses.entry(letter).or_insert(0);
        let nth = *presses;
        *presses += 1;

        let matching: Vec<&String> = self
            .artists
            .iter()
            .filter(|a| a.to_uppercase().starts_with(letter))
            .collect();
        if matching.is_empty() {
            return;
        }
        let artist = matching[nth % matching.len()].clone();
        if let Some(idx) = self.albums.iter().position(|a| a.artist == artist) {
            self.select(idx);
        }
    }

    pub fn duration_of(&self, path: &Path) -> Duration {
        self.durations.duration_or_zero(path)
    }
}

/// File stem of a track, or the full name when there is no stem.
pub fn track_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Title shown for the playing track: the file stem without its
/// leading `"NN - "` number.
pub fn now_playing_title(path: &Path) -> String {
    let name = track_name(path);
    match name.split_once(" - ") {
        Some((_, title)) => title.to_string(),
        None => name,
    }
}
