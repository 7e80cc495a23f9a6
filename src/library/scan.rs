use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::{AlbumContext, AlbumDetails, AlbumRef, CollectionKind};

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.'))
                .any(|e| !e.is_empty() && e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn entry_name(entry: &DirEntry) -> Option<String> {
    entry.file_name().to_str().map(str::to_string)
}

/// Read-only view of a library laid out as
/// `<root>/<artist>/<collection folder>/<album>/<files>`.
///
/// Every query goes back to the filesystem. Missing or unreadable
/// directories yield empty results and a log line, never an error.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    settings: LibrarySettings,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>, settings: &LibrarySettings) -> Self {
        Self {
            root: root.into(),
            settings: settings.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, kind: CollectionKind) -> &str {
        match kind {
            CollectionKind::Studio => &self.settings.studio_dir,
            CollectionKind::Live => &self.settings.live_dir,
        }
    }

    /// Map an on-disk collection folder name to its kind.
    pub fn kind_for_label(&self, label: &str) -> Option<CollectionKind> {
        CollectionKind::ALL
            .into_iter()
            .find(|&kind| self.collection_dir(kind) == label)
    }

    fn album_dir(&self, artist: &str, kind: CollectionKind, album: &str) -> PathBuf {
        self.root
            .join(artist)
            .join(self.collection_dir(kind))
            .join(album)
    }

    /// Immediate children of `dir` in file-name order, or `None` when `dir`
    /// is not a readable directory.
    fn children(&self, dir: &Path) -> Option<Vec<DirEntry>> {
        if !dir.is_dir() {
            return None;
        }

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.settings.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(err) => {
                    debug!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| self.settings.include_hidden || !is_hidden(e.path()))
            .collect();
        Some(entries)
    }

    /// Artists are the root's sub-directories holding at least one collection folder.
    pub fn list_artists(&self) -> Vec<String> {
        let Some(entries) = self.children(&self.root) else {
            warn!(root = %self.root.display(), "library root is not a readable directory");
            return Vec::new();
        };

        let mut artists: Vec<String> = entries
            .iter()
            .filter(|e| e.file_type().is_dir())
            .filter(|e| {
                CollectionKind::ALL
                    .into_iter()
                    .any(|kind| e.path().join(self.collection_dir(kind)).is_dir())
            })
            .filter_map(entry_name)
            .collect();

        artists.sort();
        artists
    }

    /// Studio and live albums of `artist`, merged and sorted by album name.
    pub fn list_albums(&self, artist: &str) -> Vec<AlbumRef> {
        let artist_dir = self.root.join(artist);
        let mut albums: Vec<AlbumRef> = Vec::new();

        for kind in CollectionKind::ALL {
            let Some(entries) = self.children(&artist_dir.join(self.collection_dir(kind))) else {
                continue;
            };
            albums.extend(
                entries
                    .iter()
                    .filter(|e| e.file_type().is_dir())
                    .filter_map(entry_name)
                    .map(|album| AlbumRef {
                        album,
                        kind,
                        artist: artist.to_string(),
                    }),
            );
        }

        albums.sort_by(|a, b| a.album.cmp(&b.album));
        albums
    }

    /// Every album of every artist: artists in order, each followed by its albums.
    pub fn all_albums(&self) -> Vec<AlbumRef> {
        self.list_artists()
            .iter()
            .flat_map(|artist| self.list_albums(artist))
            .collect()
    }

    /// Cover and tracks of one album.
    ///
    /// The cover is the first image in file-name order; any further images
    /// are ignored.
    pub fn album_details(&self, artist: &str, kind: CollectionKind, album: &str) -> AlbumDetails {
        let dir = self.album_dir(artist, kind, album);
        let Some(entries) = self.children(&dir) else {
            warn!(path = %dir.display(), "album directory not found");
            return AlbumDetails::default();
        };

        let mut details = AlbumDetails::default();
        for entry in entries.iter().filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if has_extension(path, &self.settings.cover_extensions) {
                if details.cover.is_none() {
                    details.cover = Some(path.to_path_buf());
                }
            } else if has_extension(path, &self.settings.audio_extensions) {
                details.tracks.push(path.to_path_buf());
            }
        }
        details
    }

    pub fn details_of(&self, album: &AlbumRef) -> AlbumDetails {
        self.album_details(&album.artist, album.kind, &album.album)
    }

    /// The whole catalog flattened to `(track, context)` pairs.
    pub fn all_tracks(&self) -> Vec<(PathBuf, AlbumContext)> {
        let mut tracks = Vec::new();
        for album in self.all_albums() {
            let context = AlbumContext::from(&album);
            tracks.extend(
                self.details_of(&album)
                    .tracks
                    .into_iter()
                    .map(|track| (track, context.clone())),
            );
        }
        tracks
    }

    /// Find which album `track` belongs to.
    ///
    /// The candidate album is read off the path layout and then confirmed
    /// against fresh listings of the artists, that artist's albums and that
    /// album, so the answer matches what a full catalog walk would report.
    pub fn context_lookup(&self, track: &Path) -> Option<AlbumContext> {
        let relative = track.strip_prefix(&self.root).ok()?;
        let parts: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        let [artist, label, album, _file] = parts.as_slice() else {
            return None;
        };
        let kind = self.kind_for_label(label)?;

        if !self.list_artists().iter().any(|a| a == artist) {
            return None;
        }
        if !self
            .list_albums(artist)
            .iter()
            .any(|a| a.kind == kind && a.album == *album)
        {
            return None;
        }

        self.album_details(artist, kind, album)
            .tracks
            .iter()
            .any(|t| t == track)
            .then(|| AlbumContext {
                artist: artist.to_string(),
                kind,
                album: album.to_string(),
            })
    }
}
