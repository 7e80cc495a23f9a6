use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::audio::Jukebox;
use crate::library::Catalog;

/// Write one line per album: artist, collection, album and track count.
pub fn print_catalog(catalog: &Catalog, out: &mut impl Write) -> io::Result<()> {
    let albums = catalog.all_albums();
    if albums.is_empty() {
        writeln!(out, "no albums under {}", catalog.root().display())?;
        return Ok(());
    }
    for album in &albums {
        let tracks = catalog.details_of(album).tracks.len();
        writeln!(
            out,
            "{} / {} / {} ({} tracks)",
            album.artist, album.kind, album.album, tracks
        )?;
    }
    Ok(())
}

/// Rewrite a requested track path so it starts with `root` as the catalog spells it.
///
/// Relative paths that do not exist from the working directory are taken
/// as relative to the library root. Both sides are canonicalized, so
/// `./Music/..` and absolute spellings of the same file agree. Paths that
/// cannot be resolved, or lie outside the root, come back unchanged.
pub fn resolve_request(root: &Path, track: &Path) -> PathBuf {
    let candidate = if track.is_relative() && !track.exists() {
        root.join(track)
    } else {
        track.to_path_buf()
    };

    let (Ok(root_abs), Ok(track_abs)) = (fs::canonicalize(root), fs::canonicalize(&candidate))
    else {
        debug!(track = %track.display(), "cannot resolve requested track");
        return candidate;
    };
    match track_abs.strip_prefix(&root_abs) {
        Ok(inside) => root.join(inside),
        Err(_) => candidate,
    }
}

/// Queue the tracks named on the command line.
///
/// Tracks outside the catalog are logged and left out. Returns how many
/// were queued.
pub fn enqueue_requested(jukebox: &Jukebox, root: &Path, tracks: &[PathBuf]) -> usize {
    let mut queued = 0;
    for requested in tracks {
        let track = resolve_request(root, requested);
        match jukebox.context_lookup(&track) {
            Some(context) => {
                jukebox.enqueue(track, context);
                queued += 1;
            }
            None => warn!(track = %requested.display(), "not part of the catalog, ignoring"),
        }
    }
    if let Some(current) = jukebox.current_track() {
        info!(track = %current.display(), queued, "startup requests queued");
    }
    queued
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioDevice;
    use crate::config::{LibrarySettings, PlaybackSettings};
    use crate::error::DeviceError;
    use std::sync::Arc;
    use tempfile::tempdir;

    struct SilentDevice;

    impl AudioDevice for SilentDevice {
        fn load_and_play(&self, _path: &Path) -> Result<(), DeviceError> {
            Ok(())
        }
        fn stop(&self) {}
        fn is_audible(&self) -> bool {
            true
        }
    }

    fn library() -> (tempfile::TempDir, Catalog) {
        let dir = tempdir().unwrap();
        let album = dir.path().join("Aphex").join("Álbumes de estudio").join("Drukqs");
        fs::create_dir_all(&album).unwrap();
        fs::write(album.join("01 - Jynweythek.mp3"), b"").unwrap();
        fs::write(album.join("02 - Vordhosbn.mp3"), b"").unwrap();
        let live = dir.path().join("Aphex").join("Álbumes en vivo").join("Field Day");
        fs::create_dir_all(&live).unwrap();
        let catalog = Catalog::new(dir.path(), &LibrarySettings::default());
        (dir, catalog)
    }

    #[test]
    fn lists_albums_with_track_counts() {
        let (_dir, catalog) = library();
        let mut out = Vec::new();
        print_catalog(&catalog, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Aphex / studio / Drukqs (2 tracks)\nAphex / live / Field Day (0 tracks)\n"
        );
    }

    #[test]
    fn lists_empty_library() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::new(dir.path(), &LibrarySettings::default());
        let mut out = Vec::new();
        print_catalog(&catalog, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("no albums under "));
    }

    #[test]
    fn queues_known_tracks_and_skips_others() {
        let (dir, catalog) = library();
        let album = dir.path().join("Aphex").join("Álbumes de estudio").join("Drukqs");
        let jukebox = Jukebox::new(catalog, Arc::new(SilentDevice), &PlaybackSettings::default());

        let requested = vec![
            album.join("02 - Vordhosbn.mp3"),
            dir.path().join("elsewhere.mp3"),
            album.join("01 - Jynweythek.mp3"),
        ];
        assert_eq!(enqueue_requested(&jukebox, dir.path(), &requested), 2);
        assert_eq!(jukebox.current_track(), Some(album.join("02 - Vordhosbn.mp3")));
        assert_eq!(jukebox.queue_len(), 1);
    }

    #[test]
    fn queues_tracks_spelled_differently_from_the_root() {
        let (dir, catalog) = library();
        let album = dir.path().join("Aphex").join("Álbumes de estudio").join("Drukqs");
        let jukebox = Jukebox::new(catalog, Arc::new(SilentDevice), &PlaybackSettings::default());

        let requested = vec![
            PathBuf::from("Aphex/Álbumes de estudio/Drukqs/01 - Jynweythek.mp3"),
            dir.path()
                .join("Aphex")
                .join("..")
                .join("Aphex")
                .join("Álbumes de estudio")
                .join("Drukqs")
                .join("02 - Vordhosbn.mp3"),
        ];
        assert_eq!(enqueue_requested(&jukebox, dir.path(), &requested), 2);
        assert_eq!(jukebox.current_track(), Some(album.join("01 - Jynweythek.mp3")));
        assert_eq!(
            jukebox.next_pending().map(|e| e.track),
            Some(album.join("02 - Vordhosbn.mp3"))
        );
    }

    #[test]
    fn unresolvable_requests_come_back_unchanged() {
        let dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        let outside = elsewhere.path().join("x.mp3");
        fs::write(&outside, b"").unwrap();

        assert_eq!(resolve_request(dir.path(), &outside), outside);
        assert_eq!(
            resolve_request(dir.path(), Path::new("/no/such/track.mp3")),
            PathBuf::from("/no/such/track.mp3")
        );
        assert_eq!(
            resolve_request(dir.path(), Path::new("missing.mp3")),
            dir.path().join("missing.mp3")
        );
    }
}
