use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

const STUDIO: &str = "Álbumes de estudio";
const LIVE: &str = "Álbumes en vivo";

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"not real audio").unwrap();
}

fn album_dir(root: &Path, artist: &str, collection: &str, album: &str) -> PathBuf {
    let dir = root.join(artist).join(collection).join(album);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn catalog(dir: &TempDir) -> Catalog {
    Catalog::new(dir.path(), &LibrarySettings::default())
}

#[test]
fn list_artists_requires_a_collection_folder_and_sorts() {
    let dir = tempdir().unwrap();
    album_dir(dir.path(), "Zappa", STUDIO, "Hot Rats");
    album_dir(dir.path(), "Aphex", LIVE, "Live in Cornwall");
    album_dir(dir.path(), "Björk", STUDIO, "Homogenic");
    fs::create_dir_all(dir.path().join("Loose Files").join("misc")).unwrap();
    touch(&dir.path().join("stray.mp3"));

    let artists = catalog(&dir).list_artists();
    assert_eq!(artists, vec!["Aphex", "Björk", "Zappa"]);
}

#[test]
fn list_artists_is_sorted_without_duplicates() {
    let dir = tempdir().unwrap();
    for name in ["delta", "Alpha", "charlie", "Bravo"] {
        album_dir(dir.path(), name, STUDIO, "One");
    }

    let artists = catalog(&dir).list_artists();
    let mut sorted = artists.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(artists, sorted);
    assert_eq!(artists.len(), 4);
}

#[test]
fn list_artists_on_missing_root_is_empty() {
    let dir = tempdir().unwrap();
    let catalog = Catalog::new(dir.path().join("nope"), &LibrarySettings::default());
    assert!(catalog.list_artists().is_empty());
    assert!(catalog.all_tracks().is_empty());
}

#[test]
fn hidden_artists_are_skipped_unless_configured() {
    let dir = tempdir().unwrap();
    album_dir(dir.path(), ".Secret", STUDIO, "Demo");
    album_dir(dir.path(), "Public", STUDIO, "Debut");

    assert_eq!(catalog(&dir).list_artists(), vec!["Public"]);

    let settings = LibrarySettings {
        include_hidden: true,
        ..LibrarySettings::default()
    };
    let with_hidden = Catalog::new(dir.path(), &settings).list_artists();
    assert_eq!(with_hidden, vec![".Secret", "Public"]);
}

#[test]
fn list_albums_merges_both_collections_sorted_by_name() {
    let dir = tempdir().unwrap();
    album_dir(dir.path(), "Aphex", STUDIO, "Syro");
    album_dir(dir.path(), "Aphex", STUDIO, "Drukqs");
    album_dir(dir.path(), "Aphex", LIVE, "Field Day");
    touch(&dir.path().join("Aphex").join(STUDIO).join("notes.txt"));

    let albums = catalog(&dir).list_albums("Aphex");
    let names: Vec<(&str, CollectionKind)> =
        albums.iter().map(|a| (a.album.as_str(), a.kind)).collect();
    assert_eq!(
        names,
        vec![
            ("Drukqs", CollectionKind::Studio),
            ("Field Day", CollectionKind::Live),
            ("Syro", CollectionKind::Studio),
        ]
    );
    assert!(albums.iter().all(|a| a.artist == "Aphex"));
}

#[test]
fn list_albums_skips_missing_collection_folder() {
    let dir = tempdir().unwrap();
    album_dir(dir.path(), "Aphex", LIVE, "Field Day");

    let albums = catalog(&dir).list_albums("Aphex");
    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].kind, CollectionKind::Live);

    assert!(catalog(&dir).list_albums("Nobody").is_empty());
}

#[test]
fn album_details_picks_cover_and_audio_tracks() {
    let dir = tempdir().unwrap();
    let album = album_dir(dir.path(), "Aphex", STUDIO, "Drukqs");
    touch(&album.join("02 - Meltphace.MP3"));
    touch(&album.join("01 - Gpowered.mp3"));
    touch(&album.join("folder.JPG"));
    touch(&album.join("liner.txt"));
    fs::create_dir_all(album.join("extras")).unwrap();

    let details = catalog(&dir).album_details("Aphex", CollectionKind::Studio, "Drukqs");
    assert_eq!(details.cover, Some(album.join("folder.JPG")));
    assert_eq!(
        details.tracks,
        vec![album.join("01 - Gpowered.mp3"), album.join("02 - Meltphace.MP3")]
    );
    assert!(details.cover.as_ref().unwrap().exists());
}

#[test]
fn album_details_takes_first_cover_in_name_order() {
    let dir = tempdir().unwrap();
    let album = album_dir(dir.path(), "Aphex", STUDIO, "Drukqs");
    touch(&album.join("cover.png"));
    touch(&album.join("back.jpeg"));
    touch(&album.join("front.jpg"));

    let details = catalog(&dir).album_details("Aphex", CollectionKind::Studio, "Drukqs");
    assert_eq!(details.cover, Some(album.join("back.jpeg")));
    assert!(details.tracks.is_empty());
}

#[test]
fn album_details_for_missing_album_is_empty() {
    let dir = tempdir().unwrap();
    album_dir(dir.path(), "Aphex", STUDIO, "Drukqs");

    let details = catalog(&dir).album_details("Aphex", CollectionKind::Live, "Drukqs");
    assert_eq!(details, AlbumDetails::default());
}

#[test]
fn configured_extensions_are_respected() {
    let dir = tempdir().unwrap();
    let album = album_dir(dir.path(), "Aphex", STUDIO, "Drukqs");
    touch(&album.join("a.flac"));
    touch(&album.join("b.mp3"));

    let settings = LibrarySettings {
        audio_extensions: vec![".FLAC".into()],
        ..LibrarySettings::default()
    };
    let details =
        Catalog::new(dir.path(), &settings).album_details("Aphex", CollectionKind::Studio, "Drukqs");
    assert_eq!(details.tracks, vec![album.join("a.flac")]);
}

#[test]
fn all_tracks_flattens_every_album_with_context() {
    let dir = tempdir().unwrap();
    let drukqs = album_dir(dir.path(), "Aphex", STUDIO, "Drukqs");
    let roxy = album_dir(dir.path(), "Zappa", LIVE, "Roxy");
    touch(&drukqs.join("01.mp3"));
    touch(&drukqs.join("02.mp3"));
    touch(&roxy.join("01.mp3"));

    let tracks = catalog(&dir).all_tracks();
    assert_eq!(tracks.len(), 3);
    assert_eq!(tracks[2].0, roxy.join("01.mp3"));
    assert_eq!(
        tracks[2].1,
        AlbumContext {
            artist: "Zappa".into(),
            kind: CollectionKind::Live,
            album: "Roxy".into(),
        }
    );
}

#[test]
fn context_lookup_maps_track_back_to_album() {
    let dir = tempdir().unwrap();
    let album = album_dir(dir.path(), "Aphex", LIVE, "Field Day");
    touch(&album.join("01 - Intro.mp3"));
    touch(&album.join("cover.png"));

    let catalog = catalog(&dir);
    assert_eq!(
        catalog.context_lookup(&album.join("01 - Intro.mp3")),
        Some(AlbumContext {
            artist: "Aphex".into(),
            kind: CollectionKind::Live,
            album: "Field Day".into(),
        })
    );
    assert_eq!(catalog.context_lookup(&album.join("cover.png")), None);
    assert_eq!(catalog.context_lookup(&album.join("missing.mp3")), None);
    assert_eq!(catalog.context_lookup(Path::new("/elsewhere/x.mp3")), None);

    let outside = dir.path().join("Aphex").join("Bootlegs").join("B").join("1.mp3");
    touch(&outside);
    assert_eq!(catalog.context_lookup(&outside), None);
}

#[cfg(unix)]
#[test]
fn context_lookup_agrees_with_catalog_walk_on_symlinks() {
    use std::os::unix::fs::symlink;

    let outside = tempdir().unwrap();
    let real_artist = outside.path().join("Aphex");
    touch(&real_artist.join(STUDIO).join("Drukqs").join("01 - Jynweythek.mp3"));
    let real_album = outside.path().join("Syro");
    touch(&real_album.join("01 - minipops.mp3"));

    let dir = tempdir().unwrap();
    symlink(&real_artist, dir.path().join("Aphex")).unwrap();
    let zappa = dir.path().join("Zappa").join(STUDIO);
    fs::create_dir_all(&zappa).unwrap();
    symlink(&real_album, zappa.join("Syro")).unwrap();

    let linked_track = dir
        .path()
        .join("Aphex")
        .join(STUDIO)
        .join("Drukqs")
        .join("01 - Jynweythek.mp3");
    let linked_album_track = zappa.join("Syro").join("01 - minipops.mp3");

    let no_links = LibrarySettings {
        follow_links: false,
        ..LibrarySettings::default()
    };
    let strict = Catalog::new(dir.path(), &no_links);
    assert!(strict.all_tracks().is_empty());
    assert_eq!(strict.context_lookup(&linked_track), None);
    assert_eq!(strict.context_lookup(&linked_album_track), None);

    let following = catalog(&dir);
    assert_eq!(following.all_tracks().len(), 2);
    assert_eq!(
        following.context_lookup(&linked_track),
        Some(AlbumContext {
            artist: "Aphex".into(),
            kind: CollectionKind::Studio,
            album: "Drukqs".into(),
        })
    );
    assert_eq!(
        following.context_lookup(&linked_album_track),
        Some(AlbumContext {
            artist: "Zappa".into(),
            kind: CollectionKind::Studio,
            album: "Syro".into(),
        })
    );
}

#[test]
fn context_lookup_skips_hidden_albums() {
    let dir = tempdir().unwrap();
    let hidden = album_dir(dir.path(), "Aphex", STUDIO, ".Unreleased");
    touch(&hidden.join("01 - Demo.mp3"));

    assert_eq!(catalog(&dir).context_lookup(&hidden.join("01 - Demo.mp3")), None);
}

#[test]
fn kind_for_label_only_knows_configured_folders() {
    let dir = tempdir().unwrap();
    let catalog = catalog(&dir);
    assert_eq!(catalog.kind_for_label(STUDIO), Some(CollectionKind::Studio));
    assert_eq!(catalog.kind_for_label(LIVE), Some(CollectionKind::Live));
    assert_eq!(catalog.kind_for_label("Compilations"), None);
}

#[test]
fn unreadable_media_has_zero_duration() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.mp3");
    touch(&path);

    assert!(LoftyDurations.duration(&path).is_err());
    assert_eq!(LoftyDurations.duration_or_zero(&path), std::time::Duration::ZERO);
    assert_eq!(
        LoftyDurations.duration_or_zero(&dir.path().join("absent.mp3")),
        std::time::Duration::ZERO
    );
}
