use std::fmt;
use std::path::PathBuf;

/// Which collection folder of an artist an album lives in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Studio,
    Live,
}

impl CollectionKind {
    /// Every kind, in the order their albums are gathered.
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Studio, CollectionKind::Live];
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Studio => f.write_str("studio"),
            CollectionKind::Live => f.write_str("live"),
        }
    }
}

/// An album as listed for an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRef {
    pub album: String,
    pub kind: CollectionKind,
    pub artist: String,
}

/// Where a track sits in the catalog; carried alongside queued and playing tracks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlbumContext {
    pub artist: String,
    pub kind: CollectionKind,
    pub album: String,
}

impl From<&AlbumRef> for AlbumContext {
    fn from(album: &AlbumRef) -> Self {
        Self {
            artist: album.artist.clone(),
            kind: album.kind,
            album: album.album.clone(),
        }
    }
}

/// Contents of one album directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumDetails {
    pub cover: Option<PathBuf>,
    /// Track files, in file-name order.
    pub tracks: Vec<PathBuf>,
}
