//! Small value types shared by the playback engine and its callers.

use std::path::PathBuf;
use std::time::Duration;

use crate::library::AlbumContext;

/// A pending playback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub track: PathBuf,
    pub context: AlbumContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Consistent snapshot of the transport for display.
pub struct NowPlaying {
    pub track: PathBuf,
    /// Catalog location, when it is known.
    pub context: Option<AlbumContext>,
    pub elapsed: Duration,
}
