use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use tracing::debug;

use crate::error::MetadataError;

/// Source of track playtimes.
pub trait DurationLookup: Send + Sync {
    fn duration(&self, path: &Path) -> Result<Duration, MetadataError>;

    /// Playtime of `path`, or zero when it cannot be read.
    fn duration_or_zero(&self, path: &Path) -> Duration {
        match self.duration(path) {
            Ok(d) => d,
            Err(e) => {
                debug!(error = %e, "duration unknown, showing zero");
                Duration::ZERO
            }
        }
    }
}

/// Reads durations from the file's audio properties with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyDurations;

impl DurationLookup for LoftyDurations {
    fn duration(&self, path: &Path) -> Result<Duration, MetadataError> {
        let tagged = lofty::read_from_path(path).map_err(|e| MetadataError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(tagged.properties().duration())
    }
}
