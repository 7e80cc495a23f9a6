use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::DeviceError;
use crate::library::AlbumContext;

use super::device::AudioDevice;

struct Session {
    track: PathBuf,
    started_at: Instant,
    context: Option<AlbumContext>,
}

/// What is playing and since when.
///
/// Idle when `session` is `None`. At most one session exists at a time:
/// starting a track always tears the previous one down first.
pub struct Transport {
    device: Arc<dyn AudioDevice>,
    session: Option<Session>,
}

impl Transport {
    pub fn new(device: Arc<dyn AudioDevice>) -> Self {
        Self {
            device,
            session: None,
        }
    }

    /// Begin a new session for `track`.
    ///
    /// On a device failure the transport is left idle.
    pub fn start(
        &mut self,
        track: PathBuf,
        context: Option<AlbumContext>,
    ) -> Result<(), DeviceError> {
        if self.session.is_some() {
            self.stop();
        }

        self.device.load_and_play(&track)?;
        info!(track = %track.display(), "now playing");
        self.session = Some(Session {
            track,
            started_at: Instant::now(),
            context,
        });
        Ok(())
    }

    /// Halt output and return to idle. Idempotent.
    pub fn stop(&mut self) {
        self.device.stop();
        if let Some(session) = self.session.take() {
            debug!(track = %session.track.display(), "stopped");
        }
    }

    /// Time since the current session started; zero when idle.
    pub fn elapsed(&self) -> Duration {
        self.session
            .as_ref()
            .map_or(Duration::ZERO, |s| s.started_at.elapsed())
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// A session is open but the device has gone quiet.
    pub fn is_finished(&self) -> bool {
        self.is_playing() && !self.device.is_audible()
    }

    pub fn current_track(&self) -> Option<&Path> {
        self.session.as_ref().map(|s| s.track.as_path())
    }

    pub fn current_context(&self) -> Option<&AlbumContext> {
        self.session.as_ref().and_then(|s| s.context.as_ref())
    }
}
