use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::PlaybackSettings;
use crate::library::{AlbumContext, Catalog};

use super::device::AudioDevice;
use super::poller::Poller;
use super::queue::RequestQueue;
use super::transport::Transport;
use super::types::{NowPlaying, QueueEntry};

/// Everything guarded by the jukebox lock.
struct PlaybackState {
    queue: RequestQueue,
    transport: Transport,
    /// Bumped on every transport start/stop attempt.
    epoch: u64,
}

impl PlaybackState {
    fn start(&mut self, track: PathBuf, context: Option<AlbumContext>) -> bool {
        self.epoch += 1;
        let shown = track.display().to_string();
        match self.transport.start(track, context) {
            Ok(()) => true,
            Err(e) => {
                warn!(track = %shown, error = %e, "skipping unplayable track");
                false
            }
        }
    }

    fn stop(&mut self) {
        self.epoch += 1;
        self.transport.stop();
    }

    /// Pop entries until one starts. Entries the device rejects are dropped.
    fn play_next_queued(&mut self) -> bool {
        while let Some(entry) = self.queue.pop() {
            if self.start(entry.track, Some(entry.context)) {
                return true;
            }
        }
        false
    }
}

struct Shared {
    catalog: Catalog,
    state: Mutex<PlaybackState>,
    max_skip_attempts: usize,
}

/// Request queue plus transport, with random autoplay once the queue runs dry.
///
/// Cheap to clone; clones share the same state. A single mutex covers both
/// the queue and the transport, so a pop-and-play never interleaves with
/// another start or enqueue.
#[derive(Clone)]
pub struct Jukebox {
    shared: Arc<Shared>,
}

impl Jukebox {
    pub fn new(
        catalog: Catalog,
        device: Arc<dyn AudioDevice>,
        settings: &PlaybackSettings,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                catalog,
                state: Mutex::new(PlaybackState {
                    queue: RequestQueue::default(),
                    transport: Transport::new(device),
                    epoch: 0,
                }),
                max_skip_attempts: settings.max_skip_attempts.max(1),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PlaybackState> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `track`. When nothing is playing, playback starts before this returns.
    pub fn enqueue(&self, track: PathBuf, context: AlbumContext) {
        let mut state = self.lock();
        debug!(track = %track.display(), queued = state.queue.len() + 1, "enqueued");
        state.queue.push(QueueEntry { track, context });
        if state.transport.is_playing() {
            return;
        }
        self.advance_locked(state);
    }

    /// Play the next queued request, or a random catalog track when none is queued.
    pub fn advance(&self) {
        let state = self.lock();
        self.advance_locked(state);
    }

    fn advance_locked(&self, mut state: MutexGuard<'_, PlaybackState>) {
        if state.play_next_queued() {
            return;
        }
        let epoch = state.epoch;
        drop(state);
        self.pick_random_since(epoch);
    }

    /// Start a track drawn uniformly from the whole catalog.
    pub fn random_pick(&self) {
        let epoch = self.lock().epoch;
        self.pick_random_since(epoch);
    }

    /// The catalog walk runs without the lock held. If the transport changed
    /// hands meanwhile the pick is abandoned, and a request queued meanwhile
    /// is played instead.
    pub(super) fn pick_random_since(&self, epoch: u64) {
        let mut candidates = self.shared.catalog.all_tracks();

        let mut state = self.lock();
        if state.epoch != epoch {
            debug!("transport changed during catalog scan, dropping random pick");
            return;
        }
        if state.play_next_queued() {
            return;
        }
        if candidates.is_empty() {
            debug!("catalog is empty, nothing to autoplay");
            if state.transport.is_playing() {
                state.stop();
            }
            return;
        }

        let mut rng = rand::rng();
        for _ in 0..self.shared.max_skip_attempts {
            if candidates.is_empty() {
                break;
            }
            let (track, context) = candidates.swap_remove(rng.random_range(0..candidates.len()));
            info!(track = %track.display(), "autoplay");
            if state.start(track, Some(context)) {
                return;
            }
        }
        warn!("no playable track found for autoplay");
    }

    /// One poller tick: advance when the current track has run out.
    ///
    /// Returns whether an advance was triggered.
    pub fn poll_finished(&self) -> bool {
        let state = self.lock();
        if !state.transport.is_finished() {
            return false;
        }
        debug!("track finished");
        self.advance_locked(state);
        true
    }

    /// Stop playback. Queued requests stay queued.
    pub fn stop(&self) {
        self.lock().stop();
    }

    /// Abandon the current track and move on to the next one.
    pub fn skip(&self) {
        let mut state = self.lock();
        if let Some(track) = state.transport.current_track() {
            info!(track = %track.display(), "skipped");
        }
        state.stop();
        self.advance_locked(state);
    }

    /// Launch the background poller that auto-advances finished tracks.
    pub fn start_background_advance(&self, interval: Duration) -> io::Result<Poller> {
        Poller::spawn(self.clone(), interval)
    }

    pub fn context_lookup(&self, track: &Path) -> Option<AlbumContext> {
        self.shared.catalog.context_lookup(track)
    }

    pub fn current_track(&self) -> Option<PathBuf> {
        self.lock().transport.current_track().map(Path::to_path_buf)
    }

    pub fn current_context(&self) -> Option<AlbumContext> {
        self.lock().transport.current_context().cloned()
    }

    pub fn elapsed(&self) -> Duration {
        self.lock().transport.elapsed()
    }

    pub fn is_playing(&self) -> bool {
        self.lock().transport.is_playing()
    }

    /// Track, context and elapsed time read under one lock acquisition.
    pub fn snapshot(&self) -> Option<NowPlaying> {
        let state = self.lock();
        let transport = &state.transport;
        transport.current_track().map(|track| NowPlaying {
            track: track.to_path_buf(),
            context: transport.current_context().cloned(),
            elapsed: transport.elapsed(),
        })
    }

    pub fn queue_len(&self) -> usize {
        self.lock().queue.len()
    }

    /// Queued requests, head first.
    pub fn pending(&self) -> Vec<QueueEntry> {
        self.lock().queue.snapshot()
    }

    /// The request that will play next, if any.
    pub fn next_pending(&self) -> Option<QueueEntry> {
        self.lock().queue.front().cloned()
    }

    #[cfg(test)]
    pub(super) fn epoch(&self) -> u64 {
        self.lock().epoch
    }
}
