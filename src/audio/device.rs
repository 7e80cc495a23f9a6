use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use rodio::Sink;
use rodio::mixer::Mixer;
use tracing::debug;

use crate::error::DeviceError;

use super::sink::create_sink;
use super::thread::spawn_output_thread;

/// The sound-producing side of playback.
///
/// There is no end-of-track event: callers poll [`AudioDevice::is_audible`].
pub trait AudioDevice: Send + Sync {
    /// Replace whatever is playing with `path`, from the start.
    fn load_and_play(&self, path: &Path) -> Result<(), DeviceError>;
    /// Silence output. Harmless when nothing is playing.
    fn stop(&self);
    /// Whether a loaded track still has audio left to play.
    fn is_audible(&self) -> bool;
}

/// `AudioDevice` backed by the default system output through `rodio`.
pub struct RodioDevice {
    mixer: Mixer,
    sink: Mutex<Option<Sink>>,
    shutdown: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl RodioDevice {
    pub fn open() -> Result<Self, DeviceError> {
        let (ready_tx, ready_rx) = mpsc::channel::<Result<Mixer, DeviceError>>();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let join = spawn_output_thread(ready_tx, shutdown_rx);
        let mixer = ready_rx
            .recv()
            .map_err(|_| DeviceError::NoOutput("audio output thread exited".to_string()))??;

        Ok(Self {
            mixer,
            sink: Mutex::new(None),
            shutdown: Some(shutdown_tx),
            join: Some(join),
        })
    }

    fn sink(&self) -> MutexGuard<'_, Option<Sink>> {
        self.sink.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioDevice for RodioDevice {
    fn load_and_play(&self, path: &Path) -> Result<(), DeviceError> {
        let new_sink = create_sink(&self.mixer, path)?;

        let mut sink = self.sink();
        if let Some(old) = sink.take() {
            old.stop();
        }
        new_sink.play();
        *sink = Some(new_sink);
        debug!(path = %path.display(), "sink started");
        Ok(())
    }

    fn stop(&self) {
        if let Some(s) = self.sink().take() {
            s.stop();
        }
    }

    fn is_audible(&self) -> bool {
        self.sink()
            .as_ref()
            .map(|s| !s.empty() && !s.is_paused())
            .unwrap_or(false)
    }
}

impl Drop for RodioDevice {
    fn drop(&mut self) {
        self.stop();
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}
