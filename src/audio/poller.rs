use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use super::jukebox::Jukebox;

/// Background end-of-track detector.
///
/// Every `interval` it asks the jukebox whether the current track has run
/// out. Auto-advance therefore lags the real end of a track by up to one
/// interval. Dropping the handle cancels the loop and joins the thread.
pub struct Poller {
    stop_tx: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn spawn(jukebox: Jukebox, interval: Duration) -> io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let join = thread::Builder::new()
            .name("playback-poller".into())
            .spawn(move || {
                debug!(interval_ms = interval.as_millis() as u64, "playback poller started");
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            jukebox.poll_finished();
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("playback poller stopped");
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            join: Some(join),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.shutdown();
    }
}
