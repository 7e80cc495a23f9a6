use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::thread::JoinHandle;

use rodio::OutputStreamBuilder;
use rodio::mixer::Mixer;
use tracing::{debug, error};

use crate::error::DeviceError;

/// Open the default output stream on a dedicated thread.
///
/// The stream must stay on the thread that opened it, so the thread reports
/// the stream's mixer through `ready` and then parks on `shutdown` until the
/// owning device goes away.
pub(super) fn spawn_output_thread(
    ready: Sender<Result<Mixer, DeviceError>>,
    shutdown: Receiver<()>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "failed to open audio output");
                let _ = ready.send(Err(DeviceError::NoOutput(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        if ready.send(Ok(stream.mixer().clone())).is_err() {
            return;
        }

        // Either an explicit signal or the sender being dropped ends the stream.
        let _ = shutdown.recv();
        debug!("closing audio output stream");
    })
}
