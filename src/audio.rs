//! Playback engine.
//!
//! `Transport` tracks the current session, `Jukebox` owns the request queue
//! and autoplay, and `Poller` advances finished tracks in the background.
//! Sound itself comes from an [`AudioDevice`]; `RodioDevice` is the real one.

mod device;
mod jukebox;
mod poller;
mod queue;
mod sink;
mod thread;
mod transport;
mod types;

pub use device::{AudioDevice, RodioDevice};
pub use jukebox::Jukebox;
pub use poller::Poller;
pub use types::*;
