//! Utilities for creating `rodio` sinks from track paths.
//!
//! The helper here encapsulates opening/decoding a file and connecting a
//! playing `Sink` to the output mixer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::mixer::Mixer;
use rodio::{Decoder, Sink};

use crate::error::DeviceError;

/// Create a `Sink` on `mixer` that plays `path` from the start.
pub(super) fn create_sink(mixer: &Mixer, path: &Path) -> Result<Sink, DeviceError> {
    let file = File::open(path).map_err(|source| DeviceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| DeviceError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let sink = Sink::connect_new(mixer);
    sink.append(source);
    Ok(sink)
}
