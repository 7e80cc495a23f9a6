use std::path::PathBuf;

use clap::Parser;

/// Terminal jukebox for an artist/collection/album music library.
#[derive(Parser, Debug)]
#[command(name = "rockola", version, about)]
pub struct Args {
    /// Library root, overriding `library.root` from the config.
    #[arg(value_name = "LIBRARY_ROOT")]
    pub root: Option<PathBuf>,

    /// Config file to read instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Track to queue at startup. May be given more than once.
    #[arg(long = "play", value_name = "TRACK")]
    pub play: Vec<PathBuf>,

    /// Print the catalog and exit without opening the audio device.
    #[arg(long)]
    pub list: bool,
}
