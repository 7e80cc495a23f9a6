use std::io;
use std::sync::Arc;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::{Jukebox, RodioDevice};
use crate::library::{Catalog, LoftyDurations};
use crate::logging::init_logging;

mod cli;
mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse();
    let (mut settings, config_warning) = settings::load_settings(args.config.as_deref());
    if let Some(root) = args.root {
        settings.library.root = root;
    }

    let _log_guard = init_logging(&settings.logging)?;
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }
    info!(root = %settings.library.root.display(), "starting");

    let catalog = Catalog::new(settings.library.root.clone(), &settings.library);
    if args.list {
        startup::print_catalog(&catalog, &mut io::stdout().lock())?;
        return Ok(());
    }

    let device = Arc::new(RodioDevice::open()?);
    let jukebox = Jukebox::new(catalog.clone(), device, &settings.playback);
    let queued = startup::enqueue_requested(&jukebox, &settings.library.root, &args.play);
    if queued == 0 && settings.playback.autoplay_on_start {
        jukebox.random_pick();
    }
    let poller = jukebox.start_background_advance(settings.playback.poll_interval())?;

    let mut app = App::new(catalog, Arc::new(LoftyDurations), settings.ui.entry_digits);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &jukebox, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    poller.stop();
    if jukebox.is_playing() {
        info!(elapsed_ms = jukebox.elapsed().as_millis() as u64, "stopping playback");
    }
    jukebox.stop();
    info!("shutdown complete");

    run_result
}
