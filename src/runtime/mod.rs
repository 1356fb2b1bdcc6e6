//! Terminal lifecycle and the main event loop.

use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::library::{Catalog, MetadataResolver, collect_uploads};
use crate::player::{PlayerController, RodioDevice};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let catalog = Catalog::seeded();
    let device = RodioDevice::new();
    let mut controller = PlayerController::new(catalog, device);
    let resolver = MetadataResolver::new();

    startup::apply_playback_defaults(&mut controller, &settings);

    // Optional directory import from argv, through the same pipeline a
    // file picker would feed.
    let import_dir = env::args().nth(1).map(PathBuf::from);
    let initial_notice = import_dir.as_deref().map(|dir| {
        let uploads = collect_uploads(dir, &settings.library);
        controller.import(&uploads, &resolver).notice()
    });

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut controller,
        &resolver,
        import_dir.as_deref(),
        initial_notice,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
