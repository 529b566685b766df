use clap::Parser;
use taskmaster_core::{Config, Session, TaskStore};

mod console;
mod interactive;
mod logging;

use console::StdConsole;
use interactive::Interactive;

/// Interactive task and time tracker.
///
/// Keeps tasks in `task.json` and exports a duration report to `task.md`
/// in the working directory (configurable in `~/.config/taskmaster/config.toml`).
#[derive(Parser)]
#[command(name = "taskmaster", version, about)]
struct Cli {}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    logging::init(&config.logging.level);
    tracing::debug!(?config, "configuration loaded");

    let store = TaskStore::open(&config.storage.tasks_file)?;
    let mut app = Interactive::new(
        Session::new(store),
        StdConsole::stdio(),
        config.storage.report_file,
        config.display.time_format,
    );
    app.run()?;
    Ok(())
}

fn main() {
    let _cli = Cli::parse();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
