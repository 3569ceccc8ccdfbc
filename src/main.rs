//! Pig entry point
//!
//! Loads settings, arms the interrupt save, and runs one game on the terminal.

use std::path::Path;
use std::process::ExitCode;

use pig_game::consts::SETTINGS_PATH;
use pig_game::platform::{SaveHook, Terminal};
use pig_game::session::resume_or_start;
use pig_game::{Outcome, PersistenceStore, PigError, Session, Settings};

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pig starting...");

    match run() {
        Ok(Outcome::Won { player, score }) => {
            log::info!("Game over, player {} won with {score}", player + 1);
            ExitCode::SUCCESS
        }
        Ok(Outcome::Suspended) => {
            log::info!("Game suspended");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<Outcome, PigError> {
    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let store = PersistenceStore::new(&settings.record_path);
    if store.exists() {
        log::info!("Found game in progress at {}", store.path().display());
    }

    let hook = SaveHook::new(store.clone());
    hook.install()?;

    let mut console = Terminal::new();
    let Some(snapshot) = resume_or_start(&store, &mut console)? else {
        return Ok(Outcome::Suspended);
    };

    let mut session = Session::new(snapshot, hook, console, settings.die());
    session.run()
}
