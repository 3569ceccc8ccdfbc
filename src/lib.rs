//! Pig - a turn-based dice game for the console
//!
//! Core modules:
//! - `sim`: Game rules (turn state, rolls, holds, win detection)
//! - `persistence`: The on-disk record that lets an interrupted game resume
//! - `platform`: Console I/O and the interrupt save hook
//! - `session`: Startup and the game loop
//! - `settings`: Optional local configuration

pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{PigError, RecordError, RuleError};
pub use persistence::{PersistenceStore, Snapshot};
pub use session::{Outcome, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Banked score that wins the game
    pub const WIN_SCORE: u32 = 10;
    /// Faces on the die
    pub const DIE_FACES: u8 = 6;
    /// Rolling this face forfeits the turn
    pub const BUST_FACE: u8 = 1;

    /// Record file, relative to the working directory
    pub const DEFAULT_RECORD_PATH: &str = "game_data.txt";
    /// Optional settings file, relative to the working directory
    pub const SETTINGS_PATH: &str = "pig_settings.json";
}
