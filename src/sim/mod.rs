//! Game rules
//!
//! All gameplay logic lives here. This module must stay pure:
//! - No console or file access
//! - Randomness only through `Dice`
//! - State changes only through the transitions in `tick`

pub mod dice;
pub mod state;
pub mod tick;

pub use dice::{Dice, Die};
pub use state::{GameConfig, GameEvent, GameState, TurnPhase};
pub use tick::{Command, apply_roll, close_turn, hold, roll};
