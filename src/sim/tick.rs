//! Turn transitions
//!
//! Every change to a `GameState` goes through one of these functions. They
//! never touch the console or the disk; the session persists after each one.

use super::dice::Dice;
use super::state::{GameConfig, GameEvent, GameState, TurnPhase};
use crate::consts::BUST_FACE;
use crate::error::RuleError;

/// Player decision at the roll-or-hold prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Roll,
    Hold,
}

impl Command {
    /// Parse one input line; only the exact tokens `r` and `h` are accepted
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim_end_matches(['\r', '\n']) {
            "r" => Some(Command::Roll),
            "h" => Some(Command::Hold),
            _ => None,
        }
    }
}

/// Roll the die for the active player
pub fn roll(state: &mut GameState, dice: &mut impl Dice) -> Result<Vec<GameEvent>, RuleError> {
    let face = dice.roll();
    apply_roll(state, face)
}

/// Apply a rolled face to the active turn
///
/// Fails only if the accumulator would exceed `u32::MAX`; the state is left
/// untouched in that case.
pub fn apply_roll(state: &mut GameState, face: u8) -> Result<Vec<GameEvent>, RuleError> {
    if face == BUST_FACE {
        state.turn_accumulator = 0;
        state.current_roll = 0;
        state.turn_over = true;
        return Ok(vec![GameEvent::Rolled { face }, GameEvent::Busted]);
    }

    state.turn_accumulator = state
        .turn_accumulator
        .checked_add(u32::from(face))
        .ok_or(RuleError::ScoreOverflow)?;
    state.current_roll = face;
    state.turn_over = false;
    Ok(vec![
        GameEvent::Rolled { face },
        GameEvent::TurnScore {
            total: state.turn_accumulator,
        },
    ])
}

/// End the turn keeping the accumulated points for banking
pub fn hold(state: &mut GameState) -> Result<GameEvent, RuleError> {
    if state.phase() != TurnPhase::AwaitingDecision {
        return Err(RuleError::NothingToHold);
    }
    state.turn_over = true;
    Ok(GameEvent::Held {
        total: state.turn_accumulator,
    })
}

/// Bank the accumulator and pass the turn on
pub fn close_turn(config: &GameConfig, state: &mut GameState) -> Result<Vec<GameEvent>, RuleError> {
    if !state.turn_over {
        return Err(RuleError::TurnNotOver);
    }

    let player = state.current_player;
    state.scores[player] = state.scores[player]
        .checked_add(state.turn_accumulator)
        .ok_or(RuleError::ScoreOverflow)?;
    let banked = GameEvent::Banked {
        player,
        score: state.scores[player],
    };

    state.turn_accumulator = 0;
    state.current_roll = 0;
    state.turn_over = false;
    state.current_player = config.next_player(player);

    Ok(vec![
        banked,
        GameEvent::TurnStarted {
            player: state.current_player,
            score: state.current_score(),
        },
    ])
}
