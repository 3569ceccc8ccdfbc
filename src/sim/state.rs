//! Game state and core rule types
//!
//! All state that must be persisted for Continue lives here.

use crate::consts::WIN_SCORE;
use crate::error::PigError;

/// Fixed parameters of a game, decided once at start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    player_count: usize,
}

impl GameConfig {
    pub fn new(player_count: usize) -> Result<Self, PigError> {
        if player_count == 0 {
            return Err(PigError::NoPlayers);
        }
        Ok(Self { player_count })
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Player whose turn follows `player`
    pub fn next_player(&self, player: usize) -> usize {
        (player + 1) % self.player_count
    }
}

/// Where the active player is within their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Turn just started, the next action is an automatic roll
    AwaitingFirstRoll,
    /// At least one roll this turn, player chooses roll or hold
    AwaitingDecision,
    /// Player held or busted, waiting to bank and rotate
    TurnClosed,
}

/// Something a transition did, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Rolled { face: u8 },
    /// The roll was a 1 and the turn's points are gone
    Busted,
    TurnScore { total: u32 },
    Held { total: u32 },
    Banked { player: usize, score: u32 },
    TurnStarted { player: usize, score: u32 },
    Won { player: usize, score: u32 },
}

/// Complete mutable game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Banked score per player (index = player)
    pub scores: Vec<u32>,
    /// Player whose turn is active
    pub current_player: usize,
    /// Last roll this turn, 0 before the first roll
    pub current_roll: u8,
    /// Unbanked points of the active turn
    pub turn_accumulator: u32,
    /// Set by hold or bust
    pub turn_over: bool,
}

impl GameState {
    /// Fresh game, every score zero and player 0 to act
    pub fn new(config: &GameConfig) -> Self {
        Self {
            scores: vec![0; config.player_count()],
            current_player: 0,
            current_roll: 0,
            turn_accumulator: 0,
            turn_over: false,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        if self.turn_over {
            TurnPhase::TurnClosed
        } else if self.current_roll == 0 {
            TurnPhase::AwaitingFirstRoll
        } else {
            TurnPhase::AwaitingDecision
        }
    }

    /// Banked score of the active player
    pub fn current_score(&self) -> u32 {
        self.scores[self.current_player]
    }

    /// Whether the player about to act has reached the winning score
    pub fn check_win(&self) -> bool {
        self.current_score() >= WIN_SCORE
    }
}
