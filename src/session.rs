//! Startup and the game loop
//!
//! Each loop iteration: check for a winner, ask for a decision if one is
//! pending, apply one transition, save. The record is deleted on a win.

use crate::error::PigError;
use crate::persistence::{PersistenceStore, Snapshot};
use crate::platform::{Console, SaveHook};
use crate::sim::{Command, Dice, GameConfig, GameEvent, GameState, TurnPhase, tick};

const PLAYER_COUNT_PROMPT: &str = "Enter the number of players";
const DECISION_PROMPT: &str = "Enter 'r' to roll or 'h' to hold";
const INVALID_INPUT: &str = "Invalid input";

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Someone reached the winning score; the record is gone
    Won { player: usize, score: u32 },
    /// Input closed mid-game; the record holds the state for next time
    Suspended,
}

/// Resume the recorded game, or ask for a player count and start fresh
///
/// Returns `None` if input closes before a player count is given.
pub fn resume_or_start(
    store: &PersistenceStore,
    console: &mut impl Console,
) -> Result<Option<Snapshot>, PigError> {
    if let Some(snapshot) = store.load()? {
        log::info!(
            "Resuming game at player {}",
            snapshot.state.current_player + 1
        );
        return Ok(Some(snapshot));
    }

    console.say(PLAYER_COUNT_PROMPT)?;
    loop {
        let Some(line) = console.read_line()? else {
            return Ok(None);
        };
        let config = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|count| GameConfig::new(count).ok());
        match config {
            Some(config) => {
                log::info!("Starting fresh game for {} players", config.player_count());
                let state = GameState::new(&config);
                return Ok(Some(Snapshot::new(config, state)));
            }
            None => console.say(INVALID_INPUT)?,
        }
    }
}

/// One running game
pub struct Session<C: Console, D: Dice> {
    config: GameConfig,
    state: GameState,
    hook: SaveHook,
    console: C,
    dice: D,
}

impl<C: Console, D: Dice> Session<C, D> {
    pub fn new(snapshot: Snapshot, hook: SaveHook, console: C, dice: D) -> Self {
        Self {
            config: snapshot.config,
            state: snapshot.state,
            hook,
            console,
            dice,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Play until someone wins or input closes
    pub fn run(&mut self) -> Result<Outcome, PigError> {
        self.save()?;
        self.announce_turn()?;

        while !self.check_win()? {
            if self.state.phase() == TurnPhase::AwaitingDecision {
                match self.read_command()? {
                    Some(Command::Roll) => {}
                    Some(Command::Hold) => {
                        let event = tick::hold(&mut self.state)?;
                        self.show(&[event])?;
                    }
                    None => return self.suspend(),
                }
            }

            let events = if self.state.turn_over {
                tick::close_turn(&self.config, &mut self.state)?
            } else {
                tick::roll(&mut self.state, &mut self.dice)?
            };
            self.show(&events)?;
            self.save()?;
        }

        let player = self.state.current_player;
        let score = self.state.current_score();
        log::info!("Player {} won with {score}", player + 1);
        self.show(&[GameEvent::Won { player, score }])?;
        Ok(Outcome::Won { player, score })
    }

    /// Whether the player about to act has won; deletes the record if so
    pub fn check_win(&mut self) -> Result<bool, PigError> {
        if !self.state.check_win() {
            return Ok(false);
        }
        self.hook.finish()?;
        Ok(true)
    }

    /// Ask until a valid command arrives, `None` if input closes
    fn read_command(&mut self) -> Result<Option<Command>, PigError> {
        self.console.say(DECISION_PROMPT)?;
        loop {
            let Some(line) = self.console.read_line()? else {
                return Ok(None);
            };
            match Command::parse(&line) {
                Some(command) => return Ok(Some(command)),
                None => self.console.say(INVALID_INPUT)?,
            }
        }
    }

    fn suspend(&mut self) -> Result<Outcome, PigError> {
        log::info!("Input closed, leaving game saved");
        self.save()?;
        Ok(Outcome::Suspended)
    }

    fn save(&self) -> Result<(), PigError> {
        self.hook
            .publish(Snapshot::new(self.config, self.state.clone()))
    }

    fn announce_turn(&mut self) -> Result<(), PigError> {
        self.console.say("")?;
        self.console.say(&format!(
            "It is now player {}'s turn",
            self.state.current_player + 1
        ))?;
        Ok(())
    }

    fn show(&mut self, events: &[GameEvent]) -> Result<(), PigError> {
        for event in events {
            log::debug!("{event:?}");
            match *event {
                GameEvent::Rolled { face } => {
                    self.console.say(&format!("You rolled a {face}"))?;
                }
                GameEvent::Busted => {
                    self.console.say("You rolled a 1. Your turn is over")?;
                }
                GameEvent::TurnScore { total } => {
                    self.console.say(&format!("Your turn score is {total}"))?;
                }
                GameEvent::Held { total } => {
                    log::info!(
                        "Player {} holds with {total} unbanked",
                        self.state.current_player + 1
                    );
                }
                GameEvent::Banked { player, score } => {
                    self.console.say(&format!(
                        "Player {}'s current score is {score}",
                        player + 1
                    ))?;
                }
                GameEvent::TurnStarted { player, score } => {
                    self.announce_turn()?;
                    self.console
                        .say(&format!("Player {}'s score is {score}", player + 1))?;
                }
                GameEvent::Won { player, score } => {
                    self.console
                        .say(&format!("Player {} wins with {score} points!", player + 1))?;
                }
            }
        }
        Ok(())
    }
}
