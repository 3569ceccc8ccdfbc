//! The flat text record
//!
//! One field per line in a fixed order:
//! player count, current player, each score, turn accumulator, current roll,
//! turn-over flag. No version tag or checksum; anything that does not parse
//! exactly is rejected.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::consts::{BUST_FACE, DIE_FACES};
use crate::error::RecordError;
use crate::sim::{GameConfig, GameState};

/// Everything needed to resume a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub config: GameConfig,
    pub state: GameState,
}

impl Snapshot {
    pub fn new(config: GameConfig, state: GameState) -> Self {
        Self { config, state }
    }

    /// Render the record text
    pub fn encode(&self) -> String {
        let state = &self.state;
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.config.player_count());
        let _ = writeln!(out, "{}", state.current_player);
        for score in &state.scores {
            let _ = writeln!(out, "{score}");
        }
        let _ = writeln!(out, "{}", state.turn_accumulator);
        let _ = writeln!(out, "{}", state.current_roll);
        let _ = writeln!(out, "{}", state.turn_over);
        out
    }

    /// Parse record text produced by `encode`
    pub fn decode(text: &str) -> Result<Self, RecordError> {
        let mut fields = Fields::new(text);

        let player_count: usize = fields.parse("player_count")?;
        let config = GameConfig::new(player_count).map_err(|_| RecordError::OutOfRange {
            field: "player_count",
            value: 0,
        })?;

        let current_player: usize = fields.parse("current_player")?;
        if current_player >= player_count {
            return Err(RecordError::OutOfRange {
                field: "current_player",
                value: current_player as u64,
            });
        }

        let scores = (0..player_count)
            .map(|_| fields.parse::<u32>("score"))
            .collect::<Result<Vec<_>, _>>()?;

        let turn_accumulator: u32 = fields.parse("turn_accumulator")?;
        if scores[current_player].checked_add(turn_accumulator).is_none() {
            return Err(RecordError::OutOfRange {
                field: "turn_accumulator",
                value: u64::from(turn_accumulator),
            });
        }

        let current_roll: u8 = fields.parse("current_roll")?;
        if current_roll == BUST_FACE || current_roll > DIE_FACES {
            return Err(RecordError::OutOfRange {
                field: "current_roll",
                value: u64::from(current_roll),
            });
        }

        let turn_over = fields.parse_bool("turn_over")?;
        fields.finish()?;

        Ok(Self {
            config,
            state: GameState {
                scores,
                current_player,
                current_roll,
                turn_accumulator,
                turn_over,
            },
        })
    }
}

/// Line cursor over the record text
struct Fields<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str) -> Self {
        Self { lines: text.lines() }
    }

    fn next(&mut self, field: &'static str) -> Result<&'a str, RecordError> {
        self.lines
            .next()
            .map(str::trim)
            .ok_or(RecordError::MissingField(field))
    }

    fn parse<T: FromStr>(&mut self, field: &'static str) -> Result<T, RecordError> {
        let raw = self.next(field)?;
        raw.parse().map_err(|_| RecordError::InvalidField {
            field,
            value: raw.to_string(),
        })
    }

    fn parse_bool(&mut self, field: &'static str) -> Result<bool, RecordError> {
        let raw = self.next(field)?;
        match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(RecordError::InvalidField {
                field,
                value: raw.to_string(),
            }),
        }
    }

    /// Only blank lines may follow the last field
    fn finish(mut self) -> Result<(), RecordError> {
        match self.lines.find(|line| !line.trim().is_empty()) {
            Some(extra) => Err(RecordError::TrailingData(extra.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot(scores: Vec<u32>, current_player: usize, acc: u32, roll: u8, over: bool) -> Snapshot {
        Snapshot::new(
            GameConfig::new(scores.len()).unwrap(),
            GameState {
                scores,
                current_player,
                current_roll: roll,
                turn_accumulator: acc,
                turn_over: over,
            },
        )
    }

    #[test]
    fn test_encode_field_order() {
        let snap = snapshot(vec![7, 3], 1, 9, 5, false);
        assert_eq!(snap.encode(), "2\n1\n7\n3\n9\n5\nfalse\n");
    }

    #[test]
    fn test_decode_known_record() {
        let snap = Snapshot::decode("3\n2\n4\n0\n11\n0\n0\ntrue\n").unwrap();
        assert_eq!(snap.config.player_count(), 3);
        assert_eq!(snap.state.scores, vec![4, 0, 11]);
        assert_eq!(snap.state.current_player, 2);
        assert_eq!(snap.state.turn_accumulator, 0);
        assert_eq!(snap.state.current_roll, 0);
        assert!(snap.state.turn_over);
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_case() {
        let snap = Snapshot::decode("1\r\n0\r\n 8 \r\n6\r\n6\r\nTRUE\r\n\n").unwrap();
        assert_eq!(snap.state.scores, vec![8]);
        assert!(snap.state.turn_over);
    }

    #[test]
    fn test_decode_missing_field() {
        assert_eq!(
            Snapshot::decode("2\n0\n5\n"),
            Err(RecordError::MissingField("score"))
        );
        assert_eq!(
            Snapshot::decode(""),
            Err(RecordError::MissingField("player_count"))
        );
    }

    #[test]
    fn test_decode_bad_values() {
        assert_eq!(
            Snapshot::decode("2\n0\n5\nx\n0\n0\nfalse\n"),
            Err(RecordError::InvalidField {
                field: "score",
                value: "x".to_string()
            })
        );
        assert!(matches!(
            Snapshot::decode("2\n0\n5\n1\n0\n0\nmaybe\n"),
            Err(RecordError::InvalidField { field: "turn_over", .. })
        ));
        assert!(matches!(
            Snapshot::decode("2\n0\n-5\n1\n0\n0\nfalse\n"),
            Err(RecordError::InvalidField { field: "score", .. })
        ));
    }

    #[test]
    fn test_decode_out_of_range() {
        assert!(matches!(
            Snapshot::decode("0\n0\n0\n0\nfalse\n"),
            Err(RecordError::OutOfRange { field: "player_count", .. })
        ));
        assert!(matches!(
            Snapshot::decode("2\n2\n0\n0\n0\n0\nfalse\n"),
            Err(RecordError::OutOfRange { field: "current_player", .. })
        ));
        assert!(matches!(
            Snapshot::decode("2\n0\n0\n0\n0\n1\nfalse\n"),
            Err(RecordError::OutOfRange { field: "current_roll", .. })
        ));
        assert!(matches!(
            Snapshot::decode("2\n0\n0\n0\n0\n7\nfalse\n"),
            Err(RecordError::OutOfRange { field: "current_roll", .. })
        ));
    }

    #[test]
    fn test_decode_rejects_unbankable_accumulator() {
        assert_eq!(
            Snapshot::decode("2\n0\n9\n0\n4294967295\n0\ntrue\n"),
            Err(RecordError::OutOfRange {
                field: "turn_accumulator",
                value: u64::from(u32::MAX),
            })
        );
        // the other player's score does not matter
        assert!(Snapshot::decode("2\n0\n0\n9\n4294967295\n0\ntrue\n").is_ok());
    }

    #[test]
    fn test_decode_trailing_data() {
        assert_eq!(
            Snapshot::decode("1\n0\n0\n0\n0\nfalse\n42\n"),
            Err(RecordError::TrailingData("42".to_string()))
        );
    }

    fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
        (1usize..6).prop_flat_map(|players| {
            (
                prop::collection::vec(0u32..1000, players),
                0..players,
                0u32..200,
                prop_oneof![Just(0u8), 2u8..=6],
                any::<bool>(),
            )
                .prop_map(|(scores, player, acc, roll, over)| {
                    snapshot(scores, player, acc, roll, over)
                })
        })
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(snap in snapshot_strategy()) {
            prop_assert_eq!(Snapshot::decode(&snap.encode()), Ok(snap));
        }
    }
}
