//! Sequence: throw the golden sequence 1-2-3-4-6-4-3-2-1, keeping the turn
//! while matching.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::outcome::{ThrowEffect, ThrowEvent};
use super::{GameState, ModeState};
use crate::models::game_result::{GameStatus, Winner};
use crate::models::player::now_ms;
use crate::models::zone::RingZone;

/// The required zone values, in order. The bullseye is the 6.
pub const GOLDEN_SEQUENCE: [u32; 9] = [1, 2, 3, 4, 6, 4, 3, 2, 1];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct SequenceState {
    /// Steps completed per player. Survives the player's turns ending.
    pub position: Vec<usize>,
}

impl SequenceState {
    pub(super) fn new(player_count: usize) -> Self {
        SequenceState { position: vec![0; player_count] }
    }
}

/// Next value the given player must throw, if the sequence is unfinished.
pub(super) fn expected_value(ms: &SequenceState, player_id: usize) -> Option<u32> {
    GOLDEN_SEQUENCE.get(ms.position[player_id]).copied()
}

pub(super) fn register(gs: &mut GameState, zone: RingZone, points: u32) -> Option<ThrowEvent> {
    let GameState { players, rotation, round, status, winner, ended_at_ms, mode_state, .. } = gs;
    let ModeState::Sequence(ms) = mode_state else { return None };

    let current = rotation.current();
    let expected = expected_value(ms, current)?;
    let record = players[current].add_throw(zone, points, *round, 1);

    let effect = if points == expected {
        // A match keeps the turn.
        ms.position[current] += 1;
        if ms.position[current] == GOLDEN_SEQUENCE.len() {
            *status = GameStatus::Finished;
            *winner = Some(Winner::Player(current));
            *ended_at_ms = Some(now_ms());
        }
        ThrowEffect::SequenceMatched { position: ms.position[current] }
    } else {
        if rotation.advance() {
            *round += 1;
        }
        ThrowEffect::SequenceMissed { expected }
    };

    Some(ThrowEvent { player_id: current, record, effect })
}
