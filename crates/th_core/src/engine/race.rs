//! Race: first player to reach the target score wins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::outcome::{ThrowEffect, ThrowEvent};
use super::{GameState, ModeState};
use crate::models::game_result::{GameStatus, Winner};
use crate::models::player::now_ms;
use crate::models::setup::RaceOptions;
use crate::models::zone::RingZone;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct RaceState {
    pub options: RaceOptions,
}

pub(super) fn register(gs: &mut GameState, zone: RingZone, points: u32) -> Option<ThrowEvent> {
    let GameState { players, rotation, round, status, winner, ended_at_ms, mode_state, .. } = gs;
    let ModeState::Race(ms) = mode_state else { return None };

    let current = rotation.current();
    let record = players[current].add_throw(zone, points, *round, 1);

    if players[current].score >= ms.options.target_score {
        // Reaching the target ends the game on the spot.
        *status = GameStatus::Finished;
        *winner = Some(Winner::Player(current));
        *ended_at_ms = Some(now_ms());
    } else if rotation.advance() {
        *round += 1;
    }

    Some(ThrowEvent { player_id: current, record, effect: ThrowEffect::Scored })
}
