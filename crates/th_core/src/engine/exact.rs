//! Exact Score ("Killer"): land exactly on the target, overshooting resets
//! you, tying someone resets them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::outcome::{ThrowEffect, ThrowEvent};
use super::{GameState, ModeState};
use crate::models::game_result::{GameStatus, Winner};
use crate::models::player::now_ms;
use crate::models::setup::ExactScoreOptions;
use crate::models::zone::RingZone;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ExactScoreState {
    pub options: ExactScoreOptions,
    /// Effective score per player, the one resets apply to. The ledger
    /// keeps the raw cumulative points untouched.
    pub totals: Vec<u32>,
}

impl ExactScoreState {
    pub(super) fn new(options: ExactScoreOptions, player_count: usize) -> Self {
        ExactScoreState { options, totals: vec![0; player_count] }
    }
}

pub(super) fn register(gs: &mut GameState, zone: RingZone, points: u32) -> Option<ThrowEvent> {
    let GameState { players, rotation, round, status, winner, ended_at_ms, mode_state, .. } = gs;
    let ModeState::ExactScore(ms) = mode_state else { return None };

    let current = rotation.current();
    let record = players[current].add_throw(zone, points, *round, 1);
    ms.totals[current] += points;
    let total = ms.totals[current];
    let target = ms.options.target_score;

    let effect = if total == target {
        *status = GameStatus::Finished;
        *winner = Some(Winner::Player(current));
        *ended_at_ms = Some(now_ms());
        ThrowEffect::Scored
    } else if total > target {
        ms.totals[current] = 0;
        ThrowEffect::ScoreReset { victims: vec![current] }
    } else {
        // Landing on another player's positive total knocks them back to 0.
        let victims: Vec<usize> = (0..ms.totals.len())
            .filter(|&id| id != current && total > 0 && ms.totals[id] == total)
            .collect();
        for &id in &victims {
            ms.totals[id] = 0;
        }
        if victims.is_empty() {
            ThrowEffect::Scored
        } else {
            ThrowEffect::ScoreReset { victims }
        }
    };

    // The rotation moves on even on the winning throw.
    if rotation.advance() {
        *round += 1;
    }

    Some(ThrowEvent { player_id: current, record, effect })
}
