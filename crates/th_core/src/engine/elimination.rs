//! Elimination: beating the most recent throw knocks its thrower out, last
//! player standing wins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::outcome::{ThrowEffect, ThrowEvent};
use super::{GameState, ModeState};
use crate::models::game_result::{GameStatus, Winner};
use crate::models::player::now_ms;
use crate::models::zone::RingZone;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct EliminationState {
    pub eliminated: Vec<bool>,
    /// Player ids in knock-out order, earliest first.
    pub elimination_order: Vec<usize>,
    /// Most recent throw of the game. Deliberately not cleared when its
    /// thrower is eliminated: the comparison always targets the last throw
    /// made, whoever made it.
    pub(super) previous: Option<PreviousThrow>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub(super) struct PreviousThrow {
    pub(super) player_id: usize,
    pub(super) points: u32,
}

impl EliminationState {
    pub(super) fn new(player_count: usize) -> Self {
        EliminationState {
            eliminated: vec![false; player_count],
            elimination_order: Vec::new(),
            previous: None,
        }
    }

    pub fn active_players(&self) -> usize {
        self.eliminated.iter().filter(|out| !**out).count()
    }
}

pub(super) fn register(gs: &mut GameState, zone: RingZone, points: u32) -> Option<ThrowEvent> {
    let GameState {
        players, rotation, round, status, winner, ended_at_ms, mode_state, ..
    } = gs;
    let ModeState::Elimination(ms) = mode_state else { return None };

    let current = rotation.current();
    let record = players[current].add_throw(zone, points, *round, 1);

    let mut effect = ThrowEffect::Scored;
    if let Some(previous) = ms.previous {
        if points > previous.points
            && previous.player_id != current
            && !ms.eliminated[previous.player_id]
        {
            ms.eliminated[previous.player_id] = true;
            ms.elimination_order.push(previous.player_id);
            effect = ThrowEffect::Eliminated { victim: previous.player_id };
        }
    }
    ms.previous = Some(PreviousThrow { player_id: current, points });

    if ms.active_players() <= 1 {
        let survivor = ms.eliminated.iter().position(|out| !out).unwrap_or(current);
        *status = GameStatus::Finished;
        *winner = Some(Winner::Player(survivor));
        *ended_at_ms = Some(now_ms());
    } else if rotation.advance_skipping(|id| ms.eliminated[id]) {
        *round += 1;
    }

    Some(ThrowEvent { player_id: current, record, effect })
}
