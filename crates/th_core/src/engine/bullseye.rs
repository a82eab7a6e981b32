//! Bullseye Hunt: first to a fixed number of bullseyes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::outcome::{ThrowEffect, ThrowEvent};
use super::{GameState, ModeState};
use crate::models::game_result::{GameStatus, Winner};
use crate::models::player::now_ms;
use crate::models::setup::BullseyeOptions;
use crate::models::zone::RingZone;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct BullseyeState {
    pub options: BullseyeOptions,
    /// Bullseye count per player; only these count toward the win.
    pub hits: Vec<u32>,
}

impl BullseyeState {
    pub(super) fn new(options: BullseyeOptions, player_count: usize) -> Self {
        BullseyeState { options, hits: vec![0; player_count] }
    }
}

pub(super) fn register(gs: &mut GameState, zone: RingZone, points: u32) -> Option<ThrowEvent> {
    let GameState { players, rotation, round, status, winner, ended_at_ms, mode_state, .. } = gs;
    let ModeState::BullseyeCount(ms) = mode_state else { return None };

    let current = rotation.current();
    let record = players[current].add_throw(zone, points, *round, 1);

    let effect = if zone == RingZone::Bullseye {
        ms.hits[current] += 1;
        if ms.hits[current] >= ms.options.target_hits {
            *status = GameStatus::Finished;
            *winner = Some(Winner::Player(current));
            *ended_at_ms = Some(now_ms());
        }
        ThrowEffect::BullseyeCounted { hits: ms.hits[current] }
    } else {
        ThrowEffect::Scored
    };

    // The rotation moves on even when the hunt just ended.
    if rotation.advance() {
        *round += 1;
    }

    Some(ThrowEvent { player_id: current, record, effect })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::setup::{GameSetup, ModeConfig};

    fn state(target_hits: u32) -> GameState {
        let setup = GameSetup::new(
            ModeConfig::BullseyeCount(BullseyeOptions { target_hits }),
            vec!["A".to_string(), "B".to_string()],
        );
        GameState::from_setup(&setup)
    }

    fn hunt(gs: &GameState) -> &BullseyeState {
        match &gs.mode_state {
            ModeState::BullseyeCount(ms) => ms,
            _ => panic!("not bullseye hunt"),
        }
    }

    #[test]
    fn test_only_bullseyes_count() {
        let mut gs = state(5);
        register(&mut gs, RingZone::Bullseye, 6);
        register(&mut gs, RingZone::Zone4, 4);
        register(&mut gs, RingZone::Killshot, 8);
        assert_eq!(hunt(&gs).hits, vec![1, 0]);
        // The ledger still accumulates ordinary points.
        assert_eq!(gs.players[1].score, 4);
    }

    #[test]
    fn test_counted_hit_reports_the_tally() {
        let mut gs = state(5);
        register(&mut gs, RingZone::Bullseye, 6);
        register(&mut gs, RingZone::Miss, 0);
        let event = register(&mut gs, RingZone::Bullseye, 6).unwrap();
        assert_eq!(event.effect, ThrowEffect::BullseyeCounted { hits: 2 });
    }

    #[test]
    fn test_reaching_target_finishes_but_still_advances() {
        let mut gs = state(2);
        register(&mut gs, RingZone::Bullseye, 6);
        register(&mut gs, RingZone::Miss, 0);
        register(&mut gs, RingZone::Bullseye, 6);
        assert_eq!(gs.status, GameStatus::Finished);
        assert_eq!(gs.winner, Some(Winner::Player(0)));
        // The turn pointer moves on even on the winning throw.
        assert_eq!(gs.rotation.current(), 1);
    }
}
