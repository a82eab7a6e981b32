//! Classic mode: a fixed number of series, a fixed number of throws per
//! series, highest total wins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::outcome::{ThrowEffect, ThrowEvent};
use super::{GameState, ModeState};
use crate::models::game_result::{GameStatus, Winner};
use crate::models::player::{now_ms, Player, ThrowRecord};
use crate::models::setup::ClassicOptions;
use crate::models::zone::RingZone;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ClassicState {
    pub options: ClassicOptions,
    /// One snapshot per registered throw, for undo.
    pub(super) undo_log: Vec<TurnSnapshot>,
}

/// Turn position before a throw was registered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub(super) struct TurnSnapshot {
    position: usize,
    round: u32,
    throw_in_round: u32,
}

impl ClassicState {
    pub(super) fn new(options: ClassicOptions) -> Self {
        ClassicState { options, undo_log: Vec::new() }
    }
}

/// Whether the killshot discs are armed for the given throw index.
pub(super) fn killshot_armed(options: &ClassicOptions, throw_in_round: u32) -> bool {
    options.killshot_throw == 0 || throw_in_round == options.killshot_throw
}

pub(super) fn register(gs: &mut GameState, zone: RingZone, points: u32) -> Option<ThrowEvent> {
    let GameState {
        players, teams, rotation, round, throw_in_round, status, winner, ended_at_ms, mode_state, ..
    } = gs;
    let ModeState::Classic(ms) = mode_state else { return None };

    // A killshot only registers on the throw it is armed for.
    if zone == RingZone::Killshot && !killshot_armed(&ms.options, *throw_in_round) {
        return None;
    }

    ms.undo_log.push(TurnSnapshot {
        position: rotation.position(),
        round: *round,
        throw_in_round: *throw_in_round,
    });

    let current = rotation.current();
    let record = players[current].add_throw(zone, points, *round, *throw_in_round);
    if let (Some(pair), Some(team)) = (teams.as_mut(), players[current].team) {
        pair.credit(team, points);
    }

    *throw_in_round += 1;
    if *throw_in_round > ms.options.throws_per_series {
        *throw_in_round = 1;
        if rotation.advance() {
            *round += 1;
            if *round > ms.options.series {
                *status = GameStatus::Finished;
                *winner = match teams {
                    Some(pair) => pair.leader().map(Winner::Team),
                    None => Some(Winner::Player(top_scorer(players))),
                };
                *ended_at_ms = Some(now_ms());
            }
        }
    }

    Some(ThrowEvent { player_id: current, record, effect: ThrowEffect::Scored })
}

/// Pop the newest snapshot and reverse the throw it recorded.
///
/// Permitted even after the final throw: unwinding it reopens the game,
/// clearing the winner and end time.
pub(super) fn undo(gs: &mut GameState) -> Option<ThrowRecord> {
    let GameState {
        players, teams, rotation, round, throw_in_round, status, winner, ended_at_ms, mode_state, ..
    } = gs;
    let ModeState::Classic(ms) = mode_state else { return None };

    let snapshot = ms.undo_log.pop()?;
    rotation.set_position(snapshot.position);
    *round = snapshot.round;
    *throw_in_round = snapshot.throw_in_round;

    let current = rotation.current();
    let record = players[current].undo_last_throw()?;
    if let (Some(pair), Some(team)) = (teams.as_mut(), players[current].team) {
        pair.debit(team, record.points);
    }

    if status.is_terminal() {
        *status = GameStatus::Playing;
        *winner = None;
        *ended_at_ms = None;
    }

    Some(record)
}

fn top_scorer(players: &[Player]) -> usize {
    let mut best = 0;
    for player in players.iter().skip(1) {
        if player.score > players[best].score {
            best = player.id;
        }
    }
    best
}
