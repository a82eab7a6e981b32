//! Countdown (301-style darts): subtract from a start score, win on exactly
//! zero, bust voids the round.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::outcome::DartEvent;
use super::{GameState, ModeState};
use crate::models::game_result::{GameStatus, Winner};
use crate::models::player::now_ms;
use crate::models::setup::CountdownOptions;
use crate::models::zone::{DartHit, DartRing};

pub(super) const DARTS_PER_TURN: u32 = 3;

/// One dart as thrown, with the points it actually subtracted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct DartThrow {
    pub segment: u8,
    pub multiplier: u8,
    pub points: u32,
    pub bust: bool,
    pub timestamp_ms: i64,
}

/// Dart statistics per player. Bust darts count as thrown but never as the
/// best throw.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct DartStats {
    pub total_throws: u32,
    pub doubles: u32,
    pub triples: u32,
    pub bulls: u32,
    pub best_throw: u32,
}

impl DartStats {
    fn record(&mut self, hit: DartHit, points: u32, bust: bool) {
        self.total_throws += 1;
        match hit.ring {
            DartRing::Double => self.doubles += 1,
            DartRing::Triple => self.triples += 1,
            DartRing::DoubleBull | DartRing::SingleBull => self.bulls += 1,
            _ => {}
        }
        if !bust && points > self.best_throw {
            self.best_throw = points;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct CountdownState {
    pub options: CountdownOptions,
    /// Remaining score per player. Empty in team mode, where the team
    /// ledger is authoritative.
    pub remaining: Vec<u32>,
    /// Valid darts over the whole game, per player.
    pub throws: Vec<Vec<DartThrow>>,
    /// Darts of the round in progress, per player. A bust dart lands only
    /// here, flagged, and the list is cleared on player confirmation.
    pub round_throws: Vec<Vec<DartThrow>>,
    pub stats: Vec<DartStats>,
    /// Set after the third dart or a bust; cleared by `confirm_next_player`.
    pub waiting_for_next_player: bool,
    pub round_complete: bool,
}

impl CountdownState {
    pub(super) fn new(options: CountdownOptions, player_count: usize, team_mode: bool) -> Self {
        CountdownState {
            options,
            remaining: if team_mode { Vec::new() } else { vec![options.start_score; player_count] },
            throws: vec![Vec::new(); player_count],
            round_throws: vec![Vec::new(); player_count],
            stats: vec![DartStats::default(); player_count],
            waiting_for_next_player: false,
            round_complete: false,
        }
    }
}

pub(super) fn register(gs: &mut GameState, segment: u8, multiplier: u8) -> Option<DartEvent> {
    let GameState {
        players, teams, rotation, round: _, throw_in_round, status, winner, ended_at_ms, mode_state, ..
    } = gs;
    let ModeState::Countdown(ms) = mode_state else { return None };

    if ms.waiting_for_next_player {
        return None;
    }
    let valid = match segment {
        0 | 25 | 50 => multiplier == 1,
        1..=20 => (1..=3).contains(&multiplier),
        _ => false,
    };
    if !valid {
        return None;
    }

    let hit = DartHit::new(segment, multiplier);
    let points = hit.points();
    let current = rotation.current();
    let team = players[current].team;
    let current_remaining = match (teams.as_ref(), team) {
        (Some(pair), Some(id)) => pair.get(id).score,
        _ => ms.remaining[current],
    };
    let timestamp_ms = now_ms();

    if points > current_remaining {
        // Bust: void every point this round has applied so far.
        let refund: u32 = ms.round_throws[current].iter().map(|d| d.points).sum();
        match (teams.as_mut(), team) {
            (Some(pair), Some(id)) => pair.credit(id, refund),
            _ => ms.remaining[current] += refund,
        }
        ms.round_throws[current].push(DartThrow { segment, multiplier, points, bust: true, timestamp_ms });
        ms.stats[current].record(hit, points, true);
        ms.round_complete = true;
        ms.waiting_for_next_player = true;

        return Some(DartEvent {
            player_id: current,
            hit,
            points: 0,
            bust: true,
            remaining: current_remaining + refund,
            round_complete: true,
        });
    }

    match (teams.as_mut(), team) {
        (Some(pair), Some(id)) => pair.debit(id, points),
        _ => ms.remaining[current] -= points,
    }
    let dart = DartThrow { segment, multiplier, points, bust: false, timestamp_ms };
    ms.throws[current].push(dart);
    ms.round_throws[current].push(dart);
    ms.stats[current].record(hit, points, false);

    let remaining = current_remaining - points;
    let mut round_complete = false;
    if remaining == 0 {
        // Exact zero wins immediately; the rotation stays on the winner.
        *status = GameStatus::Finished;
        *winner = match team {
            Some(id) => Some(Winner::Team(id)),
            None => Some(Winner::Player(current)),
        };
        *ended_at_ms = Some(now_ms());
    } else {
        *throw_in_round += 1;
        if *throw_in_round > DARTS_PER_TURN {
            ms.round_complete = true;
            ms.waiting_for_next_player = true;
            round_complete = true;
        }
    }

    Some(DartEvent { player_id: current, hit, points, bust: false, remaining, round_complete })
}

/// End the inter-player wait: clear the finished round and hand the turn on.
pub(super) fn confirm_next(gs: &mut GameState) -> bool {
    let GameState { rotation, round, throw_in_round, mode_state, .. } = gs;
    let ModeState::Countdown(ms) = mode_state else { return false };

    if !ms.waiting_for_next_player {
        return false;
    }
    ms.round_throws[rotation.current()].clear();
    ms.waiting_for_next_player = false;
    ms.round_complete = false;
    *throw_in_round = 1;
    if rotation.advance() {
        *round += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::setup::{GameSetup, ModeConfig};
    use crate::models::team::TeamId;

    fn state(start_score: u32) -> GameState {
        let setup = GameSetup::new(
            ModeConfig::Countdown(CountdownOptions { start_score }),
            vec!["A".to_string(), "B".to_string()],
        );
        GameState::from_setup(&setup)
    }

    fn countdown(gs: &GameState) -> &CountdownState {
        match &gs.mode_state {
            ModeState::Countdown(ms) => ms,
            _ => panic!("not countdown"),
        }
    }

    #[test]
    fn test_three_triple_twenties() {
        let mut gs = state(301);
        for expected in [241, 181, 121] {
            let event = register(&mut gs, 20, 3).unwrap();
            assert_eq!(event.points, 60);
            assert_eq!(event.remaining, expected);
        }
        let ms = countdown(&gs);
        assert_eq!(ms.remaining[0], 121);
        assert!(ms.waiting_for_next_player);
        assert!(ms.round_complete);
        assert_eq!(ms.stats[0].triples, 3);
        assert_eq!(ms.stats[0].best_throw, 60);
    }

    #[test]
    fn test_registration_refused_while_waiting() {
        let mut gs = state(301);
        for _ in 0..3 {
            register(&mut gs, 20, 1).unwrap();
        }
        assert!(register(&mut gs, 20, 1).is_none());
        assert_eq!(countdown(&gs).remaining[0], 241);
    }

    #[test]
    fn test_confirm_advances_and_clears_round() {
        let mut gs = state(301);
        assert!(!confirm_next(&mut gs)); // nothing to confirm yet
        for _ in 0..3 {
            register(&mut gs, 5, 1).unwrap();
        }
        assert!(confirm_next(&mut gs));
        assert_eq!(gs.rotation.current(), 1);
        assert_eq!(gs.throw_in_round, 1);
        let ms = countdown(&gs);
        assert!(!ms.waiting_for_next_player);
        assert!(ms.round_throws[0].is_empty());
        // The full dart history survives the round clear.
        assert_eq!(ms.throws[0].len(), 3);
    }

    #[test]
    fn test_bust_restores_pre_round_score() {
        let mut gs = state(50);
        register(&mut gs, 20, 1).unwrap(); // 50 -> 30
        let event = register(&mut gs, 20, 3).unwrap(); // 60 > 30: bust
        assert!(event.bust);
        assert_eq!(event.points, 0);
        assert_eq!(event.remaining, 50);
        assert!(event.round_complete);

        let ms = countdown(&gs);
        assert_eq!(ms.remaining[0], 50);
        assert!(ms.waiting_for_next_player);
        // The bust dart exists only in the round list.
        assert_eq!(ms.throws[0].len(), 1);
        assert_eq!(ms.round_throws[0].len(), 2);
        assert!(ms.round_throws[0][1].bust);
        // Thrown darts still count in the statistics.
        assert_eq!(ms.stats[0].total_throws, 2);
        assert_eq!(ms.stats[0].triples, 1);
        assert_eq!(ms.stats[0].best_throw, 20);
    }

    #[test]
    fn test_exact_zero_wins_without_advancing() {
        let mut gs = state(40);
        register(&mut gs, 20, 1).unwrap();
        let event = register(&mut gs, 20, 1).unwrap();
        assert_eq!(event.remaining, 0);
        assert!(!event.round_complete);
        assert_eq!(gs.status, GameStatus::Finished);
        assert_eq!(gs.winner, Some(Winner::Player(0)));
        assert_eq!(gs.rotation.current(), 0);
        assert!(gs.ended_at_ms.is_some());
    }

    #[test]
    fn test_miss_is_segment_zero() {
        let mut gs = state(301);
        let event = register(&mut gs, 0, 1).unwrap();
        assert_eq!(event.points, 0);
        assert!(!event.bust);
        assert_eq!(event.remaining, 301);
        assert_eq!(gs.throw_in_round, 2);
    }

    #[test]
    fn test_invalid_darts_rejected() {
        let mut gs = state(301);
        assert!(register(&mut gs, 21, 1).is_none());
        assert!(register(&mut gs, 20, 4).is_none());
        assert!(register(&mut gs, 20, 0).is_none());
        assert!(register(&mut gs, 25, 2).is_none());
        assert_eq!(gs.throw_in_round, 1);
    }

    #[test]
    fn test_team_mode_subtracts_from_team_score() {
        let setup = GameSetup::new(
            ModeConfig::Countdown(CountdownOptions { start_score: 101 }),
            vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
        )
        .with_teams(vec![TeamId::Team1, TeamId::Team1, TeamId::Team2, TeamId::Team2]);
        let mut gs = GameState::from_setup(&setup);

        // Alternating order: A (team1), C (team2), B (team1), D (team2).
        assert_eq!(gs.rotation.order(), &[0, 2, 1, 3]);

        let event = register(&mut gs, 20, 1).unwrap();
        assert_eq!(event.remaining, 81);
        let pair = gs.teams.as_ref().unwrap();
        assert_eq!(pair.scores(), (81, 101));
        assert!(countdown(&gs).remaining.is_empty());
    }

    #[test]
    fn test_team_win_names_the_team() {
        let setup = GameSetup::new(
            ModeConfig::Countdown(CountdownOptions { start_score: 20 }),
            vec!["A".to_string(), "B".to_string()],
        )
        .with_teams(vec![TeamId::Team1, TeamId::Team2]);
        let mut gs = GameState::from_setup(&setup);

        register(&mut gs, 20, 1).unwrap();
        assert_eq!(gs.status, GameStatus::Finished);
        assert_eq!(gs.winner, Some(Winner::Team(TeamId::Team1)));
    }
}
