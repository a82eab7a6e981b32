//! Final result compilation: rankings, summary statistics, duration.

use super::elimination::EliminationState;
use super::{GameState, ModeState};
use crate::models::game_result::{GameResult, GameSummary, RankingEntry};
use crate::models::setup::ModeKind;

/// Compile the result of a terminal game. `None` while still playing.
pub fn compile(state: &GameState) -> Option<GameResult> {
    if !state.status.is_terminal() {
        return None;
    }

    let winning_line = match &state.mode_state {
        ModeState::Grid(ms) => ms.winning_line,
        _ => None,
    };

    Some(GameResult {
        game_id: state.game_id.clone(),
        mode: state.mode,
        status: state.status,
        winner: state.winner,
        rankings: rankings(state),
        summary: summary(state),
        teams: state.teams.clone(),
        winning_line,
        duration_ms: state.ended_at_ms.unwrap_or(state.started_at_ms) - state.started_at_ms,
    })
}

/// A player's standing on the mode's own scale: points, remaining score,
/// round wins, players outlasted, sequence steps or bullseye hits.
pub(crate) fn mode_score(state: &GameState, player_id: usize) -> u32 {
    let player = &state.players[player_id];
    match &state.mode_state {
        ModeState::Classic(_) | ModeState::Race(_) => player.score,
        ModeState::Countdown(ms) => match (&state.teams, player.team) {
            (Some(pair), Some(team)) => pair.get(team).score,
            _ => ms.remaining[player_id],
        },
        ModeState::Grid(_) => match (&state.teams, player.team) {
            (Some(pair), Some(team)) => pair.get(team).score,
            _ => player.score,
        },
        ModeState::Elimination(ms) => outlasted(ms, state.players.len(), player_id),
        ModeState::Sequence(ms) => ms.position[player_id] as u32,
        ModeState::BullseyeCount(ms) => ms.hits[player_id],
        ModeState::ExactScore(ms) => ms.totals[player_id],
    }
}

/// Players eliminated before this one; the survivor outlasted everybody.
fn outlasted(ms: &EliminationState, player_count: usize, player_id: usize) -> u32 {
    match ms.elimination_order.iter().position(|&id| id == player_id) {
        Some(index) => index as u32,
        None => player_count.saturating_sub(1) as u32,
    }
}

fn rankings(state: &GameState) -> Vec<RankingEntry> {
    let mut ids: Vec<usize> = (0..state.players.len()).collect();
    // Countdown ranks by remaining score, lowest first; every other mode by
    // its score, highest first. Stable sort keeps roster order on ties.
    if state.mode == ModeKind::Countdown {
        ids.sort_by_key(|&id| mode_score(state, id));
    } else {
        ids.sort_by_key(|&id| std::cmp::Reverse(mode_score(state, id)));
    }

    ids.into_iter()
        .enumerate()
        .map(|(index, id)| {
            let player = &state.players[id];
            RankingEntry {
                rank: index as u32 + 1,
                player_id: id,
                name: player.name.clone(),
                score: mode_score(state, id),
                team: player.team,
            }
        })
        .collect()
}

fn summary(state: &GameState) -> GameSummary {
    if let ModeState::Countdown(ms) = &state.mode_state {
        let total_throws: u32 = ms.stats.iter().map(|s| s.total_throws).sum();
        let total_points: u32 = ms.throws.iter().flatten().map(|d| d.points).sum();
        return GameSummary {
            total_throws,
            total_points,
            average_points: average(total_points, total_throws),
            best_throw: ms.stats.iter().map(|s| s.best_throw).max().unwrap_or(0),
            bullseyes: ms.stats.iter().map(|s| s.bulls).sum(),
            killshots: 0,
            doubles: Some(ms.stats.iter().map(|s| s.doubles).sum()),
            triples: Some(ms.stats.iter().map(|s| s.triples).sum()),
        };
    }

    let total_throws: u32 = state.players.iter().map(|p| p.stats.total_throws).sum();
    let total_points: u32 = state
        .players
        .iter()
        .flat_map(|p| p.throws.iter())
        .map(|t| t.points)
        .sum();
    GameSummary {
        total_throws,
        total_points,
        average_points: average(total_points, total_throws),
        best_throw: state.players.iter().map(|p| p.stats.best_throw).max().unwrap_or(0),
        bullseyes: state.players.iter().map(|p| p.stats.bullseyes).sum(),
        killshots: state.players.iter().map(|p| p.stats.killshots).sum(),
        doubles: None,
        triples: None,
    }
}

fn average(total_points: u32, total_throws: u32) -> f32 {
    if total_throws == 0 {
        0.0
    } else {
        total_points as f32 / total_throws as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{classic, countdown, elimination, grid};
    use crate::models::game_result::{GameStatus, Winner};
    use crate::models::setup::{ClassicOptions, GameSetup, ModeConfig, ModeKind};
    use crate::models::zone::RingZone;

    #[test]
    fn test_no_result_while_playing() {
        let setup = GameSetup::with_defaults(ModeKind::Race, vec!["A".to_string(), "B".to_string()]);
        let gs = GameState::from_setup(&setup);
        assert!(compile(&gs).is_none());
    }

    #[test]
    fn test_classic_ranking_descending_with_stable_ties() {
        let setup = GameSetup::new(
            ModeConfig::Classic(ClassicOptions { series: 1, throws_per_series: 1, killshot_throw: 0 }),
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
        );
        let mut gs = GameState::from_setup(&setup);
        classic::register(&mut gs, RingZone::Zone1, 1); // A: 1
        classic::register(&mut gs, RingZone::Zone4, 4); // B: 4
        classic::register(&mut gs, RingZone::Zone1, 1); // C: 1

        let result = compile(&gs).unwrap();
        assert_eq!(result.status, GameStatus::Finished);
        let order: Vec<(usize, u32)> =
            result.rankings.iter().map(|r| (r.player_id, r.score)).collect();
        assert_eq!(order, vec![(1, 4), (0, 1), (2, 1)]);
        assert_eq!(result.rankings[0].rank, 1);
        assert_eq!(result.summary.total_throws, 3);
        assert_eq!(result.summary.total_points, 6);
        assert_eq!(result.summary.best_throw, 4);
        assert!(result.duration_ms >= 0);
    }

    #[test]
    fn test_countdown_ranks_by_remaining_ascending() {
        let setup = GameSetup::new(
            ModeConfig::Countdown(crate::models::setup::CountdownOptions { start_score: 40 }),
            vec!["A".to_string(), "B".to_string()],
        );
        let mut gs = GameState::from_setup(&setup);
        for _ in 0..3 {
            countdown::register(&mut gs, 5, 1); // A: 40 -> 25
        }
        countdown::confirm_next(&mut gs);
        countdown::register(&mut gs, 20, 1); // B: 20
        countdown::register(&mut gs, 20, 1); // B: 0, wins

        let result = compile(&gs).unwrap();
        assert_eq!(result.winner, Some(Winner::Player(1)));
        let order: Vec<(usize, u32)> =
            result.rankings.iter().map(|r| (r.player_id, r.score)).collect();
        assert_eq!(order, vec![(1, 0), (0, 25)]);
        assert_eq!(result.summary.doubles, Some(0));
        assert_eq!(result.summary.total_throws, 5);
    }

    #[test]
    fn test_elimination_ranks_by_outlasted() {
        let setup = GameSetup::with_defaults(
            ModeKind::Elimination,
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
        );
        let mut gs = GameState::from_setup(&setup);
        elimination::register(&mut gs, RingZone::Zone1, 1); // A
        elimination::register(&mut gs, RingZone::Zone2, 2); // B kills A
        elimination::register(&mut gs, RingZone::Zone1, 1); // C
        elimination::register(&mut gs, RingZone::Zone4, 4); // B kills C, wins

        let result = compile(&gs).unwrap();
        let order: Vec<usize> = result.rankings.iter().map(|r| r.player_id).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(result.rankings[0].score, 2);
        assert_eq!(result.rankings[2].score, 0);
    }

    #[test]
    fn test_grid_result_carries_winning_line() {
        let setup = GameSetup::with_defaults(ModeKind::Grid, vec!["A".to_string(), "B".to_string()]);
        let mut gs = GameState::from_setup(&setup);
        for cell in [0, 4, 1, 5, 2] {
            grid::play_cell(&mut gs, cell);
        }
        let result = compile(&gs).unwrap();
        assert_eq!(result.status, GameStatus::Won);
        assert_eq!(result.winning_line, Some([0, 1, 2]));
        assert_eq!(result.rankings[0].player_id, 0);
        assert_eq!(result.rankings[0].score, 1);
        // No throws in this mode.
        assert_eq!(result.summary.total_throws, 0);
    }
}
