//! Grid mode: a 3x3 board where hits place, erase or waste, three in a row
//! wins the round.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::outcome::{CellAction, CellEvent};
use super::{GameState, ModeState};
use crate::models::game_result::{GameStatus, Winner};
use crate::models::player::{now_ms, Player};
use crate::models::team::TeamId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

/// The 8 winning lines: rows, columns, diagonals.
pub(super) const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct GridState {
    /// Cells 0..9, row-major from the top left.
    pub board: [Option<Mark>; 9],
    /// Mark per roster player. Teams share a mark.
    pub marks: Vec<Mark>,
    pub winning_line: Option<[usize; 3]>,
}

impl GridState {
    pub(super) fn new(players: &[Player]) -> Self {
        let marks = players
            .iter()
            .map(|p| match p.team {
                Some(TeamId::Team1) => Mark::X,
                Some(TeamId::Team2) => Mark::O,
                None if p.id == 0 => Mark::X,
                None => Mark::O,
            })
            .collect();
        GridState { board: [None; 9], marks, winning_line: None }
    }
}

pub(super) fn play_cell(gs: &mut GameState, cell: usize) -> Option<CellEvent> {
    let GameState {
        players, teams, rotation, status, winner, ended_at_ms, mode_state, ..
    } = gs;
    let ModeState::Grid(ms) = mode_state else { return None };

    if cell >= ms.board.len() {
        return None;
    }
    let current = rotation.current();
    let mark = ms.marks[current];

    let action = match ms.board[cell] {
        None => {
            ms.board[cell] = Some(mark);
            if let Some(line) = completed_line(&ms.board, mark) {
                ms.winning_line = Some(line);
                *status = GameStatus::Won;
                *ended_at_ms = Some(now_ms());
                match (teams.as_mut(), players[current].team) {
                    (Some(pair), Some(team)) => {
                        pair.credit(team, 1);
                        *winner = Some(Winner::Team(team));
                    }
                    _ => {
                        players[current].score += 1;
                        *winner = Some(Winner::Player(current));
                    }
                }
            } else if ms.board.iter().all(|c| c.is_some()) {
                *status = GameStatus::Draw;
                *ended_at_ms = Some(now_ms());
            } else {
                rotation.advance();
            }
            CellAction::Placed
        }
        Some(existing) if existing != mark => {
            // Knocking an opponent mark off never completes a line.
            ms.board[cell] = None;
            rotation.advance();
            CellAction::Erased { erased: existing }
        }
        Some(_) => {
            rotation.advance();
            CellAction::Wasted
        }
    };

    Some(CellEvent { player_id: current, cell, action, mark })
}

/// Start the next board, keeping the cumulative win tallies.
pub(super) fn next_round(gs: &mut GameState) -> bool {
    let GameState { rotation, round, status, winner, ended_at_ms, mode_state, .. } = gs;
    let ModeState::Grid(ms) = mode_state else { return false };

    if status.is_playing() {
        return false;
    }
    ms.board = [None; 9];
    ms.winning_line = None;
    *round += 1;
    *status = GameStatus::Playing;
    *winner = None;
    *ended_at_ms = None;
    rotation.reset();
    true
}

fn completed_line(board: &[Option<Mark>; 9], mark: Mark) -> Option<[usize; 3]> {
    LINES
        .into_iter()
        .find(|line| line.iter().all(|&cell| board[cell] == Some(mark)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::setup::{GameSetup, ModeKind};

    fn duel() -> GameState {
        let setup = GameSetup::with_defaults(ModeKind::Grid, vec!["A".to_string(), "B".to_string()]);
        GameState::from_setup(&setup)
    }

    fn grid(gs: &GameState) -> &GridState {
        match &gs.mode_state {
            ModeState::Grid(ms) => ms,
            _ => panic!("not grid"),
        }
    }

    #[test]
    fn test_top_row_wins() {
        let mut gs = duel();
        for cell in [0, 4, 1, 5] {
            play_cell(&mut gs, cell);
        }
        let event = play_cell(&mut gs, 2).unwrap();
        assert_eq!(event.action, CellAction::Placed);
        assert_eq!(gs.status, GameStatus::Won);
        assert_eq!(gs.winner, Some(Winner::Player(0)));
        assert_eq!(grid(&gs).winning_line, Some([0, 1, 2]));
        assert_eq!(gs.players[0].score, 1);
        assert_eq!(gs.players[1].score, 0);
    }

    #[test]
    fn test_foreign_mark_is_erased_without_win_check() {
        let mut gs = duel();
        play_cell(&mut gs, 0); // X
        let event = play_cell(&mut gs, 0).unwrap(); // O erases X
        assert_eq!(event.action, CellAction::Erased { erased: Mark::X });
        assert_eq!(event.mark, Mark::O);
        assert_eq!(grid(&gs).board[0], None);
        assert_eq!(gs.rotation.current(), 0);
        assert!(gs.status.is_playing());
    }

    #[test]
    fn test_own_mark_wastes_the_turn() {
        let mut gs = duel();
        play_cell(&mut gs, 4); // X
        play_cell(&mut gs, 0); // O
        play_cell(&mut gs, 8); // X
        play_cell(&mut gs, 0); // O hits its own mark
        let ms = grid(&gs);
        assert_eq!(ms.board[0], Some(Mark::O));
        assert_eq!(gs.rotation.current(), 0);
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        let mut gs = duel();
        for cell in [0, 4, 8, 2, 6, 3, 5, 7, 1] {
            play_cell(&mut gs, cell);
        }
        assert_eq!(gs.status, GameStatus::Draw);
        assert_eq!(gs.winner, None);
        assert!(grid(&gs).winning_line.is_none());
    }

    #[test]
    fn test_out_of_range_cell_rejected() {
        let mut gs = duel();
        assert!(play_cell(&mut gs, 9).is_none());
        assert_eq!(gs.rotation.current(), 0);
    }

    #[test]
    fn test_next_round_keeps_tallies() {
        let mut gs = duel();
        for cell in [0, 4, 1, 5, 2] {
            play_cell(&mut gs, cell);
        }
        assert_eq!(gs.status, GameStatus::Won);

        // Not available mid-game, only after a terminal board.
        assert!(next_round(&mut gs));
        assert!(gs.status.is_playing());
        assert_eq!(gs.round, 2);
        assert_eq!(gs.winner, None);
        assert_eq!(gs.players[0].score, 1);
        assert!(grid(&gs).board.iter().all(|c| c.is_none()));
        assert!(!next_round(&mut gs));
    }

    #[test]
    fn test_team_game_alternates_and_credits_team() {
        let setup = GameSetup::with_defaults(
            ModeKind::Grid,
            vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
        )
        .with_teams(vec![TeamId::Team1, TeamId::Team1, TeamId::Team2, TeamId::Team2]);
        let mut gs = GameState::from_setup(&setup);
        // Team1 p0, Team2 p2, Team1 p1, Team2 p3.
        assert_eq!(gs.rotation.order(), &[0, 2, 1, 3]);
        assert_eq!(grid(&gs).marks, vec![Mark::X, Mark::X, Mark::O, Mark::O]);

        for cell in [0, 4, 1, 5, 2] {
            play_cell(&mut gs, cell);
        }
        assert_eq!(gs.status, GameStatus::Won);
        assert_eq!(gs.winner, Some(Winner::Team(TeamId::Team1)));
        assert_eq!(gs.teams.as_ref().unwrap().scores(), (1, 0));
    }
}
