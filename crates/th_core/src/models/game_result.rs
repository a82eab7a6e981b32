use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::setup::ModeKind;
use super::team::{TeamId, TeamPair};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Finished,
    Won,
    Draw,
}

impl GameStatus {
    pub fn is_playing(self) -> bool {
        self == GameStatus::Playing
    }

    pub fn is_terminal(self) -> bool {
        !self.is_playing()
    }
}

/// Who won a game: a roster player or a team.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Winner {
    Player(usize),
    Team(TeamId),
}

/// One row of the final ranking.
///
/// `score` is the mode's ranking key: points for the accumulation modes,
/// remaining score for Countdown, round wins for Grid, players outlasted for
/// Elimination, sequence position for Sequence and bullseye hits for
/// Bullseye Hunt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct RankingEntry {
    /// 1-based rank; ties keep roster order.
    pub rank: u32,
    pub player_id: usize,
    pub name: String,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamId>,
}

/// Aggregate statistics over the whole game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GameSummary {
    pub total_throws: u32,
    pub total_points: u32,
    pub average_points: f32,
    pub best_throw: u32,
    pub bullseyes: u32,
    pub killshots: u32,
    /// Countdown only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doubles: Option<u32>,
    /// Countdown only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triples: Option<u32>,
}

/// Compiled outcome of a terminal game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GameResult {
    pub game_id: String,
    pub mode: ModeKind,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    pub rankings: Vec<RankingEntry>,
    pub summary: GameSummary,
    /// Final team scores in team games.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<TeamPair>,
    /// Winning Grid line, when the game ended on three in a row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_line: Option<[usize; 3]>,
    pub duration_ms: i64,
}
