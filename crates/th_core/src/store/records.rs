//! Match history and the all-time leaderboard, as stored on disk.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::engine::{result, GameState};
use crate::models::game_result::Winner;
use crate::models::player::{now_ms, Player};

/// History keeps the newest games only.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryPlayer {
    pub name: String,
    /// Final standing on the mode's own scale.
    pub score: u32,
}

/// One finished game, as listed in the history screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub mode: String,
    /// RFC 3339 end date.
    pub date: String,
    pub duration_ms: i64,
    pub players: Vec<HistoryPlayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl HistoryEntry {
    pub fn from_state(state: &GameState) -> Self {
        let players = state
            .players
            .iter()
            .map(|p| HistoryPlayer { name: p.name.clone(), score: result::mode_score(state, p.id) })
            .collect();
        let winner = state.winner.map(|w| match w {
            Winner::Player(id) => state.players[id].name.clone(),
            Winner::Team(team) => state
                .teams
                .as_ref()
                .map(|pair| pair.get(team).name.clone())
                .unwrap_or_else(|| team.default_name().to_string()),
        });
        let ended = state.ended_at_ms.unwrap_or(state.started_at_ms);

        HistoryEntry {
            id: state.game_id.clone(),
            mode: state.mode.label().to_string(),
            date: OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
            duration_ms: ended - state.started_at_ms,
            players,
            winner,
        }
    }
}

/// Newest first, capped at [`HISTORY_LIMIT`].
pub fn push_history(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    history.insert(0, entry);
    history.truncate(HISTORY_LIMIT);
}

/// One player's all-time line. Players are matched by name,
/// case-insensitively, across games.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub games_played: u32,
    pub total_score: u32,
    pub best_score: u32,
    /// Rounded per-game average.
    pub average_score: u32,
    pub total_throws: u32,
    pub total_bullseyes: u32,
    pub total_killshots: u32,
    pub first_played_ms: i64,
    pub last_played_ms: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Fold a finished game's players in and re-sort by best score.
    pub fn apply(&mut self, players: &[Player]) {
        let now = now_ms();
        for player in players {
            let key = player.name.to_lowercase();
            match self.entries.iter_mut().find(|e| e.name.to_lowercase() == key) {
                Some(entry) => {
                    entry.games_played += 1;
                    entry.total_score += player.score;
                    entry.best_score = entry.best_score.max(player.score);
                    entry.average_score =
                        (entry.total_score as f32 / entry.games_played as f32).round() as u32;
                    entry.total_throws += player.stats.total_throws;
                    entry.total_bullseyes += player.stats.bullseyes;
                    entry.total_killshots += player.stats.killshots;
                    entry.last_played_ms = now;
                }
                None => self.entries.push(LeaderboardEntry {
                    name: player.name.clone(),
                    games_played: 1,
                    total_score: player.score,
                    best_score: player.score,
                    average_score: player.score,
                    total_throws: player.stats.total_throws,
                    total_bullseyes: player.stats.bullseyes,
                    total_killshots: player.stats.killshots,
                    first_played_ms: now,
                    last_played_ms: now,
                }),
            }
        }
        self.entries.sort_by_key(|e| std::cmp::Reverse(e.best_score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::zone::RingZone;

    fn player_with_score(id: usize, name: &str, score: u32) -> Player {
        let mut player = Player::new(id, name);
        player.add_throw(RingZone::Zone1, score, 1, 1);
        player
    }

    fn entry(id: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            mode: "Classic".to_string(),
            date: String::new(),
            duration_ms: 0,
            players: Vec::new(),
            winner: None,
        }
    }

    #[test]
    fn test_history_is_newest_first_and_capped() {
        let mut history = Vec::new();
        for i in 0..HISTORY_LIMIT + 5 {
            push_history(&mut history, entry(&i.to_string()));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].id, (HISTORY_LIMIT + 4).to_string());
        // The oldest entries fell off the end.
        assert_eq!(history[HISTORY_LIMIT - 1].id, "5");
    }

    #[test]
    fn test_leaderboard_new_and_updated_entries() {
        let mut board = Leaderboard::default();
        board.apply(&[player_with_score(0, "Ana", 10), player_with_score(1, "Lou", 20)]);
        assert_eq!(board.entries.len(), 2);
        // Sorted by best score.
        assert_eq!(board.entries[0].name, "Lou");

        board.apply(&[player_with_score(0, "Ana", 30)]);
        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.entries[0].name, "Ana");
        assert_eq!(board.entries[0].games_played, 2);
        assert_eq!(board.entries[0].total_score, 40);
        assert_eq!(board.entries[0].best_score, 30);
        assert_eq!(board.entries[0].average_score, 20);
    }

    #[test]
    fn test_leaderboard_matches_names_case_insensitively() {
        let mut board = Leaderboard::default();
        board.apply(&[player_with_score(0, "Ana", 10)]);
        board.apply(&[player_with_score(0, "ANA", 5)]);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].games_played, 2);
        // The first spelling is kept.
        assert_eq!(board.entries[0].name, "Ana");
    }
}
