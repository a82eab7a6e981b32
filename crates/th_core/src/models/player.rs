use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::team::TeamId;
use super::zone::RingZone;

/// Wall-clock timestamp in epoch milliseconds.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One recorded throw in a player's ledger.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ThrowRecord {
    pub points: u32,
    pub zone: RingZone,
    /// Round (series) the throw belongs to, 1-based.
    pub round: u32,
    /// Throw index within the round, 1-based.
    pub throw_index: u32,
    pub timestamp_ms: i64,
}

/// Running statistics, updated on every ledger mutation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct PlayerStats {
    pub total_throws: u32,
    pub hits: u32,
    pub misses: u32,
    pub bullseyes: u32,
    pub killshots: u32,
    pub best_throw: u32,
}

/// A roster player and their throw ledger.
///
/// `score` is always the sum of the recorded throws' points (Grid repurposes
/// it as the round-win tally since that mode has no throws). Undo reverses
/// every field exactly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Player {
    /// Stable roster index, 0-based.
    pub id: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamId>,
    pub score: u32,
    pub throws: Vec<ThrowRecord>,
    pub stats: PlayerStats,
}

impl Player {
    /// Blank names get the default "Player {id+1}".
    pub fn new(id: usize, name: &str) -> Self {
        let name = if name.trim().is_empty() {
            format!("Player {}", id + 1)
        } else {
            name.trim().to_string()
        };
        Player { id, name, team: None, score: 0, throws: Vec::new(), stats: PlayerStats::default() }
    }

    /// Record a throw: append to the history, add the points and update stats.
    pub fn add_throw(&mut self, zone: RingZone, points: u32, round: u32, throw_index: u32) -> ThrowRecord {
        let record = ThrowRecord { points, zone, round, throw_index, timestamp_ms: now_ms() };
        self.throws.push(record);
        self.score += points;

        self.stats.total_throws += 1;
        if points > 0 {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        match zone {
            RingZone::Bullseye => self.stats.bullseyes += 1,
            RingZone::Killshot => self.stats.killshots += 1,
            _ => {}
        }
        if points > self.stats.best_throw {
            self.stats.best_throw = points;
        }

        record
    }

    /// Remove the newest throw and reverse its effect on score and stats.
    ///
    /// `best_throw` is recomputed over the remaining history. Returns `None`
    /// on an empty ledger.
    pub fn undo_last_throw(&mut self) -> Option<ThrowRecord> {
        let record = self.throws.pop()?;
        self.score -= record.points;

        self.stats.total_throws -= 1;
        if record.points > 0 {
            self.stats.hits -= 1;
        } else {
            self.stats.misses -= 1;
        }
        match record.zone {
            RingZone::Bullseye => self.stats.bullseyes -= 1,
            RingZone::Killshot => self.stats.killshots -= 1,
            _ => {}
        }
        self.stats.best_throw = self.throws.iter().map(|t| t.points).max().unwrap_or(0);

        Some(record)
    }

    pub fn average_points(&self) -> f32 {
        if self.stats.total_throws == 0 {
            0.0
        } else {
            self.score as f32 / self.stats.total_throws as f32
        }
    }
}
