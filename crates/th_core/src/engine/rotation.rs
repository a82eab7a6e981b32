//! Turn order bookkeeping shared by every mode.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::player::Player;
use crate::models::team::TeamId;

/// Fixed turn order plus a cursor into it.
///
/// The order is built once at game start and never changes; eliminated
/// players are skipped at advance time rather than removed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TurnRotation {
    order: Vec<usize>,
    cursor: usize,
}

impl TurnRotation {
    /// Seat players in roster order.
    pub fn sequential(count: usize) -> Self {
        TurnRotation {
            order: (0..count).collect(),
            cursor: 0,
        }
    }

    /// Interleave the two teams so turns alternate between them.
    ///
    /// With uneven teams the longer team's tail plays consecutively.
    pub fn alternating(players: &[Player]) -> Self {
        let team1: Vec<usize> = players
            .iter()
            .filter(|p| p.team == Some(TeamId::Team1))
            .map(|p| p.id)
            .collect();
        let team2: Vec<usize> = players
            .iter()
            .filter(|p| p.team == Some(TeamId::Team2))
            .map(|p| p.id)
            .collect();

        let mut order = Vec::with_capacity(team1.len() + team2.len());
        let longest = team1.len().max(team2.len());
        for slot in 0..longest {
            if let Some(id) = team1.get(slot) {
                order.push(*id);
            }
            if let Some(id) = team2.get(slot) {
                order.push(*id);
            }
        }
        TurnRotation { order, cursor: 0 }
    }

    /// Player id whose turn it is.
    pub fn current(&self) -> usize {
        self.order[self.cursor]
    }

    /// Step to the next seat. Returns true when the rotation wrapped back
    /// to the first seat, which marks the end of a round.
    pub fn advance(&mut self) -> bool {
        self.cursor = (self.cursor + 1) % self.order.len();
        self.cursor == 0
    }

    /// Step to the next seat whose player is still in the game.
    ///
    /// Returns true when the walk passed the first seat. Bounded by the
    /// rotation length so a fully skipped order cannot loop forever.
    pub fn advance_skipping(&mut self, skip: impl Fn(usize) -> bool) -> bool {
        let mut wrapped = false;
        for _ in 0..self.order.len() {
            if self.advance() {
                wrapped = true;
            }
            if !skip(self.current()) {
                break;
            }
        }
        wrapped
    }

    /// Back to the first seat.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn set_position(&mut self, position: usize) {
        self.cursor = position % self.order.len();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }
}
