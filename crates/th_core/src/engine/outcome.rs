//! Events returned by engine mutations.
//!
//! Every successful mutation returns one of these so callers can animate or
//! announce what happened without diffing state snapshots.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::grid::Mark;
use crate::models::player::ThrowRecord;
use crate::models::zone::DartHit;

/// Outcome of a ring-target throw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ThrowEvent {
    pub player_id: usize,
    pub record: ThrowRecord,
    pub effect: ThrowEffect,
}

/// Mode-specific side effect of a ring throw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ThrowEffect {
    /// Points credited, nothing else happened.
    Scored,
    /// An Elimination opponent was knocked out by this throw.
    Eliminated { victim: usize },
    /// The throw matched the next value of the golden sequence.
    SequenceMatched { position: usize },
    /// The throw missed the expected sequence value.
    SequenceMissed { expected: u32 },
    /// A bullseye counted toward the hunt target.
    BullseyeCounted { hits: u32 },
    /// Exact Score reset one or more totals to zero.
    ScoreReset { victims: Vec<usize> },
}

/// Outcome of a Countdown dart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct DartEvent {
    pub player_id: usize,
    pub hit: DartHit,
    /// Points actually subtracted; 0 on a bust.
    pub points: u32,
    pub bust: bool,
    /// Score left on the thrower's side after the dart.
    pub remaining: u32,
    /// The turn ended (third dart or bust) and the next player must confirm.
    pub round_complete: bool,
}

/// Outcome of a Grid cell play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct CellEvent {
    pub player_id: usize,
    pub cell: usize,
    pub action: CellAction,
    /// Mark of the acting player.
    pub mark: Mark,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CellAction {
    /// Own mark placed on an empty cell.
    Placed,
    /// An opponent mark was knocked off the board.
    Erased { erased: Mark },
    /// Hit a cell already holding the player's own mark.
    Wasted,
}
