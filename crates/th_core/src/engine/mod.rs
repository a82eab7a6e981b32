//! The game engine: one state object per live game, mutated through
//! mode-dispatched operations, observed through a per-engine subscriber.

mod bullseye;
mod classic;
mod countdown;
mod elimination;
mod exact;
mod grid;
pub mod outcome;
mod race;
pub mod result;
pub mod rotation;
mod sequence;


pub use bullseye::BullseyeState;
pub use classic::ClassicState;
pub use countdown::{CountdownState, DartStats, DartThrow};
pub use elimination::EliminationState;
pub use exact::ExactScoreState;
pub use grid::{GridState, Mark};
pub use race::RaceState;
pub use sequence::{SequenceState, GOLDEN_SEQUENCE};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::game_result::{GameResult, GameStatus, Winner};
use crate::models::player::{now_ms, Player, ThrowRecord};
use crate::models::setup::{GameSetup, ModeConfig, ModeKind};
use crate::models::team::TeamPair;
use crate::models::zone::RingZone;
use crate::store::records::HistoryEntry;
use crate::store::GameStore;
use outcome::{CellEvent, DartEvent, ThrowEvent};
use rotation::TurnRotation;

/// Mode-specific state, one variant per game mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeState {
    Classic(ClassicState),
    Countdown(CountdownState),
    Grid(GridState),
    Elimination(EliminationState),
    Race(RaceState),
    Sequence(SequenceState),
    BullseyeCount(BullseyeState),
    ExactScore(ExactScoreState),
}

/// Complete state of a live game. Serializable as a whole for saving and
/// for pushing to observers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GameState {
    pub game_id: String,
    pub mode: ModeKind,
    pub players: Vec<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<TeamPair>,
    pub rotation: TurnRotation,
    /// Current round: Classic series, Grid board number, rotation lap
    /// elsewhere. 1-based.
    pub round: u32,
    /// Throw index within the current turn, 1-based.
    pub throw_in_round: u32,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    pub started_at_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at_ms: Option<i64>,
    pub mode_state: ModeState,
}

impl GameState {
    pub(crate) fn from_setup(setup: &GameSetup) -> GameState {
        let mut players: Vec<Player> = setup
            .player_names
            .iter()
            .enumerate()
            .map(|(id, name)| Player::new(id, name))
            .collect();
        if let Some(assignment) = &setup.teams {
            for (player, team) in players.iter_mut().zip(assignment) {
                player.team = Some(*team);
            }
        }

        let kind = setup.mode.kind();
        let team_mode = setup.team_mode();
        let teams = team_mode.then(|| {
            let initial = match setup.mode {
                ModeConfig::Countdown(opts) => opts.start_score,
                _ => 0,
            };
            TeamPair::new(initial)
        });
        // Countdown and Grid team games alternate between the teams;
        // everything else plays in roster order.
        let rotation = if team_mode && matches!(kind, ModeKind::Countdown | ModeKind::Grid) {
            TurnRotation::alternating(&players)
        } else {
            TurnRotation::sequential(players.len())
        };
        let mode_state = match setup.mode {
            ModeConfig::Classic(opts) => ModeState::Classic(ClassicState::new(opts)),
            ModeConfig::Countdown(opts) => {
                ModeState::Countdown(CountdownState::new(opts, players.len(), team_mode))
            }
            ModeConfig::Grid => ModeState::Grid(GridState::new(&players)),
            ModeConfig::Elimination => ModeState::Elimination(EliminationState::new(players.len())),
            ModeConfig::Race(opts) => ModeState::Race(RaceState { options: opts }),
            ModeConfig::Sequence => ModeState::Sequence(SequenceState::new(players.len())),
            ModeConfig::BullseyeCount(opts) => {
                ModeState::BullseyeCount(BullseyeState::new(opts, players.len()))
            }
            ModeConfig::ExactScore(opts) => {
                ModeState::ExactScore(ExactScoreState::new(opts, players.len()))
            }
        };

        GameState {
            game_id: Uuid::new_v4().to_string(),
            mode: kind,
            players,
            teams,
            rotation,
            round: 1,
            throw_in_round: 1,
            status: GameStatus::Playing,
            winner: None,
            started_at_ms: now_ms(),
            ended_at_ms: None,
            mode_state,
        }
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.rotation.current()]
    }

    pub fn team_mode(&self) -> bool {
        self.teams.is_some()
    }
}

/// Subscriber notified with the full state after every successful mutation.
pub trait GameObserver {
    fn on_update(&mut self, state: &GameState);
}

impl<F: FnMut(&GameState)> GameObserver for F {
    fn on_update(&mut self, state: &GameState) {
        self(state)
    }
}

/// Owns one game from setup to quit.
///
/// All mutations are synchronous and notify the observer before returning.
/// Calls in a non-playing state return `None`/`false` and change nothing;
/// undo, restart and quit stay available for as long as the engine lives.
pub struct GameEngine {
    state: GameState,
    setup: GameSetup,
    observer: Option<Box<dyn GameObserver>>,
    store: Option<Box<dyn GameStore>>,
    terminal_recorded: bool,
}

impl GameEngine {
    pub fn new(setup: GameSetup) -> Result<Self> {
        setup.validate()?;
        let state = GameState::from_setup(&setup);
        tracing::info!(
            game_id = %state.game_id,
            mode = state.mode.label(),
            players = state.players.len(),
            "game created"
        );
        Ok(GameEngine { state, setup, observer: None, store: None, terminal_recorded: false })
    }

    /// Attach the observer; it immediately receives the current state.
    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observer = Some(observer);
        self.notify();
        self
    }

    pub fn with_store(mut self, store: Box<dyn GameStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    /// Compiled result, once the game is over.
    pub fn result(&self) -> Option<GameResult> {
        result::compile(&self.state)
    }

    /// Register a resolved ring-target throw for the current player.
    pub fn register_throw(&mut self, zone: RingZone, points: u32) -> Option<ThrowEvent> {
        if !self.state.status.is_playing() {
            tracing::debug!("throw ignored, game not in play");
            return None;
        }
        let event = match self.state.mode {
            ModeKind::Classic => classic::register(&mut self.state, zone, points),
            ModeKind::Elimination => elimination::register(&mut self.state, zone, points),
            ModeKind::Race => race::register(&mut self.state, zone, points),
            ModeKind::Sequence => sequence::register(&mut self.state, zone, points),
            ModeKind::BullseyeCount => bullseye::register(&mut self.state, zone, points),
            ModeKind::ExactScore => exact::register(&mut self.state, zone, points),
            ModeKind::Countdown | ModeKind::Grid => None,
        }?;
        self.after_mutation();
        Some(event)
    }

    /// Register a dart for Countdown.
    pub fn register_darts_throw(&mut self, segment: u8, multiplier: u8) -> Option<DartEvent> {
        if !self.state.status.is_playing() {
            tracing::debug!("dart ignored, game not in play");
            return None;
        }
        let event = countdown::register(&mut self.state, segment, multiplier)?;
        self.after_mutation();
        Some(event)
    }

    /// Play a Grid cell, 0..9 row-major.
    pub fn play_cell(&mut self, cell: usize) -> Option<CellEvent> {
        if !self.state.status.is_playing() {
            tracing::debug!("cell ignored, game not in play");
            return None;
        }
        let event = grid::play_cell(&mut self.state, cell)?;
        self.after_mutation();
        Some(event)
    }

    /// End the Countdown inter-player wait and hand the turn on.
    pub fn confirm_next_player(&mut self) -> bool {
        if !self.state.status.is_playing() {
            return false;
        }
        if !countdown::confirm_next(&mut self.state) {
            return false;
        }
        self.after_mutation();
        true
    }

    /// Register a missed throw in whatever form the mode records one.
    /// Grid has no miss concept, the turn is simply not played.
    pub fn register_miss(&mut self) -> bool {
        match self.state.mode {
            ModeKind::Countdown => self.register_darts_throw(0, 1).is_some(),
            ModeKind::Grid => false,
            _ => self.register_throw(RingZone::Miss, 0).is_some(),
        }
    }

    /// Undo the newest Classic throw. Works after the final throw too,
    /// reopening the game.
    pub fn undo_last_throw(&mut self) -> Option<ThrowRecord> {
        let record = classic::undo(&mut self.state)?;
        if self.state.status.is_playing() {
            self.terminal_recorded = false;
        }
        self.after_mutation();
        Some(record)
    }

    /// Start the next Grid board once the current one is decided.
    pub fn next_round(&mut self) -> bool {
        if !grid::next_round(&mut self.state) {
            return false;
        }
        self.terminal_recorded = false;
        self.after_mutation();
        true
    }

    /// Rebuild the game from its setup: same roster, teams and options.
    pub fn restart(&mut self) {
        self.state = GameState::from_setup(&self.setup);
        self.terminal_recorded = false;
        tracing::info!(game_id = %self.state.game_id, "game restarted");
        self.after_mutation();
    }

    /// Abandon the game, clearing the persisted current save.
    pub fn quit(mut self) {
        if let Some(store) = self.store.as_mut() {
            store.clear_current();
        }
        tracing::info!(game_id = %self.state.game_id, "game quit");
    }

    /// Whether the killshot discs are armed for the current throw.
    pub fn killshot_allowed(&self) -> bool {
        if !self.state.status.is_playing() {
            return false;
        }
        match &self.state.mode_state {
            ModeState::Classic(ms) => classic::killshot_armed(&ms.options, self.state.throw_in_round),
            _ => false,
        }
    }

    /// Next required Sequence value for the current player.
    pub fn expected_value(&self) -> Option<u32> {
        if !self.state.status.is_playing() {
            return None;
        }
        match &self.state.mode_state {
            ModeState::Sequence(ms) => sequence::expected_value(ms, self.state.rotation.current()),
            _ => None,
        }
    }

    pub fn waiting_for_next_player(&self) -> bool {
        match &self.state.mode_state {
            ModeState::Countdown(ms) => ms.waiting_for_next_player,
            _ => false,
        }
    }

    fn after_mutation(&mut self) {
        if let Some(store) = self.store.as_mut() {
            if self.state.status.is_terminal() {
                if !self.terminal_recorded {
                    self.terminal_recorded = true;
                    store.add_to_history(&HistoryEntry::from_state(&self.state));
                    if self.state.mode == ModeKind::Classic {
                        store.update_leaderboard(&self.state.players);
                    }
                    store.clear_current();
                    tracing::info!(
                        game_id = %self.state.game_id,
                        status = ?self.state.status,
                        "game over, result recorded"
                    );
                }
            } else {
                store.save_current(&self.state);
            }
        }
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_update(&self.state);
        }
    }
}
