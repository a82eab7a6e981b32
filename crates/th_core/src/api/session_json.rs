//! JSON session facade.
//!
//! Hosts drive the engine through single JSON objects over any string
//! channel: one request in, one response out, at most one live game per
//! session. Every response carries the full state while a game exists, so
//! hosts never need to diff or poll.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::outcome::{CellEvent, DartEvent, ThrowEvent};
use crate::engine::GameEngine;
use crate::engine::GameState;
use crate::error::GameError;
use crate::models::game_result::GameResult;
use crate::models::player::ThrowRecord;
use crate::models::setup::{GameSetup, ModeKind};
use crate::models::zone::{DartHit, DartRing, RingZone};
use crate::target::{Dartboard, RingTarget};

/// One request to the session, tagged by operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SessionRequest {
    /// Validate the setup and start a game, replacing any current one.
    NewGame { setup: GameSetup },
    /// Resolve a ring-target position (unit square) to a zone, without
    /// registering anything.
    ResolveRing {
        x: f32,
        y: f32,
        /// Overrides the killshot arming; defaults to the live game's.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        killshots_enabled: Option<bool>,
    },
    /// Resolve a dartboard position (unit square) to a hit, without
    /// registering anything.
    ResolveDartboard { x: f32, y: f32 },
    /// Register an already-resolved ring zone; `points` defaults to the
    /// zone's value.
    RegisterThrow {
        zone: RingZone,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        points: Option<u32>,
    },
    /// Resolve a position against the mode's own target and register it.
    RegisterHit { x: f32, y: f32 },
    /// Register a Countdown dart by segment and multiplier.
    RegisterDartsThrow { segment: u8, multiplier: u8 },
    /// Register a missed throw in whatever form the mode records one.
    RegisterMiss,
    /// Play a Grid cell, 0..9 row-major.
    PlayCell { cell: usize },
    /// End the Countdown inter-player wait.
    ConfirmNextPlayer,
    /// Undo the newest Classic throw.
    UndoLastThrow,
    /// Start the next Grid board once the current one is decided.
    NextRound,
    /// Rebuild the game from its setup.
    Restart,
    /// Abandon the game.
    Quit,
    /// Fetch the current state.
    GetState,
    /// Fetch the compiled result of a finished game.
    GetResult,
}

/// What a mutating request did.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionOutcome {
    Throw(ThrowEvent),
    Dart(DartEvent),
    Cell(CellEvent),
    Undo { record: ThrowRecord },
    Confirmed,
    RoundStarted,
    Restarted,
    Quit,
}

/// Response to one request.
///
/// `ok` is false when the request was rejected; `error` then says why and
/// the state is left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionResponse {
    pub schema_version: u8,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Full state after the request, while a game exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<GameState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<SessionOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
    /// Resolved ring zone, for resolve and ring-hit requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<RingZone>,
    /// Resolved dart hit, for resolve and dart-hit requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<DartHit>,
}

impl SessionResponse {
    fn accepted() -> Self {
        SessionResponse {
            schema_version: crate::SCHEMA_VERSION,
            ok: true,
            error: None,
            state: None,
            outcome: None,
            result: None,
            zone: None,
            hit: None,
        }
    }
}

fn reject(response: &mut SessionResponse, message: impl Into<String>) {
    response.ok = false;
    response.error = Some(message.into());
}

/// A host-facing session owning at most one live game.
///
/// The session itself keeps no store; hosts that want persistence build a
/// `GameEngine` with one directly.
pub struct JsonSession {
    engine: Option<GameEngine>,
    ring: RingTarget,
    dartboard: Dartboard,
}

impl Default for JsonSession {
    fn default() -> Self {
        JsonSession::new()
    }
}

impl JsonSession {
    pub fn new() -> Self {
        JsonSession {
            engine: None,
            ring: RingTarget::standard(),
            dartboard: Dartboard::default(),
        }
    }

    pub fn engine(&self) -> Option<&GameEngine> {
        self.engine.as_ref()
    }

    /// Execute one request.
    pub fn execute(&mut self, request: SessionRequest) -> SessionResponse {
        let mut response = SessionResponse::accepted();

        match request {
            SessionRequest::NewGame { setup } => match GameEngine::new(setup) {
                Ok(engine) => self.engine = Some(engine),
                Err(e) => reject(&mut response, e.to_string()),
            },
            SessionRequest::ResolveRing { x, y, killshots_enabled } => {
                let armed = killshots_enabled.unwrap_or_else(|| {
                    self.engine.as_ref().map(GameEngine::killshot_allowed).unwrap_or(false)
                });
                response.zone = Some(self.ring.resolve_unit(x, y, armed));
            }
            SessionRequest::ResolveDartboard { x, y } => {
                response.hit = Some(self.dartboard.resolve_unit(x, y));
            }
            SessionRequest::RegisterThrow { zone, points } => match self.engine.as_mut() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => {
                    let points = points.unwrap_or_else(|| zone.points());
                    match engine.register_throw(zone, points) {
                        Some(event) => response.outcome = Some(SessionOutcome::Throw(event)),
                        None => reject(&mut response, "throw not accepted in the current state"),
                    }
                }
            },
            SessionRequest::RegisterHit { x, y } => self.register_hit(&mut response, x, y),
            SessionRequest::RegisterDartsThrow { segment, multiplier } => {
                match self.engine.as_mut() {
                    None => reject(&mut response, GameError::NoActiveGame.to_string()),
                    Some(engine) => match engine.register_darts_throw(segment, multiplier) {
                        Some(event) => response.outcome = Some(SessionOutcome::Dart(event)),
                        None => reject(&mut response, "dart not accepted in the current state"),
                    },
                }
            }
            SessionRequest::RegisterMiss => match self.engine.as_mut() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => {
                    let outcome = match engine.state().mode {
                        ModeKind::Countdown => {
                            engine.register_darts_throw(0, 1).map(SessionOutcome::Dart)
                        }
                        ModeKind::Grid => None,
                        _ => engine
                            .register_throw(RingZone::Miss, 0)
                            .map(SessionOutcome::Throw),
                    };
                    match outcome {
                        Some(outcome) => response.outcome = Some(outcome),
                        None => reject(&mut response, "miss not accepted in the current state"),
                    }
                }
            },
            SessionRequest::PlayCell { cell } => match self.engine.as_mut() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => match engine.play_cell(cell) {
                    Some(event) => response.outcome = Some(SessionOutcome::Cell(event)),
                    None => reject(&mut response, "cell not accepted in the current state"),
                },
            },
            SessionRequest::ConfirmNextPlayer => match self.engine.as_mut() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => {
                    if engine.confirm_next_player() {
                        response.outcome = Some(SessionOutcome::Confirmed);
                    } else {
                        reject(&mut response, "no player change pending");
                    }
                }
            },
            SessionRequest::UndoLastThrow => match self.engine.as_mut() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => match engine.undo_last_throw() {
                    Some(record) => response.outcome = Some(SessionOutcome::Undo { record }),
                    None => reject(&mut response, "nothing to undo"),
                },
            },
            SessionRequest::NextRound => match self.engine.as_mut() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => {
                    if engine.next_round() {
                        response.outcome = Some(SessionOutcome::RoundStarted);
                    } else {
                        reject(&mut response, "next round not available");
                    }
                }
            },
            SessionRequest::Restart => match self.engine.as_mut() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => {
                    engine.restart();
                    response.outcome = Some(SessionOutcome::Restarted);
                }
            },
            SessionRequest::Quit => match self.engine.take() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => {
                    engine.quit();
                    response.outcome = Some(SessionOutcome::Quit);
                }
            },
            SessionRequest::GetState => {
                if self.engine.is_none() {
                    reject(&mut response, GameError::NoActiveGame.to_string());
                }
            }
            SessionRequest::GetResult => match self.engine.as_ref() {
                None => reject(&mut response, GameError::NoActiveGame.to_string()),
                Some(engine) => match engine.result() {
                    Some(result) => response.result = Some(result),
                    None => reject(&mut response, "game is still in play"),
                },
            },
        }

        if response.state.is_none() {
            response.state = self.engine.as_ref().map(|e| e.state().clone());
        }
        response
    }

    /// Parse, execute and serialize one request.
    pub fn handle(&mut self, request_json: &str) -> String {
        let response = match serde_json::from_str::<SessionRequest>(request_json) {
            Ok(request) => self.execute(request),
            Err(e) => {
                tracing::debug!(error = %e, "unparseable session request");
                let mut response = SessionResponse::accepted();
                reject(&mut response, format!("Invalid JSON request: {}", e));
                response.state = self.engine.as_ref().map(|engine| engine.state().clone());
                response
            }
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            serde_json::json!({
                "schema_version": crate::SCHEMA_VERSION,
                "ok": false,
                "error": format!("Failed to serialize response: {}", e),
            })
            .to_string()
        })
    }

    /// Resolve a position against the live mode's target and register it.
    /// Grid has no position concept, cells are played directly.
    fn register_hit(&mut self, response: &mut SessionResponse, x: f32, y: f32) {
        let Some(engine) = self.engine.as_mut() else {
            reject(response, GameError::NoActiveGame.to_string());
            return;
        };
        match engine.state().mode {
            ModeKind::Countdown => {
                let hit = self.dartboard.resolve_unit(x, y);
                response.hit = Some(hit);
                let (segment, multiplier) = match hit.ring {
                    DartRing::Miss => (0, 1),
                    _ => (hit.segment, hit.multiplier),
                };
                match engine.register_darts_throw(segment, multiplier) {
                    Some(event) => response.outcome = Some(SessionOutcome::Dart(event)),
                    None => reject(response, "dart not accepted in the current state"),
                }
            }
            ModeKind::Grid => {
                reject(response, "grid cells are played directly, use play_cell");
            }
            _ => {
                let armed = engine.killshot_allowed();
                let zone = self.ring.resolve_unit(x, y, armed);
                response.zone = Some(zone);
                match engine.register_throw(zone, zone.points()) {
                    Some(event) => response.outcome = Some(SessionOutcome::Throw(event)),
                    None => reject(response, "throw not accepted in the current state"),
                }
            }
        }
    }
}

/// JSON schema for session requests.
pub fn request_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(SessionRequest)
}

/// JSON schema for session responses.
pub fn response_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(SessionResponse)
}
