//! # th_core - Deterministic Target-Throwing Scoring Engine
//!
//! This library provides a deterministic scoring engine for turn-based
//! target-throwing games, with a JSON API for easy integration with game
//! engines like Godot.
//!
//! ## Features
//! - Eight game modes over two target layouts (concentric rings, dartboard)
//! - Pure geometry-to-zone resolution, no randomness anywhere
//! - Per-engine observer and pluggable persistence
//! - JSON session API for easy integration

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;
pub mod target;

// Re-export the session API
pub use api::{
    request_schema, response_schema, JsonSession, SessionOutcome, SessionRequest, SessionResponse,
};
pub use error::{GameError, Result};

// Re-export the engine
pub use engine::{GameEngine, GameObserver, GameState, ModeState};

// Re-export model types
pub use models::{
    GameResult, GameSetup, GameStatus, ModeConfig, ModeKind, Player, RingZone, TeamId, Winner,
};

// Re-export the store
pub use store::{FileStore, GameStore, StoreError};

// Re-export the target resolvers
pub use target::{Dartboard, RingTarget};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn send(session: &mut JsonSession, request: serde_json::Value) -> serde_json::Value {
        let raw = session.handle(&request.to_string());
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_grid_game_over_json() {
        let mut session = JsonSession::new();

        let created = send(
            &mut session,
            json!({
                "op": "new_game",
                "setup": {
                    "mode": {"mode": "grid"},
                    "player_names": ["Ann", "Ben"]
                }
            }),
        );
        assert_eq!(created["ok"], json!(true));
        assert_eq!(created["schema_version"], json!(1));
        assert_eq!(created["state"]["status"], json!("playing"));

        // X takes the top row while O fills the middle.
        for cell in [0, 4, 1, 5, 2] {
            let response = send(&mut session, json!({"op": "play_cell", "cell": cell}));
            assert_eq!(response["ok"], json!(true), "cell {}", cell);
        }

        let state = send(&mut session, json!({"op": "get_state"}));
        assert_eq!(state["state"]["status"], json!("won"));
        assert_eq!(state["state"]["winner"], json!({"kind": "player", "id": 0}));

        let result = send(&mut session, json!({"op": "get_result"}));
        assert_eq!(result["ok"], json!(true));
        assert_eq!(result["result"]["winning_line"], json!([0, 1, 2]));
        assert_eq!(result["result"]["rankings"][0]["name"], json!("Ann"));
    }

    #[test]
    fn test_countdown_turn_over_json() {
        let mut session = JsonSession::new();

        let created = send(
            &mut session,
            json!({
                "op": "new_game",
                "setup": {
                    "mode": {"mode": "countdown", "start_score": 301},
                    "player_names": ["Solo"]
                }
            }),
        );
        assert_eq!(created["ok"], json!(true));

        for remaining in [241, 181, 121] {
            let response = send(
                &mut session,
                json!({"op": "register_darts_throw", "segment": 20, "multiplier": 3}),
            );
            assert_eq!(response["ok"], json!(true));
            assert_eq!(response["outcome"]["remaining"], json!(remaining));
        }
        let state = send(&mut session, json!({"op": "get_state"}));
        assert_eq!(state["state"]["mode_state"]["remaining"], json!([121]));
        assert_eq!(state["state"]["mode_state"]["waiting_for_next_player"], json!(true));

        let confirmed = send(&mut session, json!({"op": "confirm_next_player"}));
        assert_eq!(confirmed["ok"], json!(true));
        assert_eq!(confirmed["state"]["round"], json!(2));
    }

    #[test]
    fn test_rejections_carry_errors_over_json() {
        let mut session = JsonSession::new();

        let no_game = send(&mut session, json!({"op": "get_state"}));
        assert_eq!(no_game["ok"], json!(false));
        assert_eq!(no_game["error"], json!("No active game"));

        let bad_setup = send(
            &mut session,
            json!({
                "op": "new_game",
                "setup": {"mode": {"mode": "elimination"}, "player_names": ["Solo"]}
            }),
        );
        assert_eq!(bad_setup["ok"], json!(false));
        assert!(bad_setup["error"].as_str().unwrap().contains("player count"));
    }
}
