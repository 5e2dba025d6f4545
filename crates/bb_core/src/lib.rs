//! # bb_core - Deterministic Baseball Game Simulation Engine
//!
//! Simulates a baseball game pitch by pitch and broadcasts every state
//! change to a fixed set of observers (team and player statistics,
//! umpires, park, play-by-play log, box score, event store).
//!
//! ## Features
//! - Deterministic simulation (same seed and rosters = same event stream)
//! - Rate-limited weather model sampled each half-inning
//! - JSON API and a parallel season runner
//!
//! ```no_run
//! let request = std::fs::read_to_string("game.json").unwrap();
//! let report = bb_core::simulate_game_json(&request).unwrap();
//! println!("{}", report);
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Engine setup takes roster, park, crew and config together
#![allow(clippy::too_many_arguments)]
// Large enum variants - boxing would require API changes
#![allow(clippy::large_enum_variant)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod observers;
pub mod state;

pub use api::{
    simulate_game, simulate_game_json, simulate_season, simulate_season_json, GameReport, GameRequest,
    SeasonReport, Standing,
};
pub use engine::{GameConfig, GameObserver, GameOutcome, GameSimulationEngine};
pub use error::{Result, SimError, StoreError};
pub use models::{BoxScore, GameEvent};
pub use observers::{BoxScoreBuilder, EventStore, GameLog, StoreReceipt};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::team_data;
    use serde_json::json;

    #[test]
    fn test_basic_simulation() {
        let request = json!({
            "idGame": 1,
            "seed": 42,
            "park": {
                "idPark": 3,
                "name": "Fenway Park",
                "city": "Boston",
                "latitude": 42.35,
                "longitude": -71.10
            },
            "teams": [team_data(1, 100), team_data(2, 200)]
        });

        let result = simulate_game_json(&request.to_string());
        assert!(result.is_ok(), "Simulation should succeed: {:?}", result.err());

        let parsed: serde_json::Value = serde_json::from_str(&result.unwrap()).unwrap();
        assert_eq!(parsed["boxScore"]["park"]["name"], "Fenway Park");
        assert!(parsed["boxScore"]["teamAway"]["runs"].is_number());
        assert!(parsed["boxScore"]["teamHome"]["runs"].is_number());
        assert_ne!(parsed["boxScore"]["teamAway"]["runs"], parsed["boxScore"]["teamHome"]["runs"]);
    }

    #[test]
    fn test_determinism() {
        let request = json!({
            "idGame": 9,
            "seed": 12345,
            "teams": [team_data(1, 100), team_data(2, 200)]
        })
        .to_string();

        let first = simulate_game_json(&request).unwrap();
        let second = simulate_game_json(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
