//! Per-game state holders. Each one is also a [`GameObserver`](crate::engine::GameObserver).

pub mod coach_state;
pub mod park_state;
pub mod player_state;
pub mod stats;
pub mod team_state;
pub mod umpire_state;
pub mod weather;

pub use coach_state::CoachState;
pub use park_state::ParkState;
pub use player_state::PlayerState;
pub use stats::{BattingStats, PitchingStats, PlateAppearanceResult};
pub use team_state::TeamState;
pub use umpire_state::{UmpireCalls, UmpireState, UmpireStation};
pub use weather::{WeatherState, MAX_CHANGE_PER_MINUTE};
