pub mod json_api;
pub mod season;

pub use json_api::{simulate_game, simulate_game_json, GameReport, GameRequest};
pub use season::{simulate_season, simulate_season_json, SeasonReport, Standing};
