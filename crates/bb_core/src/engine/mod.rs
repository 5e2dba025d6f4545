pub mod baserunning;
pub mod clock;
pub mod config;
pub mod game_sim;
pub mod observer;
pub mod pitch_outcome;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use clock::GameClock;
pub use config::GameConfig;
pub use game_sim::{GameOutcome, GameSimulationEngine, InPlayOutcome};
pub use observer::GameObserver;
pub use pitch_outcome::{PitchCall, PitchContext, PitchResolution};
