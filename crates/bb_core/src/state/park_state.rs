use crate::engine::observer::GameObserver;
use crate::models::{GameEvent, ParkData};

/// Static park attributes. Passes events through, counting home runs.
#[derive(Debug, Clone)]
pub struct ParkState {
    pub data: ParkData,
    pub home_runs: u32,
}

impl ParkState {
    pub fn new(data: ParkData) -> Self {
        Self { data, home_runs: 0 }
    }

    pub fn latitude(&self) -> f64 {
        self.data.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.data.longitude
    }
}

impl GameObserver for ParkState {
    fn notify_game_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::HomeRun { .. } => self.home_runs += 1,
            GameEvent::GameStart { .. }
            | GameEvent::GameEnd { .. }
            | GameEvent::HalfInningStart { .. }
            | GameEvent::HalfInningEnd { .. }
            | GameEvent::AtBatStart { .. }
            | GameEvent::AtBatEnd { .. }
            | GameEvent::Pitch { .. }
            | GameEvent::Ball { .. }
            | GameEvent::Strike { .. }
            | GameEvent::Foul { .. }
            | GameEvent::Single { .. }
            | GameEvent::Double { .. }
            | GameEvent::Triple { .. }
            | GameEvent::Out { .. }
            | GameEvent::Walk { .. }
            | GameEvent::HitByPitch { .. }
            | GameEvent::Strikeout { .. }
            | GameEvent::Run { .. }
            | GameEvent::Steal { .. }
            | GameEvent::StealAttempt { .. }
            | GameEvent::StealCaught { .. }
            | GameEvent::Balk { .. }
            | GameEvent::CatcherInterference { .. } => {}
        }
    }

    fn name(&self) -> &str {
        &self.data.name
    }
}
