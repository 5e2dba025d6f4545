use crate::engine::observer::GameObserver;
use crate::models::{CoachData, GameEvent};

/// Coaching staff member. Watches the game without acting on it yet.
#[derive(Debug, Clone)]
pub struct CoachState {
    pub data: CoachData,
}

impl CoachState {
    pub fn new(data: CoachData) -> Self {
        Self { data }
    }
}

impl GameObserver for CoachState {
    fn notify_game_event(&mut self, event: &GameEvent) {
        match event {
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
            | GameEvent::HomeRun { .. }
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
        &self.data.last_name
    }
}
