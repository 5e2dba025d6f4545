use serde::{Deserialize, Serialize};

use crate::engine::observer::GameObserver;
use crate::models::{GameEvent, StrikeKind, UmpireData};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UmpireStation {
    HomePlate,
    FirstBase,
    SecondBase,
    ThirdBase,
}

/// Calls made by the plate umpire over one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmpireCalls {
    pub called_balls: u32,
    pub called_strikes: u32,
    /// Called strikes on pitches outside the geometric zone.
    pub borderline_strikes: u32,
}

/// Read-only zone bias plus a tally of calls. Only the plate umpire
/// tallies; base umpires simply watch.
#[derive(Debug, Clone)]
pub struct UmpireState {
    pub data: UmpireData,
    pub station: UmpireStation,
    pub calls: UmpireCalls,
    last_pitch_outside_zone: bool,
}

impl UmpireState {
    pub fn new(data: UmpireData, station: UmpireStation) -> Self {
        Self { data, station, calls: UmpireCalls::default(), last_pitch_outside_zone: false }
    }

    pub fn inside_leniency(&self) -> f64 {
        self.data.inside as f64 / 1000.0
    }

    pub fn outside_leniency(&self) -> f64 {
        self.data.outside as f64 / 1000.0
    }

    pub fn high_leniency(&self) -> f64 {
        self.data.high as f64 / 1000.0
    }

    pub fn low_leniency(&self) -> f64 {
        self.data.low as f64 / 1000.0
    }

    fn is_plate_umpire(&self) -> bool {
        self.station == UmpireStation::HomePlate
    }
}

impl GameObserver for UmpireState {
    fn notify_game_event(&mut self, event: &GameEvent) {
        if !self.is_plate_umpire() {
            return;
        }
        match event {
            GameEvent::Pitch { location, .. } => {
                self.last_pitch_outside_zone = !location.in_geometric_zone();
            }
            GameEvent::Ball { .. } => self.calls.called_balls += 1,
            GameEvent::Strike { kind, .. } => match kind {
                StrikeKind::Called => {
                    self.calls.called_strikes += 1;
                    if self.last_pitch_outside_zone {
                        self.calls.borderline_strikes += 1;
                    }
                }
                StrikeKind::Swinging => {}
            },
            GameEvent::GameStart { .. }
            | GameEvent::GameEnd { .. }
            | GameEvent::HalfInningStart { .. }
            | GameEvent::HalfInningEnd { .. }
            | GameEvent::AtBatStart { .. }
            | GameEvent::AtBatEnd { .. }
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
