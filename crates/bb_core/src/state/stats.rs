//! Cumulative batting and pitching counters.
//!
//! Counters only ever increase within a game. Rates are derived on demand
//! and return 0 when their denominator is 0.

use serde::{Deserialize, Serialize};

use crate::models::{GameEvent, Matchup, PitchOutcome};

/// How a plate appearance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateAppearanceResult {
    Single,
    Double,
    Triple,
    HomeRun,
    Out,
    Walk,
    HitByPitch,
    Strikeout,
}

impl PlateAppearanceResult {
    /// Classifies the events that end a plate appearance.
    pub fn from_event(event: &GameEvent) -> Option<(Matchup, Self)> {
        let result = match event {
            GameEvent::Single { matchup } => (*matchup, Self::Single),
            GameEvent::Double { matchup } => (*matchup, Self::Double),
            GameEvent::Triple { matchup } => (*matchup, Self::Triple),
            GameEvent::HomeRun { matchup } => (*matchup, Self::HomeRun),
            GameEvent::Out { matchup, .. } => (*matchup, Self::Out),
            GameEvent::Walk { matchup } => (*matchup, Self::Walk),
            GameEvent::HitByPitch { matchup } => (*matchup, Self::HitByPitch),
            GameEvent::Strikeout { matchup, .. } => (*matchup, Self::Strikeout),
            _ => return None,
        };
        Some(result)
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Single | Self::Double | Self::Triple | Self::HomeRun)
    }

    pub fn is_at_bat(&self) -> bool {
        !matches!(self, Self::Walk | Self::HitByPitch)
    }

    pub fn total_bases(&self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::HomeRun => 4,
            Self::Out | Self::Walk | Self::HitByPitch | Self::Strikeout => 0,
        }
    }

    pub fn is_out(&self) -> bool {
        matches!(self, Self::Out | Self::Strikeout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingStats {
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub strikeouts: u32,
    pub left_on_base: u32,
}

impl BattingStats {
    pub fn record_plate_appearance(&mut self, result: PlateAppearanceResult) {
        self.plate_appearances += 1;
        if result.is_at_bat() {
            self.at_bats += 1;
        }
        if result.is_hit() {
            self.hits += 1;
        }
        match result {
            PlateAppearanceResult::Single => self.singles += 1,
            PlateAppearanceResult::Double => self.doubles += 1,
            PlateAppearanceResult::Triple => self.triples += 1,
            PlateAppearanceResult::HomeRun => self.home_runs += 1,
            PlateAppearanceResult::Walk => self.walks += 1,
            PlateAppearanceResult::HitByPitch => self.hit_by_pitch += 1,
            PlateAppearanceResult::Strikeout => self.strikeouts += 1,
            PlateAppearanceResult::Out => {}
        }
    }

    pub fn total_bases(&self) -> u32 {
        self.singles + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }

    pub fn batting_average(&self) -> f64 {
        ratio(self.hits, self.at_bats)
    }

    pub fn on_base_percentage(&self) -> f64 {
        ratio(self.hits + self.walks + self.hit_by_pitch, self.plate_appearances)
    }

    pub fn slugging_percentage(&self) -> f64 {
        ratio(self.total_bases(), self.at_bats)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingStats {
    pub batters_faced: u32,
    pub pitches: u32,
    pub balls: u32,
    pub strikes: u32,
    pub outs_recorded: u32,
    pub hits_allowed: u32,
    pub home_runs_allowed: u32,
    pub runs_allowed: u32,
    pub walks: u32,
    pub hit_batters: u32,
    pub strikeouts: u32,
}

impl PitchingStats {
    /// Balls in play count toward strikes, as on a pitch-count sheet.
    pub fn record_pitch(&mut self, outcome: PitchOutcome) {
        self.pitches += 1;
        match outcome {
            PitchOutcome::Ball => self.balls += 1,
            PitchOutcome::Strike | PitchOutcome::InPlay => self.strikes += 1,
        }
    }

    pub fn record_batter_faced(&mut self, result: PlateAppearanceResult) {
        self.batters_faced += 1;
        if result.is_hit() {
            self.hits_allowed += 1;
        }
        if result.is_out() {
            self.outs_recorded += 1;
        }
        match result {
            PlateAppearanceResult::HomeRun => self.home_runs_allowed += 1,
            PlateAppearanceResult::Walk => self.walks += 1,
            PlateAppearanceResult::HitByPitch => self.hit_batters += 1,
            PlateAppearanceResult::Strikeout => self.strikeouts += 1,
            PlateAppearanceResult::Single
            | PlateAppearanceResult::Double
            | PlateAppearanceResult::Triple
            | PlateAppearanceResult::Out => {}
        }
    }

    /// Innings pitched as a decimal (7 outs = 2.333..).
    pub fn innings_pitched(&self) -> f64 {
        self.outs_recorded as f64 / 3.0
    }

    /// Runs per nine innings; every run is earned since errors are not modeled.
    pub fn earned_run_average(&self) -> f64 {
        if self.outs_recorded == 0 {
            return 0.0;
        }
        self.runs_allowed as f64 * 27.0 / self.outs_recorded as f64
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
