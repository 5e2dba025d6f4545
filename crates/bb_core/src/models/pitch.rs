use serde::{Deserialize, Serialize};

/// Pitch types that can appear in a repertoire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "camelCase")]
pub enum PitchType {
    FourSeamFastball,
    TwoSeamFastball,
    Sinker,
    Cutter,
    Splitter,
    Forkball,
    Changeup,
    Screwball,
    Slider,
    Sweeper,
    Slurve,
    Curveball,
    KnuckleCurve,
    Knuckleball,
}

impl PitchType {
    pub fn name(&self) -> &'static str {
        match self {
            PitchType::FourSeamFastball => "four-seam fastball",
            PitchType::TwoSeamFastball => "two-seam fastball",
            PitchType::Sinker => "sinker",
            PitchType::Cutter => "cutter",
            PitchType::Splitter => "splitter",
            PitchType::Forkball => "forkball",
            PitchType::Changeup => "changeup",
            PitchType::Screwball => "screwball",
            PitchType::Slider => "slider",
            PitchType::Sweeper => "sweeper",
            PitchType::Slurve => "slurve",
            PitchType::Curveball => "curveball",
            PitchType::KnuckleCurve => "knuckle curve",
            PitchType::Knuckleball => "knuckleball",
        }
    }

    /// Relative difficulty of making contact against this pitch.
    pub fn whiff_factor(&self) -> f64 {
        match self {
            PitchType::FourSeamFastball => 0.18,
            PitchType::TwoSeamFastball => 0.19,
            PitchType::Sinker => 0.20,
            PitchType::Cutter => 0.23,
            PitchType::Knuckleball => 0.27,
            PitchType::Screwball => 0.28,
            PitchType::Changeup => 0.30,
            PitchType::Curveball => 0.31,
            PitchType::Slurve => 0.31,
            PitchType::Forkball => 0.32,
            PitchType::Splitter => 0.33,
            PitchType::KnuckleCurve => 0.33,
            PitchType::Slider => 0.34,
            PitchType::Sweeper => 0.37,
        }
    }

    /// Fastball family, favoured when the pitcher is behind in the count.
    pub fn is_fastball(&self) -> bool {
        matches!(
            self,
            PitchType::FourSeamFastball
                | PitchType::TwoSeamFastball
                | PitchType::Sinker
                | PitchType::Cutter
        )
    }
}

/// Where the pitch crossed the plate, in feet, catcher's view.
///
/// `plate_x` is horizontal offset from the middle of the plate; `plate_z`
/// is height above the ground. `sz_top`/`sz_bot` are the batter's zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchLocation {
    pub plate_x: f64,
    pub plate_z: f64,
    pub sz_top: f64,
    pub sz_bot: f64,
}

/// Half the plate width plus the ball's radius, in feet.
pub const PLATE_HALF_WIDTH: f64 = 0.85;

impl PitchLocation {
    pub fn in_geometric_zone(&self) -> bool {
        self.plate_x.abs() <= PLATE_HALF_WIDTH
            && self.plate_z >= self.sz_bot
            && self.plate_z <= self.sz_top
    }

    pub fn zone_center_z(&self) -> f64 {
        (self.sz_top + self.sz_bot) / 2.0
    }

    /// Euclidean distance from the center of the strike zone.
    pub fn distance_from_zone_center(&self) -> f64 {
        let dz = self.plate_z - self.zone_center_z();
        (self.plate_x * self.plate_x + dz * dz).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PitchOutcome {
    Ball,
    Strike,
    InPlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrikeKind {
    Called,
    Swinging,
}
