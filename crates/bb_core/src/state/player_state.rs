use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;
use rand_distr::StandardNormal;

use super::stats::{BattingStats, PitchingStats, PlateAppearanceResult};
use crate::engine::observer::GameObserver;
use crate::models::{GameEvent, Handedness, PitchLocation, PitchType, PlayerData, PlayerId};

/// Zone top/bottom as a fraction of the batter's height.
const ZONE_TOP_RATIO: f64 = 0.56;
const ZONE_BOTTOM_RATIO: f64 = 0.27;

/// One player for one game: ratings plus the counters events add to.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub data: PlayerData,
    pub batting: BattingStats,
    pub pitching: PitchingStats,
    /// Runners aboard when this player last came to the plate.
    runners_at_plate: u32,
}

impl PlayerState {
    pub fn new(data: PlayerData) -> Self {
        Self { data, batting: BattingStats::default(), pitching: PitchingStats::default(), runners_at_plate: 0 }
    }

    pub fn id(&self) -> PlayerId {
        self.data.id_player
    }

    pub fn bats(&self) -> Handedness {
        self.data.bats
    }

    /// `(sz_top, sz_bot)` in feet.
    pub fn strike_zone(&self) -> (f64, f64) {
        let height_ft = self.data.height_inches as f64 / 12.0;
        (height_ft * ZONE_TOP_RATIO, height_ft * ZONE_BOTTOM_RATIO)
    }

    /// Picks a pitch from the repertoire, weighted by rating and count.
    ///
    /// Behind in the count the fastball family gets a boost; ahead, the
    /// breaking and offspeed pitches do. With two outs the best pitch is
    /// leaned on a little more.
    pub fn choose_pitch(&self, balls: u8, strikes: u8, outs: u8, rng: &mut impl Rng) -> PitchType {
        let pitches: Vec<(PitchType, u16)> =
            self.data.pitches.iter().map(|(&p, &r)| (p, r)).filter(|(_, r)| *r > 0).collect();
        if pitches.is_empty() {
            return PitchType::FourSeamFastball;
        }

        let best = pitches.iter().map(|(_, r)| *r).max().unwrap_or(0);
        let weights: Vec<f64> = pitches
            .iter()
            .map(|&(pitch, rating)| {
                let mut weight = rating as f64;
                if balls > strikes && pitch.is_fastball() {
                    weight *= 1.5;
                }
                if strikes > balls && !pitch.is_fastball() {
                    weight *= 1.5;
                }
                if outs == 2 && rating == best {
                    weight *= 1.2;
                }
                weight
            })
            .collect();

        match WeightedIndex::new(&weights) {
            Ok(dist) => pitches[dist.sample(rng)].0,
            Err(_) => pitches[0].0,
        }
    }

    /// Where this pitcher's `pitch` crosses the plate against `hitter`.
    ///
    /// Pitchers aim for the edges; fastballs are elevated and breaking
    /// pitches buried. Scatter shrinks with control and movement pulls
    /// breaking pitches further down.
    pub fn pitch_location(&self, pitch: PitchType, hitter: &PlayerState, rng: &mut impl Rng) -> PitchLocation {
        let (sz_top, sz_bot) = hitter.strike_zone();
        let center_z = (sz_top + sz_bot) / 2.0;
        let control = self.data.pitching.control as f64 / 1000.0;
        let movement = self.data.pitching.movement as f64 / 1000.0;

        let edge = if rng.gen_bool(0.5) { 0.55 } else { -0.55 };
        let (target_z, break_z) = if pitch.is_fastball() {
            (center_z + 0.35, 0.0)
        } else {
            (center_z - 0.45, -0.3 * movement)
        };

        let spread = 0.3 + (1.0 - control) * 0.7;
        let nx: f64 = rng.sample(StandardNormal);
        let nz: f64 = rng.sample(StandardNormal);

        PitchLocation {
            plate_x: edge + nx * spread,
            plate_z: (target_z + break_z + nz * spread).max(0.0),
            sz_top,
            sz_bot,
        }
    }
}

impl GameObserver for PlayerState {
    fn notify_game_event(&mut self, event: &GameEvent) {
        let id = self.id();
        match event {
            GameEvent::AtBatStart { matchup, runners, .. } => {
                if matchup.hitter == id {
                    self.runners_at_plate = runners.count();
                }
            }
            GameEvent::Pitch { matchup, outcome, .. } => {
                if matchup.pitcher == id {
                    self.pitching.record_pitch(*outcome);
                }
            }
            GameEvent::Single { matchup }
            | GameEvent::Double { matchup }
            | GameEvent::Triple { matchup }
            | GameEvent::HomeRun { matchup }
            | GameEvent::Out { matchup, .. }
            | GameEvent::Walk { matchup }
            | GameEvent::HitByPitch { matchup }
            | GameEvent::Strikeout { matchup, .. } => {
                if let Some((_, result)) = PlateAppearanceResult::from_event(event) {
                    if matchup.hitter == id {
                        self.batting.record_plate_appearance(result);
                        // Outs never move runners, so everyone aboard at the start is stranded.
                        if matches!(event, GameEvent::Out { .. } | GameEvent::Strikeout { .. }) {
                            self.batting.left_on_base += self.runners_at_plate;
                        }
                    }
                    if matchup.pitcher == id {
                        self.pitching.record_batter_faced(result);
                    }
                }
            }
            GameEvent::Run { runner, matchup } => {
                if *runner == id {
                    self.batting.runs += 1;
                }
                if matchup.hitter == id {
                    self.batting.rbi += 1;
                }
                if matchup.pitcher == id {
                    self.pitching.runs_allowed += 1;
                }
            }
            GameEvent::GameStart { .. }
            | GameEvent::GameEnd { .. }
            | GameEvent::HalfInningStart { .. }
            | GameEvent::HalfInningEnd { .. }
            | GameEvent::AtBatEnd { .. }
            | GameEvent::Ball { .. }
            | GameEvent::Strike { .. }
            | GameEvent::Foul { .. }
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
