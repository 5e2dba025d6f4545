//! Ball, strike or ball in play for one pitch.
//!
//! The plate umpire rules on the location first. A hitter who takes the
//! pitch gets that call; on a swing, contact quality separates a swinging
//! strike from a ball in play.

use rand::Rng;

use crate::models::{Handedness, PitchLocation, PitchOutcome, PitchType, StrikeKind, PLATE_HALF_WIDTH};
use crate::state::{PlayerState, UmpireState};

/// Beyond this distance (feet) outside the zone nothing is called a strike.
const OVERRIDE_REACH: f64 = 0.25;

/// Swings that make weaker contact than this miss.
const CONTACT_THRESHOLD: f64 = 0.25;

pub struct PitchContext<'a> {
    pub pitch: PitchType,
    pub location: &'a PitchLocation,
    pub hitter: &'a PlayerState,
    pub pitcher: &'a PlayerState,
    pub umpire: &'a UmpireState,
}

/// What the hitter ends up with on one pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchCall {
    Ball,
    Strike(StrikeKind),
    InPlay,
}

impl PitchCall {
    pub fn outcome(self) -> PitchOutcome {
        match self {
            PitchCall::Ball => PitchOutcome::Ball,
            PitchCall::Strike(_) => PitchOutcome::Strike,
            PitchCall::InPlay => PitchOutcome::InPlay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchResolution {
    pub call: PitchCall,
    /// The umpire's call on the location alone.
    pub strike_call: bool,
}

pub fn resolve_pitch(ctx: &PitchContext<'_>, rng: &mut impl Rng) -> PitchResolution {
    let strike_call = is_called_strike(ctx, rng);
    let distance = ctx.location.distance_from_zone_center();

    let swings = rng.gen::<f64>() < swing_likelihood(ctx.hitter, ctx.pitcher, distance);
    if !swings {
        return if strike_call {
            PitchResolution { call: PitchCall::Strike(StrikeKind::Called), strike_call }
        } else {
            PitchResolution { call: PitchCall::Ball, strike_call }
        };
    }

    let random_factor = rng.gen_range(0.85..=1.15);
    if contact_quality(ctx.hitter, ctx.pitcher, ctx.pitch, distance) * random_factor < CONTACT_THRESHOLD {
        PitchResolution { call: PitchCall::Strike(StrikeKind::Swinging), strike_call }
    } else {
        PitchResolution { call: PitchCall::InPlay, strike_call }
    }
}

pub fn swing_likelihood(hitter: &PlayerState, pitcher: &PlayerState, distance: f64) -> f64 {
    let eye = hitter.data.batting.eye as f64 / 1000.0;
    let movement = pitcher.data.pitching.movement as f64 / 1000.0;
    eye * (1.0 - distance * 0.2) * movement
}

/// Contact quality before the random factor.
pub fn contact_quality(hitter: &PlayerState, pitcher: &PlayerState, pitch: PitchType, distance: f64) -> f64 {
    let contact = hitter.data.batting.contact as f64 / 1000.0;
    let avoid_ks = hitter.data.batting.avoid_ks as f64 / 1000.0;
    let stuff = pitcher.data.pitching.stuff as f64 / 1000.0;
    contact * avoid_ks * (1.0 - stuff * pitch.whiff_factor()) * (1.0 - distance * 0.15)
}

/// Strike if the pitch is in the rulebook zone. Outside it the umpire may
/// still ring it up, scaled by closeness and by leniency in the direction
/// of the miss.
fn is_called_strike(ctx: &PitchContext<'_>, rng: &mut impl Rng) -> bool {
    let loc = ctx.location;
    if loc.in_geometric_zone() {
        return true;
    }

    let miss_x = (loc.plate_x.abs() - PLATE_HALF_WIDTH).max(0.0);
    let miss_z = (loc.plate_z - loc.sz_top).max(loc.sz_bot - loc.plate_z).max(0.0);
    let leniency = if miss_x >= miss_z {
        if is_inside(loc.plate_x, batting_side(ctx.hitter, ctx.pitcher)) {
            ctx.umpire.inside_leniency()
        } else {
            ctx.umpire.outside_leniency()
        }
    } else if loc.plate_z > loc.sz_top {
        ctx.umpire.high_leniency()
    } else {
        ctx.umpire.low_leniency()
    };

    let miss = (miss_x * miss_x + miss_z * miss_z).sqrt();
    let probability = leniency * (1.0 - miss / OVERRIDE_REACH).max(0.0);
    rng.gen::<f64>() < probability
}

/// Switch hitters bat from the side opposite the pitcher's throwing arm.
fn batting_side(hitter: &PlayerState, pitcher: &PlayerState) -> Handedness {
    match hitter.bats() {
        Handedness::Switch => match pitcher.data.throws {
            Handedness::Left => Handedness::Right,
            Handedness::Right | Handedness::Switch => Handedness::Left,
        },
        side => side,
    }
}

/// `plate_x` is from the catcher's view: negative is inside to a right-handed hitter.
fn is_inside(plate_x: f64, side: Handedness) -> bool {
    match side {
        Handedness::Left => plate_x > 0.0,
        Handedness::Right | Handedness::Switch => plate_x < 0.0,
    }
}
