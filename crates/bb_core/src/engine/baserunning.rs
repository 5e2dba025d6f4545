//! Runner advancement. Each function mutates the bases and returns the
//! runners who crossed the plate, lead runner first.

use crate::models::{BaseRunners, PlayerId};

/// Bases the batter takes on a hit that stays in the park.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseHit {
    Single,
    Double,
    Triple,
}

pub fn advance_on_hit(runners: &mut BaseRunners, batter: PlayerId, hit: BaseHit) -> Vec<PlayerId> {
    let mut scored = Vec::new();
    match hit {
        BaseHit::Single => {
            scored.extend(runners.third.take());
            runners.third = runners.second.take();
            runners.second = runners.first.take();
            runners.first = Some(batter);
        }
        BaseHit::Double => {
            scored.extend(runners.third.take());
            scored.extend(runners.second.take());
            runners.third = runners.first.take();
            runners.second = Some(batter);
        }
        BaseHit::Triple => {
            scored.extend(runners.third.take());
            scored.extend(runners.second.take());
            scored.extend(runners.first.take());
            runners.third = Some(batter);
        }
    }
    scored
}

/// Clears the bases; the batter scores last.
pub fn advance_on_home_run(runners: &mut BaseRunners, batter: PlayerId) -> Vec<PlayerId> {
    let mut scored = advance_on_hit(runners, batter, BaseHit::Triple);
    runners.third = None;
    scored.push(batter);
    scored
}

/// Walk or hit-by-pitch: only forced runners move.
pub fn force_advance(runners: &mut BaseRunners, batter: PlayerId) -> Vec<PlayerId> {
    let mut scored = Vec::new();
    if runners.first.is_some() {
        if runners.second.is_some() {
            if runners.third.is_some() {
                scored.extend(runners.third.take());
            }
            runners.third = runners.second.take();
        }
        runners.second = runners.first.take();
    }
    runners.first = Some(batter);
    scored
}
