use chrono::{DateTime, Duration, Utc};

use crate::models::{BaseRunners, Count, HalfInning};

/// Inning, count, outs and base state. Owned by the engine alone.
///
/// Index 0 is the away team, index 1 the home team. The away team bats in
/// the top half.
#[derive(Debug, Clone, PartialEq)]
pub struct GameClock {
    pub inning: u32,
    pub half: HalfInning,
    pub count: Count,
    pub outs: u8,
    pub runners: BaseRunners,
    /// Simulated wall-clock time.
    pub now: DateTime<Utc>,
}

impl GameClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            inning: 1,
            half: HalfInning::Top,
            count: Count::default(),
            outs: 0,
            runners: BaseRunners::default(),
            now: start,
        }
    }

    pub fn is_top_of_inning(&self) -> bool {
        self.half == HalfInning::Top
    }

    pub fn offense(&self) -> usize {
        match self.half {
            HalfInning::Top => 0,
            HalfInning::Bottom => 1,
        }
    }

    /// Always the complement of [`offense`](Self::offense).
    pub fn defense(&self) -> usize {
        1 - self.offense()
    }

    pub fn reset_count(&mut self) {
        self.count = Count::default();
    }

    /// Swaps sides, clearing outs, count and bases. The inning number
    /// only moves on after the bottom half.
    pub fn end_half_inning(&mut self) {
        self.half = match self.half {
            HalfInning::Top => HalfInning::Bottom,
            HalfInning::Bottom => {
                self.inning += 1;
                HalfInning::Top
            }
        };
        self.outs = 0;
        self.reset_count();
        self.runners.clear();
    }

    pub fn advance(&mut self, seconds: u32) {
        self.now += Duration::seconds(seconds as i64);
    }
}
