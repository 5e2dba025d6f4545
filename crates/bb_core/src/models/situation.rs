use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HalfInning {
    Top,
    Bottom,
}

impl fmt::Display for HalfInning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalfInning::Top => write!(f, "Top"),
            HalfInning::Bottom => write!(f, "Bottom"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Base {
    First,
    Second,
    Third,
    Home,
}

/// Balls and strikes in the current at-bat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.balls, self.strikes)
    }
}

/// Occupancy of the three bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseRunners {
    pub first: Option<PlayerId>,
    pub second: Option<PlayerId>,
    pub third: Option<PlayerId>,
}

impl BaseRunners {
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none() && self.third.is_none()
    }

    pub fn is_loaded(&self) -> bool {
        self.first.is_some() && self.second.is_some() && self.third.is_some()
    }

    pub fn count(&self) -> u32 {
        [self.first, self.second, self.third].iter().filter(|r| r.is_some()).count() as u32
    }

    pub fn clear(&mut self) {
        *self = BaseRunners::default();
    }
}
