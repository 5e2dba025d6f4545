//! Park and umpire records supplied alongside the rosters.

use serde::{Deserialize, Serialize};

use super::player::{RATING_MAX, RATING_MIN};
use crate::error::{Result, SimError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkData {
    pub id_park: u32,
    pub name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for ParkData {
    fn default() -> Self {
        Self {
            id_park: 0,
            name: "Neutral Park".to_string(),
            city: "Kansas City".to_string(),
            latitude: 39.05,
            longitude: -94.48,
        }
    }
}

/// Zone leniency on the 1-1000 scale; higher calls more borderline strikes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmpireData {
    pub id_umpire: u32,
    pub first_name: String,
    pub last_name: String,
    pub inside: u16,
    pub outside: u16,
    pub high: u16,
    pub low: u16,
}

impl UmpireData {
    pub fn neutral(id_umpire: u32) -> Self {
        Self {
            id_umpire,
            first_name: "Ump".to_string(),
            last_name: format!("#{}", id_umpire),
            inside: 500,
            outside: 500,
            high: 500,
            low: 500,
        }
    }

    /// Every leniency must sit on the rating scale.
    pub fn validate(&self) -> Result<()> {
        let checks = [("inside", self.inside), ("outside", self.outside), ("high", self.high), ("low", self.low)];
        for (field, value) in checks {
            if !(RATING_MIN..=RATING_MAX).contains(&value) {
                return Err(SimError::UmpireRatingOutOfRange {
                    umpire: self.id_umpire,
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmpireCrewData {
    pub home_plate: UmpireData,
    pub first_base: UmpireData,
    pub second_base: UmpireData,
    pub third_base: UmpireData,
}

impl Default for UmpireCrewData {
    fn default() -> Self {
        Self {
            home_plate: UmpireData::neutral(1),
            first_base: UmpireData::neutral(2),
            second_base: UmpireData::neutral(3),
            third_base: UmpireData::neutral(4),
        }
    }
}

impl UmpireCrewData {
    pub fn validate(&self) -> Result<()> {
        for umpire in [&self.home_plate, &self.first_base, &self.second_base, &self.third_base] {
            umpire.validate()?;
        }
        Ok(())
    }
}
