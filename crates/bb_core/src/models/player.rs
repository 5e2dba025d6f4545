use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::pitch::PitchType;
use crate::error::{Result, SimError};

/// Lowest value on the rating scale.
pub const RATING_MIN: u16 = 1;
/// Highest value on the rating scale.
pub const RATING_MAX: u16 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The nine defensive positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
}

impl Position {
    pub const ALL: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    /// Positions filled after the pitcher, in assignment order.
    pub const FIELD: [Position; 8] = [
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Handedness {
    #[default]
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "S")]
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingRatings {
    pub contact: u16,
    pub gap: u16,
    pub power: u16,
    pub eye: u16,
    pub avoid_ks: u16,
}

impl BattingRatings {
    /// `contact + power + eye + gap + avoidKs`, used for lineup ordering.
    pub fn composite(&self) -> u32 {
        self.contact as u32
            + self.power as u32
            + self.eye as u32
            + self.gap as u32
            + self.avoid_ks as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingRatings {
    pub stuff: u16,
    pub movement: u16,
    pub control: u16,
    #[serde(default = "default_stamina")]
    pub stamina: u16,
}

fn default_stamina() -> u16 {
    500
}

impl PitchingRatings {
    /// `stuff + movement + control`, used to pick the starting pitcher.
    pub fn composite(&self) -> u32 {
        self.stuff as u32 + self.movement as u32 + self.control as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldingRatings {
    pub pitcher: u16,
    pub catcher: u16,
    pub first_base: u16,
    pub second_base: u16,
    pub third_base: u16,
    pub shortstop: u16,
    pub left_field: u16,
    pub center_field: u16,
    pub right_field: u16,
}

impl FieldingRatings {
    pub fn get(&self, position: Position) -> u16 {
        match position {
            Position::Pitcher => self.pitcher,
            Position::Catcher => self.catcher,
            Position::FirstBase => self.first_base,
            Position::SecondBase => self.second_base,
            Position::ThirdBase => self.third_base,
            Position::Shortstop => self.shortstop,
            Position::LeftField => self.left_field,
            Position::CenterField => self.center_field,
            Position::RightField => self.right_field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningRatings {
    pub speed: u16,
    pub stealing: u16,
    pub baserunning: u16,
}

/// Pitch type → rating. Pitches missing from the map are not thrown.
pub type PitchRepertoire = BTreeMap<PitchType, u16>;

/// Player record as supplied by the roster loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub id_player: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bats: Handedness,
    #[serde(default)]
    pub throws: Handedness,
    #[serde(default = "default_height")]
    pub height_inches: u8,
    pub batting: BattingRatings,
    pub pitching: PitchingRatings,
    pub fielding: FieldingRatings,
    #[serde(default)]
    pub pitches: PitchRepertoire,
    pub running: RunningRatings,
}

fn default_height() -> u8 {
    72
}

impl PlayerData {
    /// Rejects any rating outside `RATING_MIN..=RATING_MAX`.
    pub fn validate(&self) -> Result<()> {
        let b = &self.batting;
        let p = &self.pitching;
        let r = &self.running;
        let mut checks: Vec<(&str, u16)> = vec![
            ("batting.contact", b.contact),
            ("batting.gap", b.gap),
            ("batting.power", b.power),
            ("batting.eye", b.eye),
            ("batting.avoidKs", b.avoid_ks),
            ("pitching.stuff", p.stuff),
            ("pitching.movement", p.movement),
            ("pitching.control", p.control),
            ("pitching.stamina", p.stamina),
            ("running.speed", r.speed),
            ("running.stealing", r.stealing),
            ("running.baserunning", r.baserunning),
        ];
        for position in Position::ALL {
            checks.push((position.abbreviation(), self.fielding.get(position)));
        }
        for (&pitch, &rating) in &self.pitches {
            checks.push((pitch.name(), rating));
        }

        for (field, value) in checks {
            if !(RATING_MIN..=RATING_MAX).contains(&value) {
                return Err(SimError::RatingOutOfRange {
                    player: self.id_player,
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::player_data;

    #[test]
    fn test_batting_composite_sums_all_five() {
        let ratings = BattingRatings { contact: 1, gap: 2, power: 3, eye: 4, avoid_ks: 5 };
        assert_eq!(ratings.composite(), 15);
    }

    #[test]
    fn test_validate_rejects_zero_rating() {
        let mut player = player_data(1, 500);
        player.batting.eye = 0;
        let err = player.validate().unwrap_err();
        assert!(matches!(err, SimError::RatingOutOfRange { value: 0, .. }));
    }

    #[test]
    fn test_validate_rejects_repertoire_overflow() {
        let mut player = player_data(1, 500);
        player.pitches.insert(PitchType::Slider, 1001);
        assert!(player.validate().is_err());
    }

    #[test]
    fn test_position_serde_uses_scorebook_codes() {
        let json = serde_json::to_string(&Position::Shortstop).unwrap();
        assert_eq!(json, "\"SS\"");
        let back: Position = serde_json::from_str("\"1B\"").unwrap();
        assert_eq!(back, Position::FirstBase);
    }
}
