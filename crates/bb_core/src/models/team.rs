use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::PlayerData;
use crate::error::{Result, SimError};

/// Players needed to fill every defensive position.
pub const MIN_ROSTER_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CoachRole {
    #[default]
    Manager,
    BenchCoach,
    PitchingCoach,
    HittingCoach,
    FirstBaseCoach,
    ThirdBaseCoach,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachData {
    pub id_coach: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: CoachRole,
}

/// Team roster as supplied by the roster loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    pub id_team: TeamId,
    /// Derived from the city when missing.
    #[serde(default)]
    pub abbreviation: String,
    pub nickname: String,
    pub city: String,
    pub players: Vec<PlayerData>,
    #[serde(default)]
    pub coaches: Vec<CoachData>,
}

impl TeamData {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.city, self.nickname)
    }

    pub fn validate(&self) -> Result<()> {
        if self.players.len() < MIN_ROSTER_SIZE {
            return Err(SimError::InsufficientRoster {
                team: self.id_team,
                found: self.players.len(),
                required: MIN_ROSTER_SIZE,
            });
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(player.id_player) {
                return Err(SimError::DuplicatePlayer { id: player.id_player });
            }
            player.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::team_data;

    #[test]
    fn test_validate_short_roster() {
        let mut team = team_data(1, 100);
        team.players.truncate(8);
        let err = team.validate().unwrap_err();
        assert!(matches!(err, SimError::InsufficientRoster { found: 8, required: 9, .. }));
    }

    #[test]
    fn test_validate_duplicate_player() {
        let mut team = team_data(1, 100);
        let dup = team.players[0].clone();
        team.players.push(dup);
        assert!(matches!(team.validate(), Err(SimError::DuplicatePlayer { .. })));
    }

    #[test]
    fn test_team_json_shape() {
        let json = r#"{
            "idTeam": 7,
            "abbreviation": "BOS",
            "nickname": "Red Sox",
            "city": "Boston",
            "players": []
        }"#;
        let team: TeamData = serde_json::from_str(json).unwrap();
        assert_eq!(team.id_team, TeamId(7));
        assert!(team.coaches.is_empty());
        assert_eq!(team.display_name(), "Boston Red Sox");
    }
}
