use serde::{Deserialize, Serialize};

use crate::engine::{GameConfig, GameSimulationEngine};
use crate::error::Result;
use crate::models::{BoxScore, ParkData, TeamData, UmpireCrewData};
use crate::observers::StoreReceipt;

/// One game to simulate. `teams` is `[away, home]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    pub id_game: u32,
    /// Overrides `config.seed` when present.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub config: Option<GameConfig>,
    #[serde(default)]
    pub park: ParkData,
    #[serde(default)]
    pub umpires: UmpireCrewData,
    pub teams: Vec<TeamData>,
}

impl GameRequest {
    pub fn resolved_config(&self) -> GameConfig {
        let mut config = self.config.clone().unwrap_or_default();
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }

    pub fn into_engine(self) -> Result<GameSimulationEngine> {
        let config = self.resolved_config();
        GameSimulationEngine::new(self.id_game, self.teams, self.park, self.umpires, config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub box_score: BoxScore,
    pub log: Vec<String>,
    pub event_count: usize,
    pub store: StoreReceipt,
}

pub fn simulate_game(request: GameRequest) -> Result<GameReport> {
    let outcome = request.into_engine()?.simulate()?;
    Ok(GameReport {
        event_count: outcome.event_count(),
        box_score: outcome.box_score,
        log: outcome.log,
        store: outcome.store,
    })
}

/// JSON in, JSON out: a [`GameRequest`] becomes a [`GameReport`].
pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    let report = simulate_game(request)?;
    Ok(serde_json::to_string(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::team_data;
    use crate::error::SimError;

    fn request(seed: u64) -> GameRequest {
        GameRequest {
            id_game: 77,
            seed: Some(seed),
            config: None,
            park: ParkData::default(),
            umpires: UmpireCrewData::default(),
            teams: vec![team_data(1, 100), team_data(2, 200)],
        }
    }

    #[test]
    fn test_seed_overrides_config() {
        let mut req = request(9);
        req.config = Some(GameConfig { seed: 1, num_innings: 7, ..GameConfig::default() });
        let config = req.resolved_config();
        assert_eq!(config.seed, 9);
        assert_eq!(config.num_innings, 7);
    }

    #[test]
    fn test_json_round_trip_report() {
        let json = serde_json::to_string(&request(5)).unwrap();
        let out = simulate_game_json(&json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["boxScore"]["idGame"], 77);
        assert!(value["eventCount"].as_u64().unwrap() > 0);
        assert!(value["log"].as_array().unwrap().len() > 10);
        assert!(value["store"]["path"].is_null());
        assert_eq!(value["boxScore"]["inningRuns"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_same_request_same_report() {
        let a = simulate_game(request(21)).unwrap();
        let b = simulate_game(request(21)).unwrap();
        assert_eq!(a.box_score, b.box_score);
        assert_eq!(a.log, b.log);
    }

    #[test]
    fn test_minimal_request_uses_defaults() {
        let teams = serde_json::to_string(&vec![team_data(1, 100), team_data(2, 200)]).unwrap();
        let json = format!(r#"{{"idGame": 3, "teams": {}}}"#, teams);
        let out = simulate_game_json(&json).unwrap();
        assert!(out.contains("Neutral Park"));
    }

    #[test]
    fn test_teams_without_abbreviation_are_accepted() {
        let mut teams = serde_json::to_value(vec![team_data(1, 100), team_data(2, 200)]).unwrap();
        for (team, city) in teams.as_array_mut().unwrap().iter_mut().zip(["Boston", "New York"]) {
            let fields = team.as_object_mut().unwrap();
            fields.remove("abbreviation");
            fields.insert("city".to_string(), serde_json::Value::from(city));
        }
        let json = serde_json::json!({ "idGame": 4, "seed": 8, "teams": teams }).to_string();

        let out = simulate_game_json(&json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["boxScore"]["teamAway"]["abbreviation"], "BOS");
        assert_eq!(value["boxScore"]["teamHome"]["abbreviation"], "NEW");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(simulate_game_json("{"), Err(SimError::Json(_))));
    }

    #[test]
    fn test_single_team_is_rejected() {
        let mut req = request(1);
        req.teams.pop();
        assert!(matches!(simulate_game(req), Err(SimError::InvalidTeamCount { found: 1 })));
    }
}
