//! Many independent games at once.
//!
//! Each game owns its engine, RNG and state holders, so games share
//! nothing and run on the rayon pool without locking.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::json_api::{simulate_game, GameReport, GameRequest};
use crate::error::Result;
use crate::models::{BoxScoreTeam, TeamId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub id_team: TeamId,
    pub abbreviation: String,
    pub wins: u32,
    pub losses: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

impl Standing {
    fn new(team: &BoxScoreTeam) -> Self {
        Self {
            id_team: team.id_team,
            abbreviation: team.abbreviation.clone(),
            wins: 0,
            losses: 0,
            runs_scored: 0,
            runs_allowed: 0,
        }
    }

    pub fn winning_percentage(&self) -> f64 {
        let games = self.wins + self.losses;
        if games == 0 {
            return 0.0;
        }
        self.wins as f64 / games as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonReport {
    /// In request order.
    pub games: Vec<GameReport>,
    /// Best record first.
    pub standings: Vec<Standing>,
}

/// Simulates every request in parallel. The first failing game aborts
/// the season.
pub fn simulate_season(requests: Vec<GameRequest>) -> Result<SeasonReport> {
    let total = requests.len();
    let games: Vec<GameReport> = requests.into_par_iter().map(simulate_game).collect::<Result<_>>()?;
    let standings = standings(&games);
    info!(games = total, teams = standings.len(), "Season simulated");
    Ok(SeasonReport { games, standings })
}

pub fn simulate_season_json(requests_json: &str) -> Result<String> {
    let requests: Vec<GameRequest> = serde_json::from_str(requests_json)?;
    Ok(serde_json::to_string(&simulate_season(requests)?)?)
}

fn standings(games: &[GameReport]) -> Vec<Standing> {
    let mut table: BTreeMap<TeamId, Standing> = BTreeMap::new();
    for game in games {
        let (away, home) = (&game.box_score.team_away, &game.box_score.team_home);
        for (team, other) in [(away, home), (home, away)] {
            let row = table.entry(team.id_team).or_insert_with(|| Standing::new(team));
            row.runs_scored += team.runs;
            row.runs_allowed += other.runs;
            if team.runs > other.runs {
                row.wins += 1;
            } else if team.runs < other.runs {
                row.losses += 1;
            }
        }
    }

    let mut rows: Vec<Standing> = table.into_values().collect();
    rows.sort_by(|a, b| {
        b.winning_percentage()
            .total_cmp(&a.winning_percentage())
            .then_with(|| a.id_team.cmp(&b.id_team))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::team_data;
    use crate::models::{ParkData, UmpireCrewData};

    fn series(games: u32) -> Vec<GameRequest> {
        (0..games)
            .map(|i| {
                let (away, home) = if i % 2 == 0 { (1, 2) } else { (2, 1) };
                GameRequest {
                    id_game: i,
                    seed: Some(1000 + i as u64),
                    config: None,
                    park: ParkData::default(),
                    umpires: UmpireCrewData::default(),
                    teams: vec![team_data(away, away * 100), team_data(home, home * 100)],
                }
            })
            .collect()
    }

    #[test]
    fn test_every_game_is_decided() {
        let report = simulate_season(series(6)).unwrap();
        assert_eq!(report.games.len(), 6);
        let wins: u32 = report.standings.iter().map(|s| s.wins).sum();
        let losses: u32 = report.standings.iter().map(|s| s.losses).sum();
        assert_eq!(wins, 6);
        assert_eq!(losses, 6);
    }

    #[test]
    fn test_games_keep_request_order() {
        let report = simulate_season(series(4)).unwrap();
        let ids: Vec<u32> = report.games.iter().map(|g| g.box_score.id_game).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let season = simulate_season(series(3)).unwrap();
        for (request, game) in series(3).into_iter().zip(&season.games) {
            let alone = simulate_game(request).unwrap();
            assert_eq!(alone.box_score, game.box_score);
        }
    }

    #[test]
    fn test_standings_sorted_by_record() {
        let report = simulate_season(series(5)).unwrap();
        let pcts: Vec<f64> = report.standings.iter().map(|s| s.winning_percentage()).collect();
        assert!(pcts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_empty_standing_percentage_is_zero() {
        let standing = Standing {
            id_team: TeamId(1),
            abbreviation: "T1".to_string(),
            wins: 0,
            losses: 0,
            runs_scored: 0,
            runs_allowed: 0,
        };
        assert_eq!(standing.winning_percentage(), 0.0);
    }
}
