use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::team::TeamId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScorePitcher {
    pub id_player: PlayerId,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScoreTeam {
    pub id_team: TeamId,
    pub abbreviation: String,
    pub city: String,
    pub nickname: String,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScorePark {
    pub id_park: u32,
    pub name: String,
}

/// Post-game summary. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScore {
    pub id_game: u32,
    pub date_time_start: DateTime<Utc>,
    pub date_time_end: DateTime<Utc>,
    pub park: BoxScorePark,
    pub pitcher_win: BoxScorePitcher,
    pub pitcher_loss: BoxScorePitcher,
    pub team_away: BoxScoreTeam,
    pub team_home: BoxScoreTeam,
    /// Runs per half-inning, `[away, home]`.
    pub inning_runs: [Vec<u32>; 2],
}

impl BoxScore {
    /// One-line score, e.g. `BOS 5 - NYY 3`.
    pub fn headline(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.team_away.abbreviation,
            self.team_away.runs,
            self.team_home.abbreviation,
            self.team_home.runs
        )
    }

    /// Line score table with one column per inning.
    pub fn line_score(&self) -> String {
        let innings = self.inning_runs[0].len().max(self.inning_runs[1].len());
        let mut out = String::from("     ");
        for inning in 1..=innings {
            out.push_str(&format!("{:>3}", inning));
        }
        out.push_str("    R  H  E\n");

        for (team, runs) in [(&self.team_away, &self.inning_runs[0]), (&self.team_home, &self.inning_runs[1])] {
            out.push_str(&format!("{:<5}", team.abbreviation));
            for inning in 0..innings {
                match runs.get(inning) {
                    Some(r) => out.push_str(&format!("{:>3}", r)),
                    None => out.push_str("  X"),
                }
            }
            out.push_str(&format!(" {:>4}{:>3}{:>3}\n", team.runs, team.hits, team.errors));
        }
        out
    }
}
