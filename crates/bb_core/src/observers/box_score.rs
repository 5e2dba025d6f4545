use chrono::{DateTime, Utc};

use crate::engine::observer::GameObserver;
use crate::models::{BoxScore, BoxScorePark, BoxScorePitcher, BoxScoreTeam, GameEvent, PlayerId};

use super::{GameDirectory, TeamInfo};

/// Accumulates the line score and decisions; [`close`](Self::close)
/// produces the finished [`BoxScore`].
#[derive(Debug, Clone)]
pub struct BoxScoreBuilder {
    directory: GameDirectory,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    inning_runs: [Vec<u32>; 2],
    runs: [u32; 2],
    hits: [u32; 2],
    /// Team that last took the lead and the pitcher who gave it up.
    go_ahead: Option<(usize, PlayerId)>,
}

impl BoxScoreBuilder {
    pub fn new(directory: GameDirectory) -> Self {
        Self {
            directory,
            start: None,
            end: None,
            inning_runs: [Vec::new(), Vec::new()],
            runs: [0, 0],
            hits: [0, 0],
            go_ahead: None,
        }
    }

    fn pitcher(&self, id: PlayerId) -> BoxScorePitcher {
        let (first_name, last_name) = match self.directory.player(id) {
            Some(p) => (p.first_name.clone(), p.last_name.clone()),
            None => (String::new(), format!("#{}", id)),
        };
        BoxScorePitcher { id_player: id, first_name, last_name }
    }

    fn team(&self, index: usize) -> BoxScoreTeam {
        let TeamInfo { id, abbreviation, city, nickname, .. } = self.directory.teams[index].clone();
        BoxScoreTeam {
            id_team: id,
            abbreviation,
            city,
            nickname,
            runs: self.runs[index],
            hits: self.hits[index],
            errors: 0,
        }
    }

    /// Winner credited to the winning starter; loss charged to whoever
    /// allowed the final go-ahead run.
    pub fn close(&mut self) -> BoxScore {
        let winner = if self.runs[0] > self.runs[1] { 0 } else { 1 };
        let loser = 1 - winner;
        let pitcher_win = self.directory.teams[winner].starting_pitcher;
        let pitcher_loss = match self.go_ahead {
            Some((team, pitcher)) if team == winner => pitcher,
            _ => self.directory.teams[loser].starting_pitcher,
        };
        let start = self.start.unwrap_or_default();

        BoxScore {
            id_game: self.directory.id_game,
            date_time_start: start,
            date_time_end: self.end.unwrap_or(start),
            park: BoxScorePark { id_park: self.directory.park.id_park, name: self.directory.park.name.clone() },
            pitcher_win: self.pitcher(pitcher_win),
            pitcher_loss: self.pitcher(pitcher_loss),
            team_away: self.team(0),
            team_home: self.team(1),
            inning_runs: self.inning_runs.clone(),
        }
    }
}

impl GameObserver for BoxScoreBuilder {
    fn notify_game_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStart { timestamp, .. } => self.start = Some(*timestamp),
            GameEvent::GameEnd { timestamp, .. } => self.end = Some(*timestamp),
            GameEvent::HalfInningStart { offense, .. } => {
                if let Some(i) = self.directory.team_index(*offense) {
                    self.inning_runs[i].push(0);
                }
            }
            GameEvent::Single { matchup }
            | GameEvent::Double { matchup }
            | GameEvent::Triple { matchup }
            | GameEvent::HomeRun { matchup } => {
                if let Some(i) = self.directory.team_index(matchup.offense) {
                    self.hits[i] += 1;
                }
            }
            GameEvent::Run { matchup, .. } => {
                if let Some(i) = self.directory.team_index(matchup.offense) {
                    let tied_before = self.runs[i] == self.runs[1 - i];
                    self.runs[i] += 1;
                    if let Some(last) = self.inning_runs[i].last_mut() {
                        *last += 1;
                    }
                    if tied_before {
                        self.go_ahead = Some((i, matchup.pitcher));
                    }
                }
            }
            GameEvent::HalfInningEnd { .. }
            | GameEvent::AtBatStart { .. }
            | GameEvent::AtBatEnd { .. }
            | GameEvent::Pitch { .. }
            | GameEvent::Ball { .. }
            | GameEvent::Strike { .. }
            | GameEvent::Foul { .. }
            | GameEvent::Out { .. }
            | GameEvent::Walk { .. }
            | GameEvent::HitByPitch { .. }
            | GameEvent::Strikeout { .. }
            | GameEvent::Steal { .. }
            | GameEvent::StealAttempt { .. }
            | GameEvent::StealCaught { .. }
            | GameEvent::Balk { .. }
            | GameEvent::CatcherInterference { .. } => {}
        }
    }

    fn name(&self) -> &str {
        "BoxScoreBuilder"
    }
}
