use crate::engine::observer::GameObserver;
use crate::models::{Base, GameEvent, PitchOutcome, PitchType, StrikeKind, TeamId};

use super::GameDirectory;

/// Human-readable play-by-play, one line per notable event.
#[derive(Debug, Clone)]
pub struct GameLog {
    directory: GameDirectory,
    lines: Vec<String>,
    last_pitch: Option<PitchType>,
}

impl GameLog {
    pub fn new(directory: GameDirectory) -> Self {
        Self { directory, lines: Vec::new(), last_pitch: None }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Hands over the transcript.
    pub fn close(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    fn team_name(&self, id: TeamId) -> String {
        match self.directory.team(id) {
            Some(team) => team.display_name(),
            None => format!("Team {}", id),
        }
    }

    fn abbreviation(&self, id: TeamId) -> String {
        match self.directory.team(id) {
            Some(team) => team.abbreviation.clone(),
            None => id.to_string(),
        }
    }

    fn pitch_name(&self) -> &'static str {
        self.last_pitch.map_or("pitch", |p| p.name())
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn base_name(base: Base) -> &'static str {
    match base {
        Base::First => "first",
        Base::Second => "second",
        Base::Third => "third",
        Base::Home => "home",
    }
}

fn outs_phrase(outs: u8) -> String {
    match outs {
        1 => "1 out".to_string(),
        n => format!("{} outs", n),
    }
}

impl GameObserver for GameLog {
    fn notify_game_event(&mut self, event: &GameEvent) {
        let dir = &self.directory;
        let line = match event {
            GameEvent::GameStart { away, home, timestamp, .. } => Some(format!(
                "{} at {}, {} ({}), {}",
                self.team_name(*away),
                self.team_name(*home),
                dir.park.name,
                dir.park.city,
                timestamp.format("%Y-%m-%d %H:%M UTC")
            )),
            GameEvent::GameEnd { away, home, runs, innings, .. } => Some(format!(
                "Final ({} innings): {} {}, {} {}",
                innings,
                self.abbreviation(*away),
                runs[0],
                self.abbreviation(*home),
                runs[1]
            )),
            GameEvent::HalfInningStart { inning, half, offense, weather, .. } => Some(format!(
                "{} of the {}: {} batting. {}",
                half,
                ordinal(*inning),
                self.team_name(*offense),
                weather
            )),
            GameEvent::HalfInningEnd { inning, half, runners, .. } => Some(format!(
                "End of the {} {}, {} left on base.",
                half.to_string().to_lowercase(),
                ordinal(*inning),
                runners.count()
            )),
            GameEvent::AtBatStart { matchup, outs, runners, .. } => Some(format!(
                "{} faces {}{}, {}.",
                dir.player_name(matchup.hitter),
                dir.player_name(matchup.pitcher),
                if runners.is_loaded() { " with the bases loaded" } else { "" },
                outs_phrase(*outs)
            )),
            GameEvent::AtBatEnd { .. } => None,
            GameEvent::Pitch { pitch, outcome, .. } => {
                self.last_pitch = Some(*pitch);
                match outcome {
                    PitchOutcome::InPlay => Some(format!("  {}, in play.", pitch.name())),
                    PitchOutcome::Ball | PitchOutcome::Strike => None,
                }
            }
            GameEvent::Ball { count, .. } => Some(format!("  {}, ball ({}).", self.pitch_name(), count)),
            GameEvent::Strike { kind, count, .. } => {
                let call = match kind {
                    StrikeKind::Called => "called strike",
                    StrikeKind::Swinging => "swinging strike",
                };
                Some(format!("  {}, {} ({}).", self.pitch_name(), call, count))
            }
            GameEvent::Foul { count, .. } => Some(format!("  {}, fouled off ({}).", self.pitch_name(), count)),
            GameEvent::Single { matchup } => Some(format!("{} singles.", dir.player_name(matchup.hitter))),
            GameEvent::Double { matchup } => Some(format!("{} doubles.", dir.player_name(matchup.hitter))),
            GameEvent::Triple { matchup } => Some(format!("{} triples.", dir.player_name(matchup.hitter))),
            GameEvent::HomeRun { matchup } => Some(format!("{} homers!", dir.player_name(matchup.hitter))),
            GameEvent::Out { matchup, outs } => Some(format!(
                "{} is out, {}.",
                dir.player_name(matchup.hitter),
                outs_phrase(*outs)
            )),
            GameEvent::Walk { matchup } => Some(format!("{} walks.", dir.player_name(matchup.hitter))),
            GameEvent::HitByPitch { matchup } => {
                Some(format!("{} is hit by the pitch.", dir.player_name(matchup.hitter)))
            }
            GameEvent::Strikeout { matchup, outs } => Some(format!(
                "{} strikes out, {}.",
                dir.player_name(matchup.hitter),
                outs_phrase(*outs)
            )),
            GameEvent::Run { runner, .. } => Some(format!("{} scores.", dir.player_name(*runner))),
            GameEvent::Steal { runner, base, .. } => {
                Some(format!("{} steals {}.", dir.player_name(*runner), base_name(*base)))
            }
            GameEvent::StealAttempt { runner, base, .. } => {
                Some(format!("{} breaks for {}.", dir.player_name(*runner), base_name(*base)))
            }
            GameEvent::StealCaught { runner, base, .. } => Some(format!(
                "{} is caught stealing {}.",
                dir.player_name(*runner),
                base_name(*base)
            )),
            GameEvent::Balk { pitcher, .. } => Some(format!("Balk on {}.", dir.player_name(*pitcher))),
            GameEvent::CatcherInterference { matchup, catcher } => Some(format!(
                "Catcher's interference on {}; {} takes first.",
                dir.player_name(*catcher),
                dir.player_name(matchup.hitter)
            )),
        };

        if let Some(line) = line {
            self.lines.push(line);
        }
    }

    fn name(&self) -> &str {
        "GameLog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::directory;
    use crate::models::{BaseRunners, Count, HalfInning, Matchup, PlayerId};

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(21), "21st");
    }

    #[test]
    fn test_lines_use_player_names() {
        let dir = directory();
        let hitter = dir.teams[0].starting_pitcher;
        let pitcher = dir.teams[1].starting_pitcher;
        let matchup = Matchup { hitter, pitcher, offense: dir.teams[0].id, defense: dir.teams[1].id };
        let mut log = GameLog::new(dir.clone());

        log.notify_game_event(&GameEvent::HomeRun { matchup });
        log.notify_game_event(&GameEvent::Run { runner: hitter, matchup });
        log.notify_game_event(&GameEvent::AtBatEnd { matchup, count: Count::default(), outs: 0, lineup_index: 1 });

        let lines = log.close();
        assert_eq!(lines.len(), 2);
        let name = dir.player_name(hitter);
        assert_eq!(lines[0], format!("{} homers!", name));
        assert_eq!(lines[1], format!("{} scores.", name));
        assert!(log.lines().is_empty());
    }

    #[test]
    fn test_at_bat_line_calls_out_loaded_bases() {
        let dir = directory();
        let hitter = dir.teams[0].starting_pitcher;
        let pitcher = dir.teams[1].starting_pitcher;
        let matchup = Matchup { hitter, pitcher, offense: dir.teams[0].id, defense: dir.teams[1].id };
        let loaded = BaseRunners { first: Some(PlayerId(1)), second: Some(PlayerId(2)), third: Some(PlayerId(3)) };
        let mut log = GameLog::new(dir.clone());

        for runners in [BaseRunners::default(), loaded] {
            let event = GameEvent::AtBatStart { matchup, inning: 5, half: HalfInning::Top, outs: 1, runners };
            log.notify_game_event(&event);
        }

        let (h, p) = (dir.player_name(hitter), dir.player_name(pitcher));
        assert_eq!(log.lines()[0], format!("{} faces {}, 1 out.", h, p));
        assert_eq!(log.lines()[1], format!("{} faces {} with the bases loaded, 1 out.", h, p));
    }

    #[test]
    fn test_unknown_player_falls_back_to_id() {
        let dir = directory();
        let matchup =
            Matchup { hitter: PlayerId(9999), pitcher: PlayerId(1), offense: dir.teams[0].id, defense: dir.teams[1].id };
        let mut log = GameLog::new(dir);
        log.notify_game_event(&GameEvent::Walk { matchup });
        assert_eq!(log.lines()[0], "#9999 walks.");
    }
}
