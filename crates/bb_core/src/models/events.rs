use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pitch::{PitchLocation, PitchOutcome, PitchType, StrikeKind};
use super::player::PlayerId;
use super::situation::{Base, BaseRunners, Count, HalfInning};
use super::team::TeamId;
use super::weather::WeatherSample;

/// The batter/pitcher pairing an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub hitter: PlayerId,
    pub pitcher: PlayerId,
    pub offense: TeamId,
    pub defense: TeamId,
}

/// Every state change the engine publishes to its observers.
///
/// The set is closed: observers match on it exhaustively, so adding a
/// variant is a compile error everywhere it is not handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    #[serde(rename_all = "camelCase")]
    GameStart {
        id_game: u32,
        away: TeamId,
        home: TeamId,
        id_park: u32,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    GameEnd {
        away: TeamId,
        home: TeamId,
        /// `[away, home]`
        runs: [u32; 2],
        innings: u32,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    HalfInningStart {
        inning: u32,
        half: HalfInning,
        offense: TeamId,
        defense: TeamId,
        weather: WeatherSample,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    HalfInningEnd {
        inning: u32,
        half: HalfInning,
        offense: TeamId,
        defense: TeamId,
        /// Runners stranded when the third out was made.
        runners: BaseRunners,
    },
    #[serde(rename_all = "camelCase")]
    AtBatStart {
        matchup: Matchup,
        inning: u32,
        half: HalfInning,
        outs: u8,
        runners: BaseRunners,
    },
    #[serde(rename_all = "camelCase")]
    AtBatEnd {
        matchup: Matchup,
        /// Count after the reset (always 0-0).
        count: Count,
        outs: u8,
        /// Offense lineup slot due up next.
        lineup_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    Pitch {
        matchup: Matchup,
        pitch: PitchType,
        location: PitchLocation,
        outcome: PitchOutcome,
        /// Count before the pitch.
        count: Count,
        /// Whether the plate umpire called the location a strike.
        strike_call: bool,
    },
    Ball {
        matchup: Matchup,
        count: Count,
    },
    Strike {
        matchup: Matchup,
        kind: StrikeKind,
        count: Count,
    },
    Foul {
        matchup: Matchup,
        count: Count,
    },
    Single {
        matchup: Matchup,
    },
    Double {
        matchup: Matchup,
    },
    Triple {
        matchup: Matchup,
    },
    HomeRun {
        matchup: Matchup,
    },
    Out {
        matchup: Matchup,
        outs: u8,
    },
    Walk {
        matchup: Matchup,
    },
    HitByPitch {
        matchup: Matchup,
    },
    Strikeout {
        matchup: Matchup,
        outs: u8,
    },
    Run {
        runner: PlayerId,
        matchup: Matchup,
    },
    Steal {
        runner: PlayerId,
        base: Base,
        offense: TeamId,
        defense: TeamId,
    },
    StealAttempt {
        runner: PlayerId,
        base: Base,
        offense: TeamId,
        defense: TeamId,
    },
    StealCaught {
        runner: PlayerId,
        base: Base,
        offense: TeamId,
        defense: TeamId,
    },
    Balk {
        pitcher: PlayerId,
        offense: TeamId,
        defense: TeamId,
    },
    CatcherInterference {
        matchup: Matchup,
        catcher: PlayerId,
    },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::GameStart { .. } => "gameStart",
            GameEvent::GameEnd { .. } => "gameEnd",
            GameEvent::HalfInningStart { .. } => "halfInningStart",
            GameEvent::HalfInningEnd { .. } => "halfInningEnd",
            GameEvent::AtBatStart { .. } => "atBatStart",
            GameEvent::AtBatEnd { .. } => "atBatEnd",
            GameEvent::Pitch { .. } => "pitch",
            GameEvent::Ball { .. } => "ball",
            GameEvent::Strike { .. } => "strike",
            GameEvent::Foul { .. } => "foul",
            GameEvent::Single { .. } => "single",
            GameEvent::Double { .. } => "double",
            GameEvent::Triple { .. } => "triple",
            GameEvent::HomeRun { .. } => "homeRun",
            GameEvent::Out { .. } => "out",
            GameEvent::Walk { .. } => "walk",
            GameEvent::HitByPitch { .. } => "hitByPitch",
            GameEvent::Strikeout { .. } => "strikeout",
            GameEvent::Run { .. } => "run",
            GameEvent::Steal { .. } => "steal",
            GameEvent::StealAttempt { .. } => "stealAttempt",
            GameEvent::StealCaught { .. } => "stealCaught",
            GameEvent::Balk { .. } => "balk",
            GameEvent::CatcherInterference { .. } => "catcherInterference",
        }
    }

    /// True for the four kinds of base hit.
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            GameEvent::Single { .. }
                | GameEvent::Double { .. }
                | GameEvent::Triple { .. }
                | GameEvent::HomeRun { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchup() -> Matchup {
        Matchup {
            hitter: PlayerId(10),
            pitcher: PlayerId(20),
            offense: TeamId(1),
            defense: TeamId(2),
        }
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = GameEvent::Out { matchup: matchup(), outs: 2 };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "out");
        assert_eq!(value["outs"], 2);
        assert_eq!(value["matchup"]["hitter"], 10);
    }

    #[test]
    fn test_kind_matches_serde_tag() {
        let event = GameEvent::HitByPitch { matchup: matchup() };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], event.kind());
    }

    #[test]
    fn test_is_hit() {
        assert!(GameEvent::Triple { matchup: matchup() }.is_hit());
        assert!(!GameEvent::Walk { matchup: matchup() }.is_hit());
    }
}
