pub mod box_score;
pub mod events;
pub mod pitch;
pub mod player;
pub mod situation;
pub mod team;
pub mod venue;
pub mod weather;

pub use box_score::{BoxScore, BoxScorePark, BoxScorePitcher, BoxScoreTeam};
pub use events::{GameEvent, Matchup};
pub use pitch::{PitchLocation, PitchOutcome, PitchType, StrikeKind, PLATE_HALF_WIDTH};
pub use player::{
    BattingRatings, FieldingRatings, Handedness, PitchRepertoire, PitchingRatings, PlayerData,
    PlayerId, Position, RunningRatings, RATING_MAX, RATING_MIN,
};
pub use situation::{Base, BaseRunners, Count, HalfInning};
pub use team::{CoachData, CoachRole, TeamData, TeamId, MIN_ROSTER_SIZE};
pub use venue::{ParkData, UmpireCrewData, UmpireData};
pub use weather::{CompassPoint, WeatherSample};
