//! Deterministic rosters for unit tests.

use crate::engine::config::GameConfig;
use crate::engine::game_sim::GameSimulationEngine;
use crate::models::{
    BattingRatings, CoachData, CoachRole, FieldingRatings, Handedness, ParkData, PitchRepertoire,
    PitchType, PitchingRatings, PlayerData, PlayerId, RunningRatings, TeamData, TeamId, UmpireCrewData,
};
use crate::observers::GameDirectory;
use crate::state::TeamState;

/// Players per fixture roster: nine starters plus a short bench.
pub const ROSTER_SIZE: u32 = 12;

/// A player with every rating set to `rating`.
pub fn player_data(id: u32, rating: u16) -> PlayerData {
    let mut pitches = PitchRepertoire::new();
    pitches.insert(PitchType::FourSeamFastball, rating);
    pitches.insert(PitchType::Slider, rating);
    pitches.insert(PitchType::Changeup, rating);

    PlayerData {
        id_player: PlayerId(id),
        first_name: "Test".to_string(),
        last_name: format!("Player{}", id),
        bats: Handedness::Right,
        throws: Handedness::Right,
        height_inches: 72,
        batting: BattingRatings { contact: rating, gap: rating, power: rating, eye: rating, avoid_ks: rating },
        pitching: PitchingRatings { stuff: rating, movement: rating, control: rating, stamina: rating },
        fielding: FieldingRatings {
            pitcher: rating,
            catcher: rating,
            first_base: rating,
            second_base: rating,
            third_base: rating,
            shortstop: rating,
            left_field: rating,
            center_field: rating,
            right_field: rating,
        },
        pitches,
        running: RunningRatings { speed: rating, stealing: rating, baserunning: rating },
    }
}

/// Twelve players with ids `first_player_id..`, ratings rising 400 to 840.
pub fn team_data(id: u32, first_player_id: u32) -> TeamData {
    TeamData {
        id_team: TeamId(id),
        abbreviation: format!("T{}", id),
        nickname: format!("Nine{}", id),
        city: format!("City{}", id),
        players: (0..ROSTER_SIZE)
            .map(|i| player_data(first_player_id + i, 400 + (i as u16) * 40))
            .collect(),
        coaches: vec![CoachData {
            id_coach: id,
            first_name: "Skip".to_string(),
            last_name: format!("Manager{}", id),
            role: CoachRole::Manager,
        }],
    }
}

pub fn game_engine(seed: u64) -> GameSimulationEngine {
    match GameSimulationEngine::new(
        seed as u32,
        vec![team_data(1, 100), team_data(2, 200)],
        ParkData::default(),
        UmpireCrewData::default(),
        GameConfig::deterministic(seed),
    ) {
        Ok(engine) => engine,
        Err(e) => panic!("fixture rosters must be valid: {}", e),
    }
}

pub fn directory() -> GameDirectory {
    let teams = [
        TeamState::new(team_data(1, 100)).expect("valid away roster"),
        TeamState::new(team_data(2, 200)).expect("valid home roster"),
    ];
    GameDirectory::new(1, &ParkData::default(), &teams)
}
