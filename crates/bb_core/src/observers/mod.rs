//! Terminal event consumers: transcript, box score and persistence.
//!
//! Events carry ids only. Consumers that print names look them up in a
//! [`GameDirectory`] built when the game is set up.

pub mod box_score;
pub mod event_store;
pub mod game_log;

use std::collections::HashMap;

pub use box_score::BoxScoreBuilder;
pub use event_store::{EventStore, StoreReceipt, STORE_VERSION};
pub use game_log::GameLog;

use crate::models::{ParkData, PlayerId, TeamId};
use crate::state::TeamState;

#[derive(Debug, Clone, PartialEq)]
pub struct TeamInfo {
    pub id: TeamId,
    pub abbreviation: String,
    pub city: String,
    pub nickname: String,
    pub starting_pitcher: PlayerId,
}

impl TeamInfo {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.city, self.nickname)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    pub first_name: String,
    pub last_name: String,
    pub team: TeamId,
}

/// Names for every id that can appear in an event of one game.
#[derive(Debug, Clone)]
pub struct GameDirectory {
    pub id_game: u32,
    pub park: ParkData,
    /// `[away, home]`
    pub teams: [TeamInfo; 2],
    players: HashMap<PlayerId, PlayerInfo>,
}

impl GameDirectory {
    pub fn new(id_game: u32, park: &ParkData, teams: &[TeamState; 2]) -> Self {
        let info = |team: &TeamState| TeamInfo {
            id: team.id,
            abbreviation: team.abbreviation.clone(),
            city: team.city.clone(),
            nickname: team.nickname.clone(),
            starting_pitcher: team.pitcher().id(),
        };

        let mut players = HashMap::new();
        for team in teams {
            for player in team.players() {
                players.insert(
                    player.id(),
                    PlayerInfo {
                        first_name: player.data.first_name.clone(),
                        last_name: player.data.last_name.clone(),
                        team: team.id,
                    },
                );
            }
        }

        Self { id_game, park: park.clone(), teams: [info(&teams[0]), info(&teams[1])], players }
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerInfo> {
        self.players.get(&id)
    }

    /// Full name, or `#id` for an unknown player.
    pub fn player_name(&self, id: PlayerId) -> String {
        match self.players.get(&id) {
            Some(p) => format!("{} {}", p.first_name, p.last_name),
            None => format!("#{}", id),
        }
    }

    /// 0 for the away team, 1 for home.
    pub fn team_index(&self, id: TeamId) -> Option<usize> {
        self.teams.iter().position(|t| t.id == id)
    }

    pub fn team(&self, id: TeamId) -> Option<&TeamInfo> {
        self.teams.iter().find(|t| t.id == id)
    }
}
