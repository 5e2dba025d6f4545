use thiserror::Error;

use crate::models::{PlayerId, Position, TeamId};

/// Fatal construction-time failures. Nothing is published to observers
/// once one of these is returned.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("A game needs exactly two teams, found {found}")]
    InvalidTeamCount { found: usize },

    #[error("Duplicate team id {id}")]
    DuplicateTeam { id: TeamId },

    #[error("Duplicate player id {id}")]
    DuplicatePlayer { id: PlayerId },

    #[error("Team {team} has {found} players, at least {required} are required")]
    InsufficientRoster { team: TeamId, found: usize, required: usize },

    #[error("Team {team} has no player available to pitch")]
    NoPitcher { team: TeamId },

    #[error("Team {team} has no candidate left for {position:?}")]
    NoPositionCandidate { team: TeamId, position: Position },

    #[error("Player {player}: {field} = {value} is outside 1..=1000")]
    RatingOutOfRange { player: PlayerId, field: String, value: u16 },

    #[error("Umpire {umpire}: {field} = {value} is outside 1..=1000")]
    UmpireRatingOutOfRange { umpire: u32, field: String, value: u16 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, SimError>;
