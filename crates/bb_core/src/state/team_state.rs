//! Roster container for one side of a game.
//!
//! The defensive alignment and batting order are fixed at construction;
//! nothing here substitutes players mid-game.

use std::collections::{BTreeMap, HashMap};

use super::coach_state::CoachState;
use super::player_state::PlayerState;
use super::stats::{BattingStats, PitchingStats, PlateAppearanceResult};
use crate::engine::observer::GameObserver;
use crate::error::{Result, SimError};
use crate::models::{GameEvent, PlayerId, Position, TeamData, TeamId};

#[derive(Debug, Clone)]
pub struct TeamState {
    pub id: TeamId,
    pub abbreviation: String,
    pub nickname: String,
    pub city: String,
    players: Vec<PlayerState>,
    index: HashMap<PlayerId, usize>,
    coaches: Vec<CoachState>,
    positions: BTreeMap<Position, PlayerId>,
    batting_order: Vec<PlayerId>,
    lineup_index: usize,
    pub batting: BattingStats,
    pub pitching: PitchingStats,
    pub wins: u32,
    pub losses: u32,
}

impl TeamState {
    /// Validates the roster and builds the defensive alignment and lineup.
    pub fn new(data: TeamData) -> Result<Self> {
        data.validate()?;

        let players: Vec<PlayerState> = data.players.into_iter().map(PlayerState::new).collect();
        let index = players.iter().enumerate().map(|(i, p)| (p.id(), i)).collect();
        let positions = assign_positions(data.id_team, &players)?;
        let batting_order = build_batting_order(&players, &positions);
        let abbreviation = if data.abbreviation.trim().is_empty() {
            derive_abbreviation(data.id_team, &data.city, &data.nickname)
        } else {
            data.abbreviation
        };

        Ok(Self {
            id: data.id_team,
            abbreviation,
            nickname: data.nickname,
            city: data.city,
            players,
            index,
            coaches: data.coaches.into_iter().map(CoachState::new).collect(),
            positions,
            batting_order,
            lineup_index: 0,
            batting: BattingStats::default(),
            pitching: PitchingStats::default(),
            wins: 0,
            losses: 0,
        })
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.city, self.nickname)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.index.get(&id).map(|&i| &self.players[i])
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn coaches(&self) -> &[CoachState] {
        &self.coaches
    }

    pub fn positions(&self) -> &BTreeMap<Position, PlayerId> {
        &self.positions
    }

    pub fn player_at(&self, position: Position) -> PlayerId {
        // Every position is filled at construction.
        self.positions[&position]
    }

    pub fn pitcher(&self) -> &PlayerState {
        self.player_state(self.player_at(Position::Pitcher))
    }

    pub fn batting_order(&self) -> &[PlayerId] {
        &self.batting_order
    }

    pub fn lineup_index(&self) -> usize {
        self.lineup_index
    }

    pub fn current_hitter(&self) -> &PlayerState {
        self.player_state(self.batting_order[self.lineup_index])
    }

    /// Moves to the next batter, wrapping after the ninth.
    pub fn advance_lineup(&mut self) -> usize {
        self.lineup_index = (self.lineup_index + 1) % self.batting_order.len();
        self.lineup_index
    }

    pub fn runs(&self) -> u32 {
        self.batting.runs
    }

    pub fn hits(&self) -> u32 {
        self.batting.hits
    }

    pub fn winning_percentage(&self) -> f64 {
        let games = self.wins + self.losses;
        if games == 0 {
            return 0.0;
        }
        self.wins as f64 / games as f64
    }

    fn player_state(&self, id: PlayerId) -> &PlayerState {
        match self.player(id) {
            Some(player) => player,
            None => unreachable!("player {} assigned to team {} but not on its roster", id, self.id),
        }
    }

    fn record_team_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Pitch { matchup, outcome, .. } => {
                if matchup.defense == self.id {
                    self.pitching.record_pitch(*outcome);
                }
            }
            GameEvent::Single { matchup }
            | GameEvent::Double { matchup }
            | GameEvent::Triple { matchup }
            | GameEvent::HomeRun { matchup }
            | GameEvent::Out { matchup, .. }
            | GameEvent::Walk { matchup }
            | GameEvent::HitByPitch { matchup }
            | GameEvent::Strikeout { matchup, .. } => {
                if let Some((_, result)) = PlateAppearanceResult::from_event(event) {
                    if matchup.offense == self.id {
                        self.batting.record_plate_appearance(result);
                    } else if matchup.defense == self.id {
                        self.pitching.record_batter_faced(result);
                    }
                }
            }
            GameEvent::Run { matchup, .. } => {
                if matchup.offense == self.id {
                    self.batting.runs += 1;
                    self.batting.rbi += 1;
                } else if matchup.defense == self.id {
                    self.pitching.runs_allowed += 1;
                }
            }
            GameEvent::HalfInningEnd { offense, runners, .. } => {
                if *offense == self.id {
                    self.batting.left_on_base += runners.count();
                }
            }
            GameEvent::GameEnd { away, home, runs, .. } => {
                let (ours, theirs) = if *away == self.id {
                    (runs[0], runs[1])
                } else if *home == self.id {
                    (runs[1], runs[0])
                } else {
                    return;
                };
                if ours > theirs {
                    self.wins += 1;
                } else if ours < theirs {
                    self.losses += 1;
                }
            }
            GameEvent::GameStart { .. }
            | GameEvent::HalfInningStart { .. }
            | GameEvent::AtBatStart { .. }
            | GameEvent::AtBatEnd { .. }
            | GameEvent::Ball { .. }
            | GameEvent::Strike { .. }
            | GameEvent::Foul { .. }
            | GameEvent::Steal { .. }
            | GameEvent::StealAttempt { .. }
            | GameEvent::StealCaught { .. }
            | GameEvent::Balk { .. }
            | GameEvent::CatcherInterference { .. } => {}
        }
    }
}

impl GameObserver for TeamState {
    fn notify_game_event(&mut self, event: &GameEvent) {
        self.record_team_event(event);
        for player in &mut self.players {
            player.notify_game_event(event);
        }
        for coach in &mut self.coaches {
            coach.notify_game_event(event);
        }
    }

    fn name(&self) -> &str {
        &self.abbreviation
    }
}

/// First index with the highest score; earlier roster entries win ties.
fn best_candidate<F>(players: &[PlayerState], taken: &[bool], score: F) -> Option<usize>
where
    F: Fn(&PlayerState) -> u32,
{
    let mut best: Option<(usize, u32)> = None;
    for (i, player) in players.iter().enumerate() {
        if taken[i] {
            continue;
        }
        let s = score(player);
        if best.map_or(true, |(_, top)| s > top) {
            best = Some((i, s));
        }
    }
    best.map(|(i, _)| i)
}

/// Pitcher first by `stuff + movement + control`, then each field position
/// in turn by `fielding[position] + batting composite` over who is left.
fn assign_positions(team: TeamId, players: &[PlayerState]) -> Result<BTreeMap<Position, PlayerId>> {
    let mut taken = vec![false; players.len()];
    let mut positions = BTreeMap::new();

    let pitcher = best_candidate(players, &taken, |p| p.data.pitching.composite())
        .ok_or(SimError::NoPitcher { team })?;
    taken[pitcher] = true;
    positions.insert(Position::Pitcher, players[pitcher].id());

    for position in Position::FIELD {
        let pick = best_candidate(players, &taken, |p| {
            p.data.fielding.get(position) as u32 + p.data.batting.composite()
        })
        .ok_or(SimError::NoPositionCandidate { team, position })?;
        taken[pick] = true;
        positions.insert(position, players[pick].id());
    }

    Ok(positions)
}

/// The nine starters, best batting composite first. Ties keep position order.
fn build_batting_order(players: &[PlayerState], positions: &BTreeMap<Position, PlayerId>) -> Vec<PlayerId> {
    let composite = |id: &PlayerId| {
        players
            .iter()
            .find(|p| p.id() == *id)
            .map_or(0, |p| p.data.batting.composite())
    };
    let mut order: Vec<PlayerId> = positions.values().copied().collect();
    order.sort_by_key(|id| std::cmp::Reverse(composite(id)));
    order
}

/// First three letters of the city, else of the nickname, uppercased.
fn derive_abbreviation(id: TeamId, city: &str, nickname: &str) -> String {
    [city, nickname]
        .iter()
        .map(|name| name.chars().filter(|c| c.is_alphanumeric()).take(3).collect::<String>())
        .find(|letters| !letters.is_empty())
        .map_or_else(|| format!("T{}", id), |letters| letters.to_uppercase())
}
