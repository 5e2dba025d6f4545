//! The game state machine.
//!
//! Game → half-inning → at-bat → pitch, each level a loop with its own
//! exit condition. Every transition is published to all observers in a
//! fixed order before the next one is computed.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::baserunning::{self, BaseHit};
use super::clock::GameClock;
use super::config::GameConfig;
use super::observer::GameObserver;
use super::pitch_outcome::{resolve_pitch, PitchCall, PitchContext, PitchResolution};
use crate::error::{Result, SimError};
use crate::models::{BoxScore, GameEvent, HalfInning, Matchup, ParkData, PlayerId, TeamData, UmpireCrewData};
use crate::observers::{BoxScoreBuilder, EventStore, GameDirectory, GameLog, StoreReceipt};
use crate::state::{ParkState, TeamState, UmpireState, UmpireStation, WeatherState};

/// Mixed into the game seed so weather draws never share a stream with pitches.
const WEATHER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// What a ball in play turns into. Picked uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InPlayOutcome {
    Out,
    Single,
    Double,
    Triple,
    HomeRun,
    HitByPitch,
}

impl InPlayOutcome {
    pub const ALL: [InPlayOutcome; 6] = [
        InPlayOutcome::Out,
        InPlayOutcome::Single,
        InPlayOutcome::Double,
        InPlayOutcome::Triple,
        InPlayOutcome::HomeRun,
        InPlayOutcome::HitByPitch,
    ];
}

/// Everything a finished game hands back.
#[derive(Debug)]
pub struct GameOutcome {
    pub box_score: BoxScore,
    pub log: Vec<String>,
    pub store: StoreReceipt,
    pub events: Vec<GameEvent>,
    /// `[away, home]`
    pub teams: [TeamState; 2],
    pub umpires: Vec<UmpireState>,
    pub park: ParkState,
}

impl GameOutcome {
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

pub struct GameSimulationEngine {
    id_game: u32,
    config: GameConfig,
    rng: ChaCha8Rng,
    clock: GameClock,
    /// `[away, home]`
    teams: [TeamState; 2],
    runs: [u32; 2],
    /// Home plate first, then first, second and third base.
    umpires: Vec<UmpireState>,
    park: ParkState,
    weather: WeatherState,
    log: GameLog,
    box_score: BoxScoreBuilder,
    store: EventStore,
    extra_observers: Vec<Box<dyn GameObserver>>,
    half_innings: u32,
}

impl GameSimulationEngine {
    /// Builds team states and attaches every observer.
    ///
    /// `teams` is `[away, home]` and must hold exactly two distinct teams
    /// whose player ids do not overlap.
    pub fn new(
        id_game: u32,
        teams: Vec<TeamData>,
        park: ParkData,
        umpires: UmpireCrewData,
        config: GameConfig,
    ) -> Result<Self> {
        config.validate()?;
        umpires.validate()?;

        let [away, home]: [TeamData; 2] = teams
            .try_into()
            .map_err(|teams: Vec<TeamData>| SimError::InvalidTeamCount { found: teams.len() })?;
        if away.id_team == home.id_team {
            return Err(SimError::DuplicateTeam { id: home.id_team });
        }
        let mut seen = HashSet::new();
        for player in away.players.iter().chain(home.players.iter()) {
            if !seen.insert(player.id_player) {
                return Err(SimError::DuplicatePlayer { id: player.id_player });
            }
        }

        let teams = [TeamState::new(away)?, TeamState::new(home)?];
        let directory = GameDirectory::new(id_game, &park, &teams);
        let park = ParkState::new(park);
        let weather = WeatherState::new(park.latitude(), park.longitude(), config.seed ^ WEATHER_SEED_SALT);
        let umpires = vec![
            UmpireState::new(umpires.home_plate, UmpireStation::HomePlate),
            UmpireState::new(umpires.first_base, UmpireStation::FirstBase),
            UmpireState::new(umpires.second_base, UmpireStation::SecondBase),
            UmpireState::new(umpires.third_base, UmpireStation::ThirdBase),
        ];

        Ok(Self {
            id_game,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            clock: GameClock::new(config.start_time),
            teams,
            runs: [0, 0],
            umpires,
            park,
            weather,
            log: GameLog::new(directory.clone()),
            box_score: BoxScoreBuilder::new(directory),
            store: EventStore::new(config.event_store_path.clone()),
            extra_observers: Vec::new(),
            half_innings: 0,
            config,
        })
    }

    /// Attaches an observer that is notified after the built-in ones.
    pub fn with_observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.extra_observers.push(observer);
        self
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn teams(&self) -> &[TeamState; 2] {
        &self.teams
    }

    /// `[away, home]`
    pub fn runs(&self) -> [u32; 2] {
        self.runs
    }

    /// Plays the game to completion and finalizes every observer.
    pub fn simulate(mut self) -> Result<GameOutcome> {
        info!(
            id_game = self.id_game,
            seed = self.config.seed,
            away = %self.teams[0].abbreviation,
            home = %self.teams[1].abbreviation,
            "Game starting"
        );

        self.publish(GameEvent::GameStart {
            id_game: self.id_game,
            away: self.teams[0].id,
            home: self.teams[1].id,
            id_park: self.park.data.id_park,
            timestamp: self.clock.now,
        });

        while !self.is_game_over() {
            self.play_half_inning();
        }

        self.publish(GameEvent::GameEnd {
            away: self.teams[0].id,
            home: self.teams[1].id,
            runs: self.runs,
            innings: self.innings_played(),
            timestamp: self.clock.now,
        });

        info!(
            id_game = self.id_game,
            away_runs = self.runs[0],
            home_runs = self.runs[1],
            half_innings = self.half_innings,
            "Game over"
        );

        self.finish()
    }

    /// Only checked between half-innings, so the bottom of the last
    /// regulation inning is always played. Extra innings may end after the top.
    fn is_game_over(&self) -> bool {
        self.clock.inning > self.config.num_innings && self.runs[0] != self.runs[1]
    }

    /// An extra inning can end after its top half.
    fn innings_played(&self) -> u32 {
        match self.clock.half {
            HalfInning::Top => self.clock.inning - 1,
            HalfInning::Bottom => self.clock.inning,
        }
    }

    fn play_half_inning(&mut self) {
        let (offense, defense) = (self.clock.offense(), self.clock.defense());
        let weather = self.weather.get_weather(self.clock.now, false);
        self.publish(GameEvent::HalfInningStart {
            inning: self.clock.inning,
            half: self.clock.half,
            offense: self.teams[offense].id,
            defense: self.teams[defense].id,
            weather,
            timestamp: self.clock.now,
        });

        let runs_before = self.runs[offense];
        while self.clock.outs < 3 {
            self.play_at_bat();
        }

        let runners = self.clock.runners;
        self.publish(GameEvent::HalfInningEnd {
            inning: self.clock.inning,
            half: self.clock.half,
            offense: self.teams[offense].id,
            defense: self.teams[defense].id,
            runners,
        });
        debug!(
            inning = self.clock.inning,
            half = %self.clock.half,
            offense = %self.teams[offense].abbreviation,
            runs = self.runs[offense] - runs_before,
            left_on_base = runners.count(),
            "Half-inning complete"
        );

        self.half_innings += 1;
        self.clock.end_half_inning();
        self.clock.advance(self.config.seconds_between_half_innings);
    }

    fn play_at_bat(&mut self) {
        let matchup = self.current_matchup();
        self.publish(GameEvent::AtBatStart {
            matchup,
            inning: self.clock.inning,
            half: self.clock.half,
            outs: self.clock.outs,
            runners: self.clock.runners,
        });

        while !self.throw_pitch(matchup) {}

        self.finish_at_bat(matchup);
    }

    pub(crate) fn current_matchup(&self) -> Matchup {
        let offense = &self.teams[self.clock.offense()];
        let defense = &self.teams[self.clock.defense()];
        Matchup {
            hitter: offense.current_hitter().id(),
            pitcher: defense.pitcher().id(),
            offense: offense.id,
            defense: defense.id,
        }
    }

    /// Returns true once the at-bat is over.
    pub(crate) fn throw_pitch(&mut self, matchup: Matchup) -> bool {
        let count = self.clock.count;
        let (pitch, location, resolution) = {
            let hitter = self.teams[self.clock.offense()].current_hitter();
            let pitcher = self.teams[self.clock.defense()].pitcher();
            let pitch = pitcher.choose_pitch(count.balls, count.strikes, self.clock.outs, &mut self.rng);
            let location = pitcher.pitch_location(pitch, hitter, &mut self.rng);
            let ctx = PitchContext { pitch, location: &location, hitter, pitcher, umpire: &self.umpires[0] };
            let resolution = resolve_pitch(&ctx, &mut self.rng);
            (pitch, location, resolution)
        };

        trace!(
            pitch = pitch.name(),
            plate_x = location.plate_x,
            plate_z = location.plate_z,
            call = ?resolution.call,
            "Pitch"
        );
        self.publish(GameEvent::Pitch {
            matchup,
            pitch,
            location,
            outcome: resolution.call.outcome(),
            count,
            strike_call: resolution.strike_call,
        });
        self.clock.advance(self.config.seconds_per_pitch);

        self.apply_pitch_outcome(matchup, resolution)
    }

    /// Count transition for a resolved pitch. Returns true once the
    /// at-bat is over.
    pub(crate) fn apply_pitch_outcome(&mut self, matchup: Matchup, resolution: PitchResolution) -> bool {
        match resolution.call {
            PitchCall::Ball => {
                self.clock.count.balls += 1;
                self.publish(GameEvent::Ball { matchup, count: self.clock.count });
                if self.clock.count.balls >= 4 {
                    self.handle_walk(matchup);
                    return true;
                }
                false
            }
            PitchCall::Strike(kind) => {
                self.clock.count.strikes += 1;
                self.publish(GameEvent::Strike { matchup, kind, count: self.clock.count });
                if self.clock.count.strikes >= 3 {
                    self.handle_strikeout(matchup);
                    return true;
                }
                false
            }
            PitchCall::InPlay => {
                let outcome = InPlayOutcome::ALL[self.rng.gen_range(0..InPlayOutcome::ALL.len())];
                self.apply_in_play(matchup, outcome);
                true
            }
        }
    }

    pub(crate) fn apply_in_play(&mut self, matchup: Matchup, outcome: InPlayOutcome) {
        match outcome {
            InPlayOutcome::Out => self.handle_out(matchup),
            InPlayOutcome::Single => self.handle_hit(matchup, BaseHit::Single),
            InPlayOutcome::Double => self.handle_hit(matchup, BaseHit::Double),
            InPlayOutcome::Triple => self.handle_hit(matchup, BaseHit::Triple),
            InPlayOutcome::HomeRun => self.handle_home_run(matchup),
            InPlayOutcome::HitByPitch => self.handle_hit_by_pitch(matchup),
        }
    }

    /// Next hitter up, fresh count.
    pub(crate) fn finish_at_bat(&mut self, matchup: Matchup) {
        let lineup_index = self.teams[self.clock.offense()].advance_lineup();
        self.clock.reset_count();
        self.publish(GameEvent::AtBatEnd {
            matchup,
            count: self.clock.count,
            outs: self.clock.outs,
            lineup_index,
        });
    }

    fn handle_hit(&mut self, matchup: Matchup, hit: BaseHit) {
        self.publish(match hit {
            BaseHit::Single => GameEvent::Single { matchup },
            BaseHit::Double => GameEvent::Double { matchup },
            BaseHit::Triple => GameEvent::Triple { matchup },
        });
        let scored = baserunning::advance_on_hit(&mut self.clock.runners, matchup.hitter, hit);
        self.score_runs(matchup, scored);
    }

    fn handle_home_run(&mut self, matchup: Matchup) {
        self.publish(GameEvent::HomeRun { matchup });
        let scored = baserunning::advance_on_home_run(&mut self.clock.runners, matchup.hitter);
        self.score_runs(matchup, scored);
    }

    fn handle_walk(&mut self, matchup: Matchup) {
        self.publish(GameEvent::Walk { matchup });
        let scored = baserunning::force_advance(&mut self.clock.runners, matchup.hitter);
        self.score_runs(matchup, scored);
    }

    fn handle_hit_by_pitch(&mut self, matchup: Matchup) {
        self.publish(GameEvent::HitByPitch { matchup });
        let scored = baserunning::force_advance(&mut self.clock.runners, matchup.hitter);
        self.score_runs(matchup, scored);
    }

    fn handle_out(&mut self, matchup: Matchup) {
        self.clock.outs += 1;
        self.publish(GameEvent::Out { matchup, outs: self.clock.outs });
    }

    fn handle_strikeout(&mut self, matchup: Matchup) {
        self.clock.outs += 1;
        self.publish(GameEvent::Strikeout { matchup, outs: self.clock.outs });
    }

    fn score_runs(&mut self, matchup: Matchup, scored: Vec<PlayerId>) {
        let offense = self.clock.offense();
        for runner in scored {
            self.runs[offense] += 1;
            self.publish(GameEvent::Run { runner, matchup });
        }
    }

    /// Fan-out order: teams (and through them players and coaches),
    /// umpires, park, log, box score, store, then attached observers.
    fn publish(&mut self, event: GameEvent) {
        for team in &mut self.teams {
            team.notify_game_event(&event);
        }
        for umpire in &mut self.umpires {
            umpire.notify_game_event(&event);
        }
        self.park.notify_game_event(&event);
        self.log.notify_game_event(&event);
        self.box_score.notify_game_event(&event);
        self.store.notify_game_event(&event);
        for observer in &mut self.extra_observers {
            observer.notify_game_event(&event);
        }
    }

    pub(crate) fn events(&self) -> &[GameEvent] {
        self.store.events()
    }

    pub(crate) fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    fn finish(mut self) -> Result<GameOutcome> {
        let store = self.store.close()?;
        Ok(GameOutcome {
            box_score: self.box_score.close(),
            log: self.log.close(),
            store,
            events: self.store.take_events(),
            teams: self.teams,
            umpires: self.umpires,
            park: self.park,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{game_engine, team_data};
    use crate::models::UmpireData;

    #[test]
    fn test_requires_two_teams() {
        let result = GameSimulationEngine::new(
            1,
            vec![team_data(1, 100)],
            ParkData::default(),
            UmpireCrewData::default(),
            GameConfig::default(),
        );
        assert!(matches!(result, Err(SimError::InvalidTeamCount { found: 1 })));
    }

    #[test]
    fn test_rejects_same_team_twice() {
        let result = GameSimulationEngine::new(
            1,
            vec![team_data(1, 100), team_data(1, 200)],
            ParkData::default(),
            UmpireCrewData::default(),
            GameConfig::default(),
        );
        assert!(matches!(result, Err(SimError::DuplicateTeam { .. })));
    }

    #[test]
    fn test_rejects_player_on_both_rosters() {
        let result = GameSimulationEngine::new(
            1,
            vec![team_data(1, 100), team_data(2, 100)],
            ParkData::default(),
            UmpireCrewData::default(),
            GameConfig::default(),
        );
        assert!(matches!(result, Err(SimError::DuplicatePlayer { .. })));
    }

    #[test]
    fn test_rejects_zero_innings() {
        let config = GameConfig { num_innings: 0, ..GameConfig::default() };
        let result = GameSimulationEngine::new(
            1,
            vec![team_data(1, 100), team_data(2, 200)],
            ParkData::default(),
            UmpireCrewData::default(),
            config,
        );
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_umpire_off_the_scale() {
        let mut umpires = UmpireCrewData::default();
        umpires.home_plate = UmpireData { inside: 0, ..UmpireData::neutral(1) };
        let result = GameSimulationEngine::new(
            1,
            vec![team_data(1, 100), team_data(2, 200)],
            ParkData::default(),
            umpires,
            GameConfig::default(),
        );
        assert!(matches!(result, Err(SimError::UmpireRatingOutOfRange { umpire: 1, .. })));
    }

    #[test]
    fn test_tie_after_regulation_is_not_over() {
        let mut engine = game_engine(6);
        engine.clock.inning = 9;
        engine.runs = [4, 2];
        assert!(!engine.is_game_over(), "ninth inning still to play");

        engine.clock.inning = 10;
        engine.runs = [3, 3];
        assert!(!engine.is_game_over());

        engine.runs = [4, 3];
        assert!(engine.is_game_over());

        engine.clock.inning = 12;
        engine.runs = [5, 5];
        assert!(!engine.is_game_over());
        engine.runs = [5, 6];
        assert!(engine.is_game_over());
    }

    #[test]
    fn test_tied_game_goes_to_extra_innings() {
        let mut engine = game_engine(21);
        engine.clock.inning = 10;
        let outcome = engine.simulate().unwrap();
        match outcome.events.last() {
            Some(GameEvent::GameEnd { runs, innings, .. }) => {
                assert_ne!(runs[0], runs[1]);
                assert!(*innings >= 10);
            }
            other => panic!("expected gameEnd, got {:?}", other),
        }
        let innings: Vec<u32> = outcome
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::HalfInningStart { inning, .. } => Some(*inning),
                _ => None,
            })
            .collect();
        assert_eq!(innings.first(), Some(&10));
        assert!(innings.iter().all(|&n| n >= 10));
    }

    #[test]
    fn test_innings_played_counts_a_finished_top_half() {
        let mut engine = game_engine(6);
        engine.clock.inning = 11;
        engine.clock.half = HalfInning::Top;
        assert_eq!(engine.innings_played(), 10);
        engine.clock.half = HalfInning::Bottom;
        assert_eq!(engine.innings_played(), 11);
    }

    #[test]
    fn test_game_has_a_winner() {
        let outcome = game_engine(42).simulate().unwrap();
        let [away, home] = &outcome.teams;
        assert_ne!(away.runs(), home.runs());
        assert_eq!(away.wins + home.wins, 1);
        assert_eq!(away.losses + home.losses, 1);
        assert!(outcome.box_score.inning_runs[1].len() >= 9);
    }

    #[test]
    fn test_events_bracketed_by_game_start_and_end() {
        let outcome = game_engine(3).simulate().unwrap();
        assert!(matches!(outcome.events.first(), Some(GameEvent::GameStart { .. })));
        assert!(matches!(outcome.events.last(), Some(GameEvent::GameEnd { .. })));
        assert_eq!(outcome.event_count(), outcome.store.events);
    }

    #[test]
    fn test_runs_match_run_events() {
        let outcome = game_engine(8).simulate().unwrap();
        let run_events = outcome.events.iter().filter(|e| matches!(e, GameEvent::Run { .. })).count() as u32;
        let [away, home] = &outcome.teams;
        assert_eq!(away.runs() + home.runs(), run_events);
        assert_eq!(outcome.box_score.team_away.runs, away.runs());
        assert_eq!(outcome.box_score.team_home.runs, home.runs());
    }

    #[derive(Default)]
    struct Counter {
        seen: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    }

    impl GameObserver for Counter {
        fn notify_game_event(&mut self, _event: &GameEvent) {
            self.seen.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }

        fn name(&self) -> &str {
            "Counter"
        }
    }

    #[test]
    fn test_attached_observer_sees_every_event() {
        let counter = Counter::default();
        let seen = counter.seen.clone();
        let outcome = game_engine(11).with_observer(Box::new(counter)).simulate().unwrap();
        assert_eq!(seen.load(std::sync::atomic::Ordering::Relaxed), outcome.event_count());
    }

    #[test]
    fn test_seven_inning_game() {
        let config = GameConfig { seed: 17, ..GameConfig::seven_inning() };
        let engine = GameSimulationEngine::new(
            17,
            vec![team_data(1, 100), team_data(2, 200)],
            ParkData::default(),
            UmpireCrewData::default(),
            config,
        )
        .unwrap();
        let outcome = engine.simulate().unwrap();
        assert!(outcome.box_score.inning_runs[0].len() >= 7);
        match outcome.events.last() {
            Some(GameEvent::GameEnd { innings, .. }) => assert!(*innings >= 7),
            other => panic!("expected gameEnd, got {:?}", other),
        }
    }
}
