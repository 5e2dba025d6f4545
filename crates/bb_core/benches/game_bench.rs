use bb_core::models::{
    BattingRatings, FieldingRatings, Handedness, ParkData, PitchRepertoire, PitchType, PitchingRatings,
    PlayerData, PlayerId, RunningRatings, TeamData, TeamId, UmpireCrewData,
};
use bb_core::{GameConfig, GameRequest, GameSimulationEngine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn player(id: u32, rating: u16) -> PlayerData {
    let mut pitches = PitchRepertoire::new();
    pitches.insert(PitchType::FourSeamFastball, rating);
    pitches.insert(PitchType::Curveball, rating);
    PlayerData {
        id_player: PlayerId(id),
        first_name: "Bench".to_string(),
        last_name: format!("Player{}", id),
        bats: Handedness::Right,
        throws: Handedness::Right,
        height_inches: 73,
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

fn team(id: u32) -> TeamData {
    TeamData {
        id_team: TeamId(id),
        abbreviation: format!("B{}", id),
        nickname: "Benchers".to_string(),
        city: format!("City{}", id),
        players: (0..13).map(|i| player(id * 100 + i, 350 + (i as u16) * 45)).collect(),
        coaches: Vec::new(),
    }
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("full_game", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let engine = GameSimulationEngine::new(
                1,
                vec![team(1), team(2)],
                ParkData::default(),
                UmpireCrewData::default(),
                GameConfig::deterministic(seed),
            )
            .unwrap();
            black_box(engine.simulate().unwrap())
        })
    });
}

fn bench_season(c: &mut Criterion) {
    let requests: Vec<GameRequest> = (0..32)
        .map(|i| GameRequest {
            id_game: i,
            seed: Some(i as u64),
            config: None,
            park: ParkData::default(),
            umpires: UmpireCrewData::default(),
            teams: vec![team(1), team(2)],
        })
        .collect();

    c.bench_function("season_32_games", |b| {
        b.iter(|| black_box(bb_core::simulate_season(requests.clone()).unwrap()))
    });
}

criterion_group!(benches, bench_full_game, bench_season);
criterion_main!(benches);
