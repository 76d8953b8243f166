use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use squadron::ai::autoplay_step;
use squadron::board::{Maneuver, PlayerNo};
use squadron::config::GameConfig;
use squadron::phase::{stress_correction, PhaseKind};
use squadron::protocol::{parse_command, parse_maneuver};
use squadron::roster::Roster;
use squadron::selfplay::{play_game, SelfPlayConfig};
use squadron::session::Session;

fn full_session() -> Session {
    let mut roster = Roster::default();
    for pilot in ["luke-skywalker", "biggs-darklighter", "red-squadron-pilot", "rookie-pilot"] {
        roster.add_ship(PlayerNo::Player1, pilot, &[]).unwrap();
    }
    for pilot in ["darth-vader", "mauler-mithel", "black-squadron-pilot", "academy-pilot"] {
        roster.add_ship(PlayerNo::Player2, pilot, &[]).unwrap();
    }
    Session::new(roster.build_game(&GameConfig::default()).unwrap())
}

fn bench_parse_maneuver(c: &mut Criterion) {
    c.bench_function("parse_maneuver", |b| {
        b.iter(|| parse_maneuver(black_box("3.L.B")))
    });
}

fn bench_parse_command(c: &mut Criterion) {
    c.bench_function("parse_assign_command", |b| {
        b.iter(|| parse_command(black_box("assign 12 4.F.R")))
    });
}

fn bench_stress_correction(c: &mut Criterion) {
    let red = parse_maneuver("4.F.R").map(|m| Maneuver { color: squadron::board::ManeuverColor::Red, ..m }).unwrap();
    c.bench_function("stress_correction", |b| {
        b.iter(|| stress_correction(black_box(&red), black_box(true)))
    });
}

fn bench_autoplay_round(c: &mut Criterion) {
    c.bench_function("autoplay_round_8_ships", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| {
            let mut session = full_session();
            loop {
                autoplay_step(&mut session, &mut rng, |_| true).unwrap();
                if session.game().round > 1 && session.current_kind() == Some(PhaseKind::Planning) {
                    break;
                }
            }
            session.drain_events().len()
        })
    });
}

fn bench_selfplay_game(c: &mut Criterion) {
    let config = SelfPlayConfig { num_games: 1, rounds: 6, max_ships: 4, threads: 1, seed: 3 };
    let mut group = c.benchmark_group("selfplay");
    group.sample_size(20);
    group.bench_function("six_round_game", |b| {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        b.iter(|| play_game(black_box(&config), 0, &mut rng).unwrap().substitutions)
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_maneuver,
    bench_parse_command,
    bench_stress_correction,
    bench_autoplay_round,
    bench_selfplay_game,
);
criterion_main!(benches);
