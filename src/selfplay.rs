//! Self-play game generation.
//!
//! Builds random legal squads for both sides, seeds the table with a few
//! obstacles, and lets random AI play a fixed number of rounds. Each game is
//! recorded with its full event stream, the stress-rule substitutions that
//! occurred, and the stress each ship ended with.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::ai::autoplay_step;
use crate::board::{Faction, ObstacleKind, PlayerKind, PlayerNo, ShipId, Token, ALL_PLAYERS};
use crate::catalog::pilots_for_faction;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::phase::{PhaseError, PhaseKind};
use crate::roster::{Roster, RosterError};
use crate::session::Session;

/// Steps allowed per round before a game is abandoned.
const MAX_STEPS_PER_ROUND: usize = 1_000;

/// Errors that abort a self-play run or a single game.
#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error("squad generation failed: {0}")]
    Roster(#[from] RosterError),

    #[error("game {game_id} stalled: {source}")]
    Phase {
        game_id: usize,
        #[source]
        source: PhaseError,
    },

    #[error("game {0} made no progress")]
    Stalled(usize),

    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("self-play worker thread panicked")]
    WorkerPanicked,
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Rounds played per game.
    pub rounds: u32,
    /// Largest squad generated per side.
    pub max_ships: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig { num_games: 10, rounds: 6, max_ships: 4, threads: 4, seed: 0 }
    }
}

/// Stress carried by one ship at the end of a game.
#[derive(Debug, Clone, Serialize)]
pub struct FinalStress {
    pub ship: ShipId,
    pub owner: PlayerNo,
    pub pilot: &'static str,
    pub stress: usize,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub rounds: u32,
    pub events: Vec<GameEvent>,
    /// Number of red maneuvers replaced by the stress rule.
    pub substitutions: usize,
    pub final_stress: Vec<FinalStress>,
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Fills one squad with random pilots of its faction. Illegal picks, such
/// as a second copy of a unique pilot, are skipped.
fn random_squad(roster: &mut Roster, player: PlayerNo, max_ships: usize, rng: &mut impl Rng) {
    let faction = roster.squad(player).faction;
    let pilots: Vec<_> = pilots_for_faction(faction).collect();
    let target = rng.gen_range(1..=max_ships.max(1));
    for _ in 0..target * 3 {
        if roster.squad(player).ships.len() >= target {
            break;
        }
        let pilot = pilots[rng.gen_range(0..pilots.len())];
        let _ = roster.add_ship(player, pilot.id, &[]);
    }
}

/// Builds a random table: both squads of AI players and a few obstacles.
fn random_session(config: &SelfPlayConfig, rng: &mut impl Rng) -> Result<Session, SelfPlayError> {
    let mut roster = Roster::new(config.max_ships.max(1));
    roster.set_faction(PlayerNo::Player1, Faction::Rebels);
    roster.set_faction(PlayerNo::Player2, Faction::Empire);
    for player in ALL_PLAYERS {
        roster.set_player_kind(player, PlayerKind::HotacAi);
        random_squad(&mut roster, player, config.max_ships, rng);
    }

    let game_config = GameConfig {
        initiative: if rng.gen_bool(0.5) { PlayerNo::Player1 } else { PlayerNo::Player2 },
        ..GameConfig::default()
    };
    let mut session = Session::new(roster.build_game(&game_config)?);

    let area = game_config.play_area_mm;
    let game = session.game_mut();
    for kind in [ObstacleKind::Asteroid, ObstacleKind::Debris, ObstacleKind::Debris] {
        let x = rng.gen_range(0.0..area);
        let y = rng.gen_range(area * 0.3..area * 0.7);
        game.place_obstacle(kind, x, y, rng.gen_range(20.0..45.0));
    }
    Ok(session)
}

/// Plays a single game to completion.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, SelfPlayError> {
    let mut session = random_session(config, rng)?;
    let mut events = Vec::new();

    let mut steps = 0;
    let max_steps = MAX_STEPS_PER_ROUND * config.rounds.max(1) as usize;
    while session.game().round <= config.rounds || session.current_kind() != Some(PhaseKind::Planning) {
        match autoplay_step(&mut session, rng, |_| true) {
            Ok(true) => {}
            Ok(false) => return Err(SelfPlayError::Stalled(game_id)),
            Err(source) => return Err(SelfPlayError::Phase { game_id, source }),
        }
        events.append(&mut session.drain_events());
        steps += 1;
        if steps >= max_steps {
            return Err(SelfPlayError::Stalled(game_id));
        }
    }
    events.append(&mut session.drain_events());

    let substitutions = events
        .iter()
        .filter(|e| matches!(e, GameEvent::ManeuverSubstituted { .. }))
        .count();
    let final_stress = session
        .game()
        .ships
        .values()
        .map(|s| FinalStress {
            ship: s.id,
            owner: s.owner,
            pilot: s.pilot_id,
            stress: s.token_count(Token::Stress),
        })
        .collect();

    Ok(GameRecord {
        game_id,
        rounds: session.game().round - 1,
        events,
        substitutions,
        final_stress,
    })
}

/// Runs self-play generation and returns all completed game records.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game.
/// Games that fail are logged and skipped.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game);
        Ok(())
    }
}

fn report(result: Result<GameRecord, SelfPlayError>, started: Instant, n: usize, total: usize) -> Option<GameRecord> {
    match result {
        Ok(game) => {
            info!(
                game = n,
                total,
                substitutions = game.substitutions,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "game finished"
            );
            Some(game)
        }
        Err(e) => {
            warn!(game = n, error = %e, "game discarded");
            None
        }
    }
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = game_rng(config.seed, i);
        let started = Instant::now();
        if let Some(game) = report(play_game(config, i, &mut rng), started, i + 1, config.num_games) {
            on_game(game);
        }
    }
}

/// Plays games concurrently on a rayon pool and delivers them to the
/// callback on the calling thread as they finish.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads).build()?;
    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let config = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config.num_games).into_par_iter().for_each_with(tx, |tx, i| {
                let mut rng = game_rng(config.seed, i);
                let started = Instant::now();
                let result = play_game(&config, i, &mut rng);
                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(game) = report(result, started, n, config.num_games) {
                    let _ = tx.send(game);
                }
            });
        });
    });

    for game in rx {
        on_game(game);
    }

    handle.join().map_err(|_| SelfPlayError::WorkerPanicked)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Logs aggregate statistics across games.
pub fn log_summary(games: &[GameRecord]) {
    let substitutions: usize = games.iter().map(|g| g.substitutions).sum();
    let ships: usize = games.iter().map(|g| g.final_stress.len()).sum();
    let stressed = games
        .iter()
        .flat_map(|g| &g.final_stress)
        .filter(|s| s.stress > 0)
        .count();
    info!(games = games.len(), substitutions, ships, stressed, "self-play summary");
}
