use engine::fingerprint::state_sha256_hex;
use serde::Serialize;
use tetracube::input::command_for_key_name;
use tetracube::{Command, ConfigStore, GameEvent, Scoreboard, Session};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 1;
const DEFAULT_GAMES: u32 = 3;
const MAX_FRAMES: u64 = 200_000;
const DIGEST_UNAVAILABLE: &str = "unavailable";
// Cycled one key per second of play; keeps pieces wandering and turning.
const KEY_SCRIPT: [&str; 8] = ["a", "w", "q", "d", "s", "e", "shift", "r"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "tetracube=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SEED);
    let games = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_GAMES);

    let store = ConfigStore::from_env();
    let config = store.load();
    info!(path = %store.path().display(), ?config, "loaded config");

    let mut scoreboard = Scoreboard::new();
    for game in 0..games {
        let mut session = scoreboard.start_seeded(config, seed.wrapping_add(u64::from(game)));
        let mut script = KEY_SCRIPT.iter().cycle();

        while !session.is_game_over() && session.frame() < MAX_FRAMES {
            if session.frame() % 60 == 30 {
                if let Some(command) = script.next().and_then(|key| command_for_key_name(key)) {
                    session.apply(command);
                }
            }
            session.update();
            drain_events(&mut session, &mut scoreboard);
        }
        if !session.is_game_over() {
            session.apply(Command::EndGame);
            drain_events(&mut session, &mut scoreboard);
        }

        let digest = digest_or_placeholder(&session.snapshot());
        println!(
            "game {} frames {} score {} layers {} pieces {} max {} digest {}",
            game + 1,
            session.frame(),
            session.score(),
            session.layers_cleared(),
            session.pieces_spawned(),
            scoreboard.max_score(),
            digest
        );
    }
}

fn drain_events(session: &mut Session, scoreboard: &mut Scoreboard) {
    for event in session.take_events() {
        match event {
            GameEvent::GameOver(summary) => {
                scoreboard.record(&summary);
            }
            GameEvent::LayersCleared { count, points } => {
                info!(count, points, "layers cleared");
            }
            other => debug!(?other, "event"),
        }
    }
}

fn digest_or_placeholder<S: Serialize>(state: &S) -> String {
    match state_sha256_hex(state) {
        Ok(digest) => digest,
        Err(err) => {
            warn!(%err, "could not fingerprint snapshot");
            DIGEST_UNAVAILABLE.to_string()
        }
    }
}
