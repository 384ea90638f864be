//! Stick Hero driver -- runs the game model under a fixed-timestep loop.
//!
//! There is no renderer here. Input comes from a replay script (one set of held
//! keys per tick) and the result is printed as a JSON snapshot, which is
//! exactly what a view would consume each frame.
//!
//!   1. `begin_frame()` -- feed the accumulator (wall clock, or exactly one
//!      `fixed_dt` per frame in headless mode)
//!   2. `while should_step()` -- apply the tick's key edges as commands, then
//!      advance the session by one tick
//!   3. after the run, write the best score to the progress file
//!
//! Usage: `stick_game [--config PATH] [--replay PATH] [--realtime] [--resume]`

mod replay;

use std::path::{Path, PathBuf};
use std::time::Duration;

use replay::{load_replay_from_path, ReplaySequence};
use stick_core::config::load_game_config_from_path;
use stick_core::persistence::{load_or_default, load_progress, save_progress};
use stick_core::{load_state, save_state, Command, GameConfig, InputState, Progress, Session};
use stick_core::{Snapshot, TimeState};

const CONFIG_PATH: &str = "assets/config/stick_hero.json";
const REPLAY_PATH: &str = "assets/replays/demo.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pacing {
    Headless,
    Realtime,
}

struct Args {
    config_path: PathBuf,
    replay_path: PathBuf,
    pacing: Pacing,
    resume: bool,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: usize,
    pub quit: bool,
    pub snapshot: Snapshot,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config_path: PathBuf::from(CONFIG_PATH),
        replay_path: PathBuf::from(REPLAY_PATH),
        pacing: Pacing::Headless,
        resume: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config_path = iter
                    .next()
                    .map(PathBuf::from)
                    .ok_or("--config needs a path")?;
            }
            "--replay" => {
                args.replay_path = iter
                    .next()
                    .map(PathBuf::from)
                    .ok_or("--replay needs a path")?;
            }
            "--realtime" => args.pacing = Pacing::Realtime,
            "--resume" => args.resume = true,
            other => {
                return Err(format!(
                    "Unknown argument '{other}'. Usage: stick_game [--config PATH] [--replay PATH] [--realtime] [--resume]"
                ))
            }
        }
    }
    Ok(args)
}

fn load_config(path: &Path) -> Result<GameConfig, String> {
    if path.exists() {
        load_game_config_from_path(path)
    } else {
        log::warn!(
            "Config '{}' was not found, using built-in defaults.",
            path.display()
        );
        Ok(GameConfig::default())
    }
}

fn build_session(mut config: GameConfig, replay: &ReplaySequence) -> Session {
    if let Some(seed) = replay.seed {
        config.seed = Some(seed);
    }
    Session::new(config)
}

/// Returns false when the command asks to stop.
fn handle_command(session: &mut Session, command: Command) -> bool {
    match command {
        Command::Action(action) => session.apply(action),
        Command::Save => {
            if let Err(err) = save_state(&session.config.save_path, &session.state) {
                log::error!("Save failed: {err}");
            }
        }
        Command::Load => match load_state(&session.config.save_path, &session.config) {
            Ok(state) => session.restore(state),
            Err(err) => log::warn!("{err}; keeping the current run"),
        },
        Command::Quit => return false,
    }
    true
}

fn drive(session: &mut Session, replay: &ReplaySequence, pacing: Pacing) -> RunSummary {
    let frames = replay.expanded_keys();
    let fixed_dt = f64::from(replay.fixed_dt);
    let mut time = TimeState::with_fixed_dt(fixed_dt);
    let mut input = InputState::new();
    let mut cursor = 0;
    let mut quit = false;

    'frames: while cursor < frames.len() {
        match pacing {
            Pacing::Headless => time.begin_frame_with(fixed_dt),
            Pacing::Realtime => time.begin_frame(),
        }

        while time.should_step() {
            let Some(keys) = frames.get(cursor) else {
                break 'frames;
            };
            input.set_held(keys);
            let commands = input.commands();
            input.end_frame();
            for command in commands {
                if !handle_command(session, command) {
                    log::info!("Quit requested at tick {cursor}");
                    quit = true;
                    break 'frames;
                }
            }

            if let Some(collision) = session.tick() {
                log::debug!(
                    "Tick {cursor}: {:?} on {} #{}",
                    collision.reaction,
                    collision.kind,
                    collision.index
                );
            }
            cursor += 1;
        }

        if pacing == Pacing::Realtime {
            std::thread::sleep(Duration::from_secs_f64(fixed_dt));
        }
    }

    if pacing == Pacing::Realtime {
        log::info!(
            "Ran {} steps over {} frames ({:.1} fps)",
            time.fixed_step_count,
            time.frame_count,
            time.smoothed_fps
        );
    }

    RunSummary {
        ticks: cursor,
        quit,
        snapshot: session.snapshot(),
    }
}

#[cfg(test)]
pub fn run_headless(config: GameConfig, replay: &ReplaySequence) -> RunSummary {
    let mut session = build_session(config, replay);
    drive(&mut session, replay, Pacing::Headless)
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Stick Hero starting...");

    let args = parse_args()?;
    let config = load_config(&args.config_path)?;
    let replay = load_replay_from_path(&args.replay_path)?;
    let mut session = build_session(config, &replay);

    let progress_path = session.config.progress_path.clone();
    let progress = match load_progress(&progress_path) {
        Ok(progress) => progress,
        Err(err) => {
            log::warn!("{err}; best score starts at 0");
            Progress::default()
        }
    };
    session.best_score = progress.best_score;

    if args.resume {
        let state = load_or_default(&session.config);
        session.restore(state);
    }

    let summary = drive(&mut session, &replay, args.pacing);
    log::info!(
        "{} after {} ticks: {}",
        if summary.quit { "Stopped" } else { "Finished" },
        summary.ticks,
        summary.snapshot.summary()
    );

    if session.best_score > progress.best_score {
        let updated = Progress {
            best_score: session.best_score,
        };
        if let Err(err) = save_progress(&progress_path, &updated) {
            log::error!("Failed to record best score: {err}");
        } else {
            log::info!("New best score {}", updated.best_score);
        }
    }

    let json = serde_json::to_string_pretty(&summary.snapshot)
        .map_err(|e| format!("Failed to encode snapshot: {e}"))?;
    println!("{json}");
    Ok(())
}
