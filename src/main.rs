//! Dash Runner entry point
//!
//! Headless runner: loads a level file, plays it at a fixed step with an input
//! policy, resets on death, and reports the outcome.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use dash_runner::autopilot::{Autopilot, JumpPolicy, RandomPolicy, ScriptedPolicy, hazard_count};
use dash_runner::consts::SIM_DT;
use dash_runner::sim::Level;
use dash_runner::{LevelFile, Tuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Look ahead and jump before spikes and walls
    Auto,
    /// Press jump at random (seeded)
    Random,
    /// Press jump only on the steps given with --press
    Scripted,
}

#[derive(Debug, Parser)]
#[command(name = "dash-runner", about = "Play an auto-scrolling level headlessly")]
struct Args {
    /// Level file (JSON)
    level: PathBuf,

    /// Tuning overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Policy::Auto)]
    policy: Policy,

    /// Seed for the random policy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Per-step press chance for the random policy
    #[arg(long, default_value_t = 0.05)]
    press_chance: f64,

    /// Step numbers to press jump on (scripted policy)
    #[arg(long, value_delimiter = ',')]
    press: Vec<u64>,

    /// Give up after this many attempts
    #[arg(long, default_value_t = 10)]
    attempts: u32,

    /// Step cap per attempt
    #[arg(long, default_value_t = 100_000)]
    max_steps: u64,

    /// Simulation delta per step (seconds, clamped by tuning)
    #[arg(long, default_value_t = SIM_DT)]
    dt: f64,
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning {}", path.display()))?;
    Tuning::from_json(&json).with_context(|| format!("parsing tuning {}", path.display()))
}

fn load_level(path: &Path, tuning: &Tuning) -> Result<Level> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading level {}", path.display()))?;
    let file = LevelFile::from_json(&json)
        .with_context(|| format!("parsing level {}", path.display()))?;
    Ok(file.into_level(tuning))
}

fn make_policy(args: &Args) -> Box<dyn JumpPolicy> {
    match args.policy {
        Policy::Auto => Box::new(Autopilot::default()),
        Policy::Random => Box::new(RandomPolicy::new(args.seed, args.press_chance)),
        Policy::Scripted => Box::new(ScriptedPolicy::new(args.press.clone())),
    }
}

/// How one attempt ended
enum Attempt {
    Completed { steps: u64 },
    Died { progress: f64 },
    TimedOut,
}

fn play_attempt(level: &mut Level, policy: &mut dyn JumpPolicy, dt: f64, max_steps: u64) -> Attempt {
    for step in 1..=max_steps {
        let jump = policy.decide(level);
        let result = level.step(dt, jump);
        if result.completed {
            return Attempt::Completed { steps: step };
        }
        if result.died {
            log::debug!("Died: {:?}", result.death_cause());
            return Attempt::Died {
                progress: level.progress(),
            };
        }
    }
    Attempt::TimedOut
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = load_tuning(args.tuning.as_deref())?;
    let mut level = load_level(&args.level, &tuning)?;
    log::info!(
        "Dash Runner starting: {} ({} hazards, theme {:?}, policy {:?})",
        args.level.display(),
        hazard_count(&level),
        level.theme(),
        args.policy
    );

    let mut policy = make_policy(&args);
    let mut best = 0.0f64;

    for attempt in 1..=args.attempts.max(1) {
        match play_attempt(&mut level, policy.as_mut(), args.dt, args.max_steps) {
            Attempt::Completed { steps } => {
                println!(
                    "Attempt {attempt}: level complete in {steps} steps ({:.2}s)",
                    level.world().elapsed
                );
                return Ok(());
            }
            Attempt::Died { progress } => {
                best = best.max(progress);
                println!("Attempt {attempt}: died at {:.0}%", progress * 100.0);
            }
            Attempt::TimedOut => {
                println!("Attempt {attempt}: step cap reached");
            }
        }
        level.reset();
    }

    println!("Gave up after {} attempts (best {:.0}%)", args.attempts.max(1), best * 100.0);
    Ok(())
}
