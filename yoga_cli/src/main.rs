use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing::info;
use yoga_core::config::Config;
use yoga_core::geometry::joint_angle;
use yoga_core::pipeline::classifier::LinearClassifier;
use yoga_core::pipeline::scripted::ScriptedEstimator;
use yoga_core::pipeline::{ModelPipeline, PosePipeline};
use yoga_core::session::{SessionContext, ToggleOutcome};
use yoga_core::storage::{load_best_scores, JsonFileStore};
use yoga_data::{model::PoseClass, profile::BestScores, result::SessionSummary};

#[derive(Debug, Parser)]
#[command(name = "yoga")]
#[command(about = "Yoga pose-hold evaluator", long_about = None)]
struct Cli {
    /// TOML config; defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Runs one session against a recorded keypoint stream.
    Replay {
        recording: PathBuf,
        #[arg(long)]
        classifier: PathBuf,
        #[arg(long, default_value_t = 0)]
        pose: usize,
        #[arg(long)]
        store: Option<PathBuf>,
        /// Press stop after this many seconds instead of waiting for the window to run out.
        #[arg(long)]
        stop_at: Option<f64>,
    },
    /// Prints the stored best scores.
    Best {
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Angle at B formed by A and C.
    Angle {
        #[arg(allow_negative_numbers = true, num_args = 6)]
        coords: Vec<f32>,
    },
}

/// Simulated clock resolution for `replay`.
const STEP: Duration = Duration::from_millis(100);

enum ReplayEnd {
    Ended(SessionSummary),
    /// Stopped during the pre-roll; nothing was judged or stored.
    Aborted { best: BestScores },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Replay {
            recording,
            classifier,
            pose,
            store,
            stop_at,
        } => {
            let store_dir = store.unwrap_or_else(|| config.storage.dir.clone());
            match replay(&config, &recording, &classifier, pose, &store_dir, stop_at)? {
                ReplayEnd::Ended(summary) => {
                    println!("session ended: reason={} pose={}", summary.reason, summary.pose);
                    println!("scores={}", summary.scores);
                    println!("best={}", summary.best_after);
                }
                ReplayEnd::Aborted { best } => {
                    println!("session aborted before judging");
                    println!("best={best}");
                }
            }
        }
        Command::Best { store } => {
            let store = JsonFileStore::new(store.unwrap_or_else(|| config.storage.dir.clone()));
            let best = load_best_scores(&store, &config.storage.best_scores_key)
                .context("failed to load best scores")?;
            println!("best={best}");
        }
        Command::Angle { coords } => {
            let &[ax, ay, bx, by, cx, cy] = &coords[..] else {
                anyhow::bail!("expected 6 coordinates, got {}", coords.len());
            };
            match joint_angle(Vec2::new(ax, ay), Vec2::new(bx, by), Vec2::new(cx, cy)) {
                Some(angle) => println!("{angle}"),
                None => println!("unavailable"),
            }
        }
    }

    Ok(())
}

fn replay(
    config: &Config,
    recording: &Path,
    classifier: &Path,
    pose: usize,
    store_dir: &Path,
    stop_at: Option<f64>,
) -> anyhow::Result<ReplayEnd> {
    let pose = PoseClass::new(pose).with_context(|| format!("unknown pose index {pose}"))?;
    let stop_at = stop_at
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("invalid --stop-at, expected a non-negative number of seconds")?;
    let recording = yoga_runner::load_recording_json_from_path(recording)?;
    let weights = yoga_runner::load_classifier_json_from_path(classifier)?;
    let classifier = LinearClassifier::new(weights).context("invalid classifier")?;
    info!(
        title = %recording.meta.title,
        frames = recording.frames.len(),
        %pose,
        "replaying recording"
    );
    let mut pipeline = ModelPipeline::new(
        ScriptedEstimator::new(recording),
        classifier,
        config.session.normalization_scale,
    );

    let mut session = SessionContext::from_config(config, JsonFileStore::new(store_dir));
    session.select_pose(pose);

    let mut now = Duration::ZERO;
    match session.toggle(now, pipeline.is_ready()) {
        ToggleOutcome::Started => {}
        other => anyhow::bail!("session did not start: {other:?}"),
    }

    // Pre-roll plus hold window, with slack for catch-up ticks.
    let horizon = config.session.pre_roll_period() * (config.session.pre_roll_ticks + 1)
        + config.session.hold_period() * (config.session.hold_ticks + 1);

    while now <= horizon {
        if stop_at.is_some_and(|t| now >= t) {
            match session.toggle(now, pipeline.is_ready()) {
                ToggleOutcome::Ended(summary) => return Ok(ReplayEnd::Ended(summary)),
                ToggleOutcome::Aborted => {
                    return Ok(ReplayEnd::Aborted {
                        best: *session.best_scores(),
                    })
                }
                other => anyhow::bail!("unexpected toggle outcome: {other:?}"),
            }
        }
        if let Some(summary) = session.update(now, &mut pipeline).ended {
            return Ok(ReplayEnd::Ended(summary));
        }
        now += STEP;
    }

    anyhow::bail!("session did not finish within {:?}", horizon)
}
