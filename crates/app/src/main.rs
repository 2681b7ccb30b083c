use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use rhythm_core::{
    samples_per_millisecond, BeatSchedule, PlaybackSource, Session, SessionConfig,
    SyntheticPlayback,
};
use tracing_subscriber::EnvFilter;

fn main() -> rhythm_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Schedule => run_schedule(&config),
        Commands::Judge { at } => run_judge(&config, at),
        Commands::Simulate {
            length_ms,
            sample_rate,
            width,
            presses,
        } => run_simulate(&config, length_ms, sample_rate, width, &presses),
    }
}

fn load_config(path: Option<&Path>) -> rhythm_core::Result<SessionConfig> {
    let config = match path {
        Some(path) => {
            tracing::info!(?path, "loading session config");
            SessionConfig::load(path)?
        }
        None => SessionConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run_schedule(config: &SessionConfig) -> rhythm_core::Result<()> {
    let schedule = BeatSchedule::generate(config.tempo()?, config.beat_count);
    tracing::info!(beats = schedule.len(), "generated schedule");
    println!("{}", serde_json::to_string(schedule.as_slice())?);
    Ok(())
}

fn run_judge(config: &SessionConfig, at: i64) -> rhythm_core::Result<()> {
    let mut session = Session::new(config, 1)?;
    let result = session.press(at);
    let error_ms = session.judgment().nearest_beat_error(at);
    tracing::info!(at, ?result, ?error_ms, "judged press");
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

fn run_simulate(
    config: &SessionConfig,
    length_ms: u64,
    sample_rate: u32,
    width: f32,
    presses: &[i64],
) -> rhythm_core::Result<()> {
    let samples_per_ms = samples_per_millisecond(sample_rate)?;
    let mut playback = SyntheticPlayback::new(length_ms, samples_per_ms)?;
    let mut session = Session::for_source(config, &playback)?;
    tracing::info!(length_ms, sample_rate, presses = presses.len(), "starting simulation");

    loop {
        let snapshot = playback.snapshot();
        let current_ms = snapshot.current_ms()?;
        let outcome = session.tick(snapshot.raw_position, presses.contains(&current_ms));

        if let Some(feedback) = outcome.feedback() {
            let visible = session.visible_beats(outcome.current_ms, width).count();
            let (played, total) = snapshot.progress_seconds()?;
            tracing::info!(
                at = outcome.current_ms,
                result = feedback.label(),
                score = outcome.score,
                visible,
                "{played}s of {total}s"
            );
        }

        if snapshot.is_finished() {
            break;
        }
        playback.advance_ms(1);
    }

    let summary = session.summary();
    tracing::info!(score = summary.score, accuracy = ?summary.accuracy(), "simulation finished");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Beat timing and judgment engine", long_about = None)]
struct Cli {
    /// JSON session config. Defaults are used for anything left out.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the beat timestamps for the configured tempo.
    Schedule,
    /// Judge a single press.
    Judge {
        /// Press time in milliseconds since track start.
        #[arg(long, allow_hyphen_values = true)]
        at: i64,
    },
    /// Play a synthetic track and press at the given times.
    Simulate {
        /// Track length in milliseconds.
        #[arg(long, default_value_t = 10_000)]
        length_ms: u64,
        /// Sample rate of the synthetic source in hertz.
        #[arg(long, default_value_t = 44_100)]
        sample_rate: u32,
        /// Viewport width used for scroll projection.
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        /// Press times in milliseconds, comma separated.
        #[arg(long, value_delimiter = ',')]
        presses: Vec<i64>,
    },
}
