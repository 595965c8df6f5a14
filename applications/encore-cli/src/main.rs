/// Encore - scripted playback controller demo
use clap::{Parser, Subcommand};
use encore_cli::{steps, Backend, CliConfig, Step};
use encore_playback::PlaybackController;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore playlist and transport controller", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./encore.toml if present)
    #[arg(short, long, global = true, env = "ENCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the queue from config and run playback steps in order
    Run {
        /// Track source to start with (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<Backend>,

        /// Abort on the first step the controller rejects
        #[arg(long)]
        strict: bool,

        /// Steps, e.g. `add=/music/a.mp3 play next pause status`
        steps: Vec<String>,
    },
    /// Print the resolved configuration
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Run {
            backend,
            strict,
            steps: raw_steps,
        } => run(config, backend, strict, &raw_steps)?,
        Commands::ShowConfig => show_config(&config),
    }

    Ok(())
}

fn run(
    config: CliConfig,
    backend: Option<Backend>,
    strict: bool,
    raw_steps: &[String],
) -> anyhow::Result<()> {
    let steps = raw_steps
        .iter()
        .map(|raw| raw.parse::<Step>())
        .collect::<Result<Vec<_>, _>>()?;

    let backend = backend.unwrap_or(config.backend);
    let mut controller = PlaybackController::with_config(config.playback.clone(), backend.build());

    for entry in &config.tracks {
        controller.add_to_queue(entry.to_track());
    }

    info!(
        "Starting with {} queued track(s) on the {:?} source, {} step(s)",
        controller.queue_len(),
        backend,
        steps.len()
    );

    let states = controller.subscribe();
    let summary = steps::run(&mut controller, &steps, strict)?;

    let transitions: Vec<String> = states.drain().iter().map(ToString::to_string).collect();
    println!("States: {}", transitions.join(" -> "));
    println!(
        "Applied {} step(s), {} rejected",
        summary.applied, summary.rejected
    );
    steps::print_status(&controller);

    Ok(())
}

fn show_config(config: &CliConfig) {
    println!("Backend: {:?}", config.backend);
    println!("Log filter: {}", config.log_filter);
    println!("Max pending events: {}", config.playback.max_pending_events);
    println!("Seed tracks:");
    for entry in &config.tracks {
        println!("  {} - {} ({})", entry.artist, entry.title, entry.locator);
    }
}
