use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use review_watch::config::TelemetryConfig;
use review_watch::error::AppError;
use review_watch::review::CycleOutcome;
use review_watch::service::{prepare_from_env, WatchOverrides};
use review_watch::telemetry;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "review-watch-bot",
    about = "Report homework review status changes to a Telegram chat",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the review API until interrupted (default command)
    Watch(WatchArgs),
    /// Run a single poll cycle and print what happened
    Once(WatchArgs),
}

#[derive(Args, Debug, Default)]
struct WatchArgs {
    /// Override the configured poll interval, in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,
    /// Unix timestamp to start polling from (defaults to now)
    #[arg(long)]
    from_date: Option<i64>,
}

impl WatchArgs {
    fn overrides(&self) -> WatchOverrides {
        WatchOverrides {
            interval: self.interval.map(Duration::from_secs),
            from_date: self.from_date,
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Watch(WatchArgs::default()));

    telemetry::init(&TelemetryConfig::load())?;

    match command {
        Command::Watch(args) => watch(args).await,
        Command::Once(args) => once(args).await,
    }
}

async fn watch(args: WatchArgs) -> Result<(), AppError> {
    let mut watcher = prepare_from_env(&args.overrides())?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            signal.cancel();
        }
    });

    watcher.run(shutdown).await;
    Ok(())
}

async fn once(args: WatchArgs) -> Result<(), AppError> {
    let mut watcher = prepare_from_env(&args.overrides())?;

    match watcher.run_cycle().await {
        CycleOutcome::NoChange => println!("No status change"),
        CycleOutcome::Notified { message } => println!("Sent: {message}"),
        CycleOutcome::Failed { failure, notified } => {
            let delivery = if notified { "reported" } else { "not reported" };
            println!("Cycle failed ({delivery}): {failure}");
        }
    }

    Ok(())
}
