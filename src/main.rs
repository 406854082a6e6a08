use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use logfan::config::Config;
use logfan::sink::{drain, JsonLinesSink};
use logfan::{descriptor, FollowConfig, LogDescriptor, Supervisor};
use tracing::info;

#[derive(Parser)]
#[command(name = "logfan", about = "Tail log files and fan parsed lines into one JSON-lines stream")]
struct Cli {
    /// Config file. Defaults to ~/.config/logfan/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON descriptor list. Overrides `[tracking] file_list`.
    #[arg(long)]
    file_list: Option<PathBuf>,

    /// Track one more file, given as PATH=FORMAT. May be repeated; when used
    /// without --file-list, the configured file list is not read.
    #[arg(long = "track", value_name = "PATH=FORMAT")]
    track: Vec<LogDescriptor>,

    /// Append records to this JSON-lines file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Override `[tracking] poll_interval_ms`.
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => Config::load().context("cannot load config")?,
    };
    if let Some(ms) = cli.poll_interval_ms {
        config.tracking.poll_interval_ms = ms;
    }

    let filter = if cli.debug { "debug" } else { config.logging.filter.as_str() };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let mut descriptors = Vec::new();
    if cli.file_list.is_some() || cli.track.is_empty() {
        let path = cli.file_list.unwrap_or_else(|| config.tracking.file_list.clone());
        descriptors = descriptor::load_file_list(&path)
            .with_context(|| format!("cannot load file list {}", path.display()))?;
    }
    descriptors.extend(cli.track);

    let supervisor = Supervisor::new(FollowConfig::from(&config.tracking));
    let mut run = supervisor.start(&descriptors).await?;

    let cancel = run.cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping");
            cancel.cancel();
        }
    });

    let output = cli.output.or(config.output.path);
    let stats = match output {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("cannot open output {}", path.display()))?;
            drain(run.results(), &mut JsonLinesSink::new(BufWriter::new(file))).await
        }
        None => drain(run.results(), &mut JsonLinesSink::new(std::io::stdout().lock())).await,
    };

    info!(
        persisted = stats.persisted,
        parse_errors = stats.parse_errors,
        sink_errors = stats.sink_errors,
        "all trackers stopped"
    );
    Ok(())
}
