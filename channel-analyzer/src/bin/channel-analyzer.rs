use channel_analyzer::report::{DashboardOptions, render_dashboard};
use channel_analyzer::{Config, PipelineError, RunRequest, export, pipeline_from_config};
use clap::Parser;
use eyre::Context;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Analyze the recent uploads of a YouTube channel.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Channel URL, @handle or channel ID.
    reference: String,

    /// YouTube Data API key [env: YOUTUBE_API_KEY]
    #[arg(long)]
    api_key: Option<String>,

    /// Analyze at most this many of the most recent uploads [env: CHANNEL_ANALYZER_MAX_VIDEOS]
    #[arg(long)]
    max_videos: Option<usize>,

    /// Number of video batches to fetch at the same time [env: CHANNEL_ANALYZER_CONCURRENCY]
    #[arg(long)]
    concurrency: Option<usize>,

    /// Attempts per API request before giving up [env: CHANNEL_ANALYZER_RETRIES]
    #[arg(long)]
    retries: Option<u32>,

    /// Also write the per-video table to this CSV file.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Size of the most-viewed leaderboard.
    #[arg(long, value_name = "N", default_value_t = 5)]
    top: usize,

    /// List video thumbnails.
    #[arg(long)]
    gallery: bool,

    /// Print the report as JSON instead of a dashboard.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("read configuration from environment")?;
    if let Some(api_key) = cli.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(max_videos) = cli.max_videos {
        config.max_videos = max_videos;
    }
    if let Some(concurrency) = cli.concurrency {
        config.batch_concurrency = concurrency;
    }
    if let Some(retries) = cli.retries {
        config.retry_attempts = retries;
    }
    config.validate()?;
    tracing::debug!(?config, "configuration");

    let pipeline = pipeline_from_config(&config)?;
    let request = RunRequest::new(cli.reference).max_videos(config.max_videos);

    let report = match pipeline.run(&request).await {
        Ok(report) => report,
        Err(e) => {
            if let PipelineError::Upstream { .. } = e {
                tracing::error!(error = %e, "analysis failed");
            }
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut stdout, &report).context("write JSON report")?;
        writeln!(stdout)?;
    } else {
        let options = DashboardOptions {
            top: cli.top,
            series: true,
            gallery: cli.gallery,
        };
        render_dashboard(&mut stdout, &report, &options).context("write dashboard")?;
    }
    stdout.flush()?;

    if let Some(path) = cli.csv {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create {}", path.display()))?;
        export::write_csv(std::io::BufWriter::new(file), &report.videos)
            .with_context(|| format!("write CSV export to {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = report.videos.len(), "wrote CSV export");
    }

    Ok(if report.is_partial() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}
