//! `lyricflow` - collect, fetch and parse an artist's lyrics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lyricflow::audit::AuditLog;
use lyricflow::catalog::{GeniusClient, SongDataPuller};
use lyricflow::config::Config;
use lyricflow::lyrics::LyricsFetcher;
use lyricflow::types::QuerySpec;
use lyricflow::verses::{RuleClassifier, SongFileProcessor};

#[derive(Parser)]
#[command(name = "lyricflow", version, about = "Genius catalog, lyrics and verse pipeline")]
struct Cli {
    /// Output root (overrides `LYRICS_BASE_PATH`)
    #[arg(long, global = true)]
    base_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build `{artist}/{artist}_data.csv` from the Genius API
    Collect(QueryArgs),
    /// Download lyrics for every song in an artist's catalog
    Fetch {
        /// Artist directory name, e.g. `kendrick_lamar`
        artist: String,
    },
    /// Split an artist's lyrics files into `{artist}_verses.csv`
    Parse {
        /// Artist directory name
        artist: String,
    },
    /// Collect, fetch and parse in one go
    Run(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Search term
    #[arg(required_unless_present = "queries")]
    query: Option<String>,

    /// Canonical artist name (defaults to the query)
    #[arg(long)]
    artist: Option<String>,

    /// Other names the artist is credited under
    #[arg(long = "alt")]
    alts: Vec<String>,

    /// Credited names that disqualify a song
    #[arg(long = "exclude")]
    excludes: Vec<String>,

    /// Genius artist id; skips the search step
    #[arg(long)]
    id: Option<u64>,

    /// JSON file holding an array of query specs
    #[arg(long, conflicts_with = "query")]
    queries: Option<PathBuf>,

    /// Output directory name (single query only)
    #[arg(long, conflicts_with = "queries")]
    dir: Option<String>,
}

impl QueryArgs {
    fn specs(&self) -> Result<Vec<QuerySpec>> {
        if let Some(path) = &self.queries {
            let text = fs_err::read_to_string(path)?;
            return serde_json::from_str(&text)
                .with_context(|| format!("Invalid query file {}", path.display()));
        }
        let query = self.query.clone().context("A query or --queries file is required")?;
        Ok(vec![QuerySpec {
            query,
            artist: self.artist.clone(),
            alts: self.alts.clone(),
            excludes: self.excludes.clone(),
            rg_id: self.id,
        }])
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(base_path) = cli.base_path {
        config.base_path = base_path;
    }

    match cli.command {
        Command::Collect(args) => {
            let puller = collector(&config)?;
            for spec in args.specs()? {
                // one failing query does not stop the rest
                if let Err(e) = puller.pull_all_song_data(&spec, args.dir.as_deref()).await {
                    tracing::error!("{}: {e}", spec.query);
                }
            }
        }
        Command::Fetch { artist } => fetch(&config, &artist).await?,
        Command::Parse { artist } => parse(&config, &artist)?,
        Command::Run(args) => {
            let puller = collector(&config)?;
            for spec in args.specs()? {
                let dir = args.dir.clone().unwrap_or_else(|| spec.dir_name());
                if let Err(e) = run_all(&puller, &config, &spec, &dir).await {
                    tracing::error!("{}: {e:#}", spec.query);
                }
            }
        }
    }

    Ok(())
}

fn collector(config: &Config) -> Result<SongDataPuller<GeniusClient>> {
    let client = GeniusClient::new(config)?;
    fs_err::create_dir_all(&config.base_path)?;
    let audit = AuditLog::timestamped(&config.base_path);
    tracing::info!("Audit log: {}", audit.path().display());
    Ok(SongDataPuller::new(
        client,
        config.base_path.clone(),
        audit,
        config.allow_partial_artist_match,
    ))
}

async fn run_all(
    puller: &SongDataPuller<GeniusClient>,
    config: &Config,
    spec: &QuerySpec,
    dir: &str,
) -> Result<()> {
    puller.pull_all_song_data(spec, Some(dir)).await?;
    fetch(config, dir).await?;
    parse(config, dir)
}

async fn fetch(config: &Config, artist: &str) -> Result<()> {
    let report = LyricsFetcher::new(artist, config)?.process_catalog().await?;
    tracing::info!(
        "{artist}: {} of {} songs written, {} skipped",
        report.written,
        report.songs,
        report.skipped
    );
    Ok(())
}

fn parse(config: &Config, artist: &str) -> Result<()> {
    let processor = SongFileProcessor::new(artist, config.base_path.clone(), RuleClassifier::new());
    let report = processor.process_all_files()?;
    tracing::info!(
        "{artist}: {} verses from {} files -> {}",
        report.verses,
        report.files,
        report.output.display()
    );
    if !report.failures.is_empty() {
        tracing::warn!("{artist}: {} files could not be parsed", report.failures.len());
    }
    Ok(())
}
