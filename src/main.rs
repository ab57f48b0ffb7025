use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vidcast::{
    builders::BuilderRegistry,
    config::Config,
    models::{CreateFeedRequest, FeatureLevel, Format, Identity, Quality},
    queue::{BuildJobQueue, BuildWorker},
    repositories::InMemoryFeedRepository,
    services::{FeedService, TierPolicy},
    utils::HashIdGenerator,
};

#[derive(Parser)]
#[command(name = "vidcast")]
#[command(version)]
#[command(about = "Turns video platform channels, groups and users into podcast feeds")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (defaults to $CONFIG_FILE or config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a feed, build it once and print the result as JSON
    Run {
        /// Channel, group, user or playlist URL
        #[arg(short, long)]
        url: String,

        /// Requested episode count; 0 uses the tier ceiling
        #[arg(short, long, default_value_t = 0)]
        page_size: u32,

        #[arg(short, long, value_enum, default_value_t = QualityArg::High)]
        quality: QualityArg,

        #[arg(short, long, value_enum, default_value_t = FormatArg::Video)]
        format: FormatArg,

        #[arg(short, long, value_enum, default_value_t = TierArg::Standard)]
        tier: TierArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum QualityArg {
    High,
    Low,
}

impl From<QualityArg> for Quality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::High => Quality::High,
            QualityArg::Low => Quality::Low,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Video,
    Audio,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Video => Format::Video,
            FormatArg::Audio => Format::Audio,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TierArg {
    Standard,
    Extended,
    ExtendedPagination,
}

impl From<TierArg> for FeatureLevel {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Standard => FeatureLevel::Standard,
            TierArg::Extended => FeatureLevel::ExtendedFeatures,
            TierArg::ExtendedPagination => FeatureLevel::ExtendedPagination,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vidcast={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting vidcast v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let registry = BuilderRegistry::from_config(&config)?;
    let storage = InMemoryFeedRepository::new();
    let queue = Arc::new(BuildJobQueue::new(config.worker.queue_capacity));
    let service = Arc::new(FeedService::new(
        Arc::new(HashIdGenerator::new()),
        Arc::new(storage.clone()),
        queue.clone(),
        registry,
        TierPolicy::new(config.tiers.clone()),
    ));
    let worker = BuildWorker::new(queue.clone(), service.clone(), &config.worker);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            shutdown.cancel();
        }
    });

    match cli.command {
        Command::Run {
            url,
            page_size,
            quality,
            format,
            tier,
        } => {
            let request = CreateFeedRequest {
                url,
                page_size,
                quality: quality.into(),
                format: format.into(),
            };
            let identity = Identity::new(tier.into());

            let hash_id = service.create_feed(&request, &identity, &cancel).await?;
            service.build_feed(&hash_id, &cancel).await?;

            let summary = worker.drain_once(&cancel).await;
            queue.close();
            if summary.processed == 0 {
                bail!("build job for feed {} was not queued", hash_id);
            }
            if let Some((feed_id, err)) = summary.failures.into_iter().next() {
                return Err(err).with_context(|| format!("build failed for feed {feed_id}"));
            }

            let feed = service.query_feed(&hash_id).await?;
            if feed.last_id.is_none() {
                warn!("Feed {} has no episodes", hash_id);
            }

            let json = serde_json::to_string_pretty(&feed).context("failed to serialize feed")?;
            println!("{json}");
        }
    }

    Ok(())
}
