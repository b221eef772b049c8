//! yt2mp3 - download a media URL's audio track as a tagged MP3.
//!
//! Prints the published path on stdout. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yt2mp3_core::{
    load_config, validate_config, Fetcher, FsPlacer, Id3Tagger, OutputGuard, Pipeline,
    PipelineRequest, YtDlpFetcher,
};

/// Command-line arguments for yt2mp3
#[derive(Parser, Debug)]
#[command(name = "yt2mp3")]
#[command(about = "Download a video's audio track as a tagged MP3")]
#[command(version)]
struct Args {
    /// Source URL
    url: String,

    /// Output directory, inside the current directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, env = "YT2MP3_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(&args);

    match run(args).await {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(args: &Args) {
    let default_filter = if args.verbose {
        "yt2mp3=debug,yt2mp3_core=debug"
    } else {
        "yt2mp3=info,yt2mp3_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(args: Args) -> Result<PathBuf> {
    let config = load_config(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load config".to_string(),
    })?;
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Configuration: {:?}", config);

    let fetcher = YtDlpFetcher::new(config.fetcher.clone());
    fetcher
        .validate()
        .await
        .context("Downloader is not available")?;

    let guard = OutputGuard::current_dir().context("Failed to resolve working directory")?;
    let pipeline = Pipeline::new(
        config.pipeline.clone(),
        config.tagger.clone(),
        fetcher,
        Id3Tagger::new(),
        FsPlacer::new(config.placer.clone()),
        guard,
    );

    let mut request = PipelineRequest::new(args.url);
    if let Some(dir) = args.output_dir {
        request = request.with_output_dir(dir);
    }

    info!("Converting {}", request.source_url);

    // Dropping the run removes the staging area and kills the downloader
    let published = tokio::select! {
        result = pipeline.run(request) => result?,
        _ = shutdown_signal() => bail!("Interrupted"),
    };

    Ok(published.path)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
