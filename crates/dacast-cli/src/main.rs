//! Dacast CLI - Headless content-id resolver
//!
//! Features:
//! - Content id classification and endpoint preview
//! - Full playback source resolution
//! - Text or JSON output

use clap::{Parser, Subcommand};
use dacast_core::ResolverConfig;
use tracing_subscriber::EnvFilter;
use url::Url;

mod commands;
mod output;

/// Dacast CLI - Content id resolution toolkit
#[derive(Parser)]
#[command(name = "dacast-cli")]
#[command(version)]
#[command(about = "Resolve Dacast content ids into playback sources", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Log format (text, json)
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Override the legacy Dacast info host
    #[arg(long)]
    dacast_info_base: Option<Url>,

    /// Override the legacy Dacast token host
    #[arg(long)]
    dacast_token_base: Option<Url>,

    /// Override the Universe playback host
    #[arg(long)]
    universe_base: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a content id and show its endpoints (no network)
    Classify {
        /// Content id, e.g. 104301_f_713175
        content_id: String,
    },

    /// Resolve a content id into a playback source
    Resolve {
        /// Content id, e.g. 104301_f_713175
        content_id: String,

        /// Ad tag (VAST) URL to attach to the source
        #[arg(short, long)]
        ad_tag: Option<String>,
    },
}

impl Cli {
    fn resolver_config(&self) -> ResolverConfig {
        let mut config = ResolverConfig::default();
        if let Some(base) = &self.dacast_info_base {
            config.dacast_info_base = base.clone();
        }
        if let Some(base) = &self.dacast_token_base {
            config.dacast_token_base = base.clone();
        }
        if let Some(base) = &self.universe_base {
            config.universe_base = base.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    dacast_core::init();

    let config = cli.resolver_config();
    config.validate()?;

    match &cli.command {
        Commands::Classify { content_id } => {
            commands::classify(content_id, &config, &cli.format)?;
        }
        Commands::Resolve { content_id, ad_tag } => {
            commands::resolve(content_id, ad_tag.as_deref(), config, &cli.format).await?;
        }
    }

    Ok(())
}
