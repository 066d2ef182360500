//! CLI command implementations

use crate::output::{format_json, print_source, OutputFormat};
use dacast_core::{
    ContentIdentifier, ImageLoader, PlaybackSource, PlayerCollaborator, PlayerFacade,
    ResolvedEndpoints, ResolverConfig, SourceAssembler,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Classification result shown by `classify`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassifyReport<'a> {
    #[serde(flatten)]
    identifier: &'a ContentIdentifier,
    endpoints: ResolvedEndpoints,
}

/// Classify a content id and print its endpoints
pub fn classify(content_id: &str, config: &ResolverConfig, format: &str) -> anyhow::Result<()> {
    let id = ContentIdentifier::classify(content_id)?;
    let endpoints = id.endpoints(config)?;

    if let OutputFormat::Json = OutputFormat::from(format) {
        let report = ClassifyReport {
            identifier: &id,
            endpoints,
        };
        println!("{}", format_json(&report));
        return Ok(());
    }

    println!("Content id: {}", id.raw_id());
    println!("  Provider: {}", id.provider());
    println!("  Content type: {}", id.content_type());
    if let (Some(broadcaster), Some(media)) = (id.broadcaster_id(), id.media_id()) {
        println!("  Broadcaster: {}", broadcaster);
        println!("  Media: {}", media);
    }
    if let (Some(user), Some(media)) = (id.user_id(), id.media_string()) {
        println!("  User: {}", user);
        println!("  Media: {}", media);
    }
    println!("\nEndpoints:");
    println!("  Info:  {}", endpoints.info_url);
    println!("  Token: {}", endpoints.token_url);

    Ok(())
}

/// Prints the delivered source instead of driving a video surface
struct PrintingPlayer {
    format: String,
}

impl PlayerCollaborator for PrintingPlayer {
    fn set_source(&self, source: PlaybackSource) {
        print_source(&source, &self.format);
    }
}

/// Logs the watermark URL instead of rendering it
struct LoggingImageLoader;

impl ImageLoader for LoggingImageLoader {
    fn load_image(&self, url: &str) {
        info!(url = %url, "Watermark overlay requested");
    }
}

/// Resolve a content id and print the playback source
pub async fn resolve(
    content_id: &str,
    ad_tag: Option<&str>,
    config: ResolverConfig,
    format: &str,
) -> anyhow::Result<()> {
    let assembler = SourceAssembler::http(config)?;
    let player = Arc::new(PrintingPlayer {
        format: format.to_string(),
    });
    let facade = Arc::new(
        PlayerFacade::new(assembler, player).with_watermark_loader(Arc::new(LoggingImageLoader)),
    );

    // Ctrl-C tears the embed down; the pending resolution is cancelled
    let interrupt = {
        let facade = facade.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                facade.teardown();
            }
        })
    };

    let result = facade.load(content_id, ad_tag).await;
    interrupt.abort();

    result.map_err(|e| anyhow::anyhow!("[{}] {}", e.error_code(), e))
}
