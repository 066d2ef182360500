//! Source Assembler - Orchestrates a single resolution
//!
//! ```text
//! Idle → Classifying → FetchingInfo → FetchingToken → Extracting → Ready
//!            │              │               │              │
//!            └──────────────┴───────┬───────┴──────────────┘
//!                                   ▼
//!                         Failed (or Cancelled)
//! ```
//!
//! The token request is only issued after the info request has completed.
//! Every resolution owns its identifier, responses and source; the only
//! thing shared between concurrent resolutions is the fetch client.

use crate::{
    config::ResolverConfig,
    fetch::{FetchClient, HttpFetchClient},
    identifier::ContentIdentifier,
    types::{PlaybackSource, ResolutionId, ResolveState},
    Error, Result,
};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, field, info, instrument, warn, Span};

/// Resolves content ids into playback sources
#[derive(Clone)]
pub struct SourceAssembler {
    fetcher: Arc<dyn FetchClient>,
    config: ResolverConfig,
}

impl SourceAssembler {
    pub fn new(fetcher: Arc<dyn FetchClient>, config: ResolverConfig) -> Self {
        Self { fetcher, config }
    }

    /// Assembler using [`HttpFetchClient`] and validated `config`
    pub fn http(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(Arc::new(HttpFetchClient::new()?), config))
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `content_id` into a playback source
    pub async fn resolve(&self, content_id: &str, ad_tag_url: Option<&str>) -> Result<PlaybackSource> {
        self.resolve_with_cancel(content_id, ad_tag_url, &CancellationToken::new())
            .await
    }

    /// Resolve, abandoning in-flight fetches when `cancel` fires
    pub async fn resolve_with_cancel(
        &self,
        content_id: &str,
        ad_tag_url: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<PlaybackSource> {
        let (state_tx, _) = watch::channel(ResolveState::Idle);
        self.resolve_observed(content_id, ad_tag_url, cancel, &state_tx)
            .await
    }

    /// Resolve, publishing every state transition on `state_tx`
    #[instrument(
        skip(self, ad_tag_url, cancel, state_tx),
        fields(resolution_id = %ResolutionId::new(), provider = field::Empty)
    )]
    pub async fn resolve_observed(
        &self,
        content_id: &str,
        ad_tag_url: Option<&str>,
        cancel: &CancellationToken,
        state_tx: &watch::Sender<ResolveState>,
    ) -> Result<PlaybackSource> {
        let mut machine = StateMachine::start(state_tx);

        let result = self.run(&mut machine, content_id, ad_tag_url, cancel).await;

        match &result {
            Ok(source) => {
                machine.advance(ResolveState::Ready);
                info!(
                    stream_url = %source.stream_url,
                    text_tracks = source.text_tracks.len(),
                    watermark = source.watermark_url.is_some(),
                    ads = source.requires_ad_integration(),
                    "Playback source ready"
                );
            }
            Err(Error::Cancelled) => {
                machine.advance(ResolveState::Cancelled);
                info!("Resolution cancelled");
            }
            Err(err) => {
                machine.advance(ResolveState::Failed);
                warn!(code = err.error_code(), error = %err, "Resolution failed");
            }
        }

        result
    }

    async fn run(
        &self,
        machine: &mut StateMachine<'_>,
        content_id: &str,
        ad_tag_url: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<PlaybackSource> {
        machine.advance(ResolveState::Classifying);
        let id = ContentIdentifier::classify(content_id)?;
        Span::current().record("provider", field::display(id.provider()));

        let resolver = id.resolver();
        let endpoints = resolver.build_endpoints(&id, &self.config)?;
        ensure_live(cancel)?;

        machine.advance(ResolveState::FetchingInfo);
        let info = self.fetcher.get(&endpoints.info_url, cancel).await?;
        ensure_live(cancel)?;

        machine.advance(ResolveState::FetchingToken);
        let token = self.fetcher.get(&endpoints.token_url, cancel).await?;
        ensure_live(cancel)?;

        machine.advance(ResolveState::Extracting);
        let source = resolver.extract_source(&info, &token)?;

        let ad_tag = ad_tag_url.filter(|url| !url.is_empty()).map(str::to_string);
        Ok(source.with_ad_tag(ad_tag))
    }
}

fn ensure_live(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(Error::Cancelled)
    } else {
        Ok(())
    }
}

/// Tracks one resolution's state and publishes each transition
struct StateMachine<'a> {
    current: ResolveState,
    tx: &'a watch::Sender<ResolveState>,
}

impl<'a> StateMachine<'a> {
    fn start(tx: &'a watch::Sender<ResolveState>) -> Self {
        tx.send_replace(ResolveState::Idle);
        Self {
            current: ResolveState::Idle,
            tx,
        }
    }

    fn advance(&mut self, next: ResolveState) {
        if !self.current.can_transition_to(next) {
            warn!(from = %self.current, to = %next, "Ignoring invalid state transition");
            return;
        }
        debug!(from = %self.current, to = %next, "State transition");
        self.current = next;
        self.tx.send_replace(next);
    }
}
