//! Player Facade - hands resolved sources to the embedding UI
//!
//! The facade owns one embed's lifetime. It resolves a content id, then
//! calls [`PlayerCollaborator::set_source`] exactly once on the task that
//! awaited [`PlayerFacade::load`], so the embedding application controls
//! which context the player is touched from. Tearing the facade down cancels
//! any in-flight resolution and guarantees no callback fires afterwards.

use crate::{
    assembler::SourceAssembler,
    types::{PlaybackSource, ResolveState},
    Error, Result,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// The external video player
pub trait PlayerCollaborator: Send + Sync {
    /// Configure playback. Called at most once per facade.
    fn set_source(&self, source: PlaybackSource);
}

/// Fire-and-forget image loader used for the watermark overlay
pub trait ImageLoader: Send + Sync {
    /// Start loading `url`; must not block
    fn load_image(&self, url: &str);
}

pub struct PlayerFacade {
    assembler: SourceAssembler,
    player: Arc<dyn PlayerCollaborator>,
    watermark_loader: Option<Arc<dyn ImageLoader>>,
    cancel: CancellationToken,
    in_flight: AtomicBool,
    delivered: AtomicBool,
    state_tx: watch::Sender<ResolveState>,
}

impl PlayerFacade {
    pub fn new(assembler: SourceAssembler, player: Arc<dyn PlayerCollaborator>) -> Self {
        let (state_tx, _) = watch::channel(ResolveState::Idle);
        Self {
            assembler,
            player,
            watermark_loader: None,
            cancel: CancellationToken::new(),
            in_flight: AtomicBool::new(false),
            delivered: AtomicBool::new(false),
            state_tx,
        }
    }

    pub fn with_watermark_loader(mut self, loader: Arc<dyn ImageLoader>) -> Self {
        self.watermark_loader = Some(loader);
        self
    }

    /// Current resolution state
    pub fn state(&self) -> ResolveState {
        *self.state_tx.borrow()
    }

    /// Subscribe to resolution state changes
    pub fn subscribe_state(&self) -> watch::Receiver<ResolveState> {
        self.state_tx.subscribe()
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolve `content_id` and hand the result to the player.
    ///
    /// A failed load may be retried; once a source was delivered, further
    /// loads fail with [`Error::AlreadyLoaded`].
    #[instrument(skip(self, ad_tag_url))]
    pub async fn load(&self, content_id: &str, ad_tag_url: Option<&str>) -> Result<()> {
        if self.is_torn_down() {
            return Err(Error::Cancelled);
        }
        if self.delivered.load(Ordering::SeqCst) || self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyLoaded);
        }

        let result = self
            .assembler
            .resolve_observed(content_id, ad_tag_url, &self.cancel, &self.state_tx)
            .await
            .and_then(|source| self.deliver(source));

        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    fn deliver(&self, source: PlaybackSource) -> Result<()> {
        // Torn down while the last step completed
        if self.is_torn_down() {
            debug!("Dropping resolved source after teardown");
            self.state_tx.send_replace(ResolveState::Cancelled);
            return Err(Error::Cancelled);
        }

        if let (Some(loader), Some(url)) = (&self.watermark_loader, &source.watermark_url) {
            loader.load_image(url);
        }

        self.delivered.store(true, Ordering::SeqCst);
        self.player.set_source(source);
        info!("Source handed to player");
        Ok(())
    }

    /// Cancel any in-flight resolution. Idempotent.
    pub fn teardown(&self) {
        if !self.cancel.is_cancelled() {
            info!("Tearing down player facade");
            self.cancel.cancel();
        }
    }
}

impl Drop for PlayerFacade {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
