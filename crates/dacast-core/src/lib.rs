//! Dacast Core - content-id resolution for video player embeds
//!
//! This crate turns an opaque content id into everything a player needs:
//! - Content id classification (legacy Dacast and Universe schemas)
//! - Provider-specific endpoint construction
//! - Sequential info / token fetching with cancellation
//! - Field extraction into a provider-agnostic playback source
//! - A facade handing the source to an external player
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Dacast Core                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │   Content    │  │   Provider   │  │    Fetch     │           │
//! │  │  Identifier  │  │   Resolver   │  │    Client    │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │   Source    │                              │
//! │                    │  Assembler  │                              │
//! │                    └──────┬──────┘                              │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │   Player    │──▶ player / image loader     │
//! │                    │   Facade    │                              │
//! │                    └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use dacast_core::{ResolverConfig, SourceAssembler};
//!
//! # async fn run() -> dacast_core::Result<()> {
//! let assembler = SourceAssembler::http(ResolverConfig::default())?;
//! let source = assembler.resolve("104301_f_713175", None).await?;
//! println!("{}", source.stream_url);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod identifier;
pub mod provider;
pub mod fetch;
pub mod assembler;
pub mod player;

pub use error::{Error, Result};
pub use types::*;
pub use config::ResolverConfig;
pub use identifier::{ContentIdentifier, DacastId, Provider, UniverseId};
pub use provider::ProviderResolver;
pub use fetch::{FetchClient, HttpFetchClient};
pub use assembler::SourceAssembler;
pub use player::{ImageLoader, PlayerCollaborator, PlayerFacade};

/// Re-exported so callers can cancel without depending on tokio-util
pub use tokio_util::sync::CancellationToken;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once the embedding application's subscriber is up
pub fn init() {
    tracing::info!(version = VERSION, "Dacast Core initialized");
}
