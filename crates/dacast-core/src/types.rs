//! Core types for Dacast Core

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// MIME type of every stream handed to the player
pub const HLS_MIME_TYPE: &str = "application/x-mpegurl";

/// Decoded upstream response body. Always a JSON object.
pub type JsonDocument = serde_json::Map<String, serde_json::Value>;

/// Unique identifier for a single resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionId(pub Uuid);

impl ResolutionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ResolutionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ResolutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The info and token URLs for one content identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEndpoints {
    pub info_url: Url,
    pub token_url: Url,
}

/// A subtitle track attached to the playback source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTrack {
    /// WebVTT source URL
    pub src: String,
    /// Short language code (e.g. "en")
    pub language_code: String,
    /// Human-readable label
    pub label: String,
}

/// Provider-agnostic bundle handed to the player collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSource {
    /// Complete HLS URL, access token included
    pub stream_url: String,
    /// Always [`HLS_MIME_TYPE`]
    pub stream_type: String,
    /// Poster / splash image
    pub poster_url: String,
    /// Absolute watermark image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark_url: Option<String>,
    pub text_tracks: Vec<TextTrack>,
    /// Ad tag supplied by the caller of `resolve`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_tag_url: Option<String>,
}

impl PlaybackSource {
    /// Create an HLS source with no watermark, subtitles or ads
    pub fn hls(stream_url: impl Into<String>, poster_url: impl Into<String>) -> Self {
        Self {
            stream_url: stream_url.into(),
            stream_type: HLS_MIME_TYPE.to_string(),
            poster_url: poster_url.into(),
            watermark_url: None,
            text_tracks: Vec::new(),
            ad_tag_url: None,
        }
    }

    pub fn with_watermark(mut self, url: Option<String>) -> Self {
        self.watermark_url = url;
        self
    }

    pub fn with_text_tracks(mut self, tracks: Vec<TextTrack>) -> Self {
        self.text_tracks = tracks;
        self
    }

    pub fn with_ad_tag(mut self, url: Option<String>) -> Self {
        self.ad_tag_url = url;
        self
    }

    /// Whether the player must enable its ad (IMA) integration
    pub fn requires_ad_integration(&self) -> bool {
        self.ad_tag_url.is_some()
    }
}

/// Resolution state machine
///
/// `Ready`, `Failed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolveState {
    Idle,
    Classifying,
    FetchingInfo,
    FetchingToken,
    Extracting,
    Ready,
    Failed,
    Cancelled,
}

impl ResolveState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ResolveState::Ready | ResolveState::Failed | ResolveState::Cancelled
        )
    }

    /// Check if transition to new state is valid
    pub fn can_transition_to(&self, next: ResolveState) -> bool {
        use ResolveState::*;

        if self.is_terminal() {
            return false;
        }
        if next == Cancelled {
            return true;
        }

        matches!(
            (self, next),
            (Idle, Classifying)
                | (Classifying, FetchingInfo)
                | (Classifying, Failed)
                | (FetchingInfo, FetchingToken)
                | (FetchingInfo, Failed)
                | (FetchingToken, Extracting)
                | (FetchingToken, Failed)
                | (Extracting, Ready)
                | (Extracting, Failed)
        )
    }
}

impl std::fmt::Display for ResolveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveState::Idle => write!(f, "idle"),
            ResolveState::Classifying => write!(f, "classifying"),
            ResolveState::FetchingInfo => write!(f, "fetching_info"),
            ResolveState::FetchingToken => write!(f, "fetching_token"),
            ResolveState::Extracting => write!(f, "extracting"),
            ResolveState::Ready => write!(f, "ready"),
            ResolveState::Failed => write!(f, "failed"),
            ResolveState::Cancelled => write!(f, "cancelled"),
        }
    }
}
