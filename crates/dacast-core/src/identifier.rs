//! Content identifier classification
//!
//! Two identifier shapes are recognised:
//!
//! ```text
//! Dacast (legacy):  {broadcasterId}_{f|c|l|p}_{mediaId}          e.g. 104301_f_713175
//! Universe:         {userId: 5 groups}-{type}-{media: 5 groups}  e.g. 486dee4e-63b8-b2dc-3de3-5e6290a08281-vod-486dee4e-63b8-b2dc-3de3-5e6290a08281
//! ```
//!
//! Anything containing `-` is treated as Universe; the Dacast pattern is only
//! tried afterwards.

use crate::{
    config::ResolverConfig,
    provider::ProviderResolver,
    types::ResolvedEndpoints,
    Error, Result,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

static DACAST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+_(f|c|l|p)_\d+").expect("static pattern compiles")
});

/// Content types accepted in a Dacast identifier
const DACAST_CONTENT_TYPES: [&str; 4] = ["f", "c", "l", "p"];

const UNIVERSE_SEGMENTS: usize = 11;

/// Backend schema family of a content identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Dacast,
    Universe,
    Unknown,
}

impl Provider {
    /// Guess the provider from the shape of a raw identifier
    pub fn detect(raw: &str) -> Provider {
        if raw.contains('-') {
            Provider::Universe
        } else if DACAST_PATTERN.is_match(raw) {
            Provider::Dacast
        } else {
            Provider::Unknown
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Dacast => write!(f, "dacast"),
            Provider::Universe => write!(f, "universe"),
            Provider::Unknown => write!(f, "unknown"),
        }
    }
}

/// Legacy Dacast identifier fields
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DacastId {
    broadcaster_id: u64,
    content_type: String,
    media_id: u64,
    #[serde(rename = "rawId")]
    raw: String,
}

impl DacastId {
    fn parse(raw: &str) -> Result<Self> {
        // Anything past the third segment is ignored
        let mut parts = raw.split('_');
        let (Some(broadcaster), Some(content_type), Some(media)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::malformed(raw, "expected {broadcaster}_{type}_{media}"));
        };

        let broadcaster_id = broadcaster
            .parse::<u64>()
            .map_err(|e| Error::malformed(raw, format!("broadcaster id `{broadcaster}`: {e}")))?;

        if !DACAST_CONTENT_TYPES.contains(&content_type) {
            return Err(Error::malformed(
                raw,
                format!("invalid content type `{content_type}`"),
            ));
        }

        let media_id = media
            .parse::<u64>()
            .map_err(|e| Error::malformed(raw, format!("media id `{media}`: {e}")))?;

        Ok(Self {
            broadcaster_id,
            content_type: content_type.to_string(),
            media_id,
            raw: raw.to_string(),
        })
    }

    pub fn broadcaster_id(&self) -> u64 {
        self.broadcaster_id
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn media_id(&self) -> u64 {
        self.media_id
    }

    /// `{broadcaster}/{type}/{media}`, shared by both Dacast endpoints
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.broadcaster_id, self.content_type, self.media_id)
    }
}

/// Universe identifier fields
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseId {
    user_id: String,
    content_type: String,
    media_string: String,
    #[serde(rename = "rawId")]
    raw: String,
}

impl UniverseId {
    fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<&str> = raw.split('-').collect();

        if segments.len() < UNIVERSE_SEGMENTS {
            return Err(Error::malformed(
                raw,
                format!(
                    "expected at least {UNIVERSE_SEGMENTS} `-`-separated segments, found {}",
                    segments.len()
                ),
            ));
        }

        // Segments past the eleventh are ignored
        Ok(Self {
            user_id: segments[..5].join("-"),
            content_type: segments[5].to_string(),
            media_string: segments[6..UNIVERSE_SEGMENTS].join("-"),
            raw: raw.to_string(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn media_string(&self) -> &str {
        &self.media_string
    }
}

/// A classified, validated content identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ContentIdentifier {
    Dacast(DacastId),
    Universe(UniverseId),
}

impl ContentIdentifier {
    /// Classify a raw identifier. All-or-nothing: no partial identifiers.
    pub fn classify(raw: &str) -> Result<Self> {
        match Provider::detect(raw) {
            Provider::Universe => UniverseId::parse(raw).map(ContentIdentifier::Universe),
            Provider::Dacast => DacastId::parse(raw).map(ContentIdentifier::Dacast),
            Provider::Unknown => Err(Error::UnrecognizedIdentifier(raw.to_string())),
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            ContentIdentifier::Dacast(_) => Provider::Dacast,
            ContentIdentifier::Universe(_) => Provider::Universe,
        }
    }

    /// The identifier exactly as supplied
    pub fn raw_id(&self) -> &str {
        match self {
            ContentIdentifier::Dacast(id) => &id.raw,
            ContentIdentifier::Universe(id) => &id.raw,
        }
    }

    pub fn content_type(&self) -> &str {
        match self {
            ContentIdentifier::Dacast(id) => id.content_type(),
            ContentIdentifier::Universe(id) => id.content_type(),
        }
    }

    pub fn broadcaster_id(&self) -> Option<u64> {
        match self {
            ContentIdentifier::Dacast(id) => Some(id.broadcaster_id()),
            ContentIdentifier::Universe(_) => None,
        }
    }

    pub fn media_id(&self) -> Option<u64> {
        match self {
            ContentIdentifier::Dacast(id) => Some(id.media_id()),
            ContentIdentifier::Universe(_) => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            ContentIdentifier::Universe(id) => Some(id.user_id()),
            ContentIdentifier::Dacast(_) => None,
        }
    }

    pub fn media_string(&self) -> Option<&str> {
        match self {
            ContentIdentifier::Universe(id) => Some(id.media_string()),
            ContentIdentifier::Dacast(_) => None,
        }
    }

    /// Resolver holding this identifier's URL and extraction rules
    pub fn resolver(&self) -> ProviderResolver {
        ProviderResolver::for_identifier(self)
    }

    /// Info and token URLs, without fetching anything
    pub fn endpoints(&self, config: &ResolverConfig) -> Result<ResolvedEndpoints> {
        self.resolver().build_endpoints(self, config)
    }
}

impl FromStr for ContentIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::classify(s)
    }
}

impl std::fmt::Display for ContentIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider(), self.raw_id())
    }
}
