//! Legacy Dacast provider
//!
//! ```text
//! info:  {dacast_info_base}/b/{broadcaster}/{type}/{media}
//!        { hls, stream: { splash }, theme: { watermark: { url } }, subtitles: [{ src, language, name }] }
//! token: {dacast_token_base}/token/i/b/{broadcaster}/{type}/{media}
//!        { token }
//! ```
//!
//! The stream URL is `hls` followed by `token`, verbatim.

use super::fields::{absolute_url, optional_str, required_str, text_tracks, TrackKeys};
use super::parse_endpoint;
use crate::{
    config::{trimmed, ResolverConfig},
    identifier::DacastId,
    types::{JsonDocument, PlaybackSource, ResolvedEndpoints},
    Result,
};

const TRACK_KEYS: TrackKeys = TrackKeys {
    src: "src",
    language: "language",
    label: "name",
};

pub(super) fn endpoints(id: &DacastId, config: &ResolverConfig) -> Result<ResolvedEndpoints> {
    let path = id.path();
    Ok(ResolvedEndpoints {
        info_url: parse_endpoint(&format!("{}/b/{path}", trimmed(&config.dacast_info_base)))?,
        token_url: parse_endpoint(&format!(
            "{}/token/i/b/{path}",
            trimmed(&config.dacast_token_base)
        ))?,
    })
}

pub(super) fn extract(info: &JsonDocument, token: &JsonDocument) -> Result<PlaybackSource> {
    let hls = required_str(info, &["hls"])?;
    let access = required_str(token, &["token"])?;
    let splash = required_str(info, &["stream", "splash"])?;

    let watermark = optional_str(info, &["theme", "watermark", "url"]).map(absolute_url);
    let tracks = text_tracks(info, &["subtitles"], &TRACK_KEYS)?;

    Ok(PlaybackSource::hls(format!("{hls}{access}"), splash)
        .with_watermark(watermark)
        .with_text_tracks(tracks))
}
