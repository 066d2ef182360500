//! Universe provider
//!
//! ```text
//! info:  {universe_base}/content/info?contentId={raw}&provider=universe
//!        { contentInfo: { splashscreenUrl, features: { watermark: { imageUrl },
//!                         subtitles: [{ sourceVtt, languageShortName, languageLongName }] } } }
//! access: {universe_base}/content/access?contentId={raw}&provider=universe
//!        { hls }
//! ```
//!
//! `hls` from the access response is already the complete stream URL.

use super::fields::{absolute_url, optional_str, required_str, text_tracks, TrackKeys};
use crate::{
    config::{trimmed, ResolverConfig},
    types::{JsonDocument, PlaybackSource, ResolvedEndpoints},
    Error, Result,
};
use url::Url;

const PROVIDER_PARAM: &str = "universe";

const TRACK_KEYS: TrackKeys = TrackKeys {
    src: "sourceVtt",
    language: "languageShortName",
    label: "languageLongName",
};

pub(super) fn endpoints(raw_id: &str, config: &ResolverConfig) -> Result<ResolvedEndpoints> {
    Ok(ResolvedEndpoints {
        info_url: content_url(config, "info", raw_id)?,
        token_url: content_url(config, "access", raw_id)?,
    })
}

fn content_url(config: &ResolverConfig, action: &str, raw_id: &str) -> Result<Url> {
    let base = format!("{}/content/{action}", trimmed(&config.universe_base));
    Url::parse_with_params(&base, &[("contentId", raw_id), ("provider", PROVIDER_PARAM)])
        .map_err(|e| Error::InvalidConfig(format!("cannot build endpoint from `{base}`: {e}")))
}

pub(super) fn extract(info: &JsonDocument, token: &JsonDocument) -> Result<PlaybackSource> {
    let hls = required_str(token, &["hls"])?;
    let splash = required_str(info, &["contentInfo", "splashscreenUrl"])?;

    let watermark = optional_str(info, &["contentInfo", "features", "watermark", "imageUrl"])
        .map(absolute_url);
    let tracks = text_tracks(info, &["contentInfo", "features", "subtitles"], &TRACK_KEYS)?;

    Ok(PlaybackSource::hls(hls, splash)
        .with_watermark(watermark)
        .with_text_tracks(tracks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::ContentIdentifier;
    use serde_json::{json, Value};

    const RAW: &str =
        "486dee4e-63b8-b2dc-3de3-5e6290a08281-vod-486dee4e-63b8-b2dc-3de3-5e6290a08281";

    fn doc(value: Value) -> JsonDocument {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_endpoints_default_host() {
        let id = ContentIdentifier::classify(RAW).unwrap();
        let endpoints = id.endpoints(&ResolverConfig::default()).unwrap();
        assert_eq!(
            endpoints.info_url.as_str(),
            format!("https://playback.dacast.com/content/info?contentId={RAW}&provider=universe")
        );
        assert_eq!(
            endpoints.token_url.as_str(),
            format!("https://playback.dacast.com/content/access?contentId={RAW}&provider=universe")
        );
    }

    #[test]
    fn test_extract() {
        let info = doc(json!({
            "contentInfo": {
                "splashscreenUrl": "https://cdn.dacast.com/splash.png",
                "features": {
                    "watermark": {"imageUrl": "//cdn.dacast.com/wm.png"},
                    "subtitles": [{
                        "sourceVtt": "https://cdn.dacast.com/de.vtt",
                        "languageShortName": "de",
                        "languageLongName": "Deutsch",
                    }],
                },
            },
        }));
        let token = doc(json!({"hls": "https://universe.dacast.com/a/b.m3u8?token=z"}));

        let source = extract(&info, &token).unwrap();
        assert_eq!(source.stream_url, "https://universe.dacast.com/a/b.m3u8?token=z");
        assert_eq!(source.poster_url, "https://cdn.dacast.com/splash.png");
        assert_eq!(
            source.watermark_url.as_deref(),
            Some("https://cdn.dacast.com/wm.png")
        );
        assert_eq!(source.text_tracks.len(), 1);
        assert_eq!(source.text_tracks[0].src, "https://cdn.dacast.com/de.vtt");
        assert_eq!(source.text_tracks[0].label, "Deutsch");
    }

    #[test]
    fn test_extract_without_features() {
        let info = doc(json!({"contentInfo": {"splashscreenUrl": "s.png"}}));
        let token = doc(json!({"hls": "https://u/x.m3u8"}));

        let source = extract(&info, &token).unwrap();
        assert_eq!(source.watermark_url, None);
        assert!(source.text_tracks.is_empty());
    }

    #[test]
    fn test_extract_missing_hls() {
        let info = doc(json!({"contentInfo": {"splashscreenUrl": "s.png"}}));
        let token = doc(json!({"token": "?t=1"}));
        assert_eq!(extract(&info, &token).unwrap_err(), Error::missing("hls"));
    }

    #[test]
    fn test_extract_missing_splash() {
        let info = doc(json!({"contentInfo": {}}));
        let token = doc(json!({"hls": "https://u/x.m3u8"}));
        assert_eq!(
            extract(&info, &token).unwrap_err(),
            Error::missing("contentInfo.splashscreenUrl")
        );
    }
}
