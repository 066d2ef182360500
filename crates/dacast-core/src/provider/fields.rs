//! Checked lookups into decoded JSON documents

use crate::{
    types::{JsonDocument, TextTrack},
    Error, Result,
};
use serde_json::Value;
use tracing::warn;

/// Field names of one provider's subtitle entries
pub(crate) struct TrackKeys {
    pub src: &'static str,
    pub language: &'static str,
    pub label: &'static str,
}

/// Walk `path` through nested objects
pub(crate) fn lookup<'a>(doc: &'a JsonDocument, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(doc.get(*first)?, |value, key| value.as_object()?.get(*key))
}

/// A non-empty string that must be present
pub(crate) fn required_str<'a>(doc: &'a JsonDocument, path: &[&str]) -> Result<&'a str> {
    match lookup(doc, path) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
        _ => Err(Error::missing(path.join("."))),
    }
}

/// A string that may be absent or null. Wrong shapes degrade to absent.
pub(crate) fn optional_str<'a>(doc: &'a JsonDocument, path: &[&str]) -> Option<&'a str> {
    match lookup(doc, path) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            warn!(field = %path.join("."), value = %other, "Ignoring optional field of unexpected type");
            None
        }
    }
}

/// Normalize an optional subtitle array into text tracks
pub(crate) fn text_tracks(
    doc: &JsonDocument,
    path: &[&str],
    keys: &TrackKeys,
) -> Result<Vec<TextTrack>> {
    let entries = match lookup(doc, path) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            warn!(field = %path.join("."), value = %other, "Subtitles are not an array, ignoring");
            return Ok(Vec::new());
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| text_track(entry, keys).map_err(|reason| Error::MalformedEntry {
            path: path.join("."),
            index,
            reason,
        }))
        .collect()
}

fn text_track(entry: &Value, keys: &TrackKeys) -> std::result::Result<TextTrack, String> {
    let entry = entry.as_object().ok_or_else(|| "not an object".to_string())?;

    let src = match entry.get(keys.src) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(format!("missing `{}`", keys.src)),
    };
    let language_code = match entry.get(keys.language) {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(format!("missing `{}`", keys.language)),
    };
    // Unlabelled tracks keep an empty label
    let label = match entry.get(keys.label) {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    Ok(TextTrack {
        src,
        language_code,
        label,
    })
}

/// Prefix scheme-relative URLs (`//host/path`) with `https:`
pub(crate) fn absolute_url(raw: &str) -> String {
    if raw.starts_with("//") {
        format!("https:{raw}")
    } else {
        raw.to_string()
    }
}
