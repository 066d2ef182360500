//! Output formatting for CLI

use dacast_core::PlaybackSource;
use serde::Serialize;

/// Output format options
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// Render as pretty-printed JSON
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Print a resolved source
pub fn print_source(source: &PlaybackSource, format: &str) {
    if let OutputFormat::Json = OutputFormat::from(format) {
        println!("{}", format_json(source));
        return;
    }

    println!("Playback source:");
    println!("  Stream: {} ({})", source.stream_url, source.stream_type);
    println!("  Poster: {}", source.poster_url);
    if let Some(ref watermark) = source.watermark_url {
        println!("  Watermark: {}", watermark);
    }
    if let Some(ref ad_tag) = source.ad_tag_url {
        println!("  Ad tag: {}", ad_tag);
    }

    if !source.text_tracks.is_empty() {
        println!("\nText tracks:");
        for (i, track) in source.text_tracks.iter().enumerate() {
            println!("  {}. {} [{}] {}", i + 1, track.label, track.language_code, track.src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert!(matches!(OutputFormat::from("JSON"), OutputFormat::Json));
        assert!(matches!(OutputFormat::from("table"), OutputFormat::Text));
    }

    #[test]
    fn test_json_output() {
        let source = PlaybackSource::hls("http://x/?t=1", "p.jpg");
        let out = format_json(&source);
        assert!(out.contains("\"streamUrl\": \"http://x/?t=1\""));
    }
}
