//! Resolver configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

const DACAST_INFO_BASE: &str = "https://json.dacast.com";
const DACAST_TOKEN_BASE: &str = "https://services.dacast.com";
const UNIVERSE_BASE: &str = "https://playback.dacast.com";

/// Upstream hosts used to build the info and token endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Host serving legacy Dacast content info (`/b/...`)
    pub dacast_info_base: Url,
    /// Host serving legacy Dacast access tokens (`/token/i/b/...`)
    pub dacast_token_base: Url,
    /// Host serving Universe content info and access (`/content/...`)
    pub universe_base: Url,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            dacast_info_base: default_base(DACAST_INFO_BASE),
            dacast_token_base: default_base(DACAST_TOKEN_BASE),
            universe_base: default_base(UNIVERSE_BASE),
        }
    }
}

// Only ever called with the constants above.
fn default_base(raw: &str) -> Url {
    Url::parse(raw).expect("default base URL is valid")
}

impl ResolverConfig {
    /// Point every provider at a single host (staging or mock servers)
    pub fn with_single_host(base: Url) -> Self {
        Self {
            dacast_info_base: base.clone(),
            dacast_token_base: base.clone(),
            universe_base: base,
        }
    }

    /// Reject bases that cannot serve HTTP requests
    pub fn validate(&self) -> Result<()> {
        for (name, base) in [
            ("dacast_info_base", &self.dacast_info_base),
            ("dacast_token_base", &self.dacast_token_base),
            ("universe_base", &self.universe_base),
        ] {
            if !matches!(base.scheme(), "http" | "https") {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be http(s), got `{base}`"
                )));
            }
            if base.cannot_be_a_base() {
                return Err(Error::InvalidConfig(format!("{name} is not a base URL: `{base}`")));
            }
        }
        Ok(())
    }
}

/// Base URL as a string without its trailing slash, ready for path appends
pub(crate) fn trimmed(base: &Url) -> &str {
    base.as_str().trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = ResolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(trimmed(&config.dacast_info_base), "https://json.dacast.com");
    }

    #[test]
    fn test_rejects_non_http_base() {
        let mut config = ResolverConfig::default();
        config.universe_base = Url::parse("ftp://playback.dacast.com").unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{"universe_base":"http://127.0.0.1:8080/"}"#).unwrap();
        assert_eq!(trimmed(&config.universe_base), "http://127.0.0.1:8080");
        assert_eq!(config.dacast_token_base, ResolverConfig::default().dacast_token_base);
    }
}
