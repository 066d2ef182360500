//! Per-provider endpoint and extraction rules

mod dacast;
mod fields;
mod universe;

use crate::{
    config::ResolverConfig,
    identifier::{ContentIdentifier, Provider},
    types::{JsonDocument, PlaybackSource, ResolvedEndpoints},
    Error, Result,
};
use url::Url;

/// Resolution strategy, keyed by the identifier's provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderResolver {
    Dacast,
    Universe,
}

impl ProviderResolver {
    /// Select the resolver matching an identifier
    pub fn for_identifier(id: &ContentIdentifier) -> Self {
        match id {
            ContentIdentifier::Dacast(_) => ProviderResolver::Dacast,
            ContentIdentifier::Universe(_) => ProviderResolver::Universe,
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            ProviderResolver::Dacast => Provider::Dacast,
            ProviderResolver::Universe => Provider::Universe,
        }
    }

    /// Build the info and token URLs for `id`
    pub fn build_endpoints(
        &self,
        id: &ContentIdentifier,
        config: &ResolverConfig,
    ) -> Result<ResolvedEndpoints> {
        match (self, id) {
            (ProviderResolver::Dacast, ContentIdentifier::Dacast(dacast_id)) => {
                dacast::endpoints(dacast_id, config)
            }
            (ProviderResolver::Universe, ContentIdentifier::Universe(_)) => {
                universe::endpoints(id.raw_id(), config)
            }
            _ => Err(Error::ProviderMismatch {
                resolver: self.provider(),
                identifier: id.provider(),
            }),
        }
    }

    /// Merge the info and token responses into a playback source.
    ///
    /// The ad tag is not known here; the assembler attaches it.
    pub fn extract_source(&self, info: &JsonDocument, token: &JsonDocument) -> Result<PlaybackSource> {
        match self {
            ProviderResolver::Dacast => dacast::extract(info, token),
            ProviderResolver::Universe => universe::extract(info, token),
        }
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::InvalidConfig(format!("cannot build endpoint `{raw}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_selection() {
        let dacast = ContentIdentifier::classify("1_c_2").unwrap();
        assert_eq!(dacast.resolver(), ProviderResolver::Dacast);
        assert_eq!(dacast.resolver().provider(), Provider::Dacast);

        let universe = ContentIdentifier::classify("a-b-c-d-e-live-f-g-h-i-j").unwrap();
        assert_eq!(universe.resolver(), ProviderResolver::Universe);
    }

    #[test]
    fn test_mismatched_resolver_is_rejected() {
        let dacast = ContentIdentifier::classify("1_c_2").unwrap();
        let err = ProviderResolver::Universe
            .build_endpoints(&dacast, &ResolverConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            Error::ProviderMismatch {
                resolver: Provider::Universe,
                identifier: Provider::Dacast,
            }
        );
    }

    #[test]
    fn test_endpoints_follow_config() {
        let config = ResolverConfig::with_single_host(Url::parse("http://127.0.0.1:9000/").unwrap());

        let dacast = ContentIdentifier::classify("7_p_8").unwrap();
        let endpoints = dacast.endpoints(&config).unwrap();
        assert_eq!(endpoints.info_url.as_str(), "http://127.0.0.1:9000/b/7/p/8");
        assert_eq!(endpoints.token_url.as_str(), "http://127.0.0.1:9000/token/i/b/7/p/8");

        let universe = ContentIdentifier::classify("a-b-c-d-e-live-f-g-h-i-j").unwrap();
        let endpoints = universe.endpoints(&config).unwrap();
        assert_eq!(
            endpoints.info_url.as_str(),
            "http://127.0.0.1:9000/content/info?contentId=a-b-c-d-e-live-f-g-h-i-j&provider=universe"
        );
    }
}
