//! Outbound JSON fetching
//!
//! A fetch is a single `GET` with no body and default headers. Anything other
//! than a `200` carrying a JSON object is a failure, and nothing is retried.

use crate::{types::JsonDocument, Error, Result};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

/// Issues one request and decodes its JSON object body
#[async_trait]
pub trait FetchClient: Send + Sync {
    /// Fetch `url`, giving up with [`Error::Cancelled`] once `cancel` fires
    async fn get(&self, url: &Url, cancel: &CancellationToken) -> Result<JsonDocument>;
}

/// [`FetchClient`] backed by a shared `reqwest` connection pool
#[derive(Debug, Clone)]
pub struct HttpFetchClient {
    client: Client,
}

impl HttpFetchClient {
    /// Client with reqwest defaults: no timeout override, no extra headers
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, url: &Url) -> Result<JsonDocument> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| network_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !content_type.contains("json") {
                return Err(Error::Decode {
                    url: url.to_string(),
                    message: format!("unexpected content type `{content_type}`"),
                });
            }
        }

        let body = response.bytes().await.map_err(|e| network_error(url, e))?;
        debug!(bytes = body.len(), "Response received");

        decode_object(url, &body)
    }
}

#[async_trait]
impl FetchClient for HttpFetchClient {
    #[instrument(skip(self, cancel), fields(url = %url))]
    async fn get(&self, url: &Url, cancel: &CancellationToken) -> Result<JsonDocument> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Fetch cancelled");
                Err(Error::Cancelled)
            }
            result = self.fetch(url) => result,
        }
    }
}

fn network_error(url: &Url, err: reqwest::Error) -> Error {
    Error::Network {
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// Decode a body that must be a JSON object
pub(crate) fn decode_object(url: &Url, body: &[u8]) -> Result<JsonDocument> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::Decode {
            url: url.to_string(),
            message: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
        Err(e) => Err(Error::Decode {
            url: url.to_string(),
            message: e.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// In-memory [`FetchClient`] for tests
#[cfg(test)]
pub(crate) mod scripted {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub(crate) enum Route {
        Respond(Result<JsonDocument>),
        /// Never answers; only cancellation ends the call
        Hang,
    }

    #[derive(Default)]
    pub(crate) struct ScriptedFetchClient {
        routes: HashMap<String, Route>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedFetchClient {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(mut self, url: &Url, value: Value) -> Self {
            let doc = match value {
                Value::Object(map) => Ok(map),
                other => Err(Error::Decode {
                    url: url.to_string(),
                    message: format!("expected a JSON object, got {}", json_kind(&other)),
                }),
            };
            self.routes.insert(url.to_string(), Route::Respond(doc));
            self
        }

        pub(crate) fn fail(mut self, url: &Url, err: Error) -> Self {
            self.routes.insert(url.to_string(), Route::Respond(Err(err)));
            self
        }

        pub(crate) fn hang(mut self, url: &Url) -> Self {
            self.routes.insert(url.to_string(), Route::Hang);
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn call_count(&self, url: &Url) -> usize {
            self.calls().iter().filter(|c| *c == url.as_str()).count()
        }
    }

    #[async_trait]
    impl FetchClient for ScriptedFetchClient {
        async fn get(&self, url: &Url, cancel: &CancellationToken) -> Result<JsonDocument> {
            self.calls.lock().unwrap().push(url.to_string());
            match self.routes.get(url.as_str()) {
                Some(Route::Respond(result)) => result.clone(),
                Some(Route::Hang) => {
                    cancel.cancelled().await;
                    Err(Error::Cancelled)
                }
                None => Err(Error::UnexpectedStatus {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }
}
