use reqwest::Client;
use serde_json::Value;
use std::future::Future;

use crate::error::TransportError;

/// Fetch-like access to a JSON HTTP API
///
/// Implementations resolve to the parsed body on a success status and to a
/// [`TransportError`] otherwise. They must be cheap to clone and safe to call
/// from several tasks at once.
pub trait Transport: Clone + Send + Sync + 'static {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// [`Transport`] backed by reqwest
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
