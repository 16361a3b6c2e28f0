use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::error::SourceError;

/// Opaque request/response boundary every adapter goes through.
#[async_trait]
pub trait JsonTransport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, SourceError>;
}

/// `JsonTransport` over a shared reqwest client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// `timeout` of `None` lets a request wait indefinitely
    pub fn new(timeout: Option<Duration>) -> Result<Self, SourceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, SourceError> {
        debug!("GET {}", redact_url(url));

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("GET {} returned HTTP {}", redact_url(url), status);
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

/// Strip query strings and bot tokens so a URL is safe to log
pub fn redact_url(url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);
    path.split('/')
        .map(|segment| {
            if segment.starts_with("bot") && segment.contains(':') {
                "bot<redacted>"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned JSON keyed by exact URL and records every request
    #[derive(Default)]
    pub(crate) struct StaticTransport {
        responses: HashMap<String, Result<Value, u16>>,
        calls: Mutex<Vec<String>>,
    }

    impl StaticTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_json(mut self, url: &str, body: Value) -> Self {
            self.responses.insert(url.to_string(), Ok(body));
            self
        }

        pub(crate) fn with_status(mut self, url: &str, status: u16) -> Self {
            self.responses.insert(url.to_string(), Err(status));
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JsonTransport for StaticTransport {
        async fn get_json(&self, url: &str) -> Result<Value, SourceError> {
            self.calls.lock().unwrap().push(url.to_string());
            match self.responses.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(SourceError::Status(*status)),
                None => Err(SourceError::Transport(format!("no canned response for {}", url))),
            }
        }
    }
}
