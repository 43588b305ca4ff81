use std::time::Duration;

use qchat_core::{normalize_redirect_url, redirect_lookup_url};
use serde_json::Value;

use crate::client::map_reqwest_error;
use crate::{CommandError, FailureKind};

/// Turns a chatbot endpoint URL into the canonical URL the iframe should load.
#[async_trait::async_trait]
pub trait RedirectResolver: Send + Sync {
    async fn resolve(&self, chatbot_url: &str) -> Result<String, CommandError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestRedirectResolver {
    request_timeout: Option<Duration>,
}

impl ReqwestRedirectResolver {
    pub fn new(request_timeout: Option<Duration>) -> Self {
        Self { request_timeout }
    }
}

#[async_trait::async_trait]
impl RedirectResolver for ReqwestRedirectResolver {
    async fn resolve(&self, chatbot_url: &str) -> Result<String, CommandError> {
        let lookup = reqwest::Url::parse(&redirect_lookup_url(chatbot_url))
            .map_err(|err| CommandError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| CommandError::new(FailureKind::Network, err.to_string()))?;

        let response = client.get(lookup).send().await.map_err(map_reqwest_error)?;
        let text = response.text().await.map_err(map_reqwest_error)?;
        let body: Value = serde_json::from_str(&text)
            .map_err(|err| CommandError::new(FailureKind::MalformedResponse, err.to_string()))?;

        let redirect = body
            .get("redirectUrl")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                CommandError::new(FailureKind::MissingField("redirectUrl"), "no redirect url")
            })?;

        normalize_redirect_url(redirect)
            .map_err(|err| CommandError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}
