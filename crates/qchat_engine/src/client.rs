use std::sync::Arc;
use std::time::Duration;

use qchat_core::parse_indexed_pages;
use qchat_logging::qchat_debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::{Command, CommandError, FailureKind, SessionProvider};

#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    /// Prefix of the command endpoint; `executeCommand` is appended verbatim.
    pub endpoint_base: String,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn command_url(&self) -> String {
        format!("{}executeCommand", self.endpoint_base)
    }
}

/// POST `{type, content}` to the command endpoint and hand back the JSON body.
#[async_trait::async_trait]
pub trait CommandClient: Send + Sync {
    async fn execute(&self, command: &Command) -> Result<Value, CommandError>;

    /// Pages indexed for one tenant. A missing or non-numeric field is `Ok(None)`.
    async fn indexing_status(
        &self,
        region_q: &str,
        application_id_q: &str,
    ) -> Result<Option<i64>, CommandError> {
        let body = self
            .execute(&Command::GetIndexingStatus {
                region_q: region_q.to_string(),
                application_id_q: application_id_q.to_string(),
            })
            .await?;
        Ok(integer_field(&body, "indexedPages"))
    }

    /// Indexed documents across all tenants.
    async fn total_indexed_docs(&self) -> Result<f64, CommandError> {
        let body = self.execute(&Command::GetTotalKendraIndexedDocs).await?;
        number_field(&body, "totalKendraIndexedDocs")
            .filter(|total| *total >= 0.0)
            .ok_or_else(|| {
                CommandError::new(
                    FailureKind::MissingField("totalKendraIndexedDocs"),
                    "response carries no usable total",
                )
            })
    }
}

pub struct ReqwestCommandClient {
    settings: ClientSettings,
    session: Arc<dyn SessionProvider>,
}

impl ReqwestCommandClient {
    pub fn new(settings: ClientSettings, session: Arc<dyn SessionProvider>) -> Self {
        Self { settings, session }
    }

    fn build_client(&self) -> Result<reqwest::Client, CommandError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| CommandError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl CommandClient for ReqwestCommandClient {
    async fn execute(&self, command: &Command) -> Result<Value, CommandError> {
        let url = reqwest::Url::parse(&self.settings.command_url())
            .map_err(|err| CommandError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;
        let token = self.session.id_token().await;
        if token.is_none() {
            qchat_debug!("No session token; sending {} unauthenticated", command.command_type());
        }

        let mut request = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(command.to_body().to_string());
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CommandError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&text)
            .map_err(|err| CommandError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> CommandError {
    if err.is_timeout() {
        return CommandError::new(FailureKind::Timeout, err.to_string());
    }
    CommandError::new(FailureKind::Network, err.to_string())
}

/// Reads a count that may arrive as an integer, a float or a numeric string.
/// A positive fraction rounds up so that any progress at all is committed.
pub(crate) fn integer_field(body: &Value, field: &str) -> Option<i64> {
    match body.get(field)? {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite())
                .map(|value| {
                    let whole = if value > 0.0 { value.ceil() } else { value.trunc() };
                    whole as i64
                })
        }),
        Value::String(raw) => parse_indexed_pages(raw),
        _ => None,
    }
}

pub(crate) fn number_field(body: &Value, field: &str) -> Option<f64> {
    match body.get(field)? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite())
}
