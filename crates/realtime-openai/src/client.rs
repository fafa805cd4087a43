//! Realtime call creation over HTTP.
//!
//! A call is started by POSTing the local SDP offer together with the
//! session configuration as a multipart form. The endpoint replies
//! `201 Created` with the SDP answer as the response body; the caller then
//! applies that answer to its peer connection.

use crate::config::OpenaiConfig;
use crate::error::RealtimeError;
use crate::session::SessionCreateRequest;
use realtime_shared::Logger;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const CALLS_PATH: &str = "/realtime/calls";

/// Timeout for the whole offer/answer request.
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(CALL_TIMEOUT)
        .user_agent(concat!("realtime-openai/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// Authenticated client for the realtime calls endpoint.
#[derive(Clone)]
pub struct RealtimeClient {
    logger: Logger,
    api_key: String,
    org_id: String,
    project_id: String,
    base_url: String,
    http: reqwest::Client,
}

impl fmt::Debug for RealtimeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealtimeClient")
            .field("api_key", &"[REDACTED]")
            .field("org_id", &self.org_id)
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RealtimeClient {
    /// Creates a client.
    ///
    /// `api_key`, `org_id` and `project_id` are required. An empty
    /// `base_url` selects [`DEFAULT_BASE_URL`]; a trailing slash is dropped.
    pub fn new(
        logger: Logger,
        api_key: impl Into<String>,
        org_id: impl Into<String>,
        project_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, RealtimeError> {
        let api_key = api_key.into();
        let org_id = org_id.into();
        let project_id = project_id.into();
        let mut base_url = base_url.into();

        if api_key.is_empty() {
            return Err(RealtimeError::Config("api_key is required".to_string()));
        }
        if org_id.is_empty() {
            return Err(RealtimeError::Config("org_id is required".to_string()));
        }
        if project_id.is_empty() {
            return Err(RealtimeError::Config("project_id is required".to_string()));
        }
        while base_url.ends_with('/') {
            base_url.pop();
        }
        if base_url.is_empty() {
            base_url = DEFAULT_BASE_URL.to_string();
        }

        Ok(Self {
            logger,
            api_key,
            org_id,
            project_id,
            base_url,
            http: build_http_client(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Full URL of the call-creation endpoint.
    pub fn calls_url(&self) -> String {
        format!("{}{}", self.base_url, CALLS_PATH)
    }

    /// Sends `offer_sdp` with `session` and returns the remote SDP answer.
    ///
    /// # Errors
    ///
    /// - [`RealtimeError::InvalidOffer`] if the offer is blank;
    /// - [`RealtimeError::Http`] if the request fails in transport;
    /// - [`RealtimeError::Status`] for any status other than `201 Created`;
    /// - [`RealtimeError::EmptyAnswer`] if the answer body is blank.
    pub async fn create_call(
        &self,
        offer_sdp: &str,
        session: &SessionCreateRequest,
    ) -> Result<String, RealtimeError> {
        if offer_sdp.trim().is_empty() {
            return Err(RealtimeError::InvalidOffer("offer SDP is empty".to_string()));
        }

        let session_json = session.to_json()?;
        let form = Form::new()
            .part(
                "sdp",
                Part::text(offer_sdp.to_string()).mime_str("application/sdp")?,
            )
            .part(
                "session",
                Part::text(session_json).mime_str("application/json")?,
            );

        let url = self.calls_url();
        self.logger.debug_fields(
            "sending SDP offer",
            [
                ("url", url.clone()),
                ("offer_bytes", offer_sdp.len().to_string()),
            ],
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("OpenAI-Organization", &self.org_id)
            .header("OpenAI-Project", &self.project_id)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status != StatusCode::CREATED {
            self.logger.warn_fields(
                "realtime endpoint rejected call",
                [("status", status.as_u16().to_string())],
            );
            return Err(RealtimeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Err(RealtimeError::EmptyAnswer);
        }

        self.logger.info_fields(
            "received SDP answer",
            [("answer_bytes", body.len().to_string())],
        );
        Ok(body)
    }
}

/// Factory holding the configuration clients are built from.
#[derive(Debug, Clone)]
pub struct RealtimeService {
    logger: Logger,
    config: OpenaiConfig,
}

impl RealtimeService {
    pub fn new(logger: Logger, config: OpenaiConfig) -> Self {
        Self { logger, config }
    }

    pub fn config(&self) -> &OpenaiConfig {
        &self.config
    }

    /// Builds a client from the service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RealtimeError::ClientInit`] wrapping the validation error.
    pub fn new_client(&self) -> Result<RealtimeClient, RealtimeError> {
        RealtimeClient::new(
            self.logger.with_fields([("component", "client")]),
            self.config.api_key.clone(),
            self.config.org_id.clone(),
            self.config.project_id.clone(),
            self.config.base_url.clone(),
        )
        .map_err(|e| RealtimeError::ClientInit(Box::new(e)))
    }
}
