//! HTTP Client Wrapper
//!
//! Thin transport layer over `reqwest` for the array management API. One
//! connection-pooling client is built up front and shared by every server
//! task for the lifetime of the collector, so no lazy-init guard is needed.
//!
//! # Authentication
//!
//! Explicit configured credentials win. Userinfo embedded in a server
//! address is extracted and stripped before the request goes on the wire and
//! is used only as a fallback. With neither, the request fails with
//! `MissingCredentials` before any network I/O.

use crate::config::IntelliflashConfig;
use crate::error::{CollectorError, Result};
use crate::intelliflash::request::{ApiRequest, HttpMethod};
use crate::intelliflash::types::ApiException;
use crate::intelliflash::API_URI;
use async_trait::async_trait;
use reqwest::Url;
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::debug;

/// Time to wait for the array to start answering before giving up on a
/// connection attempt. The overall response timeout comes from config.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Issues one authenticated request and returns the buffered response body.
///
/// Abstracted as a trait so the orchestrator can be exercised against a mock
/// transport in tests.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn execute(&self, server: &str, request: &ApiRequest) -> Result<Vec<u8>>;
}

/// Production transport backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: reqwest::Client,
    username: String,
    password: Option<String>,
}

impl HttpTransport {
    /// Build the client eagerly from config. TLS material is read from disk
    /// here, so a bad path fails at startup rather than mid-cycle.
    pub fn new(config: &IntelliflashConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_secs(config.response_timeout_seconds));

        if let Some(ca_path) = &config.tls.ca {
            let pem = std::fs::read(ca_path)?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| CollectorError::Config(format!("invalid CA bundle: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }

        if let (Some(cert_path), Some(key_path)) = (&config.tls.cert, &config.tls.key) {
            let cert_pem = std::fs::read(cert_path)?;
            let key_pem = std::fs::read(key_path)?;
            let identity = reqwest::Identity::from_pkcs8_pem(&cert_pem, &key_pem)
                .map_err(|e| CollectorError::Config(format!("invalid client identity: {e}")))?;
            builder = builder.identity(identity);
        }

        if config.tls.insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| CollectorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            username: config.username.clone(),
            password: config
                .password
                .as_ref()
                .map(|p| p.expose_secret().to_string()),
        })
    }

    /// Parse the server address, defaulting the scheme to https, and strip
    /// any embedded userinfo out of the URL that goes on the wire.
    fn target_url(&self, server: &str, operation: &str) -> Result<(Url, Option<(String, String)>)> {
        let with_scheme = if server.contains("://") {
            server.to_string()
        } else {
            format!("https://{server}")
        };

        let mut url = Url::parse(&with_scheme)
            .map_err(|e| CollectorError::Config(format!("invalid server address '{server}': {e}")))?;

        let url_credentials = if url.username().is_empty() {
            None
        } else {
            let user = url.username().to_string();
            let pass = url.password().unwrap_or_default().to_string();
            Some((user, pass))
        };
        let _ = url.set_username("");
        let _ = url.set_password(None);

        url.set_path(&format!("{API_URI}/{operation}"));
        Ok((url, url_credentials))
    }

    fn resolve_credentials(
        &self,
        server: &str,
        url_credentials: Option<(String, String)>,
    ) -> Result<(String, String)> {
        if !self.username.is_empty() || self.password.is_some() {
            return Ok((
                self.username.clone(),
                self.password.clone().unwrap_or_default(),
            ));
        }
        url_credentials.ok_or_else(|| CollectorError::MissingCredentials {
            server: server.to_string(),
        })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn execute(&self, server: &str, request: &ApiRequest) -> Result<Vec<u8>> {
        let (url, url_credentials) = self.target_url(server, request.operation)?;
        let (username, password) = self.resolve_credentials(server, url_credentials)?;

        debug!("{} {}", request.operation, server);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url).json(&request.body),
        };
        builder = builder
            .basic_auth(username, Some(password))
            .header("Content-Type", "application/json")
            .header("Cache-Control", "no-cache");

        let response = builder
            .send()
            .await
            .map_err(|source| CollectorError::Connection {
                server: server.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| CollectorError::Connection {
                server: server.to_string(),
                source,
            })?;

        if !status.is_success() {
            // The array sometimes wraps errors in an exception envelope;
            // surface its message when it decodes, stay quiet when it does not.
            let detail = serde_json::from_slice::<ApiException>(&body)
                .ok()
                .and_then(|e| e.text().map(|t| format!(": {t}")))
                .unwrap_or_default();
            return Err(CollectorError::HttpStatus {
                server: server.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        Ok(body.to_vec())
    }
}
