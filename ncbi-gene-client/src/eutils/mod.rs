//! Request bridge for the NCBI Entrez E-utilities
//!
//! The bridge functionality is split across focused modules:
//! - `eutils/mod.rs` - Bridge struct, URL construction, rate-limited HTTP
//! - `eutils/esearch` - ESearch API (ID lists for a query)
//! - `eutils/esummary` - ESummary API (document summaries for IDs)
//! - `eutils/efetch` - EFetch API (plain-text records such as FASTA)
//! - `eutils/json` / `eutils/xml` - body parsing into [`FieldMap`]

mod efetch;
mod esearch;
mod esummary;
mod fields;
mod json;
mod xml;

use std::fmt;
use std::str::FromStr;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{NcbiError, ParseError, Result};
use crate::rate_limit::RateLimiter;

pub use fields::{FieldMap, FieldValue};

/// Entrez databases served by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Gene,
    Protein,
}

impl Database {
    /// Value of the `db` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Gene => "gene",
            Database::Protein => "protein",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = NcbiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gene" => Ok(Database::Gene),
            "protein" => Ok(Database::Protein),
            other => Err(NcbiError::InvalidQuery(format!(
                "Unsupported database: {other}"
            ))),
        }
    }
}

/// Body format requested through the `retmode` parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn as_param(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// E-utilities endpoints used by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    ESearch,
    ESummary,
    EFetch,
}

impl Endpoint {
    fn as_path(&self) -> &'static str {
        match self {
            Endpoint::ESearch => "esearch.fcgi",
            Endpoint::ESummary => "esummary.fcgi",
            Endpoint::EFetch => "efetch.fcgi",
        }
    }
}

/// Records parsed from one ESummary response
#[derive(Debug, Default)]
pub(crate) struct SummaryDocuments {
    /// Resolved records, each carrying its `uid`
    pub records: Vec<FieldMap>,
    /// UIDs NCBI reported but could not resolve
    pub missing: Vec<String>,
}

/// Rate-limited HTTP bridge to the E-utilities
///
/// Every request passes through one [`RateLimiter`]; clones of the bridge
/// share both the HTTP connection pool and the limiter.
#[derive(Clone, Debug)]
pub struct EntrezBridge {
    client: Client,
    pub(crate) base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl EntrezBridge {
    /// Create a bridge with default configuration (no API key, 3 requests/second)
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a bridge with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use ncbi_gene_client::{ClientConfig, EntrezBridge};
    ///
    /// let bridge = EntrezBridge::with_config(
    ///     ClientConfig::new().with_email("researcher@university.edu"),
    /// );
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self::with_http_client(client, config)
    }

    /// Create a bridge around an existing reqwest client
    pub fn with_http_client(client: Client, config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            rate_limiter,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Build an endpoint URL from request parameters plus tool/email/api_key
    pub(crate) fn build_url(&self, endpoint: Endpoint, params: &[(&str, String)]) -> String {
        let api_params = self.config.build_api_params();

        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .chain(api_params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();

        format!("{}/{}?{}", self.base_url, endpoint.as_path(), query.join("&"))
    }

    /// Issue a GET through the rate limiter and return the body text
    ///
    /// # Errors
    ///
    /// * `NcbiError::Transport` - connection, timeout or body read failure
    /// * `NcbiError::Upstream` - any non-2xx status
    pub(crate) async fn make_request(&self, endpoint: Endpoint, url: &str) -> Result<String> {
        self.rate_limiter.acquire().await;

        debug!(endpoint = endpoint.as_path(), "Making API request");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message_from_body(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            warn!(
                endpoint = endpoint.as_path(),
                status = status.as_u16(),
                message = %message,
                "API request failed"
            );
            return Err(NcbiError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

impl Default for EntrezBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an error reported inside a 200 response into `NcbiError::Upstream`
pub(crate) fn check_in_body_error(fields: &FieldMap) -> Result<()> {
    let message = fields.text("error");
    if message.is_empty() {
        Ok(())
    } else {
        Err(NcbiError::Upstream {
            status: 200,
            message,
        })
    }
}

/// Interpret ESummary-level messages (`esummaryresult` / `<ERROR>`)
///
/// NCBI answers unknown UIDs with "Invalid uid ..." messages instead of
/// records; those mean "zero records". Anything else is an upstream error.
pub(crate) fn check_summary_messages(messages: &[String]) -> Result<()> {
    let messages: Vec<&str> = messages
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect();

    let all_unresolved = messages.iter().all(|m| {
        let lower = m.to_ascii_lowercase();
        lower.starts_with("invalid uid") || lower.contains("cannot get document summary")
    });

    if all_unresolved {
        if !messages.is_empty() {
            debug!(messages = ?messages, "ESummary reported unresolved UIDs");
        }
        Ok(())
    } else {
        Err(NcbiError::Upstream {
            status: 200,
            message: messages.join("; "),
        })
    }
}

/// Reject bodies that are HTML pages rather than E-utilities documents
pub(crate) fn ensure_not_html(body: &str) -> std::result::Result<(), ParseError> {
    let head: String = body.trim_start().chars().take(64).collect::<String>().to_ascii_lowercase();
    if head.starts_with("<!doctype html") || head.starts_with("<html") {
        return Err(ParseError::UnexpectedFormat(
            "received an HTML page instead of an E-utilities document".to_string(),
        ));
    }
    Ok(())
}

/// Best-effort message from a failed response body
fn error_message_from_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() || ensure_not_html(trimmed).is_err() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return value
            .get("error")
            .and_then(|e| e.as_str())
            .map(|s| s.to_string());
    }

    trimmed
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(200).collect())
}
