//! Client configuration for NCBI E-utilities access

use std::time::Duration;

use crate::eutils::ResponseFormat;
use crate::rate_limit::{NCBI_API_KEY_RATE, NCBI_DEFAULT_RATE, RateLimiter};

/// Default E-utilities endpoint
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Default tool name reported to NCBI
pub const DEFAULT_TOOL: &str = "ncbi-gene-client";

/// Default per-request HTTP timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`GeneClient`](crate::GeneClient) and [`EntrezBridge`](crate::EntrezBridge)
///
/// NCBI asks callers to identify themselves with `tool` and `email`; an API
/// key raises the allowed rate from 3 to 10 requests per second.
///
/// # Example
///
/// ```
/// use ncbi_gene_client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key_here")
///     .with_email("researcher@university.edu");
///
/// assert_eq!(config.effective_rate_limit(), 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// NCBI API key
    pub api_key: Option<String>,
    /// Contact email sent with every request
    pub email: Option<String>,
    /// Tool name sent with every request
    pub tool: Option<String>,
    /// Override for the E-utilities base URL (used by tests and mirrors)
    pub base_url: Option<String>,
    /// Override for the User-Agent header
    pub user_agent: Option<String>,
    /// Explicit requests-per-second override
    pub rate_limit: Option<f64>,
    /// Per-request HTTP timeout
    pub timeout: Duration,
    /// Body format requested for esearch/esummary
    pub response_format: ResponseFormat,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            email: None,
            tool: None,
            base_url: None,
            user_agent: None,
            rate_limit: None,
            timeout: DEFAULT_TIMEOUT,
            response_format: ResponseFormat::Json,
        }
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the request rate (requests per second)
    pub fn with_rate_limit(mut self, rate: f64) -> Self {
        self.rate_limit = Some(rate);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Whether a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Requests per second: the explicit override, else the NCBI tier for the key
    pub fn effective_rate_limit(&self) -> f64 {
        self.rate_limit.unwrap_or(if self.has_api_key() {
            NCBI_API_KEY_RATE
        } else {
            NCBI_DEFAULT_RATE
        })
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("ncbi-gene-client/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Identification parameters appended to every E-utilities request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("tool".to_string(), self.effective_tool().to_string())];

        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            params.push(("email".to_string(), email.trim().to_string()));
        }

        if self.has_api_key() {
            if let Some(key) = &self.api_key {
                params.push(("api_key".to_string(), key.trim().to_string()));
            }
        }

        params
    }

    pub fn create_rate_limiter(&self) -> RateLimiter {
        match self.rate_limit {
            Some(rate) => RateLimiter::new(rate),
            None => RateLimiter::for_api_key(self.has_api_key()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
