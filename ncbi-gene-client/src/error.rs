use std::result;

use thiserror::Error;

use crate::eutils::Database;

/// Error types for NCBI Entrez client operations
#[derive(Error, Debug)]
pub enum NcbiError {
    /// The HTTP request could not be completed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// NCBI answered with a non-success status, or reported an error inside
    /// an otherwise successful (200) response
    #[error("NCBI API error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The response body could not be interpreted
    #[error("Failed to parse NCBI response: {0}")]
    Parse(#[from] ParseError),

    /// A single-ID fetch returned zero records
    #[error("No {database} record found for ID {id}")]
    NotFound { database: Database, id: String },

    /// The query was rejected before any request was made
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The identifier was rejected before any request was made
    #[error("Invalid {database} ID: {id:?}")]
    InvalidId { database: Database, id: String },
}

/// Errors raised while turning an E-utilities response body into fields
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON body was malformed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// XML body was malformed or truncated
    #[error("XML parsing failed: {0}")]
    Xml(String),

    /// A required element/object was absent from an otherwise valid document
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// The body is not an E-utilities document (e.g. an HTML error page)
    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),
}

pub type Result<T> = result::Result<T, NcbiError>;

impl NcbiError {
    /// Whether a caller-side retry has a reasonable chance of succeeding.
    ///
    /// The client never retries on its own; this only classifies the failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            NcbiError::Transport(err) => {
                if err.is_timeout() || err.is_connect() {
                    return true;
                }
                if let Some(status) = err.status() {
                    return status.is_server_error() || status.as_u16() == 429;
                }
                !err.is_builder() && !err.is_redirect() && !err.is_decode()
            }
            NcbiError::Upstream { status, .. } => (500..600).contains(status) || *status == 429,
            NcbiError::Parse(_)
            | NcbiError::NotFound { .. }
            | NcbiError::InvalidQuery(_)
            | NcbiError::InvalidId { .. } => false,
        }
    }

    /// Whether the error was caused by caller input rather than the upstream service
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            NcbiError::InvalidQuery(_) | NcbiError::InvalidId { .. }
        )
    }
}
