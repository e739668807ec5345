//! Validated identifiers for the Entrez gene and protein databases
//!
//! Validation happens before any request is issued, so malformed input never
//! consumes a rate-limit slot.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{NcbiError, Result};
use crate::eutils::Database;

/// GI numbers and accession(.version) strings such as `NP_009225.1`
static PROTEIN_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+(\.[0-9]+)?$").expect("protein ID pattern is valid")
});

/// A validated NCBI Gene ID
///
/// Gene IDs are numeric. The textual form is kept exactly as given (after
/// trimming) so results can be matched back to the caller's request.
///
/// # Examples
///
/// ```
/// use ncbi_gene_client::GeneId;
///
/// let id = GeneId::parse(" 672 ").unwrap();
/// assert_eq!(id.as_str(), "672");
///
/// assert!(GeneId::parse("").is_err());
/// assert!(GeneId::parse("BRCA1").is_err());
/// assert!(GeneId::parse("672,675").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneId(String);

impl GeneId {
    /// Parse a Gene ID from a string
    ///
    /// # Errors
    ///
    /// Returns `NcbiError::InvalidId` if the trimmed input is empty or
    /// contains anything other than ASCII digits.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NcbiError::InvalidId {
                database: Database::Gene,
                id: s.to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the Gene ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GeneId {
    type Err = NcbiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A validated protein identifier: a GI number or an accession, optionally versioned
///
/// # Examples
///
/// ```
/// use ncbi_gene_client::ProteinId;
///
/// assert!(ProteinId::parse("NP_009225.1").is_ok());
/// assert!(ProteinId::parse("6552299").is_ok());
/// assert!(ProteinId::parse("NP 009225").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProteinId(String);

impl ProteinId {
    /// Parse a protein identifier from a string
    ///
    /// # Errors
    ///
    /// Returns `NcbiError::InvalidId` if the trimmed input is empty or does
    /// not look like a GI number or accession.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        if !PROTEIN_ID_PATTERN.is_match(trimmed) {
            return Err(NcbiError::InvalidId {
                database: Database::Protein,
                id: s.to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProteinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProteinId {
    type Err = NcbiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
