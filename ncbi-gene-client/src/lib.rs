//! # NCBI Gene Client
//!
//! A Rust client library for the NCBI Entrez E-utilities, focused on the
//! `gene` and `protein` databases. It builds E-utilities requests, enforces
//! NCBI's request-rate policy, parses JSON or XML responses and returns typed
//! records.
//!
//! ## Features
//!
//! - **Gene search**: ESearch against the gene database with NCBI ranking
//! - **Gene and protein records**: ESummary records shaped into [`GeneInfo`] and [`ProteinInfo`]
//! - **Symbol lookup**: search by gene symbol and resolve the top hits concurrently
//! - **Rate limiting**: 3 requests/second, or 10 with an API key, shared by all clones
//! - **Error Handling**: distinct errors for transport, upstream, parse and input failures
//!
//! ## Quick Start
//!
//! ```no_run
//! use ncbi_gene_client::{ClientConfig, GeneClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeneClient::with_config(
//!         ClientConfig::new().with_email("researcher@university.edu"),
//!     );
//!
//!     let gene = client.fetch_gene_info("672").await?;
//!     println!("{} on chromosome {}", gene.name, gene.chromosome);
//!
//!     for gene in client.search_by_gene_symbol("TP53", Some("human")).await? {
//!         println!("{}: {}", gene.gene_id, gene.description);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Raw field access
//!
//! The [`EntrezBridge`] returns generic [`FieldMap`]s for callers that need
//! fields the typed records do not carry:
//!
//! ```no_run
//! use ncbi_gene_client::{Database, EntrezBridge};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bridge = EntrezBridge::new();
//!     if let Some(fields) = bridge.summary("672", Database::Gene).await? {
//!         println!("{}", fields.text("nomenclaturename"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod eutils;
pub mod ids;
pub mod models;
pub mod rate_limit;

// Re-export main types for convenience
pub use client::{DEFAULT_MAX_RESULTS, GeneClient, MAX_RESULTS_CEILING, SYMBOL_SEARCH_LIMIT};
pub use config::ClientConfig;
pub use error::{NcbiError, ParseError, Result};
pub use eutils::{Database, EntrezBridge, FieldMap, FieldValue, ResponseFormat};
pub use ids::{GeneId, ProteinId};
pub use models::{GeneInfo, ProteinInfo, SearchResult};
pub use rate_limit::RateLimiter;
