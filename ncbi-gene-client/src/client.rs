//! High-level gene and protein client

use futures_util::{StreamExt, stream};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{NcbiError, Result};
use crate::eutils::{Database, EntrezBridge, FieldMap};
use crate::ids::{GeneId, ProteinId};
use crate::models::{GeneInfo, ProteinInfo, SearchResult};

/// Default number of search results used by the CLI and MCP tools
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Largest `retmax` sent to ESearch; larger requests are clamped
pub const MAX_RESULTS_CEILING: usize = 10_000;

/// Number of gene IDs resolved by [`GeneClient::search_by_gene_symbol`]
pub const SYMBOL_SEARCH_LIMIT: usize = 10;

/// Gene lookups in flight at once during a symbol search
const SYMBOL_FETCH_CONCURRENCY: usize = 3;

/// Client for the NCBI `gene` and `protein` databases
///
/// Validates input, calls the [`EntrezBridge`] and turns field maps into
/// typed records. Clones share the HTTP connection pool and rate limiter.
///
/// # Example
///
/// ```no_run
/// use ncbi_gene_client::GeneClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = GeneClient::new();
///
///     let result = client.search_genes("BRCA1[gene] AND human[organism]", 5).await?;
///     for id in &result.ids {
///         let gene = client.fetch_gene_info(id).await?;
///         println!("{}: {} ({})", gene.gene_id, gene.name, gene.organism);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct GeneClient {
    bridge: EntrezBridge,
}

impl GeneClient {
    /// Create a client with default configuration (no API key, 3 requests/second)
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use ncbi_gene_client::{ClientConfig, GeneClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let client = GeneClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_bridge(EntrezBridge::with_config(config))
    }

    pub fn with_bridge(bridge: EntrezBridge) -> Self {
        Self { bridge }
    }

    /// The underlying request bridge
    pub fn bridge(&self) -> &EntrezBridge {
        &self.bridge
    }

    /// Search the gene database
    ///
    /// # Arguments
    ///
    /// * `query` - Entrez query, e.g. `BRCA1[gene] AND human[organism]`
    /// * `max_results` - At least 1; values above 10000 are clamped
    ///
    /// # Errors
    ///
    /// * `NcbiError::InvalidQuery` - empty query or `max_results == 0`
    #[instrument(skip(self))]
    pub async fn search_genes(&self, query: &str, max_results: usize) -> Result<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(NcbiError::InvalidQuery("query must not be empty".to_string()));
        }
        if max_results == 0 {
            return Err(NcbiError::InvalidQuery(
                "max_results must be at least 1".to_string(),
            ));
        }

        let limit = if max_results > MAX_RESULTS_CEILING {
            warn!(
                requested = max_results,
                maximum = MAX_RESULTS_CEILING,
                "max_results clamped"
            );
            MAX_RESULTS_CEILING
        } else {
            max_results
        };

        self.bridge.search(query, Database::Gene, limit).await
    }

    /// Fetch one gene record by numeric Gene ID
    ///
    /// The returned `gene_id` is the requested ID.
    ///
    /// # Errors
    ///
    /// * `NcbiError::InvalidId` - the ID is not numeric
    /// * `NcbiError::NotFound` - NCBI has no record for the ID
    #[instrument(skip(self))]
    pub async fn fetch_gene_info(&self, gene_id: &str) -> Result<GeneInfo> {
        let gene_id = GeneId::parse(gene_id)?;

        let fields = self.summary_record(gene_id.as_str(), Database::Gene).await?;
        let mut gene = GeneInfo::from_fields(&fields);
        gene.gene_id = gene_id.to_string();

        debug!(name = %gene.name, "Gene record fetched");
        Ok(gene)
    }

    /// Fetch one protein record by GI number or accession(.version)
    ///
    /// # Errors
    ///
    /// * `NcbiError::InvalidId` - malformed identifier
    /// * `NcbiError::NotFound` - NCBI has no record for the ID
    #[instrument(skip(self))]
    pub async fn fetch_protein_info(&self, protein_id: &str) -> Result<ProteinInfo> {
        let protein_id = ProteinId::parse(protein_id)?;

        let fields = self
            .summary_record(protein_id.as_str(), Database::Protein)
            .await?;
        let mut protein = ProteinInfo::from_fields(&fields);
        protein.protein_id = protein_id.to_string();

        debug!(length = protein.sequence_length, "Protein record fetched");
        Ok(protein)
    }

    /// Search genes by symbol and resolve the top hits to full records
    ///
    /// Searches `"{symbol}[gene]"` (plus `" AND {organism}[organism]"`),
    /// resolves at most 10 IDs with up to 3 lookups in flight and returns
    /// them in search ranking order. IDs without a record are skipped; any
    /// other failure aborts the whole call.
    #[instrument(skip(self))]
    pub async fn search_by_gene_symbol(
        &self,
        symbol: &str,
        organism: Option<&str>,
    ) -> Result<Vec<GeneInfo>> {
        let query = symbol_query(symbol, organism)?;
        let search = self
            .bridge
            .search(&query, Database::Gene, SYMBOL_SEARCH_LIMIT)
            .await?;

        let mut lookups = stream::iter(search.ids)
            .map(|id| async move {
                let result = self.fetch_gene_info(&id).await;
                (id, result)
            })
            .buffered(SYMBOL_FETCH_CONCURRENCY);

        let mut genes = Vec::new();
        while let Some((id, result)) = lookups.next().await {
            match result {
                Ok(gene) => genes.push(gene),
                Err(NcbiError::NotFound { .. }) => {
                    warn!(gene_id = %id, "Search hit has no gene record, skipping");
                }
                Err(err) => return Err(err),
            }
        }

        info!(genes_found = genes.len(), "Symbol search completed");
        Ok(genes)
    }

    /// Fetch a protein sequence in FASTA format
    #[instrument(skip(self))]
    pub async fn fetch_protein_fasta(&self, protein_id: &str) -> Result<String> {
        let protein_id = ProteinId::parse(protein_id)?;

        self.bridge
            .fetch_text(protein_id.as_str(), Database::Protein, "fasta")
            .await
    }

    /// Raw ESummary fields for one ID
    ///
    /// # Errors
    ///
    /// * `NcbiError::InvalidId` - the ID is malformed for `database`
    /// * `NcbiError::NotFound` - NCBI has no record for the ID
    #[instrument(skip(self))]
    pub async fn summary(&self, id: &str, database: Database) -> Result<FieldMap> {
        let id = match database {
            Database::Gene => GeneId::parse(id)?.to_string(),
            Database::Protein => ProteinId::parse(id)?.to_string(),
        };

        self.summary_record(&id, database).await
    }

    async fn summary_record(&self, id: &str, database: Database) -> Result<FieldMap> {
        self.bridge
            .summary(id, database)
            .await?
            .ok_or_else(|| NcbiError::NotFound {
                database,
                id: id.to_string(),
            })
    }
}

impl Default for GeneClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the ESearch term for a symbol search
fn symbol_query(symbol: &str, organism: Option<&str>) -> Result<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(NcbiError::InvalidQuery(
            "gene symbol must not be empty".to_string(),
        ));
    }

    let mut query = format!("{symbol}[gene]");
    if let Some(organism) = organism.map(str::trim).filter(|o| !o.is_empty()) {
        query.push_str(&format!(" AND {organism}[organism]"));
    }
    Ok(query)
}
