//! Gene search tool for NCBI Gene MCP server

use ncbi_gene_client::{DEFAULT_MAX_RESULTS, SearchResult};
use rmcp::{handler::server::wrapper::Parameters, model::*, schemars};
use serde::Deserialize;
use tracing::info;

use super::tool_error;

/// Number of IDs listed in the tool output
const IDS_SHOWN: usize = 10;

/// Search request parameters
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchGenesRequest {
    #[schemars(
        description = "Search query (gene name, symbol, or Entrez query such as 'BRCA1[gene] AND human[organism]')"
    )]
    pub query: String,

    #[schemars(description = "Maximum number of results to return (default: 20, max: 10000)")]
    pub max_results: Option<usize>,
}

/// Search the NCBI gene database
pub async fn search_genes(
    server: &super::GeneServer,
    Parameters(params): Parameters<SearchGenesRequest>,
) -> Result<CallToolResult, ErrorData> {
    let max_results = params.max_results.unwrap_or(DEFAULT_MAX_RESULTS);

    info!(query = %params.query, max_results, "Searching genes");

    let result = server
        .client
        .search_genes(&params.query, max_results)
        .await
        .map_err(|e| tool_error("Gene search failed", e))?;

    Ok(CallToolResult::success(vec![Content::text(
        format_search_result(&params.query, &result),
    )]))
}

fn format_search_result(query: &str, result: &SearchResult) -> String {
    let ids: Vec<&str> = result
        .ids
        .iter()
        .take(IDS_SHOWN)
        .map(String::as_str)
        .collect();
    let translation: &str = if result.query_translation.is_empty() {
        "N/A"
    } else {
        &result.query_translation
    };

    format!(
        "Found {} genes matching '{}':\n\nGene IDs: {}\n\nQuery translation: {}",
        result.count,
        query,
        ids.join(", "),
        translation
    )
}
