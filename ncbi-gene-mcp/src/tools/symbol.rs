//! Gene symbol search tool for NCBI Gene MCP server

use ncbi_gene_client::GeneInfo;
use rmcp::{handler::server::wrapper::Parameters, model::*, schemars};
use serde::Deserialize;
use tracing::info;

use super::tool_error;

/// Symbol search request parameters
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SymbolSearchRequest {
    #[schemars(description = "Gene symbol (e.g., 'BRCA1', 'TP53')")]
    pub symbol: String,

    #[schemars(description = "Optional organism filter (e.g., 'human', 'Homo sapiens', 'mouse')")]
    pub organism: Option<String>,
}

/// Search genes by symbol and return the top matching gene records
pub async fn search_by_gene_symbol(
    server: &super::GeneServer,
    Parameters(params): Parameters<SymbolSearchRequest>,
) -> Result<CallToolResult, ErrorData> {
    info!(
        symbol = %params.symbol,
        organism = params.organism.as_deref().unwrap_or("any"),
        "Searching genes by symbol"
    );

    let genes = server
        .client
        .search_by_gene_symbol(&params.symbol, params.organism.as_deref())
        .await
        .map_err(|e| tool_error("Symbol search failed", e))?;

    Ok(CallToolResult::success(vec![Content::text(
        format_symbol_results(&params.symbol, params.organism.as_deref(), &genes),
    )]))
}

fn format_symbol_results(symbol: &str, organism: Option<&str>, genes: &[GeneInfo]) -> String {
    let mut text = if genes.is_empty() {
        format!("No genes found for symbol '{symbol}'")
    } else {
        format!("Found {} gene(s) for symbol '{symbol}'", genes.len())
    };
    if let Some(organism) = organism {
        text.push_str(&format!(" in organism '{organism}'"));
    }
    if genes.is_empty() {
        return text;
    }
    text.push_str(":\n\n");

    for (i, gene) in genes.iter().enumerate() {
        text.push_str(&format!("{}. {} (ID: {})\n", i + 1, gene.name, gene.gene_id));
        text.push_str(&format!("   Description: {}\n", gene.description));
        text.push_str(&format!("   Organism: {}\n", gene.organism));
        if !gene.chromosome.is_empty() {
            text.push_str(&format!("   Chromosome: {}\n", gene.chromosome));
        }
        text.push('\n');
    }
    text
}
