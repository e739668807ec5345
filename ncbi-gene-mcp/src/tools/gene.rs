//! Gene record tool for NCBI Gene MCP server

use rmcp::{handler::server::wrapper::Parameters, model::*, schemars};
use serde::Deserialize;
use std::borrow::Cow;
use tracing::info;

use super::tool_error;

/// Gene lookup request parameters
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GeneInfoRequest {
    #[schemars(description = "NCBI Gene ID (e.g., '672' for human BRCA1)")]
    pub gene_id: String,
}

/// Fetch one gene record by Gene ID
pub async fn fetch_gene_info(
    server: &super::GeneServer,
    Parameters(params): Parameters<GeneInfoRequest>,
) -> Result<CallToolResult, ErrorData> {
    info!(gene_id = %params.gene_id, "Fetching gene information");

    let gene = server
        .client
        .fetch_gene_info(&params.gene_id)
        .await
        .map_err(|e| tool_error("Gene lookup failed", e))?;

    let gene_json = serde_json::to_string_pretty(&gene).map_err(|e| ErrorData {
        code: ErrorCode(-32603),
        message: Cow::from(format!("Failed to serialize gene record: {}", e)),
        data: None,
    })?;

    Ok(CallToolResult::success(vec![Content::text(format!(
        "Gene Information for ID {}:\n\n{}",
        params.gene_id, gene_json
    ))]))
}
