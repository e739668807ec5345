//! Protein record tool for NCBI Gene MCP server

use rmcp::{handler::server::wrapper::Parameters, model::*, schemars};
use serde::Deserialize;
use std::borrow::Cow;
use tracing::info;

use super::tool_error;

/// Protein lookup request parameters
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProteinInfoRequest {
    #[schemars(description = "NCBI Protein ID: GI number or accession (e.g., 'NP_009225.1')")]
    pub protein_id: String,
}

/// Fetch one protein record by GI number or accession
pub async fn fetch_protein_info(
    server: &super::GeneServer,
    Parameters(params): Parameters<ProteinInfoRequest>,
) -> Result<CallToolResult, ErrorData> {
    info!(protein_id = %params.protein_id, "Fetching protein information");

    let protein = server
        .client
        .fetch_protein_info(&params.protein_id)
        .await
        .map_err(|e| tool_error("Protein lookup failed", e))?;

    let protein_json = serde_json::to_string_pretty(&protein).map_err(|e| ErrorData {
        code: ErrorCode(-32603),
        message: Cow::from(format!("Failed to serialize protein record: {}", e)),
        data: None,
    })?;

    Ok(CallToolResult::success(vec![Content::text(format!(
        "Protein Information for ID {}:\n\n{}",
        params.protein_id, protein_json
    ))]))
}
