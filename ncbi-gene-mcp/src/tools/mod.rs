//! Tools module for NCBI Gene MCP server

use std::borrow::Cow;
use std::sync::Arc;

use ncbi_gene_client::{GeneClient, NcbiError};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::model::{ErrorCode, ErrorData};

pub mod gene;
pub mod protein;
pub mod search;
pub mod symbol;

/// NCBI Gene MCP Server
#[derive(Clone)]
pub struct GeneServer {
    pub(crate) client: Arc<GeneClient>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl GeneServer {
    pub fn new(client: Arc<GeneClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

/// Map a client error to a JSON-RPC error
///
/// Rejected input is reported as invalid params (-32602), everything else as
/// an internal error (-32603).
pub(crate) fn tool_error(context: &str, err: NcbiError) -> ErrorData {
    let code = if err.is_invalid_input() {
        ErrorCode(-32602)
    } else {
        ErrorCode(-32603)
    };

    ErrorData {
        code,
        message: Cow::from(format!("{context}: {err}")),
        data: None,
    }
}
