use anyhow::Result;
use clap::Parser;
use ncbi_gene_client::{ClientConfig, GeneClient};
use rmcp::{
    ServerHandler, ServiceExt, handler::server::wrapper::Parameters, model::*, tool, tool_handler,
    tool_router, transport::stdio,
};
use std::sync::Arc;
use tracing::info;

mod tools;
use tools::GeneServer;

#[derive(Parser, Debug)]
#[command(name = "ncbi-gene-mcp", about = "NCBI Gene MCP Server")]
struct Args {
    /// HTTP port to listen on (if not set, uses stdio)
    #[arg(short, long)]
    port: Option<u16>,

    /// API key for NCBI E-utilities (increases rate limit)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_tool("ncbi-gene-mcp");

        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }

        if let Some(email) = &self.email {
            config = config.with_email(email);
        }

        config
    }
}

#[tool_router]
impl GeneServer {
    #[tool(
        description = "Search for genes in the NCBI gene database. Accepts gene names, symbols, or Entrez query syntax (e.g., 'BRCA1[gene] AND human[organism]'). Returns the total match count, the top gene IDs, and NCBI's query translation."
    )]
    async fn search_genes(
        &self,
        params: Parameters<tools::search::SearchGenesRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        tools::search::search_genes(self, params).await
    }

    #[tool(
        description = "Fetch detailed information for a gene by NCBI Gene ID: symbol, description, organism, chromosome, map location, gene type, aliases, and summary."
    )]
    async fn fetch_gene_info(
        &self,
        params: Parameters<tools::gene::GeneInfoRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        tools::gene::fetch_gene_info(self, params).await
    }

    #[tool(
        description = "Fetch information for a protein by NCBI Protein ID (GI number or accession such as NP_009225.1): name, title, organism, and sequence length."
    )]
    async fn fetch_protein_info(
        &self,
        params: Parameters<tools::protein::ProteinInfoRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        tools::protein::fetch_protein_info(self, params).await
    }

    #[tool(
        description = "Search genes by official symbol, optionally restricted to an organism, and return details for the top matches (up to 10)."
    )]
    async fn search_by_gene_symbol(
        &self,
        params: Parameters<tools::symbol::SymbolSearchRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        tools::symbol::search_by_gene_symbol(self, params).await
    }
}

#[tool_handler]
impl ServerHandler for GeneServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ncbi-gene-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                description: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "NCBI Gene MCP Server - Search genes and retrieve gene and protein information from NCBI Entrez.".to_string(),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing to stderr to avoid interfering with JSON-RPC on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting NCBI Gene MCP Server");

    // One client for all sessions so every request shares the rate limiter
    let shared_client = Arc::new(GeneClient::with_config(args.client_config()));

    if let Some(port) = args.port {
        use rmcp::transport::streamable_http_server::{
            StreamableHttpService, session::local::LocalSessionManager,
        };
        let service = StreamableHttpService::new(
            move || Ok(GeneServer::new(Arc::clone(&shared_client))),
            LocalSessionManager::default().into(),
            Default::default(),
        );

        let router = axum::Router::new().nest_service("/mcp", service);
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        info!("HTTP MCP server listening on port {port}");
        axum::serve(listener, router).await?;
    } else {
        let service = GeneServer::new(shared_client).serve(stdio()).await?;
        info!("MCP server initialized, waiting for requests");
        service.waiting().await?;
    }

    Ok(())
}
