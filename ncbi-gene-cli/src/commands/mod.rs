pub mod demo;
pub mod gene;
pub mod protein;
pub mod search;
pub mod summary;
pub mod symbol;

use std::time::Duration;

use anyhow::Result;
use ncbi_gene_client::{ClientConfig, GeneClient, ResponseFormat};

/// Connection settings collected from the global flags
pub struct ClientOptions<'a> {
    pub api_key: Option<&'a str>,
    pub email: Option<&'a str>,
    pub tool: &'a str,
    pub format: ResponseFormat,
    pub timeout_seconds: Option<u64>,
}

pub fn create_client(options: &ClientOptions<'_>) -> Result<GeneClient> {
    let mut config = ClientConfig::new()
        .with_tool(options.tool)
        .with_response_format(options.format);

    if let Some(key) = options.api_key {
        config = config.with_api_key(key);
    }

    if let Some(email) = options.email {
        config = config.with_email(email);
    }

    if let Some(seconds) = options.timeout_seconds {
        anyhow::ensure!(seconds > 0, "--timeout must be at least 1 second");
        config = config.with_timeout(Duration::from_secs(seconds));
    }

    Ok(GeneClient::with_config(config))
}
