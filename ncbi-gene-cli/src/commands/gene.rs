use std::io::Write;

use anyhow::Result;
use clap::Args;
use ncbi_gene_client::GeneClient;

#[derive(Args, Debug)]
pub struct GeneInfo {
    /// NCBI Gene ID (e.g., 672 for BRCA1)
    pub gene_id: String,
}

impl GeneInfo {
    pub async fn execute(&self, client: &GeneClient) -> Result<()> {
        tracing::info!(gene_id = %self.gene_id, "Fetching gene information");

        let gene = client.fetch_gene_info(&self.gene_id).await?;

        writeln!(std::io::stdout(), "{}", serde_json::to_string_pretty(&gene)?)?;
        Ok(())
    }
}
