use std::io::Write;

use anyhow::Result;
use clap::Args;
use ncbi_gene_client::{DEFAULT_MAX_RESULTS, GeneClient, SearchResult};

/// Number of IDs listed in the text output
const IDS_SHOWN: usize = 10;

#[derive(Args, Debug)]
pub struct SearchGenes {
    /// Search query (gene name, symbol, Entrez query syntax)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchGenes {
    pub async fn execute(&self, client: &GeneClient) -> Result<()> {
        tracing::info!(query = %self.query, max_results = self.max_results, "Searching genes");

        let result = client.search_genes(&self.query, self.max_results).await?;

        let mut stdout = std::io::stdout();
        if self.json {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?;
        } else {
            write!(stdout, "{}", render_search(&self.query, &result))?;
        }

        Ok(())
    }
}

fn render_search(query: &str, result: &SearchResult) -> String {
    let shown: Vec<&str> = result
        .ids
        .iter()
        .take(IDS_SHOWN)
        .map(String::as_str)
        .collect();

    let mut out = format!("Found {} genes matching '{}':\n", result.count, query);
    out.push_str(&format!("Gene IDs: {}\n", shown.join(", ")));
    if !result.query_translation.is_empty() {
        out.push_str(&format!("Query translation: {}\n", result.query_translation));
    }
    out
}
