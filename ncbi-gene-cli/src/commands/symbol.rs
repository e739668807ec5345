use std::io::Write;

use anyhow::Result;
use clap::Args;
use ncbi_gene_client::{GeneClient, GeneInfo};

#[derive(Args, Debug)]
pub struct SearchSymbol {
    /// Gene symbol (e.g., BRCA1, TP53)
    pub symbol: String,

    /// Optional organism filter (e.g., human, Homo sapiens)
    #[arg(long)]
    pub organism: Option<String>,

    /// Print the gene records as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchSymbol {
    pub async fn execute(&self, client: &GeneClient) -> Result<()> {
        tracing::info!(
            symbol = %self.symbol,
            organism = self.organism.as_deref().unwrap_or("any"),
            "Searching genes by symbol"
        );

        let genes = client
            .search_by_gene_symbol(&self.symbol, self.organism.as_deref())
            .await?;

        let mut stdout = std::io::stdout();
        if self.json {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&genes)?)?;
        } else {
            write!(
                stdout,
                "{}",
                render_symbol_results(&self.symbol, self.organism.as_deref(), &genes)
            )?;
        }

        Ok(())
    }
}

fn render_symbol_results(symbol: &str, organism: Option<&str>, genes: &[GeneInfo]) -> String {
    let mut out = if genes.is_empty() {
        format!("No genes found for symbol '{symbol}'\n")
    } else {
        format!("Found {} gene(s) for symbol '{symbol}':\n", genes.len())
    };
    if let Some(organism) = organism {
        out.push_str(&format!("in organism '{organism}'\n"));
    }
    if genes.is_empty() {
        return out;
    }
    out.push('\n');

    for (i, gene) in genes.iter().enumerate() {
        out.push_str(&format!("{}. {} (ID: {})\n", i + 1, gene.name, gene.gene_id));
        out.push_str(&format!("   Description: {}\n", gene.description));
        out.push_str(&format!("   Organism: {}\n", gene.organism));
        if !gene.chromosome.is_empty() {
            out.push_str(&format!("   Chromosome: {}\n", gene.chromosome));
        }
        out.push('\n');
    }
    out
}
