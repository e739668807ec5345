use std::io::Write;

use anyhow::Result;
use clap::Args;
use ncbi_gene_client::GeneClient;

#[derive(Args, Debug)]
pub struct ProteinInfo {
    /// NCBI Protein ID (GI number or accession, e.g., NP_009225.1)
    pub protein_id: String,

    /// Print the sequence in FASTA format instead of the summary
    #[arg(long)]
    pub fasta: bool,
}

impl ProteinInfo {
    pub async fn execute(&self, client: &GeneClient) -> Result<()> {
        let mut stdout = std::io::stdout();

        if self.fasta {
            tracing::info!(protein_id = %self.protein_id, "Fetching protein sequence");
            let fasta = client.fetch_protein_fasta(&self.protein_id).await?;
            write!(stdout, "{}", fasta)?;
            if !fasta.ends_with('\n') {
                writeln!(stdout)?;
            }
        } else {
            tracing::info!(protein_id = %self.protein_id, "Fetching protein information");
            let protein = client.fetch_protein_info(&self.protein_id).await?;
            writeln!(stdout, "{}", serde_json::to_string_pretty(&protein)?)?;
        }

        Ok(())
    }
}
