use std::io::Write;

use anyhow::Result;
use clap::Args;
use ncbi_gene_client::GeneClient;

/// Walk through search, record lookup and symbol search for BRCA1
#[derive(Args, Debug)]
pub struct Demo {}

impl Demo {
    pub async fn execute(&self, client: &GeneClient) -> Result<()> {
        let mut stdout = std::io::stdout();

        writeln!(stdout, "NCBI Gene Client Demo")?;
        writeln!(stdout, "{}", "=".repeat(40))?;

        writeln!(stdout, "\n1. Searching for BRCA1 gene...")?;
        let search = client
            .search_genes("BRCA1[gene] AND human[organism]", 5)
            .await?;
        writeln!(stdout, "   Found {} results", search.count)?;

        if let Some(gene_id) = search.ids.first() {
            writeln!(stdout, "\n2. Fetching details for gene ID: {gene_id}")?;
            let gene = client.fetch_gene_info(gene_id).await?;
            writeln!(stdout, "   Gene: {}", gene.name)?;
            writeln!(stdout, "   Description: {}", gene.description)?;
            writeln!(stdout, "   Organism: {}", gene.organism)?;
            writeln!(stdout, "   Chromosome: {}", gene.chromosome)?;
        }

        writeln!(stdout, "\n3. Searching by gene symbol...")?;
        let genes = client.search_by_gene_symbol("BRCA1", Some("human")).await?;
        writeln!(stdout, "   Found {} genes for BRCA1 in humans", genes.len())?;

        writeln!(stdout, "\nDemo completed successfully!")?;
        Ok(())
    }
}
