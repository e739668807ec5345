use std::io::Write;

use anyhow::Result;
use clap::{Args, ValueEnum};
use ncbi_gene_client::{Database, GeneClient};

#[derive(Args, Debug)]
pub struct Summary {
    /// Gene ID or protein ID
    pub id: String,

    /// Database the ID belongs to
    #[arg(long, value_enum, default_value = "gene")]
    pub db: DatabaseArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatabaseArg {
    Gene,
    Protein,
}

impl From<DatabaseArg> for Database {
    fn from(arg: DatabaseArg) -> Self {
        match arg {
            DatabaseArg::Gene => Database::Gene,
            DatabaseArg::Protein => Database::Protein,
        }
    }
}

impl Summary {
    pub async fn execute(&self, client: &GeneClient) -> Result<()> {
        let database = Database::from(self.db);
        tracing::info!(id = %self.id, db = %database, "Fetching raw summary");

        let fields = client.summary(&self.id, database).await?;

        writeln!(std::io::stdout(), "{}", serde_json::to_string_pretty(&fields)?)?;
        Ok(())
    }
}
