//! ESummary API operations

use tracing::{debug, info, instrument, warn};

use super::{
    Database, Endpoint, EntrezBridge, FieldMap, ResponseFormat, SummaryDocuments, json, xml,
};
use crate::error::Result;

/// Maximum number of IDs sent in one ESummary request
const BATCH_SIZE: usize = 200;

impl EntrezBridge {
    /// Fetch the summary record for a single ID
    ///
    /// Returns `Ok(None)` when NCBI reports no record for the ID (an
    /// "Invalid uid" message or a per-uid error).
    #[instrument(skip(self), fields(db = %database))]
    pub async fn summary(&self, id: &str, database: Database) -> Result<Option<FieldMap>> {
        let documents = self.fetch_documents(&[id], database).await?;

        let mut records = documents.records;
        let position = records
            .iter()
            .position(|record| record.text("uid") == id)
            .or((records.len() == 1).then_some(0));

        Ok(position.map(|index| records.swap_remove(index)))
    }

    /// Fetch summary records for many IDs, in batches of 200
    ///
    /// IDs NCBI cannot resolve are skipped with a warning; the remaining
    /// records keep NCBI's order.
    #[instrument(skip(self, ids), fields(db = %database, ids_count = ids.len()))]
    pub async fn summaries(&self, ids: &[&str], database: Database) -> Result<Vec<FieldMap>> {
        let mut records = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(BATCH_SIZE) {
            let documents = self.fetch_documents(chunk, database).await?;
            records.extend(documents.records);
        }

        info!(
            requested = ids.len(),
            found = records.len(),
            "Summaries fetched"
        );
        Ok(records)
    }

    async fn fetch_documents(&self, ids: &[&str], database: Database) -> Result<SummaryDocuments> {
        if ids.is_empty() {
            return Ok(SummaryDocuments::default());
        }

        let format = self.config().response_format;
        let url = self.build_url(
            Endpoint::ESummary,
            &[
                ("db", database.as_str().to_string()),
                ("id", ids.join(",")),
                ("retmode", format.as_param().to_string()),
            ],
        );

        debug!(batch_size = ids.len(), "Making ESummary API request");
        let body = self.make_request(Endpoint::ESummary, &url).await?;
        let documents = parse_esummary(&body, format)?;

        if !documents.missing.is_empty() {
            warn!(
                missing = ?documents.missing,
                "NCBI returned no summary for some IDs"
            );
        }
        Ok(documents)
    }
}

/// Parse an ESummary body in the given format
pub(crate) fn parse_esummary(body: &str, format: ResponseFormat) -> Result<SummaryDocuments> {
    match format {
        ResponseFormat::Json => json::esummary_documents(body),
        ResponseFormat::Xml => xml::esummary_documents(body),
    }
}
