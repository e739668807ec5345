//! ESearch API operations

use tracing::{debug, info, instrument};

use super::{Database, Endpoint, EntrezBridge, ResponseFormat, check_in_body_error, json, xml};
use crate::error::Result;
use crate::models::SearchResult;

impl EntrezBridge {
    /// Search a database and return matching IDs in NCBI ranking order
    ///
    /// `max_results` is sent as `retmax`; the returned ID list never exceeds
    /// it even if the server returns more.
    ///
    /// # Errors
    ///
    /// * `NcbiError::Transport` / `NcbiError::Upstream` - request failed
    /// * `NcbiError::Upstream` with status 200 - NCBI reported an `ERROR`
    /// * `NcbiError::Parse` - malformed body
    #[instrument(skip(self), fields(db = %database))]
    pub async fn search(
        &self,
        term: &str,
        database: Database,
        max_results: usize,
    ) -> Result<SearchResult> {
        let format = self.config().response_format;
        let url = self.build_url(
            Endpoint::ESearch,
            &[
                ("db", database.as_str().to_string()),
                ("term", term.to_string()),
                ("retmax", max_results.to_string()),
                ("retmode", format.as_param().to_string()),
            ],
        );

        debug!("Making ESearch API request");
        let body = self.make_request(Endpoint::ESearch, &url).await?;

        let mut result = parse_esearch(&body, format)?;
        result.ids.truncate(max_results);

        info!(
            total_count = result.count,
            returned = result.ids.len(),
            "Search completed"
        );
        Ok(result)
    }
}

/// Parse an ESearch body in the given format
pub(crate) fn parse_esearch(body: &str, format: ResponseFormat) -> Result<SearchResult> {
    let fields = match format {
        ResponseFormat::Json => json::esearch_fields(body)?,
        ResponseFormat::Xml => xml::esearch_fields(body)?,
    };
    check_in_body_error(&fields)?;

    Ok(SearchResult::from_fields(&fields))
}
