//! EFetch API operations

use tracing::{debug, instrument};

use super::{Database, Endpoint, EntrezBridge, ensure_not_html};
use crate::error::{ParseError, Result};

impl EntrezBridge {
    /// Fetch a full record as plain text (`retmode=text`)
    ///
    /// `rettype` selects the record layout, e.g. `fasta` for sequences.
    ///
    /// # Errors
    ///
    /// * `NcbiError::Parse` - an HTML page or an `Error:` line instead of a record
    #[instrument(skip(self), fields(db = %database))]
    pub async fn fetch_text(&self, id: &str, database: Database, rettype: &str) -> Result<String> {
        let url = self.build_url(
            Endpoint::EFetch,
            &[
                ("db", database.as_str().to_string()),
                ("id", id.to_string()),
                ("rettype", rettype.to_string()),
                ("retmode", "text".to_string()),
            ],
        );

        debug!("Making EFetch API request");
        let body = self.make_request(Endpoint::EFetch, &url).await?;
        check_text_record(&body)?;

        Ok(body)
    }
}

fn check_text_record(body: &str) -> std::result::Result<(), ParseError> {
    ensure_not_html(body)?;

    let first_line = body.lines().map(str::trim).find(|line| !line.is_empty());
    match first_line {
        None => Err(ParseError::UnexpectedFormat(
            "empty EFetch response".to_string(),
        )),
        Some(line) if line.starts_with("Error") => {
            Err(ParseError::UnexpectedFormat(line.to_string()))
        }
        Some(_) => Ok(()),
    }
}
