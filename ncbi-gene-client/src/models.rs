//! Typed records built from E-utilities field maps
//!
//! Every constructor here is total: missing keys become empty strings, empty
//! lists or zero, and invalid numbers become zero. Whether a record exists at
//! all is decided before construction (see [`NcbiError::NotFound`](crate::NcbiError::NotFound)).

use serde::{Deserialize, Serialize};

use crate::eutils::{FieldMap, FieldValue};

/// Result of an ESearch query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total number of matching records (may exceed `ids.len()`)
    pub count: u64,
    /// Matching IDs in NCBI ranking order
    pub ids: Vec<String>,
    /// NCBI's interpretation of the query
    pub query_translation: String,
}

impl SearchResult {
    /// Build from an `esearchresult` / `<eSearchResult>` field map
    pub fn from_fields(fields: &FieldMap) -> Self {
        Self {
            count: fields.count("count"),
            ids: fields
                .texts("idlist")
                .into_iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            query_translation: fields.text("querytranslation"),
        }
    }
}

/// Gene record from the `gene` database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneInfo {
    pub gene_id: String,
    /// Official symbol
    pub name: String,
    pub description: String,
    /// Scientific name of the organism
    pub organism: String,
    pub common_name: String,
    pub tax_id: String,
    pub chromosome: String,
    pub map_location: String,
    /// protein-coding, pseudo, ncRNA, ...
    pub gene_type: String,
    pub other_aliases: Vec<String>,
    pub other_designations: Vec<String>,
    pub summary: String,
}

impl GeneInfo {
    /// Build from one gene ESummary record
    ///
    /// `gene_id` is taken from the record's `uid`; callers that looked the
    /// record up by ID overwrite it with the requested ID.
    pub fn from_fields(fields: &FieldMap) -> Self {
        let organism = Organism::from_fields(fields);

        let gene_type = match fields.text("genetype") {
            t if t.is_empty() => fields.text("geneticsource"),
            t => t,
        };

        Self {
            gene_id: fields.text("uid"),
            name: fields.text("name"),
            description: fields.text("description"),
            organism: organism.scientific_name,
            common_name: organism.common_name,
            tax_id: organism.tax_id,
            chromosome: fields.text("chromosome"),
            map_location: fields.text("maplocation"),
            gene_type,
            other_aliases: split_list(fields.get("otheraliases"), ','),
            other_designations: split_list(fields.get("otherdesignations"), '|'),
            summary: fields.text("summary"),
        }
    }
}

/// Protein record from the `protein` database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinInfo {
    /// Identifier the record was requested with
    pub protein_id: String,
    /// Caption (accession without version)
    pub name: String,
    /// Title
    pub description: String,
    pub organism: String,
    pub sequence_length: u64,
    pub accession_version: String,
    /// NCBI GI number (the ESummary uid)
    pub gi: String,
    pub mol_type: String,
    pub tax_id: String,
    pub topology: String,
    pub source_db: String,
    pub update_date: String,
}

impl ProteinInfo {
    /// Build from one protein ESummary record
    ///
    /// `protein_id` defaults to the accession version (or the uid) and is
    /// replaced with the requested ID by [`GeneClient`](crate::GeneClient).
    pub fn from_fields(fields: &FieldMap) -> Self {
        let organism = Organism::from_fields(fields);
        let accession_version = fields.text("accessionversion");
        let gi = match fields.text("gi") {
            gi if gi.is_empty() => fields.text("uid"),
            gi => gi,
        };
        let tax_id = if organism.tax_id.is_empty() {
            fields.text("taxid")
        } else {
            organism.tax_id
        };

        Self {
            protein_id: if accession_version.is_empty() {
                gi.clone()
            } else {
                accession_version.clone()
            },
            name: fields.text("caption"),
            description: fields.text("title"),
            organism: organism.scientific_name,
            sequence_length: fields.count("slen"),
            accession_version,
            gi,
            mol_type: fields.text("moltype"),
            tax_id,
            topology: fields.text("topology"),
            source_db: fields.text("sourcedb"),
            update_date: fields.text("updatedate"),
        }
    }
}

/// Organism fields, which arrive either as a nested record or plain text
struct Organism {
    scientific_name: String,
    common_name: String,
    tax_id: String,
}

impl Organism {
    fn from_fields(fields: &FieldMap) -> Self {
        match fields.get("organism") {
            Some(FieldValue::Record(organism)) => Self {
                scientific_name: organism.text("scientificname"),
                common_name: organism.text("commonname"),
                tax_id: organism.text("taxid"),
            },
            Some(FieldValue::Text(name)) => Self {
                scientific_name: name.trim().to_string(),
                common_name: String::new(),
                tax_id: String::new(),
            },
            _ => Self {
                scientific_name: String::new(),
                common_name: String::new(),
                tax_id: String::new(),
            },
        }
    }
}

/// Split a delimited text field, or flatten a list field, dropping blanks
fn split_list(value: Option<&FieldValue>, separator: char) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };

    value
        .texts()
        .iter()
        .flat_map(|text| text.split(separator))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
