//! JSON (`retmode=json`) body parsing

use serde_json::{Map, Value};

use super::{FieldMap, FieldValue, SummaryDocuments, check_summary_messages, ensure_not_html};
use crate::error::{NcbiError, ParseError, Result};

fn parse_json(body: &str) -> Result<Value> {
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        return Err(ParseError::UnexpectedFormat("empty response body".to_string()).into());
    }
    ensure_not_html(trimmed)?;
    if trimmed.starts_with('<') {
        return Err(ParseError::UnexpectedFormat(
            "expected JSON but received markup".to_string(),
        )
        .into());
    }

    serde_json::from_str(trimmed).map_err(|e| NcbiError::from(ParseError::from(e)))
}

/// Convert a JSON value into a field value; `null` has no field representation
fn to_field_value(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
        Value::Number(n) => Some(FieldValue::Text(n.to_string())),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Array(items) => Some(FieldValue::List(
            items.iter().filter_map(to_field_value).collect(),
        )),
        Value::Object(map) => Some(FieldValue::Record(to_field_map(map))),
    }
}

pub(crate) fn to_field_map(object: &Map<String, Value>) -> FieldMap {
    let mut fields = FieldMap::new();
    for (key, value) in object {
        if let Some(value) = to_field_value(value) {
            fields.insert(key, value);
        }
    }
    fields
}

/// Fields of the `esearchresult` object
pub(crate) fn esearch_fields(body: &str) -> Result<FieldMap> {
    let value = parse_json(body)?;

    match value.get("esearchresult").and_then(Value::as_object) {
        Some(result) => Ok(to_field_map(result)),
        None => match value.get("error").and_then(Value::as_str) {
            Some(message) => Err(NcbiError::Upstream {
                status: 200,
                message: message.to_string(),
            }),
            None => Err(ParseError::MissingElement("esearchresult".to_string()).into()),
        },
    }
}

/// Records of an ESummary `result` object, in `uids` order
pub(crate) fn esummary_documents(body: &str) -> Result<SummaryDocuments> {
    let value = parse_json(body)?;

    if let Some(messages) = value.get("esummaryresult") {
        let messages: Vec<String> = match messages {
            Value::Array(items) => items
                .iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect(),
            Value::String(s) => vec![s.clone()],
            _ => Vec::new(),
        };
        check_summary_messages(&messages)?;
    }

    if let Some(message) = value.get("error").and_then(Value::as_str) {
        return Err(NcbiError::Upstream {
            status: 200,
            message: message.to_string(),
        });
    }

    let Some(result) = value.get("result").and_then(Value::as_object) else {
        if value.get("esummaryresult").is_some() {
            return Ok(SummaryDocuments::default());
        }
        return Err(ParseError::MissingElement("result".to_string()).into());
    };

    let uids: Vec<String> = match result.get("uids").and_then(Value::as_array) {
        Some(uids) => uids
            .iter()
            .filter_map(|uid| match uid {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        None => result.keys().filter(|k| *k != "uids").cloned().collect(),
    };

    let mut documents = SummaryDocuments::default();
    for uid in uids {
        match result.get(&uid).and_then(Value::as_object) {
            Some(doc) if !doc.contains_key("error") => {
                let mut fields = to_field_map(doc);
                fields.insert("uid", uid);
                documents.records.push(fields);
            }
            _ => documents.missing.push(uid),
        }
    }

    Ok(documents)
}
